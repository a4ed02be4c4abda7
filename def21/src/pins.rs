//!
//! # Pins & Pin Properties
//!
//! Pin statements have two geometry styles: the pre-5.6 single `+ LAYER` of [DefPin],
//! and the 5.6-and-later shapes, vias and `+ PORT` groups written by the calls below.
//!

// Local imports
use super::data::*;
use super::error::*;
use super::fmt::fmt_point_list;
use super::state::DefState;
use super::write::DefWriter;

/// Indentation of a pin's own shapes, and of the shapes of its ports
#[derive(Clone, Copy)]
enum ShapeNesting {
    Pin,
    Port,
}
impl ShapeNesting {
    /// Indent of the `+ LAYER` or `+ POLYGON` line
    fn head(&self) -> &'static str {
        match self {
            Self::Pin => "\n      + ",
            Self::Port => "\n        + ",
        }
    }
    /// Indent of option and point lines
    fn body(&self) -> &'static str {
        match self {
            Self::Pin => "\n        ",
            Self::Port => "\n          ",
        }
    }
}

impl<'wr> DefWriter<'wr> {
    /// Open `PINS` with `count` pins. Requires `COMPONENTS` to have been written.
    pub fn start_pins(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::Pin)?;
        self.check_open(DefSection::Pin)?;
        self.check(
            self.session.written.contains(&DefSection::Component),
            DefStatus::BadOrder,
        )?;
        self.open_section(count, DefState::PinStart, format_args!("PINS {count}"))
    }
    /// Write pin `pin`. Left open for shapes, vias, ports, antenna data and properties.
    pub fn pin(&mut self, pin: &DefPin) -> DefResult<()> {
        self.call(DefSection::Pin)?;
        self.expect_state(&[DefState::PinStart, DefState::Pin, DefState::PinPort])?;
        self.nonempty(&pin.name)?;
        self.nonempty(&pin.net)?;
        if let Some(ref p) = pin.placement {
            self.check_data(p.status != PlacementStatus::Unplaced)?;
        }
        if let Some((ref layer, _)) = pin.layer {
            self.nonempty(layer)?;
        }
        self.take_item()?;

        self.emit(format_args!(" ;\n   - {} + NET {}", pin.name, pin.net))?;
        if pin.special {
            self.emit(format_args!("\n      + SPECIAL"))?;
        }
        if let Some(dir) = pin.direction {
            self.emit(format_args!("\n      + DIRECTION {dir}"))?;
        }
        if let Some(usage) = pin.usage {
            self.emit(format_args!("\n      + USE {usage}"))?;
        }
        if let Some(ref p) = pin.placement {
            self.emit(format_args!("\n      + {} {} {}", p.status, p.origin, p.orient))?;
        }
        if let Some((ref layer, rect)) = pin.layer {
            self.emit(format_args!("\n      + LAYER {layer} {rect}"))?;
        }
        self.session.state = DefState::Pin;
        Ok(())
    }
    /// `+ LAYER` shape of the current pin. Requires 5.6.
    pub fn pin_layer(&mut self, shape: &DefPinShape, rect: DefRect) -> DefResult<()> {
        self.call(DefSection::Pin)?;
        self.expect_state(&[DefState::Pin])?;
        self.min_version(&V5P6)?;
        self.pin_shape_checks(shape)?;
        self.pin_shape_head("LAYER", shape, ShapeNesting::Pin)?;
        self.emit(format_args!("\n        {rect}"))?;
        self.session.state = DefState::Pin;
        Ok(())
    }
    /// `+ POLYGON` shape of the current pin. Requires 5.6.
    pub fn pin_polygon(&mut self, shape: &DefPinShape, pts: &[DefPoint]) -> DefResult<()> {
        self.call(DefSection::Pin)?;
        self.expect_state(&[DefState::Pin])?;
        self.min_version(&V5P6)?;
        self.pin_shape_checks(shape)?;
        self.check_data(!pts.is_empty())?;
        self.pin_shape_head("POLYGON", shape, ShapeNesting::Pin)?;
        self.pin_shape_points(pts, ShapeNesting::Pin)?;
        self.session.state = DefState::Pin;
        Ok(())
    }
    /// `+ VIA` of the current pin, with optional mask (5.8). Requires 5.7.
    pub fn pin_via(&mut self, via: &str, at: DefPoint, mask: Option<i32>) -> DefResult<()> {
        self.call(DefSection::Pin)?;
        self.expect_state(&[DefState::Pin])?;
        self.pin_via_checks(via, mask)?;
        self.pin_via_body(ShapeNesting::Pin, via, at, mask)?;
        self.session.state = DefState::Pin;
        Ok(())
    }
    /// Open a `+ PORT` of the current pin. Requires 5.7.
    pub fn pin_port(&mut self) -> DefResult<()> {
        self.call(DefSection::Pin)?;
        self.expect_state(&[DefState::Pin])?;
        self.min_version(&V5P7)?;
        self.emit(format_args!("\n      + PORT"))?;
        self.session.state = DefState::PinPort;
        Ok(())
    }
    /// `+ LAYER` shape of the current port. Requires 5.7.
    pub fn pin_port_layer(&mut self, shape: &DefPinShape, rect: DefRect) -> DefResult<()> {
        self.call(DefSection::Pin)?;
        self.expect_state(&[DefState::Pin, DefState::PinPort])?;
        self.min_version(&V5P7)?;
        self.pin_shape_checks(shape)?;
        self.pin_shape_head("LAYER", shape, ShapeNesting::Port)?;
        self.emit(format_args!("\n        {rect}"))?;
        self.session.state = DefState::Pin;
        Ok(())
    }
    /// `+ POLYGON` shape of the current port. Requires 5.7.
    pub fn pin_port_polygon(&mut self, shape: &DefPinShape, pts: &[DefPoint]) -> DefResult<()> {
        self.call(DefSection::Pin)?;
        self.expect_state(&[DefState::Pin, DefState::PinPort])?;
        self.min_version(&V5P7)?;
        self.pin_shape_checks(shape)?;
        self.check_data(!pts.is_empty())?;
        self.pin_shape_head("POLYGON", shape, ShapeNesting::Port)?;
        self.pin_shape_points(pts, ShapeNesting::Port)?;
        self.session.state = DefState::Pin;
        Ok(())
    }
    /// `+ VIA` of the current port, with optional mask (5.8). Requires 5.7.
    pub fn pin_port_via(&mut self, via: &str, at: DefPoint, mask: Option<i32>) -> DefResult<()> {
        self.call(DefSection::Pin)?;
        self.expect_state(&[DefState::Pin, DefState::PinPort])?;
        self.min_version(&V5P7)?;
        self.pin_via_checks(via, mask)?;
        self.pin_via_body(ShapeNesting::Port, via, at, mask)?;
        self.session.state = DefState::Pin;
        Ok(())
    }
    /// Placement of the current port. Requires 5.7.
    pub fn pin_port_location(&mut self, placement: &DefPlacement) -> DefResult<()> {
        self.call(DefSection::Pin)?;
        self.expect_state(&[DefState::Pin, DefState::PinPort])?;
        self.min_version(&V5P7)?;
        self.check_data(placement.status != PlacementStatus::Unplaced)?;
        self.emit(format_args!(
            "\n        + {} {} {} ",
            placement.status, placement.origin, placement.orient
        ))?;
        self.session.state = DefState::Pin;
        Ok(())
    }
    /// `+ NETEXPR` of the current pin. Requires 5.6.
    pub fn pin_net_expr(&mut self, expr: &str) -> DefResult<()> {
        self.pin_option(&V5P6, expr, format_args!("\n      + NETEXPR \"{expr}\""))
    }
    /// `+ SUPPLYSENSITIVITY` of the current pin. Requires 5.6.
    pub fn pin_supply_sensitivity(&mut self, pin: &str) -> DefResult<()> {
        self.pin_option(&V5P6, pin, format_args!("\n      + SUPPLYSENSITIVITY {pin}"))
    }
    /// `+ GROUNDSENSITIVITY` of the current pin. Requires 5.6.
    pub fn pin_ground_sensitivity(&mut self, pin: &str) -> DefResult<()> {
        self.pin_option(&V5P6, pin, format_args!("\n      + GROUNDSENSITIVITY {pin}"))
    }
    /// `+ ANTENNAMODEL` of the current pin. Requires 5.4.
    pub fn pin_antenna_model(&mut self, oxide: &str) -> DefResult<()> {
        self.pin_option(&V5P4, oxide, format_args!("\n      + ANTENNAMODEL {oxide}"))
    }
    fn pin_option(
        &mut self,
        min: &DefDecimal,
        arg: &str,
        args: std::fmt::Arguments,
    ) -> DefResult<()> {
        self.call(DefSection::Pin)?;
        self.expect_state(&[DefState::Pin])?;
        self.min_version(min)?;
        self.nonempty(arg)?;
        self.emit(args)
    }
    /// Antenna statement of the current pin, with optional layer. Requires 5.4.
    /// The `*CAR` kinds require a layer.
    pub fn pin_antenna(
        &mut self,
        kind: PinAntennaKind,
        value: i32,
        layer: Option<&str>,
    ) -> DefResult<()> {
        self.call(DefSection::Pin)?;
        self.expect_state(&[DefState::Pin])?;
        self.min_version(&V5P4)?;
        match layer {
            Some(l) => self.nonempty(l)?,
            None => self.check_data(!kind.requires_layer())?,
        }
        self.emit(format_args!("\n      + {kind} {value}"))?;
        if let Some(l) = layer {
            self.emit(format_args!(" LAYER {l}"))?;
        }
        Ok(())
    }
    /// Close `PINS`
    pub fn end_pins(&mut self) -> DefResult<()> {
        self.call(DefSection::Pin)?;
        self.check_close(&[DefState::PinStart, DefState::Pin])?;
        // The `PINS` line and every pin are terminated by their successor
        self.close_section(DefState::PinEnd, format_args!(" ;\nEND PINS\n\n"))
    }

    fn pin_shape_checks(&self, shape: &DefPinShape) -> DefResult<()> {
        self.nonempty(&shape.layer)?;
        if shape.mask.is_some() {
            self.min_version(&V5P8)?;
        }
        self.check_data(!(shape.spacing.is_some() && shape.design_rule_width.is_some()))
    }
    fn pin_shape_head(
        &mut self,
        keyword: &str,
        shape: &DefPinShape,
        nesting: ShapeNesting,
    ) -> DefResult<()> {
        let (head, body) = (nesting.head(), nesting.body());
        self.emit(format_args!("{head}{keyword} {} ", shape.layer))?;
        if let Some(m) = shape.mask {
            self.emit(format_args!("{body}MASK {m}"))?;
        }
        if let Some(s) = shape.spacing {
            self.emit(format_args!("{body}SPACING {s}"))?;
        } else if let Some(w) = shape.design_rule_width {
            self.emit(format_args!("{body}DESIGNRULEWIDTH  {w}"))?;
        }
        Ok(())
    }
    fn pin_shape_points(&mut self, pts: &[DefPoint], nesting: ShapeNesting) -> DefResult<()> {
        let body = nesting.body();
        let s = fmt_point_list(&real_points(pts), body, body, " ");
        self.emit(format_args!("{s}"))
    }
    fn pin_via_checks(&self, via: &str, mask: Option<i32>) -> DefResult<()> {
        self.min_version(&V5P7)?;
        if mask.is_some() {
            self.min_version(&V5P8)?;
        }
        self.nonempty(via)
    }
    fn pin_via_body(
        &mut self,
        nesting: ShapeNesting,
        via: &str,
        at: DefPoint,
        mask: Option<i32>,
    ) -> DefResult<()> {
        let head = nesting.head();
        match mask {
            Some(m) => self.emit(format_args!("{head}VIA {via} MASK {m} {at} ")),
            None => self.emit(format_args!("{head}VIA {via} {at} ")),
        }
    }

    /// Open `PINPROPERTIES` with `count` entries
    pub fn start_pin_properties(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::PinProperty)?;
        self.check_open(DefSection::PinProperty)?;
        self.open_section(
            count,
            DefState::PinPropStart,
            format_args!("PINPROPERTIES {count} ;\n"),
        )
    }
    /// Begin the properties of instance-pin `inst` `pin`.
    /// Use `PIN` as `inst` for top-level pins.
    pub fn pin_property(&mut self, inst: &str, pin: &str) -> DefResult<()> {
        self.call(DefSection::PinProperty)?;
        self.expect_state(&[DefState::PinPropStart, DefState::PinProp])?;
        self.nonempty(inst)?;
        self.nonempty(pin)?;
        self.take_item()?;
        if self.session.state == DefState::PinProp {
            self.emit(format_args!(";\n"))?;
        }
        self.emit(format_args!("   - {inst} {pin} "))?;
        self.session.state = DefState::PinProp;
        Ok(())
    }
    /// Close `PINPROPERTIES`
    pub fn end_pin_properties(&mut self) -> DefResult<()> {
        self.call(DefSection::PinProperty)?;
        self.check_close(&[DefState::PinPropStart, DefState::PinProp])?;
        let term = self.item_terminator(DefState::PinPropStart, ";\n");
        self.close_section(DefState::PinPropEnd, format_args!("{term}END PINPROPERTIES\n\n"))
    }
}
