//!
//! # Slots, Fills, Non-Default Rules, Styles & Extensions
//!

// Crates.io Imports
use chrono::Local;

// Local imports
use super::data::*;
use super::error::*;
use super::fmt::fmt_point_list;
use super::state::DefState;
use super::write::DefWriter;

/// Continuation indent of slot, fill and fill-via point lists
const SHAPE_WRAP: &str = "\n             ";

impl<'wr> DefWriter<'wr> {
    /// Open `SLOTS` with `count` layers. Requires 5.4.
    pub fn start_slots(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::Slot)?;
        self.check_open(DefSection::Slot)?;
        self.min_version(&V5P4)?;
        self.open_section(count, DefState::SlotStart, format_args!("SLOTS {count} ;\n"))
    }
    /// Begin the slots of `layer`
    pub fn slot_layer(&mut self, layer: &str) -> DefResult<()> {
        self.call(DefSection::Slot)?;
        self.expect_state(&[DefState::SlotStart, DefState::SlotRect])?;
        self.nonempty(layer)?;
        self.take_item()?;
        if self.session.state == DefState::SlotRect {
            self.emit(format_args!(" ;\n"))?;
        }
        self.emit(format_args!("   - LAYER {layer} \n"))?;
        self.session.state = DefState::SlotLayer;
        Ok(())
    }
    /// Slot `RECT`
    pub fn slot_rect(&mut self, rect: DefRect) -> DefResult<()> {
        self.call(DefSection::Slot)?;
        self.expect_state(&[DefState::SlotLayer, DefState::SlotRect])?;
        self.next_shape_line(DefState::SlotRect)?;
        self.emit(format_args!("     RECT {rect}"))?;
        self.session.state = DefState::SlotRect;
        Ok(())
    }
    /// Slot `POLYGON`. Requires 5.6.
    pub fn slot_polygon(&mut self, pts: &[DefPoint]) -> DefResult<()> {
        self.call(DefSection::Slot)?;
        self.expect_state(&[DefState::SlotLayer, DefState::SlotRect])?;
        self.min_version(&V5P6)?;
        self.check_data(pts.len() >= 3)?;
        self.next_shape_line(DefState::SlotRect)?;
        let s = fmt_point_list(&real_points(pts), "", SHAPE_WRAP, " ");
        self.emit(format_args!("     POLYGON {s}"))?;
        self.session.state = DefState::SlotRect;
        Ok(())
    }
    /// Close `SLOTS`. The last layer, if any, must have a shape.
    pub fn end_slots(&mut self) -> DefResult<()> {
        self.call(DefSection::Slot)?;
        self.check_close(&[DefState::SlotStart, DefState::SlotRect])?;
        let term = self.item_terminator(DefState::SlotStart, " ;\n");
        self.close_section(DefState::SlotEnd, format_args!("{term}END SLOTS\n\n"))
    }

    /// Open `FILLS` with `count` items. Requires 5.4.
    pub fn start_fills(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::Fill)?;
        self.check_open(DefSection::Fill)?;
        self.min_version(&V5P4)?;
        self.open_section(count, DefState::FillStart, format_args!("FILLS {count} ;\n"))
    }
    /// Begin the fills of `layer`
    pub fn fill_layer(&mut self, layer: &str) -> DefResult<()> {
        self.call(DefSection::Fill)?;
        self.expect_state(&[DefState::FillStart, DefState::FillRect])?;
        self.nonempty(layer)?;
        self.take_item()?;
        if self.session.state == DefState::FillRect {
            self.emit(format_args!(" ;\n"))?;
        }
        self.emit(format_args!("   - LAYER {layer} \n"))?;
        self.session.fill_via = false;
        self.session.state = DefState::FillLayer;
        Ok(())
    }
    /// `+ MASK` of the current fill layer. Requires 5.8.
    pub fn fill_layer_mask(&mut self, mask: i32) -> DefResult<()> {
        self.call(DefSection::Fill)?;
        self.expect_state(&[DefState::FillLayer])?;
        self.min_version(&V5P8)?;
        self.emit(format_args!("     + MASK {mask}"))?;
        self.session.state = DefState::FillLayerMask;
        Ok(())
    }
    /// `+ OPC` of the current fill layer. Requires 5.7.
    pub fn fill_layer_opc(&mut self) -> DefResult<()> {
        self.call(DefSection::Fill)?;
        self.expect_state(&[DefState::FillLayer, DefState::FillLayerMask])?;
        self.min_version(&V5P7)?;
        self.emit(format_args!("     + OPC"))?;
        self.session.state = DefState::FillLayerOpc;
        Ok(())
    }
    /// Fill `RECT` of the current layer
    pub fn fill_rect(&mut self, rect: DefRect) -> DefResult<()> {
        self.call(DefSection::Fill)?;
        self.fill_shape_checks()?;
        self.next_shape_line(DefState::FillRect)?;
        self.emit(format_args!("     RECT {rect}"))?;
        self.session.state = DefState::FillRect;
        Ok(())
    }
    /// Fill `POLYGON` of the current layer. Requires 5.6.
    pub fn fill_polygon(&mut self, pts: &[DefPoint]) -> DefResult<()> {
        self.call(DefSection::Fill)?;
        self.fill_shape_checks()?;
        self.min_version(&V5P6)?;
        self.check_data(pts.len() >= 3)?;
        self.next_shape_line(DefState::FillRect)?;
        let s = fmt_point_list(&real_points(pts), "", SHAPE_WRAP, " ");
        self.emit(format_args!("     POLYGON {s}"))?;
        self.session.state = DefState::FillRect;
        Ok(())
    }
    fn fill_shape_checks(&self) -> DefResult<()> {
        let ok = match self.session.state {
            DefState::FillLayer | DefState::FillLayerMask | DefState::FillLayerOpc => true,
            // Continuing shapes of a layer, but not of a via
            DefState::FillRect => !self.session.fill_via,
            _ => false,
        };
        self.check(ok, DefStatus::BadOrder)
    }
    /// Begin the fills of via `via`. Requires 5.7.
    pub fn fill_via(&mut self, via: &str) -> DefResult<()> {
        self.call(DefSection::Fill)?;
        self.expect_state(&[DefState::FillStart, DefState::FillRect])?;
        self.min_version(&V5P7)?;
        self.nonempty(via)?;
        self.take_item()?;
        if self.session.state == DefState::FillRect {
            self.emit(format_args!(" ;\n"))?;
        }
        self.emit(format_args!("   - VIA {via} \n"))?;
        self.session.fill_via = true;
        self.session.state = DefState::FillVia;
        Ok(())
    }
    /// `+ MASK` of the current fill via. Requires 5.8.
    pub fn fill_via_mask(&mut self, mask: i32) -> DefResult<()> {
        self.call(DefSection::Fill)?;
        self.expect_state(&[DefState::FillVia])?;
        self.min_version(&V5P8)?;
        self.emit(format_args!("     + MASK {mask}"))?;
        self.session.state = DefState::FillViaMask;
        Ok(())
    }
    /// `+ OPC` of the current fill via. Requires 5.7.
    pub fn fill_via_opc(&mut self) -> DefResult<()> {
        self.call(DefSection::Fill)?;
        self.expect_state(&[DefState::FillVia, DefState::FillViaMask])?;
        self.min_version(&V5P7)?;
        self.emit(format_args!("     + OPC"))?;
        self.session.state = DefState::FillViaOpc;
        Ok(())
    }
    /// Placement points of the current fill via
    pub fn fill_points(&mut self, pts: &[DefPoint]) -> DefResult<()> {
        self.call(DefSection::Fill)?;
        let ok = match self.session.state {
            DefState::FillVia | DefState::FillViaMask | DefState::FillViaOpc => true,
            DefState::FillRect => self.session.fill_via,
            _ => false,
        };
        self.check(ok, DefStatus::BadOrder)?;
        self.check_data(!pts.is_empty())?;
        self.next_shape_line(DefState::FillRect)?;
        let s = fmt_point_list(&real_points(pts), "", SHAPE_WRAP, " ");
        self.emit(format_args!("     {s}"))?;
        self.session.state = DefState::FillRect;
        Ok(())
    }
    /// Close `FILLS`
    pub fn end_fills(&mut self) -> DefResult<()> {
        self.call(DefSection::Fill)?;
        self.check_close(&[
            DefState::FillStart,
            DefState::FillRect,
            DefState::FillLayerOpc,
            DefState::FillViaOpc,
        ])?;
        let term = self.item_terminator(DefState::FillStart, " ;\n");
        self.close_section(DefState::FillEnd, format_args!("{term}END FILLS\n\n"))
    }
    /// Break the line after a previous shape
    fn next_shape_line(&mut self, shape_state: DefState) -> DefResult<()> {
        if self.session.state == shape_state {
            self.emit(format_args!("\n"))?;
        }
        Ok(())
    }

    /// Open `NONDEFAULTRULES` with `count` rules. Requires 5.6.
    pub fn start_nondefault_rules(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::NonDefaultRule)?;
        self.check_open(DefSection::NonDefaultRule)?;
        self.min_version(&V5P6)?;
        self.open_section(
            count,
            DefState::NdrStart,
            format_args!("NONDEFAULTRULES {count} ;\n"),
        )
    }
    /// Begin rule `name`
    pub fn nondefault_rule(&mut self, name: &str, hard_spacing: bool) -> DefResult<()> {
        self.call(DefSection::NonDefaultRule)?;
        self.expect_state(&[DefState::NdrStart, DefState::Ndr])?;
        self.nonempty(name)?;
        self.take_item()?;
        if self.session.state == DefState::Ndr {
            self.emit(format_args!(";\n"))?;
        }
        self.emit(format_args!("   - {name}"))?;
        if hard_spacing {
            self.emit(format_args!("\n      + HARDSPACING"))?;
        }
        self.session.state = DefState::Ndr;
        Ok(())
    }
    /// `+ LAYER` widths & spacings of the current rule
    pub fn nondefault_rule_layer(&mut self, layer: &DefNdrLayer) -> DefResult<()> {
        self.call(DefSection::NonDefaultRule)?;
        self.expect_state(&[DefState::Ndr])?;
        self.nonempty(&layer.layer)?;
        self.emit(format_args!(
            "\n      + LAYER {}  WIDTH {} ",
            layer.layer, layer.width
        ))?;
        if let Some(w) = layer.diag_width {
            self.emit(format_args!(" DIAGWIDTH {w} "))?;
        }
        if let Some(s) = layer.spacing {
            self.emit(format_args!(" SPACING {s} "))?;
        }
        if let Some(e) = layer.wire_ext {
            self.emit(format_args!(" WIREEXT {e} "))?;
        }
        Ok(())
    }
    /// `+ VIA` of the current rule
    pub fn nondefault_rule_via(&mut self, via: &str) -> DefResult<()> {
        self.ndr_item(via, format_args!("\n      + VIA {via} "))
    }
    /// `+ VIARULE` of the current rule
    pub fn nondefault_rule_via_rule(&mut self, rule: &str) -> DefResult<()> {
        self.ndr_item(rule, format_args!("\n      + VIARULE {rule} "))
    }
    /// `+ MINCUTS` of the current rule
    pub fn nondefault_rule_min_cuts(&mut self, cut_layer: &str, num_cuts: i32) -> DefResult<()> {
        self.ndr_item(cut_layer, format_args!("\n      + MINCUTS {cut_layer} {num_cuts} "))
    }
    fn ndr_item(&mut self, name: &str, args: std::fmt::Arguments) -> DefResult<()> {
        self.call(DefSection::NonDefaultRule)?;
        self.expect_state(&[DefState::Ndr])?;
        self.nonempty(name)?;
        self.emit(args)
    }
    /// Close `NONDEFAULTRULES`
    pub fn end_nondefault_rules(&mut self) -> DefResult<()> {
        self.call(DefSection::NonDefaultRule)?;
        self.check_close(&[DefState::NdrStart, DefState::Ndr])?;
        let term = self.item_terminator(DefState::NdrStart, ";\n");
        self.close_section(
            DefState::NdrEnd,
            format_args!("{term}END NONDEFAULTRULES\n\n"),
        )
    }

    /// Open `STYLES` with `count` styles. Requires 5.6.
    pub fn start_styles(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::Styles)?;
        self.check_open(DefSection::Styles)?;
        self.min_version(&V5P6)?;
        self.open_section(count, DefState::StylesStart, format_args!("STYLES {count} ;\n"))
    }
    /// Style `num`, a wire cross-section outline
    pub fn style(&mut self, num: i32, pts: &[DefPoint]) -> DefResult<()> {
        self.call(DefSection::Styles)?;
        self.expect_state(&[DefState::StylesStart, DefState::Styles])?;
        self.check_data(num >= 0)?;
        self.take_item()?;
        let s = fmt_point_list(&real_points(pts), "", "\n       ", " ");
        self.emit(format_args!("   - STYLE {num} {s};\n"))?;
        self.session.state = DefState::Styles;
        Ok(())
    }
    /// Close `STYLES`
    pub fn end_styles(&mut self) -> DefResult<()> {
        self.call(DefSection::Styles)?;
        self.check_close(&[DefState::StylesStart, DefState::Styles])?;
        self.close_section(DefState::StylesEnd, format_args!("END STYLES\n\n"))
    }

    /// Open a `BEGINEXT` extension block tagged `tag`. Repeatable.
    pub fn begin_ext(&mut self, tag: &str) -> DefResult<()> {
        self.call(DefSection::BeginExt)?;
        self.expect_design_level()?;
        self.nonempty(tag)?;
        self.close_row()?;
        self.emit(format_args!("BEGINEXT \"{tag}\"\n"))?;
        self.session.state = DefState::BeginExt;
        Ok(())
    }
    /// `CREATOR` of the open extension block
    pub fn begin_ext_creator(&mut self, creator: &str) -> DefResult<()> {
        self.call(DefSection::BeginExt)?;
        self.expect_state(&[DefState::BeginExt])?;
        self.nonempty(creator)?;
        self.emit(format_args!("   CREATOR \"{creator}\"\n"))
    }
    /// `DATE` of the open extension block: the current local time
    pub fn begin_ext_date(&mut self) -> DefResult<()> {
        self.call(DefSection::BeginExt)?;
        self.expect_state(&[DefState::BeginExt])?;
        let now = Local::now().format("%a %b %e %H:%M:%S %Y");
        self.emit(format_args!("   DATE \"{now}\""))
    }
    /// `REVISION` of the open extension block
    pub fn begin_ext_revision(&mut self, major: i32, minor: i32) -> DefResult<()> {
        self.call(DefSection::BeginExt)?;
        self.expect_state(&[DefState::BeginExt])?;
        self.emit(format_args!("\n   REVISION {major}.{minor}"))
    }
    /// Free-form `- title text` line of the open extension block
    pub fn begin_ext_syntax(&mut self, title: &str, text: &str) -> DefResult<()> {
        self.call(DefSection::BeginExt)?;
        self.expect_state(&[DefState::BeginExt])?;
        self.nonempty(title)?;
        self.emit(format_args!("\n   - {title} {text}"))
    }
    /// Close the open extension block
    pub fn end_ext(&mut self) -> DefResult<()> {
        self.call(DefSection::BeginExt)?;
        self.expect_state(&[DefState::BeginExt])?;
        self.emit(format_args!(";\nENDEXT\n\n"))?;
        self.session.state = DefState::BeginExtEnd;
        Ok(())
    }
}
