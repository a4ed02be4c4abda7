//!
//! # Special Nets
//!
//! `SPECIALNETS` items carry connections, options, routed-wire paths,
//! standalone polygons, rects and vias, and `SHIELD` brackets.
//!
//! Path and shield brackets each own the writer's point cursor:
//! the first point after a path or shield start, including a `NEW` continuation,
//! is written literally, and later points in the same bracket compress against it.
//!

// Local imports
use super::data::*;
use super::error::*;
use super::fmt::{fmt_g, fmt_point_list};
use super::state::DefState;
use super::write::DefWriter;

/// Line break written on every fourth item of a special-net bracket
const BRK: &str = "\n     ";

impl<'wr> DefWriter<'wr> {
    /// Open `SPECIALNETS` with `count` nets
    pub fn start_special_nets(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::SpecialNet)?;
        self.check_open(DefSection::SpecialNet)?;
        self.open_section(
            count,
            DefState::SnetStart,
            format_args!("SPECIALNETS {count} ;\n"),
        )
    }
    /// Begin special net `name`
    pub fn special_net(&mut self, name: &str) -> DefResult<()> {
        self.call(DefSection::SpecialNet)?;
        self.expect_state(&[DefState::SnetStart, DefState::SnetEndNet])?;
        self.nonempty(name)?;
        self.take_item()?;
        self.emit(format_args!("   - {name}"))?;
        self.session.wrap = 0;
        self.session.state = DefState::Snet;
        Ok(())
    }
    /// Connection to instance-pin `inst` `pin`. Only before any options.
    pub fn special_net_connection(
        &mut self,
        inst: &str,
        pin: &str,
        synthesized: bool,
    ) -> DefResult<()> {
        self.call(DefSection::SpecialNet)?;
        self.expect_state(&[DefState::Snet])?;
        self.nonempty(inst)?;
        self.nonempty(pin)?;
        self.wrap(BRK)?;
        self.emit(format_args!(" ( {inst} {pin} "))?;
        if synthesized {
            self.emit(format_args!("+ SYNTHESIZED "))?;
        }
        self.emit(format_args!(") "))
    }
    /// `+ FIXEDBUMP`
    pub fn special_net_fixedbump(&mut self) -> DefResult<()> {
        self.snet_option(true, format_args!("\n      + FIXEDBUMP"))
    }
    /// `+ VOLTAGE`, given in volts and written in whole millivolts.
    /// Values outside the `i32` millivolt range are [DefStatus::BadData].
    pub fn special_net_voltage(&mut self, volts: f64) -> DefResult<()> {
        let mv = (volts * 1000.0).trunc();
        let valid = mv.is_finite() && mv >= f64::from(i32::MIN) && mv <= f64::from(i32::MAX);
        let mv = if valid { mv as i32 } else { 0 };
        self.snet_option(valid, format_args!("\n      + VOLTAGE {mv}"))
    }
    /// `+ SPACING` on `layer`, with optional width range
    pub fn special_net_spacing(
        &mut self,
        layer: &str,
        spacing: i32,
        range: Option<(f64, f64)>,
    ) -> DefResult<()> {
        let valid = !layer.is_empty() && range.map_or(true, |(lo, hi)| lo <= hi);
        match range {
            Some((lo, hi)) => self.snet_option(
                valid,
                format_args!(
                    "\n      + SPACING {layer} {spacing} RANGE {} {}",
                    fmt_g(lo),
                    fmt_g(hi)
                ),
            ),
            None => self.snet_option(valid, format_args!("\n      + SPACING {layer} {spacing}")),
        }
    }
    /// `+ WIDTH` on `layer`
    pub fn special_net_width(&mut self, layer: &str, width: i32) -> DefResult<()> {
        self.snet_option(!layer.is_empty(), format_args!("\n      + WIDTH {layer} {width}"))
    }
    /// `+ SOURCE`
    pub fn special_net_source(&mut self, source: NetSource) -> DefResult<()> {
        self.snet_option(true, format_args!("\n      + SOURCE {source}"))
    }
    /// `+ ORIGINAL`
    pub fn special_net_original(&mut self, net: &str) -> DefResult<()> {
        self.snet_option(!net.is_empty(), format_args!("\n      + ORIGINAL {net}"))
    }
    /// `+ PATTERN`
    pub fn special_net_pattern(&mut self, pattern: &str) -> DefResult<()> {
        self.snet_option(!pattern.is_empty(), format_args!("\n      + PATTERN {pattern}"))
    }
    /// `+ USE`
    pub fn special_net_use(&mut self, usage: NetUse) -> DefResult<()> {
        self.snet_option(true, format_args!("\n      + USE {usage}"))
    }
    /// `+ WEIGHT`
    pub fn special_net_weight(&mut self, weight: f64) -> DefResult<()> {
        self.snet_option(true, format_args!("\n      + WEIGHT {}", fmt_g(weight)))
    }
    /// `+ ESTCAP`
    pub fn special_net_est_cap(&mut self, cap: f64) -> DefResult<()> {
        self.snet_option(true, format_args!("\n      + ESTCAP {}", fmt_g(cap)))
    }
    /// Shared body of the single-line options: checks, then writes `args`,
    /// and moves from the connection list into the options.
    fn snet_option(&mut self, valid: bool, args: std::fmt::Arguments) -> DefResult<()> {
        self.call(DefSection::SpecialNet)?;
        self.expect_state(&[DefState::Snet, DefState::SnetOptions])?;
        self.check_data(valid)?;
        self.emit(args)?;
        self.session.state = DefState::SnetOptions;
        Ok(())
    }

    /// Open a routed-wire path of type `tp`.
    /// [PathType::New] continues an open path; [PathType::Shield] must be followed by
    /// [DefWriter::special_net_shield_net_name].
    pub fn special_net_path_start(&mut self, tp: PathType) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::Snet, DefState::SnetOptions, DefState::SnetPath])?;
        self.check_data(tp != PathType::Noshield)?;
        match tp {
            PathType::New => {
                self.check_data(self.session.state == DefState::SnetPath)?;
                self.emit(format_args!(" NEW"))?;
            }
            tp => self.emit(format_args!("\n      + {tp}"))?,
        }
        let s = &mut self.session;
        s.shield_path = tp == PathType::Shield;
        s.state = DefState::SnetPathStart;
        s.wrap = 0;
        s.cursor.reset();
        Ok(())
    }
    /// Net shielded by the open `SHIELD` path
    pub fn special_net_shield_net_name(&mut self, net: &str) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::SnetPathStart])?;
        self.check(self.session.shield_path, DefStatus::BadOrder)?;
        self.nonempty(net)?;
        self.wrap(BRK)?;
        self.emit(format_args!(" {net}"))
    }
    /// Routing layer of the open path. First element of every path.
    pub fn special_net_path_layer(&mut self, layer: &str) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::SnetPathStart])?;
        self.nonempty(layer)?;
        self.wrap(BRK)?;
        self.emit(format_args!(" {layer}"))?;
        self.session.state = DefState::SnetPath;
        Ok(())
    }
    /// Wire width of the open path
    pub fn special_net_path_width(&mut self, width: i32) -> DefResult<()> {
        self.snet_path_item(format_args!(" {width}"))
    }
    /// `+ STYLE` of the open path
    pub fn special_net_path_style(&mut self, style: i32) -> DefResult<()> {
        self.snet_path_item(format_args!("\n      + STYLE {style}"))?;
        self.session.wrap = 0;
        Ok(())
    }
    /// `+ SHAPE` of the open path
    pub fn special_net_path_shape(&mut self, shape: WireShape) -> DefResult<()> {
        self.snet_path_item(format_args!("\n      + SHAPE {shape}"))?;
        self.session.wrap = 0;
        Ok(())
    }
    /// `MASK` of the next wire or via. Requires 5.8.
    pub fn special_net_path_mask(&mut self, mask: i32) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::SnetPath])?;
        self.min_version(&V5P8)?;
        self.snet_path_item(format_args!(" MASK {mask}"))
    }
    /// Points of the open path
    pub fn special_net_path_points(&mut self, pts: &[DefPoint]) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::SnetPath])?;
        self.wire_points(pts, BRK)
    }
    /// Via placed at the current point of the open path
    pub fn special_net_path_via(&mut self, via: &str) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::SnetPath])?;
        self.nonempty(via)?;
        self.snet_path_item(format_args!(" {via}"))
    }
    /// Via array parameters of the preceding via
    pub fn special_net_path_via_data(&mut self, repeat: DefRepeat) -> DefResult<()> {
        let DefRepeat {
            num_x,
            num_y,
            step_x,
            step_y,
        } = repeat;
        self.snet_path_item(format_args!(
            " DO {num_x} BY {num_y} STEP {step_x} {step_y}"
        ))
    }
    /// Points of the open path, each with an optional wire extension
    pub fn special_net_path_points_with_wire_ext(
        &mut self,
        pts: &[(DefPoint, Option<i32>)],
    ) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::SnetPath])?;
        for (p, ext) in pts {
            self.wrap("\n        ")?;
            self.emit(format_args!(" ( {} {} ", p.x, p.y))?;
            if let Some(e) = ext {
                self.emit(format_args!("{e} "))?;
            }
            self.emit(format_args!(")"))?;
        }
        Ok(())
    }
    /// Close the open path
    pub fn special_net_path_end(&mut self) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::SnetPath])?;
        self.session.state = DefState::SnetOptions;
        Ok(())
    }
    fn snet_path_item(&mut self, args: std::fmt::Arguments) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::SnetPath])?;
        self.wrap(BRK)?;
        self.emit(args)
    }
    /// Write `pts` through the point cursor, each preceded by a line-wrap check
    pub(crate) fn wire_points(&mut self, pts: &[DefPoint], brk: &str) -> DefResult<()> {
        for p in pts {
            self.wrap(brk)?;
            let (x, y) = p.xy();
            let s = self.session.cursor.point(x, y);
            self.emit(format_args!(" {s}"))?;
        }
        Ok(())
    }

    /// `+ POLYGON` on `layer`. Requires 5.6.
    pub fn special_net_polygon(&mut self, layer: &str, pts: &[DefPoint]) -> DefResult<()> {
        self.snet_shape_checks(&V5P6)?;
        self.nonempty(layer)?;
        self.check_data(!pts.is_empty())?;
        let s = fmt_point_list(&real_points(pts), "", "\n                ", " ");
        self.emit(format_args!("\n      + POLYGON {layer} {s}"))?;
        self.snet_shape_written();
        Ok(())
    }
    /// `+ RECT` on `layer`. Requires 5.6.
    pub fn special_net_rect(&mut self, layer: &str, rect: DefRect) -> DefResult<()> {
        self.snet_shape_checks(&V5P6)?;
        self.nonempty(layer)?;
        self.emit(format_args!("\n      + RECT {layer} {rect} "))?;
        self.snet_shape_written();
        Ok(())
    }
    /// `+ VIA`, to be followed by [DefWriter::special_net_via_points]. Requires 5.8.
    pub fn special_net_via(&mut self, via: &str) -> DefResult<()> {
        self.snet_shape_checks(&V5P8)?;
        self.nonempty(via)?;
        self.emit(format_args!("\n      + VIA {via} "))?;
        self.snet_shape_written();
        Ok(())
    }
    /// `+ VIA` with orientation. Requires 5.8.
    pub fn special_net_via_with_orient(&mut self, via: &str, orient: Orientation) -> DefResult<()> {
        self.snet_shape_checks(&V5P8)?;
        self.nonempty(via)?;
        self.emit(format_args!("\n      + VIA {via} {orient}"))?;
        self.snet_shape_written();
        Ok(())
    }
    /// Locations of the preceding `+ VIA`. Requires 5.8.
    pub fn special_net_via_points(&mut self, pts: &[DefPoint]) -> DefResult<()> {
        self.snet_shape_checks(&V5P8)?;
        self.check_data(!pts.is_empty())?;
        let s = fmt_point_list(&real_points(pts), "", "\n             ", " ");
        self.emit(format_args!("{s}"))?;
        self.snet_shape_written();
        Ok(())
    }
    /// Standalone shapes are legal among the options, or inside an open path
    fn snet_shape_checks(&mut self, min: &DefDecimal) -> DefResult<()> {
        self.call(DefSection::SpecialNet)?;
        self.expect_state(&[DefState::Snet, DefState::SnetOptions, DefState::SnetPath])?;
        self.min_version(min)
    }
    fn snet_shape_written(&mut self) {
        if self.session.state == DefState::Snet {
            self.session.state = DefState::SnetOptions;
        }
    }

    /// Open a `+ SHIELD` bracket, shielding net `net`
    pub fn special_net_shield_start(&mut self, net: &str) -> DefResult<()> {
        self.call(DefSection::Shield)?;
        self.expect_state(&[DefState::Snet, DefState::SnetOptions, DefState::SnetShield])?;
        self.nonempty(net)?;
        self.emit(format_args!("\n      + SHIELD {net}"))?;
        self.shield_opened();
        Ok(())
    }
    /// Continue the open shield with a `NEW` wire
    pub fn special_net_shield_new(&mut self) -> DefResult<()> {
        self.call(DefSection::Shield)?;
        self.expect_state(&[DefState::SnetShield])?;
        self.emit(format_args!(" NEW"))?;
        self.shield_opened();
        Ok(())
    }
    fn shield_opened(&mut self) {
        let s = &mut self.session;
        s.state = DefState::SnetShield;
        s.wrap = 0;
        s.cursor.reset();
    }
    /// Wire width of the open shield
    pub fn special_net_shield_width(&mut self, width: i32) -> DefResult<()> {
        self.shield_item(format_args!(" {width}"))
    }
    /// Routing layer of the open shield
    pub fn special_net_shield_layer(&mut self, layer: &str) -> DefResult<()> {
        self.call(DefSection::Shield)?;
        self.expect_state(&[DefState::SnetShield])?;
        self.nonempty(layer)?;
        self.shield_item(format_args!(" {layer}"))
    }
    /// `+ SHAPE` of the open shield. Ring and OPC-fill shapes are not shield shapes.
    pub fn special_net_shield_shape(&mut self, shape: WireShape) -> DefResult<()> {
        self.call(DefSection::Shield)?;
        self.expect_state(&[DefState::SnetShield])?;
        self.check_data(shape.is_shield_shape())?;
        self.shield_item(format_args!("\n      + SHAPE {shape}"))?;
        self.session.wrap = 0;
        Ok(())
    }
    /// Points of the open shield
    pub fn special_net_shield_points(&mut self, pts: &[DefPoint]) -> DefResult<()> {
        self.call(DefSection::Shield)?;
        self.expect_state(&[DefState::SnetShield])?;
        self.wire_points(pts, BRK)
    }
    /// Via placed at the current point of the open shield
    pub fn special_net_shield_via(&mut self, via: &str) -> DefResult<()> {
        self.call(DefSection::Shield)?;
        self.expect_state(&[DefState::SnetShield])?;
        self.nonempty(via)?;
        self.shield_item(format_args!(" {via}"))
    }
    /// Via array parameters of the preceding shield via
    pub fn special_net_shield_via_data(&mut self, repeat: DefRepeat) -> DefResult<()> {
        let DefRepeat {
            num_x,
            num_y,
            step_x,
            step_y,
        } = repeat;
        self.shield_item(format_args!(
            " DO {num_x} BY {num_y} STEP {step_x} {step_y}"
        ))
    }
    /// Close the open shield
    pub fn special_net_shield_end(&mut self) -> DefResult<()> {
        self.call(DefSection::Shield)?;
        self.expect_state(&[DefState::SnetShield])?;
        self.session.state = DefState::SnetOptions;
        Ok(())
    }
    fn shield_item(&mut self, args: std::fmt::Arguments) -> DefResult<()> {
        self.call(DefSection::Shield)?;
        self.expect_state(&[DefState::SnetShield])?;
        self.wrap(BRK)?;
        self.emit(args)
    }

    /// Terminate the current special net
    pub fn special_net_end_one(&mut self) -> DefResult<()> {
        self.call(DefSection::SpecialNet)?;
        self.expect_state(&[DefState::Snet, DefState::SnetOptions])?;
        self.emit(format_args!(" ;\n"))?;
        self.session.state = DefState::SnetEndNet;
        Ok(())
    }
    /// Close `SPECIALNETS`
    pub fn end_special_nets(&mut self) -> DefResult<()> {
        self.call(DefSection::SpecialNet)?;
        self.check_close(&[
            DefState::SnetStart,
            DefState::Snet,
            DefState::SnetOptions,
            DefState::SnetEndNet,
        ])?;
        self.close_section(DefState::SnetEnd, format_args!("END SPECIALNETS\n\n"))
    }
}
