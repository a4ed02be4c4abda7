//!
//! # Nets
//!
//! Ordinary `NETS` items: connections, `MUSTJOIN` items, options, virtual pins,
//! `NOSHIELD` and `SUBNET` brackets, and routed-wire paths.
//! A path opened inside a subnet belongs to that subnet, and closes back into it.
//!

// Local imports
use super::data::*;
use super::error::*;
use super::fmt::fmt_g;
use super::state::DefState;
use super::write::DefWriter;

impl<'wr> DefWriter<'wr> {
    /// Open `NETS` with `count` nets
    pub fn start_nets(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::Net)?;
        self.check_open(DefSection::Net)?;
        self.open_section(count, DefState::NetStart, format_args!("NETS {count} ;\n"))
    }
    /// Begin net `name`
    pub fn net(&mut self, name: &str) -> DefResult<()> {
        self.call(DefSection::Net)?;
        self.expect_state(&[DefState::NetStart, DefState::NetEndNet])?;
        self.nonempty(name)?;
        self.take_item()?;
        self.emit(format_args!("   - {name}"))?;
        let s = &mut self.session;
        s.wrap = 0;
        s.in_subnet = false;
        s.state = DefState::Net;
        Ok(())
    }
    /// Connection to instance-pin `inst` `pin`. Only before any options.
    pub fn net_connection(&mut self, inst: &str, pin: &str, synthesized: bool) -> DefResult<()> {
        self.call(DefSection::Net)?;
        self.expect_state(&[DefState::Net])?;
        self.nonempty(inst)?;
        self.nonempty(pin)?;
        self.wrap("\n")?;
        if synthesized {
            self.emit(format_args!(" ( {inst} {pin} + SYNTHESIZED ) "))
        } else {
            self.emit(format_args!(" ( {inst} {pin} ) "))
        }
    }
    /// A `MUSTJOIN` item, joining to instance-pin `inst` `pin`.
    /// Counts as one of the section's declared nets.
    pub fn net_mustjoin(&mut self, inst: &str, pin: &str) -> DefResult<()> {
        self.call(DefSection::Net)?;
        self.expect_state(&[DefState::NetEndNet])?;
        self.nonempty(inst)?;
        self.nonempty(pin)?;
        self.take_item()?;
        self.session.wrap = 0;
        self.wrap("\n     ")?;
        self.emit(format_args!(" - MUSTJOIN ( {inst} {pin} )"))?;
        self.session.state = DefState::Net;
        Ok(())
    }

    /// `+ FIXEDBUMP`
    pub fn net_fixedbump(&mut self) -> DefResult<()> {
        self.net_option(true, format_args!("\n      + FIXEDBUMP"))
    }
    /// `+ FREQUENCY`
    pub fn net_frequency(&mut self, frequency: f64) -> DefResult<()> {
        self.net_option(true, format_args!("\n      + FREQUENCY {}", fmt_g(frequency)))
    }
    /// `+ SOURCE`
    pub fn net_source(&mut self, source: NetSource) -> DefResult<()> {
        self.net_option(true, format_args!("\n      + SOURCE {source}"))
    }
    /// `+ XTALK` class
    pub fn net_xtalk(&mut self, class: i32) -> DefResult<()> {
        self.net_option(true, format_args!("\n      + XTALK {class}"))
    }
    /// `+ ORIGINAL`
    pub fn net_original(&mut self, net: &str) -> DefResult<()> {
        self.net_option(!net.is_empty(), format_args!("\n      + ORIGINAL {net}"))
    }
    /// `+ PATTERN`
    pub fn net_pattern(&mut self, pattern: &str) -> DefResult<()> {
        self.net_option(!pattern.is_empty(), format_args!("\n      + PATTERN {pattern}"))
    }
    /// `+ USE`
    pub fn net_use(&mut self, usage: NetUse) -> DefResult<()> {
        self.net_option(true, format_args!("\n      + USE {usage}"))
    }
    /// `+ WEIGHT`
    pub fn net_weight(&mut self, weight: f64) -> DefResult<()> {
        self.net_option(true, format_args!("\n      + WEIGHT {}", fmt_g(weight)))
    }
    /// `+ ESTCAP`
    pub fn net_est_cap(&mut self, cap: f64) -> DefResult<()> {
        self.net_option(true, format_args!("\n      + ESTCAP {}", fmt_g(cap)))
    }
    /// `+ SHIELDNET`
    pub fn net_shield_net(&mut self, net: &str) -> DefResult<()> {
        self.net_option(!net.is_empty(), format_args!("\n      + SHIELDNET {net}"))
    }
    fn net_option(&mut self, valid: bool, args: std::fmt::Arguments) -> DefResult<()> {
        self.call(DefSection::Net)?;
        self.expect_state(&[DefState::Net, DefState::NetOptions])?;
        self.check_data(valid)?;
        self.emit(args)?;
        self.session.state = DefState::NetOptions;
        Ok(())
    }
    /// `+ VPIN` virtual pin
    pub fn net_vpin(&mut self, vpin: &DefVpin) -> DefResult<()> {
        self.call(DefSection::Net)?;
        self.expect_state(&[DefState::Net, DefState::NetOptions])?;
        self.nonempty(&vpin.name)?;
        if let Some(ref l) = vpin.layer {
            self.nonempty(l)?;
        }
        if let Some(ref p) = vpin.placement {
            self.check_data(p.status != PlacementStatus::Unplaced)?;
        }
        self.emit(format_args!("\n      + VPIN {}", vpin.name))?;
        if let Some(ref l) = vpin.layer {
            self.emit(format_args!(" LAYER {l}"))?;
        }
        self.emit(format_args!(" {}\n", vpin.rect))?;
        if let Some(ref p) = vpin.placement {
            self.emit(format_args!("         {} {} {}", p.status, p.origin, p.orient))?;
        }
        self.session.state = DefState::NetOptions;
        Ok(())
    }
    /// `NONDEFAULTRULE` of the current net, or of its open subnet
    pub fn net_nondefault_rule(&mut self, rule: &str) -> DefResult<()> {
        self.call(DefSection::Net)?;
        self.expect_state(&[DefState::Net, DefState::NetOptions, DefState::Subnet])?;
        self.nonempty(rule)?;
        if self.session.state == DefState::Subnet {
            self.emit(format_args!("\n         NONDEFAULTRULE {rule}"))
        } else {
            self.emit(format_args!("\n      + NONDEFAULTRULE {rule}"))?;
            self.session.state = DefState::NetOptions;
            Ok(())
        }
    }

    /// Open a `+ NOSHIELD` bracket on `layer`
    pub fn net_noshield_start(&mut self, layer: &str) -> DefResult<()> {
        self.call(DefSection::Noshield)?;
        self.expect_state(&[DefState::Net, DefState::NetOptions])?;
        self.nonempty(layer)?;
        self.emit(format_args!("\n      + NOSHIELD {layer}"))?;
        let s = &mut self.session;
        s.state = DefState::Noshield;
        s.wrap = 0;
        s.cursor.reset();
        Ok(())
    }
    /// Points of the open unshielded wire
    pub fn net_noshield_points(&mut self, pts: &[DefPoint]) -> DefResult<()> {
        self.call(DefSection::Noshield)?;
        self.expect_state(&[DefState::Noshield])?;
        self.wire_points(pts, "\n     ")
    }
    /// Via of the open unshielded wire
    pub fn net_noshield_via(&mut self, via: &str) -> DefResult<()> {
        self.call(DefSection::Noshield)?;
        self.expect_state(&[DefState::Noshield])?;
        self.nonempty(via)?;
        self.wrap("\n     ")?;
        self.emit(format_args!(" {via}"))
    }
    /// Close the open `NOSHIELD` bracket
    pub fn net_noshield_end(&mut self) -> DefResult<()> {
        self.call(DefSection::Noshield)?;
        self.expect_state(&[DefState::Noshield])?;
        self.session.state = DefState::NetOptions;
        Ok(())
    }

    /// Open `+ SUBNET` `name`
    pub fn net_subnet_start(&mut self, name: &str) -> DefResult<()> {
        self.call(DefSection::Subnet)?;
        self.expect_state(&[DefState::Net, DefState::NetOptions])?;
        self.nonempty(name)?;
        self.emit(format_args!("\n      + SUBNET {name}"))?;
        let s = &mut self.session;
        s.state = DefState::Subnet;
        s.wrap = 0;
        s.in_subnet = true;
        Ok(())
    }
    /// Instance-pin `inst` `pin` of the open subnet
    pub fn net_subnet_pin(&mut self, inst: &str, pin: &str) -> DefResult<()> {
        self.call(DefSection::Subnet)?;
        self.expect_state(&[DefState::Subnet])?;
        self.nonempty(inst)?;
        self.nonempty(pin)?;
        self.wrap("\n        ")?;
        self.emit(format_args!(" ( {inst} {pin} )"))
    }
    /// Close the open subnet
    pub fn net_subnet_end(&mut self) -> DefResult<()> {
        self.call(DefSection::Subnet)?;
        self.expect_state(&[DefState::Subnet])?;
        self.session.state = DefState::NetOptions;
        self.session.in_subnet = false;
        Ok(())
    }

    /// Open a routed-wire path of type `tp`.
    /// [PathType::New] continues an open path. [PathType::Shield] is for special nets only.
    pub fn net_path_start(&mut self, tp: PathType) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[
            DefState::Net,
            DefState::NetOptions,
            DefState::Subnet,
            DefState::NetPath,
        ])?;
        self.check_data(tp != PathType::Shield)?;
        match tp {
            PathType::New => {
                self.check_data(self.session.state == DefState::NetPath)?;
                self.emit(format_args!("\n         NEW"))?;
            }
            tp if self.session.in_subnet => self.emit(format_args!("\n      {tp}"))?,
            tp => self.emit(format_args!("\n      + {tp}"))?,
        }
        let s = &mut self.session;
        s.state = DefState::NetPathStart;
        s.wrap = 0;
        s.cursor.reset();
        Ok(())
    }
    /// Routing layer of the open path, with optional taper. First element of every path.
    pub fn net_path_layer(&mut self, layer: &str, taper: Option<&DefTaper>) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::NetPathStart])?;
        self.nonempty(layer)?;
        if let Some(DefTaper::Rule(r)) = taper {
            self.nonempty(r)?;
        }
        self.wrap("\n        ")?;
        self.emit(format_args!(" {layer}"))?;
        match taper {
            Some(DefTaper::Taper) => self.emit(format_args!(" TAPER"))?,
            Some(DefTaper::Rule(r)) => self.emit(format_args!(" TAPERRULE {r}"))?,
            None => (),
        }
        self.session.state = DefState::NetPath;
        Ok(())
    }
    /// Wire width of the open path
    pub fn net_path_width(&mut self, width: i32) -> DefResult<()> {
        self.net_path_item("\n         ", format_args!(" {width}"))
    }
    /// `STYLE` of the open path
    pub fn net_path_style(&mut self, style: i32) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::NetPath])?;
        self.emit(format_args!(" STYLE {style}"))
    }
    /// Points of the open path
    pub fn net_path_points(&mut self, pts: &[DefPoint]) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::NetPath])?;
        self.wire_points(pts, "\n        ")
    }
    /// Points of the open path, each with a wire extension
    pub fn net_path_points_with_ext(&mut self, pts: &[(DefPoint, i32)]) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::NetPath])?;
        for (p, ext) in pts {
            self.wrap("\n        ")?;
            self.emit(format_args!(" ( {} {} {ext} )", p.x, p.y))?;
        }
        Ok(())
    }
    /// Via placed at the current point of the open path
    pub fn net_path_via(&mut self, via: &str) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::NetPath])?;
        self.nonempty(via)?;
        self.net_path_item("\n        ", format_args!(" {via}"))
    }
    /// Via with orientation, placed at the current point of the open path
    pub fn net_path_via_with_orient(&mut self, via: &str, orient: Orientation) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::NetPath])?;
        self.nonempty(via)?;
        self.net_path_item("\n        ", format_args!(" {via} {orient}"))
    }
    /// `MASK` of the next wire or via. Requires 5.8.
    pub fn net_path_mask(&mut self, mask: i32) -> DefResult<()> {
        self.net_path_58_item(format_args!(" MASK {mask}"))
    }
    /// `RECT` of deltas from the current point. Requires 5.8.
    pub fn net_path_rect(&mut self, dx0: i32, dy0: i32, dx1: i32, dy1: i32) -> DefResult<()> {
        self.net_path_58_item(format_args!(" RECT ( {dx0} {dy0} {dx1} {dy1} )"))
    }
    /// `VIRTUAL` point. Requires 5.8.
    pub fn net_path_virtual(&mut self, at: DefPoint) -> DefResult<()> {
        self.net_path_58_item(format_args!(" VIRTUAL {at}"))
    }
    fn net_path_58_item(&mut self, args: std::fmt::Arguments) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::NetPath])?;
        self.min_version(&V5P8)?;
        self.net_path_item("\n     ", args)
    }
    fn net_path_item(&mut self, brk: &str, args: std::fmt::Arguments) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::NetPath])?;
        self.wrap(brk)?;
        self.emit(args)
    }
    /// Close the open path, back into its subnet if it has one
    pub fn net_path_end(&mut self) -> DefResult<()> {
        self.call(DefSection::Path)?;
        self.expect_state(&[DefState::NetPath])?;
        self.session.state = if self.session.in_subnet {
            DefState::Subnet
        } else {
            DefState::NetOptions
        };
        Ok(())
    }

    /// Terminate the current net
    pub fn net_end_one(&mut self) -> DefResult<()> {
        self.call(DefSection::Net)?;
        self.expect_state(&[DefState::Net, DefState::NetOptions])?;
        self.emit(format_args!(" ;\n"))?;
        self.session.state = DefState::NetEndNet;
        Ok(())
    }
    /// Close `NETS`
    pub fn end_nets(&mut self) -> DefResult<()> {
        self.call(DefSection::Net)?;
        self.check_close(&[
            DefState::NetStart,
            DefState::Net,
            DefState::NetOptions,
            DefState::NetEndNet,
        ])?;
        self.close_section(DefState::NetEnd, format_args!("END NETS\n\n"))
    }
}
