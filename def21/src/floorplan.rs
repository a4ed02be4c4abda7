//!
//! # Floorplan Statements & Properties
//!
//! Property definitions and values, `DIEAREA`, `ROW`, `TRACKS`, `GCELLGRID`,
//! `DEFAULTCAP`, `CANPLACE` and `CANNOTOCCUPY`.
//!

// Local imports
use super::data::*;
use super::error::*;
use super::fmt::{fmt_f, fmt_g, fmt_literal_point_list};
use super::state::DefState;
use super::write::DefWriter;

/// States in which a `+ PROPERTY` may be attached to the current item
const PROPERTY_STATES: [DefState; 12] = [
    DefState::Row,
    DefState::Region,
    DefState::Component,
    DefState::Pin,
    DefState::PinProp,
    DefState::Snet,
    DefState::SnetOptions,
    DefState::Net,
    DefState::NetOptions,
    DefState::Group,
    DefState::Ndr,
    DefState::BeginExt,
];

impl<'wr> DefWriter<'wr> {
    /// Open `PROPERTYDEFINITIONS`
    pub fn start_property_definitions(&mut self) -> DefResult<()> {
        self.call(DefSection::PropertyDefinitions)?;
        self.check_open(DefSection::PropertyDefinitions)?;
        self.open_section(0, DefState::PropDefStart, format_args!("PROPERTYDEFINITIONS\n"))
    }
    /// Integer property definition, with optional range and default value
    pub fn int_property_definition(
        &mut self,
        obj: PropObjectType,
        name: &str,
        range: Option<(f64, f64)>,
        value: Option<i32>,
    ) -> DefResult<()> {
        let value = value.map(|v| format!("{v} "));
        self.property_definition(obj, name, "INTEGER", range, value)
    }
    /// Real property definition, with optional range and default value
    pub fn real_property_definition(
        &mut self,
        obj: PropObjectType,
        name: &str,
        range: Option<(f64, f64)>,
        value: Option<f64>,
    ) -> DefResult<()> {
        let value = value.map(|v| format!("{} ", fmt_g(v)));
        self.property_definition(obj, name, "REAL", range, value)
    }
    /// String property definition, with optional range and default value
    pub fn string_property_definition(
        &mut self,
        obj: PropObjectType,
        name: &str,
        range: Option<(f64, f64)>,
        value: Option<&str>,
    ) -> DefResult<()> {
        let value = value.map(|v| format!("\"{v}\" "));
        self.property_definition(obj, name, "STRING", range, value)
    }
    fn property_definition(
        &mut self,
        obj: PropObjectType,
        name: &str,
        kind: &str,
        range: Option<(f64, f64)>,
        value: Option<String>,
    ) -> DefResult<()> {
        self.call(DefSection::PropertyDefinitions)?;
        self.expect_state(&[DefState::PropDefStart, DefState::PropDef])?;
        self.nonempty(name)?;
        self.emit(format_args!("   {obj} {name} {kind} "))?;
        if let Some((lo, hi)) = range {
            self.emit(format_args!("RANGE {} {} ", fmt_g(lo), fmt_g(hi)))?;
        }
        if let Some(v) = value {
            self.emit(format_args!("{v}"))?;
        }
        self.emit(format_args!(";\n"))?;
        self.session.state = DefState::PropDef;
        Ok(())
    }
    /// Close `PROPERTYDEFINITIONS`
    pub fn end_property_definitions(&mut self) -> DefResult<()> {
        self.call(DefSection::PropertyDefinitions)?;
        self.check_close(&[DefState::PropDefStart, DefState::PropDef])?;
        self.close_section(DefState::PropDefEnd, format_args!("END PROPERTYDEFINITIONS\n\n"))
    }
    /// String-valued `+ PROPERTY` of the current item
    pub fn string_property(&mut self, name: &str, value: &str) -> DefResult<()> {
        self.property(name, format!("\"{value}\""))
    }
    /// Real-valued `+ PROPERTY` of the current item
    pub fn real_property(&mut self, name: &str, value: f64) -> DefResult<()> {
        self.property(name, fmt_g(value))
    }
    /// Integer-valued `+ PROPERTY` of the current item
    pub fn int_property(&mut self, name: &str, value: i32) -> DefResult<()> {
        self.property(name, value.to_string())
    }
    fn property(&mut self, name: &str, value: String) -> DefResult<()> {
        let section = self.session.state.section();
        self.call(section)?;
        self.expect_state(&PROPERTY_STATES)?;
        self.nonempty(name)?;
        self.emit(format_args!("\n      + PROPERTY {name} {value} "))?;
        // Properties are options; connections may no longer follow
        match self.session.state {
            DefState::Snet => self.session.state = DefState::SnetOptions,
            DefState::Net => self.session.state = DefState::NetOptions,
            _ => (),
        }
        Ok(())
    }

    /// Rectangular `DIEAREA`
    pub fn die_area(&mut self, rect: DefRect) -> DefResult<()> {
        self.call(DefSection::DieArea)?;
        self.die_area_checks()?;
        self.check_data(rect.is_ordered())?;
        self.close_row()?;
        self.emit(format_args!("DIEAREA {rect} ;\n"))?;
        self.die_area_written();
        Ok(())
    }
    /// Polygonal `DIEAREA`, of at least four points. Requires 5.6.
    pub fn die_area_polygon(&mut self, pts: &[DefPoint]) -> DefResult<()> {
        self.call(DefSection::DieArea)?;
        self.min_version(&V5P6)?;
        self.die_area_checks()?;
        self.check_data(pts.len() >= 4)?;
        self.close_row()?;
        let s = fmt_literal_point_list(pts, "DIEAREA ", "\n        ", " ");
        self.emit(format_args!("{s};\n"))?;
        self.die_area_written();
        Ok(())
    }
    fn die_area_checks(&self) -> DefResult<()> {
        self.expect_design_level()?;
        self.check(
            !self.session.written.contains(&DefSection::DieArea),
            DefStatus::BadOrder,
        )
    }
    fn die_area_written(&mut self) {
        self.session.written.insert(DefSection::DieArea);
        self.session.state = DefState::DieArea;
    }

    /// `ROW` statement.
    /// Left open for properties; terminated by whichever statement comes next.
    pub fn row(
        &mut self,
        name: &str,
        site: &str,
        origin: DefPoint,
        orient: Orientation,
        do_by: Option<(i32, i32)>,
        step: Option<(i32, i32)>,
    ) -> DefResult<()> {
        self.call(DefSection::Row)?;
        self.expect_design_level()?;
        self.nonempty(name)?;
        self.nonempty(site)?;
        self.check_data(step.is_none() || do_by.is_some())?;
        if self.session.state == DefState::Row {
            self.emit(format_args!(";\n"))?;
        }
        self.emit(format_args!(
            "ROW {name} {site} {} {} {orient} ",
            origin.x, origin.y
        ))?;
        if let Some((n, m)) = do_by {
            self.emit(format_args!("DO {n} BY {m} "))?;
        }
        if let Some((sx, sy)) = step {
            self.emit(format_args!("STEP {sx} {sy} "))?;
        }
        self.session.state = DefState::Row;
        Ok(())
    }

    /// `TRACKS` statement.
    /// `mask` is a color mask and a same-mask flag, and requires 5.8.
    pub fn tracks(
        &mut self,
        dir: TrackDirection,
        start: i32,
        count: i32,
        step: i32,
        mask: Option<(i32, bool)>,
        layers: &[&str],
    ) -> DefResult<()> {
        self.call(DefSection::Tracks)?;
        self.expect_design_level()?;
        if mask.is_some() {
            self.min_version(&V5P8)?;
        }
        for layer in layers {
            self.nonempty(layer)?;
        }
        self.close_row()?;
        self.emit(format_args!("TRACKS {dir} {start} DO {count} STEP {step}"))?;
        if let Some((m, same)) = mask {
            self.emit(format_args!(" MASK {m}"))?;
            if same {
                self.emit(format_args!(" SAMEMASK"))?;
            }
        }
        if !layers.is_empty() {
            self.emit(format_args!(" LAYER"))?;
            for layer in layers {
                self.emit(format_args!(" {layer}"))?;
            }
        }
        self.emit(format_args!(" ;\n"))?;
        self.session.state = DefState::Tracks;
        Ok(())
    }

    /// `GCELLGRID` statement
    pub fn gcell_grid(
        &mut self,
        dir: TrackDirection,
        start: i32,
        count: i32,
        step: i32,
    ) -> DefResult<()> {
        self.call(DefSection::GcellGrid)?;
        self.expect_design_level()?;
        self.close_row()?;
        self.emit(format_args!("GCELLGRID {dir} {start} DO {count} STEP {step} ;\n"))?;
        self.session.state = DefState::GcellGrid;
        Ok(())
    }

    /// Open `DEFAULTCAP` with `count` entries. Retired at 5.4.
    pub fn start_default_cap(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::DefaultCap)?;
        self.retired_at(&V5P4, DefSection::DefaultCap)?;
        self.check_open(DefSection::DefaultCap)?;
        self.open_section(count, DefState::DefaultCapStart, format_args!("DEFAULTCAP {count}\n"))
    }
    /// `MINPINS .. WIRECAP ..` entry
    pub fn default_cap(&mut self, min_pins: i32, wire_cap: f64) -> DefResult<()> {
        self.call(DefSection::DefaultCap)?;
        self.retired_at(&V5P4, DefSection::DefaultCap)?;
        self.expect_state(&[DefState::DefaultCapStart, DefState::DefaultCap])?;
        self.take_item()?;
        self.emit(format_args!(
            "   MINPINS {min_pins} WIRECAP {} ;\n",
            fmt_f(wire_cap)
        ))?;
        self.session.state = DefState::DefaultCap;
        Ok(())
    }
    /// Close `DEFAULTCAP`
    pub fn end_default_cap(&mut self) -> DefResult<()> {
        self.call(DefSection::DefaultCap)?;
        self.retired_at(&V5P4, DefSection::DefaultCap)?;
        self.check_close(&[DefState::DefaultCapStart, DefState::DefaultCap])?;
        self.close_section(DefState::DefaultCapEnd, format_args!("END DEFAULTCAP\n\n"))
    }

    /// `CANPLACE` statement
    pub fn can_place(
        &mut self,
        master: &str,
        origin: DefPoint,
        orient: Orientation,
        repeat: DefRepeat,
    ) -> DefResult<()> {
        self.call(DefSection::CanPlace)?;
        self.site_statement("CANPLACE", master, origin, orient, repeat)?;
        self.session.state = DefState::CanPlace;
        Ok(())
    }
    /// `CANNOTOCCUPY` statement
    pub fn cannot_occupy(
        &mut self,
        master: &str,
        origin: DefPoint,
        orient: Orientation,
        repeat: DefRepeat,
    ) -> DefResult<()> {
        self.call(DefSection::CannotOccupy)?;
        self.site_statement("CANNOTOCCUPY", master, origin, orient, repeat)?;
        self.session.state = DefState::CannotOccupy;
        Ok(())
    }
    fn site_statement(
        &mut self,
        keyword: &str,
        master: &str,
        origin: DefPoint,
        orient: Orientation,
        r: DefRepeat,
    ) -> DefResult<()> {
        self.expect_design_level()?;
        self.nonempty(master)?;
        self.close_row()?;
        self.emit(format_args!(
            "{keyword} {master} {} {} {orient} DO {} BY {} STEP {} {} ;\n",
            origin.x, origin.y, r.num_x, r.num_y, r.step_x, r.step_y
        ))
    }
}
