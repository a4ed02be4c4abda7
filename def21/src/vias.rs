//!
//! # Via Definitions
//!

// Local imports
use super::data::*;
use super::error::*;
use super::fmt::{fmt_g, fmt_point_list};
use super::state::DefState;
use super::write::DefWriter;

impl<'wr> DefWriter<'wr> {
    /// Open `VIAS` with `count` definitions
    pub fn start_vias(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::Via)?;
        self.check_open(DefSection::Via)?;
        self.open_section(count, DefState::ViaStart, format_args!("VIAS {count} ;\n"))
    }
    /// Begin via definition `name`
    pub fn via_name(&mut self, name: &str) -> DefResult<()> {
        self.call(DefSection::Via)?;
        self.expect_state(&[DefState::ViaStart, DefState::ViaOneEnd])?;
        self.nonempty(name)?;
        self.take_item()?;
        self.emit(format_args!("   - {name}"))?;
        self.session.via_has_value = false;
        self.session.state = DefState::Via;
        Ok(())
    }
    /// `+ PATTERNNAME`. Exclusive with [DefWriter::via_rule].
    pub fn via_pattern_name(&mut self, pattern: &str) -> DefResult<()> {
        self.call(DefSection::Via)?;
        self.expect_state(&[DefState::Via])?;
        self.check(!self.session.via_has_value, DefStatus::AlreadyDefined)?;
        self.nonempty(pattern)?;
        self.emit(format_args!(" + PATTERNNAME {pattern}"))?;
        self.session.via_has_value = true;
        Ok(())
    }
    /// `+ RECT`, with an optional color mask (5.8)
    pub fn via_rect(&mut self, layer: &str, rect: DefRect, mask: Option<i32>) -> DefResult<()> {
        self.call(DefSection::Via)?;
        self.expect_state(&[DefState::Via])?;
        if mask.is_some() {
            self.min_version(&V5P8)?;
        }
        self.nonempty(layer)?;
        match mask {
            Some(m) => self.emit(format_args!("\n      + RECT {layer} + MASK {m} {rect}")),
            None => self.emit(format_args!("\n      + RECT {layer} {rect}")),
        }
    }
    /// `+ POLYGON`, with an optional color mask (5.8). Requires 5.6.
    pub fn via_polygon(
        &mut self,
        layer: &str,
        pts: &[DefPoint],
        mask: Option<i32>,
    ) -> DefResult<()> {
        self.call(DefSection::Via)?;
        self.expect_state(&[DefState::Via])?;
        self.min_version(&V5P6)?;
        if mask.is_some() {
            self.min_version(&V5P8)?;
        }
        self.nonempty(layer)?;
        self.check_data(!pts.is_empty())?;
        self.emit(format_args!("\n      + POLYGON {layer} "))?;
        if let Some(m) = mask {
            self.emit(format_args!("+ MASK {m} "))?;
        }
        let pts = fmt_point_list(&real_points(pts), "", "\n                ", " ");
        self.emit(format_args!("{pts}"))
    }
    /// `+ VIARULE` generated via. Exclusive with [DefWriter::via_pattern_name]. Requires 5.6.
    ///
    /// Opens a via-rule bracket, in which the `ROWCOL`, `ORIGIN`, `OFFSET` and `PATTERN`
    /// parameters may follow.
    pub fn via_rule(&mut self, rule: &DefViaRule) -> DefResult<()> {
        self.call(DefSection::Via)?;
        self.expect_state(&[DefState::Via])?;
        self.check(!self.session.via_has_value, DefStatus::AlreadyDefined)?;
        self.min_version(&V5P6)?;
        for s in [&rule.rule, &rule.bot_layer, &rule.cut_layer, &rule.top_layer] {
            self.nonempty(s)?;
        }
        let (cx, cy) = rule.cut_size;
        let (sx, sy) = rule.cut_spacing;
        let (bx, by, tx, ty) = rule.enclosure;
        self.emit(format_args!(" + VIARULE {}\n", rule.rule))?;
        self.emit(format_args!("      + CUTSIZE {} {}\n", fmt_g(cx), fmt_g(cy)))?;
        self.emit(format_args!(
            "      + LAYERS {} {} {}\n",
            rule.bot_layer, rule.cut_layer, rule.top_layer
        ))?;
        self.emit(format_args!("      + CUTSPACING {} {}\n", fmt_g(sx), fmt_g(sy)))?;
        self.emit(format_args!(
            "      + ENCLOSURE {} {} {} {}",
            fmt_g(bx),
            fmt_g(by),
            fmt_g(tx),
            fmt_g(ty)
        ))?;
        self.session.via_has_value = true;
        self.session.state = DefState::ViaViaRule;
        Ok(())
    }
    /// Via-rule `+ ROWCOL`
    pub fn via_rule_row_col(&mut self, rows: i32, cols: i32) -> DefResult<()> {
        self.via_rule_param(format_args!("\n      + ROWCOL {rows} {cols}"))
    }
    /// Via-rule `+ ORIGIN`
    pub fn via_rule_origin(&mut self, offset: DefPoint) -> DefResult<()> {
        self.via_rule_param(format_args!("\n      + ORIGIN {} {}", offset.x, offset.y))
    }
    /// Via-rule `+ OFFSET`, of bottom and top layers
    pub fn via_rule_offset(&mut self, bot: DefPoint, top: DefPoint) -> DefResult<()> {
        self.via_rule_param(format_args!(
            "\n      + OFFSET {} {} {} {}",
            bot.x, bot.y, top.x, top.y
        ))
    }
    /// Via-rule `+ PATTERN`
    pub fn via_rule_pattern(&mut self, pattern: &str) -> DefResult<()> {
        self.call(DefSection::Via)?;
        self.expect_state(&[DefState::ViaViaRule])?;
        self.nonempty(pattern)?;
        self.via_rule_param(format_args!("\n      + PATTERN {pattern}"))
    }
    fn via_rule_param(&mut self, args: std::fmt::Arguments) -> DefResult<()> {
        self.call(DefSection::Via)?;
        self.expect_state(&[DefState::ViaViaRule])?;
        self.emit(args)
    }
    /// Terminate the current via definition
    pub fn one_via_end(&mut self) -> DefResult<()> {
        self.call(DefSection::Via)?;
        self.expect_state(&[DefState::Via, DefState::ViaViaRule])?;
        self.emit(format_args!(" ;\n"))?;
        self.session.state = DefState::ViaOneEnd;
        Ok(())
    }
    /// Close `VIAS`
    pub fn end_vias(&mut self) -> DefResult<()> {
        self.call(DefSection::Via)?;
        self.check_close(&[DefState::ViaStart, DefState::ViaOneEnd])?;
        self.close_section(DefState::ViaEnd, format_args!("END VIAS\n\n"))
    }
}
