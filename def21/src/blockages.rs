//!
//! # Blockages
//!
//! Each `BLOCKAGES` item is either a layer blockage or a placement blockage:
//! a head line, its options, and one or more rects or polygons.
//! Items have no explicit close; the next item, or [DefWriter::end_blockages], terminates them.
//!

// Local imports
use super::data::*;
use super::error::*;
use super::fmt::{fmt_g, fmt_literal_point_list};
use super::state::DefState;
use super::write::DefWriter;

impl<'wr> DefWriter<'wr> {
    /// Open `BLOCKAGES` with `count` items. Requires 5.4.
    pub fn start_blockages(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::Blockage)?;
        self.check_open(DefSection::Blockage)?;
        self.min_version(&V5P4)?;
        self.open_section(
            count,
            DefState::BlockageStart,
            format_args!("BLOCKAGES {count} ;\n"),
        )
    }
    /// Begin a layer blockage on `layer`
    pub fn blockages_layer(&mut self, layer: &str) -> DefResult<()> {
        self.call(DefSection::BlockageLayer)?;
        self.expect_state(&[DefState::BlockageStart, DefState::BlockageRect])?;
        self.nonempty(layer)?;
        self.take_item()?;
        self.end_blockage_shapes()?;
        self.emit(format_args!("   - LAYER {layer}\n"))?;
        let s = &mut self.session;
        s.blockage_sd = false;
        s.blockage_sf = false;
        s.blockage_place = false;
        s.state = DefState::BlockageLayer;
        Ok(())
    }
    /// `+ SLOTS`. Exclusive with [DefWriter::blockages_layer_fills].
    pub fn blockages_layer_slots(&mut self) -> DefResult<()> {
        self.blockage_layer_checks()?;
        self.check_data(!self.session.blockage_sf)?;
        self.blockage_layer_option(format_args!("      + SLOTS\n"))?;
        self.session.blockage_sf = true;
        Ok(())
    }
    /// `+ FILLS`. Exclusive with [DefWriter::blockages_layer_slots].
    pub fn blockages_layer_fills(&mut self) -> DefResult<()> {
        self.blockage_layer_checks()?;
        self.check_data(!self.session.blockage_sf)?;
        self.blockage_layer_option(format_args!("     + FILLS\n"))?;
        self.session.blockage_sf = true;
        Ok(())
    }
    /// `+ PUSHDOWN`
    pub fn blockages_layer_pushdown(&mut self) -> DefResult<()> {
        self.blockage_layer_checks()?;
        self.blockage_layer_option(format_args!("     + PUSHDOWN\n"))
    }
    /// `+ EXCEPTPGNET`. Requires 5.7.
    pub fn blockages_layer_except_pg_net(&mut self) -> DefResult<()> {
        self.blockage_layer_checks()?;
        self.min_version(&V5P7)?;
        self.blockage_layer_option(format_args!("     + EXCEPTPGNET\n"))
    }
    /// `+ COMPONENT`
    pub fn blockages_layer_component(&mut self, comp: &str) -> DefResult<()> {
        self.blockage_layer_checks()?;
        self.nonempty(comp)?;
        self.blockage_layer_option(format_args!("     + COMPONENT {comp}\n"))
    }
    /// `+ SPACING`. Exclusive with [DefWriter::blockages_layer_design_rule_width].
    pub fn blockages_layer_spacing(&mut self, spacing: i32) -> DefResult<()> {
        self.blockage_layer_checks()?;
        self.check_data(!self.session.blockage_sd)?;
        self.emit(format_args!("     + SPACING {spacing}\n"))?;
        self.session.blockage_sd = true;
        self.session.state = DefState::BlockageLayer;
        Ok(())
    }
    /// `+ DESIGNRULEWIDTH`. Exclusive with [DefWriter::blockages_layer_spacing].
    pub fn blockages_layer_design_rule_width(&mut self, width: i32) -> DefResult<()> {
        self.blockage_layer_checks()?;
        self.check_data(!self.session.blockage_sd)?;
        self.emit(format_args!("     + DESIGNRULEWIDTH {width}\n"))?;
        self.session.blockage_sd = true;
        self.session.state = DefState::BlockageLayer;
        Ok(())
    }
    /// `+ MASK`. Requires 5.8.
    pub fn blockages_layer_mask(&mut self, mask: i32) -> DefResult<()> {
        self.blockage_layer_checks()?;
        self.min_version(&V5P8)?;
        if self.session.state == DefState::BlockageRect {
            self.emit(format_args!("\n"))?;
        }
        self.emit(format_args!("     + MASK {mask}"))?;
        self.session.state = DefState::BlockageLayer;
        Ok(())
    }
    fn blockage_layer_checks(&mut self) -> DefResult<()> {
        self.call(DefSection::BlockageLayer)?;
        self.expect_state(&[DefState::BlockageLayer, DefState::BlockageRect])?;
        self.check(!self.session.blockage_place, DefStatus::BadOrder)
    }
    fn blockage_layer_option(&mut self, args: std::fmt::Arguments) -> DefResult<()> {
        self.end_blockage_shapes()?;
        self.emit(args)?;
        self.session.state = DefState::BlockageLayer;
        Ok(())
    }

    /// Begin a placement blockage
    pub fn blockages_placement(&mut self) -> DefResult<()> {
        self.call(DefSection::BlockagePlacement)?;
        self.expect_state(&[DefState::BlockageStart, DefState::BlockageRect])?;
        self.take_item()?;
        self.end_blockage_shapes()?;
        self.emit(format_args!("   - PLACEMENT\n"))?;
        let s = &mut self.session;
        s.blockage_sp = false;
        s.blockage_place = true;
        s.state = DefState::BlockagePlace;
        Ok(())
    }
    /// `+ COMPONENT`
    pub fn blockages_placement_component(&mut self, comp: &str) -> DefResult<()> {
        self.blockage_place_checks()?;
        self.nonempty(comp)?;
        self.blockage_place_option(format_args!("     + COMPONENT {comp}\n"))
    }
    /// `+ PUSHDOWN`. Exclusive with soft and partial.
    pub fn blockages_placement_pushdown(&mut self) -> DefResult<()> {
        self.blockage_place_checks()?;
        self.check_data(!self.session.blockage_sp)?;
        self.blockage_place_option(format_args!("     + PUSHDOWN\n"))?;
        self.session.blockage_sp = true;
        Ok(())
    }
    /// `+ SOFT`. Requires 5.7. Exclusive with pushdown and partial.
    pub fn blockages_placement_soft(&mut self) -> DefResult<()> {
        self.blockage_place_checks()?;
        self.min_version(&V5P7)?;
        self.check_data(!self.session.blockage_sp)?;
        self.blockage_place_option(format_args!("     + SOFT\n"))?;
        self.session.blockage_sp = true;
        Ok(())
    }
    /// `+ PARTIAL` with maximum density. Requires 5.7. Exclusive with pushdown and soft.
    pub fn blockages_placement_partial(&mut self, max_density: f64) -> DefResult<()> {
        self.blockage_place_checks()?;
        self.min_version(&V5P7)?;
        self.check_data(!self.session.blockage_sp)?;
        self.blockage_place_option(format_args!("     + PARTIAL {}\n", fmt_g(max_density)))?;
        self.session.blockage_sp = true;
        Ok(())
    }
    fn blockage_place_checks(&mut self) -> DefResult<()> {
        self.call(DefSection::BlockagePlacement)?;
        self.expect_state(&[DefState::BlockagePlace, DefState::BlockageRect])?;
        self.check(self.session.blockage_place, DefStatus::BadOrder)
    }
    fn blockage_place_option(&mut self, args: std::fmt::Arguments) -> DefResult<()> {
        self.end_blockage_shapes()?;
        self.emit(args)?;
        self.session.state = DefState::BlockagePlace;
        Ok(())
    }

    /// `RECT` of the open blockage
    pub fn blockages_rect(&mut self, rect: DefRect) -> DefResult<()> {
        self.call(DefSection::Blockage)?;
        self.expect_state(&[
            DefState::BlockageLayer,
            DefState::BlockagePlace,
            DefState::BlockageRect,
        ])?;
        self.next_blockage_shape()?;
        self.emit(format_args!("     RECT {rect}"))?;
        self.session.state = DefState::BlockageRect;
        Ok(())
    }
    /// `POLYGON` of the open layer blockage. Requires 5.6.
    pub fn blockages_polygon(&mut self, pts: &[DefPoint]) -> DefResult<()> {
        self.call(DefSection::Blockage)?;
        self.expect_state(&[DefState::BlockageLayer, DefState::BlockageRect])?;
        self.check(!self.session.blockage_place, DefStatus::BadOrder)?;
        self.min_version(&V5P6)?;
        self.check_data(pts.len() >= 3)?;
        self.next_blockage_shape()?;
        let s = fmt_literal_point_list(pts, "", "\n             ", " ");
        self.emit(format_args!("     POLYGON {s}"))?;
        self.session.state = DefState::BlockageRect;
        Ok(())
    }
    /// Close `BLOCKAGES`. The last item, if any, must have a shape.
    pub fn end_blockages(&mut self) -> DefResult<()> {
        self.call(DefSection::Blockage)?;
        self.check_close(&[DefState::BlockageStart, DefState::BlockageRect])?;
        let term = self.item_terminator(DefState::BlockageStart, " ;\n");
        self.close_section(
            DefState::BlockageEnd,
            format_args!("{term}END BLOCKAGES\n\n"),
        )
    }
    /// Terminate the previous item's shapes, ahead of a new item or option line
    fn end_blockage_shapes(&mut self) -> DefResult<()> {
        if self.session.state == DefState::BlockageRect {
            self.emit(format_args!(" ;\n"))?;
        }
        Ok(())
    }
    /// Break the line after a previous shape
    fn next_blockage_shape(&mut self) -> DefResult<()> {
        if self.session.state == DefState::BlockageRect {
            self.emit(format_args!("\n"))?;
        }
        Ok(())
    }
}
