//!
//! # Regions & Components
//!

// Local imports
use super::data::*;
use super::error::*;
use super::fmt::fmt_g;
use super::state::DefState;
use super::write::DefWriter;

impl<'wr> DefWriter<'wr> {
    /// Open `REGIONS` with `count` regions
    pub fn start_regions(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::Region)?;
        self.check_open(DefSection::Region)?;
        self.open_section(count, DefState::RegionStart, format_args!("REGIONS {count} ;\n"))
    }
    /// Begin region `name`
    pub fn region(&mut self, name: &str) -> DefResult<()> {
        self.call(DefSection::Region)?;
        self.expect_state(&[DefState::RegionStart, DefState::Region])?;
        self.nonempty(name)?;
        self.take_item()?;
        if self.session.state == DefState::Region {
            self.emit(format_args!(";\n"))?;
        }
        self.emit(format_args!("   - {name} "))?;
        self.session.state = DefState::Region;
        Ok(())
    }
    /// Add a box to the current region
    pub fn region_rect(&mut self, rect: DefRect) -> DefResult<()> {
        self.call(DefSection::Region)?;
        self.expect_state(&[DefState::Region])?;
        self.emit(format_args!("      {rect} "))
    }
    /// `+ TYPE` of the current region
    pub fn region_type(&mut self, tp: RegionType) -> DefResult<()> {
        self.call(DefSection::Region)?;
        self.expect_state(&[DefState::Region])?;
        self.emit(format_args!("         + TYPE {tp} "))
    }
    /// Close `REGIONS`
    pub fn end_regions(&mut self) -> DefResult<()> {
        self.call(DefSection::Region)?;
        self.check_close(&[DefState::RegionStart, DefState::Region])?;
        let term = self.item_terminator(DefState::RegionStart, ";\n");
        self.close_section(DefState::RegionEnd, format_args!("{term}END REGIONS\n\n"))
    }

    /// `COMPONENTMASKSHIFT` layer list. Requires 5.8.
    pub fn component_mask_shift_layers(&mut self, layers: &[&str]) -> DefResult<()> {
        self.call(DefSection::ComponentMaskShift)?;
        self.min_version(&V5P8)?;
        self.expect_design_level()?;
        self.check(
            !self.session.written.contains(&DefSection::ComponentMaskShift),
            DefStatus::BadOrder,
        )?;
        for layer in layers {
            self.nonempty(layer)?;
        }
        self.close_row()?;
        self.emit(format_args!("COMPONENTMASKSHIFT "))?;
        for layer in layers {
            self.emit(format_args!("{layer} "))?;
        }
        self.emit(format_args!(";\n\n"))?;
        self.session.written.insert(DefSection::ComponentMaskShift);
        self.session.state = DefState::ComponentMaskShift;
        Ok(())
    }

    /// Open `COMPONENTS` with `count` components
    pub fn start_components(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::Component)?;
        self.check_open(DefSection::Component)?;
        self.open_section(
            count,
            DefState::ComponentStart,
            format_args!("COMPONENTS {count} ;\n"),
        )
    }
    /// Write component `comp`.
    /// Left open for `MASKSHIFT`, `HALO`, `ROUTEHALO` and properties.
    pub fn component(&mut self, comp: &DefComponent) -> DefResult<()> {
        self.call(DefSection::Component)?;
        self.expect_state(&[DefState::ComponentStart, DefState::Component])?;
        self.nonempty(&comp.name)?;
        self.nonempty(&comp.master)?;
        self.check_data(comp.source != Some(NetSource::Test))?;
        for f in comp.foreigns.iter() {
            self.nonempty(&f.name)?;
        }
        if let Some(DefComponentRegion::Named(ref r)) = comp.region {
            self.nonempty(r)?;
        }
        self.take_item()?;

        if self.session.state == DefState::Component {
            self.emit(format_args!(";\n"))?;
        }
        self.emit(format_args!("   - {} {} ", comp.name, comp.master))?;
        for net in comp.nets.iter() {
            self.emit(format_args!("{net} "))?;
        }
        if let Some(ref eeq) = comp.eeq_master {
            self.emit(format_args!("\n      + EEQMASTER {eeq} "))?;
        }
        if let Some((ref generator, ref params)) = comp.generate {
            self.emit(format_args!("\n      + GENERATE {generator} "))?;
            if let Some(p) = params {
                self.emit(format_args!(" {p} "))?;
            }
        }
        if let Some(src) = comp.source {
            self.emit(format_args!("\n      + SOURCE {src} "))?;
        }
        for f in comp.foreigns.iter() {
            self.emit(format_args!(
                "\n      + FOREIGN {} {} {} ",
                f.name, f.origin, f.orient
            ))?;
        }
        if let Some(ref p) = comp.placement {
            match p.status {
                PlacementStatus::Unplaced => self.emit(format_args!("\n      + UNPLACED "))?,
                status => self.emit(format_args!(
                    "\n      + {status} {} {} ",
                    p.origin, p.orient
                ))?,
            }
        }
        if let Some(w) = comp.weight {
            self.emit(format_args!("\n      + WEIGHT {} ", fmt_g(w)))?;
        }
        match comp.region {
            Some(DefComponentRegion::Named(ref r)) => {
                self.emit(format_args!("\n      + REGION {r} "))?
            }
            Some(DefComponentRegion::Rect(ref r)) => {
                self.emit(format_args!("\n      + REGION {r} "))?
            }
            None => (),
        }
        self.session.halo = false;
        self.session.state = DefState::Component;
        Ok(())
    }
    /// `+ MASKSHIFT` of the current component. Requires 5.8.
    pub fn component_mask_shift(&mut self, shift: i32) -> DefResult<()> {
        self.call(DefSection::Component)?;
        self.min_version(&V5P8)?;
        self.expect_state(&[DefState::Component])?;
        self.emit(format_args!("\n      + MASKSHIFT {shift} "))
    }
    /// `+ HALO` of the current component. Requires 5.6.
    /// Exclusive with [DefWriter::component_halo_soft].
    pub fn component_halo(&mut self, left: i32, bottom: i32, right: i32, top: i32) -> DefResult<()> {
        self.call(DefSection::Component)?;
        self.min_version(&V5P6)?;
        self.halo_checks()?;
        self.emit(format_args!("\n      + HALO {left} {bottom} {right} {top} "))?;
        self.session.halo = true;
        Ok(())
    }
    /// `+ HALO SOFT` of the current component. Requires 5.7.
    /// Exclusive with [DefWriter::component_halo].
    pub fn component_halo_soft(
        &mut self,
        left: i32,
        bottom: i32,
        right: i32,
        top: i32,
    ) -> DefResult<()> {
        self.call(DefSection::Component)?;
        self.min_version(&V5P7)?;
        self.halo_checks()?;
        self.emit(format_args!(
            "\n      + HALO SOFT {left} {bottom} {right} {top} "
        ))?;
        self.session.halo = true;
        Ok(())
    }
    fn halo_checks(&self) -> DefResult<()> {
        self.expect_state(&[DefState::Component])?;
        self.check_data(!self.session.halo)
    }
    /// `+ ROUTEHALO` of the current component. Requires 5.7.
    pub fn component_route_halo(
        &mut self,
        dist: i32,
        min_layer: &str,
        max_layer: &str,
    ) -> DefResult<()> {
        self.call(DefSection::Component)?;
        self.min_version(&V5P7)?;
        self.expect_state(&[DefState::Component])?;
        self.nonempty(min_layer)?;
        self.nonempty(max_layer)?;
        self.emit(format_args!(
            "\n      + ROUTEHALO {dist} {min_layer} {max_layer} "
        ))
    }
    /// Close `COMPONENTS`
    pub fn end_components(&mut self) -> DefResult<()> {
        self.call(DefSection::Component)?;
        self.check_close(&[DefState::ComponentStart, DefState::Component])?;
        let term = self.item_terminator(DefState::ComponentStart, ";\n");
        self.close_section(DefState::ComponentEnd, format_args!("{term}END COMPONENTS\n\n"))
    }
}
