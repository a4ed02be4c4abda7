//!
//! # Callback-Driven Writing
//!
//! An alternative to calling the [DefWriter] emitters in sequence:
//! implement [DefCallbacks], one method per top-level section,
//! and hand it to [write_with], which invokes each in DEF order.
//!
//! Each callback writes its entire section (or nothing) through the provided writer,
//! and reports which it did via [SectionOutcome].
//! The first error returned by a callback aborts the write.
//!

// Standard Lib Imports
use std::io::Write;

// Crates.io Imports
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

// Local imports
use super::error::*;
use super::state::DefState;
use super::write::DefWriter;

/// Whether a callback wrote its section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionOutcome {
    Written,
    Skipped,
}

/// # Callback Driver Options
#[derive(Debug, Default, Clone, Builder, Deserialize, Serialize, PartialEq, Eq)]
#[builder(pattern = "owned", setter(into), default)]
pub struct DefDriverOptions {
    /// Tally, and log, the sections whose callbacks were left unimplemented
    pub count_unused_callbacks: bool,
}

/// # Callback Driver Report
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DefDriverReport {
    /// Sections written
    pub written: Vec<DefSection>,
    /// Sections skipped. Only populated with [DefDriverOptions::count_unused_callbacks].
    pub unused: Vec<DefSection>,
    /// Lines written
    pub lines: usize,
}
impl DefDriverReport {
    fn record(&mut self, section: DefSection, outcome: SectionOutcome, options: &DefDriverOptions) {
        match outcome {
            SectionOutcome::Written => self.written.push(section),
            SectionOutcome::Skipped if options.count_unused_callbacks => {
                tracing::warn!(%section, "DEF callback unused");
                self.unused.push(section);
            }
            SectionOutcome::Skipped => (),
        }
    }
}

/// Declare [DefCallbacks] with one default (skipping) method per section,
/// along with the driver loop that runs them in declaration order.
macro_rules! def_callbacks {
    ($( $(#[$meta:meta])* $name:ident => $section:ident ),* $(,)?) => {
        /// # Def Section Callbacks
        ///
        /// One method per top-level DEF section, invoked in DEF order by [write_with].
        /// Every method defaults to [SectionOutcome::Skipped], except [DefCallbacks::design_end],
        /// which writes `END DESIGN`.
        pub trait DefCallbacks {
            $(
                $(#[$meta])*
                fn $name(&mut self, _wr: &mut DefWriter<'_>) -> DefResult<SectionOutcome> {
                    Ok(SectionOutcome::Skipped)
                }
            )*
            /// `END DESIGN`
            fn design_end(&mut self, wr: &mut DefWriter<'_>) -> DefResult<SectionOutcome> {
                wr.end()?;
                Ok(SectionOutcome::Written)
            }
        }
        /// Invoke each section callback of `cb`, in order
        fn run_sections<C: DefCallbacks + ?Sized>(
            cb: &mut C,
            wr: &mut DefWriter<'_>,
            options: &DefDriverOptions,
            report: &mut DefDriverReport,
        ) -> DefResult<()> {
            $(
                let outcome = cb.$name(wr)?;
                report.record(DefSection::$section, outcome, options);
            )*
            let outcome = cb.design_end(wr)?;
            report.record(DefSection::DesignEnd, outcome, options);
            Ok(())
        }
    };
}

def_callbacks!(
    /// `VERSION`, via [DefWriter::version]
    version => Version,
    /// `NAMESCASESENSITIVE`
    case_sensitive => CaseSensitive,
    /// `BUSBITCHARS`
    bus_bit => BusBit,
    /// `DIVIDERCHAR`
    divider => Divider,
    /// `DESIGN`
    design => Design,
    /// `TECHNOLOGY`
    technology => Technology,
    /// `ARRAY`
    array => Array,
    /// `FLOORPLAN`
    floorplan => Floorplan,
    /// `UNITS`
    units => Units,
    /// `HISTORY` statements
    history => History,
    /// `PROPERTYDEFINITIONS`
    property_definitions => PropertyDefinitions,
    /// `DIEAREA`
    die_area => DieArea,
    /// `ROW` statements
    rows => Row,
    /// `TRACKS` statements
    tracks => Tracks,
    /// `GCELLGRID` statements
    gcell_grid => GcellGrid,
    /// `DEFAULTCAP`
    default_cap => DefaultCap,
    /// `CANPLACE` statements
    can_place => CanPlace,
    /// `CANNOTOCCUPY` statements
    cannot_occupy => CannotOccupy,
    /// `VIAS`
    vias => Via,
    /// `REGIONS`
    regions => Region,
    /// `COMPONENTMASKSHIFT`
    component_mask_shift => ComponentMaskShift,
    /// `COMPONENTS`
    components => Component,
    /// `PINS`
    pins => Pin,
    /// `PINPROPERTIES`
    pin_properties => PinProperty,
    /// `BLOCKAGES`
    blockages => Blockage,
    /// `SLOTS`
    slots => Slot,
    /// `FILLS`
    fills => Fill,
    /// `NONDEFAULTRULES`
    nondefault_rules => NonDefaultRule,
    /// `STYLES`
    styles => Styles,
    /// `SPECIALNETS`
    special_nets => SpecialNet,
    /// `NETS`
    nets => Net,
    /// `IOTIMINGS`
    io_timings => IoTiming,
    /// `SCANCHAINS`
    scan_chains => ScanChain,
    /// `CONSTRAINTS`
    constraints => Constraints,
    /// `GROUPS`
    groups => Group,
    /// `BEGINEXT` blocks
    extensions => BeginExt,
);

/// Write a DEF design to `dest`, produced by the section callbacks of `cb`.
///
/// Binds a new [DefWriter] via [DefWriter::init_cbk], runs every callback in DEF order,
/// and requires the design to have been ended by the last.
pub fn write_with<C: DefCallbacks + ?Sized>(
    dest: impl Write,
    cb: &mut C,
    options: &DefDriverOptions,
) -> DefResult<DefDriverReport> {
    let mut wr = DefWriter::new(dest);
    wr.init_cbk()?;
    let mut report = DefDriverReport::default();
    if let Err(e) = run_sections(cb, &mut wr, options, &mut report) {
        tracing::error!(error = %e, "DEF callback aborted the write");
        return Err(e);
    }
    if wr.state() != DefState::Done {
        return Err(DefError::Status {
            status: DefStatus::BadOrder,
            section: DefSection::DesignEnd,
        });
    }
    report.lines = wr.current_line_number();
    if options.count_unused_callbacks {
        tracing::info!(unused = report.unused.len(), "DEF callbacks complete");
    }
    Ok(report)
}
