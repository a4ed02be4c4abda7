//!
//! # IO Timings, Scan Chains, Constraints & Groups
//!
//! The sections which follow `NETS`.
//! `IOTIMINGS` and `CONSTRAINTS` are retired as of version 5.4.
//!

// Local imports
use super::data::*;
use super::error::*;
use super::fmt::fmt_g;
use super::state::DefState;
use super::write::DefWriter;

impl<'wr> DefWriter<'wr> {
    /// Open `IOTIMINGS` with `count` entries. Retired at 5.4; requires `NETS`.
    pub fn start_io_timings(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::IoTiming)?;
        self.retired_at(&V5P4, DefSection::IoTiming)?;
        self.check_open(DefSection::IoTiming)?;
        self.check(
            self.session.written.contains(&DefSection::Net),
            DefStatus::BadOrder,
        )?;
        self.open_section(
            count,
            DefState::IoTimingStart,
            format_args!("IOTIMINGS {count} ;\n"),
        )
    }
    /// Begin the timing of instance-pin `inst` `pin`
    pub fn io_timing(&mut self, inst: &str, pin: &str) -> DefResult<()> {
        self.call(DefSection::IoTiming)?;
        self.expect_state(&[DefState::IoTimingStart, DefState::IoTiming])?;
        self.nonempty(inst)?;
        self.nonempty(pin)?;
        self.take_item()?;
        if self.session.state == DefState::IoTiming {
            self.emit(format_args!(" ;\n"))?;
        }
        self.emit(format_args!("   - ( {inst} {pin} )\n"))?;
        self.session.state = DefState::IoTiming;
        Ok(())
    }
    /// `+ RISE|FALL VARIABLE min max`
    pub fn io_timing_variable(&mut self, edge: RiseFall, min: i32, max: i32) -> DefResult<()> {
        self.io_timing_item(format_args!("      + {edge} VARIABLE {min} {max}\n"))
    }
    /// `+ RISE|FALL SLEWRATE min max`
    pub fn io_timing_slew_rate(&mut self, edge: RiseFall, min: i32, max: i32) -> DefResult<()> {
        self.io_timing_item(format_args!("      + {edge} SLEWRATE {min} {max}\n"))
    }
    /// `+ DRIVECELL`
    pub fn io_timing_drive_cell(&mut self, cell: &DefDriveCell) -> DefResult<()> {
        self.call(DefSection::IoTiming)?;
        self.expect_state(&[DefState::IoTiming])?;
        self.nonempty(&cell.cell)?;
        self.check_data(cell.from_pin.is_none() || cell.to_pin.is_some())?;
        for p in cell.from_pin.iter().chain(cell.to_pin.iter()) {
            self.nonempty(p)?;
        }
        self.emit(format_args!("      + DRIVECELL {} ", cell.cell))?;
        if let Some(ref p) = cell.from_pin {
            self.emit(format_args!("FROMPIN {p} "))?;
        }
        if let Some(ref p) = cell.to_pin {
            self.emit(format_args!("TOPIN {p} "))?;
        }
        if let Some(n) = cell.parallel {
            self.emit(format_args!("PARALLEL {n} "))?;
        }
        Ok(())
    }
    /// `+ CAPACITANCE`
    pub fn io_timing_capacitance(&mut self, cap: f64) -> DefResult<()> {
        self.io_timing_item(format_args!("      + CAPACITANCE {}", fmt_g(cap)))
    }
    fn io_timing_item(&mut self, args: std::fmt::Arguments) -> DefResult<()> {
        self.call(DefSection::IoTiming)?;
        self.expect_state(&[DefState::IoTiming])?;
        self.emit(args)
    }
    /// Close `IOTIMINGS`
    pub fn end_io_timings(&mut self) -> DefResult<()> {
        self.call(DefSection::IoTiming)?;
        self.check_close(&[DefState::IoTimingStart, DefState::IoTiming])?;
        let term = self.item_terminator(DefState::IoTimingStart, " ;\n");
        self.close_section(DefState::IoTimingEnd, format_args!("{term}END IOTIMINGS\n\n"))
    }

    /// Open `SCANCHAINS` with `count` chains. Requires `NETS`.
    pub fn start_scan_chains(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::ScanChain)?;
        self.check_open(DefSection::ScanChain)?;
        self.check(
            self.session.written.contains(&DefSection::Net),
            DefStatus::BadOrder,
        )?;
        self.open_section(
            count,
            DefState::ScanChainStart,
            format_args!("SCANCHAINS {count} ;\n"),
        )
    }
    /// Begin scan chain `name`
    pub fn scan_chain(&mut self, name: &str) -> DefResult<()> {
        self.call(DefSection::ScanChain)?;
        self.expect_state(&[
            DefState::ScanChainStart,
            DefState::ScanChain,
            DefState::ScanFloating,
            DefState::ScanOrdered,
        ])?;
        self.nonempty(name)?;
        self.take_item()?;
        if self.session.state != DefState::ScanChainStart {
            self.emit(format_args!(" ;\n"))?;
        }
        self.emit(format_args!("   - {name}"))?;
        self.session.state = DefState::ScanChain;
        Ok(())
    }
    /// `+ COMMONSCANPINS`, with one or two pins
    pub fn scan_chain_common_pins(&mut self, pins: &[DefScanPin]) -> DefResult<()> {
        self.scan_chain_checks()?;
        self.check_data(!pins.is_empty() && pins.len() <= 2)?;
        for p in pins {
            self.nonempty(&p.pin)?;
        }
        self.emit(format_args!("\n      + COMMONSCANPINS"))?;
        self.scan_pins(pins)?;
        self.session.state = DefState::ScanChain;
        Ok(())
    }
    /// `+ PARTITION`, with optional maximum bit-count
    pub fn scan_chain_partition(&mut self, name: &str, max_bits: Option<i32>) -> DefResult<()> {
        self.scan_chain_checks()?;
        self.nonempty(name)?;
        self.emit(format_args!("\n      + PARTITION {name}"))?;
        if let Some(m) = max_bits {
            self.emit(format_args!(" MAXBITS {m}"))?;
        }
        self.session.state = DefState::ScanChain;
        Ok(())
    }
    /// `+ START` point, an instance or `PIN`, with optional pin
    pub fn scan_chain_start(&mut self, inst: &str, pin: Option<&str>) -> DefResult<()> {
        self.scan_chain_endpoint("START", inst, pin)
    }
    /// `+ STOP` point, an instance or `PIN`, with optional pin
    pub fn scan_chain_stop(&mut self, inst: &str, pin: Option<&str>) -> DefResult<()> {
        self.scan_chain_endpoint("STOP", inst, pin)
    }
    fn scan_chain_endpoint(&mut self, keyword: &str, inst: &str, pin: Option<&str>) -> DefResult<()> {
        self.scan_chain_checks()?;
        self.nonempty(inst)?;
        if let Some(p) = pin {
            self.nonempty(p)?;
        }
        self.emit(format_args!("\n      + {keyword} {inst}"))?;
        if let Some(p) = pin {
            self.emit(format_args!(" {p}"))?;
        }
        self.session.state = DefState::ScanChain;
        Ok(())
    }
    /// Entry of the chain's `+ FLOATING` list.
    /// The first consecutive entry opens the list.
    pub fn scan_chain_floating(&mut self, entry: &DefScanEntry) -> DefResult<()> {
        self.scan_chain_checks()?;
        self.scan_entry_checks(entry)?;
        if self.session.state == DefState::ScanFloating {
            self.emit(format_args!("\n         "))?;
        } else {
            self.emit(format_args!("\n      + FLOATING"))?;
        }
        self.emit(format_args!(" "))?;
        self.scan_entry(entry)?;
        self.session.state = DefState::ScanFloating;
        Ok(())
    }
    /// Entries of the chain's `+ ORDERED` list.
    /// Opening the list requires both `first` and `second`; continuations may omit `second`.
    pub fn scan_chain_ordered(
        &mut self,
        first: &DefScanEntry,
        second: Option<&DefScanEntry>,
    ) -> DefResult<()> {
        self.scan_chain_checks()?;
        let continuing = self.session.state == DefState::ScanOrdered;
        self.check_data(continuing || second.is_some())?;
        self.scan_entry_checks(first)?;
        if let Some(e) = second {
            self.scan_entry_checks(e)?;
        }
        if continuing {
            self.emit(format_args!("\n         "))?;
        } else {
            self.emit(format_args!("\n      + ORDERED"))?;
        }
        self.emit(format_args!(" "))?;
        self.scan_entry(first)?;
        if let Some(e) = second {
            self.emit(format_args!("\n          "))?;
            self.scan_entry(e)?;
        }
        self.session.state = DefState::ScanOrdered;
        Ok(())
    }
    fn scan_chain_checks(&mut self) -> DefResult<()> {
        self.call(DefSection::ScanChain)?;
        self.expect_state(&[
            DefState::ScanChain,
            DefState::ScanFloating,
            DefState::ScanOrdered,
        ])
    }
    fn scan_entry_checks(&self, entry: &DefScanEntry) -> DefResult<()> {
        self.nonempty(&entry.inst)?;
        self.check_data(entry.pins.len() <= 2)?;
        for p in entry.pins.iter() {
            self.nonempty(&p.pin)?;
        }
        Ok(())
    }
    fn scan_entry(&mut self, entry: &DefScanEntry) -> DefResult<()> {
        self.emit(format_args!("{}", entry.inst))?;
        self.scan_pins(&entry.pins)?;
        if let Some(b) = entry.bits {
            self.emit(format_args!(" ( BITS {b} )"))?;
        }
        Ok(())
    }
    fn scan_pins(&mut self, pins: &[DefScanPin]) -> DefResult<()> {
        for p in pins {
            self.emit(format_args!(" ( {} {} )", p.dir, p.pin))?;
        }
        Ok(())
    }
    /// Close `SCANCHAINS`
    pub fn end_scan_chains(&mut self) -> DefResult<()> {
        self.call(DefSection::ScanChain)?;
        self.check_close(&[
            DefState::ScanChainStart,
            DefState::ScanChain,
            DefState::ScanFloating,
            DefState::ScanOrdered,
        ])?;
        let term = self.item_terminator(DefState::ScanChainStart, " ;\n");
        self.close_section(DefState::ScanChainEnd, format_args!("{term}END SCANCHAINS\n\n"))
    }

    /// Open `CONSTRAINTS` with `count` entries. Retired at 5.4.
    pub fn start_constraints(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::Constraints)?;
        self.retired_at(&V5P4, DefSection::Constraints)?;
        self.check_open(DefSection::Constraints)?;
        self.open_section(
            count,
            DefState::ConstraintStart,
            format_args!("CONSTRAINTS {count} ;\n"),
        )
    }
    /// Begin an operand constraint
    pub fn constraint_operand(&mut self) -> DefResult<()> {
        self.call(DefSection::Constraints)?;
        self.expect_state(&[DefState::ConstraintStart, DefState::Constraint])?;
        self.take_item()?;
        self.emit(format_args!("   -"))?;
        self.session.sum_operands = 0;
        self.session.state = DefState::ConstraintOperand;
        Ok(())
    }
    /// `NET` operand
    pub fn constraint_operand_net(&mut self, net: &str) -> DefResult<()> {
        self.constraint_operand_checks()?;
        self.nonempty(net)?;
        self.sum_separator()?;
        self.emit(format_args!(" NET {net}"))
    }
    /// `PATH` operand, from `from_inst` `from_pin` to `to_inst` `to_pin`
    pub fn constraint_operand_path(
        &mut self,
        from_inst: &str,
        from_pin: &str,
        to_inst: &str,
        to_pin: &str,
    ) -> DefResult<()> {
        self.constraint_operand_checks()?;
        for s in [from_inst, from_pin, to_inst, to_pin] {
            self.nonempty(s)?;
        }
        self.sum_separator()?;
        self.emit(format_args!(
            " PATH {from_inst} {from_pin} {to_inst} {to_pin}"
        ))
    }
    /// Open a `SUM` of operands
    pub fn constraint_operand_sum(&mut self) -> DefResult<()> {
        self.call(DefSection::Constraints)?;
        self.expect_state(&[DefState::ConstraintOperand])?;
        self.emit(format_args!(" SUM ("))?;
        self.session.sum_operands = 0;
        self.session.state = DefState::ConstraintSum;
        Ok(())
    }
    /// Close the open `SUM`
    pub fn constraint_operand_sum_end(&mut self) -> DefResult<()> {
        self.call(DefSection::Constraints)?;
        self.expect_state(&[DefState::ConstraintSum])?;
        self.emit(format_args!(" )"))?;
        self.session.sum_operands = 0;
        self.session.state = DefState::ConstraintOperand;
        Ok(())
    }
    /// Timing limit of the open operand constraint
    pub fn constraint_operand_time(&mut self, tp: TimingType, time: i32) -> DefResult<()> {
        self.call(DefSection::Constraints)?;
        self.expect_state(&[DefState::ConstraintOperand])?;
        self.emit(format_args!(" + {tp} {time}"))
    }
    /// Terminate the open operand constraint
    pub fn constraint_operand_end(&mut self) -> DefResult<()> {
        self.call(DefSection::Constraints)?;
        self.expect_state(&[DefState::ConstraintOperand])?;
        self.emit(format_args!(" ;\n"))?;
        self.session.state = DefState::Constraint;
        Ok(())
    }
    fn constraint_operand_checks(&mut self) -> DefResult<()> {
        self.call(DefSection::Constraints)?;
        self.expect_state(&[DefState::ConstraintOperand, DefState::ConstraintSum])
    }
    /// Operands within a `SUM` are comma-separated
    fn sum_separator(&mut self) -> DefResult<()> {
        if self.session.sum_operands > 0 {
            self.emit(format_args!(" ,"))?;
        }
        if self.session.state == DefState::ConstraintSum {
            self.session.sum_operands += 1;
        }
        Ok(())
    }
    /// `WIREDLOGIC` constraint on `net`
    pub fn constraint_wired_logic(&mut self, net: &str, max_dist: i32) -> DefResult<()> {
        self.call(DefSection::Constraints)?;
        self.expect_state(&[DefState::ConstraintStart, DefState::Constraint])?;
        self.nonempty(net)?;
        self.take_item()?;
        self.emit(format_args!("   - WIREDLOGIC {net} MAXDIST {max_dist} ;\n"))?;
        self.session.state = DefState::Constraint;
        Ok(())
    }
    /// Close `CONSTRAINTS`
    pub fn end_constraints(&mut self) -> DefResult<()> {
        self.call(DefSection::Constraints)?;
        self.check_close(&[DefState::ConstraintStart, DefState::Constraint])?;
        self.close_section(DefState::ConstraintEnd, format_args!("END CONSTRAINTS\n\n"))
    }

    /// Open `GROUPS` with `count` groups
    pub fn start_groups(&mut self, count: usize) -> DefResult<()> {
        self.call(DefSection::Group)?;
        self.check_open(DefSection::Group)?;
        self.open_section(count, DefState::GroupStart, format_args!("GROUPS {count} ;\n"))
    }
    /// Group `name`, of component-name patterns `members`
    pub fn group(&mut self, name: &str, members: &[&str]) -> DefResult<()> {
        self.call(DefSection::Group)?;
        self.expect_state(&[DefState::GroupStart, DefState::Group])?;
        self.nonempty(name)?;
        self.check_data(!members.is_empty())?;
        for m in members {
            self.nonempty(m)?;
        }
        self.take_item()?;
        if self.session.state == DefState::Group {
            self.emit(format_args!(" ;\n"))?;
        }
        self.emit(format_args!("   - {name}"))?;
        for m in members {
            self.emit(format_args!(" {m}"))?;
        }
        self.session.state = DefState::Group;
        Ok(())
    }
    /// `+ SOFT` limits of the current group, one to three of them
    pub fn group_soft(&mut self, limits: &[(GroupSoftType, f64)]) -> DefResult<()> {
        self.call(DefSection::Group)?;
        self.expect_state(&[DefState::Group])?;
        self.check_data(!limits.is_empty() && limits.len() <= 3)?;
        self.emit(format_args!("\n     + SOFT"))?;
        for (tp, val) in limits {
            self.emit(format_args!(" {tp} {}", fmt_g(*val)))?;
        }
        Ok(())
    }
    /// `+ REGION` of the current group
    pub fn group_region(&mut self, region: &DefGroupRegion) -> DefResult<()> {
        self.call(DefSection::Group)?;
        self.expect_state(&[DefState::Group])?;
        match region {
            DefGroupRegion::Named(name) => {
                self.nonempty(name)?;
                self.emit(format_args!("\n      + REGION {name}"))
            }
            DefGroupRegion::Rect(rect) => self.emit(format_args!("\n      + REGION {rect}")),
        }
    }
    /// Close `GROUPS`
    pub fn end_groups(&mut self) -> DefResult<()> {
        self.call(DefSection::Group)?;
        self.check_close(&[DefState::GroupStart, DefState::Group])?;
        let term = self.item_terminator(DefState::GroupStart, " ;\n");
        self.close_section(DefState::GroupEnd, format_args!("{term}END GROUPS\n\n"))
    }
}
