//!
//! # Def Writer Module
//!
//! [DefWriter] is a streaming, call-per-construct DEF encoder.
//! Each emitter checks the writer's grammar position, the declared version,
//! and its own arguments, and only then writes its tokens.
//! A rejected call writes nothing, and leaves the writer's state unchanged.
//!
//! Emitters for each family of sections live in sibling modules,
//! each adding an `impl` block to [DefWriter].
//!

// Standard Lib Imports
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

// Local imports
use super::data::*;
use super::error::*;
use super::fmt::PointCursor;
use super::state::DefState;
use crate::utils::EnumStr;

/// Write DEF content produced by closure `f` to file `fname`.
/// The writer handed to `f` is uninitialized; `f` is responsible for the whole session.
pub fn save(
    fname: impl AsRef<Path>,
    f: impl FnOnce(&mut DefWriter) -> DefResult<()>,
) -> DefResult<()> {
    let file = std::io::BufWriter::new(std::fs::File::create(fname)?);
    let mut wr = DefWriter::new(file);
    f(&mut wr)?;
    wr.flush()
}
/// Write DEF content produced by closure `f` to a [String].
pub fn to_string(f: impl FnOnce(&mut DefWriter) -> DefResult<()>) -> DefResult<String> {
    let mut buf = Vec::new();
    {
        let mut wr = DefWriter::new(&mut buf);
        f(&mut wr)?;
    }
    String::from_utf8(buf).map_err(|e| DefError::Boxed(Box::new(e)))
}

/// Which of the two mutually exclusive initialization paths a writer took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InitMode {
    /// Header written in one go by [DefWriter::init]
    Normal,
    /// Bound by [DefWriter::init_cbk], content produced by callbacks
    Callback,
}

/// # Def Writer Session Register
///
/// Everything a [DefWriter] knows about "where we are".
#[derive(Debug)]
pub(crate) struct DefWriterSession {
    /// Grammar position
    pub(crate) state: DefState,
    /// Section of the active (or most recent) call, for diagnostics
    pub(crate) active: DefSection,
    /// Retired section named by the most recent [DefStatus::Obsolete]
    pub(crate) obsolete: Option<DefSection>,
    /// Declared version
    pub(crate) version: DefDecimal,
    /// Initialization path taken, if any
    pub(crate) mode: Option<InitMode>,
    /// Set after fatal misuse
    pub(crate) poisoned: bool,
    /// Items remaining in the open section
    pub(crate) counter: usize,
    /// Item count of the open bracket, for line wrapping
    pub(crate) wrap: usize,
    /// Last point of the open drawing bracket
    pub(crate) cursor: PointCursor,
    /// Header singletons written, and bracketed sections closed
    pub(crate) written: HashSet<DefSection>,
    /// Via: pattern name or via rule given
    pub(crate) via_has_value: bool,
    /// Component: halo given
    pub(crate) halo: bool,
    /// Blockage layer: spacing or design-rule width given
    pub(crate) blockage_sd: bool,
    /// Blockage layer: slots or fills given
    pub(crate) blockage_sf: bool,
    /// Blockage placement: pushdown, soft, or partial given
    pub(crate) blockage_sp: bool,
    /// Blockage: the open item is a placement blockage, rather than a layer blockage
    pub(crate) blockage_place: bool,
    /// Fill: the open item is a via, rather than a layer
    pub(crate) fill_via: bool,
    /// Special net: the open path is a `SHIELD` path
    pub(crate) shield_path: bool,
    /// Net: a subnet is open
    pub(crate) in_subnet: bool,
    /// Constraint: operands written in the open sum
    pub(crate) sum_operands: usize,
    /// Design name, for logging
    pub(crate) design: Option<String>,
}
impl Default for DefWriterSession {
    fn default() -> Self {
        Self {
            state: DefState::Uninitialized,
            active: DefSection::Uninitialized,
            obsolete: None,
            version: *V5P7,
            mode: None,
            poisoned: false,
            counter: 0,
            wrap: 0,
            cursor: PointCursor::default(),
            written: HashSet::new(),
            via_has_value: false,
            halo: false,
            blockage_sd: false,
            blockage_sf: false,
            blockage_sp: false,
            blockage_place: false,
            fill_via: false,
            shield_path: false,
            in_subnet: false,
            sum_operands: 0,
            design: None,
        }
    }
}

/// Line-counting wrapper over the write destination
struct LineSink<'wr> {
    dest: Box<dyn Write + 'wr>,
    lines: usize,
}
impl Write for LineSink<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.dest.write(buf)?;
        self.lines += buf[..n].iter().filter(|b| **b == b'\n').count();
        Ok(n)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        self.dest.flush()
    }
}

/// # Def Writer
///
/// Owns one output stream and one session.
/// Independent writers share no state, and may live on separate threads.
pub struct DefWriter<'wr> {
    /// Write Destination
    dest: LineSink<'wr>,
    /// Session State
    pub(crate) session: DefWriterSession,
}
impl<'wr> DefWriter<'wr> {
    /// Create a new [DefWriter] to destination `dest`.
    /// Nothing is written until one of [DefWriter::init] or [DefWriter::init_cbk].
    pub fn new(dest: impl Write + 'wr) -> Self {
        Self {
            dest: LineSink {
                dest: Box::new(dest),
                lines: 0,
            },
            session: DefWriterSession::default(),
        }
    }

    /// Initialize the session and write the design header.
    ///
    /// Fails with [DefStatus::BadData] for an empty design name, unsupported units,
    /// or a pre-5.6 version without names-case-sensitivity.
    /// Fatal if the writer was already bound by [DefWriter::init_cbk].
    pub fn init(&mut self, hdr: &DefHeader) -> DefResult<()> {
        self.begin_init(InitMode::Normal)?;
        let version = hdr.version.map(|v| v.decimal()).unwrap_or(*V5P7);
        let case = if version < *V5P6 {
            match hdr.names_case_sensitive {
                Some(c) => Some(c),
                None => return self.fail(DefStatus::BadData),
            }
        } else {
            if hdr.names_case_sensitive.is_some() {
                tracing::debug!("NAMESCASESENSITIVE is not written for versions 5.6 and later");
            }
            None
        };
        self.nonempty(&hdr.design)?;
        for s in [&hdr.divider_char, &hdr.bus_bit_chars, &hdr.technology, &hdr.array, &hdr.floorplan] {
            if let Some(s) = s {
                self.nonempty(s)?;
            }
        }
        if let Some(u) = hdr.units {
            self.check(DEF_UNITS.contains(&u), DefStatus::BadData)?;
        }

        if let Some(v) = hdr.version {
            self.emit(format_args!("VERSION {v} ;\n"))?;
        }
        if let Some(c) = case {
            self.emit(format_args!("NAMESCASESENSITIVE {c} ;\n"))?;
        }
        if let Some(ref d) = hdr.divider_char {
            self.emit(format_args!("DIVIDERCHAR \"{d}\" ;\n"))?;
        }
        if let Some(ref b) = hdr.bus_bit_chars {
            self.emit(format_args!("BUSBITCHARS \"{b}\" ;\n"))?;
        }
        self.emit(format_args!("DESIGN {} ;\n", hdr.design))?;
        if let Some(ref t) = hdr.technology {
            self.emit(format_args!("TECHNOLOGY {t} ;\n"))?;
        }
        if let Some(ref a) = hdr.array {
            self.emit(format_args!("ARRAY {a} ;\n"))?;
        }
        if let Some(ref f) = hdr.floorplan {
            self.emit(format_args!("FLOORPLAN {f} ;\n"))?;
        }
        if let Some(u) = hdr.units {
            self.emit(format_args!("UNITS DISTANCE MICRONS {u} ;\n"))?;
        }

        use DefSection::*;
        let s = &mut self.session;
        s.mode = Some(InitMode::Normal);
        s.version = version;
        s.state = DefState::Design;
        s.design = Some(hdr.design.clone());
        s.written.extend([Version, CaseSensitive, BusBit, Divider, Design, Technology, Array, Floorplan, Units]);
        tracing::info!(design = %hdr.design, version = %version, "DEF writer initialized");
        Ok(())
    }
    /// Bind the writer for callback-driven content, without writing anything.
    /// Fatal if the writer was already initialized by [DefWriter::init].
    pub fn init_cbk(&mut self) -> DefResult<()> {
        self.begin_init(InitMode::Callback)?;
        self.session.mode = Some(InitMode::Callback);
        self.session.state = DefState::Init;
        tracing::info!("DEF writer bound for callbacks");
        Ok(())
    }
    /// Shared checks of the two initialization paths
    fn begin_init(&mut self, mode: InitMode) -> DefResult<()> {
        self.alive()?;
        self.session.active = DefSection::Initialize;
        match self.session.mode {
            None => Ok(()),
            Some(m) if m == mode => self.fail(DefStatus::BadOrder),
            Some(m) => {
                let msg = format!(
                    "{:?} initialization requested on a writer already initialized as {:?}",
                    mode, m
                );
                self.poison(msg)
            }
        }
    }
    /// Write the `VERSION` statement, and declare the version for all later gating.
    /// Only valid directly after [DefWriter::init_cbk].
    pub fn version(&mut self, major: u32, minor: u32) -> DefResult<()> {
        self.call(DefSection::Version)?;
        self.expect_state(&[DefState::Init])?;
        let v = DefVersion::new(major, minor);
        self.emit(format_args!("VERSION {v} ;\n"))?;
        self.session.version = v.decimal();
        self.session.written.insert(DefSection::Version);
        self.session.state = DefState::Version;
        Ok(())
    }
    /// `NAMESCASESENSITIVE`. Retired at 5.6.
    pub fn case_sensitive(&mut self, val: OnOff) -> DefResult<()> {
        self.call(DefSection::CaseSensitive)?;
        self.retired_at(&V5P6, DefSection::CaseSensitive)?;
        self.header_statement(DefSection::CaseSensitive)?;
        self.emit(format_args!("NAMESCASESENSITIVE {val} ;\n"))?;
        self.header_written(DefState::CaseSensitive);
        Ok(())
    }
    /// `BUSBITCHARS`
    pub fn bus_bit_chars(&mut self, chars: &str) -> DefResult<()> {
        self.call(DefSection::BusBit)?;
        self.header_statement(DefSection::BusBit)?;
        self.nonempty(chars)?;
        self.emit(format_args!("BUSBITCHARS \"{chars}\" ;\n"))?;
        self.header_written(DefState::BusBit);
        Ok(())
    }
    /// `DIVIDERCHAR`
    pub fn divider_char(&mut self, ch: &str) -> DefResult<()> {
        self.call(DefSection::Divider)?;
        self.header_statement(DefSection::Divider)?;
        self.nonempty(ch)?;
        self.emit(format_args!("DIVIDERCHAR \"{ch}\" ;\n"))?;
        self.header_written(DefState::Divider);
        Ok(())
    }
    /// `DESIGN`
    pub fn design_name(&mut self, name: &str) -> DefResult<()> {
        self.call(DefSection::Design)?;
        self.header_statement(DefSection::Design)?;
        self.nonempty(name)?;
        self.emit(format_args!("DESIGN {name} ;\n"))?;
        self.session.design = Some(name.to_string());
        self.header_written(DefState::Design);
        Ok(())
    }
    /// `TECHNOLOGY`
    pub fn technology(&mut self, name: &str) -> DefResult<()> {
        self.call(DefSection::Technology)?;
        self.header_statement(DefSection::Technology)?;
        self.nonempty(name)?;
        self.emit(format_args!("TECHNOLOGY {name} ;\n"))?;
        self.header_written(DefState::Technology);
        Ok(())
    }
    /// `ARRAY`
    pub fn array(&mut self, name: &str) -> DefResult<()> {
        self.call(DefSection::Array)?;
        self.header_statement(DefSection::Array)?;
        self.nonempty(name)?;
        self.emit(format_args!("ARRAY {name} ;\n"))?;
        self.header_written(DefState::Array);
        Ok(())
    }
    /// `FLOORPLAN`
    pub fn floorplan(&mut self, name: &str) -> DefResult<()> {
        self.call(DefSection::Floorplan)?;
        self.header_statement(DefSection::Floorplan)?;
        self.nonempty(name)?;
        self.emit(format_args!("FLOORPLAN {name} ;\n"))?;
        self.header_written(DefState::Floorplan);
        Ok(())
    }
    /// `UNITS DISTANCE MICRONS`. Must be one of [DEF_UNITS].
    pub fn units(&mut self, units: u32) -> DefResult<()> {
        self.call(DefSection::Units)?;
        self.header_statement(DefSection::Units)?;
        self.check(DEF_UNITS.contains(&units), DefStatus::BadData)?;
        self.emit(format_args!("UNITS DISTANCE MICRONS {units} ;\n"))?;
        self.header_written(DefState::Units);
        Ok(())
    }
    /// `HISTORY`. Repeatable, anywhere at design level.
    pub fn history(&mut self, text: &str) -> DefResult<()> {
        self.call(DefSection::History)?;
        self.expect_design_level()?;
        self.nonempty(text)?;
        self.close_row()?;
        self.emit(format_args!("HISTORY {text} ;\n"))?;
        self.session.state = DefState::History;
        Ok(())
    }
    /// Write `END DESIGN` and finish the session.
    /// Only [DefWriter::current_line_number] remains meaningful afterward.
    pub fn end(&mut self) -> DefResult<()> {
        self.call(DefSection::DesignEnd)?;
        self.expect_design_level()?;
        self.close_row()?;
        self.emit(format_args!("END DESIGN\n\n"))?;
        self.session.state = DefState::Done;
        self.dest.flush()?;
        tracing::info!(
            design = self.session.design.as_deref().unwrap_or(""),
            lines = self.dest.lines,
            "DEF design written"
        );
        Ok(())
    }

    /// Write a `#`-prefixed comment line
    pub fn add_comment(&mut self, text: &str) -> DefResult<()> {
        self.text_checks()?;
        self.emit(format_args!("# {text}\n"))
    }
    /// Write a three-space indent, for custom syntax inside extension blocks
    pub fn add_indent(&mut self) -> DefResult<()> {
        self.text_checks()?;
        self.emit(format_args!("   "))
    }
    /// Write a newline
    pub fn new_line(&mut self) -> DefResult<()> {
        self.text_checks()?;
        self.emit(format_args!("\n"))
    }
    /// Number of lines written so far
    pub fn current_line_number(&self) -> usize {
        self.dest.lines
    }
    /// Current grammar position
    pub fn state(&self) -> DefState {
        self.session.state
    }
    /// Declared version
    pub fn def_version(&self) -> DefDecimal {
        self.session.version
    }
    /// Write the one-line diagnostic for `status` to the destination.
    /// Attributed to the most recent call's section,
    /// or for [DefStatus::Obsolete], to the retired section.
    pub fn print_error(&mut self, status: DefStatus) -> DefResult<()> {
        self.alive()?;
        self.check(self.session.state != DefState::Done, DefStatus::BadOrder)?;
        let section = match status {
            DefStatus::Obsolete => self.session.obsolete.unwrap_or(self.session.active),
            _ => self.session.active,
        };
        let msg = diagnostic(status, section);
        self.emit(format_args!("{msg}\n"))
    }
    /// Parse keyword `txt` into enumeration `T`.
    /// Failures are [DefStatus::BadData], attributed to the most recent call's section.
    pub fn parse_keyword<T: EnumStr>(&self, txt: &str) -> DefResult<T> {
        match T::from_str(txt) {
            Some(t) => Ok(t),
            None => self.fail(DefStatus::BadData),
        }
    }
    /// Flush the destination
    pub fn flush(&mut self) -> DefResult<()> {
        self.dest.flush()?;
        Ok(())
    }

    // Shared call-checking helpers

    /// Start a call of section `section`: check for poisoning and initialization,
    /// and note the section for diagnostics.
    pub(crate) fn call(&mut self, section: DefSection) -> DefResult<()> {
        self.alive()?;
        self.session.active = section;
        self.initialized()
    }
    fn alive(&self) -> DefResult<()> {
        if self.session.poisoned {
            return Err(DefError::Fatal(
                "DEF writer is unusable after an initialization conflict".into(),
            ));
        }
        Ok(())
    }
    /// Free-form text is legal anywhere between init and `END DESIGN`
    fn text_checks(&self) -> DefResult<()> {
        self.alive()?;
        self.initialized()?;
        self.check(self.session.state != DefState::Done, DefStatus::BadOrder)
    }
    fn initialized(&self) -> DefResult<()> {
        if self.session.state == DefState::Uninitialized {
            let status = DefStatus::Uninitialized;
            tracing::warn!(%status, "DEF writer call before init");
            return Err(DefError::Status {
                status,
                section: DefSection::Uninitialized,
            });
        }
        Ok(())
    }
    /// Poison the writer, and produce the corresponding fatal error
    fn poison<T>(&mut self, msg: String) -> DefResult<T> {
        tracing::error!("{}", msg);
        self.session.poisoned = true;
        Err(DefError::Fatal(msg))
    }
    /// Fail with `status`, attributed to the active section
    pub(crate) fn fail<T>(&self, status: DefStatus) -> DefResult<T> {
        let section = self.session.active;
        tracing::warn!(%status, %section, state = ?self.session.state, "DEF writer call rejected");
        Err(DefError::Status { status, section })
    }
    /// Fail with `status` unless `cond`
    pub(crate) fn check(&self, cond: bool, status: DefStatus) -> DefResult<()> {
        if cond {
            Ok(())
        } else {
            self.fail(status)
        }
    }
    /// Fail with [DefStatus::BadData] unless `cond`
    pub(crate) fn check_data(&self, cond: bool) -> DefResult<()> {
        self.check(cond, DefStatus::BadData)
    }
    /// Required names and keywords must be non-empty
    pub(crate) fn nonempty(&self, s: &str) -> DefResult<()> {
        self.check_data(!s.is_empty())
    }
    /// Fail with [DefStatus::BadOrder] unless in one of `allowed`
    pub(crate) fn expect_state(&self, allowed: &[DefState]) -> DefResult<()> {
        self.check(allowed.contains(&self.session.state), DefStatus::BadOrder)
    }
    /// Fail with [DefStatus::BadOrder] if any section or bracket is open
    pub(crate) fn expect_design_level(&self) -> DefResult<()> {
        self.check(self.session.state.is_design_level(), DefStatus::BadOrder)
    }
    /// Fail with [DefStatus::WrongVersion] if the declared version is below `min`
    pub(crate) fn min_version(&self, min: &DefDecimal) -> DefResult<()> {
        self.check(self.session.version >= *min, DefStatus::WrongVersion)
    }
    /// Fail with [DefStatus::Obsolete], naming `section`,
    /// if the declared version is at or above `retired`
    pub(crate) fn retired_at(&mut self, retired: &DefDecimal, section: DefSection) -> DefResult<()> {
        if self.session.version >= *retired {
            self.session.obsolete = Some(section);
            let status = DefStatus::Obsolete;
            tracing::warn!(%status, %section, "DEF construct retired in the declared version");
            return Err(DefError::Status { status, section });
        }
        Ok(())
    }
    /// Header singletons: only in header position, and only once
    fn header_statement(&self, section: DefSection) -> DefResult<()> {
        self.check(self.session.state.is_header(), DefStatus::BadOrder)?;
        self.check(!self.session.written.contains(&section), DefStatus::BadOrder)
    }
    fn header_written(&mut self, state: DefState) {
        self.session.written.insert(state.section());
        self.session.state = state;
    }
    /// Consume one declared item of the open section.
    /// Must be the last check before writing.
    pub(crate) fn take_item(&mut self) -> DefResult<()> {
        if self.session.counter == 0 {
            return self.fail(DefStatus::TooManyStatements);
        }
        self.session.counter -= 1;
        Ok(())
    }
    /// Terminate a pending `ROW` statement, which has no terminator of its own
    pub(crate) fn close_row(&mut self) -> DefResult<()> {
        if self.session.state == DefState::Row {
            self.emit(format_args!(";\n\n"))?;
        }
        Ok(())
    }
    /// Check the opening of bracketed section `section`:
    /// at design level, and not previously written.
    pub(crate) fn check_open(&self, section: DefSection) -> DefResult<()> {
        self.expect_design_level()?;
        self.check(!self.session.written.contains(&section), DefStatus::AlreadyDefined)
    }
    /// Open a bracketed section of `count` items, after [DefWriter::check_open] and any
    /// section-specific checks have passed. Writes the section header `head`.
    pub(crate) fn open_section(
        &mut self,
        count: usize,
        start: DefState,
        head: std::fmt::Arguments,
    ) -> DefResult<()> {
        self.close_row()?;
        self.emit(head)?;
        self.session.counter = count;
        self.session.wrap = 0;
        self.session.state = start;
        tracing::debug!(section = %start.section(), count, "DEF section opened");
        Ok(())
    }
    /// Check the closing of the open bracketed section:
    /// one of `allowed` states, and every declared item written.
    pub(crate) fn check_close(&self, allowed: &[DefState]) -> DefResult<()> {
        self.expect_state(allowed)?;
        self.check(self.session.counter == 0, DefStatus::BadData)
    }
    /// Terminator `term` of the section's last item, or nothing if the section is still at `start`
    pub(crate) fn item_terminator(&self, start: DefState, term: &'static str) -> &'static str {
        if self.session.state == start {
            ""
        } else {
            term
        }
    }
    /// Close the open bracketed section, writing `tail`
    pub(crate) fn close_section(&mut self, end: DefState, tail: std::fmt::Arguments) -> DefResult<()> {
        self.emit(tail)?;
        let section = end.section();
        self.session.written.insert(section);
        self.session.state = end;
        tracing::debug!(%section, "DEF section closed");
        Ok(())
    }
    /// Advance the bracket's item count, and write `brk` on every fourth item
    pub(crate) fn wrap(&mut self, brk: &str) -> DefResult<()> {
        self.session.wrap += 1;
        if self.session.wrap & 3 == 0 {
            self.emit(format_args!("{brk}"))?;
        }
        Ok(())
    }
    /// Write formatted `args` to the destination
    pub(crate) fn emit(&mut self, args: std::fmt::Arguments) -> DefResult<()> {
        self.dest.write_fmt(args)?;
        Ok(())
    }
}
