//!
//! # Def Writer Errors & Diagnostics
//!

// Crates.io Imports
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local imports
use crate::utils::{enumstr, EnumStr, UnknownKeyword};

enumstr!(
    /// # Writer Status Codes
    ///
    /// Outcome categories of every writer call.
    /// Each carries the integer code used by legacy DEF-writing tools, see [DefStatus::code].
    DefStatus {
        Ok: "OK",
        Uninitialized: "UNINITIALIZED",
        BadOrder: "BAD_ORDER",
        BadData: "BAD_DATA",
        AlreadyDefined: "ALREADY_DEFINED",
        WrongVersion: "WRONG_VERSION",
        Obsolete: "OBSOLETE",
        TooManyStatements: "TOO_MANY_STATEMENTS",
    }
);
impl DefStatus {
    /// Legacy integer status code
    pub fn code(&self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Uninitialized => 1,
            Self::BadOrder => 2,
            Self::BadData => 3,
            Self::AlreadyDefined => 4,
            Self::WrongVersion => 5,
            Self::Obsolete => 6,
            Self::TooManyStatements => 7,
        }
    }
}

enumstr!(
    /// # Diagnostic Section Names
    ///
    /// The grammar construct a writer call belongs to.
    /// Reported in diagnostics, and used to track which sections have been written.
    DefSection {
        Uninitialized: "UNINITIALIZED",
        Initialize: "INITIALIZE",
        Version: "VERSION",
        CaseSensitive: "CASESENSITIVE",
        BusBit: "BUSBIT",
        Divider: "DIVIDER",
        Design: "DESIGN",
        Technology: "TECHNOLOGY",
        Array: "ARRAY",
        Floorplan: "FLOORPLAN",
        Units: "UNITS",
        History: "HISTORY",
        PropertyDefinitions: "PROPERTYDEFINITIONS",
        DieArea: "DIEAREA",
        Row: "ROW",
        Tracks: "TRACKS",
        GcellGrid: "GCELLGRID",
        DefaultCap: "DEFAULTCAP",
        CanPlace: "CANPLACE",
        CannotOccupy: "CANNOTOCCUPY",
        Via: "VIA",
        Region: "REGION",
        ComponentMaskShift: "COMPONENTMASKSHIFT",
        Component: "COMPONENT",
        Pin: "PIN",
        PinProperty: "PINPROPERTY",
        Blockage: "BLOCKAGE",
        BlockageLayer: "BLOCKAGE LAYER",
        BlockagePlacement: "BLOCKAGE PLACEMENT",
        Slot: "SLOT",
        Fill: "FILL",
        NonDefaultRule: "NONDEFAULTRULE",
        Styles: "STYLES",
        SpecialNet: "SNET",
        Path: "PATH",
        Shield: "SHIELD",
        Net: "NET",
        Subnet: "SUBNET",
        Noshield: "NOSHIELD",
        IoTiming: "IOTIMING",
        ScanChain: "SCANCHAIN",
        ScanFloating: "SCAN FLOATING",
        ScanOrdered: "SCAN ORDERED",
        Constraints: "CONSTRAINTS",
        Group: "GROUP",
        BeginExt: "BEGINEXT",
        DesignEnd: "DESIGN END",
    }
);

/// Render the one-line diagnostic for `status`, attributed to `section`.
/// For [DefStatus::Obsolete], `section` is expected to be the retired section.
pub fn diagnostic(status: DefStatus, section: DefSection) -> String {
    use DefStatus::*;
    match status {
        Ok => "No Error.".into(),
        Uninitialized => "Need to call init first.".into(),
        BadOrder => format!("{section} - Incorrect order of data."),
        BadData => format!("{section} - Invalid data."),
        AlreadyDefined => format!("{section} - Section is allowed to define only once."),
        WrongVersion => {
            format!("{section} - Not available in the declared DEF version.")
        }
        Obsolete => format!("{section} - is no longer valid in the declared DEF version."),
        TooManyStatements => {
            format!("{section} - More statements than declared in the section count.")
        }
    }
}

/// # Def Writer Error Type
#[derive(Debug)]
pub enum DefError {
    /// Recoverable status, attributed to a section.
    /// Nothing was written by the failing call.
    Status {
        status: DefStatus,
        section: DefSection,
    },
    /// Unrecoverable misuse. The writer is poisoned; every later call fails the same way.
    Fatal(String),
    /// Wrapped errors, generally from other crates
    Boxed(Box<dyn std::error::Error + Send + Sync>),
    /// String message-valued errors
    Str(String),
}
impl DefError {
    /// Status code of recoverable errors. `None` for all others.
    pub fn status(&self) -> Option<DefStatus> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
    /// Boolean indication of unrecoverable misuse
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}
impl From<crate::utils::ser::Error> for DefError {
    fn from(e: crate::utils::ser::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<std::io::Error> for DefError {
    fn from(e: std::io::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<UnknownKeyword> for DefError {
    /// Unknown keywords are content errors. The section is not known here.
    fn from(e: UnknownKeyword) -> Self {
        tracing::debug!("{}", e);
        Self::Status {
            status: DefStatus::BadData,
            section: DefSection::Uninitialized,
        }
    }
}
impl From<String> for DefError {
    fn from(e: String) -> Self {
        Self::Str(e)
    }
}
impl From<&str> for DefError {
    fn from(e: &str) -> Self {
        Self::Str(e.into())
    }
}
impl std::fmt::Display for DefError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::Status { status, section } => {
                write!(f, "{}", diagnostic(*status, *section))
            }
            Self::Fatal(msg) => write!(f, "FATAL: {}", msg),
            Self::Boxed(e) => std::fmt::Display::fmt(e, f),
            Self::Str(s) => f.write_str(s),
        }
    }
}
impl std::error::Error for DefError {}

/// Def21 Library-Wide Result Type
pub type DefResult<T> = Result<T, DefError>;
