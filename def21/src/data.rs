//!
//! # Def Writer Data Model
//!
//! Argument types for the [crate::DefWriter] emitters:
//! points and boxes, keyword enumerations, and builder-constructed records
//! for the constructs with many optional fields.
//!

// Crates.io Imports
use derive_builder::Builder;
use derive_more::{Add, AddAssign, Sub, SubAssign};
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local imports
use crate::utils::{enumstr, EnumStr};

///
/// # DefDecimal
///
/// Internal type alias for declared DEF versions.
/// Uses [rust_decimal](https://crates.io/crates/rust_decimal) internally,
/// so that comparisons like "at least 5.6" are exact.
///
pub type DefDecimal = rust_decimal::Decimal;

// Static short-hands for each DEF version with gated features
pub(crate) static V5P4: Lazy<DefDecimal> = Lazy::new(|| DefDecimal::new(54, 1));
pub(crate) static V5P6: Lazy<DefDecimal> = Lazy::new(|| DefDecimal::new(56, 1));
pub(crate) static V5P7: Lazy<DefDecimal> = Lazy::new(|| DefDecimal::new(57, 1));
pub(crate) static V5P8: Lazy<DefDecimal> = Lazy::new(|| DefDecimal::new(58, 1));

/// # Declared DEF Version
///
/// Written as `major.minor`. Minor revisions of two digits are hundredths,
/// i.e. `5.10` is 5.10 rather than 6.0, and sorts below 5.2.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefVersion {
    pub major: u32,
    pub minor: u32,
}
impl DefVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
    /// Decimal value used for version-gate comparisons
    pub fn decimal(&self) -> DefDecimal {
        if self.minor >= 10 {
            DefDecimal::new(i64::from(self.major) * 100 + i64::from(self.minor), 2)
        } else {
            DefDecimal::new(i64::from(self.major) * 10 + i64::from(self.minor), 1)
        }
    }
}
impl std::fmt::Display for DefVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// # Def Point
///
/// Integer-valued location, in database units.
#[derive(
    Clone, Copy, Default, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Add, AddAssign, Sub, SubAssign,
)]
pub struct DefPoint {
    pub x: i32,
    pub y: i32,
}
impl DefPoint {
    /// Create a new [DefPoint]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
    /// Real-valued coordinates, as consumed by the point formatter
    pub(crate) fn xy(&self) -> (f64, f64) {
        (f64::from(self.x), f64::from(self.y))
    }
}
impl std::fmt::Display for DefPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "( {} {} )", self.x, self.y)
    }
}

/// # Def Rectangle
///
/// Two-corner box, written as `( x0 y0 ) ( x1 y1 )`.
#[derive(Clone, Copy, Default, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefRect {
    pub p0: DefPoint,
    pub p1: DefPoint,
}
impl DefRect {
    /// Create a new [DefRect] from its four coordinates
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            p0: DefPoint::new(x0, y0),
            p1: DefPoint::new(x1, y1),
        }
    }
    /// Boolean indication of a lower-left to upper-right ordering
    pub fn is_ordered(&self) -> bool {
        self.p0.x <= self.p1.x && self.p0.y <= self.p1.y
    }
}
impl std::fmt::Display for DefRect {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.p0, self.p1)
    }
}

/// Convert integer points to the real-valued pairs the point formatter consumes
pub(crate) fn real_points(pts: &[DefPoint]) -> Vec<(f64, f64)> {
    pts.iter().map(DefPoint::xy).collect()
}

/// # Two-dimensional Repetition
///
/// `DO nx BY ny STEP sx sy` arrays of rows, placement sites, and vias.
#[derive(Clone, Copy, Default, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefRepeat {
    pub num_x: i32,
    pub num_y: i32,
    pub step_x: i32,
    pub step_y: i32,
}
impl DefRepeat {
    pub fn new(num_x: i32, num_y: i32, step_x: i32, step_y: i32) -> Self {
        Self {
            num_x,
            num_y,
            step_x,
            step_y,
        }
    }
}

enumstr!(
    /// # On/Off Switch
    OnOff {
        On: "ON",
        Off: "OFF",
    }
);
enumstr!(
    /// # Orientations
    ///
    /// Legacy integer codes 0 through 7 map, in order, to
    /// N, W, S, E, FN, FW, FS, FE. See [Orientation::from_code].
    Orientation {
        N: "N",
        W: "W",
        S: "S",
        E: "E",
        FN: "FN",
        FW: "FW",
        FS: "FS",
        FE: "FE",
    }
);
impl Orientation {
    /// Create from a legacy integer code. Returns `None` outside 0..=7.
    pub fn from_code(code: i32) -> Option<Self> {
        use Orientation::*;
        match code {
            0 => Some(N),
            1 => Some(W),
            2 => Some(S),
            3 => Some(E),
            4 => Some(FN),
            5 => Some(FW),
            6 => Some(FS),
            7 => Some(FE),
            _ => None,
        }
    }
    /// Legacy integer code
    pub fn code(&self) -> i32 {
        *self as i32
    }
}
impl Default for Orientation {
    fn default() -> Self {
        Self::N
    }
}
enumstr!(
    /// # Track & Grid Directions
    TrackDirection {
        X: "X",
        Y: "Y",
    }
);
enumstr!(
    /// # Property-Definition Object Types
    PropObjectType {
        Design: "DESIGN",
        Component: "COMPONENT",
        Net: "NET",
        SpecialNet: "SPECIALNET",
        Group: "GROUP",
        Row: "ROW",
        ComponentPin: "COMPONENTPIN",
        Region: "REGION",
        NonDefaultRule: "NONDEFAULTRULE",
    }
);
enumstr!(
    /// # Region Types
    RegionType {
        Fence: "FENCE",
        Guide: "GUIDE",
    }
);
enumstr!(
    /// # Component & Net Sources
    NetSource {
        Netlist: "NETLIST",
        Dist: "DIST",
        User: "USER",
        Timing: "TIMING",
        Test: "TEST",
    }
);
enumstr!(
    /// # Placement Statuses
    PlacementStatus {
        Unplaced: "UNPLACED",
        Cover: "COVER",
        Fixed: "FIXED",
        Placed: "PLACED",
    }
);
enumstr!(
    /// # Pin Directions
    PinDirection {
        Input: "INPUT",
        Output: "OUTPUT",
        Inout: "INOUT",
        Feedthru: "FEEDTHRU",
    }
);
enumstr!(
    /// # Signal Uses
    /// Shared by pins, nets, and special nets.
    NetUse {
        Signal: "SIGNAL",
        Power: "POWER",
        Ground: "GROUND",
        Clock: "CLOCK",
        Tieoff: "TIEOFF",
        Analog: "ANALOG",
        Scan: "SCAN",
        Reset: "RESET",
    }
);
enumstr!(
    /// # Pin Antenna Statements
    PinAntennaKind {
        PartialMetalArea: "ANTENNAPINPARTIALMETALAREA",
        PartialMetalSideArea: "ANTENNAPINPARTIALMETALSIDEAREA",
        PartialCutArea: "ANTENNAPINPARTIALCUTAREA",
        DiffArea: "ANTENNAPINDIFFAREA",
        GateArea: "ANTENNAPINGATEAREA",
        MaxAreaCar: "ANTENNAPINMAXAREACAR",
        MaxSideAreaCar: "ANTENNAPINMAXSIDEAREACAR",
        MaxCutCar: "ANTENNAPINMAXCUTCAR",
    }
);
impl PinAntennaKind {
    /// Boolean indication that the statement must name a layer
    pub fn requires_layer(&self) -> bool {
        matches!(self, Self::MaxAreaCar | Self::MaxSideAreaCar | Self::MaxCutCar)
    }
}
enumstr!(
    /// # Routing Path Statuses
    ///
    /// `NEW` continues the routing of the current net.
    /// `SHIELD` is only meaningful for special nets, and `NOSHIELD` only for nets.
    PathType {
        New: "NEW",
        Fixed: "FIXED",
        Cover: "COVER",
        Routed: "ROUTED",
        Shield: "SHIELD",
        Noshield: "NOSHIELD",
    }
);
enumstr!(
    /// # Special Wire Shapes
    WireShape {
        Ring: "RING",
        Stripe: "STRIPE",
        Followpin: "FOLLOWPIN",
        Iowire: "IOWIRE",
        Corewire: "COREWIRE",
        Blockwire: "BLOCKWIRE",
        Fillwire: "FILLWIRE",
        Blockagewire: "BLOCKAGEWIRE",
        Padring: "PADRING",
        Blockring: "BLOCKRING",
        Drcfill: "DRCFILL",
        Fillwireopc: "FILLWIREOPC",
    }
);
impl WireShape {
    /// Boolean indication that the shape may be used for shield wiring
    pub fn is_shield_shape(&self) -> bool {
        !matches!(self, Self::Padring | Self::Blockring | Self::Fillwireopc)
    }
}
enumstr!(
    /// # Scan-Chain Pin Directions
    ScanPinDir {
        In: "IN",
        Out: "OUT",
    }
);
enumstr!(
    /// # Rise/Fall Edges
    RiseFall {
        Rise: "RISE",
        Fall: "FALL",
    }
);
enumstr!(
    /// # Constraint Timing Types
    TimingType {
        RiseMax: "RISEMAX",
        FallMax: "FALLMAX",
        RiseMin: "RISEMIN",
        FallMin: "FALLMIN",
    }
);
enumstr!(
    /// # Group Soft-Constraint Types
    GroupSoftType {
        MaxHalfPerimeter: "MAXHALFPERIMETER",
        MaxX: "MAXX",
        MaxY: "MAXY",
    }
);

///
/// # Session Header
///
/// Design-level statements written by [crate::DefWriter::init].
/// Loadable from YAML, JSON, or TOML via [crate::utils::SerdeFile].
///
#[derive(Default, Clone, Builder, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[builder(pattern = "owned", setter(into))]
pub struct DefHeader {
    /// Design Name
    pub design: String,
    /// Declared Version. No `VERSION` statement is written when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub version: Option<DefVersion>,
    /// Names Case Sensitivity. Required before version 5.6; ignored thereafter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub names_case_sensitive: Option<OnOff>,
    /// Hierarchy Divider Character
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub divider_char: Option<String>,
    /// Bus-Bit Delimiter Characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub bus_bit_chars: Option<String>,
    /// Technology Name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub technology: Option<String>,
    /// Array Name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub array: Option<String>,
    /// Floorplan Name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub floorplan: Option<String>,
    /// Database Units per Micron
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub units: Option<u32>,
}
impl crate::utils::SerdeFile for DefHeader {}

/// Database-unit values accepted for `UNITS DISTANCE MICRONS`
pub const DEF_UNITS: [u32; 9] = [100, 200, 1000, 2000, 4000, 8000, 10000, 16000, 20000];

/// # Placement
///
/// Status, location, and orientation of a placed component, pin, or virtual pin.
/// The location and orientation of an [PlacementStatus::Unplaced] placement are not written.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefPlacement {
    pub status: PlacementStatus,
    pub origin: DefPoint,
    pub orient: Orientation,
}
impl DefPlacement {
    pub fn new(status: PlacementStatus, origin: DefPoint, orient: Orientation) -> Self {
        Self {
            status,
            origin,
            orient,
        }
    }
    /// Unplaced, with no meaningful location
    pub fn unplaced() -> Self {
        Self::new(PlacementStatus::Unplaced, DefPoint::default(), Orientation::N)
    }
}

/// # Foreign Cell Reference
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefForeign {
    pub name: String,
    pub origin: DefPoint,
    pub orient: Orientation,
}

/// # Component Region
/// Either a named region, or an explicit box.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum DefComponentRegion {
    Named(String),
    Rect(DefRect),
}

///
/// # Component Statement
///
#[derive(Clone, Builder, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[builder(pattern = "owned", setter(into))]
pub struct DefComponent {
    /// Instance Name
    pub name: String,
    /// Master (Cell) Name
    pub master: String,
    /// Connected Net Names
    #[builder(default)]
    pub nets: Vec<String>,
    /// Electrically-Equivalent Master
    #[builder(default, setter(strip_option))]
    pub eeq_master: Option<String>,
    /// Generator Name & Optional Parameters
    #[builder(default, setter(strip_option))]
    pub generate: Option<(String, Option<String>)>,
    /// Source
    #[builder(default, setter(strip_option))]
    pub source: Option<NetSource>,
    /// Foreign Cell References
    #[builder(default)]
    pub foreigns: Vec<DefForeign>,
    /// Placement
    #[builder(default, setter(strip_option))]
    pub placement: Option<DefPlacement>,
    /// Placement Weight
    #[builder(default, setter(strip_option))]
    pub weight: Option<f64>,
    /// Region Membership
    #[builder(default, setter(strip_option))]
    pub region: Option<DefComponentRegion>,
}

///
/// # Pin Statement
///
#[derive(Clone, Builder, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[builder(pattern = "owned", setter(into))]
pub struct DefPin {
    /// Pin Name
    pub name: String,
    /// Net Name
    pub net: String,
    /// Special-Net Pin
    #[builder(default)]
    pub special: bool,
    /// Direction
    #[builder(default, setter(strip_option))]
    pub direction: Option<PinDirection>,
    /// Use
    #[builder(default, setter(strip_option))]
    pub usage: Option<NetUse>,
    /// Placement. Must not be [PlacementStatus::Unplaced].
    #[builder(default, setter(strip_option))]
    pub placement: Option<DefPlacement>,
    /// Single-Layer Geometry, in the pre-5.6 style
    #[builder(default, setter(strip_option))]
    pub layer: Option<(String, DefRect)>,
}

///
/// # Pin Shape Layer & Options
///
/// Shared by pin and pin-port `LAYER` and `POLYGON` statements.
/// `spacing` and `design_rule_width` are mutually exclusive.
///
#[derive(Clone, Default, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefPinShape {
    pub layer: String,
    pub mask: Option<i32>,
    pub spacing: Option<i32>,
    pub design_rule_width: Option<i32>,
}
impl DefPinShape {
    /// Create a [DefPinShape] on `layer`, with no options
    pub fn new(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            ..Default::default()
        }
    }
}

///
/// # Virtual Pin
///
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefVpin {
    pub name: String,
    pub layer: Option<String>,
    pub rect: DefRect,
    /// Placement. Must not be [PlacementStatus::Unplaced].
    pub placement: Option<DefPlacement>,
}

///
/// # Via-Rule Generated Via Parameters
///
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct DefViaRule {
    pub rule: String,
    pub cut_size: (f64, f64),
    pub bot_layer: String,
    pub cut_layer: String,
    pub top_layer: String,
    pub cut_spacing: (f64, f64),
    /// Bottom x & y, top x & y enclosures
    pub enclosure: (f64, f64, f64, f64),
}

///
/// # Non-Default Rule Layer
///
#[derive(Clone, Default, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefNdrLayer {
    pub layer: String,
    pub width: i32,
    pub diag_width: Option<i32>,
    pub spacing: Option<i32>,
    pub wire_ext: Option<i32>,
}

///
/// # IO-Timing Drive Cell
///
/// `from_pin` may only be given along with `to_pin`.
///
#[derive(Clone, Default, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefDriveCell {
    pub cell: String,
    pub from_pin: Option<String>,
    pub to_pin: Option<String>,
    pub parallel: Option<i32>,
}

///
/// # Scan-Chain Pin Reference
///
/// An instance pin's direction & name, written as `( IN pin )`.
///
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefScanPin {
    pub dir: ScanPinDir,
    pub pin: String,
}
impl DefScanPin {
    pub fn new(dir: ScanPinDir, pin: impl Into<String>) -> Self {
        Self {
            dir,
            pin: pin.into(),
        }
    }
}

///
/// # Scan-Chain List Entry
///
/// An instance, with optional IN and OUT pins, and optional bit-count.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefScanEntry {
    pub inst: String,
    pub pins: Vec<DefScanPin>,
    pub bits: Option<i32>,
}
impl DefScanEntry {
    pub fn new(inst: impl Into<String>) -> Self {
        Self {
            inst: inst.into(),
            ..Default::default()
        }
    }
}

/// # Group Region
/// Either a named region or an explicit box.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum DefGroupRegion {
    Named(String),
    Rect(DefRect),
}

/// # Net Path Layer Taper
/// Either the default taper rule, or a named non-default taper rule.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum DefTaper {
    Taper,
    Rule(String),
}
