//!
//! # Writer State Machine Positions
//!

// Local imports
use crate::error::DefSection;

/// # Writer State
///
/// Position of a [crate::DefWriter] within the DEF grammar.
/// Section-level states come in start/item/end groups;
/// nested brackets (paths, shields, subnets, via rules, blockage kinds, scan lists)
/// have states of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefState {
    Uninitialized,
    // Header
    Init,
    Version,
    CaseSensitive,
    BusBit,
    Divider,
    Design,
    Technology,
    Array,
    Floorplan,
    Units,
    History,
    // Property definitions
    PropDefStart,
    PropDef,
    PropDefEnd,
    // Floorplan statements
    DieArea,
    Row,
    Tracks,
    GcellGrid,
    DefaultCapStart,
    DefaultCap,
    DefaultCapEnd,
    CanPlace,
    CannotOccupy,
    // Vias
    ViaStart,
    Via,
    ViaViaRule,
    ViaOneEnd,
    ViaEnd,
    // Regions
    RegionStart,
    Region,
    RegionEnd,
    // Components
    ComponentMaskShift,
    ComponentStart,
    Component,
    ComponentEnd,
    // Pins
    PinStart,
    Pin,
    PinPort,
    PinEnd,
    PinPropStart,
    PinProp,
    PinPropEnd,
    // Special nets
    SnetStart,
    Snet,
    SnetOptions,
    SnetPathStart,
    SnetPath,
    SnetShield,
    SnetEndNet,
    SnetEnd,
    // Nets
    NetStart,
    Net,
    NetOptions,
    NetPathStart,
    NetPath,
    Subnet,
    Noshield,
    NetEndNet,
    NetEnd,
    // IO timings
    IoTimingStart,
    IoTiming,
    IoTimingEnd,
    // Scan chains
    ScanChainStart,
    ScanChain,
    ScanFloating,
    ScanOrdered,
    ScanChainEnd,
    // Constraints
    ConstraintStart,
    Constraint,
    ConstraintOperand,
    ConstraintSum,
    ConstraintEnd,
    // Groups
    GroupStart,
    Group,
    GroupEnd,
    // Blockages
    BlockageStart,
    BlockageLayer,
    BlockagePlace,
    BlockageRect,
    BlockageEnd,
    // Slots
    SlotStart,
    SlotLayer,
    SlotRect,
    SlotEnd,
    // Fills
    FillStart,
    FillLayer,
    FillLayerMask,
    FillLayerOpc,
    FillRect,
    FillVia,
    FillViaMask,
    FillViaOpc,
    FillEnd,
    // Non-default rules
    NdrStart,
    Ndr,
    NdrEnd,
    // Styles
    StylesStart,
    Styles,
    StylesEnd,
    // Extensions
    BeginExt,
    BeginExtEnd,
    // Terminal
    Done,
}
impl DefState {
    /// Section name reported for failures in this state
    pub fn section(&self) -> DefSection {
        use DefSection as S;
        use DefState::*;
        match self {
            Uninitialized => S::Uninitialized,
            Init => S::Initialize,
            Version => S::Version,
            CaseSensitive => S::CaseSensitive,
            BusBit => S::BusBit,
            Divider => S::Divider,
            Design => S::Design,
            Technology => S::Technology,
            Array => S::Array,
            Floorplan => S::Floorplan,
            Units => S::Units,
            History => S::History,
            PropDefStart | PropDef | PropDefEnd => S::PropertyDefinitions,
            DieArea => S::DieArea,
            Row => S::Row,
            Tracks => S::Tracks,
            GcellGrid => S::GcellGrid,
            DefaultCapStart | DefaultCap | DefaultCapEnd => S::DefaultCap,
            CanPlace => S::CanPlace,
            CannotOccupy => S::CannotOccupy,
            ViaStart | Via | ViaViaRule | ViaOneEnd | ViaEnd => S::Via,
            RegionStart | Region | RegionEnd => S::Region,
            ComponentMaskShift => S::ComponentMaskShift,
            ComponentStart | Component | ComponentEnd => S::Component,
            PinStart | Pin | PinPort | PinEnd => S::Pin,
            PinPropStart | PinProp | PinPropEnd => S::PinProperty,
            SnetStart | Snet | SnetOptions | SnetEndNet | SnetEnd => S::SpecialNet,
            SnetPathStart | SnetPath | NetPathStart | NetPath => S::Path,
            SnetShield => S::Shield,
            NetStart | Net | NetOptions | NetEndNet | NetEnd => S::Net,
            Subnet => S::Subnet,
            Noshield => S::Noshield,
            IoTimingStart | IoTiming | IoTimingEnd => S::IoTiming,
            ScanChainStart | ScanChain | ScanChainEnd => S::ScanChain,
            ScanFloating => S::ScanFloating,
            ScanOrdered => S::ScanOrdered,
            ConstraintStart | Constraint | ConstraintOperand | ConstraintSum | ConstraintEnd => {
                S::Constraints
            }
            GroupStart | Group | GroupEnd => S::Group,
            BlockageStart | BlockageRect | BlockageEnd => S::Blockage,
            BlockageLayer => S::BlockageLayer,
            BlockagePlace => S::BlockagePlacement,
            SlotStart | SlotLayer | SlotRect | SlotEnd => S::Slot,
            FillStart | FillLayer | FillLayerMask | FillLayerOpc | FillRect | FillVia
            | FillViaMask | FillViaOpc | FillEnd => S::Fill,
            NdrStart | Ndr | NdrEnd => S::NonDefaultRule,
            StylesStart | Styles | StylesEnd => S::Styles,
            BeginExt | BeginExtEnd => S::BeginExt,
            Done => S::DesignEnd,
        }
    }
    /// Boolean indication of a header-statement position,
    /// i.e. one before any history, section, or floorplan statement.
    pub fn is_header(&self) -> bool {
        use DefState::*;
        matches!(
            self,
            Init | Version
                | CaseSensitive
                | BusBit
                | Divider
                | Design
                | Technology
                | Array
                | Floorplan
                | Units
        )
    }
    /// Boolean indication that no section or bracket is open,
    /// so a new design-level statement or section may begin.
    pub fn is_design_level(&self) -> bool {
        use DefState::*;
        self.is_header()
            || matches!(
                self,
                History
                    | PropDefEnd
                    | DieArea
                    | Row
                    | Tracks
                    | GcellGrid
                    | DefaultCapEnd
                    | CanPlace
                    | CannotOccupy
                    | ViaEnd
                    | RegionEnd
                    | ComponentMaskShift
                    | ComponentEnd
                    | PinEnd
                    | PinPropEnd
                    | SnetEnd
                    | NetEnd
                    | IoTimingEnd
                    | ScanChainEnd
                    | ConstraintEnd
                    | GroupEnd
                    | BlockageEnd
                    | SlotEnd
                    | FillEnd
                    | NdrEnd
                    | StylesEnd
                    | BeginExtEnd
            )
    }
}
impl Default for DefState {
    fn default() -> Self {
        Self::Uninitialized
    }
}
