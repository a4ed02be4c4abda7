use super::*;
use crate::data::V5P8;
use crate::utils::SerializationFormat::{Json, Yaml};
use def21utils::EnumStr;

/// Route writer logs to the test harness, filtered by `RUST_LOG`
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
/// Header of design `PARTX`, declared at version `major.minor`
fn header(major: u32, minor: u32) -> DefHeader {
    let mut b = DefHeaderBuilder::default()
        .design("PARTX")
        .version(DefVersion::new(major, minor))
        .divider_char("/")
        .bus_bit_chars("[]")
        .units(1000u32);
    if DefVersion::new(major, minor).decimal() < DefVersion::new(5, 6).decimal() {
        b = b.names_case_sensitive(OnOff::On);
    }
    b.build().unwrap()
}
fn placed(name: &str, master: &str, x: i32, y: i32) -> DefComponent {
    DefComponentBuilder::default()
        .name(name)
        .master(master)
        .placement(DefPlacement::new(
            PlacementStatus::Placed,
            DefPoint::new(x, y),
            Orientation::N,
        ))
        .build()
        .unwrap()
}
/// Assert that `res` failed with `status`, attributed to `section`
fn assert_status<T: std::fmt::Debug>(res: DefResult<T>, status: DefStatus, section: DefSection) {
    match res {
        Err(DefError::Status { status: s, section: sec }) => {
            assert_eq!((s, sec), (status, section));
        }
        other => panic!("Expected {status} in {section}, got {other:?}"),
    }
}

#[test]
fn test_points() -> DefResult<()> {
    let p = DefPoint::new(10, 20) + DefPoint::new(5, -5);
    assert_eq!(p, DefPoint::new(15, 15));
    let mut q = p - DefPoint::new(15, 0);
    q += DefPoint::new(1, 1);
    assert_eq!(q, DefPoint::new(1, 16));
    assert_eq!(q.to_string(), "( 1 16 )");
    assert_eq!(DefRect::new(0, 0, 10, 5).to_string(), "( 0 0 ) ( 10 5 )");
    assert!(!DefRect::new(10, 0, 0, 5).is_ordered());
    Ok(())
}
#[test]
fn test_versions() -> DefResult<()> {
    assert_eq!(DefVersion::new(5, 8).to_string(), "5.8");
    assert_eq!(DefVersion::new(5, 8).decimal(), *V5P8);
    // Two-digit minor revisions are hundredths
    assert!(DefVersion::new(5, 10).decimal() < DefVersion::new(5, 2).decimal());
    assert!(DefVersion::new(6, 0).decimal() > *V5P8);
    Ok(())
}
#[test]
fn test_orientation_codes() -> DefResult<()> {
    assert_eq!(Orientation::from_code(0), Some(Orientation::N));
    assert_eq!(Orientation::from_code(6), Some(Orientation::FS));
    assert_eq!(Orientation::from_code(8), None);
    assert_eq!(Orientation::from_code(-1), None);
    assert_eq!(Orientation::FE.code(), 7);
    assert_eq!(Orientation::FW.to_string(), "FW");
    Ok(())
}
#[test]
fn test_status_codes() -> DefResult<()> {
    assert_eq!(DefStatus::Ok.code(), 0);
    assert_eq!(DefStatus::TooManyStatements.code(), 7);
    assert_eq!(DefStatus::WrongVersion.to_str(), "WRONG_VERSION");
    assert_eq!(
        diagnostic(DefStatus::BadData, DefSection::Via),
        "VIA - Invalid data."
    );
    Ok(())
}

#[test]
fn test_design() -> DefResult<()> {
    init_tracing();
    let s = to_string(|wr| {
        wr.init(&header(5, 8))?;
        // Header statements written by init may not be repeated
        assert_status(wr.design_name("OTHER"), DefStatus::BadOrder, DefSection::Design);
        wr.die_area(DefRect::new(0, 0, 1000, 1000))?;
        wr.row("R1", "CORE", DefPoint::new(0, 0), Orientation::N, None, None)?;
        wr.start_components(1)?;
        wr.component(&placed("U1", "BUFX2", 0, 0))?;
        wr.end_components()?;
        wr.start_nets(0)?;
        wr.end_nets()?;
        wr.end()
    })?;
    let expected = "VERSION 5.8 ;\n\
        DIVIDERCHAR \"/\" ;\n\
        BUSBITCHARS \"[]\" ;\n\
        DESIGN PARTX ;\n\
        UNITS DISTANCE MICRONS 1000 ;\n\
        DIEAREA ( 0 0 ) ( 1000 1000 ) ;\n\
        ROW R1 CORE 0 0 N ;\n\n\
        COMPONENTS 1 ;\n   - U1 BUFX2 \n      + PLACED ( 0 0 ) N ;\nEND COMPONENTS\n\n\
        NETS 0 ;\nEND NETS\n\n\
        END DESIGN\n\n";
    assert_eq!(s, expected);
    Ok(())
}

#[test]
fn test_header_pre_56() -> DefResult<()> {
    let s = to_string(|wr| {
        wr.init(&header(5, 3))?;
        wr.end()
    })?;
    assert!(s.starts_with("VERSION 5.3 ;\nNAMESCASESENSITIVE ON ;\n"));

    // Case sensitivity is required before 5.6
    let hdr = DefHeaderBuilder::default()
        .design("PARTX")
        .version(DefVersion::new(5, 5))
        .build()
        .unwrap();
    let mut buf = Vec::new();
    let mut wr = DefWriter::new(&mut buf);
    assert_status(wr.init(&hdr), DefStatus::BadData, DefSection::Initialize);
    Ok(())
}
#[test]
fn test_header_checks() -> DefResult<()> {
    let mut buf = Vec::new();
    {
        let mut wr = DefWriter::new(&mut buf);
        let mut hdr = header(5, 8);
        hdr.units = Some(123);
        assert_status(wr.init(&hdr), DefStatus::BadData, DefSection::Initialize);
        hdr.units = Some(2000);
        hdr.design = "".into();
        assert_status(wr.init(&hdr), DefStatus::BadData, DefSection::Initialize);
        // Still uninitialized
        assert_eq!(wr.state(), DefState::Uninitialized);
    }
    assert!(buf.is_empty());
    Ok(())
}
#[test]
fn test_header_yaml() -> DefResult<()> {
    let hdr: DefHeader = Yaml.from_str(
        "
        design: PARTX
        version:
          major: 5
          minor: 8
        divider_char: /
        bus_bit_chars: \"[]\"
        units: 1000
        ",
    )?;
    assert_eq!(hdr, header(5, 8));
    let json = Json.to_string(&hdr)?;
    let back: DefHeader = Json.from_str(&json)?;
    assert_eq!(back, hdr);
    Ok(())
}

#[test]
fn test_uninitialized() -> DefResult<()> {
    let mut buf = Vec::new();
    {
        let mut wr = DefWriter::new(&mut buf);
        assert_status(
            wr.die_area(DefRect::new(0, 0, 1, 1)),
            DefStatus::Uninitialized,
            DefSection::Uninitialized,
        );
        assert_status(wr.end(), DefStatus::Uninitialized, DefSection::Uninitialized);
        wr.print_error(DefStatus::Uninitialized)?;
    }
    assert_eq!(String::from_utf8(buf).unwrap(), "Need to call init first.\n");
    Ok(())
}
#[test]
fn test_double_init() -> DefResult<()> {
    let mut buf = Vec::new();
    let mut wr = DefWriter::new(&mut buf);
    wr.init(&header(5, 8))?;
    // Repeating the same initialization is an ordinary ordering error
    assert_status(wr.init(&header(5, 8)), DefStatus::BadOrder, DefSection::Initialize);
    // Mixing the two initialization paths is fatal, and poisons the writer
    let e = wr.init_cbk().unwrap_err();
    assert!(e.is_fatal());
    assert_eq!(e.status(), None);
    assert!(wr.start_nets(0).unwrap_err().is_fatal());
    assert!(wr.end().unwrap_err().is_fatal());

    let mut buf = Vec::new();
    let mut wr = DefWriter::new(&mut buf);
    wr.init_cbk()?;
    assert!(wr.init(&header(5, 8)).unwrap_err().is_fatal());
    assert!(wr.version(5, 8).unwrap_err().is_fatal());
    Ok(())
}

#[test]
fn test_section_counts() -> DefResult<()> {
    let mut buf = Vec::new();
    {
        let mut wr = DefWriter::new(&mut buf);
        wr.init(&header(5, 8))?;
        wr.start_components(2)?;
        wr.component(&placed("U1", "BUFX2", 0, 0))?;
        // Fewer items than declared
        assert_status(wr.end_components(), DefStatus::BadData, DefSection::Component);
        wr.component(&placed("U2", "BUFX2", 10, 0))?;
        // More items than declared
        assert_status(
            wr.component(&placed("U3", "BUFX2", 20, 0)),
            DefStatus::TooManyStatements,
            DefSection::Component,
        );
        wr.end_components()?;
        // Sections are written at most once
        assert_status(wr.start_components(0), DefStatus::AlreadyDefined, DefSection::Component);
        wr.end()?;
    }
    let s = String::from_utf8(buf).unwrap();
    assert!(s.contains("COMPONENTS 2 ;\n   - U1 BUFX2 \n      + PLACED ( 0 0 ) N ;\n   - U2 BUFX2 \n      + PLACED ( 10 0 ) N ;\nEND COMPONENTS\n\n"));
    assert!(!s.contains("U3"));
    Ok(())
}
#[test]
fn test_end_before_start() -> DefResult<()> {
    let mut buf = Vec::new();
    {
        let mut wr = DefWriter::new(&mut buf);
        wr.init(&header(5, 8))?;
        assert_status(wr.end_components(), DefStatus::BadOrder, DefSection::Component);
        wr.print_error(DefStatus::BadOrder)?;
        // Opening a section inside another is out of order too
        wr.start_vias(0)?;
        assert_status(wr.start_nets(0), DefStatus::BadOrder, DefSection::Net);
        assert_status(wr.end(), DefStatus::BadOrder, DefSection::DesignEnd);
        wr.end_vias()?;
        wr.end()?;
        assert_eq!(wr.state(), DefState::Done);
    }
    let s = String::from_utf8(buf).unwrap();
    assert!(s.contains("COMPONENT - Incorrect order of data.\n"));
    assert!(s.ends_with("VIAS 0 ;\nEND VIAS\n\nEND DESIGN\n\n"));
    Ok(())
}

#[test]
fn test_empty_sections() -> DefResult<()> {
    // Every bracketed section may be declared with zero items and closed right away
    let s = to_string(|wr| {
        wr.init(&header(5, 8))?;
        wr.start_property_definitions()?;
        wr.end_property_definitions()?;
        wr.start_vias(0)?;
        wr.end_vias()?;
        wr.start_regions(0)?;
        wr.end_regions()?;
        wr.start_components(0)?;
        wr.end_components()?;
        wr.start_pins(0)?;
        wr.end_pins()?;
        wr.start_pin_properties(0)?;
        wr.end_pin_properties()?;
        wr.start_blockages(0)?;
        wr.end_blockages()?;
        wr.start_slots(0)?;
        wr.end_slots()?;
        wr.start_fills(0)?;
        wr.end_fills()?;
        wr.start_nondefault_rules(0)?;
        wr.end_nondefault_rules()?;
        wr.start_styles(0)?;
        wr.end_styles()?;
        wr.start_special_nets(0)?;
        wr.end_special_nets()?;
        wr.start_nets(0)?;
        wr.end_nets()?;
        wr.start_scan_chains(0)?;
        wr.end_scan_chains()?;
        wr.start_groups(0)?;
        wr.end_groups()?;
        wr.end()?;
        // Nothing more may be written after the design ends
        assert_status(wr.add_comment("late"), DefStatus::BadOrder, DefSection::DesignEnd);
        assert_status(wr.add_indent(), DefStatus::BadOrder, DefSection::DesignEnd);
        assert_status(wr.new_line(), DefStatus::BadOrder, DefSection::DesignEnd);
        assert_status(
            wr.print_error(DefStatus::BadData),
            DefStatus::BadOrder,
            DefSection::DesignEnd,
        );
        Ok(())
    })?;
    assert_eq!(
        s,
        concat!(
            "VERSION 5.8 ;\nDIVIDERCHAR \"/\" ;\nBUSBITCHARS \"[]\" ;\n",
            "DESIGN PARTX ;\nUNITS DISTANCE MICRONS 1000 ;\n",
            "PROPERTYDEFINITIONS\nEND PROPERTYDEFINITIONS\n\n",
            "VIAS 0 ;\nEND VIAS\n\n",
            "REGIONS 0 ;\nEND REGIONS\n\n",
            "COMPONENTS 0 ;\nEND COMPONENTS\n\n",
            "PINS 0 ;\nEND PINS\n\n",
            "PINPROPERTIES 0 ;\nEND PINPROPERTIES\n\n",
            "BLOCKAGES 0 ;\nEND BLOCKAGES\n\n",
            "SLOTS 0 ;\nEND SLOTS\n\n",
            "FILLS 0 ;\nEND FILLS\n\n",
            "NONDEFAULTRULES 0 ;\nEND NONDEFAULTRULES\n\n",
            "STYLES 0 ;\nEND STYLES\n\n",
            "SPECIALNETS 0 ;\nEND SPECIALNETS\n\n",
            "NETS 0 ;\nEND NETS\n\n",
            "SCANCHAINS 0 ;\nEND SCANCHAINS\n\n",
            "GROUPS 0 ;\nEND GROUPS\n\n",
            "END DESIGN\n\n",
        )
    );
    Ok(())
}
#[test]
fn test_empty_retired_sections() -> DefResult<()> {
    let s = to_string(|wr| {
        wr.init(&header(5, 3))?;
        wr.start_default_cap(0)?;
        wr.end_default_cap()?;
        wr.start_nets(0)?;
        wr.end_nets()?;
        wr.start_io_timings(0)?;
        wr.end_io_timings()?;
        wr.start_constraints(0)?;
        wr.end_constraints()?;
        wr.end()
    })?;
    assert_eq!(
        s,
        concat!(
            "VERSION 5.3 ;\nNAMESCASESENSITIVE ON ;\nDIVIDERCHAR \"/\" ;\nBUSBITCHARS \"[]\" ;\n",
            "DESIGN PARTX ;\nUNITS DISTANCE MICRONS 1000 ;\n",
            "DEFAULTCAP 0\nEND DEFAULTCAP\n\n",
            "NETS 0 ;\nEND NETS\n\n",
            "IOTIMINGS 0 ;\nEND IOTIMINGS\n\n",
            "CONSTRAINTS 0 ;\nEND CONSTRAINTS\n\n",
            "END DESIGN\n\n",
        )
    );
    Ok(())
}
#[test]
fn test_polygon_wrap() -> DefResult<()> {
    let pts = [(0, 0), (10, 0), (10, 10), (20, 10), (20, 20), (20, 30)]
        .map(|(x, y)| DefPoint::new(x, y));
    let s = to_string(|wr| {
        wr.init(&header(5, 8))?;
        wr.die_area_polygon(&pts)?;
        wr.start_slots(1)?;
        wr.slot_layer("M1")?;
        wr.slot_polygon(&pts)?;
        wr.end_slots()
    })?;
    // DIEAREA points are written in full
    assert!(s.contains(
        "DIEAREA ( 0 0 ) ( 10 0 ) ( 10 10 ) ( 20 10 ) ( 20 20 ) \n        ( 20 30 ) ;\n"
    ));
    // Slot points compress, including across the line break
    assert!(s.ends_with(concat!(
        "SLOTS 1 ;\n   - LAYER M1 \n",
        "     POLYGON ( 0 0 ) ( 10 * ) ( * 10 ) ( 20 * ) ( * 20 ) \n             ( * 30 )  ;\n",
        "END SLOTS\n\n",
    )));
    Ok(())
}
#[test]
fn test_order_checked_before_data() -> DefResult<()> {
    let s = to_string(|wr| {
        wr.init(&header(5, 8))?;
        // Empty names outside their bracket are misplaced, before they are invalid
        assert_status(wr.net_path_via(""), DefStatus::BadOrder, DefSection::Path);
        assert_status(
            wr.net_path_via_with_orient("", Orientation::N),
            DefStatus::BadOrder,
            DefSection::Path,
        );
        assert_status(wr.special_net_path_via(""), DefStatus::BadOrder, DefSection::Path);
        assert_status(wr.special_net_shield_layer(""), DefStatus::BadOrder, DefSection::Shield);
        assert_status(wr.special_net_shield_via(""), DefStatus::BadOrder, DefSection::Shield);
        assert_status(wr.via_rule_pattern(""), DefStatus::BadOrder, DefSection::Via);
        Ok(())
    })?;
    assert_eq!(s.lines().count(), 5);
    Ok(())
}

#[test]
fn test_wrong_version() -> DefResult<()> {
    let mut buf = Vec::new();
    {
        let mut wr = DefWriter::new(&mut buf);
        wr.init(&header(5, 5))?;
        assert_eq!(wr.def_version(), DefVersion::new(5, 5).decimal());
        let pts = [(0, 0), (10, 0), (10, 10), (0, 10)].map(|(x, y)| DefPoint::new(x, y));
        assert_status(wr.die_area_polygon(&pts), DefStatus::WrongVersion, DefSection::DieArea);
        assert_status(
            wr.tracks(TrackDirection::X, 0, 10, 100, Some((1, false)), &["M1"]),
            DefStatus::WrongVersion,
            DefSection::Tracks,
        );
        wr.tracks(TrackDirection::X, 0, 10, 100, None, &["M1", "M2"])?;
        wr.print_error(DefStatus::WrongVersion)?;
    }
    let s = String::from_utf8(buf).unwrap();
    assert!(!s.contains("DIEAREA"));
    assert!(s.contains("TRACKS X 0 DO 10 STEP 100 LAYER M1 M2 ;\n"));
    assert!(s.contains("TRACKS - Not available in the declared DEF version.\n"));
    Ok(())
}
#[test]
fn test_obsolete() -> DefResult<()> {
    let mut buf = Vec::new();
    {
        let mut wr = DefWriter::new(&mut buf);
        wr.init(&header(5, 8))?;
        assert_status(wr.start_default_cap(1), DefStatus::Obsolete, DefSection::DefaultCap);
        wr.die_area(DefRect::new(0, 0, 100, 100))?;
        // The retired section is reported, rather than the most recent call
        wr.print_error(DefStatus::Obsolete)?;
        wr.print_error(DefStatus::BadData)?;
        wr.start_nets(0)?;
        wr.end_nets()?;
        assert_status(wr.start_io_timings(0), DefStatus::Obsolete, DefSection::IoTiming);
        assert_status(wr.start_constraints(0), DefStatus::Obsolete, DefSection::Constraints);
        wr.print_error(DefStatus::Obsolete)?;
    }
    let s = String::from_utf8(buf).unwrap();
    assert!(s.contains("DEFAULTCAP - is no longer valid in the declared DEF version.\n"));
    assert!(s.contains("DIEAREA - Invalid data.\n"));
    assert!(s.contains("CONSTRAINTS - is no longer valid in the declared DEF version.\n"));
    Ok(())
}
#[test]
fn test_retired_sections() -> DefResult<()> {
    let s = to_string(|wr| {
        wr.init(&header(5, 3))?;
        wr.start_default_cap(1)?;
        wr.default_cap(2, 0.5)?;
        wr.end_default_cap()?;
        wr.start_nets(0)?;
        wr.end_nets()?;
        wr.start_io_timings(1)?;
        wr.io_timing("U1", "A")?;
        wr.io_timing_variable(RiseFall::Rise, 10, 20)?;
        wr.io_timing_drive_cell(&DefDriveCell {
            cell: "BUFX2".into(),
            to_pin: Some("Y".into()),
            ..Default::default()
        })?;
        wr.end_io_timings()?;
        wr.start_constraints(2)?;
        wr.constraint_operand()?;
        wr.constraint_operand_sum()?;
        wr.constraint_operand_net("N1")?;
        wr.constraint_operand_net("N2")?;
        wr.constraint_operand_sum_end()?;
        wr.constraint_operand_time(TimingType::RiseMax, 100)?;
        wr.constraint_operand_end()?;
        wr.constraint_wired_logic("N3", 50)?;
        wr.end_constraints()?;
        wr.end()
    })?;
    assert!(s.contains("DEFAULTCAP 1\n   MINPINS 2 WIRECAP 0.500000 ;\nEND DEFAULTCAP\n\n"));
    assert!(s.contains(
        "IOTIMINGS 1 ;\n   - ( U1 A )\n      + RISE VARIABLE 10 20\n      + DRIVECELL BUFX2 TOPIN Y  ;\nEND IOTIMINGS\n\n"
    ));
    assert!(s.contains(
        "CONSTRAINTS 2 ;\n   - SUM ( NET N1 , NET N2 ) + RISEMAX 100 ;\n   - WIREDLOGIC N3 MAXDIST 50 ;\nEND CONSTRAINTS\n\n"
    ));
    Ok(())
}

#[test]
fn test_component_halo() -> DefResult<()> {
    let mut buf = Vec::new();
    {
        let mut wr = DefWriter::new(&mut buf);
        wr.init(&header(5, 8))?;
        wr.start_components(2)?;
        wr.component(&placed("U1", "BUFX2", 0, 0))?;
        wr.component_halo(1, 2, 3, 4)?;
        assert_status(
            wr.component_halo_soft(1, 2, 3, 4),
            DefStatus::BadData,
            DefSection::Component,
        );
        wr.component_route_halo(100, "M1", "M3")?;
        wr.component(&placed("U2", "INVX1", 10, 0))?;
        // The halo flag is per component
        wr.component_halo_soft(5, 5, 5, 5)?;
        wr.string_property("owner", "me")?;
        wr.end_components()?;
    }
    let s = String::from_utf8(buf).unwrap();
    assert!(s.contains("\n      + HALO 1 2 3 4 \n      + ROUTEHALO 100 M1 M3 ;\n"));
    assert!(s.contains("\n      + HALO SOFT 5 5 5 5 \n      + PROPERTY owner \"me\" ;\nEND COMPONENTS"));
    Ok(())
}

#[test]
fn test_special_net_points() -> DefResult<()> {
    let s = to_string(|wr| {
        wr.init(&header(5, 8))?;
        wr.start_special_nets(1)?;
        wr.special_net("VDD")?;
        wr.special_net_use(NetUse::Power)?;
        wr.special_net_path_start(PathType::Routed)?;
        wr.special_net_path_layer("M1")?;
        wr.special_net_path_width(100)?;
        wr.special_net_path_points(&[DefPoint::new(0, 0), DefPoint::new(0, 0)])?;
        // A new path starts its points afresh
        wr.special_net_path_start(PathType::New)?;
        wr.special_net_path_layer("M2")?;
        wr.special_net_path_points(&[DefPoint::new(0, 0), DefPoint::new(50, 0)])?;
        wr.special_net_path_end()?;
        wr.special_net_end_one()?;
        wr.end_special_nets()?;
        wr.end()
    })?;
    assert!(s.contains(
        "SPECIALNETS 1 ;\n   - VDD\n      + USE POWER\n      + ROUTED M1 100 ( 0 0 )\n      ( * * ) NEW M2 ( 0 0 ) ( 50 * ) ;\nEND SPECIALNETS\n\n"
    ));
    Ok(())
}
#[test]
fn test_special_net_paths() -> DefResult<()> {
    let mut buf = Vec::new();
    {
        let mut wr = DefWriter::new(&mut buf);
        wr.init(&header(5, 8))?;
        wr.start_special_nets(1)?;
        // Paths are not open, so may not be continued
        assert_status(
            wr.special_net_path_points(&[DefPoint::new(0, 0)]),
            DefStatus::BadOrder,
            DefSection::Path,
        );
        wr.special_net("VSS")?;
        wr.special_net_connection("*", "VSS", false)?;
        assert_status(
            wr.special_net_path_start(PathType::New),
            DefStatus::BadData,
            DefSection::Path,
        );
        assert_status(
            wr.special_net_path_start(PathType::Noshield),
            DefStatus::BadData,
            DefSection::Path,
        );
        wr.special_net_path_start(PathType::Shield)?;
        wr.special_net_shield_net_name("CLK")?;
        wr.special_net_path_layer("M2")?;
        wr.special_net_path_width(50)?;
        wr.special_net_path_shape(WireShape::Stripe)?;
        wr.special_net_path_points(&[DefPoint::new(0, 10), DefPoint::new(100, 10)])?;
        wr.special_net_path_via("VIA12")?;
        wr.special_net_path_end()?;
        // Options may not precede connections
        assert_status(
            wr.special_net_connection("U1", "VSS", false),
            DefStatus::BadOrder,
            DefSection::SpecialNet,
        );
        wr.special_net_rect("M1", DefRect::new(0, 0, 10, 10))?;
        wr.special_net_shield_start("CLK")?;
        wr.special_net_shield_layer("M3")?;
        wr.special_net_shield_width(20)?;
        wr.special_net_shield_points(&[DefPoint::new(5, 5), DefPoint::new(5, 50)])?;
        assert_status(
            wr.special_net_shield_shape(WireShape::Padring),
            DefStatus::BadData,
            DefSection::Shield,
        );
        wr.special_net_shield_new()?;
        wr.special_net_shield_layer("M3")?;
        wr.special_net_shield_points(&[DefPoint::new(5, 50)])?;
        wr.special_net_shield_end()?;
        assert_status(wr.special_net_voltage(3.0e6), DefStatus::BadData, DefSection::SpecialNet);
        assert_status(wr.special_net_voltage(f64::NAN), DefStatus::BadData, DefSection::SpecialNet);
        wr.special_net_voltage(1.5)?;
        wr.special_net_end_one()?;
        wr.end_special_nets()?;
    }
    let s = String::from_utf8(buf).unwrap();
    // The shape line falls on the fourth item, so follows a wrapped line
    assert!(s.contains(concat!(
        "   - VSS ( * VSS ) ",
        "\n      + SHIELD CLK M2 50",
        "\n     ",
        "\n      + SHAPE STRIPE ( 0 10 ) ( 100 * ) VIA12",
    )));
    assert!(s.contains("\n      + RECT M1 ( 0 0 ) ( 10 10 ) "));
    assert!(s.contains("\n      + SHIELD CLK M3 20 ( 5 5 )\n      ( * 50 ) NEW M3 ( 5 50 )"));
    assert!(s.contains("\n      + VOLTAGE 1500 ;\nEND SPECIALNETS\n\n"));
    Ok(())
}

#[test]
fn test_net_points() -> DefResult<()> {
    let s = to_string(|wr| {
        wr.init(&header(5, 8))?;
        wr.start_nets(1)?;
        wr.net("N1")?;
        wr.net_connection("U1", "A", false)?;
        wr.net_path_start(PathType::Routed)?;
        wr.net_path_layer("M1", None)?;
        wr.net_path_points(&[
            DefPoint::new(10, 20),
            DefPoint::new(10, 40),
            DefPoint::new(30, 40),
        ])?;
        wr.net_path_start(PathType::New)?;
        wr.net_path_layer("M2", Some(&DefTaper::Taper))?;
        wr.net_path_points(&[DefPoint::new(30, 40)])?;
        wr.net_path_end()?;
        wr.net_end_one()?;
        wr.end_nets()?;
        wr.end()
    })?;
    assert!(s.contains(
        "NETS 1 ;\n   - N1 ( U1 A ) \n      + ROUTED M1 ( 10 20 ) ( * 40 )\n         ( 30 * )\n         NEW M2 TAPER ( 30 40 ) ;\nEND NETS\n\n"
    ));
    Ok(())
}
#[test]
fn test_net_brackets() -> DefResult<()> {
    let mut buf = Vec::new();
    {
        let mut wr = DefWriter::new(&mut buf);
        wr.init(&header(5, 8))?;
        wr.start_nets(3)?;
        wr.net("N1")?;
        wr.net_connection("U1", "A", true)?;
        wr.net_use(NetUse::Clock)?;
        assert_status(
            wr.net_path_start(PathType::Shield),
            DefStatus::BadData,
            DefSection::Path,
        );
        wr.net_noshield_start("M1")?;
        wr.net_noshield_points(&[DefPoint::new(0, 0), DefPoint::new(0, 0)])?;
        wr.net_noshield_end()?;
        wr.net_subnet_start("S1")?;
        wr.net_subnet_pin("U2", "B")?;
        wr.net_nondefault_rule("DOUBLE")?;
        wr.net_path_start(PathType::Fixed)?;
        wr.net_path_layer("M2", None)?;
        wr.net_path_points(&[DefPoint::new(1, 1)])?;
        wr.net_path_end()?;
        assert_eq!(wr.state(), DefState::Subnet);
        wr.net_subnet_end()?;
        wr.net_end_one()?;
        // A MUSTJOIN item counts as one of the declared nets
        wr.net_mustjoin("U3", "C")?;
        wr.net_end_one()?;
        wr.net("N2")?;
        wr.net_path_start(PathType::Routed)?;
        wr.net_path_layer("M1", Some(&DefTaper::Rule("WIDE".into())))?;
        wr.net_path_points(&[DefPoint::new(0, 0)])?;
        wr.net_path_mask(2)?;
        wr.net_path_rect(-1, -1, 1, 1)?;
        wr.net_path_virtual(DefPoint::new(0, 100))?;
        wr.net_path_end()?;
        wr.net_end_one()?;
        assert_status(wr.net("N3"), DefStatus::TooManyStatements, DefSection::Net);
        wr.end_nets()?;
    }
    let s = String::from_utf8(buf).unwrap();
    assert!(s.contains("   - N1 ( U1 A + SYNTHESIZED ) \n      + USE CLOCK\n      + NOSHIELD M1 ( 0 0 ) ( * * )"));
    assert!(s.contains(
        "\n      + SUBNET S1 ( U2 B )\n         NONDEFAULTRULE DOUBLE\n      FIXED M2 ( 1 1 ) ;\n"
    ));
    assert!(s.contains(" - MUSTJOIN ( U3 C ) ;\n"));
    assert!(s.contains(
        "   - N2\n      + ROUTED M1 TAPERRULE WIDE ( 0 0 ) MASK 2\n      RECT ( -1 -1 1 1 ) VIRTUAL ( 0 100 ) ;\n"
    ));
    Ok(())
}

#[test]
fn test_pins() -> DefResult<()> {
    let mut buf = Vec::new();
    {
        let mut wr = DefWriter::new(&mut buf);
        wr.init(&header(5, 8))?;
        // Pins follow components
        assert_status(wr.start_pins(1), DefStatus::BadOrder, DefSection::Pin);
        wr.start_components(0)?;
        wr.end_components()?;
        wr.start_pins(2)?;
        let pin = DefPinBuilder::default()
            .name("P1")
            .net("N1")
            .direction(PinDirection::Input)
            .usage(NetUse::Signal)
            .placement(DefPlacement::new(
                PlacementStatus::Fixed,
                DefPoint::new(10, 20),
                Orientation::N,
            ))
            .build()
            .unwrap();
        wr.pin(&pin)?;
        wr.pin_layer(&DefPinShape::new("M1"), DefRect::new(-5, -5, 5, 5))?;
        assert_status(
            wr.pin_antenna(PinAntennaKind::MaxAreaCar, 10, None),
            DefStatus::BadData,
            DefSection::Pin,
        );
        wr.pin_antenna(PinAntennaKind::GateArea, 10, Some("M1"))?;
        let mut unplaced = pin.clone();
        unplaced.name = "P2".into();
        unplaced.placement = Some(DefPlacement::unplaced());
        assert_status(wr.pin(&unplaced), DefStatus::BadData, DefSection::Pin);
        unplaced.placement = None;
        wr.pin(&unplaced)?;
        wr.pin_port()?;
        let shape = DefPinShape {
            spacing: Some(5),
            ..DefPinShape::new("M2")
        };
        wr.pin_port_layer(&shape, DefRect::new(0, 0, 2, 2))?;
        wr.pin_port_via("VIA12", DefPoint::new(1, 1), Some(1))?;
        wr.end_pins()?;
    }
    let s = String::from_utf8(buf).unwrap();
    assert!(s.contains(
        "PINS 2 ;\n   - P1 + NET N1\n      + DIRECTION INPUT\n      + USE SIGNAL\n      + FIXED ( 10 20 ) N\n      + LAYER M1 \n        ( -5 -5 ) ( 5 5 )\n      + ANTENNAPINGATEAREA 10 LAYER M1"
    ));
    assert!(s.contains(
        " ;\n   - P2 + NET N1\n      + DIRECTION INPUT\n      + USE SIGNAL\n      + PORT\n        + LAYER M2 \n          SPACING 5\n        ( 0 0 ) ( 2 2 )\n        + VIA VIA12 MASK 1 ( 1 1 )  ;\nEND PINS\n\n"
    ));
    Ok(())
}
#[test]
fn test_pin_versions() -> DefResult<()> {
    let mut buf = Vec::new();
    let mut wr = DefWriter::new(&mut buf);
    wr.init(&header(5, 6))?;
    wr.start_components(0)?;
    wr.end_components()?;
    wr.start_pins(1)?;
    wr.pin(&DefPinBuilder::default().name("P1").net("N1").build().unwrap())?;
    wr.pin_net_expr("power1 VDD")?;
    assert_status(wr.pin_port(), DefStatus::WrongVersion, DefSection::Pin);
    let masked = DefPinShape {
        mask: Some(1),
        ..DefPinShape::new("M1")
    };
    assert_status(
        wr.pin_layer(&masked, DefRect::new(0, 0, 1, 1)),
        DefStatus::WrongVersion,
        DefSection::Pin,
    );
    let both = DefPinShape {
        spacing: Some(1),
        design_rule_width: Some(2),
        ..DefPinShape::new("M1")
    };
    assert_status(
        wr.pin_layer(&both, DefRect::new(0, 0, 1, 1)),
        DefStatus::BadData,
        DefSection::Pin,
    );
    wr.end_pins()
}

#[test]
fn test_blockages() -> DefResult<()> {
    let mut buf = Vec::new();
    {
        let mut wr = DefWriter::new(&mut buf);
        wr.init(&header(5, 8))?;
        wr.start_blockages(2)?;
        wr.blockages_layer("M1")?;
        wr.blockages_layer_spacing(10)?;
        assert_status(
            wr.blockages_layer_design_rule_width(20),
            DefStatus::BadData,
            DefSection::BlockageLayer,
        );
        assert_status(
            wr.blockages_placement_soft(),
            DefStatus::BadOrder,
            DefSection::BlockagePlacement,
        );
        wr.blockages_layer_component("U1")?;
        wr.blockages_rect(DefRect::new(0, 0, 5, 5))?;
        wr.blockages_placement()?;
        wr.blockages_placement_partial(0.5)?;
        assert_status(
            wr.blockages_placement_pushdown(),
            DefStatus::BadData,
            DefSection::BlockagePlacement,
        );
        assert_status(
            wr.blockages_polygon(&[DefPoint::new(0, 0), DefPoint::new(1, 0), DefPoint::new(1, 1)]),
            DefStatus::BadOrder,
            DefSection::Blockage,
        );
        wr.blockages_rect(DefRect::new(0, 0, 5, 5))?;
        wr.end_blockages()?;
    }
    let s = String::from_utf8(buf).unwrap();
    assert!(s.contains(
        "BLOCKAGES 2 ;\n   - LAYER M1\n     + SPACING 10\n     + COMPONENT U1\n     RECT ( 0 0 ) ( 5 5 ) ;\n   - PLACEMENT\n     + PARTIAL 0.5\n     RECT ( 0 0 ) ( 5 5 ) ;\nEND BLOCKAGES\n\n"
    ));
    Ok(())
}

#[test]
fn test_fills_and_rules() -> DefResult<()> {
    let s = to_string(|wr| {
        wr.init(&header(5, 8))?;
        wr.start_slots(1)?;
        wr.slot_layer("M1")?;
        wr.slot_rect(DefRect::new(0, 0, 4, 4))?;
        wr.end_slots()?;
        wr.start_fills(2)?;
        wr.fill_layer("M1")?;
        wr.fill_rect(DefRect::new(0, 0, 10, 10))?;
        wr.fill_via("V1")?;
        assert_status(
            wr.fill_rect(DefRect::new(0, 0, 1, 1)),
            DefStatus::BadOrder,
            DefSection::Fill,
        );
        wr.fill_points(&[DefPoint::new(1, 1), DefPoint::new(1, 1)])?;
        wr.end_fills()?;
        wr.start_nondefault_rules(1)?;
        wr.nondefault_rule("DOUBLE", true)?;
        wr.nondefault_rule_layer(&DefNdrLayer {
            layer: "M1".into(),
            width: 200,
            spacing: Some(100),
            ..Default::default()
        })?;
        wr.nondefault_rule_min_cuts("V1", 2)?;
        wr.end_nondefault_rules()?;
        wr.start_styles(1)?;
        wr.style(0, &[DefPoint::new(30, 10), DefPoint::new(10, 30), DefPoint::new(-10, 30)])?;
        wr.end_styles()?;
        wr.end()
    })?;
    assert!(s.contains("SLOTS 1 ;\n   - LAYER M1 \n     RECT ( 0 0 ) ( 4 4 ) ;\nEND SLOTS\n\n"));
    assert!(s.contains(
        "FILLS 2 ;\n   - LAYER M1 \n     RECT ( 0 0 ) ( 10 10 ) ;\n   - VIA V1 \n     ( 1 1 ) ( * * )  ;\nEND FILLS\n\n"
    ));
    assert!(s.contains(
        "NONDEFAULTRULES 1 ;\n   - DOUBLE\n      + HARDSPACING\n      + LAYER M1  WIDTH 200  SPACING 100 \n      + MINCUTS V1 2 ;\nEND NONDEFAULTRULES\n\n"
    ));
    assert!(s.contains("STYLES 1 ;\n   - STYLE 0 ( 30 10 ) ( 10 30 ) ( -10 * ) ;\nEND STYLES\n\n"));
    Ok(())
}

#[test]
fn test_scan_chains_and_groups() -> DefResult<()> {
    let mut buf = Vec::new();
    {
        let mut wr = DefWriter::new(&mut buf);
        wr.init(&header(5, 8))?;
        assert_status(wr.start_scan_chains(1), DefStatus::BadOrder, DefSection::ScanChain);
        wr.start_nets(0)?;
        wr.end_nets()?;
        wr.start_scan_chains(1)?;
        wr.scan_chain("C1")?;
        wr.scan_chain_start("PIN", Some("si"))?;
        let u1 = DefScanEntry {
            inst: "U1".into(),
            pins: vec![
                DefScanPin::new(ScanPinDir::In, "a"),
                DefScanPin::new(ScanPinDir::Out, "q"),
            ],
            bits: None,
        };
        wr.scan_chain_floating(&u1)?;
        wr.scan_chain_floating(&DefScanEntry::new("U2"))?;
        // Opening an ordered list takes two entries
        let u3 = DefScanEntry::new("U3");
        assert_status(wr.scan_chain_ordered(&u3, None), DefStatus::BadData, DefSection::ScanChain);
        let u4 = DefScanEntry {
            bits: Some(4),
            ..DefScanEntry::new("U4")
        };
        wr.scan_chain_ordered(&u3, Some(&u4))?;
        wr.scan_chain_ordered(&DefScanEntry::new("U5"), None)?;
        wr.end_scan_chains()?;
        wr.start_groups(1)?;
        assert_status(wr.group("G1", &[]), DefStatus::BadData, DefSection::Group);
        wr.group("G1", &["U1", "U2*"])?;
        wr.group_soft(&[(GroupSoftType::MaxX, 100.0)])?;
        wr.group_region(&DefGroupRegion::Named("R1".into()))?;
        wr.end_groups()?;
    }
    let s = String::from_utf8(buf).unwrap();
    assert!(s.contains(
        "SCANCHAINS 1 ;\n   - C1\n      + START PIN si\n      + FLOATING U1 ( IN a ) ( OUT q )\n          U2\n      + ORDERED U3\n          U4 ( BITS 4 )\n          U5 ;\nEND SCANCHAINS\n\n"
    ));
    assert!(s.contains(
        "GROUPS 1 ;\n   - G1 U1 U2*\n     + SOFT MAXX 100\n      + REGION R1 ;\nEND GROUPS\n\n"
    ));
    Ok(())
}

#[test]
fn test_floorplan() -> DefResult<()> {
    let s = to_string(|wr| {
        wr.init(&header(5, 8))?;
        wr.history("created by hand")?;
        wr.start_property_definitions()?;
        wr.int_property_definition(PropObjectType::Component, "weight", Some((0.0, 10.0)), Some(1))?;
        wr.string_property_definition(PropObjectType::Design, "owner", None, None)?;
        wr.end_property_definitions()?;
        wr.row("R1", "CORE", DefPoint::new(0, 0), Orientation::FS, Some((10, 1)), Some((200, 0)))?;
        wr.int_property("weight", 3)?;
        wr.row("R2", "CORE", DefPoint::new(0, 1000), Orientation::N, None, None)?;
        wr.gcell_grid(TrackDirection::Y, 0, 5, 100)?;
        wr.can_place("CORE", DefPoint::new(0, 0), Orientation::N, DefRepeat::new(10, 1, 200, 0))?;
        wr.start_regions(1)?;
        wr.region("REG1")?;
        wr.region_rect(DefRect::new(0, 0, 100, 100))?;
        wr.region_type(RegionType::Fence)?;
        wr.end_regions()?;
        wr.begin_ext("tag")?;
        wr.begin_ext_creator("def21")?;
        wr.end_ext()?;
        wr.end()
    })?;
    assert!(s.contains("HISTORY created by hand ;\n"));
    assert!(s.contains(
        "PROPERTYDEFINITIONS\n   COMPONENT weight INTEGER RANGE 0 10 1 ;\n   DESIGN owner STRING ;\nEND PROPERTYDEFINITIONS\n\n"
    ));
    assert!(s.contains(
        "ROW R1 CORE 0 0 FS DO 10 BY 1 STEP 200 0 \n      + PROPERTY weight 3 ;\nROW R2 CORE 0 1000 N ;\n\nGCELLGRID Y 0 DO 5 STEP 100 ;\n"
    ));
    assert!(s.contains("CANPLACE CORE 0 0 N DO 10 BY 1 STEP 200 0 ;\n"));
    assert!(s.contains(concat!(
        "REGIONS 1 ;\n",
        "   - REG1 ",
        "      ( 0 0 ) ( 100 100 ) ",
        "         + TYPE FENCE ",
        ";\nEND REGIONS\n\n",
    )));
    assert!(s.contains("BEGINEXT \"tag\"\n   CREATOR \"def21\"\n;\nENDEXT\n\n"));
    Ok(())
}
#[test]
fn test_vias() -> DefResult<()> {
    let mut buf = Vec::new();
    {
        let mut wr = DefWriter::new(&mut buf);
        wr.init(&header(5, 8))?;
        wr.start_vias(2)?;
        wr.via_name("VIA12")?;
        wr.via_rect("M1", DefRect::new(-5, -5, 5, 5), None)?;
        wr.via_rect("M2", DefRect::new(-5, -5, 5, 5), Some(1))?;
        wr.one_via_end()?;
        wr.via_name("GEN")?;
        wr.via_pattern_name("P1")?;
        let rule = DefViaRule {
            rule: "R1".into(),
            cut_size: (10.0, 10.0),
            bot_layer: "M1".into(),
            cut_layer: "V1".into(),
            top_layer: "M2".into(),
            cut_spacing: (5.0, 5.0),
            enclosure: (1.0, 1.0, 2.0, 2.0),
        };
        assert_status(wr.via_rule(&rule), DefStatus::AlreadyDefined, DefSection::Via);
        wr.one_via_end()?;
        wr.end_vias()?;
    }
    let s = String::from_utf8(buf).unwrap();
    assert!(s.contains(
        "VIAS 2 ;\n   - VIA12\n      + RECT M1 ( -5 -5 ) ( 5 5 )\n      + RECT M2 + MASK 1 ( -5 -5 ) ( 5 5 ) ;\n   - GEN + PATTERNNAME P1 ;\nEND VIAS\n\n"
    ));
    Ok(())
}

#[test]
fn test_line_numbers() -> DefResult<()> {
    let mut buf = Vec::new();
    let mut wr = DefWriter::new(&mut buf);
    assert_eq!(wr.current_line_number(), 0);
    wr.init(&header(5, 8))?;
    assert_eq!(wr.current_line_number(), 5);
    wr.add_comment("floorplan follows")?;
    wr.new_line()?;
    assert_eq!(wr.current_line_number(), 7);
    wr.end()?;
    assert_eq!(wr.current_line_number(), 9);
    Ok(())
}
#[test]
fn test_parse_keyword() -> DefResult<()> {
    let mut buf = Vec::new();
    let mut wr = DefWriter::new(&mut buf);
    wr.init(&header(5, 8))?;
    let o: Orientation = wr.parse_keyword("FS")?;
    assert_eq!(o, Orientation::FS);
    let u: NetUse = wr.parse_keyword("GROUND")?;
    assert_eq!(u, NetUse::Ground);
    assert_eq!(
        wr.parse_keyword::<PlacementStatus>("placed").unwrap_err().status(),
        Some(DefStatus::BadData)
    );
    Ok(())
}

/// Writes the header, one component, and its nets
struct OneComponent;
impl DefCallbacks for OneComponent {
    fn version(&mut self, wr: &mut DefWriter<'_>) -> DefResult<SectionOutcome> {
        wr.version(5, 8)?;
        Ok(SectionOutcome::Written)
    }
    fn design(&mut self, wr: &mut DefWriter<'_>) -> DefResult<SectionOutcome> {
        wr.design_name("PARTX")?;
        Ok(SectionOutcome::Written)
    }
    fn units(&mut self, wr: &mut DefWriter<'_>) -> DefResult<SectionOutcome> {
        wr.units(1000)?;
        Ok(SectionOutcome::Written)
    }
    fn components(&mut self, wr: &mut DefWriter<'_>) -> DefResult<SectionOutcome> {
        wr.start_components(1)?;
        wr.component(&DefComponentBuilder::default().name("U1").master("BUFX2").build().unwrap())?;
        wr.end_components()?;
        Ok(SectionOutcome::Written)
    }
}
#[test]
fn test_callbacks() -> DefResult<()> {
    init_tracing();
    let mut buf = Vec::new();
    let options = DefDriverOptionsBuilder::default()
        .count_unused_callbacks(true)
        .build()
        .unwrap();
    let report = write_with(&mut buf, &mut OneComponent, &options)?;
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "VERSION 5.8 ;\nDESIGN PARTX ;\nUNITS DISTANCE MICRONS 1000 ;\nCOMPONENTS 1 ;\n   - U1 BUFX2 ;\nEND COMPONENTS\n\nEND DESIGN\n\n"
    );
    use DefSection::*;
    assert_eq!(report.written, vec![Version, Design, Units, Component, DesignEnd]);
    assert!(report.unused.contains(&Net));
    assert!(report.unused.contains(&BeginExt));
    assert!(!report.unused.contains(&Component));
    assert_eq!(report.lines, 9);

    // Without counting, skipped sections are not tallied
    let report = write_with(std::io::sink(), &mut OneComponent, &DefDriverOptions::default())?;
    assert!(report.unused.is_empty());
    Ok(())
}

/// Never ends its design
struct Unended;
impl DefCallbacks for Unended {
    fn design(&mut self, wr: &mut DefWriter<'_>) -> DefResult<SectionOutcome> {
        wr.design_name("PARTX")?;
        Ok(SectionOutcome::Written)
    }
    fn design_end(&mut self, _wr: &mut DefWriter<'_>) -> DefResult<SectionOutcome> {
        Ok(SectionOutcome::Skipped)
    }
}
/// Fails in its nets callback
struct Aborts;
impl DefCallbacks for Aborts {
    fn design(&mut self, wr: &mut DefWriter<'_>) -> DefResult<SectionOutcome> {
        wr.design_name("PARTX")?;
        Ok(SectionOutcome::Written)
    }
    fn nets(&mut self, _wr: &mut DefWriter<'_>) -> DefResult<SectionOutcome> {
        Err("netlist unavailable".into())
    }
    fn design_end(&mut self, _wr: &mut DefWriter<'_>) -> DefResult<SectionOutcome> {
        panic!("Callbacks after a failure must not run");
    }
}
#[test]
fn test_callback_failures() -> DefResult<()> {
    let options = DefDriverOptions::default();
    assert_status(
        write_with(std::io::sink(), &mut Unended, &options),
        DefStatus::BadOrder,
        DefSection::DesignEnd,
    );
    let e = write_with(std::io::sink(), &mut Aborts, &options).unwrap_err();
    assert_eq!(e.to_string(), "netlist unavailable");
    // Callbacks are bound through a trait object as readily as a concrete type
    let cb: &mut dyn DefCallbacks = &mut OneComponent;
    write_with(std::io::sink(), cb, &options)?;
    Ok(())
}

#[test]
fn test_save() -> DefResult<()> {
    let path = std::env::temp_dir().join("def21_test_save.def");
    save(&path, |wr| {
        wr.init(&header(5, 8))?;
        wr.end()
    })?;
    let s = std::fs::read_to_string(&path)?;
    assert!(s.starts_with("VERSION 5.8 ;\n"));
    assert!(s.ends_with("END DESIGN\n\n"));
    std::fs::remove_file(&path)?;
    Ok(())
}
