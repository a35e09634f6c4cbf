//! End-to-end tests for DEF graph extraction and the artifact writers.

use std::fs;

use def2graph::{
    parse_def_graph, write_hypergraph, write_vertex_info, DefReader, ParseError, ParseOptions,
    VertexId,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const SAMPLE_DEF: &str = r#"
VERSION 5.8 ;
NAMESCASESENSITIVE ON ;
DESIGN sample ;
UNITS DISTANCE MICRONS 2000 ;

DIEAREA ( 0 0 ) ( 100000 100000 ) ;

COMPONENTS 3 ;
    - U0 INVX1 + PLACED ( 10 10 ) N ;
    - U1 NAND2X1 ;
    - U2 RAM64 + FIXED ( 100 200 ) N ;
END COMPONENTS

PINS 1 ;
    - P0 + NET n0 + DIRECTION INPUT + USE SIGNAL
      + LAYER M1 ( 0 0 ) ( 5 5 )
      + PLACED ( 5 5 ) N ;
END PINS

NETS 1 ;
    - n0 ( U0 A ) ( U1 Y ) ( PIN P0 ) ;
END NETS

END DESIGN
"#;

const WIDE_DEF: &str = r#"
VERSION 5.8 ;
DESIGN wide ;

COMPONENTS 5 ;
    - I0 INVX1 ;
    - I1 INVX1 + PLACED ( 7 7 ) N ;
    - M0 RAM64 + FIXED ( 1000 2000 ) N ;
    - I2 BUFX1 ;
    - M1 ROM32 + FIXED ( 3000 4000 ) FS ;
END COMPONENTS

PINS 2 ;
    - IN0 + NET n1 + DIRECTION INPUT + PLACED ( 0 500 ) N ;
    - OUT0 + NET n2 + DIRECTION OUTPUT + FIXED ( 5000 500 ) S ;
END PINS

NETS 4 ;
    - clk_i ( PIN IN0 ) ( I0 CK ) ( I1 CK ) ;
    - n1 ( PIN IN0 ) ( I0 A ) ( M0 D0 ) ;
    - n2 ( I2 Y ) ( PIN OUT0 ) ;
    - floating + USE SIGNAL ;
END NETS

END DESIGN
"#;

#[test]
fn test_vertex_space_invariants() {
    init_logs();
    let graph = parse_def_graph(WIDE_DEF, &ParseOptions::default()).unwrap();

    assert_eq!(graph.vertex_count(), graph.cell_count + graph.io_count);
    assert_eq!(graph.cell_count, 5);
    assert_eq!(graph.io_count, 2);
    assert_eq!(
        graph.movable_count(),
        graph.cell_count - graph.fixed_cells.len()
    );

    // Pin ids are contiguous after the cells, in declaration order.
    let pin_ids: Vec<usize> = graph.io_pins.iter().map(|p| p.id.0).collect();
    assert_eq!(pin_ids, vec![5, 6]);
    assert_eq!(graph.names.name(VertexId(5)), Some("IN0"));
    assert_eq!(graph.names.name(VertexId(6)), Some("OUT0"));

    // Every net index lies inside the vertex space.
    for net in &graph.nets {
        for id in &net.vertices {
            assert!(id.0 < graph.vertex_count(), "id {} out of range", id);
        }
    }
}

#[test]
fn test_excluded_net_produces_no_hyperedge() {
    init_logs();
    let graph = parse_def_graph(WIDE_DEF, &ParseOptions::default()).unwrap();
    assert!(graph.nets.iter().all(|net| net.name != "clk_i"));
    assert_eq!(graph.nets.len(), 3);
}

#[test]
fn test_custom_exclusion_set() {
    init_logs();
    let reader = DefReader::new().with_excluded_nets(["n1", "n2"]);
    let graph = reader.parse(WIDE_DEF).unwrap();
    let names: Vec<&str> = graph.nets.iter().map(|net| net.name.as_str()).collect();
    assert_eq!(names, vec!["floating"]);
}

#[test]
fn test_clock_net_kept_when_exclusions_cleared() {
    init_logs();
    let reader = DefReader::new().clear_excluded_nets();
    let graph = reader.parse(WIDE_DEF).unwrap();
    assert!(graph.nets.iter().any(|net| net.name == "clk_i"));
}

#[test]
fn test_hypergraph_artifact_content() {
    init_logs();
    let graph = parse_def_graph(SAMPLE_DEF, &ParseOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hypergraph.txt");
    write_hypergraph(&graph, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let expected = [
        "Number of vertices: 4",
        "  Number of macros + std_cells: 3",
        "  Number of IOs: 1",
        "hyperedges: driver_id load_id1 load_id2 ...",
        "0 1 3",
        "",
    ]
    .join("\n");
    assert_eq!(content, expected);
}

#[test]
fn test_vertex_info_artifact_content() {
    init_logs();
    let graph = parse_def_graph(SAMPLE_DEF, &ParseOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vertex_info.txt");
    write_vertex_info(&graph, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let expected = [
        "vertex_id, vertex_name, is_fixed, x, y",
        "0, U0, 0, 0, 0",
        "1, U1, 0, 0, 0",
        "2, U2, 1, 100, 200",
        "3, P0, 1, 5, 5",
        "",
    ]
    .join("\n");
    assert_eq!(content, expected);
}

#[test]
fn test_vertex_info_parses_as_csv() {
    init_logs();
    let graph = parse_def_graph(WIDE_DEF, &ParseOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vertex_info.txt");
    write_vertex_info(&graph, &path).unwrap();

    #[derive(Debug, serde::Deserialize)]
    struct VertexRow {
        vertex_id: usize,
        vertex_name: String,
        is_fixed: u8,
        x: i64,
        y: i64,
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&path)
        .unwrap();
    let rows: Vec<VertexRow> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(rows.len(), graph.vertex_count());
    for (index, row) in rows.iter().enumerate() {
        assert_eq!(row.vertex_id, index);
        assert_eq!(
            row.vertex_name,
            graph.names.name(VertexId(index)).unwrap()
        );
        let fixed = graph.is_fixed(VertexId(index));
        assert_eq!(row.is_fixed == 1, fixed);
        if !fixed {
            assert_eq!((row.x, row.y), (0, 0));
        }
    }

    // Spot checks against the fixture
    assert_eq!(rows[2].vertex_name, "M0");
    assert_eq!((rows[2].x, rows[2].y), (1000, 2000));
    assert_eq!(rows[6].vertex_name, "OUT0");
    assert_eq!((rows[6].x, rows[6].y), (5000, 500));
}

#[test]
fn test_empty_net_emits_no_blank_line() {
    init_logs();
    let graph = parse_def_graph(WIDE_DEF, &ParseOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hypergraph.txt");
    write_hypergraph(&graph, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.lines().all(|line| !line.trim().is_empty()));
    // 4 header lines + 2 non-empty nets (clk_i excluded, `floating` empty)
    assert_eq!(content.lines().count(), 6);
}

#[test]
fn test_reader_round_trip_through_file() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let def_path = dir.path().join("sample.def");
    fs::write(&def_path, SAMPLE_DEF).unwrap();

    let graph = DefReader::new().read(&def_path).unwrap();
    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.nets.len(), 1);
    assert_eq!(
        graph.nets[0].vertices,
        vec![VertexId(0), VertexId(1), VertexId(3)]
    );
}

#[test]
fn test_missing_nets_section_is_fatal() {
    init_logs();
    let def = "COMPONENTS 0 ;\nEND COMPONENTS\nPINS 0 ;\nEND PINS\n";
    let err = parse_def_graph(def, &ParseOptions::default()).unwrap_err();
    assert_eq!(err, ParseError::SectionNotFound("NETS"));
}

#[test]
fn test_malformed_component_reports_location() {
    init_logs();
    let def = "COMPONENTS 1 ;\nBOGUS ENTRY ;\nEND COMPONENTS\nPINS 0 ;\nEND PINS\nNETS 0 ;\nEND NETS\n";
    let err = parse_def_graph(def, &ParseOptions::default()).unwrap_err();
    match err {
        ParseError::MalformedRecord {
            section, location, ..
        } => {
            assert_eq!(section, "COMPONENTS");
            assert_eq!(location, "line 2");
        }
        other => panic!("unexpected error: {other}"),
    }
}
