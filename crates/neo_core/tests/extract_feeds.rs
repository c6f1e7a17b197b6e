use neo_core::{load_approaches, load_neos, read_approaches, read_neos, ExtractError};
use std::io::Write;
use tempfile::NamedTempFile;

const NEO_CSV: &str = "\
id,spkid,full_name,pdes,name,prefix,neo,pha,diameter,extent
a0000433,2000433,\"   433 Eros (A898 PA)\",433,Eros,,Y,N,16.84,34.4x11.2x11.2
a0000486,2000486,\"   486 Cremona (A884 JA)\",486,,,Y,N,377.78,
a0000687,2000687,\"   687 Tinette\",687,Shyam,,Y,Y,,
";

const CAD_JSON: &str = r#"{
  "signature": {"version": "1.1", "source": "NASA/JPL SBDB Close Approach Data API"},
  "count": "3",
  "fields": ["des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max", "v_rel", "v_inf", "t_sigma_f", "h"],
  "data": [
    ["170903", "105", "2415020.507669610", "1900-Jan-01 00:11", "0.0921795123769547", "0.0912006569517418", "0.0931589328621806", "16.7523040362574", "16.7505784933163", "01:00", "18.1"],
    ["433", "659", "2415024.382985431", "1900-Jan-04 21:11", "", "0.3", "0.3", "", "5.1", "< 00:01", "10.4"],
    ["433", "659", "2415096.162303474", "1900-Mar-17 15:54", "0.5", null, null, "6.25", "6.2", "< 00:01", "10.4"]
  ]
}"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file should be created");
    file.write_all(contents.as_bytes()).expect("fixture should be written");
    file.flush().expect("fixture should be flushed");
    file
}

#[test]
fn neos_load_in_file_order_with_sentinels() {
    let neos = read_neos(NEO_CSV.as_bytes()).expect("catalog fixture should parse");
    assert_eq!(neos.len(), 3);

    assert_eq!(neos[0].designation.as_deref(), Some("433"));
    assert_eq!(neos[0].name.as_deref(), Some("Eros"));
    assert_eq!(neos[0].diameter, 16.84);
    assert!(!neos[0].hazardous);

    assert_eq!(neos[1].designation.as_deref(), Some("486"));
    assert_eq!(neos[1].name, None);
    assert_eq!(neos[1].fullname(), "486");

    assert_eq!(neos[2].name.as_deref(), Some("Shyam"));
    assert!(neos[2].diameter_is_unknown());
    assert!(neos[2].hazardous);
    assert_eq!(
        neos[2].to_string(),
        "A NearEarthObject 687 (Shyam) has a unknown diameter and is potentially hazardous."
    );
}

#[test]
fn neo_diameters_are_positive_or_unknown_and_names_never_empty() {
    for neo in read_neos(NEO_CSV.as_bytes()).expect("catalog fixture should parse") {
        assert!(neo.diameter_is_unknown() || (neo.diameter.is_finite() && neo.diameter > 0.0));
        assert_ne!(neo.name.as_deref(), Some(""));
        assert!(neo.approaches().is_empty());
    }
}

#[test]
fn hazard_marker_is_exactly_y() {
    let csv = "pdes,name,diameter,pha\n1,,,Y\n2,,,y\n3,,,\n4,,,N\n5,,,Yes\n";
    let flags: Vec<bool> = read_neos(csv.as_bytes())
        .expect("hazard rows should parse")
        .iter()
        .map(|neo| neo.hazardous)
        .collect();
    assert_eq!(flags, vec![true, false, false, false, false]);
}

#[test]
fn neos_keep_duplicate_rows() {
    let csv = "pdes,name,diameter,pha\n433,Eros,,N\n433,Eros,,N\n";
    assert_eq!(read_neos(csv.as_bytes()).expect("catalog should parse").len(), 2);
}

#[test]
fn malformed_diameter_aborts_neo_load() {
    let csv = "pdes,name,diameter,pha\n433,Eros,16.84,N\n486,,big,N\n";
    let err = read_neos(csv.as_bytes()).expect_err("bad row should be rejected");
    match err {
        ExtractError::MalformedField {
            row, field, value, ..
        } => {
            assert_eq!(row, 2);
            assert_eq!(field, "diameter");
            assert_eq!(value, "big");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_positive_diameter_aborts_neo_load() {
    let csv = "pdes,name,diameter,pha\n1,,0,N\n2,,-3.5,N\n";
    let err = read_neos(csv.as_bytes()).expect_err("zero diameter should be rejected");
    assert!(
        matches!(
            err,
            ExtractError::MalformedField {
                row: 1,
                field: "diameter",
                ..
            }
        ),
        "unexpected error: {err}"
    );

    let csv = "pdes,name,diameter,pha\n2,,-3.5,N\n";
    let err = read_neos(csv.as_bytes()).expect_err("negative diameter should be rejected");
    assert!(matches!(
        err,
        ExtractError::MalformedField {
            field: "diameter",
            ..
        }
    ));
}

#[test]
fn truncated_neo_row_aborts_load() {
    let csv = "pdes,name,diameter,pha\n433,Eros,16.84,Y\n2101,Ado\n";
    let err = read_neos(csv.as_bytes()).expect_err("truncated row should be rejected");
    assert!(
        matches!(err, ExtractError::MalformedRow { row: 2, .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn padded_names_are_trimmed_on_load() {
    let csv = "pdes,name,diameter,pha\n433, Eros ,16.84,N\n";
    let neos = read_neos(csv.as_bytes()).expect("catalog should parse");
    assert_eq!(neos[0].name.as_deref(), Some("Eros"));
}

#[test]
fn empty_designation_aborts_neo_load() {
    let csv = "pdes,name,diameter,pha\n,Nameless,1.0,N\n";
    let err = read_neos(csv.as_bytes()).expect_err("bad row should be rejected");
    assert!(matches!(
        err,
        ExtractError::MissingField {
            row: 1,
            field: "pdes"
        }
    ));
}

#[test]
fn approaches_load_positional_fields_in_order() {
    let approaches = read_approaches(CAD_JSON.as_bytes()).expect("approach fixture should parse");
    assert_eq!(approaches.len(), 3);

    let first = &approaches[0];
    assert_eq!(first.designation(), Some("170903"));
    assert_eq!(first.time_str(), "1900-01-01 00:11");
    assert_eq!(first.distance, 0.0921795123769547);
    assert_eq!(first.velocity, 16.7523040362574);
    assert!(!first.is_linked());

    assert!(approaches[1].distance_is_unknown());
    assert!(approaches[1].velocity_is_unknown());
    assert_eq!(approaches[2].time_str(), "1900-03-17 15:54");
    assert_eq!(approaches[2].velocity, 6.25);
}

#[test]
fn approach_without_data_field_is_a_json_error() {
    let err = read_approaches(r#"{"count": "0"}"#.as_bytes())
        .expect_err("document without data should be rejected");
    assert!(matches!(err, ExtractError::Json(_)));
}

#[test]
fn empty_data_array_yields_no_approaches() {
    let approaches =
        read_approaches(r#"{"data": []}"#.as_bytes()).expect("empty data should parse");
    assert!(approaches.is_empty());
}

#[test]
fn short_approach_row_is_rejected() {
    let json = r#"{"data": [["433", "659", "2415024.38", "1900-Jan-04 21:11", "0.3"]]}"#;
    let err = read_approaches(json.as_bytes()).expect_err("bad row should be rejected");
    assert!(matches!(err, ExtractError::MalformedRow { row: 1, .. }));
}

#[test]
fn malformed_velocity_aborts_approach_load() {
    let json = r#"{"data": [["433", "659", "2415024.38", "1900-Jan-04 21:11", "0.3", "", "", "fast"]]}"#;
    let err = read_approaches(json.as_bytes()).expect_err("bad row should be rejected");
    assert!(matches!(
        err,
        ExtractError::MalformedField { row: 1, field: "v_rel", .. }
    ));
}

#[test]
fn malformed_approach_date_aborts_approach_load() {
    let json = r#"{"data": [["433", "659", "2415024.38", "1900-13-04 21:11", "0.3", "", "", "5"]]}"#;
    let err = read_approaches(json.as_bytes()).expect_err("bad row should be rejected");
    match err {
        ExtractError::MalformedField { field, value, .. } => {
            assert_eq!(field, "cd");
            assert_eq!(value, "1900-13-04 21:11");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_approach_date_is_reported() {
    let json = r#"{"data": [["433", "659", "2415024.38", null, "0.3", "", "", "5"]]}"#;
    let err = read_approaches(json.as_bytes()).expect_err("bad row should be rejected");
    assert!(matches!(
        err,
        ExtractError::MissingField { row: 1, field: "cd" }
    ));
}

#[test]
fn load_functions_read_from_disk() {
    let neo_file = write_temp(NEO_CSV);
    let cad_file = write_temp(CAD_JSON);

    assert_eq!(load_neos(neo_file.path()).expect("catalog file should load").len(), 3);
    assert_eq!(load_approaches(cad_file.path()).expect("approach file should load").len(), 3);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let missing = dir.path().join("neos.csv");

    let err = load_neos(&missing).expect_err("missing file should be rejected");
    match &err {
        ExtractError::Io { path, .. } => assert_eq!(path, &missing),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("neos.csv"));
    assert!(matches!(
        load_approaches(dir.path().join("cad.json")).expect_err("missing file should be rejected"),
        ExtractError::Io { .. }
    ));
}
