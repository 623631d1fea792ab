//! End-to-end run over extract files written to a temporary directory

use std::fs;

use ami_features::config::PipelineConfig;
use ami_features::{FeatureError, pipeline};

use crate::utils::write_extracts;

fn read_output(path: &std::path::Path) -> (csv::StringRecord, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().clone();
    let rows = reader.records().map(Result::unwrap).collect();
    (header, rows)
}

#[test]
fn test_pipeline_writes_one_row_per_patient() {
    let dir = tempfile::tempdir().unwrap();
    write_extracts(dir.path()).unwrap();
    let config = PipelineConfig::for_directory(dir.path())
        .with_progress(false)
        .with_num_threads(2);

    let summary = pipeline::run(&config).unwrap();
    assert_eq!(summary.patients, 2);
    assert_eq!(summary.index_admissions, 1);

    let (header, rows) = read_output(&config.output_path);
    assert_eq!(header.len(), summary.columns);
    assert_eq!(header.get(0), Some("PERSON_ID"));
    assert_eq!(rows.len(), 2);

    let column = |name: &str| header.iter().position(|h| h == name).unwrap();
    let p100 = &rows[0];
    assert_eq!(p100.get(0), Some("P100"));
    // quotes in the extract are stripped
    assert_eq!(p100.get(column("VISIT_NO")), Some("V10"));
    assert_eq!(p100.get(column("LOS")), Some("5"));
    assert_eq!(p100.get(column("CREATININE_LEVEL_FIRST")), Some("1.1"));
    assert_eq!(p100.get(column("TROPONIN_AVG")), Some("0.6"));
    assert_eq!(p100.get(column("CARDIAC_MARKER_ELEVATION_FLAG")), Some("1"));
    assert_eq!(p100.get(column("DISCHARGE_LOCATION")), Some("Home"));

    let p200 = &rows[1];
    assert_eq!(p200.get(column("LOS")), Some("0"));
    assert_eq!(p200.get(column("KILLIP_CLASS")), Some("NA"));
    assert_eq!(p200.get(column("TROPONIN_AVG")), Some("0.0"));
}

#[test]
fn test_missing_required_column_names_table() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_extracts(dir.path()).unwrap();
    fs::write(&paths.visits, "PAT_ID|VISIT_NO|ADM_DATE|PAT_CLASS\nP100|V10|03/01/2019|INPATIENT\n").unwrap();

    let config = PipelineConfig::for_directory(dir.path()).with_progress(false);
    match pipeline::run(&config) {
        Err(FeatureError::MissingColumn { table, column, .. }) => {
            assert_eq!(table, "visits");
            assert_eq!(column, "DSCH_DATE");
        }
        other => panic!("expected a missing column error, got {other:?}"),
    }
    assert!(!config.output_path.exists());
}

#[test]
fn test_missing_extract_is_a_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_extracts(dir.path()).unwrap();
    fs::remove_file(&paths.labs).unwrap();

    let config = PipelineConfig::for_directory(dir.path()).with_progress(false);
    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, FeatureError::File { .. }));
}

#[test]
fn test_code_overrides_replace_the_ami_list() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_extracts(dir.path()).unwrap();
    let overrides = dir.path().join("codes.json");
    fs::write(&overrides, r#"{ "ami": ["I99.9"] }"#).unwrap();

    let config = PipelineConfig::default()
        .with_inputs(paths)
        .with_output_path(dir.path().join("out").join("features.csv"))
        .with_code_overrides(&overrides)
        .with_progress(false);

    let summary = pipeline::run(&config).unwrap();
    assert_eq!(summary.index_admissions, 0);
    assert!(config.output_path.exists());

    let (header, rows) = read_output(&config.output_path);
    let visit = header.iter().position(|h| h == "VISIT_NO").unwrap();
    assert!(rows.iter().all(|row| row.get(visit) == Some("NA")));
}
