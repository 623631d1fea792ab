//! Tests for assembling the feature table from an in-memory store

use ami_features::config::FeatureConfig;
use ami_features::features::builder::RowContext;
use ami_features::features::standard_groups;
use ami_features::models::{FeatureRow, NA};
use ami_features::{FeatureTableBuilder, compute_patient_row};

use crate::utils::{codes, cohort_store};

/// Columns whose value depends on the index admission
const INDEX_RELATIVE: [&str; 16] = [
    "VISIT_NO",
    "LOS",
    "PRIOR_SEPSIS_30D",
    "CREATININE_LEVEL_MAX",
    "TRANSFER_PATIENT_FLAG",
    "ED_VISIT_PRIOR_180_DAYS_COUNT",
    "STEMI_FLAG",
    "DISCH_MED_BB_FLAG",
    "DISCHARGE_LOCATION",
    "HISTORY_HYPERTENSION_FLAG",
    "COMORBID_CHF_FLAG",
    "KILLIP_CLASS",
    "IN_HOSPITAL_PCI_FLAG",
    "TROPONIN_AVG",
    "AKI_FLAG",
    "READMISSIONS_SUM",
];

#[test]
fn test_patient_without_index_keeps_declared_defaults() {
    let codes = codes();
    let store = cohort_store();
    let table = FeatureTableBuilder::new(&store, &codes).build().unwrap();

    let mut defaults = FeatureRow::for_patient("P200");
    for group in standard_groups() {
        group.declare(&mut defaults);
    }

    let row = table.row("P200").expect("every patient gets a row");
    assert_eq!(row.patient_id(), "P200");
    assert!(!row.has_index_admission());
    for column in INDEX_RELATIVE {
        assert_eq!(row.get(column), defaults.get(column), "{column}");
    }
    assert_eq!(row.text("AGE_AT_ADMIT"), NA);
}

#[test]
fn test_index_patient_features() {
    let codes = codes();
    let store = cohort_store();
    let table = FeatureTableBuilder::new(&store, &codes).build().unwrap();
    let row = table.row("P100").unwrap();

    assert_eq!(row.text("VISIT_NO"), "V10");
    assert_eq!(row.int("LOS"), 5);
    assert_eq!(row.float("CREATININE_LEVEL_FIRST"), 1.1);
    assert_eq!(row.float("CREATININE_LEVEL_LAST"), 1.3);
    assert_eq!(row.float("CREATININE_LEVEL_MAX"), 1.4);
    assert_eq!(row.int("SODIUM_LEVEL_AVG_136_FLAG"), 1);
    assert_eq!(row.int("ED_VISIT_PRIOR_180_DAYS_COUNT"), 1);
    assert_eq!(row.int("DISCH_MED_BB_FLAG"), 1);
    assert_eq!(row.int("DISCH_MED_BB_METHOD"), 1);
    assert_eq!(row.int("AKI_FLAG"), 1);
    assert_eq!(row.int("FLG_30D"), 1);
    assert_eq!(row.int("OUTCOME_30DRED"), 1);
    assert_eq!(row.int("GRACE_SCORE_AGE"), 75);
    assert_eq!(row.int("GRACE_SCORE_CREATININE_LEVEL_FIRST"), 7);
    assert_eq!(row.int("QUAD_LOS_NEW"), 25);
}

#[test]
fn test_same_day_tie_break() {
    let codes = codes();
    let store = cohort_store();

    let table = FeatureTableBuilder::new(&store, &codes).build().unwrap();
    assert_eq!(table.row("P300").unwrap().text("VISIT_NO"), "V31");

    let legacy = FeatureTableBuilder::new(&store, &codes)
        .with_config(FeatureConfig::legacy())
        .build()
        .unwrap();
    assert_eq!(legacy.row("P300").unwrap().text("VISIT_NO"), "V32");
}

#[test]
fn test_rows_match_standalone_computation() {
    let codes = codes();
    let store = cohort_store();
    let config = FeatureConfig::default();
    let groups = standard_groups();
    let context = RowContext {
        codes: &codes,
        config: &config,
        groups: &groups,
    };
    let table = FeatureTableBuilder::new(&store, &codes)
        .with_stages(Vec::new())
        .with_num_threads(Some(3))
        .build()
        .unwrap();

    assert_eq!(table.len(), 3);
    for row in table.rows() {
        let alone = compute_patient_row(row.patient_id(), &store, &context);
        let expected: Vec<_> = alone.iter().collect();
        let actual: Vec<_> = row.iter().collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_cohort_stage_columns_close_the_table() {
    let codes = codes();
    let store = cohort_store();
    let table = FeatureTableBuilder::new(&store, &codes).build().unwrap();

    let columns = table.columns();
    assert_eq!(
        &columns[columns.len() - 3..],
        ["CREATININE_75DIFF_FLAG", "HEMOGLOBIN_75DIFF_FLAG", "BNP_LEVEL_75DIFF_FLAG"]
    );
    for row in table.rows() {
        let flag = row.int("CREATININE_75DIFF_FLAG");
        assert!(flag == 1 || flag == 2);
    }
}
