//! Patient demographics and the registry's AMI admission dates

use super::{FeatureGroup, PatientContext};
use crate::codes::tables::ICD9_VERSION;
use crate::models::{Demographic, FeatureRow};
use crate::utils::date_utils::sort_chronologically;

const ICD10_LABEL: &str = "ICD-10-CM";

/// Columns copied verbatim from the first demographics row
const COPIED: [(&str, fn(&Demographic) -> &str); 7] = [
    ("GENDER", |d| &d.gender),
    ("SSN", |d| &d.ssn),
    ("ZIPCODE", |d| &d.zip),
    ("FIRST_NAME", |d| &d.first_name),
    ("LAST_NAME", |d| &d.last_name),
    ("MIDDLE_NAME", |d| &d.middle_name),
    ("DOB", |d| d.birth_date.raw()),
];

/// Identifying columns blanked when redaction is enabled
const IDENTIFYING: [&str; 4] = ["SSN", "FIRST_NAME", "LAST_NAME", "MIDDLE_NAME"];

/// Every column of the group in output order
const COLUMNS: [&str; 16] = [
    "MRN",
    "GENDER",
    "RACE",
    "ETHNICITY",
    "SSN",
    "ZIPCODE",
    "FIRST_NAME",
    "LAST_NAME",
    "MIDDLE_NAME",
    "DOB",
    "PRIM_DIAG",
    "ADMIT_DATE",
    "DISCHARGE_DATE",
    "INDEX_ADMIT_DATE",
    "INDEX_DISCHARGE_DATE",
    "VISIT_OCCURRENCE_ID",
];

pub struct Demographics;

impl FeatureGroup for Demographics {
    fn group_name(&self) -> &'static str {
        "demographics"
    }

    fn declare(&self, row: &mut FeatureRow) {
        for column in COLUMNS {
            row.declare(column, "");
        }
    }

    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        let records = ctx.repo.demographics_for_patient(ctx.patient_id);

        if let Some(first) = records.first().copied() {
            for (column, field) in COPIED {
                row.set(column, field(first));
            }
        }
        if ctx.config.redact_identifiers {
            for column in IDENTIFYING {
                row.set(column, "");
            }
        }

        let icd9 = ctx
            .diagnoses()
            .iter()
            .any(|dx| dx.code_version == ICD9_VERSION);
        row.set("PRIM_DIAG", if icd9 { ICD9_VERSION } else { ICD10_LABEL });

        // earliest registry admission; undated rows sort last and never win
        let mut by_admission = records.clone();
        sort_chronologically(&mut by_admission, |d| d.ami_admission_date.date());
        let earliest = by_admission
            .first()
            .filter(|d| d.ami_admission_date.date().is_some());
        if let Some(admission) = earliest {
            let admitted = admission.ami_admission_date.raw();
            row.set("ADMIT_DATE", admitted);
            row.set("DISCHARGE_DATE", admission.ami_discharge_date.as_str());
            row.set("INDEX_ADMIT_DATE", admitted);
            row.set("INDEX_DISCHARGE_DATE", admission.ami_discharge_date.as_str());
            row.set("VISIT_OCCURRENCE_ID", admission.visit_id.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::EventStore;
    use crate::config::FeatureConfig;
    use crate::features::testing::{run_group, run_group_with};
    use crate::models::Diagnosis;

    fn store() -> EventStore {
        let mut first = Demographic::new("P1", "05/17/1950");
        first.gender = "F".to_string();
        first.ssn = "123-45-6789".to_string();
        first.first_name = "Ada".to_string();
        let first = first.with_ami_admission("03-02-2019", "03-09-2019", "V9");
        let earlier = Demographic::new("P1", "05/17/1950").with_ami_admission(
            "01-15-2018",
            "01-20-2018",
            "V2",
        );
        EventStore::new()
            .with_demographics(vec![first, earlier])
            .with_diagnoses(vec![
                Diagnosis::new("P1", "V2", "01/15/2018", "410.71").with_code_version("ICD9CM"),
            ])
    }

    #[test]
    fn test_columns_and_earliest_admission() {
        let row = run_group(&Demographics, &store(), "P1");
        let names: Vec<_> = row.column_names().collect();
        assert_eq!(&names[..5], &["PERSON_ID", "MRN", "GENDER", "RACE", "ETHNICITY"]);
        assert_eq!(row.text("GENDER"), "F");
        assert_eq!(row.text("DOB"), "05/17/1950");
        assert_eq!(row.text("PRIM_DIAG"), "ICD9CM");
        assert_eq!(row.text("ADMIT_DATE"), "01-15-2018");
        assert_eq!(row.text("INDEX_DISCHARGE_DATE"), "01-20-2018");
        assert_eq!(row.text("VISIT_OCCURRENCE_ID"), "V2");
    }

    #[test]
    fn test_patient_without_records() {
        let row = run_group(&Demographics, &store(), "P2");
        assert_eq!(row.text("GENDER"), "");
        assert_eq!(row.text("PRIM_DIAG"), ICD10_LABEL);
        assert_eq!(row.text("ADMIT_DATE"), "");
    }

    #[test]
    fn test_redaction_blanks_identifiers() {
        let config = FeatureConfig {
            redact_identifiers: true,
            ..FeatureConfig::default()
        };
        let row = run_group_with(&Demographics, &store(), "P1", &config);
        assert_eq!(row.text("SSN"), "");
        assert_eq!(row.text("FIRST_NAME"), "");
        assert_eq!(row.text("GENDER"), "F");
    }
}
