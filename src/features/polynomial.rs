//! Squared and cubed copies of selected numeric columns

use super::{FeatureGroup, PatientContext};
use crate::models::{FeatureRow, FeatureValue};

/// Source column with its square and cube columns
const TERMS: [(&str, &str, &str); 7] = [
    ("CREATININE_LEVEL_MAX", "QUAD_CREATININE_MAX", "CUBIC_CREATININE_MAX"),
    ("HEMOGLOBIN_LEVEL_MAX", "QUAD_HEMOGLOBIN_MAX", "CUBIC_HEMOGLOBIN_MAX"),
    ("LOS", "QUAD_LOS_NEW", "CUBIC_LOS_NEW"),
    ("HOSPITAL_SCORE", "QUAD_HOSPITAL_SCORE", "CUBIC_HOSPITAL_SCORE"),
    ("GRACE_SCORE", "QUAD_GRACE_SCORE", "CUBIC_GRACE_SCORE"),
    ("LACE_SCORE", "QUAD_LACE_SCORE", "CUBIC_LACE_SCORE"),
    ("AKI_DURATION", "QUAD_AKI_DURATION", "CUBIC_AKI_DURATION"),
];

/// Raise a value to a power, keeping integers integral
///
/// Text is read as a number; unreadable text counts as 0.
#[must_use]
pub fn power(value: Option<&FeatureValue>, exponent: u32) -> FeatureValue {
    match value {
        Some(FeatureValue::Int(v)) => FeatureValue::Int(v.saturating_pow(exponent)),
        Some(other) => FeatureValue::Float(other.as_f64().powi(exponent as i32)),
        None => FeatureValue::Int(0),
    }
}

pub struct PolynomialTerms;

impl FeatureGroup for PolynomialTerms {
    fn group_name(&self) -> &'static str {
        "polynomial"
    }

    fn declare(&self, row: &mut FeatureRow) {
        for (_, quad, cubic) in TERMS {
            row.declare(quad, 0_i64);
            row.declare(cubic, 0_i64);
        }
    }

    fn compute(&self, _ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        for (source, quad, cubic) in TERMS {
            let squared = power(row.get(source), 2);
            let cubed = power(row.get(source), 3);
            row.set(quad, squared);
            row.set(cubic, cubed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::EventStore;
    use crate::config::FeatureConfig;
    use crate::features::testing::run_group_on;

    #[test]
    fn test_powers_keep_value_kind() {
        let mut row = FeatureRow::for_patient("P1");
        row.set("CREATININE_LEVEL_MAX", 1.5);
        row.set("LOS", 4_i64);
        row.set("GRACE_SCORE", 117_i64);
        let row = run_group_on(&PolynomialTerms, &EventStore::new(), row, &FeatureConfig::default());

        assert_eq!(row.get("QUAD_CREATININE_MAX"), Some(&FeatureValue::Float(2.25)));
        assert_eq!(row.get("CUBIC_CREATININE_MAX"), Some(&FeatureValue::Float(3.375)));
        assert_eq!(row.int("QUAD_LOS_NEW"), 16);
        assert_eq!(row.int("CUBIC_LOS_NEW"), 64);
        assert_eq!(row.int("CUBIC_GRACE_SCORE"), 1_601_613);
        // columns that were never written square to 0
        assert_eq!(row.int("QUAD_LACE_SCORE"), 0);
    }

    #[test]
    fn test_column_order() {
        let row = run_group_on(
            &PolynomialTerms,
            &EventStore::new(),
            FeatureRow::for_patient("P1"),
            &FeatureConfig::default(),
        );
        let names: Vec<_> = row.column_names().skip(1).take(4).collect();
        assert_eq!(
            names,
            vec!["QUAD_CREATININE_MAX", "CUBIC_CREATININE_MAX", "QUAD_HEMOGLOBIN_MAX", "CUBIC_HEMOGLOBIN_MAX"]
        );
    }
}
