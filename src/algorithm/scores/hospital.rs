//! HOSPITAL readmission score

use crate::codes::tables::ONCOLOGY_RANGES;

/// Inputs of the HOSPITAL score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HospitalInputs {
    /// Length of stay of the index admission in days
    pub length_of_stay: i64,
    /// A procedure was performed during the stay
    pub procedure_during_stay: bool,
    /// Admissions discharged in the year before the index admission
    pub prior_year_admissions: i64,
    pub nonelective_admission: bool,
    pub oncology_service: bool,
    /// Last hemoglobin of the stay below 12 g/dL
    pub low_hemoglobin_at_discharge: bool,
    /// Last sodium of the stay below 135 mEq/L
    pub low_sodium_at_discharge: bool,
}

impl HospitalInputs {
    #[must_use]
    pub const fn long_stay(&self) -> bool {
        self.length_of_stay > 5
    }
}

/// Weighted HOSPITAL score
#[must_use]
pub fn hospital_score(inputs: &HospitalInputs) -> i64 {
    2 * i64::from(inputs.long_stay())
        + i64::from(inputs.procedure_during_stay)
        + 2 * i64::from(inputs.prior_year_admissions > 2)
        + 3 * i64::from(inputs.prior_year_admissions > 5)
        + i64::from(inputs.nonelective_admission)
        + 2 * i64::from(inputs.oncology_service)
        + i64::from(inputs.low_hemoglobin_at_discharge)
        + i64::from(inputs.low_sodium_at_discharge)
}

/// Whether a diagnosis code falls in an oncology range
///
/// Ranges are half-open and compared lexicographically on the code text.
#[must_use]
pub fn is_oncology_code(code: &str) -> bool {
    ONCOLOGY_RANGES
        .iter()
        .any(|(lo, hi)| *lo <= code && code < *hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_weights() {
        assert_eq!(hospital_score(&HospitalInputs::default()), 0);

        let inputs = HospitalInputs {
            length_of_stay: 6,
            procedure_during_stay: true,
            prior_year_admissions: 6,
            nonelective_admission: true,
            oncology_service: true,
            low_hemoglobin_at_discharge: true,
            low_sodium_at_discharge: true,
        };
        assert_eq!(hospital_score(&inputs), 2 + 1 + 2 + 3 + 1 + 2 + 1 + 1);

        let inputs = HospitalInputs {
            length_of_stay: 5,
            prior_year_admissions: 3,
            ..HospitalInputs::default()
        };
        assert_eq!(hospital_score(&inputs), 2);
    }

    #[test]
    fn test_oncology_ranges_are_lexicographic() {
        assert!(is_oncology_code("162.9"));
        assert!(is_oncology_code("C34.90"));
        assert!(is_oncology_code("D3A.0"));
        assert!(!is_oncology_code("240"));
        assert!(!is_oncology_code("I21.4"));
        assert!(!is_oncology_code("D50.9"));
        // text comparison, not numeric
        assert!(is_oncology_code("2"));
    }
}
