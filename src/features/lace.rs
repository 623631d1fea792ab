//! LACE readmission index from columns written by earlier groups

use super::{FeatureGroup, PatientContext, declare_zeros};
use crate::algorithm::scores::{LaceBreakdown, LaceInputs};
use crate::models::FeatureRow;

pub struct LaceScore;

impl LaceScore {
    /// Collect the LACE inputs from a row; missing columns read as 0
    #[must_use]
    pub fn inputs(row: &FeatureRow) -> LaceInputs {
        LaceInputs {
            length_of_stay: row.int("LOS"),
            nonelective_admission: row.int("NONELECTIVE_ADMISSION_FLAG") == 1,
            charlson_score: row.int("CHARLSON_DEYO_SCORE"),
            ed_visits_180d: row.int("ED_VISIT_PRIOR_180_DAYS_COUNT"),
        }
    }
}

impl FeatureGroup for LaceScore {
    fn group_name(&self) -> &'static str {
        "lace"
    }

    fn declare(&self, row: &mut FeatureRow) {
        declare_zeros(
            row,
            &[
                "LACE_ACUITY_SCORE",
                "LACE_LOS_SCORE",
                "LACE_CHARLSON_SCORE",
                "LACE_ED_SCORE",
                "LACE_SCORE",
            ],
        );
    }

    fn compute(&self, _ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        let lace = LaceBreakdown::from_inputs(&Self::inputs(row));
        row.set("LACE_ACUITY_SCORE", lace.acuity);
        row.set("LACE_LOS_SCORE", lace.length_of_stay);
        row.set("LACE_CHARLSON_SCORE", lace.charlson);
        row.set("LACE_ED_SCORE", lace.emergency_visits);
        row.set("LACE_SCORE", lace.total());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::EventStore;
    use crate::config::FeatureConfig;
    use crate::features::testing::run_group_on;

    fn lace_for(los: i64, nonelective: bool, charlson: i64, ed_visits: i64) -> FeatureRow {
        let mut row = FeatureRow::for_patient("P1");
        row.set("LOS", los);
        row.set("NONELECTIVE_ADMISSION_FLAG", nonelective);
        row.set("CHARLSON_DEYO_SCORE", charlson);
        row.set("ED_VISIT_PRIOR_180_DAYS_COUNT", ed_visits);
        run_group_on(&LaceScore, &EventStore::new(), row, &FeatureConfig::default())
    }

    #[test]
    fn test_los_buckets_skip_six_points() {
        let scores: Vec<i64> = [1, 2, 3, 6, 13, 14]
            .iter()
            .map(|&los| lace_for(los, false, 0, 0).int("LACE_LOS_SCORE"))
            .collect();
        assert_eq!(scores, vec![1, 2, 3, 4, 5, 7]);
    }

    #[test]
    fn test_total_with_caps() {
        let row = lace_for(8, true, 6, 7);
        assert_eq!(row.int("LACE_ACUITY_SCORE"), 3);
        assert_eq!(row.int("LACE_LOS_SCORE"), 5);
        assert_eq!(row.int("LACE_CHARLSON_SCORE"), 5);
        assert_eq!(row.int("LACE_ED_SCORE"), 4);
        assert_eq!(row.int("LACE_SCORE"), 17);
    }

    #[test]
    fn test_patient_without_stay_scores_zero() {
        let row = lace_for(0, false, 0, 0);
        assert_eq!(row.int("LACE_SCORE"), 0);
    }
}
