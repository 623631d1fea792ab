//! Cohort-relative spread of lab values
//!
//! Runs once every patient row exists. Each spread is compared with the
//! 75th percentile of the same spread over the whole cohort: rows at or above
//! it are marked 1, all others 2.

use log::debug;

use super::CohortStage;
use crate::models::FeatureRow;
use crate::utils::numeric::percentile;

const UPPER_QUARTILE: f64 = 75.0;

/// Max column, min column, spread column, flag column
const SPREADS: [(&str, &str, &str, &str); 3] = [
    (
        "CREATININE_LEVEL_MAX",
        "CREATININE_LEVEL_MIN",
        "CREATININE_LEVEL_DIFF",
        "CREATININE_75DIFF_FLAG",
    ),
    (
        "HEMOGLOBIN_LEVEL_MAX",
        "HEMOGLOBIN_LEVEL_MIN",
        "HEMOGLOBIN_LEVEL_DIFF",
        "HEMOGLOBIN_75DIFF_FLAG",
    ),
    ("BNP_LEVEL_MAX", "BNP_LEVEL_MIN", "BNP_LEVEL_DIFF", "BNP_LEVEL_75DIFF_FLAG"),
];

pub struct LabSpread;

impl CohortStage for LabSpread {
    fn stage_name(&self) -> &'static str {
        "lab_spread"
    }

    fn apply(&self, rows: &mut [FeatureRow]) {
        for (max, min, diff, _) in SPREADS {
            for row in rows.iter_mut() {
                let spread = row.float(max) - row.float(min);
                row.set(diff, spread);
            }
        }

        for (_, _, diff, flag) in SPREADS {
            let spreads: Vec<f64> = rows.iter().map(|row| row.float(diff)).collect();
            let Some(threshold) = percentile(&spreads, UPPER_QUARTILE) else {
                continue;
            };
            debug!("{diff}: upper quartile {threshold}");
            for row in rows.iter_mut() {
                let marker: i64 = if row.float(diff) >= threshold { 1 } else { 2 };
                row.set(flag, marker);
            }
        }
    }
}
