//! Acute kidney injury staging
//!
//! Creatinine readings of the index stay are compared with the patient's own
//! baseline, the latest creatinine recorded outside the stay. A reading is
//! elevated when its ratio to the baseline reaches 1.5 or it exceeds the
//! baseline by 0.3 mg/dL or more.

use chrono::NaiveDate;

use crate::utils::date_utils::days_between;

/// Added to the baseline before dividing
pub const BASELINE_EPSILON: f64 = 0.001;

const STAGE_1_RATIO: f64 = 1.5;
const STAGE_1_DELTA: f64 = 0.3;
const STAGE_2_RATIO: f64 = 2.0;
const STAGE_3_RATIO: f64 = 3.0;

/// One creatinine value with the day it was drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatinineReading {
    pub value: f64,
    pub date: Option<NaiveDate>,
}

impl CreatinineReading {
    #[must_use]
    pub const fn new(value: f64, date: Option<NaiveDate>) -> Self {
        Self { value, date }
    }
}

/// Result of staging one index stay
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AkiAssessment {
    /// Stage of the last reading of the stay, 0 to 3
    pub stage: i64,
    /// Any reading of the stay was elevated
    pub any_elevated: bool,
    /// Highest ratio of a reading to the baseline
    pub max_ratio: f64,
    /// Lowest ratio of a reading to the baseline
    pub min_ratio: f64,
    /// Elevated during the stay but stage 0 at the last reading
    pub recovered: bool,
    /// Still staged at the last reading
    pub unresolved: bool,
    /// Days from the first to the last elevated reading
    pub duration_days: i64,
}

fn ratio(value: f64, baseline: f64) -> f64 {
    value / (baseline + BASELINE_EPSILON)
}

fn is_elevated(value: f64, baseline: f64) -> bool {
    ratio(value, baseline) >= STAGE_1_RATIO || value - baseline >= STAGE_1_DELTA
}

/// Stage of a single reading against the baseline
#[must_use]
pub fn stage_of(value: f64, baseline: f64) -> i64 {
    let r = ratio(value, baseline);
    if r >= STAGE_3_RATIO {
        3
    } else if r >= STAGE_2_RATIO {
        2
    } else if is_elevated(value, baseline) {
        1
    } else {
        0
    }
}

/// Stage the readings of an index stay, given in time order
///
/// Returns `None` when the stay has no readings.
#[must_use]
pub fn assess_aki(readings: &[CreatinineReading], baseline: f64) -> Option<AkiAssessment> {
    let last = readings.last()?;
    let stage = stage_of(last.value, baseline);

    let elevated: Vec<&CreatinineReading> = readings
        .iter()
        .filter(|reading| is_elevated(reading.value, baseline))
        .collect();
    let elevated_dates: Vec<NaiveDate> = elevated.iter().filter_map(|r| r.date).collect();
    let duration_days = match (elevated_dates.first(), elevated_dates.last()) {
        (Some(&first), Some(&last)) if elevated_dates.len() > 1 => days_between(last, first),
        _ => 0,
    };

    let ratios = readings.iter().map(|reading| ratio(reading.value, baseline));
    let max_ratio = ratios.clone().fold(f64::NEG_INFINITY, f64::max);
    let min_ratio = ratios.fold(f64::INFINITY, f64::min);

    Some(AkiAssessment {
        stage,
        any_elevated: !elevated.is_empty(),
        max_ratio,
        min_ratio,
        recovered: !elevated.is_empty() && stage == 0,
        unresolved: stage > 0,
        duration_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2019, 1, d)
    }

    #[test]
    fn test_stages_escalate() {
        assert_eq!(stage_of(1.0, 1.0), 0);
        assert_eq!(stage_of(1.3, 1.0), 1);
        assert_eq!(stage_of(1.6, 1.0), 1);
        assert_eq!(stage_of(2.1, 1.0), 2);
        assert_eq!(stage_of(3.1, 1.0), 3);
    }

    #[test]
    fn test_recovered_episode() {
        let readings = [
            CreatinineReading::new(1.0, day(1)),
            CreatinineReading::new(1.6, day(2)),
            CreatinineReading::new(1.7, day(5)),
            CreatinineReading::new(1.05, day(7)),
        ];
        let aki = assess_aki(&readings, 1.0).unwrap();
        assert_eq!(aki.stage, 0);
        assert!(aki.any_elevated);
        assert!(aki.recovered);
        assert!(!aki.unresolved);
        assert_eq!(aki.duration_days, 3);
        assert!((aki.max_ratio - 1.7 / 1.001).abs() < 1e-12);
        assert!((aki.min_ratio - 1.0 / 1.001).abs() < 1e-12);
    }

    #[test]
    fn test_unresolved_episode() {
        let readings = [
            CreatinineReading::new(0.9, day(1)),
            CreatinineReading::new(2.5, day(3)),
        ];
        let aki = assess_aki(&readings, 1.0).unwrap();
        assert_eq!(aki.stage, 2);
        assert!(aki.unresolved);
        assert!(!aki.recovered);
        // a single elevated reading has no duration
        assert_eq!(aki.duration_days, 0);
    }

    #[test]
    fn test_zero_baseline_does_not_divide_by_zero() {
        let aki = assess_aki(&[CreatinineReading::new(0.5, day(1))], 0.0).unwrap();
        assert_eq!(aki.stage, 3);
        assert!(aki.max_ratio.is_finite());
        assert_eq!(assess_aki(&[], 1.0), None);
    }
}
