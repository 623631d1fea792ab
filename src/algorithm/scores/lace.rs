//! LACE readmission index

/// Inputs of the LACE index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaceInputs {
    pub length_of_stay: i64,
    pub nonelective_admission: bool,
    pub charlson_score: i64,
    /// Emergency visits in the 180 days before the index admission
    pub ed_visits_180d: i64,
}

/// LACE components and total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaceBreakdown {
    pub acuity: i64,
    pub length_of_stay: i64,
    pub charlson: i64,
    pub emergency_visits: i64,
}

impl LaceBreakdown {
    #[must_use]
    pub fn from_inputs(inputs: &LaceInputs) -> Self {
        Self {
            acuity: 3 * i64::from(inputs.nonelective_admission),
            length_of_stay: los_points(inputs.length_of_stay),
            charlson: charlson_points(inputs.charlson_score),
            emergency_visits: inputs.ed_visits_180d.min(4),
        }
    }

    #[must_use]
    pub const fn total(&self) -> i64 {
        self.acuity + self.length_of_stay + self.charlson + self.emergency_visits
    }
}

/// Length-of-stay points; there is no 6-point step
#[must_use]
pub const fn los_points(los: i64) -> i64 {
    match los {
        i64::MIN..=0 => 0,
        1 => 1,
        2 => 2,
        3 => 3,
        4..=6 => 4,
        7..=13 => 5,
        _ => 7,
    }
}

/// Charlson points: the score itself, or 5 from a score of 4 upwards
#[must_use]
pub const fn charlson_points(score: i64) -> i64 {
    if score >= 4 { 5 } else { score }
}
