//! GRACE cardiac risk score
//!
//! Each component maps a clinical value to points through a fixed range
//! table. The tables are reproduced literally, including the systolic
//! pressure row starting at 14, which only ever sees values from 140 upward
//! because earlier rows match first.

use super::killip::KillipClass;

/// Inputs of the GRACE score
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GraceInputs {
    /// Age in years at admission, if known
    pub age: Option<f64>,
    pub heart_rate: f64,
    pub systolic_bp: f64,
    /// First creatinine of the index stay in mg/dL
    pub creatinine_first: f64,
    pub killip: Option<KillipClass>,
    pub cardiac_marker_elevation: bool,
    pub cardiac_arrest: bool,
    pub stemi: bool,
}

/// GRACE points by component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraceBreakdown {
    pub age: i64,
    pub heart_rate: i64,
    pub systolic_bp: i64,
    pub creatinine: i64,
    pub killip: i64,
    pub cardiac_marker_elevation: i64,
    pub cardiac_arrest: i64,
    pub stemi: i64,
}

impl GraceBreakdown {
    #[must_use]
    pub fn from_inputs(inputs: &GraceInputs) -> Self {
        Self {
            age: inputs.age.map_or(0, age_points),
            heart_rate: heart_rate_points(inputs.heart_rate),
            systolic_bp: systolic_bp_points(inputs.systolic_bp),
            creatinine: creatinine_points(inputs.creatinine_first),
            killip: inputs.killip.map_or(0, killip_points),
            cardiac_marker_elevation: 14 * i64::from(inputs.cardiac_marker_elevation),
            cardiac_arrest: 39 * i64::from(inputs.cardiac_arrest),
            stemi: 28 * i64::from(inputs.stemi),
        }
    }

    #[must_use]
    pub const fn total(&self) -> i64 {
        self.age
            + self.heart_rate
            + self.systolic_bp
            + self.creatinine
            + self.killip
            + self.cardiac_marker_elevation
            + self.cardiac_arrest
            + self.stemi
    }
}

/// Age points; ages up to 30, and unknown or negative ages, score nothing
#[must_use]
pub fn age_points(age: f64) -> i64 {
    if age <= 30.0 {
        0
    } else if age <= 39.0 {
        8
    } else if age <= 49.0 {
        25
    } else if age <= 59.0 {
        41
    } else if age <= 69.0 {
        58
    } else if age <= 79.0 {
        75
    } else if age <= 89.0 {
        91
    } else {
        100
    }
}

#[must_use]
pub fn heart_rate_points(rate: f64) -> i64 {
    if rate < 50.0 {
        0
    } else if rate < 70.0 {
        3
    } else if rate < 90.0 {
        9
    } else if rate < 110.0 {
        15
    } else if rate < 150.0 {
        24
    } else if rate < 200.0 {
        38
    } else {
        46
    }
}

#[must_use]
pub fn systolic_bp_points(pressure: f64) -> i64 {
    if pressure < 80.0 {
        0
    } else if pressure < 100.0 {
        53
    } else if pressure < 120.0 {
        43
    } else if pressure < 140.0 {
        34
    } else if (14.0..160.0).contains(&pressure) {
        24
    } else if pressure < 200.0 {
        10
    } else {
        0
    }
}

/// Creatinine points; non-positive values score nothing
#[must_use]
pub fn creatinine_points(creatinine: f64) -> i64 {
    if creatinine <= 0.0 {
        0
    } else if creatinine < 0.4 {
        1
    } else if creatinine < 0.8 {
        4
    } else if creatinine < 1.2 {
        7
    } else if creatinine < 1.6 {
        10
    } else if creatinine < 2.0 {
        13
    } else if creatinine < 4.0 {
        21
    } else {
        28
    }
}

#[must_use]
pub const fn killip_points(class: KillipClass) -> i64 {
    match class {
        KillipClass::I => 0,
        KillipClass::II => 20,
        KillipClass::III => 39,
        KillipClass::IV => 59,
    }
}
