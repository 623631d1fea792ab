//! Numeric statistics over lab observations

use std::cmp::Ordering;

use crate::config::LabValueMode;
use crate::models::LabObservation;
use crate::utils::numeric::coerce_value;

/// Summary of one lab item within a visit
///
/// Absence of observations is represented by `Option::None` at the call site,
/// never by a zeroed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabStatistics {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Earliest value by observation time
    pub first: f64,
    /// Latest value by observation time
    pub last: f64,
}

impl LabStatistics {
    /// Summarise already-ordered values
    #[must_use]
    pub fn from_ordered_values(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let last = *values.last()?;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;

        Some(Self {
            count: values.len(),
            mean,
            min,
            max,
            first,
            last,
        })
    }

    /// Summarise observations ordered by timestamp
    ///
    /// Observations are sorted stably by observation time; those without a
    /// readable timestamp sort last. Values unreadable under `mode` are skipped.
    #[must_use]
    pub fn from_observations(observations: &[&LabObservation], mode: LabValueMode) -> Option<Self> {
        let ordered = in_time_order(observations);
        let values: Vec<f64> = ordered
            .iter()
            .filter_map(|obs| coerce_value(&obs.value, mode))
            .collect();
        Self::from_ordered_values(&values)
    }
}

/// Observations sorted stably by time, undated ones last
#[must_use]
pub fn in_time_order<'a>(observations: &[&'a LabObservation]) -> Vec<&'a LabObservation> {
    let mut ordered = observations.to_vec();
    ordered.sort_by(|a, b| match (a.observed_at, b.observed_at) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ordered
}
