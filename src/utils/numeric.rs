//! Numeric coercion for text-typed extract values.

use crate::config::LabValueMode;

/// Parse a finite number, tolerating surrounding whitespace
#[must_use]
pub fn parse_numeric(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a number, falling back to 0 for anything unreadable
///
/// A malformed value and a genuine zero are indistinguishable afterwards.
#[must_use]
pub fn try_float(s: &str) -> f64 {
    parse_numeric(s).unwrap_or(0.0)
}

/// Coerce an observation value according to the configured mode
///
/// `Strict` drops unreadable values, `Legacy` keeps them as zero.
#[must_use]
pub fn coerce_value(s: &str, mode: LabValueMode) -> Option<f64> {
    match mode {
        LabValueMode::Strict => parse_numeric(s),
        LabValueMode::Legacy => Some(try_float(s)),
    }
}

/// Percentile with linear interpolation between closest ranks
///
/// `q` is in percent (0-100). Returns `None` for an empty input.
#[must_use]
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}
