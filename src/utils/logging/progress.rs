//! Progress bars for loading extracts and building patient rows
//!
//! Both helpers return a hidden bar when progress output is off, so callers
//! can tick and finish unconditionally.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Style of the per-patient bar
pub const PATIENT_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} patients ({per_sec}) {msg}";

/// Style of the extract loading spinner
pub const LOADING_SPINNER_TEMPLATE: &str = "{spinner:.green} {elapsed_precise} {msg}";

/// Bar advanced once per finished patient row
///
/// # Arguments
/// * `patients` - Number of rows that will be built
/// * `visible` - Whether to draw the bar at all
#[must_use]
pub fn create_patient_progress_bar(patients: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(patients as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(PATIENT_BAR_TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message("Building feature rows");
    pb
}

/// Spinner shown while the extract tables are read
#[must_use]
pub fn create_loading_spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(LOADING_SPINNER_TEMPLATE) {
        pb.set_style(style);
    }
    pb.set_message("Loading extracts");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Finish a progress bar with a completion message
///
/// # Arguments
/// * `pb` - The `ProgressBar` to finish
/// * `message` - Optional completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invisible_bars_are_hidden() {
        assert!(create_patient_progress_bar(10, false).is_hidden());
        assert!(create_loading_spinner(false).is_hidden());
    }

    #[test]
    fn test_patient_bar_counts_patients() {
        let pb = create_patient_progress_bar(4, true);
        assert_eq!(pb.length(), Some(4));
        pb.inc(4);
        finish_progress_bar(&pb, None);
        assert!(pb.is_finished());
    }
}
