//! Tests for window aggregation and lab statistics

use ami_features::algorithm::window::{DayWindow, LabStatistics, count_matching, presence_flag};
use ami_features::codes::CodeSet;
use ami_features::config::LabValueMode;
use ami_features::models::{Diagnosis, LabObservation};
use chrono::NaiveDate;

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 3, 1).unwrap()
}

#[test]
fn test_duplicate_events_do_not_change_flags() {
    let sepsis = CodeSet::new(&["A41.9"]);
    let once = [Diagnosis::new("P1", "V1", "02/20/2019", "A41.9")];
    let repeated = [
        Diagnosis::new("P1", "V1", "02/20/2019", "A41.9"),
        Diagnosis::new("P1", "V1", "02/20/2019", "A41.9"),
        Diagnosis::new("P1", "V2", "02/25/2019", "A41.9"),
    ];
    let once: Vec<_> = once.iter().collect();
    let repeated: Vec<_> = repeated.iter().collect();
    let window = DayWindow::look_back(30);

    assert!(presence_flag(&once, anchor(), &sepsis, window));
    assert_eq!(
        presence_flag(&once, anchor(), &sepsis, window),
        presence_flag(&repeated, anchor(), &sepsis, window)
    );
    // counts, unlike flags, see every row
    assert_eq!(count_matching(&repeated, anchor(), &sepsis, window), 3);
}

#[test]
fn test_window_bounds_are_inclusive() {
    let codes = CodeSet::new(&["I50.1"]);
    let events = [Diagnosis::new("P1", "V1", "03/31/2019", "I50.1")];
    let events: Vec<_> = events.iter().collect();

    assert!(presence_flag(&events, anchor(), &codes, DayWindow::look_ahead(30)));
    assert!(!presence_flag(&events, anchor(), &codes, DayWindow::new(0, 29)));
}

#[test]
fn test_undated_events_never_match() {
    let codes = CodeSet::new(&["I50.1"]);
    let events = [Diagnosis::new("P1", "V1", "", "I50.1")];
    let events: Vec<_> = events.iter().collect();
    assert!(!presence_flag(&events, anchor(), &codes, DayWindow::new(i64::MIN, i64::MAX)));
}

#[test]
fn test_statistics_follow_timestamps() {
    let labs = [
        LabObservation::new("P1", "V1", "CREATININE", "2.0", "03/02/2019 06:00"),
        LabObservation::new("P1", "V1", "CREATININE", "1.0", "03/01/2019 23:00"),
        LabObservation::new("P1", "V1", "CREATININE", "3.0", "03/02/2019 05:00"),
    ];
    let refs: Vec<_> = labs.iter().collect();

    let stats = LabStatistics::from_observations(&refs, LabValueMode::Strict).unwrap();
    assert_eq!(stats.count, 3);
    assert_eq!(stats.mean, 2.0);
    assert_eq!(stats.min, 1.0);
    assert_eq!(stats.max, 3.0);
    assert_eq!(stats.first, 1.0);
    assert_eq!(stats.last, 2.0);
}

#[test]
fn test_strict_mode_skips_text_values() {
    let labs = [
        LabObservation::new("P1", "V1", "Troponin I", "<0.01", "03/01/2019 06:00"),
        LabObservation::new("P1", "V1", "Troponin I", "0.8", "03/01/2019 07:00"),
    ];
    let refs: Vec<_> = labs.iter().collect();

    let strict = LabStatistics::from_observations(&refs, LabValueMode::Strict).unwrap();
    assert_eq!(strict.count, 1);
    assert_eq!(strict.mean, 0.8);

    let legacy = LabStatistics::from_observations(&refs, LabValueMode::Legacy).unwrap();
    assert_eq!(legacy.count, 2);
    assert_eq!(legacy.first, 0.0);
    assert!((legacy.mean - 0.4).abs() < 1e-12);
}
