//! Presence flags and counts over coded events

use chrono::NaiveDate;

use super::DayWindow;
use crate::codes::CodeMatcher;
use crate::models::{Diagnosis, EventDate, Procedure};

/// An event carrying a code and the date it is placed at
pub trait CodedEvent {
    fn code(&self) -> &str;
    fn event_date(&self) -> &EventDate;
}

impl CodedEvent for Diagnosis {
    fn code(&self) -> &str {
        &self.code
    }

    /// Diagnoses are placed at the admission date of their visit
    fn event_date(&self) -> &EventDate {
        &self.admission_date
    }
}

impl CodedEvent for Procedure {
    fn code(&self) -> &str {
        &self.code
    }

    fn event_date(&self) -> &EventDate {
        &self.performed
    }
}

/// Number of events matching `matcher` whose offset lies in `window`
///
/// Every qualifying event counts, duplicates included.
pub fn count_matching<T, M>(events: &[&T], anchor: NaiveDate, matcher: &M, window: DayWindow) -> usize
where
    T: CodedEvent,
    M: CodeMatcher,
{
    events
        .iter()
        .filter(|event| matcher.matches(event.code()))
        .filter(|event| window.admits(event.event_date().offset_from(anchor)))
        .count()
}

/// Whether any event matching `matcher` lies in `window`
pub fn presence_flag<T, M>(events: &[&T], anchor: NaiveDate, matcher: &M, window: DayWindow) -> bool
where
    T: CodedEvent,
    M: CodeMatcher,
{
    events.iter().any(|event| {
        matcher.matches(event.code()) && window.admits(event.event_date().offset_from(anchor))
    })
}

/// Number of events passing `keep` whose `date_of` lies in `window`
pub fn count_dated<T, D, K>(
    events: &[&T],
    anchor: NaiveDate,
    window: DayWindow,
    date_of: D,
    keep: K,
) -> usize
where
    D: Fn(&T) -> &EventDate,
    K: Fn(&T) -> bool,
{
    events
        .iter()
        .filter(|event| keep(event))
        .filter(|event| window.admits(date_of(event).offset_from(anchor)))
        .count()
}
