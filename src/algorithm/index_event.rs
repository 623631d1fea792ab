//! Index admission resolution
//!
//! The index admission is the earliest AMI-coded admission of a patient. Every
//! window-relative feature is measured in days from its admission date.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::codes::{CodeBook, CodeMatcher};
use crate::collections::EventRepository;
use crate::config::IndexTieBreak;
use crate::error::{FeatureError, Result};
use crate::models::{Diagnosis, EventDate};

/// The temporal anchor of one patient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexAdmission {
    pub patient_id: String,
    /// Visit carrying the earliest AMI diagnosis
    pub visit_id: String,
    pub admission_date: NaiveDate,
    /// Admission date as extracted
    pub admission_raw: String,
    /// Visit carrying the most recent AMI diagnosis, by admission date
    pub latest_visit_id: String,
}

impl IndexAdmission {
    /// Days from the index admission to `date`, if the date is readable
    #[must_use]
    pub fn offset_of(&self, date: &EventDate) -> Option<i64> {
        date.offset_from(self.admission_date)
    }
}

/// Order two visit identifiers, numerically when both are numbers
fn compare_visit_ids(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Resolve the index admission from a patient's diagnoses
///
/// AMI rows with an unreadable admission date are not candidates. Among rows
/// sharing the earliest date, `tie_break` decides which visit wins.
///
/// # Errors
/// Returns `NoIndexEvent` when the patient has no dated AMI diagnosis.
pub fn select_index_admission(
    patient_id: &str,
    diagnoses: &[&Diagnosis],
    codes: &CodeBook,
    tie_break: IndexTieBreak,
) -> Result<IndexAdmission> {
    let candidates: Vec<(NaiveDate, &Diagnosis)> = diagnoses
        .iter()
        .filter(|dx| codes.ami.matches(&dx.code))
        .filter_map(|dx| dx.admission_date.date().map(|date| (date, *dx)))
        .collect();

    // min_by and max_by keep the first and the last of equal elements respectively
    let earliest = match tie_break {
        IndexTieBreak::InputOrder => candidates.iter().min_by_key(|(date, _)| *date),
        IndexTieBreak::LowestVisitId => candidates.iter().min_by(|(da, a), (db, b)| {
            da.cmp(db)
                .then_with(|| compare_visit_ids(&a.visit_id, &b.visit_id))
        }),
    };
    let latest = match tie_break {
        IndexTieBreak::InputOrder => candidates.iter().max_by_key(|(date, _)| *date),
        IndexTieBreak::LowestVisitId => candidates.iter().max_by(|(da, a), (db, b)| {
            da.cmp(db)
                .then_with(|| compare_visit_ids(&a.visit_id, &b.visit_id))
        }),
    };

    match (earliest, latest) {
        (Some((date, first)), Some((_, last))) => Ok(IndexAdmission {
            patient_id: patient_id.to_string(),
            visit_id: first.visit_id.clone(),
            admission_date: *date,
            admission_raw: first.admission_date.raw().to_string(),
            latest_visit_id: last.visit_id.clone(),
        }),
        _ => Err(FeatureError::NoIndexEvent {
            patient_id: patient_id.to_string(),
        }),
    }
}

/// Resolve the index admission of `patient_id` from the repository
///
/// # Errors
/// Returns `NoIndexEvent` when the patient has no dated AMI diagnosis.
pub fn resolve_index_admission(
    patient_id: &str,
    repo: &dyn EventRepository,
    codes: &CodeBook,
    tie_break: IndexTieBreak,
) -> Result<IndexAdmission> {
    let diagnoses = repo.diagnoses_for_patient(patient_id);
    select_index_admission(patient_id, &diagnoses, codes, tie_break)
}
