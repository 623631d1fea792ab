//! Indexed event collections
//!
//! Each extract table is held as an [`EventTable`]: the records in file order
//! plus patient and visit indices. Index lists store row positions, so every
//! lookup returns records in their original relative order.

pub mod event_store;

pub use event_store::{EventRepository, EventStore};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::models::{
    Demographic, Diagnosis, LabObservation, MedicationAdministration, MedicationOrder, Procedure,
    Visit,
};

/// Row positions sharing a key
type RowIndex = FxHashMap<String, SmallVec<[u32; 8]>>;

/// A record keyed by patient and, for most tables, by visit
pub trait EventRecord {
    fn patient_id(&self) -> &str;

    /// Visit the record belongs to, if the table carries one
    fn visit_id(&self) -> Option<&str>;
}

/// Records of one table with patient and visit indices
#[derive(Debug, Clone)]
pub struct EventTable<T> {
    records: Vec<T>,
    by_patient: RowIndex,
    by_visit: RowIndex,
}

impl<T: EventRecord> EventTable<T> {
    /// Index `records`, keeping their order
    #[must_use]
    pub fn new(records: Vec<T>) -> Self {
        let mut by_patient = RowIndex::default();
        let mut by_visit = RowIndex::default();

        for (pos, record) in records.iter().enumerate() {
            let Ok(pos) = u32::try_from(pos) else {
                break;
            };
            by_patient
                .entry(record.patient_id().to_string())
                .or_default()
                .push(pos);
            if let Some(visit) = record.visit_id().filter(|v| !v.is_empty()) {
                by_visit.entry(visit.to_string()).or_default().push(pos);
            }
        }

        Self {
            records,
            by_patient,
            by_visit,
        }
    }

    /// Records of one patient, in file order
    #[must_use]
    pub fn for_patient(&self, patient_id: &str) -> Vec<&T> {
        self.select(self.by_patient.get(patient_id))
    }

    /// Records of one visit, in file order
    #[must_use]
    pub fn for_visit(&self, visit_id: &str) -> Vec<&T> {
        self.select(self.by_visit.get(visit_id))
    }

    /// Distinct patient identifiers in this table
    pub fn patient_ids(&self) -> impl Iterator<Item = &str> {
        self.by_patient.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn select(&self, rows: Option<&SmallVec<[u32; 8]>>) -> Vec<&T> {
        rows.map(|rows| {
            rows.iter()
                .filter_map(|&pos| self.records.get(pos as usize))
                .collect()
        })
        .unwrap_or_default()
    }
}

impl<T: EventRecord> Default for EventTable<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

macro_rules! visit_scoped_record {
    ($($record:ty),+ $(,)?) => {
        $(
            impl EventRecord for $record {
                fn patient_id(&self) -> &str {
                    &self.patient_id
                }

                fn visit_id(&self) -> Option<&str> {
                    Some(&self.visit_id)
                }
            }
        )+
    };
}

visit_scoped_record!(
    Diagnosis,
    LabObservation,
    MedicationOrder,
    MedicationAdministration,
    Procedure,
    Visit,
);

impl EventRecord for Demographic {
    fn patient_id(&self) -> &str {
        &self.patient_id
    }

    fn visit_id(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups_keep_file_order() {
        let table = EventTable::new(vec![
            Diagnosis::new("P1", "V2", "01/02/2019", "I21.4"),
            Diagnosis::new("P2", "V9", "01/02/2019", "I10"),
            Diagnosis::new("P1", "V1", "01/01/2019", "I10"),
        ]);

        let codes: Vec<_> = table.for_patient("P1").iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["I21.4", "I10"]);
        assert_eq!(table.for_visit("V9").len(), 1);
        assert!(table.for_patient("P3").is_empty());
    }

    #[test]
    fn test_empty_visit_ids_are_not_indexed() {
        let table = EventTable::new(vec![MedicationAdministration::new("P1", "", "aspirin")]);
        assert!(table.for_visit("").is_empty());
        assert_eq!(table.patient_ids().count(), 1);
    }
}
