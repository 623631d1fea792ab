//! Read-only event repository
//!
//! Feature groups never touch the tables directly; they go through
//! [`EventRepository`], which hands out per-patient and per-visit slices.

use std::collections::BTreeSet;

use super::EventTable;
use crate::models::{
    Demographic, Diagnosis, LabObservation, MedicationAdministration, MedicationOrder, Procedure,
    Visit,
};

/// Read access to the event tables
///
/// Visit-scoped lookups take the patient as well, so a visit number reused
/// across patients never leaks another patient's events.
pub trait EventRepository: Sync {
    /// Every patient seen in any table, sorted
    fn patient_ids(&self) -> Vec<String>;

    fn diagnoses_for_patient(&self, patient_id: &str) -> Vec<&Diagnosis>;

    fn diagnoses_for_visit(&self, patient_id: &str, visit_id: &str) -> Vec<&Diagnosis>;

    fn labs_for_patient(&self, patient_id: &str) -> Vec<&LabObservation>;

    fn labs_for_visit(&self, patient_id: &str, visit_id: &str) -> Vec<&LabObservation>;

    fn med_orders_for_visit(&self, patient_id: &str, visit_id: &str) -> Vec<&MedicationOrder>;

    fn procedures_for_patient(&self, patient_id: &str) -> Vec<&Procedure>;

    fn procedures_for_visit(&self, patient_id: &str, visit_id: &str) -> Vec<&Procedure>;

    fn visits_for_patient(&self, patient_id: &str) -> Vec<&Visit>;

    /// First visit row with this identifier
    fn visit(&self, patient_id: &str, visit_id: &str) -> Option<&Visit> {
        self.visits_for_patient(patient_id)
            .into_iter()
            .find(|visit| visit.visit_id == visit_id)
    }

    fn demographics_for_patient(&self, patient_id: &str) -> Vec<&Demographic>;
}

/// In-memory store of all extract tables
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    pub diagnoses: EventTable<Diagnosis>,
    pub labs: EventTable<LabObservation>,
    pub med_admin: EventTable<MedicationAdministration>,
    pub med_orders: EventTable<MedicationOrder>,
    pub procedures: EventTable<Procedure>,
    pub visits: EventTable<Visit>,
    pub demographics: EventTable<Demographic>,
}

impl EventStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_diagnoses(mut self, records: Vec<Diagnosis>) -> Self {
        self.diagnoses = EventTable::new(records);
        self
    }

    #[must_use]
    pub fn with_labs(mut self, records: Vec<LabObservation>) -> Self {
        self.labs = EventTable::new(records);
        self
    }

    #[must_use]
    pub fn with_med_admin(mut self, records: Vec<MedicationAdministration>) -> Self {
        self.med_admin = EventTable::new(records);
        self
    }

    #[must_use]
    pub fn with_med_orders(mut self, records: Vec<MedicationOrder>) -> Self {
        self.med_orders = EventTable::new(records);
        self
    }

    #[must_use]
    pub fn with_procedures(mut self, records: Vec<Procedure>) -> Self {
        self.procedures = EventTable::new(records);
        self
    }

    #[must_use]
    pub fn with_visits(mut self, records: Vec<Visit>) -> Self {
        self.visits = EventTable::new(records);
        self
    }

    #[must_use]
    pub fn with_demographics(mut self, records: Vec<Demographic>) -> Self {
        self.demographics = EventTable::new(records);
        self
    }

    /// Total number of records across all tables
    #[must_use]
    pub fn total_records(&self) -> usize {
        self.diagnoses.len()
            + self.labs.len()
            + self.med_admin.len()
            + self.med_orders.len()
            + self.procedures.len()
            + self.visits.len()
            + self.demographics.len()
    }
}

fn same_patient<'a, T: super::EventRecord>(rows: Vec<&'a T>, patient_id: &str) -> Vec<&'a T> {
    rows.into_iter()
        .filter(|row| row.patient_id() == patient_id)
        .collect()
}

impl EventRepository for EventStore {
    fn patient_ids(&self) -> Vec<String> {
        let ids: BTreeSet<&str> = self
            .diagnoses
            .patient_ids()
            .chain(self.labs.patient_ids())
            .chain(self.med_admin.patient_ids())
            .chain(self.med_orders.patient_ids())
            .chain(self.procedures.patient_ids())
            .chain(self.visits.patient_ids())
            .chain(self.demographics.patient_ids())
            .collect();
        ids.into_iter().map(str::to_string).collect()
    }

    fn diagnoses_for_patient(&self, patient_id: &str) -> Vec<&Diagnosis> {
        self.diagnoses.for_patient(patient_id)
    }

    fn diagnoses_for_visit(&self, patient_id: &str, visit_id: &str) -> Vec<&Diagnosis> {
        same_patient(self.diagnoses.for_visit(visit_id), patient_id)
    }

    fn labs_for_patient(&self, patient_id: &str) -> Vec<&LabObservation> {
        self.labs.for_patient(patient_id)
    }

    fn labs_for_visit(&self, patient_id: &str, visit_id: &str) -> Vec<&LabObservation> {
        same_patient(self.labs.for_visit(visit_id), patient_id)
    }

    fn med_orders_for_visit(&self, patient_id: &str, visit_id: &str) -> Vec<&MedicationOrder> {
        same_patient(self.med_orders.for_visit(visit_id), patient_id)
    }

    fn procedures_for_patient(&self, patient_id: &str) -> Vec<&Procedure> {
        self.procedures.for_patient(patient_id)
    }

    fn procedures_for_visit(&self, patient_id: &str, visit_id: &str) -> Vec<&Procedure> {
        same_patient(self.procedures.for_visit(visit_id), patient_id)
    }

    fn visits_for_patient(&self, patient_id: &str) -> Vec<&Visit> {
        self.visits.for_patient(patient_id)
    }

    fn demographics_for_patient(&self, patient_id: &str) -> Vec<&Demographic> {
        self.demographics.for_patient(patient_id)
    }
}
