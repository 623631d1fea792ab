//! Domain models for the feature pipeline
//!
//! Event records mirror the extract tables one-to-one. Feature rows are the
//! per-patient output, built incrementally by the feature groups.

pub mod events;
pub mod feature_row;

pub use events::{
    Demographic, Diagnosis, EventDate, LabObservation, MedicationAdministration,
    MedicationOrder, Procedure, Visit,
};
pub use feature_row::{FeatureRow, FeatureValue, NA};
