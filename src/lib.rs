//! Per-patient feature tables for acute myocardial infarction cohorts.
//!
//! Seven pipe-delimited clinical extracts are loaded into an indexed event
//! store. Each patient's index AMI admission anchors day-window features,
//! lab statistics and the HOSPITAL, Charlson-Deyo, LACE, GRACE, Killip and
//! AKI scores, which are assembled into one CSV row per patient.

pub mod algorithm;
pub mod codes;
pub mod collections;
pub mod config;
pub mod error;
pub mod features;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod utils;
pub mod writer;

pub use algorithm::{IndexAdmission, resolve_index_admission};
pub use codes::CodeBook;
pub use collections::{EventRepository, EventStore};
pub use config::{FeatureConfig, IndexTieBreak, LabValueMode, PipelineConfig};
pub use error::{FeatureError, Result};
pub use features::{FeatureTable, FeatureTableBuilder, compute_patient_row};
pub use models::{FeatureRow, FeatureValue};
pub use pipeline::{PipelineSummary, run};
