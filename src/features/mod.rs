//! Feature groups and the feature table builder
//!
//! A feature group owns a fixed set of output columns. It declares them with
//! their defaults on every row, then fills them for one patient from the event
//! repository. Groups run in a fixed order and later groups may read columns
//! written by earlier ones, so the order in [`standard_groups`] is part of the
//! output contract.
//!
//! Groups that measure anything relative to the index admission leave their
//! defaults untouched when the patient has none.

pub mod administrative;
pub mod builder;
pub mod comorbidities;
pub mod data_management;
pub mod demographics;
pub mod demographics_additions;
pub mod discharge;
pub mod enrichd;
pub mod grace;
pub mod history;
pub mod hospital;
pub mod in_hospital;
pub mod lab_spread;
pub mod laboratories;
pub mod lace;
pub mod polynomial;
pub mod presentation;
pub mod prior_diagnoses;

pub use builder::{FeatureTable, FeatureTableBuilder, compute_patient_row};

use std::sync::Arc;

use crate::algorithm::window::{DayWindow, LabStatistics};
use crate::algorithm::IndexAdmission;
use crate::codes::{CodeBook, CodeMatcher, CodeSet};
use crate::collections::EventRepository;
use crate::config::FeatureConfig;
use crate::error::{FeatureError, Result};
use crate::models::{Diagnosis, FeatureRow, LabObservation, Visit};

/// Everything a feature group may read for one patient
pub struct PatientContext<'a> {
    pub patient_id: &'a str,
    pub repo: &'a dyn EventRepository,
    pub codes: &'a CodeBook,
    pub config: &'a FeatureConfig,
    /// The resolved index admission, if the patient has one
    pub index: Option<&'a IndexAdmission>,
}

impl<'a> PatientContext<'a> {
    #[must_use]
    pub fn new(
        patient_id: &'a str,
        repo: &'a dyn EventRepository,
        codes: &'a CodeBook,
        config: &'a FeatureConfig,
        index: Option<&'a IndexAdmission>,
    ) -> Self {
        Self {
            patient_id,
            repo,
            codes,
            config,
            index,
        }
    }

    /// All diagnoses of the patient
    #[must_use]
    pub fn diagnoses(&self) -> Vec<&'a Diagnosis> {
        self.repo.diagnoses_for_patient(self.patient_id)
    }

    /// Diagnoses recorded on the index visit
    #[must_use]
    pub fn index_diagnoses(&self, index: &IndexAdmission) -> Vec<&'a Diagnosis> {
        self.repo.diagnoses_for_visit(self.patient_id, &index.visit_id)
    }

    /// Codes recorded on the index visit, in file order
    #[must_use]
    pub fn index_codes(&self, index: &IndexAdmission) -> Vec<&'a str> {
        self.index_diagnoses(index)
            .into_iter()
            .map(|dx| dx.code.as_str())
            .collect()
    }

    /// Visit row of the index visit
    #[must_use]
    pub fn index_visit(&self, index: &IndexAdmission) -> Option<&'a Visit> {
        self.repo.visit(self.patient_id, &index.visit_id)
    }

    /// Index-visit lab observations whose item is in `items`
    #[must_use]
    pub fn index_labs(&self, index: &IndexAdmission, items: &CodeSet) -> Vec<&'a LabObservation> {
        self.repo
            .labs_for_visit(self.patient_id, &index.visit_id)
            .into_iter()
            .filter(|lab| items.contains(&lab.item))
            .collect()
    }

    /// Statistics of one lab item over the index visit
    #[must_use]
    pub fn lab_statistics(&self, index: &IndexAdmission, items: &CodeSet) -> Option<LabStatistics> {
        LabStatistics::from_observations(&self.index_labs(index, items), self.config.lab_value_mode)
    }

    /// Whether a diagnosis dated strictly before the index carries a code that
    /// `matcher` accepts on the index visit
    ///
    /// Pattern families are first resolved against the index-visit codes; the
    /// patient's earlier diagnoses are then searched for those exact codes.
    #[must_use]
    pub fn prior_history_of_index_codes<M: CodeMatcher>(
        &self,
        index: &IndexAdmission,
        matcher: &M,
    ) -> bool {
        let matched: Vec<&str> = self
            .index_codes(index)
            .into_iter()
            .filter(|code| matcher.matches(code))
            .collect();
        if matched.is_empty() {
            return false;
        }
        self.diagnoses().iter().any(|dx| {
            matched.contains(&dx.code.as_str())
                && DayWindow::BEFORE.admits(index.offset_of(&dx.admission_date))
        })
    }

    /// Whether any diagnosis dated strictly before the index matches `matcher`
    #[must_use]
    pub fn prior_history_of<M: CodeMatcher>(&self, index: &IndexAdmission, matcher: &M) -> bool {
        crate::algorithm::window::presence_flag(
            &self.diagnoses(),
            index.admission_date,
            matcher,
            DayWindow::BEFORE,
        )
    }
}

/// A named block of output columns
pub trait FeatureGroup: Send + Sync {
    /// Name used in logs and configuration
    fn group_name(&self) -> &'static str;

    /// Declare every column of the group with its default
    fn declare(&self, row: &mut FeatureRow);

    /// Fill the group's columns for one patient
    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow);
}

/// A table-level stage run after every patient row exists
pub trait CohortStage: Send + Sync {
    fn stage_name(&self) -> &'static str;

    fn apply(&self, rows: &mut [FeatureRow]);
}

/// Declare `columns`, all defaulting to integer 0
pub(crate) fn declare_zeros(row: &mut FeatureRow, columns: &[&'static str]) {
    for &column in columns {
        row.declare(column, 0_i64);
    }
}

/// Declare `columns`, all defaulting to float 0.0
pub(crate) fn declare_float_zeros(row: &mut FeatureRow, columns: &[&'static str]) {
    for &column in columns {
        row.declare(column, 0.0);
    }
}

/// Create a feature group by name
///
/// # Errors
/// Returns a configuration error for an unknown name.
pub fn group_from_name(name: &str) -> Result<Arc<dyn FeatureGroup>> {
    let group: Arc<dyn FeatureGroup> = match name.to_lowercase().as_str() {
        "demographics" => Arc::new(demographics::Demographics),
        "prior_diagnoses" => Arc::new(prior_diagnoses::PriorDiagnoses),
        "hospital" => Arc::new(hospital::HospitalScore),
        "laboratories" => Arc::new(laboratories::Laboratories),
        "presentation" => Arc::new(presentation::Presentation),
        "administrative" => Arc::new(administrative::Administrative),
        "discharge" => Arc::new(discharge::DischargeInformation),
        "demographics_additions" => Arc::new(demographics_additions::DemographicsAdditions),
        "history" => Arc::new(history::PatientHistory),
        "in_hospital" => Arc::new(in_hospital::InHospitalOutcomes),
        "comorbidities" => Arc::new(comorbidities::Comorbidities),
        "lace" => Arc::new(lace::LaceScore),
        "enrichd" => Arc::new(enrichd::Enrichd),
        "grace" => Arc::new(grace::GraceScore),
        "polynomial" => Arc::new(polynomial::PolynomialTerms),
        "data_management" => Arc::new(data_management::DataManagement),
        _ => return Err(FeatureError::config(format!("Unknown feature group: {name}"))),
    };
    Ok(group)
}

/// Names of the per-patient groups in assembly order
pub const STANDARD_GROUP_ORDER: [&str; 16] = [
    "demographics",
    "prior_diagnoses",
    "hospital",
    "laboratories",
    "presentation",
    "administrative",
    "discharge",
    "demographics_additions",
    "history",
    "in_hospital",
    "comorbidities",
    "lace",
    "enrichd",
    "grace",
    "polynomial",
    "data_management",
];

/// The per-patient groups in assembly order
#[must_use]
pub fn standard_groups() -> Vec<Arc<dyn FeatureGroup>> {
    STANDARD_GROUP_ORDER
        .iter()
        .filter_map(|name| group_from_name(name).ok())
        .collect()
}

/// The table-level stages in assembly order
#[must_use]
pub fn standard_cohort_stages() -> Vec<Arc<dyn CohortStage>> {
    vec![Arc::new(lab_spread::LabSpread)]
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::algorithm::resolve_index_admission;
    use crate::collections::EventStore;

    /// Declare and compute one group for `patient_id` with default settings
    pub(crate) fn run_group(group: &dyn FeatureGroup, store: &EventStore, patient_id: &str) -> FeatureRow {
        run_group_with(group, store, patient_id, &FeatureConfig::default())
    }

    pub(crate) fn run_group_with(
        group: &dyn FeatureGroup,
        store: &EventStore,
        patient_id: &str,
        config: &FeatureConfig,
    ) -> FeatureRow {
        run_group_on(group, store, FeatureRow::for_patient(patient_id), config)
    }

    /// Run one group on a row that may already carry earlier columns
    pub(crate) fn run_group_on(
        group: &dyn FeatureGroup,
        store: &EventStore,
        mut row: FeatureRow,
        config: &FeatureConfig,
    ) -> FeatureRow {
        let codes = CodeBook::standard().unwrap();
        let patient_id = row.patient_id().to_string();
        let index = resolve_index_admission(&patient_id, store, &codes, config.index_tie_break).ok();
        if index.is_some() {
            row.mark_index_admission();
        }
        let ctx = PatientContext::new(&patient_id, store, &codes, config, index.as_ref());
        group.declare(&mut row);
        group.compute(&ctx, &mut row);
        row
    }
}
