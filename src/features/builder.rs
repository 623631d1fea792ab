//! Feature table assembly
//!
//! Every patient in the repository gets exactly one row. Rows are computed
//! independently, optionally on a dedicated rayon pool, and collected in
//! patient-id order. Cohort stages run once all rows exist.

use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;

use super::{CohortStage, FeatureGroup, PatientContext, standard_cohort_stages, standard_groups};
use crate::algorithm::resolve_index_admission;
use crate::codes::CodeBook;
use crate::collections::EventRepository;
use crate::config::FeatureConfig;
use crate::error::{FeatureError, Result};
use crate::models::FeatureRow;
use crate::utils::logging::{
    create_patient_progress_bar, finish_progress_bar, log_operation_complete, log_operation_start,
};

/// Shared, read-only inputs for computing one row
pub struct RowContext<'a> {
    pub codes: &'a CodeBook,
    pub config: &'a FeatureConfig,
    /// Groups in assembly order
    pub groups: &'a [Arc<dyn FeatureGroup>],
}

/// Compute the full feature row of one patient
///
/// A patient without an index admission still gets every column, holding
/// defaults wherever a value depends on the index.
#[must_use]
pub fn compute_patient_row(
    patient_id: &str,
    repo: &dyn EventRepository,
    context: &RowContext<'_>,
) -> FeatureRow {
    let mut row = FeatureRow::for_patient(patient_id);

    let index = match resolve_index_admission(patient_id, repo, context.codes, context.config.index_tie_break)
    {
        Ok(index) => {
            row.mark_index_admission();
            Some(index)
        }
        Err(err) => {
            debug!("{err}");
            None
        }
    };

    let ctx = PatientContext::new(patient_id, repo, context.codes, context.config, index.as_ref());
    for group in context.groups {
        group.declare(&mut row);
        group.compute(&ctx, &mut row);
    }
    row
}

/// The assembled table: one row per patient, all sharing one column order
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    columns: Vec<&'static str>,
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    #[must_use]
    pub fn new(columns: Vec<&'static str>, rows: Vec<FeatureRow>) -> Self {
        Self { columns, rows }
    }

    /// Column names in output order
    #[must_use]
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Row of one patient
    #[must_use]
    pub fn row(&self, patient_id: &str) -> Option<&FeatureRow> {
        self.rows.iter().find(|row| row.patient_id() == patient_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of patients with a resolved index admission
    #[must_use]
    pub fn index_admissions(&self) -> usize {
        self.rows.iter().filter(|row| row.has_index_admission()).count()
    }
}

/// Builds a [`FeatureTable`] from an event repository
pub struct FeatureTableBuilder<'a> {
    repo: &'a dyn EventRepository,
    codes: &'a CodeBook,
    config: FeatureConfig,
    groups: Vec<Arc<dyn FeatureGroup>>,
    stages: Vec<Arc<dyn CohortStage>>,
    parallel: bool,
    num_threads: Option<usize>,
    show_progress: bool,
}

impl<'a> FeatureTableBuilder<'a> {
    /// Builder running the standard groups and stages
    #[must_use]
    pub fn new(repo: &'a dyn EventRepository, codes: &'a CodeBook) -> Self {
        Self {
            repo,
            codes,
            config: FeatureConfig::default(),
            groups: standard_groups(),
            stages: standard_cohort_stages(),
            parallel: true,
            num_threads: None,
            show_progress: false,
        }
    }

    #[must_use]
    pub const fn with_config(mut self, config: FeatureConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the per-patient groups
    #[must_use]
    pub fn with_groups(mut self, groups: Vec<Arc<dyn FeatureGroup>>) -> Self {
        self.groups = groups;
        self
    }

    /// Replace the table-level stages
    #[must_use]
    pub fn with_stages(mut self, stages: Vec<Arc<dyn CohortStage>>) -> Self {
        self.stages = stages;
        self
    }

    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub const fn with_num_threads(mut self, threads: Option<usize>) -> Self {
        self.num_threads = threads;
        self
    }

    #[must_use]
    pub const fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Columns every row will carry, in output order
    fn column_layout(&self) -> Vec<&'static str> {
        let mut template = FeatureRow::for_patient("");
        for group in &self.groups {
            group.declare(&mut template);
        }
        for stage in &self.stages {
            stage.apply(std::slice::from_mut(&mut template));
        }
        template.column_names().collect()
    }

    fn compute_rows(&self, patients: &[String], progress: &ProgressBar) -> Result<Vec<FeatureRow>> {
        let context = RowContext {
            codes: self.codes,
            config: &self.config,
            groups: &self.groups,
        };
        let row_for = |patient_id: &String| {
            let row = compute_patient_row(patient_id, self.repo, &context);
            progress.inc(1);
            row
        };

        if !self.parallel {
            return Ok(patients.iter().map(row_for).collect());
        }

        let threads = self.num_threads.filter(|&n| n > 0).unwrap_or_else(num_cpus::get);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| FeatureError::config(format!("Failed to build thread pool: {e}")))?;
        info!("Computing patient rows on {threads} threads");
        Ok(pool.install(|| patients.par_iter().map(row_for).collect()))
    }

    /// Compute every patient row and apply the cohort stages
    pub fn build(&self) -> Result<FeatureTable> {
        let start = Instant::now();
        let patients = self.repo.patient_ids();
        log_operation_start("Building feature rows for", format!("{} patients", patients.len()));
        debug!(
            "Feature groups: {}",
            self.groups.iter().map(|group| group.group_name()).join(", ")
        );

        let progress = create_patient_progress_bar(patients.len(), self.show_progress);
        let mut rows = self.compute_rows(&patients, &progress)?;
        finish_progress_bar(&progress, Some("Feature rows complete"));

        for stage in &self.stages {
            debug!("Applying cohort stage {}", stage.stage_name());
            stage.apply(&mut rows);
        }

        let table = FeatureTable::new(self.column_layout(), rows);
        log_operation_complete("built", "feature table", table.len(), Some(start.elapsed()));
        info!(
            "{} of {} patients have an index admission",
            table.index_admissions(),
            table.len()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::EventStore;
    use crate::models::{Diagnosis, LabObservation, Visit};

    fn store() -> EventStore {
        EventStore::new()
            .with_diagnoses(vec![
                Diagnosis::new("P2", "V1", "01/10/2019", "I21.4"),
                Diagnosis::new("P1", "V5", "02/01/2019", "410.71"),
            ])
            .with_visits(vec![
                Visit::new("P2", "V1", "01/10/2019", "01/14/2019", "INPATIENT"),
                Visit::new("P3", "V7", "01/01/2019", "01/02/2019", "EMERGENCY"),
            ])
            .with_labs(vec![LabObservation::new("P2", "V1", "CREATININE", "1.4", "01/10/2019 07:00")])
    }

    #[test]
    fn test_one_row_per_patient_in_id_order() {
        let codes = CodeBook::standard().unwrap();
        let store = store();
        let table = FeatureTableBuilder::new(&store, &codes).with_num_threads(Some(2)).build().unwrap();

        let ids: Vec<_> = table.rows().iter().map(FeatureRow::patient_id).collect();
        assert_eq!(ids, vec!["P1", "P2", "P3"]);
        assert_eq!(table.index_admissions(), 2);
        for row in table.rows() {
            let names: Vec<_> = row.column_names().collect();
            assert_eq!(names, table.columns());
        }
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let codes = CodeBook::standard().unwrap();
        let store = store();
        let parallel = FeatureTableBuilder::new(&store, &codes).build().unwrap();
        let sequential = FeatureTableBuilder::new(&store, &codes).with_parallel(false).build().unwrap();

        for (a, b) in parallel.rows().iter().zip(sequential.rows()) {
            let a: Vec<_> = a.iter().collect();
            let b: Vec<_> = b.iter().collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_patient_without_index_keeps_defaults() {
        let codes = CodeBook::standard().unwrap();
        let store = store();
        let table = FeatureTableBuilder::new(&store, &codes).build().unwrap();
        let row = table.row("P3").unwrap();
        assert!(!row.has_index_admission());
        assert_eq!(row.int("LOS"), 0);
        assert_eq!(row.text("KILLIP_CLASS"), crate::models::NA);
        assert_eq!(row.int("INDEX_ADMISSION_FLAG"), 1);
    }

    #[test]
    fn test_empty_repository_still_has_columns() {
        let codes = CodeBook::standard().unwrap();
        let store = EventStore::new();
        let table = FeatureTableBuilder::new(&store, &codes).build().unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns().first(), Some(&"PERSON_ID"));
        assert_eq!(table.columns().last(), Some(&"BNP_LEVEL_75DIFF_FLAG"));
    }
}
