//! End-to-end run: load the extracts, build the feature table, write it out

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::info;

use crate::codes::CodeBook;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::features::{FeatureTable, FeatureTableBuilder};
use crate::loader::load_event_store;
use crate::utils::logging::console::{print_sample_rows, print_table_summary};
use crate::utils::logging::{create_loading_spinner, finish_progress_bar};
use crate::writer::write_table_file;

/// What a finished run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub patients: usize,
    pub index_admissions: usize,
    pub columns: usize,
    pub output_path: PathBuf,
    pub elapsed: Duration,
}

impl fmt::Display for PipelineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} patients ({} with an index admission), {} columns written to {} in {:?}",
            self.patients,
            self.index_admissions,
            self.columns,
            self.output_path.display(),
            self.elapsed
        )
    }
}

/// Code book from the configured overrides, or the built-in tables
pub fn load_code_book(config: &PipelineConfig) -> Result<CodeBook> {
    match &config.code_overrides {
        Some(path) => CodeBook::from_json_file(path),
        None => CodeBook::standard(),
    }
}

/// Load the extracts and build the feature table without writing it
pub fn build_table(config: &PipelineConfig) -> Result<FeatureTable> {
    let codes = load_code_book(config)?;
    let spinner = create_loading_spinner(config.show_progress);
    let store = load_event_store(&config.inputs);
    finish_progress_bar(&spinner, Some("Extracts loaded"));
    let store = store?;
    FeatureTableBuilder::new(&store, &codes)
        .with_config(config.features)
        .with_parallel(config.parallel)
        .with_num_threads(config.num_threads)
        .with_progress(config.show_progress)
        .build()
}

/// Run the whole pipeline
pub fn run(config: &PipelineConfig) -> Result<PipelineSummary> {
    let start = Instant::now();
    info!("{config}");

    let table = build_table(config)?;
    write_table_file(&table, &config.output_path)?;

    let elapsed = start.elapsed();
    if config.show_progress {
        print_table_summary(table.rows(), elapsed);
        print_sample_rows(table.rows(), 3, 8);
    }

    Ok(PipelineSummary {
        patients: table.len(),
        index_admissions: table.index_admissions(),
        columns: table.columns().len(),
        output_path: config.output_path.clone(),
        elapsed,
    })
}
