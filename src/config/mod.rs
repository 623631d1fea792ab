//! Configuration for the feature pipeline.
//!
//! Every setting has a default, so a JSON configuration file only needs the
//! keys it wants to change.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::error::util::safe_read_to_string;

/// Environment variable naming a JSON configuration file
pub const CONFIG_ENV: &str = "AMI_FEATURES_CONFIG";
/// Environment variable naming the directory holding the extracts
pub const DATA_DIR_ENV: &str = "AMI_DATA_DIR";
/// Environment variable overriding the output path
pub const OUTPUT_ENV: &str = "AMI_OUTPUT";
/// Environment variable overriding the worker thread count
pub const THREADS_ENV: &str = "AMI_THREADS";

/// How lab values that are not numbers are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabValueMode {
    /// Skip unreadable values so "no data" and "zero" stay distinct
    #[default]
    Strict,
    /// Coerce unreadable values to 0, reproducing historical tables
    Legacy,
}

/// How the index resolver picks among AMI admissions sharing the earliest date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexTieBreak {
    /// Lowest visit identifier wins
    #[default]
    LowestVisitId,
    /// First row in extract order wins
    InputOrder,
}

/// Paths of the seven input extracts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputPaths {
    pub diagnoses: PathBuf,
    pub labs: PathBuf,
    pub med_admin: PathBuf,
    pub med_orders: PathBuf,
    pub procedures: PathBuf,
    pub visits: PathBuf,
    pub demographics: PathBuf,
}

impl InputPaths {
    /// Standard extract file names inside `dir`
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            diagnoses: dir.join("IRB_90679_Chapman_AMI_diagnoses_12132018.txt"),
            labs: dir.join("IRB_90679_Chapman_AMI_labs_12132018.txt"),
            med_admin: dir.join("IRB_90679_Chapman_AMI_med_admin_12132018.txt"),
            med_orders: dir.join("IRB_90679_Chapman_AMI_med_orders_12132018.txt"),
            procedures: dir.join("IRB_90679_Chapman_AMI_procedures_12132018.txt"),
            visits: dir.join("IRB_90679_Chapman_AMI_visits_w_prov_type_12132018.txt"),
            demographics: dir.join("IRB_90679_Chapman_AMI_demographics_12132018.txt"),
        }
    }
}

impl Default for InputPaths {
    fn default() -> Self {
        Self::in_dir(Path::new("."))
    }
}

/// Settings that change how features are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Treatment of non-numeric lab values
    pub lab_value_mode: LabValueMode,
    /// Tie-break among same-day index candidates
    pub index_tie_break: IndexTieBreak,
    /// Blank out name and SSN columns in the output
    pub redact_identifiers: bool,
}

impl FeatureConfig {
    /// Settings that reproduce historical output tables
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            lab_value_mode: LabValueMode::Legacy,
            index_tie_break: IndexTieBreak::InputOrder,
            redact_identifiers: false,
        }
    }
}

/// Configuration for a full pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Input extract paths
    pub inputs: InputPaths,
    /// Destination of the feature table
    pub output_path: PathBuf,
    /// Feature derivation settings
    pub features: FeatureConfig,
    /// Compute patient rows in parallel
    pub parallel: bool,
    /// Worker threads; defaults to the number of CPUs
    pub num_threads: Option<usize>,
    /// Draw progress bars while building
    pub show_progress: bool,
    /// JSON file with code-list replacements
    pub code_overrides: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            inputs: InputPaths::default(),
            output_path: PathBuf::from("target.csv"),
            features: FeatureConfig::default(),
            parallel: true,
            num_threads: None,
            show_progress: true,
            code_overrides: None,
        }
    }
}

impl PipelineConfig {
    /// Configuration reading the standard extracts from `dir`
    #[must_use]
    pub fn for_directory(dir: &Path) -> Self {
        Self {
            inputs: InputPaths::in_dir(dir),
            output_path: dir.join("target.csv"),
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = safe_read_to_string(path, "pipeline configuration")?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Build a configuration from the environment
    ///
    /// A JSON file named by `AMI_FEATURES_CONFIG` takes precedence, then a data
    /// directory from `AMI_DATA_DIR`, then the current directory.
    pub fn from_env() -> Result<Self> {
        let mut config = if let Ok(path) = std::env::var(CONFIG_ENV) {
            Self::from_json_file(Path::new(&path))?
        } else if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            Self::for_directory(Path::new(&dir))
        } else {
            Self::default()
        };

        if let Ok(output) = std::env::var(OUTPUT_ENV) {
            config = config.with_output_path(output);
        }
        if let Some(threads) = std::env::var(THREADS_ENV)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
        {
            config = config.with_num_threads(threads);
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_inputs(mut self, inputs: InputPaths) -> Self {
        self.inputs = inputs;
        self
    }

    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    #[must_use]
    pub const fn with_features(mut self, features: FeatureConfig) -> Self {
        self.features = features;
        self
    }

    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub const fn with_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    #[must_use]
    pub const fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    #[must_use]
    pub fn with_code_overrides(mut self, path: impl Into<PathBuf>) -> Self {
        self.code_overrides = Some(path.into());
        self
    }

    /// Effective worker thread count
    #[must_use]
    pub fn effective_threads(&self) -> usize {
        self.num_threads.filter(|&n| n > 0).unwrap_or_else(num_cpus::get)
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Configuration:")?;
        writeln!(f, "  Diagnoses: {}", self.inputs.diagnoses.display())?;
        writeln!(f, "  Labs: {}", self.inputs.labs.display())?;
        writeln!(f, "  Medication administrations: {}", self.inputs.med_admin.display())?;
        writeln!(f, "  Medication orders: {}", self.inputs.med_orders.display())?;
        writeln!(f, "  Procedures: {}", self.inputs.procedures.display())?;
        writeln!(f, "  Visits: {}", self.inputs.visits.display())?;
        writeln!(f, "  Demographics: {}", self.inputs.demographics.display())?;
        writeln!(f, "  Output: {}", self.output_path.display())?;
        writeln!(f, "  Lab value mode: {:?}", self.features.lab_value_mode)?;
        writeln!(f, "  Index tie-break: {:?}", self.features.index_tie_break)?;
        writeln!(f, "  Redact identifiers: {}", self.features.redact_identifiers)?;
        writeln!(f, "  Parallel: {} ({} threads)", self.parallel, self.effective_threads())?;
        if let Some(path) = &self.code_overrides {
            writeln!(f, "  Code overrides: {}", path.display())?;
        }
        Ok(())
    }
}
