//! Per-patient feature rows
//!
//! A row is an ordered list of named scalar values. Columns keep the position
//! at which they were first declared, so the assembly order of the feature
//! groups becomes the column order of the output table.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::utils::numeric::{parse_numeric, try_float};

/// Sentinel for unset categorical values
pub const NA: &str = "NA";

/// Name of the patient identifier column
pub const PERSON_ID: &str = "PERSON_ID";

/// A single feature value
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FeatureValue {
    /// The categorical sentinel
    #[must_use]
    pub fn na() -> Self {
        Self::Text(NA.to_string())
    }

    /// Numeric view; text is parsed and unreadable text reads as 0
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::Float(v) => *v,
            Self::Text(s) => try_float(s),
        }
    }

    /// Integer view; floats are truncated and unreadable text reads as 0
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Int(v) => *v,
            Self::Float(v) => *v as i64,
            Self::Text(s) => parse_numeric(s).map_or(0, |v| v as i64),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<usize> for FeatureValue {
    fn from(v: usize) -> Self {
        Self::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<bool> for FeatureValue {
    fn from(v: bool) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            // Debug formatting always keeps a decimal point or exponent
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Ordered feature columns for one patient
#[derive(Debug, Clone, Default)]
pub struct FeatureRow {
    columns: Vec<(&'static str, FeatureValue)>,
    positions: FxHashMap<&'static str, usize>,
    index_admission: bool,
}

impl FeatureRow {
    /// Empty row carrying the patient identifier
    #[must_use]
    pub fn for_patient(patient_id: &str) -> Self {
        let mut row = Self::default();
        row.set(PERSON_ID, patient_id);
        row
    }

    /// Add a column with its default, keeping any value already present
    pub fn declare(&mut self, name: &'static str, default: impl Into<FeatureValue>) {
        if !self.positions.contains_key(name) {
            self.positions.insert(name, self.columns.len());
            self.columns.push((name, default.into()));
        }
    }

    /// Set a column, appending it if it was never declared
    pub fn set(&mut self, name: &'static str, value: impl Into<FeatureValue>) {
        let value = value.into();
        match self.positions.get(name) {
            Some(&pos) => self.columns[pos].1 = value,
            None => {
                self.positions.insert(name, self.columns.len());
                self.columns.push((name, value));
            }
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.positions.get(name).map(|&pos| &self.columns[pos].1)
    }

    /// Integer value of a column, 0 when absent
    #[must_use]
    pub fn int(&self, name: &str) -> i64 {
        self.get(name).map_or(0, FeatureValue::as_i64)
    }

    /// Float value of a column, 0.0 when absent
    #[must_use]
    pub fn float(&self, name: &str) -> f64 {
        self.get(name).map_or(0.0, FeatureValue::as_f64)
    }

    /// Numeric value of a column, `None` when absent or not a number
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            FeatureValue::Int(v) => Some(*v as f64),
            FeatureValue::Float(v) => Some(*v),
            FeatureValue::Text(s) => parse_numeric(s),
        }
    }

    /// Text of a categorical column, `NA` when absent or numeric
    #[must_use]
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FeatureValue::as_text).unwrap_or(NA)
    }

    #[must_use]
    pub fn patient_id(&self) -> &str {
        self.get(PERSON_ID).and_then(FeatureValue::as_text).unwrap_or_default()
    }

    /// Columns in assembly order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FeatureValue)> {
        self.columns.iter().map(|(name, value)| (*name, value))
    }

    /// Column names in assembly order
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(name, _)| *name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn mark_index_admission(&mut self) {
        self.index_admission = true;
    }

    /// Whether an index admission was resolved for this patient
    #[must_use]
    pub const fn has_index_admission(&self) -> bool {
        self.index_admission
    }
}
