//! Lab statistics over the index visit
//!
//! Each panel yields AVG, MIN, MAX, FIRST and LAST columns. A panel without
//! usable observations keeps its 0.0 defaults.

use super::{FeatureGroup, PatientContext, declare_float_zeros, declare_zeros};
use crate::algorithm::window::LabStatistics;
use crate::codes::{CodeBook, CodeSet};
use crate::models::FeatureRow;

/// One lab item summarised into five columns
struct LabPanel {
    items: fn(&CodeBook) -> &CodeSet,
    columns: [&'static str; 5],
    /// Flag column set when the mean falls below the threshold
    low_mean_flag: Option<(&'static str, f64)>,
}

macro_rules! panel_columns {
    ($prefix:literal) => {
        [
            concat!($prefix, "_LEVEL_AVG"),
            concat!($prefix, "_LEVEL_MIN"),
            concat!($prefix, "_LEVEL_MAX"),
            concat!($prefix, "_LEVEL_FIRST"),
            concat!($prefix, "_LEVEL_LAST"),
        ]
    };
}

const PANELS: [LabPanel; 7] = [
    LabPanel {
        items: |c| &c.lab_sodium,
        columns: panel_columns!("SODIUM"),
        low_mean_flag: Some(("SODIUM_LEVEL_AVG_136_FLAG", 136.0)),
    },
    LabPanel {
        items: |c| &c.lab_calcium,
        columns: panel_columns!("CALCIUM"),
        low_mean_flag: Some(("CALCIUM_LEVEL_AVG_86_FLAG", 8.6)),
    },
    LabPanel {
        items: |c| &c.lab_creatinine,
        columns: panel_columns!("CREATININE"),
        low_mean_flag: None,
    },
    LabPanel {
        items: |c| &c.lab_hemoglobin,
        columns: panel_columns!("HEMOGLOBIN"),
        low_mean_flag: None,
    },
    LabPanel {
        items: |c| &c.lab_ck_mb,
        columns: panel_columns!("CKI"),
        low_mean_flag: None,
    },
    LabPanel {
        items: |c| &c.lab_ck_total,
        columns: panel_columns!("CKT"),
        low_mean_flag: None,
    },
    LabPanel {
        items: |c| &c.lab_bnp,
        columns: panel_columns!("BNP"),
        low_mean_flag: None,
    },
];

impl LabPanel {
    fn write(&self, stats: &LabStatistics, row: &mut FeatureRow) {
        let [avg, min, max, first, last] = self.columns;
        row.set(avg, stats.mean);
        row.set(min, stats.min);
        row.set(max, stats.max);
        row.set(first, stats.first);
        row.set(last, stats.last);
        if let Some((column, threshold)) = self.low_mean_flag {
            row.set(column, stats.mean < threshold);
        }
    }
}

pub struct Laboratories;

impl FeatureGroup for Laboratories {
    fn group_name(&self) -> &'static str {
        "laboratories"
    }

    fn declare(&self, row: &mut FeatureRow) {
        for panel in &PANELS {
            declare_float_zeros(row, &panel.columns);
            if let Some((column, _)) = panel.low_mean_flag {
                declare_zeros(row, &[column]);
            }
        }
    }

    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        let Some(index) = ctx.index else {
            return;
        };
        for panel in &PANELS {
            if let Some(stats) = ctx.lab_statistics(index, (panel.items)(ctx.codes)) {
                panel.write(&stats, row);
            }
        }
    }
}
