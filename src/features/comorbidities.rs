//! Comorbidities and the Charlson-Deyo index
//!
//! Pattern families are resolved against the codes of the index visit first:
//! a comorbidity counts when one of those codes was also recorded on an
//! earlier admission. Exact code lists are searched over every earlier
//! diagnosis of the patient. Some families imply a second, broader Charlson
//! condition and set both flags.

use super::{FeatureGroup, PatientContext, declare_zeros};
use crate::algorithm::scores::{CharlsonCondition, charlson_deyo_score};
use crate::codes::{CodeBook, CodeSet, PatternSet};
use crate::models::FeatureRow;

const OLD_AGE: f64 = 80.0;

/// Where a comorbidity's codes come from
#[derive(Clone, Copy)]
enum Family {
    /// Pattern family confirmed by earlier rows carrying an index-visit code
    Recurring(fn(&CodeBook) -> &PatternSet),
    /// Exact list searched over every earlier row
    Prior(fn(&CodeBook) -> &CodeSet),
}

struct Comorbidity {
    family: Family,
    /// Columns set when present; the first one is the family's own flag
    columns: &'static [&'static str],
}

const COMORBIDITIES: [Comorbidity; 21] = [
    Comorbidity {
        family: Family::Recurring(|c| &c.arrhythmia),
        columns: &["COMORBID_ARRHYTHMIA_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.anemia),
        columns: &["COMORBID_ANEMIA_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.comorbid_hypertension),
        columns: &["COMORBID_HYPERTENSION_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.copd),
        columns: &["COMORBID_COPD_FLAG", "COMORBID_CHRONIC_PULMONARY_DISEASE_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.ckd),
        columns: &["COMORBID_CKD_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.stroke),
        columns: &["COMORBID_STROKE_FLAG", "COMORBID_CEREBROVASCULAR_DISEASE_FLAG"],
    },
    Comorbidity {
        family: Family::Prior(|c| &c.tobacco_use),
        columns: &["COMORBID_TOBACCO_USE_FLAG"],
    },
    Comorbidity {
        family: Family::Prior(|c| &c.depression),
        columns: &["COMORBID_DEPRESSION_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.hypercholesterolemia),
        columns: &["COMORBID_HYPERCHOLESTEROLEMIA_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.cad),
        columns: &["COMORBID_CAD_FLAG", "COMORBID_MI_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.prior_revascularization),
        columns: &["PRIOR_REVASCULARIZATION_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.diabetes),
        columns: &["COMORBID_DIABETES_CC_FLAG", "COMORBID_DIABETES_FLAG"],
    },
    Comorbidity {
        family: Family::Prior(|c| &c.chf),
        columns: &["COMORBID_CHF_FLAG"],
    },
    Comorbidity {
        family: Family::Prior(|c| &c.pvd),
        columns: &["COMORBID_PERIPHERAL_VASCULAR_DISEASE_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.dementia),
        columns: &["COMORBID_DEMENTIA_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.rheumatologic),
        columns: &["COMORBID_RHEUMATOLOGIC_DISEASE_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.peptic_ulcer),
        columns: &["COMORBID_PEPTIC_ULCER_DISEASE_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.liver),
        columns: &[
            "COMORBID_MILD_LIVER_DISEASE_FLAG",
            "COMORBID_MODERATE_OR_SEVERE_LIVER_DISEASE_FLAG",
        ],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.hemiplegia),
        columns: &["COMORBID_HEMIPLEGIA_OR_PARAPLEGIA_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.renal),
        columns: &["COMORBID_RENAL_DISEASE_FLAG"],
    },
    Comorbidity {
        family: Family::Recurring(|c| &c.aids),
        columns: &["COMORBID_AIDS_FLAG"],
    },
];

/// Flags that are not Charlson conditions, in column order
const GENERAL_FLAGS: [&str; 11] = [
    "COMORBID_ARRHYTHMIA_FLAG",
    "COMORBID_ANEMIA_FLAG",
    "COMORBID_HYPERTENSION_FLAG",
    "COMORBID_COPD_FLAG",
    "COMORBID_CKD_FLAG",
    "COMORBID_STROKE_FLAG",
    "COMORBID_TOBACCO_USE_FLAG",
    "COMORBID_DEPRESSION_FLAG",
    "COMORBID_HYPERCHOLESTEROLEMIA_FLAG",
    "COMORBID_CAD_FLAG",
    "PRIOR_REVASCULARIZATION_FLAG",
];

impl Comorbidity {
    fn present(&self, ctx: &PatientContext<'_>) -> bool {
        let Some(index) = ctx.index else {
            return false;
        };
        match self.family {
            Family::Recurring(patterns) => ctx.prior_history_of_index_codes(index, patterns(ctx.codes)),
            Family::Prior(codes) => ctx.prior_history_of(index, codes(ctx.codes)),
        }
    }
}

pub struct Comorbidities;

impl Comorbidities {
    /// Fill the per-condition score columns and the total from the flags
    fn score(row: &mut FeatureRow) {
        for condition in CharlsonCondition::ALL {
            let present = row.int(condition.flag_column()) == 1;
            row.set(condition.score_column(), condition.points(present));
        }
        let total = charlson_deyo_score(|condition| row.int(condition.flag_column()) == 1);
        row.set("CHARLSON_DEYO_SCORE", total);
    }
}

impl FeatureGroup for Comorbidities {
    fn group_name(&self) -> &'static str {
        "comorbidities"
    }

    fn declare(&self, row: &mut FeatureRow) {
        row.declare("AGE_80_FLAG", 0_i64);
        declare_zeros(row, &GENERAL_FLAGS);
        for condition in CharlsonCondition::ALL {
            row.declare(condition.flag_column(), 0_i64);
        }
        for condition in CharlsonCondition::ALL {
            row.declare(condition.score_column(), 0_i64);
        }
        row.declare("CHARLSON_DEYO_SCORE", 0_i64);
    }

    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        let old_age = row.number("AGE_AT_ADMIT").is_some_and(|age| age >= OLD_AGE);
        row.set("AGE_80_FLAG", old_age);

        if ctx.index.is_some() {
            for comorbidity in &COMORBIDITIES {
                if comorbidity.present(ctx) {
                    for &column in comorbidity.columns {
                        row.set(column, 1_i64);
                    }
                }
            }
        }
        Self::score(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::EventStore;
    use crate::config::FeatureConfig;
    use crate::features::testing::{run_group, run_group_on};
    use crate::models::Diagnosis;

    fn store() -> EventStore {
        EventStore::new().with_diagnoses(vec![
            Diagnosis::new("P1", "V9", "03/01/2019", "I21.4"),
            Diagnosis::new("P1", "V9", "03/01/2019", "E11.65"),
            Diagnosis::new("P1", "V9", "03/01/2019", "K70.30"),
            Diagnosis::new("P1", "V9", "03/01/2019", "N18.3"),
            // earlier rows with the same codes confirm the index-visit families
            Diagnosis::new("P1", "V2", "06/01/2017", "E11.65"),
            Diagnosis::new("P1", "V2", "06/01/2017", "K70.30"),
            // an earlier CKD code that is not on the index visit
            Diagnosis::new("P1", "V2", "06/01/2017", "N18.4"),
            Diagnosis::new("P1", "V3", "01/01/2018", "443.9"),
            // a later CHF code never counts
            Diagnosis::new("P1", "V10", "06/01/2019", "428.0"),
        ])
    }

    #[test]
    fn test_flags_and_linked_conditions() {
        let row = run_group(&Comorbidities, &store(), "P1");
        assert_eq!(row.int("COMORBID_DIABETES_CC_FLAG"), 1);
        assert_eq!(row.int("COMORBID_DIABETES_FLAG"), 1);
        assert_eq!(row.int("COMORBID_MILD_LIVER_DISEASE_FLAG"), 1);
        assert_eq!(row.int("COMORBID_MODERATE_OR_SEVERE_LIVER_DISEASE_FLAG"), 1);
        assert_eq!(row.int("COMORBID_CKD_FLAG"), 0);
        assert_eq!(row.int("COMORBID_PERIPHERAL_VASCULAR_DISEASE_FLAG"), 1);
        assert_eq!(row.int("COMORBID_CHF_FLAG"), 0);
        // the index infarction itself is not an earlier one
        assert_eq!(row.int("COMORBID_CAD_FLAG"), 0);
    }

    #[test]
    fn test_charlson_total() {
        let row = run_group(&Comorbidities, &store(), "P1");
        assert_eq!(row.int("COMORBID_DIABETES_CC_FLAG_SCORE"), 2);
        assert_eq!(row.int("COMORBID_MODERATE_OR_SEVERE_LIVER_DISEASE_FLAG_SCORE"), 3);
        // diabetes 2 + 1, liver 1 + 3, peripheral vascular 1
        assert_eq!(row.int("CHARLSON_DEYO_SCORE"), 8);
    }

    #[test]
    fn test_age_flag_without_index() {
        let mut row = FeatureRow::for_patient("P5");
        row.set("AGE_AT_ADMIT", 84.2);
        let row = run_group_on(&Comorbidities, &EventStore::new(), row, &FeatureConfig::default());
        assert_eq!(row.int("AGE_80_FLAG"), 1);
        assert_eq!(row.int("CHARLSON_DEYO_SCORE"), 0);
    }

    #[test]
    fn test_column_layout() {
        let row = run_group(&Comorbidities, &EventStore::new(), "P9");
        assert_eq!(row.len(), 1 + 1 + GENERAL_FLAGS.len() + 2 * CharlsonCondition::ALL.len() + 1);
        let names: Vec<_> = row.column_names().collect();
        assert_eq!(names[1], "AGE_80_FLAG");
        assert_eq!(names[13], "COMORBID_DIABETES_CC_FLAG");
        assert_eq!(names.last(), Some(&"CHARLSON_DEYO_SCORE"));
    }
}
