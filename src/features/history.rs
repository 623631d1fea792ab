//! Cardiac and psychiatric history before the index admission
//!
//! Every flag looks at the patient's diagnoses dated strictly before the
//! index admission day. Chest pain is recognised by its description, the
//! rest by code.

use super::{FeatureGroup, PatientContext, declare_zeros};
use crate::algorithm::window::{DayWindow, count_matching, presence_flag};
use crate::codes::{CodeBook, CodeMatcher, CodeSet};
use crate::models::FeatureRow;

const CODED_HISTORY: [(&str, fn(&CodeBook) -> &CodeSet); 8] = [
    ("HISTORY_AMI_FLAG", |c| &c.history_ami),
    ("HISTORY_CABG_FLAG", |c| &c.cabg),
    ("HISTORY_PCI_FLAG", |c| &c.pci),
    ("HISTORY_PVD_FLAG", |c| &c.pvd),
    ("HISTORY_ANGINA_FLAG", |c| &c.angina),
    ("HISTORY_UNSTABLE_ANGINA_FLAG", |c| &c.unstable_angina),
    ("HISTORY_HYPERTENSION_FLAG", |c| &c.hypertension),
    ("HISTORY_DEPRESSION_FLAG", |c| &c.depression),
];

pub struct PatientHistory;

impl FeatureGroup for PatientHistory {
    fn group_name(&self) -> &'static str {
        "history"
    }

    fn declare(&self, row: &mut FeatureRow) {
        row.declare("HISTORY_CHEST_PAIN_FLAG", 0_i64);
        for (column, _) in CODED_HISTORY {
            row.declare(column, 0_i64);
        }
        declare_zeros(row, &["FAMILY_DEPRESSION_FLAG", "MAJOR_DEPRESSION_COUNT"]);
    }

    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        let Some(index) = ctx.index else {
            return;
        };
        let codes = ctx.codes;
        let diagnoses = ctx.diagnoses();
        let anchor = index.admission_date;

        let chest_pain = diagnoses.iter().any(|dx| {
            codes.chest_pain_names.matches(&dx.description)
                && DayWindow::BEFORE.admits(index.offset_of(&dx.admission_date))
        });
        row.set("HISTORY_CHEST_PAIN_FLAG", chest_pain);

        for (column, list) in CODED_HISTORY {
            let present = presence_flag(&diagnoses, anchor, list(codes), DayWindow::BEFORE);
            row.set(column, present);
        }

        // every earlier depression diagnosis counts, repeats included
        let episodes = count_matching(&diagnoses, anchor, &codes.depression, DayWindow::BEFORE);
        row.set("MAJOR_DEPRESSION_COUNT", episodes);
        row.set(
            "FAMILY_DEPRESSION_FLAG",
            presence_flag(&diagnoses, anchor, &codes.family_depression, DayWindow::BEFORE),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::EventStore;
    use crate::features::testing::run_group;
    use crate::models::Diagnosis;

    fn store() -> EventStore {
        EventStore::new().with_diagnoses(vec![
            Diagnosis::new("P1", "V9", "03/01/2019", "I21.4"),
            Diagnosis::new("P1", "V2", "06/01/2015", "786.50").with_description("CHEST PAIN UNSPECIFIED"),
            Diagnosis::new("P1", "V3", "07/01/2016", "I73.9"),
            Diagnosis::new("P1", "V3", "07/01/2016", "311"),
            Diagnosis::new("P1", "V4", "08/01/2017", "296.2"),
            // same day as the index admission
            Diagnosis::new("P1", "V9", "03/01/2019", "I10"),
            // after the index admission
            Diagnosis::new("P1", "V10", "05/01/2019", "Z95.5"),
        ])
    }

    #[test]
    fn test_history_is_strictly_before_index() {
        let row = run_group(&PatientHistory, &store(), "P1");
        assert_eq!(row.int("HISTORY_CHEST_PAIN_FLAG"), 1);
        assert_eq!(row.int("HISTORY_PVD_FLAG"), 1);
        assert_eq!(row.int("HISTORY_HYPERTENSION_FLAG"), 0);
        assert_eq!(row.int("HISTORY_PCI_FLAG"), 0);
        assert_eq!(row.int("HISTORY_DEPRESSION_FLAG"), 1);
        assert_eq!(row.int("MAJOR_DEPRESSION_COUNT"), 2);
        assert_eq!(row.int("FAMILY_DEPRESSION_FLAG"), 0);
    }

    #[test]
    fn test_column_order() {
        let row = run_group(&PatientHistory, &EventStore::new(), "P9");
        let names: Vec<_> = row.column_names().collect();
        assert_eq!(names[1], "HISTORY_CHEST_PAIN_FLAG");
        assert_eq!(names[8], "HISTORY_HYPERTENSION_FLAG");
        assert_eq!(names[11], "MAJOR_DEPRESSION_COUNT");
    }
}
