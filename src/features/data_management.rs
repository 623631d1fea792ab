//! Outcome and bookkeeping columns
//!
//! Readmissions are visits admitted after the index day; earlier stays are
//! placed at their discharge date. `OUTCOME_30DRED` is the 30-day
//! readmission flag.

use super::{FeatureGroup, PatientContext, declare_zeros};
use crate::algorithm::window::{DayWindow, count_dated};
use crate::models::{EventDate, FeatureRow, Visit};

const PREVIOUS_MONTH: DayWindow = DayWindow::new(-30, -1);
const OVER_A_YEAR_BEFORE: DayWindow = DayWindow::new(i64::MIN, -366);
const NEXT_MONTH: DayWindow = DayWindow::new(1, 30);

fn admitted(visit: &Visit) -> &EventDate {
    &visit.admission_date
}

fn discharged(visit: &Visit) -> &EventDate {
    &visit.discharge_date
}

/// Write a count and its presence flag
fn set_count(row: &mut FeatureRow, flag: &'static str, sum: &'static str, count: usize) {
    row.set(flag, count > 0);
    row.set(sum, count);
}

pub struct DataManagement;

impl FeatureGroup for DataManagement {
    fn group_name(&self) -> &'static str {
        "data_management"
    }

    fn declare(&self, row: &mut FeatureRow) {
        declare_zeros(
            row,
            &[
                "GAP",
                "LOS_NEW",
                "NEW_LOS5_FLAG",
                "PREVIOUS_30_DAY",
                "PREVIOUS_30D_SUM",
                "MORE_PREVIOUS_YR",
                "MORE_PREVIOUS_YR_SUM",
                "READMISSIONS",
                "READMISSIONS_SUM",
                "FLG_30D",
                "FLG_30D_SUM",
                "OUTCOME_30DRED",
                "NEW_LOS5_FLAG_SUM",
                "PREVIOUS_YR",
                "PREVIOUS_YR_SUM",
            ],
        );
    }

    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        row.set("LOS_NEW", row.int("LOS"));
        row.set("NEW_LOS5_FLAG", row.int("LOS5_FLAG"));
        let prior_year = row.int("PRIOR_YEAR_ADMISSIONS_COUNT");
        row.set("PREVIOUS_YR", prior_year > 0);
        row.set("PREVIOUS_YR_SUM", prior_year);

        let Some(index) = ctx.index else {
            return;
        };
        let anchor = index.admission_date;
        let visits = ctx.repo.visits_for_patient(ctx.patient_id);
        let any = |_: &Visit| true;

        let previous_30 = count_dated(&visits, anchor, PREVIOUS_MONTH, discharged, any);
        let more_than_year = count_dated(&visits, anchor, OVER_A_YEAR_BEFORE, discharged, any);
        let readmissions = count_dated(&visits, anchor, DayWindow::AFTER, admitted, any);
        let within_30 = count_dated(&visits, anchor, NEXT_MONTH, admitted, any);

        set_count(row, "PREVIOUS_30_DAY", "PREVIOUS_30D_SUM", previous_30);
        set_count(row, "MORE_PREVIOUS_YR", "MORE_PREVIOUS_YR_SUM", more_than_year);
        set_count(row, "READMISSIONS", "READMISSIONS_SUM", readmissions);
        set_count(row, "FLG_30D", "FLG_30D_SUM", within_30);
        row.set("OUTCOME_30DRED", within_30 > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::EventStore;
    use crate::config::FeatureConfig;
    use crate::features::testing::run_group_on;
    use crate::models::Diagnosis;

    fn store() -> EventStore {
        EventStore::new()
            .with_diagnoses(vec![Diagnosis::new("P1", "V9", "03/01/2019", "I21.4")])
            .with_visits(vec![
                Visit::new("P1", "V9", "03/01/2019", "03/05/2019", "INPATIENT"),
                Visit::new("P1", "V8", "02/01/2019", "02/20/2019", "INPATIENT"),
                Visit::new("P1", "V7", "01/01/2018", "02/01/2018", "INPATIENT"),
                Visit::new("P1", "V10", "03/20/2019", "03/22/2019", "INPATIENT"),
                Visit::new("P1", "V11", "06/01/2019", "06/03/2019", "EMERGENCY"),
            ])
    }

    #[test]
    fn test_readmission_outcomes() {
        let mut row = FeatureRow::for_patient("P1");
        row.set("LOS", 5_i64);
        row.set("LOS5_FLAG", 1_i64);
        row.set("PRIOR_YEAR_ADMISSIONS_COUNT", 2_i64);
        let row = run_group_on(&DataManagement, &store(), row, &FeatureConfig::default());

        assert_eq!(row.int("LOS_NEW"), 5);
        assert_eq!(row.int("NEW_LOS5_FLAG"), 1);
        assert_eq!(row.int("PREVIOUS_YR"), 1);
        assert_eq!(row.int("PREVIOUS_YR_SUM"), 2);
        assert_eq!(row.int("PREVIOUS_30D_SUM"), 1);
        assert_eq!(row.int("MORE_PREVIOUS_YR_SUM"), 1);
        assert_eq!(row.int("READMISSIONS_SUM"), 2);
        assert_eq!(row.int("READMISSIONS"), 1);
        assert_eq!(row.int("FLG_30D_SUM"), 1);
        assert_eq!(row.int("OUTCOME_30DRED"), 1);
        assert_eq!(row.int("GAP"), 0);
        assert_eq!(row.int("NEW_LOS5_FLAG_SUM"), 0);
    }

    #[test]
    fn test_patient_without_index_keeps_zero_outcomes() {
        let row = run_group_on(
            &DataManagement,
            &store(),
            FeatureRow::for_patient("P2"),
            &FeatureConfig::default(),
        );
        assert_eq!(row.int("READMISSIONS_SUM"), 0);
        assert_eq!(row.int("PREVIOUS_YR"), 0);
    }
}
