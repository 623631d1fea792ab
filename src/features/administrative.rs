//! Emergency and inpatient utilisation before the index admission
//!
//! Visits are placed at their discharge date.

use super::hospital::index_length_of_stay;
use super::{FeatureGroup, PatientContext, declare_float_zeros, declare_zeros};
use crate::algorithm::window::{DayWindow, count_dated};
use crate::models::{EventDate, FeatureRow, Visit};
use crate::utils::numeric::try_float;

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

const HALF_YEAR: DayWindow = DayWindow::look_back(180);
const MONTH: DayWindow = DayWindow::look_back(30);
const DAY_BEFORE: DayWindow = DayWindow::look_back(1);

fn discharged(visit: &Visit) -> &EventDate {
    &visit.discharge_date
}

pub struct Administrative;

impl FeatureGroup for Administrative {
    fn group_name(&self) -> &'static str {
        "administrative"
    }

    fn declare(&self, row: &mut FeatureRow) {
        declare_zeros(
            row,
            &[
                "INDEX_LOS",
                "ED_VISIT_PRIOR_180_DAYS_COUNT",
                "ADMISSION_PRIOR_30_DAYS_COUNT",
                "ED_VISIT_PRIOR_30_DAYS_COUNT",
            ],
        );
        declare_float_zeros(
            row,
            &["ED_VISIT_PRIOR_30_DAYS_TIME_IN_ED", "ED_VISIT_PRIOR_30_DAYS_MINUTES_IN_ED"],
        );
        declare_zeros(row, &["ED_TO_IP_VISIT_PRIOR_30_DAYS_COUNT"]);
    }

    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        let Some(index) = ctx.index else {
            return;
        };
        let anchor = index.admission_date;

        let los = match row.get("LOS") {
            Some(value) => value.as_i64(),
            None => index_length_of_stay(ctx, index),
        };
        row.set("INDEX_LOS", los);

        let visits = ctx.repo.visits_for_patient(ctx.patient_id);
        let emergency = |visit: &Visit| visit.is_emergency();

        let ed_180 = count_dated(&visits, anchor, HALF_YEAR, discharged, emergency);
        let ed_30 = count_dated(&visits, anchor, MONTH, discharged, emergency);
        let ed_to_ip = count_dated(&visits, anchor, DAY_BEFORE, discharged, emergency);
        let admissions_30 = count_dated(&visits, anchor, MONTH, discharged, |visit| visit.is_inpatient());

        // clinical length of stay is reported in days
        let days_in_ed: f64 = visits
            .iter()
            .filter(|visit| visit.is_emergency())
            .filter(|visit| MONTH.admits(index.offset_of(&visit.discharge_date)))
            .map(|visit| try_float(&visit.clinical_los))
            .sum();

        row.set("ED_VISIT_PRIOR_180_DAYS_COUNT", ed_180);
        row.set("ED_VISIT_PRIOR_30_DAYS_COUNT", ed_30);
        row.set("ED_VISIT_PRIOR_30_DAYS_TIME_IN_ED", days_in_ed);
        row.set("ED_VISIT_PRIOR_30_DAYS_MINUTES_IN_ED", days_in_ed * MINUTES_PER_DAY);
        row.set("ED_TO_IP_VISIT_PRIOR_30_DAYS_COUNT", ed_to_ip);
        row.set("ADMISSION_PRIOR_30_DAYS_COUNT", admissions_30);
    }
}
