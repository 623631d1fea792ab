//! HOSPITAL score and its components
//!
//! Length of stay is measured from the index admission date to the discharge
//! date on the index visit row, counting both days. A stay whose discharge
//! date is missing or unreadable has length 0.

use super::{FeatureGroup, PatientContext, declare_zeros};
use crate::algorithm::IndexAdmission;
use crate::algorithm::scores::{HospitalInputs, hospital_score, is_oncology_code};
use crate::algorithm::window::{DayWindow, count_dated};
use crate::models::{FeatureRow, NA};
use crate::utils::date_utils::days_between;

const COLUMNS: [&str; 9] = [
    "LOS",
    "LOS5_FLAG",
    "PROCEDURE_FLAG",
    "PRIOR_YEAR_ADMISSIONS_COUNT",
    "NONELECTIVE_ADMISSION_FLAG",
    "ONCOLOGY_SERVICE_FLAG",
    "HEMOGLOBIN_LEVEL_LAST_12_FLAG",
    "SODIUM_LEVEL_LAST_135_FLAG",
    "HOSPITAL_SCORE",
];

/// Discharges in the year before the index admission
const PRIOR_YEAR: DayWindow = DayWindow::new(-365, -1);
/// Emergency admissions on the index day or the day before
const NONELECTIVE: DayWindow = DayWindow::look_back(1);

const LOW_HEMOGLOBIN: f64 = 12.0;
const LOW_SODIUM: f64 = 135.0;

/// Length of stay of the index admission in days, 0 when unknown
#[must_use]
pub fn index_length_of_stay(ctx: &PatientContext<'_>, index: &IndexAdmission) -> i64 {
    ctx.index_visit(index)
        .and_then(|visit| visit.discharge_date.date())
        .map_or(0, |discharged| days_between(discharged, index.admission_date) + 1)
}

pub struct HospitalScore;

impl HospitalScore {
    fn inputs(ctx: &PatientContext<'_>, index: &IndexAdmission) -> HospitalInputs {
        let visits = ctx.repo.visits_for_patient(ctx.patient_id);
        let discharged = ctx
            .index_visit(index)
            .and_then(|visit| visit.discharge_date.date());

        let procedure_during_stay = discharged.is_some_and(|discharged| {
            ctx.repo
                .procedures_for_patient(ctx.patient_id)
                .iter()
                .filter_map(|p| p.performed.date())
                .any(|performed| index.admission_date < performed && performed < discharged)
        });

        let prior_year_admissions = count_dated(
            &visits,
            index.admission_date,
            PRIOR_YEAR,
            |visit| &visit.discharge_date,
            |_| true,
        );
        let nonelective_admission = count_dated(
            &visits,
            index.admission_date,
            NONELECTIVE,
            |visit| &visit.admission_date,
            |visit| visit.is_emergency(),
        ) > 0;

        let codes = ctx.codes;
        HospitalInputs {
            length_of_stay: index_length_of_stay(ctx, index),
            procedure_during_stay,
            prior_year_admissions: i64::try_from(prior_year_admissions).unwrap_or(i64::MAX),
            nonelective_admission,
            oncology_service: ctx.index_codes(index).into_iter().any(is_oncology_code),
            low_hemoglobin_at_discharge: ctx
                .lab_statistics(index, &codes.lab_hemoglobin)
                .is_some_and(|stats| stats.last < LOW_HEMOGLOBIN),
            low_sodium_at_discharge: ctx
                .lab_statistics(index, &codes.lab_sodium)
                .is_some_and(|stats| stats.last < LOW_SODIUM),
        }
    }
}

impl FeatureGroup for HospitalScore {
    fn group_name(&self) -> &'static str {
        "hospital"
    }

    fn declare(&self, row: &mut FeatureRow) {
        declare_zeros(row, &COLUMNS);
        row.declare("VISIT_NO", NA);
    }

    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        let Some(index) = ctx.index else {
            return;
        };
        let inputs = Self::inputs(ctx, index);

        row.set("VISIT_NO", index.visit_id.as_str());
        row.set("LOS", inputs.length_of_stay);
        row.set("LOS5_FLAG", inputs.long_stay());
        row.set("PROCEDURE_FLAG", inputs.procedure_during_stay);
        row.set("PRIOR_YEAR_ADMISSIONS_COUNT", inputs.prior_year_admissions);
        row.set("NONELECTIVE_ADMISSION_FLAG", inputs.nonelective_admission);
        row.set("ONCOLOGY_SERVICE_FLAG", inputs.oncology_service);
        row.set("HEMOGLOBIN_LEVEL_LAST_12_FLAG", inputs.low_hemoglobin_at_discharge);
        row.set("SODIUM_LEVEL_LAST_135_FLAG", inputs.low_sodium_at_discharge);
        row.set("HOSPITAL_SCORE", hospital_score(&inputs));
    }
}
