//! Age at admission and where the patient went after the last AMI stay

use chrono::NaiveDate;

use super::{FeatureGroup, PatientContext};
use crate::codes::CodeMatcher;
use crate::models::{FeatureRow, NA, Visit};
use crate::utils::date_utils::try_day_difference;

/// Age in the legacy convention: whole days over 365, plus one
#[must_use]
pub fn age_at_admission(admitted: &str, birth_date: &str) -> Option<f64> {
    try_day_difference(admitted, birth_date).map(|days| days as f64 / 365.0 + 1.0)
}

pub struct DemographicsAdditions;

impl DemographicsAdditions {
    /// The AMI visit discharged last
    ///
    /// A visit without a discharge date is placed at its admission date.
    /// Among visits discharged the same day the one seen last wins.
    fn last_discharged_ami_visit<'a>(ctx: &PatientContext<'a>) -> Option<&'a Visit> {
        let mut visit_ids: Vec<&str> = ctx
            .diagnoses()
            .into_iter()
            .filter(|dx| ctx.codes.ami.matches(&dx.code))
            .map(|dx| dx.visit_id.as_str())
            .collect();
        visit_ids.dedup();

        visit_ids
            .into_iter()
            .filter_map(|visit_id| ctx.repo.visit(ctx.patient_id, visit_id))
            .filter_map(|visit| Self::discharged_on(visit).map(|date| (date, visit)))
            .max_by_key(|(date, _)| *date)
            .map(|(_, visit)| visit)
    }

    fn discharged_on(visit: &Visit) -> Option<NaiveDate> {
        visit
            .discharge_date
            .date()
            .or_else(|| visit.admission_date.date())
    }
}

impl FeatureGroup for DemographicsAdditions {
    fn group_name(&self) -> &'static str {
        "demographics_additions"
    }

    fn declare(&self, row: &mut FeatureRow) {
        row.declare("AGE_AT_ADMIT", NA);
        row.declare("INDEX_ADMISSION_FLAG", 1_i64);
        row.declare("DISCHARGE_LOCATION", NA);
        row.declare("TRANSFER_AT_DISCHARGE_FLAG", 0_i64);
        row.declare("REHAB_FLAG", 0_i64);
    }

    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        if let Some(age) = age_at_admission(row.text("ADMIT_DATE"), row.text("DOB")) {
            row.set("AGE_AT_ADMIT", age);
        }

        if ctx.index.is_none() {
            return;
        }
        let Some(visit) = Self::last_discharged_ami_visit(ctx) else {
            return;
        };
        if !visit.visit_type.is_empty() {
            row.set("DISCHARGE_LOCATION", visit.visit_type.as_str());
        }
        let rehab = ctx
            .repo
            .diagnoses_for_visit(ctx.patient_id, &visit.visit_id)
            .iter()
            .any(|dx| ctx.codes.rehab.matches(&dx.code));
        row.set("REHAB_FLAG", rehab);
    }
}
