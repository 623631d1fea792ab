//! Events during the index stay

use super::{FeatureGroup, PatientContext, declare_zeros};
use crate::codes::CodeMatcher;
use crate::models::FeatureRow;

const COLUMNS: [&str; 4] = [
    "ECHOCARDIOGRAPHY_FLAG",
    "IN_HOSPITAL_HF_FLAG",
    "IN_HOSPITAL_ISCHEMIA_FLAG",
    "CARDIAC_PROCEDURE_FLAG",
];

pub struct InHospitalOutcomes;

impl FeatureGroup for InHospitalOutcomes {
    fn group_name(&self) -> &'static str {
        "in_hospital"
    }

    fn declare(&self, row: &mut FeatureRow) {
        declare_zeros(row, &COLUMNS);
    }

    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        let Some(index) = ctx.index else {
            return;
        };
        let codes = ctx.codes;
        let procedures = ctx.repo.procedures_for_visit(ctx.patient_id, &index.visit_id);
        let index_codes = ctx.index_codes(index);

        row.set(
            "ECHOCARDIOGRAPHY_FLAG",
            procedures
                .iter()
                .any(|p| codes.echocardiography_names.matches(&p.description)),
        );
        row.set(
            "IN_HOSPITAL_HF_FLAG",
            codes.in_hospital_hf.matches_any(index_codes.iter().copied()),
        );
        row.set(
            "IN_HOSPITAL_ISCHEMIA_FLAG",
            codes.in_hospital_ischemia.matches_any(index_codes.iter().copied()),
        );
        row.set(
            "CARDIAC_PROCEDURE_FLAG",
            codes
                .cardiac_procedure
                .matches_any(procedures.iter().map(|p| p.code.as_str())),
        );
    }
}
