//! GRACE score and acute kidney injury staging
//!
//! The score reads age, vitals, first creatinine, Killip class and the
//! infarct flags from earlier columns, so it is computed for every patient.
//! The troponin average and kidney injury columns need an index stay.
//!
//! The kidney baseline is the latest creatinine recorded on any other visit
//! of the patient. Without one no stage is assigned.

use super::{FeatureGroup, PatientContext, declare_float_zeros, declare_zeros};
use crate::algorithm::IndexAdmission;
use crate::algorithm::scores::{
    AkiAssessment, CreatinineReading, GraceBreakdown, GraceInputs, KillipClass, assess_aki,
};
use crate::algorithm::window::in_time_order;
use crate::codes::CodeMatcher;
use crate::models::{FeatureRow, LabObservation, NA};
use crate::utils::numeric::coerce_value;

/// Mean troponin above which cardiac markers count as elevated
const TROPONIN_ELEVATED: f64 = 0.4;

const GRACE_COLUMNS: [&str; 9] = [
    "GRACE_SCORE_AGE",
    "GRACE_SCORE_HEART_RATE",
    "GRACE_SCORE_SYSTOLIC_BP",
    "GRACE_SCORE_CREATININE_LEVEL_FIRST",
    "GRACE_SCORE_KILLIP_CLASS",
    "GRACE_SCORE_CARDIAC_MARKER_ELEVATION",
    "GRACE_SCORE_CARDIAC_ARREST",
    "GRACE_SCORE_STEMI",
    "GRACE_SCORE",
];

pub struct GraceScore;

impl GraceScore {
    /// Collect the GRACE inputs from a row
    ///
    /// Vitals that were never measured read as 0.
    #[must_use]
    pub fn inputs(row: &FeatureRow) -> GraceInputs {
        GraceInputs {
            age: row.number("AGE_AT_ADMIT"),
            heart_rate: row.float("HEART_RATE_AVG"),
            systolic_bp: row.float("SYSTOLIC_BP_AVG"),
            creatinine_first: row.float("CREATININE_LEVEL_FIRST"),
            killip: KillipClass::from_label(row.text("KILLIP_CLASS")),
            cardiac_marker_elevation: row.int("CARDIAC_MARKER_ELEVATION_FLAG") == 1,
            cardiac_arrest: row.int("CARDIAC_ARREST_FLAG") == 1,
            stemi: row.int("STEMI_FLAG") == 1,
        }
    }

    fn troponin_average(ctx: &PatientContext<'_>, index: &IndexAdmission) -> Option<f64> {
        let values: Vec<f64> = ctx
            .index_labs(index, &ctx.codes.lab_troponin)
            .iter()
            .filter_map(|lab| coerce_value(lab.numeric_text(), ctx.config.lab_value_mode))
            .collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    fn readings(ctx: &PatientContext<'_>, labs: &[&LabObservation]) -> Vec<CreatinineReading> {
        in_time_order(labs)
            .into_iter()
            .filter_map(|lab| {
                coerce_value(&lab.value, ctx.config.lab_value_mode)
                    .map(|value| CreatinineReading::new(value, lab.observed.date()))
            })
            .collect()
    }

    fn kidney_injury(ctx: &PatientContext<'_>, index: &IndexAdmission) -> Option<AkiAssessment> {
        let creatinine = &ctx.codes.lab_creatinine;
        let history: Vec<&LabObservation> = ctx
            .repo
            .labs_for_patient(ctx.patient_id)
            .into_iter()
            .filter(|lab| lab.visit_id != index.visit_id && creatinine.matches(&lab.item))
            .collect();
        let baseline = Self::readings(ctx, &history).last()?.value;

        let stay = Self::readings(ctx, &ctx.index_labs(index, creatinine));
        assess_aki(&stay, baseline)
    }

    fn write_grace(row: &mut FeatureRow) {
        let grace = GraceBreakdown::from_inputs(&Self::inputs(row));
        row.set("GRACE_SCORE_AGE", grace.age);
        row.set("GRACE_SCORE_HEART_RATE", grace.heart_rate);
        row.set("GRACE_SCORE_SYSTOLIC_BP", grace.systolic_bp);
        row.set("GRACE_SCORE_CREATININE_LEVEL_FIRST", grace.creatinine);
        row.set("GRACE_SCORE_KILLIP_CLASS", grace.killip);
        row.set("GRACE_SCORE_CARDIAC_MARKER_ELEVATION", grace.cardiac_marker_elevation);
        row.set("GRACE_SCORE_CARDIAC_ARREST", grace.cardiac_arrest);
        row.set("GRACE_SCORE_STEMI", grace.stemi);
        row.set("GRACE_SCORE", grace.total());
    }

    fn write_aki(aki: &AkiAssessment, row: &mut FeatureRow) {
        row.set("AKI_STAGE_VARIABLE", aki.stage);
        row.set("AKI_FLAG", aki.any_elevated);
        row.set("AKI_STAGE_MAX", aki.max_ratio);
        row.set("AKI_STAGE_MIN", aki.min_ratio);
        row.set("AKI_RECOVERED_FLAG", aki.recovered);
        row.set("AKI_UNRESOLVED_FLAG", aki.unresolved);
        row.set("AKI_DURATION", aki.duration_days);
    }
}

impl FeatureGroup for GraceScore {
    fn group_name(&self) -> &'static str {
        "grace"
    }

    fn declare(&self, row: &mut FeatureRow) {
        for column in ["IN_HOSPITAL_PCI_FLAG", "SYSTOLIC_BP_AVG", "HEART_RATE_AVG", "ST_SEGMENT_AVG"] {
            row.declare(column, NA);
        }
        row.declare("TROPONIN_AVG", 0.0);
        row.declare("CARDIAC_MARKER_ELEVATION_FLAG", 0_i64);
        declare_zeros(row, &GRACE_COLUMNS);
        declare_zeros(row, &["AKI_STAGE_VARIABLE", "AKI_FLAG"]);
        declare_float_zeros(row, &["AKI_STAGE_MAX", "AKI_STAGE_MIN"]);
        declare_zeros(
            row,
            &["AKI_RECOVERED_FLAG", "AKI_UNRESOLVED_FLAG", "AKI_DURATION"],
        );
    }

    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        if let Some(index) = ctx.index {
            let in_hospital_pci = ctx
                .codes
                .in_hospital_pci
                .matches_any(ctx.index_codes(index));
            row.set("IN_HOSPITAL_PCI_FLAG", in_hospital_pci);

            if let Some(troponin) = Self::troponin_average(ctx, index) {
                row.set("TROPONIN_AVG", troponin);
                row.set("CARDIAC_MARKER_ELEVATION_FLAG", troponin > TROPONIN_ELEVATED);
            }
            if let Some(aki) = Self::kidney_injury(ctx, index) {
                Self::write_aki(&aki, row);
            }
        }
        Self::write_grace(row);
    }
}
