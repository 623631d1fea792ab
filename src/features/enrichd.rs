//! ENRICHD risk factors: Killip class, ejection fraction, post-infarction CABG,
//! heart failure and stroke history

use super::{FeatureGroup, PatientContext, declare_zeros};
use crate::algorithm::IndexAdmission;
use crate::algorithm::scores::{KillipClass, KillipEvidence, killip_class};
use crate::codes::CodeMatcher;
use crate::models::{FeatureRow, NA};

pub struct Enrichd;

impl Enrichd {
    /// Killip class from earlier heart failure and index-visit signs
    #[must_use]
    pub fn killip(ctx: &PatientContext<'_>, index: &IndexAdmission) -> Option<KillipClass> {
        let codes = ctx.codes;
        let index_codes = ctx.index_codes(index);
        let evidence = KillipEvidence {
            prior_heart_failure: ctx.prior_history_of(index, &codes.chf),
            class_ii_signs: codes.killip_ii.matches_any(index_codes.iter().copied()),
            class_iii_signs: codes.killip_iii.matches_any(index_codes.iter().copied()),
            class_iv_signs: codes.killip_iv.matches_any(index_codes.iter().copied()),
        };
        killip_class(&evidence)
    }
}

impl FeatureGroup for Enrichd {
    fn group_name(&self) -> &'static str {
        "enrichd"
    }

    fn declare(&self, row: &mut FeatureRow) {
        row.declare("KILLIP_CLASS", NA);
        declare_zeros(
            row,
            &["LVEF_FLAG", "POST_MI_CABG_FLAG", "CHF_FLAG", "HISTORY_STROKE_FLAG"],
        );
    }

    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        let Some(index) = ctx.index else {
            return;
        };
        let codes = ctx.codes;
        let index_codes = ctx.index_codes(index);

        if let Some(class) = Self::killip(ctx, index) {
            row.set("KILLIP_CLASS", class.as_str());
        }
        row.set("LVEF_FLAG", codes.lvef.matches_any(index_codes.iter().copied()));

        // bypass surgery recorded together with a coronary disease code
        let post_mi_cabg = codes.cabg.matches_any(index_codes.iter().copied())
            && codes.cad.matches_any(index_codes.iter().copied());
        row.set("POST_MI_CABG_FLAG", post_mi_cabg);

        row.set("CHF_FLAG", ctx.prior_history_of(index, &codes.chf));
        row.set(
            "HISTORY_STROKE_FLAG",
            ctx.prior_history_of_index_codes(index, &codes.history_stroke),
        );
    }
}
