//! Diagnoses recorded in the month or quarter before the index admission

use super::{FeatureGroup, PatientContext, declare_zeros};
use crate::algorithm::window::{DayWindow, presence_flag};
use crate::codes::{CodeBook, CodeSet};
use crate::models::FeatureRow;

const MONTH: DayWindow = DayWindow::look_back(30);
const QUARTER: DayWindow = DayWindow::look_back(90);

/// One look-back flag: column, code list and window
struct PriorFlag {
    column: &'static str,
    codes: fn(&CodeBook) -> &CodeSet,
    window: DayWindow,
}

const PRIOR_FLAGS: [PriorFlag; 13] = [
    PriorFlag { column: "PRIOR_SEPSIS_30D", codes: |c| &c.prior_sepsis, window: MONTH },
    PriorFlag { column: "PRIOR_HYPERKALEMIA_30D", codes: |c| &c.prior_hyperkalemia, window: MONTH },
    PriorFlag { column: "PRIOR_HYPOKALEMIA_30D", codes: |c| &c.prior_hypokalemia, window: MONTH },
    PriorFlag { column: "PRIOR_HYPERVOLEMIA_30D", codes: |c| &c.prior_hypervolemia, window: MONTH },
    PriorFlag { column: "PRIOR_AKF_30D", codes: |c| &c.prior_akf, window: MONTH },
    PriorFlag { column: "PRIOR_UTI_30D", codes: |c| &c.prior_uti, window: MONTH },
    PriorFlag {
        column: "PRIOR_LONGTERM_ANTICOAGULANTS_30D",
        codes: |c| &c.prior_longterm_anticoagulants,
        window: MONTH,
    },
    PriorFlag { column: "PRIOR_SEPSIS_90D", codes: |c| &c.prior_sepsis, window: QUARTER },
    PriorFlag { column: "PRIOR_DIS_MAGN_METAB_90D", codes: |c| &c.prior_dis_magn_metab, window: QUARTER },
    PriorFlag { column: "PRIOR_HYPOKALEMIA_90D", codes: |c| &c.prior_hypokalemia, window: QUARTER },
    PriorFlag { column: "PRIOR_LVEF_90D", codes: |c| &c.prior_lvef, window: QUARTER },
    PriorFlag { column: "PRIOR_AKF_90D", codes: |c| &c.prior_akf, window: QUARTER },
    PriorFlag { column: "PRIOR_CARDIAC_DEVICE_90D", codes: |c| &c.prior_cardiac_device, window: QUARTER },
];

pub struct PriorDiagnoses;

impl FeatureGroup for PriorDiagnoses {
    fn group_name(&self) -> &'static str {
        "prior_diagnoses"
    }

    fn declare(&self, row: &mut FeatureRow) {
        let columns: Vec<&'static str> = PRIOR_FLAGS.iter().map(|flag| flag.column).collect();
        declare_zeros(row, &columns);
    }

    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        let Some(index) = ctx.index else {
            return;
        };
        let diagnoses = ctx.diagnoses();

        for flag in &PRIOR_FLAGS {
            let present = presence_flag(
                &diagnoses,
                index.admission_date,
                (flag.codes)(ctx.codes),
                flag.window,
            );
            row.set(flag.column, present);
        }
    }
}
