//! Infarct type of the index visit and discharge medication
//!
//! Medication flags read the orders of the most recent AMI visit, which is
//! the one a patient is discharged from.

use super::{FeatureGroup, PatientContext, declare_zeros};
use crate::codes::tables::STEMI_ICD9_PREFIX;
use crate::codes::{CodeBook, CodeMatcher, NameList};
use crate::models::FeatureRow;

/// A discharge medication class with its flag and method columns
struct MedicationClass {
    names: fn(&CodeBook) -> &NameList,
    flag: &'static str,
    method: &'static str,
}

const MEDICATION_CLASSES: [MedicationClass; 4] = [
    MedicationClass {
        names: |c| &c.disch_med_bb,
        flag: "DISCH_MED_BB_FLAG",
        method: "DISCH_MED_BB_METHOD",
    },
    MedicationClass {
        names: |c| &c.disch_med_antidep,
        flag: "DISCH_MED_ANTIDEP_FLAG",
        method: "DISCH_MED_ANTIDEP_METHOD",
    },
    MedicationClass {
        names: |c| &c.disch_med_ace_arb,
        flag: "DISCH_MED_ACE_ARB_FLAG",
        method: "DISCH_MED_ACE_ARB_METHOD",
    },
    MedicationClass {
        names: |c| &c.disch_med_aspirin,
        flag: "DISCH_MED_ASPIRIN_FLAG",
        method: "DISCH_MED_ASPIRIN_METHOD",
    },
];

/// How a medication reached the patient, from the order type
///
/// 1 for prescriptions taken home, 2 for medication given in hospital, 3 for
/// medication the patient already took. Other order types have no method.
#[must_use]
pub fn order_method(order_type: &str) -> Option<i64> {
    match order_type.trim() {
        "DISCHARGE PRESCRIPTION" | "OUTPATIENT PRESCRIPTION" => Some(1),
        "INPATIENT MEDICATION" | "FACILITY-ADMINISTERED MEDICATION" => Some(2),
        "HISTORICAL MEDICATION" => Some(3),
        _ => None,
    }
}

/// Whether `code` denotes an ST-elevation infarction
#[must_use]
pub fn is_stemi_code(codes: &CodeBook, code: &str) -> bool {
    codes.stemi.matches(code)
        || (code.starts_with(STEMI_ICD9_PREFIX) && !codes.nstemi.matches(code))
}

pub struct DischargeInformation;

impl FeatureGroup for DischargeInformation {
    fn group_name(&self) -> &'static str {
        "discharge"
    }

    fn declare(&self, row: &mut FeatureRow) {
        declare_zeros(
            row,
            &[
                "UNSTABLE_ANGINA_FLAG",
                "STEMI_FLAG",
                "NSTEMI_FLAG",
                "TRANSFER_AT_DISCHARGE_FLAG",
            ],
        );
        for class in &MEDICATION_CLASSES {
            row.declare(class.flag, 0_i64);
        }
        for class in &MEDICATION_CLASSES {
            row.declare(class.method, 0_i64);
        }
    }

    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        let Some(index) = ctx.index else {
            return;
        };
        let codes = ctx.codes;
        let index_codes = ctx.index_codes(index);

        row.set(
            "UNSTABLE_ANGINA_FLAG",
            codes.unstable_angina.matches_any(index_codes.iter().copied()),
        );
        row.set(
            "STEMI_FLAG",
            index_codes.iter().any(|code| is_stemi_code(codes, code)),
        );
        row.set("NSTEMI_FLAG", codes.nstemi.matches_any(index_codes.iter().copied()));

        let orders = ctx
            .repo
            .med_orders_for_visit(ctx.patient_id, &index.latest_visit_id);
        for class in &MEDICATION_CLASSES {
            let names = (class.names)(codes);
            // later orders overwrite the method of earlier ones
            for order in orders.iter().filter(|order| names.matches(&order.item)) {
                row.set(class.flag, 1_i64);
                if let Some(method) = order_method(&order.order_type) {
                    row.set(class.method, method);
                }
            }
        }
    }
}
