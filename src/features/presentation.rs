//! Presentation and disease characteristics of the index admission

use std::collections::BTreeSet;

use super::{FeatureGroup, PatientContext, declare_zeros};
use crate::algorithm::IndexAdmission;
use crate::codes::CodeMatcher;
use crate::models::{FeatureRow, NA};

const COLUMNS: [&str; 10] = [
    "TRANSFER_PATIENT_FLAG",
    "CHEST_PAIN_FLAG",
    "CARDIAC_ARREST_FLAG",
    "REVASCULARIZATION_FLAG",
    "VESSELS_1_FLAG",
    "VESSELS_2_FLAG",
    "VESSELS_3_FLAG",
    "VESSELS_4_FLAG",
    "VESSELS_COUNT",
    "CLOPIDOGREL_FLAG",
];

/// Vessels treated, from the distinct revascularization codes of the patient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VesselCount {
    /// Distinct single-vessel procedure codes
    pub single: usize,
    /// An additional-vessel code was recorded
    pub additional: bool,
}

impl VesselCount {
    /// Total vessels counted
    #[must_use]
    pub fn total(self) -> usize {
        self.single + usize::from(self.additional)
    }

    /// The `VESSELS_n_FLAG` column that applies, if any
    ///
    /// Other combinations set no flag but still count toward `VESSELS_COUNT`.
    #[must_use]
    pub const fn flag_column(self) -> Option<&'static str> {
        match (self.single, self.additional) {
            (1, false) => Some("VESSELS_1_FLAG"),
            (1, true) => Some("VESSELS_2_FLAG"),
            (2, true) => Some("VESSELS_3_FLAG"),
            (3, true) => Some("VESSELS_4_FLAG"),
            _ => None,
        }
    }
}

pub struct Presentation;

impl Presentation {
    fn vessels(ctx: &PatientContext<'_>) -> (bool, VesselCount) {
        let codes = ctx.codes;
        let revascularizations: BTreeSet<&str> = ctx
            .repo
            .procedures_for_patient(ctx.patient_id)
            .into_iter()
            .map(|p| p.code.as_str())
            .filter(|code| codes.revascularization.matches(code))
            .collect();

        let count = VesselCount {
            single: revascularizations
                .iter()
                .filter(|code| codes.one_vessel.matches(code))
                .count(),
            additional: codes.additional_vessel.matches_any(revascularizations.iter().copied()),
        };
        (!revascularizations.is_empty(), count)
    }

    fn ami_location<'a>(ctx: &PatientContext<'a>, index: &IndexAdmission) -> Option<&'a str> {
        ctx.index_codes(index)
            .into_iter()
            .find_map(|code| ctx.codes.location_of(code))
    }
}

impl FeatureGroup for Presentation {
    fn group_name(&self) -> &'static str {
        "presentation"
    }

    fn declare(&self, row: &mut FeatureRow) {
        declare_zeros(row, &COLUMNS);
        row.declare("AMI_LOCATION", NA);
    }

    fn compute(&self, ctx: &PatientContext<'_>, row: &mut FeatureRow) {
        let Some(index) = ctx.index else {
            return;
        };
        let codes = ctx.codes;
        let index_codes = ctx.index_codes(index);

        let transfer = ctx.index_visit(index).is_some_and(|visit| visit.is_inpatient());
        row.set("TRANSFER_PATIENT_FLAG", transfer);
        row.set("CHEST_PAIN_FLAG", codes.chest_pain.matches_any(index_codes.iter().copied()));
        row.set(
            "CARDIAC_ARREST_FLAG",
            codes.cardiac_arrest.matches_any(index_codes.iter().copied()),
        );

        let (revascularized, vessels) = Self::vessels(ctx);
        row.set("REVASCULARIZATION_FLAG", revascularized);
        if let Some(column) = vessels.flag_column() {
            row.set(column, 1_i64);
        }
        row.set("VESSELS_COUNT", vessels.total());

        let clopidogrel = ctx
            .repo
            .med_orders_for_visit(ctx.patient_id, &index.visit_id)
            .iter()
            .any(|order| codes.clopidogrel_names.matches(&order.item));
        row.set("CLOPIDOGREL_FLAG", clopidogrel);

        if let Some(location) = Self::ami_location(ctx, index) {
            row.set("AMI_LOCATION", location);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::EventStore;
    use crate::features::testing::run_group;
    use crate::models::{Diagnosis, MedicationOrder, Procedure, Visit};

    #[test]
    fn test_vessel_flags() {
        let one = VesselCount { single: 1, additional: false };
        assert_eq!(one.flag_column(), Some("VESSELS_1_FLAG"));
        let three = VesselCount { single: 2, additional: true };
        assert_eq!(three.flag_column(), Some("VESSELS_3_FLAG"));
        assert_eq!(three.total(), 3);
        let odd = VesselCount { single: 2, additional: false };
        assert_eq!(odd.flag_column(), None);
        assert_eq!(odd.total(), 2);
    }

    #[test]
    fn test_presentation_of_index_visit() {
        let store = EventStore::new()
            .with_diagnoses(vec![
                Diagnosis::new("P1", "V9", "03/01/2019", "410.31"),
                Diagnosis::new("P1", "V9", "03/01/2019", "I46.9"),
            ])
            .with_visits(vec![Visit::new("P1", "V9", "03/01/2019", "03/05/2019", "INPATIENT")])
            .with_procedures(vec![
                Procedure::new("P1", "V9", "92941", "03/02/2019"),
                Procedure::new("P1", "V9", "92941", "03/02/2019"),
                Procedure::new("P1", "V9", "92944", "03/02/2019"),
            ])
            .with_med_orders(vec![MedicationOrder::new(
                "P1",
                "V9",
                "CLOPIDOGREL BISULFATE 75 MG PO TABLET",
                "INPATIENT MEDICATION",
            )]);

        let row = run_group(&Presentation, &store, "P1");
        assert_eq!(row.int("TRANSFER_PATIENT_FLAG"), 1);
        assert_eq!(row.int("CHEST_PAIN_FLAG"), 0);
        assert_eq!(row.int("CARDIAC_ARREST_FLAG"), 1);
        assert_eq!(row.int("REVASCULARIZATION_FLAG"), 1);
        assert_eq!(row.int("VESSELS_2_FLAG"), 1);
        assert_eq!(row.int("VESSELS_COUNT"), 2);
        assert_eq!(row.int("CLOPIDOGREL_FLAG"), 1);
        assert_eq!(row.text("AMI_LOCATION"), "Inferoposterior wall");
    }
}
