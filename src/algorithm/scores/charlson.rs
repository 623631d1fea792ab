//! Charlson-Deyo comorbidity index

use std::fmt;

/// A condition weighted by the Charlson-Deyo index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharlsonCondition {
    DiabetesWithComplications,
    Diabetes,
    CongestiveHeartFailure,
    MyocardialInfarction,
    PeripheralVascularDisease,
    CerebrovascularDisease,
    Dementia,
    ChronicPulmonaryDisease,
    RheumatologicDisease,
    PepticUlcerDisease,
    MildLiverDisease,
    HemiplegiaOrParaplegia,
    RenalDisease,
    ModerateOrSevereLiverDisease,
    Aids,
}

impl CharlsonCondition {
    /// All conditions in output column order
    pub const ALL: [Self; 15] = [
        Self::DiabetesWithComplications,
        Self::Diabetes,
        Self::CongestiveHeartFailure,
        Self::MyocardialInfarction,
        Self::PeripheralVascularDisease,
        Self::CerebrovascularDisease,
        Self::Dementia,
        Self::ChronicPulmonaryDisease,
        Self::RheumatologicDisease,
        Self::PepticUlcerDisease,
        Self::MildLiverDisease,
        Self::HemiplegiaOrParaplegia,
        Self::RenalDisease,
        Self::ModerateOrSevereLiverDisease,
        Self::Aids,
    ];

    /// Points contributed when the condition is present
    #[must_use]
    pub const fn weight(self) -> i64 {
        match self {
            Self::DiabetesWithComplications | Self::HemiplegiaOrParaplegia | Self::RenalDisease => 2,
            Self::ModerateOrSevereLiverDisease => 3,
            Self::Aids => 6,
            _ => 1,
        }
    }

    /// Name of the flag column
    #[must_use]
    pub const fn flag_column(self) -> &'static str {
        match self {
            Self::DiabetesWithComplications => "COMORBID_DIABETES_CC_FLAG",
            Self::Diabetes => "COMORBID_DIABETES_FLAG",
            Self::CongestiveHeartFailure => "COMORBID_CHF_FLAG",
            Self::MyocardialInfarction => "COMORBID_MI_FLAG",
            Self::PeripheralVascularDisease => "COMORBID_PERIPHERAL_VASCULAR_DISEASE_FLAG",
            Self::CerebrovascularDisease => "COMORBID_CEREBROVASCULAR_DISEASE_FLAG",
            Self::Dementia => "COMORBID_DEMENTIA_FLAG",
            Self::ChronicPulmonaryDisease => "COMORBID_CHRONIC_PULMONARY_DISEASE_FLAG",
            Self::RheumatologicDisease => "COMORBID_RHEUMATOLOGIC_DISEASE_FLAG",
            Self::PepticUlcerDisease => "COMORBID_PEPTIC_ULCER_DISEASE_FLAG",
            Self::MildLiverDisease => "COMORBID_MILD_LIVER_DISEASE_FLAG",
            Self::HemiplegiaOrParaplegia => "COMORBID_HEMIPLEGIA_OR_PARAPLEGIA_FLAG",
            Self::RenalDisease => "COMORBID_RENAL_DISEASE_FLAG",
            Self::ModerateOrSevereLiverDisease => "COMORBID_MODERATE_OR_SEVERE_LIVER_DISEASE_FLAG",
            Self::Aids => "COMORBID_AIDS_FLAG",
        }
    }

    /// Name of the weighted score column
    #[must_use]
    pub const fn score_column(self) -> &'static str {
        match self {
            Self::DiabetesWithComplications => "COMORBID_DIABETES_CC_FLAG_SCORE",
            Self::Diabetes => "COMORBID_DIABETES_FLAG_SCORE",
            Self::CongestiveHeartFailure => "COMORBID_CHF_FLAG_SCORE",
            Self::MyocardialInfarction => "COMORBID_MI_FLAG_SCORE",
            Self::PeripheralVascularDisease => "COMORBID_PERIPHERAL_VASCULAR_DISEASE_FLAG_SCORE",
            Self::CerebrovascularDisease => "COMORBID_CEREBROVASCULAR_DISEASE_FLAG_SCORE",
            Self::Dementia => "COMORBID_DEMENTIA_FLAG_SCORE",
            Self::ChronicPulmonaryDisease => "COMORBID_CHRONIC_PULMONARY_DISEASE_FLAG_SCORE",
            Self::RheumatologicDisease => "COMORBID_RHEUMATOLOGIC_DISEASE_FLAG_SCORE",
            Self::PepticUlcerDisease => "COMORBID_PEPTIC_ULCER_DISEASE_FLAG_SCORE",
            Self::MildLiverDisease => "COMORBID_MILD_LIVER_DISEASE_FLAG_SCORE",
            Self::HemiplegiaOrParaplegia => "COMORBID_HEMIPLEGIA_OR_PARAPLEGIA_FLAG_SCORE",
            Self::RenalDisease => "COMORBID_RENAL_DISEASE_FLAG_SCORE",
            Self::ModerateOrSevereLiverDisease => {
                "COMORBID_MODERATE_OR_SEVERE_LIVER_DISEASE_FLAG_SCORE"
            }
            Self::Aids => "COMORBID_AIDS_FLAG_SCORE",
        }
    }

    /// Weighted contribution of this condition
    #[must_use]
    pub const fn points(self, present: bool) -> i64 {
        if present { self.weight() } else { 0 }
    }
}

impl fmt::Display for CharlsonCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag_column())
    }
}

/// Sum of weighted contributions of the present conditions
#[must_use]
pub fn charlson_deyo_score<F>(is_present: F) -> i64
where
    F: Fn(CharlsonCondition) -> bool,
{
    CharlsonCondition::ALL
        .iter()
        .map(|&condition| condition.points(is_present(condition)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights() {
        assert_eq!(charlson_deyo_score(|_| false), 0);
        assert_eq!(charlson_deyo_score(|_| true), 10 + 2 * 3 + 3 + 6);
        assert_eq!(
            charlson_deyo_score(|c| matches!(c, CharlsonCondition::Aids | CharlsonCondition::Dementia)),
            7
        );
    }

    #[test]
    fn test_columns_are_distinct() {
        let mut names: Vec<_> = CharlsonCondition::ALL.iter().map(|c| c.score_column()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CharlsonCondition::ALL.len());
        for condition in CharlsonCondition::ALL {
            assert!(condition.score_column().starts_with(condition.flag_column()));
        }
    }
}
