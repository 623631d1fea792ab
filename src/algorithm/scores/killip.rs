//! Killip heart-failure classification

use std::fmt;

/// Killip class I to IV
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KillipClass {
    I,
    II,
    III,
    IV,
}

impl KillipClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
        }
    }

    /// Parse the roman numeral written to the feature table
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "I" => Some(Self::I),
            "II" => Some(Self::II),
            "III" => Some(Self::III),
            "IV" => Some(Self::IV),
            _ => None,
        }
    }
}

impl fmt::Display for KillipClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Findings the classification is derived from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KillipEvidence {
    /// Heart failure diagnosed before the index admission
    pub prior_heart_failure: bool,
    /// Index-visit codes of the class II family
    pub class_ii_signs: bool,
    pub class_iii_signs: bool,
    pub class_iv_signs: bool,
}

/// Killip class by sequential override
///
/// Checks run I, II, III, IV and each later match replaces the earlier one,
/// so the highest class with evidence wins.
#[must_use]
pub fn killip_class(evidence: &KillipEvidence) -> Option<KillipClass> {
    let mut class = None;
    if evidence.prior_heart_failure {
        class = Some(KillipClass::I);
    }
    if evidence.class_ii_signs {
        class = Some(KillipClass::II);
    }
    if evidence.class_iii_signs {
        class = Some(KillipClass::III);
    }
    if evidence.class_iv_signs {
        class = Some(KillipClass::IV);
    }
    class
}
