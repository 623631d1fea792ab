//! Compiled code lists used by the feature groups.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use rustc_hash::FxHashMap;

use super::tables;
use super::{CodeSet, NameList, PatternSet};
use crate::error::Result;
use crate::error::util::safe_read_to_string;
use crate::utils::logging::log_warning;

/// Replacement lists keyed by code-list name
pub type CodeOverrides = BTreeMap<String, Vec<String>>;

/// Every code list, pattern family and item-name list the features consult
#[derive(Debug, Clone)]
pub struct CodeBook {
    pub ami: CodeSet,
    pub ami_location: FxHashMap<String, String>,
    pub chest_pain: CodeSet,
    pub cardiac_arrest: CodeSet,
    pub clopidogrel_names: CodeSet,

    pub prior_sepsis: CodeSet,
    pub prior_hyperkalemia: CodeSet,
    pub prior_hypokalemia: CodeSet,
    pub prior_hypervolemia: CodeSet,
    pub prior_akf: CodeSet,
    pub prior_uti: CodeSet,
    pub prior_longterm_anticoagulants: CodeSet,
    pub prior_dis_magn_metab: CodeSet,
    pub prior_lvef: CodeSet,
    pub prior_cardiac_device: CodeSet,

    pub revascularization: CodeSet,
    pub one_vessel: CodeSet,
    pub additional_vessel: CodeSet,

    pub chest_pain_names: CodeSet,
    pub family_depression: CodeSet,
    pub history_ami: CodeSet,
    pub cabg: CodeSet,
    pub pci: CodeSet,
    pub pvd: CodeSet,
    pub angina: CodeSet,
    pub unstable_angina: CodeSet,
    pub depression: CodeSet,
    pub hypertension: CodeSet,

    pub echocardiography_names: CodeSet,
    pub in_hospital_hf: CodeSet,
    pub in_hospital_ischemia: CodeSet,
    pub cardiac_procedure: PatternSet,

    pub arrhythmia: PatternSet,
    pub anemia: PatternSet,
    pub comorbid_hypertension: PatternSet,
    pub copd: PatternSet,
    pub ckd: PatternSet,
    pub stroke: PatternSet,
    pub tobacco_use: CodeSet,
    pub hypercholesterolemia: PatternSet,
    pub cad: PatternSet,
    pub prior_revascularization: PatternSet,
    pub diabetes: PatternSet,
    pub chf: CodeSet,
    pub dementia: PatternSet,
    pub rheumatologic: PatternSet,
    pub peptic_ulcer: PatternSet,
    pub liver: PatternSet,
    pub hemiplegia: PatternSet,
    pub renal: PatternSet,
    pub aids: PatternSet,

    pub disch_med_bb: NameList,
    pub disch_med_antidep: NameList,
    pub disch_med_ace_arb: NameList,
    pub disch_med_aspirin: NameList,

    pub stemi: CodeSet,
    pub nstemi: CodeSet,
    pub rehab: CodeSet,

    pub killip_ii: CodeSet,
    pub killip_iii: CodeSet,
    pub killip_iv: CodeSet,
    pub lvef: CodeSet,
    pub history_stroke: PatternSet,
    pub in_hospital_pci: CodeSet,

    pub lab_sodium: CodeSet,
    pub lab_calcium: CodeSet,
    pub lab_creatinine: CodeSet,
    pub lab_hemoglobin: CodeSet,
    pub lab_ck_mb: CodeSet,
    pub lab_ck_total: CodeSet,
    pub lab_bnp: CodeSet,
    pub lab_troponin: CodeSet,
}

/// Resolves each list from overrides or built-in tables, remembering which keys were asked for
struct ListSource<'a> {
    overrides: &'a CodeOverrides,
    requested: BTreeSet<&'static str>,
}

impl<'a> ListSource<'a> {
    fn new(overrides: &'a CodeOverrides) -> Self {
        Self {
            overrides,
            requested: BTreeSet::new(),
        }
    }

    fn entries(&mut self, key: &'static str, builtin: &[&str]) -> Vec<String> {
        self.requested.insert(key);
        self.overrides.get(key).map_or_else(
            || builtin.iter().map(|s| (*s).to_string()).collect(),
            Clone::clone,
        )
    }

    fn codes(&mut self, key: &'static str, builtin: &[&str]) -> CodeSet {
        CodeSet::new(&self.entries(key, builtin))
    }

    fn patterns(&mut self, key: &'static str, builtin: &[&str]) -> Result<PatternSet> {
        PatternSet::compile(key, &self.entries(key, builtin))
    }

    fn names(&mut self, key: &'static str, builtin: &[&str]) -> NameList {
        NameList::new(&self.entries(key, builtin))
    }

    fn unknown_keys(&self) -> Vec<&'a str> {
        self.overrides
            .keys()
            .map(String::as_str)
            .filter(|key| !self.requested.contains(*key))
            .collect()
    }
}

impl CodeBook {
    /// Code book compiled from the built-in tables
    pub fn standard() -> Result<Self> {
        Self::with_overrides(&CodeOverrides::new())
    }

    /// Code book reading replacement lists from a JSON object of `name -> [codes]`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = safe_read_to_string(path, "code list overrides")?;
        let overrides: CodeOverrides = serde_json::from_str(&text)?;
        log::info!("Loaded {} code list overrides from {}", overrides.len(), path.display());
        Self::with_overrides(&overrides)
    }

    /// Code book with selected lists replaced
    ///
    /// Unknown list names are reported and otherwise ignored.
    pub fn with_overrides(overrides: &CodeOverrides) -> Result<Self> {
        let mut src = ListSource::new(overrides);

        let book = Self {
            ami: src.codes("ami", tables::AMI),
            ami_location: tables::AMI_LOCATION
                .iter()
                .map(|(code, site)| ((*code).to_string(), (*site).to_string()))
                .collect(),
            chest_pain: src.codes("chest_pain", tables::CHEST_PAIN),
            cardiac_arrest: src.codes("cardiac_arrest", tables::CARDIAC_ARREST),
            clopidogrel_names: src.codes("clopidogrel_names", tables::CLOPIDOGREL_NAMES),

            prior_sepsis: src.codes("prior_sepsis", tables::PRIOR_SEPSIS),
            prior_hyperkalemia: src.codes("prior_hyperkalemia", tables::PRIOR_HYPERKALEMIA),
            prior_hypokalemia: src.codes("prior_hypokalemia", tables::PRIOR_HYPOKALEMIA),
            prior_hypervolemia: src.codes("prior_hypervolemia", tables::PRIOR_HYPERVOLEMIA),
            prior_akf: src.codes("prior_akf", tables::PRIOR_AKF),
            prior_uti: src.codes("prior_uti", tables::PRIOR_UTI),
            prior_longterm_anticoagulants: src.codes(
                "prior_longterm_anticoagulants",
                tables::PRIOR_LONGTERM_ANTICOAGULANTS,
            ),
            prior_dis_magn_metab: src.codes("prior_dis_magn_metab", tables::PRIOR_DIS_MAGN_METAB),
            prior_lvef: src.codes("prior_lvef", tables::PRIOR_LVEF),
            prior_cardiac_device: src.codes("prior_cardiac_device", tables::PRIOR_CARDIAC_DEVICE),

            revascularization: src.codes("revascularization", tables::REVASCULARIZATION),
            one_vessel: src.codes("one_vessel", tables::ONE_VESSEL),
            additional_vessel: src.codes("additional_vessel", tables::ADDITIONAL_VESSEL),

            chest_pain_names: src.codes("chest_pain_names", tables::CHEST_PAIN_NAMES),
            family_depression: src.codes("family_depression", tables::FAMILY_DEPRESSION),
            history_ami: src.codes("history_ami", tables::HISTORY_AMI),
            cabg: src.codes("cabg", tables::CABG),
            pci: src.codes("pci", tables::PCI),
            pvd: src.codes("pvd", tables::PVD),
            angina: src.codes("angina", tables::ANGINA),
            unstable_angina: src.codes("unstable_angina", tables::UNSTABLE_ANGINA),
            depression: src.codes("depression", tables::DEPRESSION),
            hypertension: src.codes("hypertension", tables::HYPERTENSION),

            echocardiography_names: src
                .codes("echocardiography_names", tables::ECHOCARDIOGRAPHY_NAMES),
            in_hospital_hf: src.codes("in_hospital_hf", tables::IN_HOSPITAL_HF),
            in_hospital_ischemia: src.codes("in_hospital_ischemia", tables::IN_HOSPITAL_ISCHEMIA),
            cardiac_procedure: src
                .patterns("cardiac_procedure", tables::CARDIAC_PROCEDURE_PATTERNS)?,

            arrhythmia: src.patterns("arrhythmia", tables::ARRHYTHMIA_PATTERNS)?,
            anemia: src.patterns("anemia", tables::ANEMIA_PATTERNS)?,
            comorbid_hypertension: src
                .patterns("comorbid_hypertension", tables::HYPERTENSION_PATTERNS)?,
            copd: src.patterns("copd", tables::COPD_PATTERNS)?,
            ckd: src.patterns("ckd", tables::CKD_PATTERNS)?,
            stroke: src.patterns("stroke", tables::STROKE_PATTERNS)?,
            tobacco_use: src.codes("tobacco_use", tables::TOBACCO_USE),
            hypercholesterolemia: src
                .patterns("hypercholesterolemia", tables::HYPERCHOLESTEROLEMIA_PATTERNS)?,
            cad: src.patterns("cad", tables::CAD_PATTERNS)?,
            prior_revascularization: src
                .patterns("prior_revascularization", tables::PRIOR_REVASCULARIZATION_PATTERNS)?,
            diabetes: src.patterns("diabetes", tables::DIABETES_PATTERNS)?,
            chf: src.codes("chf", tables::CHF),
            dementia: src.patterns("dementia", tables::DEMENTIA_PATTERNS)?,
            rheumatologic: src.patterns("rheumatologic", tables::RHEUMATOLOGIC_PATTERNS)?,
            peptic_ulcer: src.patterns("peptic_ulcer", tables::PEPTIC_ULCER_PATTERNS)?,
            liver: src.patterns("liver", tables::LIVER_PATTERNS)?,
            hemiplegia: src.patterns("hemiplegia", tables::HEMIPLEGIA_PATTERNS)?,
            renal: src.patterns("renal", tables::RENAL_PATTERNS)?,
            aids: src.patterns("aids", tables::AIDS_PATTERNS)?,

            disch_med_bb: src.names("disch_med_bb", tables::DISCH_MED_BB_NAMES),
            disch_med_antidep: src.names("disch_med_antidep", tables::DISCH_MED_ANTIDEP_NAMES),
            disch_med_ace_arb: src.names("disch_med_ace_arb", tables::DISCH_MED_ACE_ARB_NAMES),
            disch_med_aspirin: src.names("disch_med_aspirin", tables::DISCH_MED_ASPIRIN_NAMES),

            stemi: src.codes("stemi", tables::STEMI),
            nstemi: src.codes("nstemi", tables::NSTEMI),
            rehab: src.codes("rehab", tables::REHAB),

            killip_ii: src.codes("killip_ii", tables::KILLIP_II),
            killip_iii: src.codes("killip_iii", tables::KILLIP_III),
            killip_iv: src.codes("killip_iv", tables::KILLIP_IV),
            lvef: src.codes("lvef", tables::LVEF),
            history_stroke: src.patterns("history_stroke", tables::HISTORY_STROKE_PATTERNS)?,
            in_hospital_pci: src.codes("in_hospital_pci", tables::IN_HOSPITAL_PCI),

            lab_sodium: src.codes("lab_sodium", tables::LAB_SODIUM),
            lab_calcium: src.codes("lab_calcium", tables::LAB_CALCIUM),
            lab_creatinine: src.codes("lab_creatinine", tables::LAB_CREATININE),
            lab_hemoglobin: src.codes("lab_hemoglobin", tables::LAB_HEMOGLOBIN),
            lab_ck_mb: src.codes("lab_ck_mb", tables::LAB_CK_MB),
            lab_ck_total: src.codes("lab_ck_total", tables::LAB_CK_TOTAL),
            lab_bnp: src.codes("lab_bnp", tables::LAB_BNP),
            lab_troponin: src.codes("lab_troponin", tables::LAB_TROPONIN),
        };

        for key in src.unknown_keys() {
            log_warning("Ignoring override for unknown code list", Some(&key));
        }

        Ok(book)
    }

    /// Infarct location for an AMI code
    #[must_use]
    pub fn location_of(&self, code: &str) -> Option<&str> {
        self.ami_location.get(code).map(String::as_str)
    }
}
