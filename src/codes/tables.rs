//! Built-in code lists, patterns and item names.
//!
//! ICD-9-CM, ICD-10-CM and CPT codes are matched exactly unless a table is a
//! pattern table, in which case each entry is a regular expression anchored at
//! the start of the code. Any list can be replaced at run time through a code
//! override file keyed by the list name used in [`crate::codes::CodeBook`].

/// Acute myocardial infarction diagnoses that qualify an index admission
pub const AMI: &[&str] = &[
    "410.00", "410.01", "410.10", "410.11", "410.20", "410.21", "410.30", "410.31", "410.40",
    "410.41", "410.50", "410.51", "410.60", "410.61", "410.70", "410.71", "410.80", "410.81",
    "410.90", "410.91", "I21.09", "I21.11", "I21.19", "I21.29", "I21.3", "I21.4",
];

/// Infarct location by AMI code
pub const AMI_LOCATION: &[(&str, &str)] = &[
    ("410.00", "Anterolateral wall"),
    ("410.01", "Anterolateral wall"),
    ("410.10", "Other anterior wall"),
    ("I21.09", "Other anterior wall"),
    ("410.11", "Anterior wall"),
    ("I21.0", "Anterior wall"),
    ("I21.02", "Anterior wall"),
    ("410.20", "Inferolateral wall"),
    ("410.21", "Inferolateral wall"),
    ("410.30", "Inferoposterior wall"),
    ("410.31", "Inferoposterior wall"),
    ("I21.11", "Inferoposterior wall"),
    ("410.40", "Other inferior wall"),
    ("410.41", "Other inferior wall"),
    ("I21.19", "Other inferior wall"),
    ("410.50", "Other lateral wall"),
    ("410.51", "Other lateral wall"),
    ("410.60", "True posterior wall infarction initial episode of care"),
    ("410.61", "True posterior wall infarction initial episode of care"),
    ("410.70", "Subendocardial infarction"),
    ("410.71", "Subendocardial infarction"),
    ("I21.4", "Subendocardial infarction"),
    ("410.80", "Other specified sites"),
    ("410.81", "Other specified sites"),
    ("I21.29", "Other specified sites"),
    ("I21.2", "Other specified sites"),
    ("410.90", "Unspecified site"),
    ("410.91", "Unspecified site"),
    ("I21.3", "Unspecified site"),
];

pub const CHEST_PAIN: &[&str] = &["786.5", "R07.9"];
pub const CARDIAC_ARREST: &[&str] = &["427.5", "I46.9"];

pub const CLOPIDOGREL_NAMES: &[&str] = &[
    "Plavix",
    "PLAVIX 75 MG PO TABLET",
    "PLAVIX PO",
    "Plavix 300 mg TAB UD [CLOP300TU]",
    "CLOPIDOGREL BISULFATE 75 MG PO TABLET",
    "CLOPIDOGREL BISULFATE 37.5 MG PO HALF TAB (INPATIENT USE ONLY)",
    "CLOPIDOGREL BISULFATE 300 MG PO TABLET",
    "CLOPIDOGREL BISULFATE PO",
    "clopidogrel",
];

pub const PRIOR_SEPSIS: &[&str] = &["995.91", "A41.9"];
pub const PRIOR_HYPERKALEMIA: &[&str] = &["276.7", "E87.5"];
pub const PRIOR_HYPOKALEMIA: &[&str] = &["276.8", "E87.6"];
pub const PRIOR_HYPERVOLEMIA: &[&str] = &["276.61", "E87.71"];
pub const PRIOR_AKF: &[&str] = &["584", "N17", "N17.0", "N17.1", "N17.2", "N17.8", "N17.9"];
pub const PRIOR_UTI: &[&str] = &["599", "N39.0"];
pub const PRIOR_LONGTERM_ANTICOAGULANTS: &[&str] = &["V58.61", "Z79.01"];
pub const PRIOR_DIS_MAGN_METAB: &[&str] = &["275.2", "E83.40", "E83.41", "E83.42", "E83.49"];
pub const PRIOR_LVEF: &[&str] = &["428.1", "I50.1"];
pub const PRIOR_CARDIAC_DEVICE: &[&str] = &["V45.00", "Z95.9"];

pub const REVASCULARIZATION: &[&str] = &["36.19", "36.31", "92937", "92941", "92943", "92944"];
pub const ONE_VESSEL: &[&str] = &["92937", "92941", "92943"];
pub const ADDITIONAL_VESSEL: &[&str] = &["92944"];

pub const CHEST_PAIN_NAMES: &[&str] = &[
    "CHEST PAIN ON BREATHING",
    "CHEST PAIN UNSPECIFIED",
    "OTHER CHEST PAIN",
];
pub const FAMILY_DEPRESSION: &[&str] = &["Z81.8", "V17.0"];
pub const HISTORY_AMI: &[&str] = &[
    "410.00", "410.01", "410.10", "I21.09", "410.11", "I21.0", "I21.02", "410.20", "410.21",
    "410.30", "410.31", "I21.11", "410.40", "410.41", "I21.19", "410.50", "410.51", "410.60",
    "410.61", "410.70", "410.71", "I21.4", "410.80", "410.81", "I21.29", "I21.2", "410.90",
    "410.91", "I21.3",
];
pub const CABG: &[&str] = &["36.1", "I25.810"];
pub const PCI: &[&str] = &["V45.82", "Z95.5"];
pub const PVD: &[&str] = &["443.9", "I73.9"];
pub const ANGINA: &[&str] = &["I20.9", "413.9"];
pub const UNSTABLE_ANGINA: &[&str] = &["411.1", "I20.0"];
pub const DEPRESSION: &[&str] = &[
    "296.2", "296.22", "296.23", "296.3", "296.32", "296.33", "300", "300.01", "300.02",
    "300.09", "300.21", "300.22", "300.23", "300.29", "300.3", "300.4", "300.6", "300.7",
    "300.81", "300.82", "300.89", "300.9", "308", "308.1", "308.2", "308.3", "308.4", "308.9",
    "309", "309.1", "309.24", "309.28", "309.29", "309.3", "309.4", "309.81", "309.82",
    "309.83", "309.89", "309.9", "311",
];
pub const HYPERTENSION: &[&str] = &[
    "I10", "I11.0", "I11.9", "I12.0", "I12.9", "I13.0", "I13.10", "I13.11", "I13.2", "I15.0",
    "I15.1", "I15.2", "I15.8", "I15.9", "I16.0", "I16.1", "401.9", "402", "402.11", "402.9",
    "402.91", "403", "403.01", "403.1", "403.11", "403.9", "403.91", "404.1", "404.11",
    "404.12", "404.9", "404.91", "404.92", "404.93", "405.91", "405.99",
];

pub const ECHOCARDIOGRAPHY_NAMES: &[&str] = &[
    "INTRACARDIAC ECHOCARDIOGRAPHY",
    "Catheter, intracardiac echocardiography",
];
pub const IN_HOSPITAL_HF: &[&str] = &[
    "I50.1", "I50.20", "I50.21", "I50.22", "I50.23", "I50.30", "I50.31", "I50.32", "I50.33",
    "I50.40", "I50.41", "I50.42", "I50.43", "I50.810", "I50.811", "I50.813", "I50.814",
    "I50.82", "I50.84", "I50.89", "I50.9", "428", "428.1", "428.2", "428.21", "428.22",
    "428.23", "428.3", "428.31", "428.32", "428.33", "428.4", "428.41", "428.42", "428.43",
    "428.9",
];
pub const IN_HOSPITAL_ISCHEMIA: &[&str] = &[
    "435.9", "I63.00", "I63.012", "I63.02", "I63.112", "I63.113", "I63.12", "I63.131",
    "I63.132", "I63.133", "I63.19", "I63.211", "I63.219", "I63.22", "I63.232", "I63.233",
    "I63.30", "I63.311", "I63.312", "I63.313", "I63.319", "I63.323", "I63.331", "I63.332",
    "I63.39", "I63.40", "I63.411", "I63.412", "I63.413", "I63.419", "I63.421", "I63.422",
    "I63.431", "I63.432", "I63.441", "I63.442", "I63.449", "I63.49", "I63.50", "I63.511",
    "I63.512", "I63.513", "I63.519", "I63.521", "I63.522", "I63.529", "I63.531", "I63.532",
    "I63.533", "I63.539", "I63.541", "I63.542", "I63.543", "I63.8", "I63.81", "I63.89",
    "I63.9",
];
pub const CARDIAC_PROCEDURE_PATTERNS: &[&str] = &[
    r"35\..*", r"36\..*", r"37\..*", r"38\..*", r"39\..*", "33016", "33017", "33018", "33019",
    r"3302[^\.]*", r"3303[^\.]*", r"3304[^\.]*", r"3305[^\.]*", r"3306[^\.]*", r"3307[^\.]*",
    r"3308[^\.]*", r"3309[^\.]*", r"331[^\.]*", r"332[^\.]*", r"333[^\.]*", r"334[^\.]*",
    r"335[^\.]*", r"336[^\.]*", r"337[^\.]*", r"338[^\.]*", r"339[^\.]*", "021.*", "024.*",
    "025.*", "027.*", "028.*", "02B.*", "02C.*", "02F.*", "02H.*", "02J.*", "02K.*", "02L.*",
    "02N.*", "02P.*", "02Q.*", "02R.*", "02S.*", "02T.*", "02U.*", "02V.*", "02W.*", "02Y.*",
];

pub const ARRHYTHMIA_PATTERNS: &[&str] = &[r"I49\..*", r"427\..*"];
pub const ANEMIA_PATTERNS: &[&str] = &[
    r"280\..*", r"281\..*", r"282\..*", r"283\..*", r"284\..*", r"285\..*", r"286\..*",
    r"287\..*", r"288\..*", r"289\..*", r"D5.\..*", r"D6.\..*", r"D7.\..*", r"D8.\..*",
];
pub const HYPERTENSION_PATTERNS: &[&str] = &[
    r"I10\..*", r"I11\..*", r"I12\..*", r"I13\..*", r"I14\..*", r"I15\..*", r"I16\..*",
    r"401\..*", r"402\..*", r"403\..*", r"404\..*", r"405\..*",
];
pub const COPD_PATTERNS: &[&str] = &[
    r"J44\..*", r"490\..*", r"491\..*", r"492\..*", r"493\..*", r"494\..*", r"495\..*",
    r"496\..*",
];
pub const CKD_PATTERNS: &[&str] = &[r"585\..*", r"N18\..*"];
pub const STROKE_PATTERNS: &[&str] = &[
    r"430\..*", r"431\..*", r"432\..*", r"433\..*", r"434\..*", r"435\..*", r"436\..*",
    r"437\..*", r"438\..*", r"I6.\..*",
];
pub const TOBACCO_USE: &[&str] = &["Z72.0", "305.1"];
pub const HYPERCHOLESTEROLEMIA_PATTERNS: &[&str] = &[r"272\..*", r"E78\..*"];
pub const CAD_PATTERNS: &[&str] = &[
    r"410\..*", r"411\..*", r"412\..*", r"413\..*", r"414\..*", r"I20\..*", r"I21\..*",
    r"I22\..*", r"I23\..*", r"I24\..*", r"I25\..*",
];
pub const PRIOR_REVASCULARIZATION_PATTERNS: &[&str] = &[r"36\.1.*", r"36\.2.*", r"36\.3.*"];
pub const DIABETES_PATTERNS: &[&str] = &[
    r"250\..*", r"E08\..*", r"E09\..*", r"E10\..*", r"E11\..*", r"E12\..*", r"E13\..*",
];
pub const CHF: &[&str] = &[
    "I50.20", "I50.21", "I50.22", "I50.23", "428", "428.1", "428.2", "428.21", "428.22",
    "428.23", "428.3", "428.31", "428.32", "428.33", "428.4", "428.41", "428.42", "428.43",
    "428.9",
];
pub const DEMENTIA_PATTERNS: &[&str] = &[r"294\.1.*", r"294\.2.*", r"F02\..*", r"F03\..*"];
pub const RHEUMATOLOGIC_PATTERNS: &[&str] = &[r"M06\..*", r"714\..*"];
pub const PEPTIC_ULCER_PATTERNS: &[&str] = &[r"531\..*", r"533\..*", r"K27\..*"];
pub const LIVER_PATTERNS: &[&str] = &[
    r"570\..*", r"571\..*", r"572\..*", r"573\..*", r"K70\..*", r"K71\..*", r"K72\..*",
    r"K73\..*", r"K74\..*", r"K75\..*", r"K76\..*", r"K77\..*",
];
pub const HEMIPLEGIA_PATTERNS: &[&str] = &[r"G81\..*", r"G82\..*", r"344\.1", r"342\..*"];
pub const RENAL_PATTERNS: &[&str] = &[
    r"58.\..*", r"N00\..*", r"N01\..*", r"N02\..*", r"N03\..*", r"N04\..*", r"N05\..*",
    r"N06\..*", r"N07\..*", r"N08\..*", r"N09\..*", r"N10\..*", r"N11\..*", r"N12\..*",
    r"N13\..*", r"N14\..*", r"N15\..*", r"N16\..*", "N17.*", "N19.*",
];
pub const AIDS_PATTERNS: &[&str] = &[r"042\..*", r"B20\..*"];

pub const DISCH_MED_BB_NAMES: &[&str] = &["Metoprolol", "Carvedilol", "Bisoprolol", "atenolol"];
pub const DISCH_MED_ANTIDEP_NAMES: &[&str] = &[
    "zimeldine", "citalopram", "paroxetine", "sertraline", "fluoxetine", "alaproclate",
    "escitalopram", "fluvoxamine", "etoperidone", "quinupramine", "clomipramine", "opipramol",
    "desipramine", "lofepramine", "iprindole", "dimetacrine", "imipramine", "melitracen",
    "amitriptyline", "doxepin", "maprotiline", "dosulepin", "dibenzepin", "amoxapine",
    "trimipramine", "protriptyline", "butriptyline", "amineptine", "nortriptyline",
    "toloxatone", "moclobemide", "oxaflozane", "duloxetine", "minaprine", "oxitriptan",
    "gepirone", "desvenlafaxine", "mianserin", "pivagabine", "Hyperici", "viloxazine",
    "milnacipran", "trazodone", "agomelatine", "mirtazapine", "tianeptine", "nefazodone",
    "venlafaxine", "nomifensine", "tryptophan", "reboxetine", "vilazodone", "bupropion",
    "bifemelane", "medifoxamine", "vortioxetine", "iproclozide", "tranylcypromine",
    "nialamide", "iproniazide", "isocarboxazid", "phenelzine",
];
pub const DISCH_MED_ACE_ARB_NAMES: &[&str] = &[
    "enalapril", "delapril", "cilazapril", "perindopril", "ramipril", "imidapril", "quinapril",
    "moexipril", "lisinopril", "spirapril", "trandolapril", "fosinopril", "temocapril",
    "benazepril", "captopril", "zofenopril", "Eplerenone", "spironolactone",
];
pub const DISCH_MED_ASPIRIN_NAMES: &[&str] = &["aspirin"];

pub const STEMI: &[&str] = &["I21.3"];
/// ICD-9 STEMI family prefix; every `410*` code other than the NSTEMI code
pub const STEMI_ICD9_PREFIX: &str = "410";
pub const NSTEMI: &[&str] = &["410.71", "I21.4"];
pub const REHAB: &[&str] = &["V57.89", "V57.3"];

pub const KILLIP_II: &[&str] = &["786.7", "R09.89"];
pub const KILLIP_III: &[&str] = &["518.4", "J81.0", "J81.1"];
pub const KILLIP_IV: &[&str] = &["785.51", "R57.0"];
pub const LVEF: &[&str] = &["I50.1", "428.1"];
pub const HISTORY_STROKE_PATTERNS: &[&str] = &[
    r"430\..*", r"431\..*", r"432\..*", r"433\..*", r"434\..*", r"435\..*", r"436\..*",
    r"437\..*", r"438\..*", r"I60\..*", r"I61\..*", r"I62\..*", r"I63\..*", r"I64\..*",
    r"I65\..*", r"I66\..*", r"I67\..*", r"I68\..*", r"I69\..*",
];
pub const IN_HOSPITAL_PCI: &[&str] = &["V45.82", "Z98.61"];

/// Half-open lexicographic code ranges treated as oncology service
pub const ONCOLOGY_RANGES: &[(&str, &str)] = &[
    ("140", "240"),
    ("C00", "C97"),
    ("D00", "D50"),
    ("C7A", "C7C"),
    ("D3A", "D3B"),
];

pub const LAB_SODIUM: &[&str] = &["Sodium, Serum or Plasma"];
pub const LAB_CALCIUM: &[&str] = &["CALCIUM"];
pub const LAB_CREATININE: &[&str] = &["CREATININE"];
pub const LAB_HEMOGLOBIN: &[&str] = &["Hemoglobin"];
pub const LAB_CK_MB: &[&str] = &["Creatine Kinase, Isoenzyme MB"];
pub const LAB_CK_TOTAL: &[&str] = &["Creatine Kinase, Total, Ser/Pla"];
pub const LAB_BNP: &[&str] = &["proBrain Natriuretic Peptide, NT", "PROBRAIN NATRIURETIC PEPTIDE_NT"];
pub const LAB_TROPONIN: &[&str] = &["Troponin I", "Troponin-I"];

/// Visit class of emergency department encounters
pub const EMERGENCY_CLASS: &str = "EMERGENCY";
/// Visit class of inpatient encounters
pub const INPATIENT_CLASS: &str = "INPATIENT";
/// Code version marking ICD-9-CM coded diagnoses
pub const ICD9_VERSION: &str = "ICD9CM";
