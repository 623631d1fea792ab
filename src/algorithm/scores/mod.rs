//! Composite clinical scores
//!
//! Every score here is a pure function of values already derived for the
//! patient. None of them scan events; the feature groups collect the inputs
//! and write the results.

pub mod aki;
pub mod charlson;
pub mod grace;
pub mod hospital;
pub mod killip;
pub mod lace;

pub use aki::{AkiAssessment, CreatinineReading, assess_aki};
pub use charlson::{CharlsonCondition, charlson_deyo_score};
pub use grace::{GraceBreakdown, GraceInputs};
pub use hospital::{HospitalInputs, hospital_score, is_oncology_code};
pub use killip::{KillipClass, KillipEvidence, killip_class};
pub use lace::{LaceBreakdown, LaceInputs};
