//! Tests for the composite score engines

use ami_features::algorithm::scores::{
    GraceBreakdown, GraceInputs, KillipClass, KillipEvidence, LaceBreakdown, LaceInputs,
    killip_class,
};

#[test]
fn test_grace_reference_patient() {
    let inputs = GraceInputs {
        age: Some(65.0),
        heart_rate: 75.0,
        systolic_bp: 110.0,
        creatinine_first: 1.0,
        killip: Some(KillipClass::I),
        cardiac_marker_elevation: false,
        cardiac_arrest: false,
        stemi: false,
    };
    let grace = GraceBreakdown::from_inputs(&inputs);

    let parts = [
        grace.age,
        grace.heart_rate,
        grace.systolic_bp,
        grace.creatinine,
        grace.killip,
        grace.cardiac_marker_elevation,
        grace.cardiac_arrest,
        grace.stemi,
    ];
    assert_eq!(parts, [58, 9, 43, 7, 0, 0, 0, 0]);
    assert_eq!(grace.total(), parts.iter().sum::<i64>());
    assert_eq!(grace.total(), 117);
}

#[test]
fn test_grace_flags_add_fixed_points() {
    let inputs = GraceInputs {
        age: Some(65.0),
        heart_rate: 75.0,
        systolic_bp: 110.0,
        creatinine_first: 1.0,
        killip: Some(KillipClass::III),
        cardiac_marker_elevation: true,
        cardiac_arrest: true,
        stemi: true,
    };
    assert_eq!(GraceBreakdown::from_inputs(&inputs).total(), 117 + 39 + 14 + 39 + 28);
}

#[test]
fn test_lace_length_of_stay_buckets() {
    let expected = [(1, 1), (2, 2), (3, 3), (6, 4), (13, 5), (14, 7)];
    for (los, points) in expected {
        let lace = LaceBreakdown::from_inputs(&LaceInputs {
            length_of_stay: los,
            nonelective_admission: false,
            charlson_score: 0,
            ed_visits_180d: 0,
        });
        assert_eq!(lace.length_of_stay, points, "LOS {los}");
    }
}

#[test]
fn test_killip_later_classes_override() {
    let evidence = KillipEvidence {
        prior_heart_failure: true,
        class_ii_signs: true,
        class_iii_signs: false,
        class_iv_signs: true,
    };
    assert_eq!(killip_class(&evidence), Some(KillipClass::IV));
    assert_eq!(killip_class(&KillipEvidence::default()), None);
}
