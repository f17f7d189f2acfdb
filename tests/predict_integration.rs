//! Integration tests for the public prediction API

mod common;

use std::sync::Arc;

use healthcost::{
    calculate_normalized_risk, encode, AgeBracket, ArtifactStore, Feature, HealthcostError,
    Predictor, RawInput, FEATURE_COUNT,
};

fn sample() -> RawInput {
    serde_json::from_str(common::SAMPLE_APPLICANT).unwrap()
}

fn predictor() -> (tempfile::TempDir, Predictor) {
    let dir = common::artifact_dir();
    let store = ArtifactStore::load(dir.path()).unwrap();
    (dir, Predictor::new(Arc::new(store)))
}

#[test]
fn test_documented_applicant() {
    let (_dir, predictor) = predictor();

    let prediction = predictor.predict_detailed(&sample()).unwrap();
    assert_eq!(prediction.bracket, AgeBracket::Young);
    assert_eq!(prediction.cost, 7600);
    assert_eq!(predictor.predict(&sample()).unwrap(), 7600);
}

#[test]
fn test_boundary_at_twenty_five() {
    let (_dir, predictor) = predictor();

    let young = sample().with("Age", 25);
    let rest = sample().with("Age", 26);

    assert_eq!(
        predictor.predict_detailed(&young).unwrap().bracket,
        AgeBracket::Young
    );
    assert_eq!(
        predictor.predict_detailed(&rest).unwrap().bracket,
        AgeBracket::Rest
    );
}

#[test]
fn test_unknown_region_does_not_fail() {
    let (_dir, predictor) = predictor();
    let raw = sample().with("Region", "Atlantis");

    let row = encode(&raw).unwrap();
    assert_eq!(row.get(Feature::RegionNorthwest), 0.0);
    assert_eq!(row.get(Feature::RegionSoutheast), 0.0);
    assert_eq!(row.get(Feature::RegionSouthwest), 0.0);
    assert!(predictor.predict(&raw).is_ok());
}

#[test]
fn test_scaled_row_keeps_all_columns() {
    let (_dir, predictor) = predictor();
    let features = predictor.predict_detailed(&sample()).unwrap().features;

    assert_eq!(features.len(), FEATURE_COUNT);
    let order: Vec<Feature> = features.iter().map(|(f, _)| f).collect();
    assert_eq!(order, Feature::ALL.to_vec());
}

#[test]
fn test_missing_keys_are_reported() {
    let (_dir, predictor) = predictor();

    let err = predictor
        .predict(&RawInput::new().with("Medical History", "none"))
        .unwrap_err();
    assert!(matches!(err, HealthcostError::MissingKey(ref k) if k == "Age"));

    let err = predictor
        .predict(&RawInput::new().with("Age", 40))
        .unwrap_err();
    assert!(matches!(err, HealthcostError::MissingKey(ref k) if k == "Medical History"));
}

#[test]
fn test_medical_history_reported_before_age() {
    let (_dir, predictor) = predictor();

    let err = predictor
        .predict(&RawInput::new().with("Gender", "Female"))
        .unwrap_err();
    assert!(matches!(err, HealthcostError::MissingKey(ref k) if k == "Medical History"));
}

#[test]
fn test_non_finite_age_text_is_rejected() {
    let (_dir, predictor) = predictor();

    for text in ["NaN", "inf", "-inf"] {
        let err = predictor.predict(&sample().with("Age", text)).unwrap_err();
        assert!(
            matches!(err, HealthcostError::InvalidAttribute { ref key, .. } if key == "Age"),
            "{text}"
        );
        assert_eq!(err.exit_code(), 2);
    }
}

#[test]
fn test_risk_score_examples() {
    assert_eq!(calculate_normalized_risk("none"), 0.0);
    assert_eq!(calculate_normalized_risk("heart disease & diabetes"), 1.0);
}

#[test]
fn test_shared_predictor_across_threads() {
    let (_dir, predictor) = predictor();

    let handles: Vec<_> = [22, 30, 45, 60]
        .into_iter()
        .map(|age| {
            let predictor = predictor.clone();
            std::thread::spawn(move || {
                let raw = sample().with("Age", age);
                (age, predictor.predict(&raw).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (age, cost) = handle.join().unwrap();
        let expected = predictor.predict(&sample().with("Age", age)).unwrap();
        assert_eq!(cost, expected, "age {age}");
    }
}
