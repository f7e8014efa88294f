// Checks the schema and model shipped under assets/ load and score sensibly.

use road_risk::features::{encode, FEATURE_NAMES};
use road_risk::input::RawInputForm;
use road_risk::predictor::Predictor;
use road_risk::risk::RiskTier;
use road_risk::schema::ExpectedSchema;
use road_risk::scoring::LinearModel;

fn asset(name: &str) -> String {
    format!("{}/assets/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn predictor() -> Predictor {
    let schema = ExpectedSchema::load(asset("road_columns.json")).expect("schema loads");
    let model = LinearModel::load(asset("road_accident_model.json"), &schema).expect("model loads");
    Predictor::new(schema, Box::new(model))
}

fn form(json: &str) -> RawInputForm {
    serde_json::from_str(json).expect("valid form JSON")
}

#[test]
fn shipped_schema_covers_every_encoded_feature() {
    let schema = ExpectedSchema::load(asset("road_columns.json")).unwrap();
    assert_eq!(schema.len(), FEATURE_NAMES.len());
    for name in FEATURE_NAMES {
        assert!(schema.index_of(name).is_some(), "{name} missing from schema");
    }
}

#[test]
fn dark_wet_fast_curve_is_high_risk() {
    let raw = form(
        r#"{
            "road_type": "Highway", "num_lanes": 2, "curvature": 0.6,
            "speed_limit": 80, "lighting": "Night", "weather": "Rainy",
            "road_sign_present": true, "public_road": true,
            "time_of_day": "Evening", "holiday": false, "school_season": false,
            "num_reported_accidents": 3
        }"#,
    )
    .validate()
    .unwrap();

    let schema = ExpectedSchema::load(asset("road_columns.json")).unwrap();
    let produced: Vec<&str> = encode(&raw).iter().map(|(name, _)| name).collect();
    assert!(schema.missing_features(&produced).is_empty());

    let p = predictor().predict(&raw).unwrap();
    assert_eq!(p.tier, RiskTier::High);
}

#[test]
fn quiet_urban_street_is_low_risk() {
    let raw = form(
        r#"{
            "road_type": "urban", "num_lanes": 2, "curvature": 0.1,
            "speed_limit": 30, "lighting": "daylight", "weather": "clear",
            "road_sign_present": true, "public_road": true,
            "time_of_day": "morning", "holiday": false, "school_season": true,
            "num_reported_accidents": 0
        }"#,
    )
    .validate()
    .unwrap();

    let p = predictor().predict(&raw).unwrap();
    assert_eq!(p.tier, RiskTier::Low);
    assert!(p.score > 0.0 && p.score < 0.4);
}
