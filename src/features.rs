//! Feature encoding: turns a validated [`RawInput`] into the named numeric
//! features the scoring model was trained on.
//!
//! The encoder is pure and total. Column order is *not* its concern; the
//! schema module reconciles the names produced here with the model's layout.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::input::{Lighting, RawInput, RoadType, TimeOfDay, Weather};

/// Every feature `encode` produces, in emission order.
pub const FEATURE_NAMES: [&str; 27] = [
    "num_lanes",
    "curvature",
    "speed_limit",
    "num_reported_accidents",
    "base_risk",
    "weather_clear",
    "weather_foggy",
    "weather_rainy",
    "road_type_highway",
    "road_type_rural",
    "road_type_urban",
    "time_of_day_afternoon",
    "time_of_day_evening",
    "time_of_day_morning",
    "lighting_encoded",
    "holiday",
    "school_season",
    "road_sign_present",
    "public_road",
    "speed_curvature",
    "lanes_curvature",
    "speed_lighting",
    "curvature_lighting",
    "high_speed_curve",
    "curvature_squared",
    "speed_squared",
    "bad_conditions",
];

const HIGH_SPEED_KMH: u32 = 60;
const SHARP_CURVE: f64 = 0.5;
const ACCIDENT_HISTORY: u32 = 2;

/// Named features derived from one request. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: HashMap<&'static str, f64>,
}

impl FeatureVector {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Features in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES
            .iter()
            .filter_map(move |&name| self.values.get(name).map(|&v| (name, v)))
    }
}

// Serialises as a JSON object keyed in emission order.
impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

fn flag(cond: bool) -> f64 {
    if cond { 1.0 } else { 0.0 }
}

fn one_hot<T: Copy + PartialEq>(
    values: &mut HashMap<&'static str, f64>,
    actual: T,
    columns: &[(&'static str, T)],
) {
    for &(name, category) in columns {
        values.insert(name, flag(actual == category));
    }
}

/// Hand-weighted prior risk, also fed to the model as a feature.
pub fn base_risk(raw: &RawInput) -> f64 {
    0.3 * raw.curvature
        + 0.2 * flag(raw.lighting == Lighting::Night)
        + 0.1 * flag(raw.weather != Weather::Clear)
        + 0.2 * flag(raw.speed_limit >= HIGH_SPEED_KMH)
        + 0.1 * flag(raw.num_reported_accidents > ACCIDENT_HISTORY)
}

pub fn encode(raw: &RawInput) -> FeatureVector {
    let mut values = HashMap::with_capacity(FEATURE_NAMES.len());

    let lanes = f64::from(raw.num_lanes);
    let curvature = raw.curvature;
    let speed = f64::from(raw.speed_limit);

    values.insert("num_lanes", lanes);
    values.insert("curvature", curvature);
    values.insert("speed_limit", speed);
    values.insert("num_reported_accidents", f64::from(raw.num_reported_accidents));
    values.insert("base_risk", base_risk(raw));

    one_hot(
        &mut values,
        raw.weather,
        &[
            ("weather_clear", Weather::Clear),
            ("weather_foggy", Weather::Foggy),
            ("weather_rainy", Weather::Rainy),
        ],
    );
    one_hot(
        &mut values,
        raw.road_type,
        &[
            ("road_type_highway", RoadType::Highway),
            ("road_type_rural", RoadType::Rural),
            ("road_type_urban", RoadType::Urban),
        ],
    );
    one_hot(
        &mut values,
        raw.time_of_day,
        &[
            ("time_of_day_afternoon", TimeOfDay::Afternoon),
            ("time_of_day_evening", TimeOfDay::Evening),
            ("time_of_day_morning", TimeOfDay::Morning),
        ],
    );

    // Dim counts as non-hazardous alongside daylight.
    let lighting = flag(raw.lighting == Lighting::Night);
    values.insert("lighting_encoded", lighting);

    values.insert("holiday", flag(raw.holiday));
    values.insert("school_season", flag(raw.school_season));
    values.insert("road_sign_present", flag(raw.road_sign_present));
    values.insert("public_road", flag(raw.public_road));

    values.insert("speed_curvature", speed * curvature);
    values.insert("lanes_curvature", lanes * curvature);
    values.insert("speed_lighting", speed * lighting);
    values.insert("curvature_lighting", curvature * lighting);
    values.insert(
        "high_speed_curve",
        flag(raw.speed_limit >= HIGH_SPEED_KMH && curvature > SHARP_CURVE),
    );
    values.insert("curvature_squared", curvature * curvature);
    values.insert("speed_squared", speed * speed);

    // Must read the one-hot weather columns and the lighting flag, not the raw strings.
    let wet_or_foggy = values["weather_rainy"] == 1.0 || values["weather_foggy"] == 1.0;
    values.insert("bad_conditions", flag(wet_or_foggy && lighting == 1.0));

    FeatureVector { values }
}
