use serde::Deserialize;
use std::str::FromStr;

use crate::error::InvalidInputError;

// Categorical fields arrive as free text. Matching is done on the trimmed,
// lower-cased value against a fixed domain; `as_str` gives the canonical name.
macro_rules! categorical {
    ($name:ident, $field:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = InvalidInputError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(InvalidInputError::UnknownCategory {
                        field: $field,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

categorical!(RoadType, "road_type", {
    Highway => "highway",
    Rural => "rural",
    Urban => "urban",
});

categorical!(Lighting, "lighting", {
    Daylight => "daylight",
    Dim => "dim",
    Night => "night",
});

categorical!(Weather, "weather", {
    Clear => "clear",
    Rainy => "rainy",
    Foggy => "foggy",
});

categorical!(TimeOfDay, "time_of_day", {
    Morning => "morning",
    Afternoon => "afternoon",
    Evening => "evening",
});

/// One prediction request as it arrives over the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawInputForm {
    pub road_type: String,
    pub num_lanes: i64,
    pub curvature: f64,
    pub speed_limit: i64,
    pub lighting: String,
    pub weather: String,
    pub road_sign_present: bool,
    pub public_road: bool,
    pub time_of_day: String,
    pub holiday: bool,
    pub school_season: bool,
    pub num_reported_accidents: i64,
}

/// A validated request. Every field is inside its domain, so encoding cannot fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawInput {
    pub road_type: RoadType,
    pub num_lanes: u32,
    pub curvature: f64,
    pub speed_limit: u32,
    pub lighting: Lighting,
    pub weather: Weather,
    pub road_sign_present: bool,
    pub public_road: bool,
    pub time_of_day: TimeOfDay,
    pub holiday: bool,
    pub school_season: bool,
    pub num_reported_accidents: u32,
}

fn count(field: &'static str, value: i64) -> Result<u32, InvalidInputError> {
    if value < 0 {
        return Err(InvalidInputError::Negative { field, value });
    }
    u32::try_from(value).map_err(|_| InvalidInputError::TooLarge { field, value })
}

impl RawInputForm {
    pub fn validate(&self) -> Result<RawInput, InvalidInputError> {
        if !self.curvature.is_finite() || !(0.0..=1.0).contains(&self.curvature) {
            return Err(InvalidInputError::CurvatureOutOfRange(self.curvature));
        }

        Ok(RawInput {
            road_type: self.road_type.parse()?,
            num_lanes: count("num_lanes", self.num_lanes)?,
            curvature: self.curvature,
            speed_limit: count("speed_limit", self.speed_limit)?,
            lighting: self.lighting.parse()?,
            weather: self.weather.parse()?,
            road_sign_present: self.road_sign_present,
            public_road: self.public_road,
            time_of_day: self.time_of_day.parse()?,
            holiday: self.holiday,
            school_season: self.school_season,
            num_reported_accidents: count("num_reported_accidents", self.num_reported_accidents)?,
        })
    }
}
