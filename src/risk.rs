use serde::Serialize;

// 0.0 = Unlikely, 1.0 = Near certain
const MODERATE_FROM: f64 = 0.4;
const HIGH_FROM: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn message(self) -> &'static str {
        match self {
            RiskTier::Low => "Likelihood is low, but always follow road safety measures.",
            RiskTier::Moderate => "Likelihood is moderate, please be careful on the road.",
            RiskTier::High => "Likelihood is high! Strictly adhere to all road safety measures.",
        }
    }
}

/// Bucket a predicted likelihood. Each tier includes its lower bound.
pub fn classify(score: f64) -> RiskTier {
    if score < MODERATE_FROM {
        RiskTier::Low
    } else if score < HIGH_FROM {
        RiskTier::Moderate
    } else {
        // NaN lands here too.
        RiskTier::High
    }
}
