use serde::Serialize;

use crate::error::ScoringError;
use crate::features::encode;
use crate::input::RawInput;
use crate::risk::{classify, RiskTier};
use crate::schema::{align, ExpectedSchema};
use crate::scoring::Scorer;

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub score: f64,
    pub score_display: String,
    pub tier: RiskTier,
    pub message: &'static str,
}

/// Read-only pipeline state, built once at startup and shared across requests.
pub struct Predictor {
    schema: ExpectedSchema,
    scorer: Box<dyn Scorer>,
}

impl Predictor {
    pub fn new(schema: ExpectedSchema, scorer: Box<dyn Scorer>) -> Self {
        Self { schema, scorer }
    }

    pub fn schema(&self) -> &ExpectedSchema {
        &self.schema
    }

    pub fn predict(&self, raw: &RawInput) -> Result<Prediction, ScoringError> {
        let features = encode(raw);
        let vector = align(&features, &self.schema);
        let score = self.scorer.score(&vector)?;
        let tier = classify(score);

        tracing::debug!(score, ?tier, "prediction");

        Ok(Prediction {
            score,
            score_display: format!("{score:.3}"),
            tier,
            message: tier.message(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::features::FEATURE_NAMES;
    use crate::input::tests::sample_form;
    use approx::assert_relative_eq;

    /// Returns the aligned `base_risk` column as the score.
    pub(crate) struct EchoBaseRisk(pub usize);

    impl Scorer for EchoBaseRisk {
        fn score(&self, vector: &[f64]) -> Result<f64, ScoringError> {
            Ok(vector[self.0])
        }
    }

    struct Offline;

    impl Scorer for Offline {
        fn score(&self, _: &[f64]) -> Result<f64, ScoringError> {
            Err(ScoringError::Unavailable("model offline".into()))
        }
    }

    pub(crate) fn echo_predictor() -> Predictor {
        let schema =
            ExpectedSchema::from_names(FEATURE_NAMES.iter().rev().map(|s| s.to_string()).collect())
                .unwrap();
        let idx = schema.index_of("base_risk").unwrap();
        Predictor::new(schema, Box::new(EchoBaseRisk(idx)))
    }

    #[test]
    fn end_to_end_classifies_the_score() {
        let raw = sample_form().validate().unwrap();
        let p = echo_predictor().predict(&raw).unwrap();
        assert_relative_eq!(p.score, 0.78, epsilon = 1e-12);
        assert_eq!(p.score_display, "0.780");
        assert_eq!(p.tier, RiskTier::High);
        assert_eq!(p.message, RiskTier::High.message());
    }

    #[test]
    fn scorer_failure_propagates() {
        let schema = ExpectedSchema::from_names(vec!["base_risk".into()]).unwrap();
        let predictor = Predictor::new(schema, Box::new(Offline));
        let raw = sample_form().validate().unwrap();
        assert_eq!(
            predictor.predict(&raw).unwrap_err(),
            ScoringError::Unavailable("model offline".into())
        );
    }
}
