use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigurationError, ScoringError};
use crate::schema::ExpectedSchema;

/// The opaque scoring model: one aligned vector in, one likelihood out.
pub trait Scorer: Send + Sync {
    fn score(&self, vector: &[f64]) -> Result<f64, ScoringError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Link {
    #[default]
    Identity,
    Logistic,
}

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    intercept: f64,
    coefficients: HashMap<String, f64>,
    #[serde(default)]
    link: Link,
}

/// A linear model whose weights are laid out in schema order.
#[derive(Debug, Clone)]
pub struct LinearModel {
    intercept: f64,
    weights: Vec<f64>,
    link: Link,
}

impl LinearModel {
    pub fn load(path: impl AsRef<Path>, schema: &ExpectedSchema) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            what: "model artifact",
            path: shown.clone(),
            source,
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&text).map_err(|source| ConfigurationError::Parse {
                what: "model artifact",
                path: shown,
                source,
            })?;

        Self::bind(artifact.intercept, &artifact.coefficients, artifact.link, schema)
    }

    /// Place named coefficients at their schema positions. Unweighted columns get 0.
    pub fn bind(
        intercept: f64,
        coefficients: &HashMap<String, f64>,
        link: Link,
        schema: &ExpectedSchema,
    ) -> Result<Self, ConfigurationError> {
        let mut weights = vec![0.0; schema.len()];
        for (name, &w) in coefficients {
            let i = schema
                .index_of(name)
                .ok_or_else(|| ConfigurationError::UnknownModelColumn(name.clone()))?;
            weights[i] = w;
        }
        Ok(Self { intercept, weights, link })
    }

    pub fn dimension(&self) -> usize {
        self.weights.len()
    }
}

impl Scorer for LinearModel {
    fn score(&self, vector: &[f64]) -> Result<f64, ScoringError> {
        if vector.len() != self.weights.len() {
            return Err(ScoringError::Dimension {
                expected: self.weights.len(),
                actual: vector.len(),
            });
        }

        let z = self.intercept
            + self
                .weights
                .iter()
                .zip(vector)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let y = match self.link {
            Link::Identity => z,
            Link::Logistic => 1.0 / (1.0 + (-z).exp()),
        };

        if !y.is_finite() {
            return Err(ScoringError::NonFinite(y));
        }
        Ok(y)
    }
}
