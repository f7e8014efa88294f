//! The model's input contract and the aligner that maps encoded features onto it.

use std::collections::HashMap;
use std::path::Path;

use itertools::Itertools;

use crate::error::ConfigurationError;
use crate::features::FeatureVector;

/// Ordered feature names the scoring model was trained with.
#[derive(Debug, Clone)]
pub struct ExpectedSchema {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ExpectedSchema {
    pub fn from_names(names: Vec<String>) -> Result<Self, ConfigurationError> {
        if names.is_empty() {
            return Err(ConfigurationError::EmptySchema);
        }
        if let Some(dup) = names.iter().duplicates().next() {
            return Err(ConfigurationError::DuplicateColumn(dup.clone()));
        }

        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Ok(Self { names, index })
    }

    /// Load a JSON array of column names.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            what: "expected schema",
            path: shown.clone(),
            source,
        })?;
        let names: Vec<String> =
            serde_json::from_str(&text).map_err(|source| ConfigurationError::Parse {
                what: "expected schema",
                path: shown,
                source,
            })?;

        Self::from_names(names)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Schema columns absent from `produced`. These are always scored as 0.
    pub fn missing_features<'a>(&'a self, produced: &[&str]) -> Vec<&'a str> {
        self.names
            .iter()
            .filter(|name| !produced.contains(&name.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// Lay the features out in schema order. Absent names become 0.0; extras are dropped.
pub fn align(features: &FeatureVector, schema: &ExpectedSchema) -> Vec<f64> {
    let mut out = vec![0.0; schema.len()];
    for (name, value) in features.iter() {
        if let Some(i) = schema.index_of(name) {
            out[i] = value;
        }
    }
    out
}
