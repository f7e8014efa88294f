//! `road_risk` library crate.
//!
//! Turns a road description into the feature vector a pre-trained accident
//! model expects, scores it, and buckets the score into a risk tier. The
//! binary only wires this to HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod input;
pub mod predictor;
pub mod risk;
pub mod schema;
pub mod scoring;
