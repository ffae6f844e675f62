//! Normalizes Trivy vulnerability reports into issues for a static-analysis
//! aggregation pipeline.

pub mod config;
pub mod errors;
pub mod models;
pub mod parsers;
pub mod services;
