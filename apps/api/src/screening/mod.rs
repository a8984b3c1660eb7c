// Screening engine: skill extraction, coverage scoring, classification, summary.
// Everything except `analyzer` and `handlers` is pure and synchronous.
// Provider calls go through crate::provider — never directly from here.

pub mod analyzer;
pub mod classifier;
pub mod coverage;
pub mod engine;
pub mod handlers;
pub mod summary;
pub mod vocabulary;
