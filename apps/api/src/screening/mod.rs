// Requirement-Matching & Recommendation Engine
// Implements: decomposition, keyword extraction, similarity oracles, fit bands,
// keyword gaps, aggregation, and the pipeline that ties them together.
// All embedding calls go through embedding_client: no direct HTTP calls here.

pub mod aggregator;
pub mod decomposer;
pub mod engine;
pub mod fit_band;
pub mod gap;
pub mod handlers;
pub mod keywords;
pub mod oracle;
pub mod report;

#[cfg(test)]
pub mod test_support;
