//! Report data model shared by the engine, aggregator and handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::screening::aggregator::{AggregationMode, OverallVerdict};
use crate::screening::engine::ScoringGranularity;
use crate::screening::fit_band::FitBand;
use crate::screening::gap::GapReport;
use crate::screening::oracle::OracleBackend;

/// Outcome of scoring one requirement. A failed call is never coerced to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequirementOutcome {
    Scored {
        score: f32,
        band: FitBand,
        /// Best-matching document fragment, when scoring by sentence.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        evidence: Option<String>,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementResult {
    pub index: usize,
    pub section: String,
    pub requirement: String,
    #[serde(flatten)]
    pub outcome: RequirementOutcome,
}

impl RequirementResult {
    pub fn score(&self) -> Option<f32> {
        match &self.outcome {
            RequirementOutcome::Scored { score, .. } => Some(*score),
            RequirementOutcome::Failed { .. } => None,
        }
    }

    pub fn band(&self) -> Option<FitBand> {
        match &self.outcome {
            RequirementOutcome::Scored { band, .. } => Some(*band),
            RequirementOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, RequirementOutcome::Failed { .. })
    }
}

/// A requirement the candidate covers weakly or not at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementGap {
    pub index: usize,
    pub section: String,
    pub requirement: String,
    pub band: FitBand,
}

/// Full output for one (requirement set, document) pair. Built once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub report_id: Uuid,
    pub document_name: Option<String>,
    pub evaluated_at: DateTime<Utc>,
    pub oracle_backend: OracleBackend,
    pub aggregation_mode: AggregationMode,
    pub granularity: ScoringGranularity,
    pub results: Vec<RequirementResult>,
    pub keyword_gap: GapReport,
    pub requirement_gaps: Vec<RequirementGap>,
    pub verdict: OverallVerdict,
}

/// Weak and Missing scored requirements, in input order.
pub fn collect_requirement_gaps(results: &[RequirementResult]) -> Vec<RequirementGap> {
    results
        .iter()
        .filter_map(|r| {
            let band = r.band()?;
            band.is_gap().then(|| RequirementGap {
                index: r.index,
                section: r.section.clone(),
                requirement: r.requirement.clone(),
                band,
            })
        })
        .collect()
}
