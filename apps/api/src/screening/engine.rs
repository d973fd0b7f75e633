//! Screening Engine: the stateless requirement-matching pipeline.
//!
//! Flow: decompose → (encode requirements ∥ tokenize) → encode document →
//!       classify + keyword gap → aggregate → EvaluationReport.
//!
//! The requirement side is prepared once (`PreparedRequirements`) and reused for
//! every document in a batch, so requirement embeddings are never recomputed.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::screening::aggregator::{aggregate, AggregationMode};
use crate::screening::decomposer::{decompose_sections, RequirementSection, RequirementUnit};
use crate::screening::fit_band::FitThresholds;
use crate::screening::gap::analyze;
use crate::screening::keywords::{extract_keywords, KeywordSet};
use crate::screening::oracle::{Embedding, OracleError, SimilarityOracle};
use crate::screening::report::{
    collect_requirement_gaps, EvaluationReport, RequirementOutcome, RequirementResult,
};

pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

// ────────────────────────────────────────────────────────────────────────────
// Settings
// ────────────────────────────────────────────────────────────────────────────

/// What each requirement is compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringGranularity {
    /// The full document text.
    #[default]
    WholeDocument,
    /// Every sentence of the document; the best one wins and is reported as evidence.
    BestSentence,
}

impl fmt::Display for ScoringGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringGranularity::WholeDocument => f.write_str("whole_document"),
            ScoringGranularity::BestSentence => f.write_str("best_sentence"),
        }
    }
}

impl FromStr for ScoringGranularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whole_document" | "document" => Ok(ScoringGranularity::WholeDocument),
            "best_sentence" | "sentence" => Ok(ScoringGranularity::BestSentence),
            other => Err(format!("unknown scoring granularity '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub aggregation: AggregationMode,
    pub granularity: ScoringGranularity,
    pub thresholds: FitThresholds,
    pub oracle_timeout: Duration,
    pub max_concurrency: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            aggregation: AggregationMode::default(),
            granularity: ScoringGranularity::default(),
            thresholds: FitThresholds::default(),
            oracle_timeout: DEFAULT_ORACLE_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prepared requirement side
// ────────────────────────────────────────────────────────────────────────────

/// Requirement units with their embeddings and the combined keyword set.
/// A unit whose encoding failed keeps the error and is reported as failed
/// for every document.
pub struct PreparedRequirements {
    units: Vec<RequirementUnit>,
    embeddings: Vec<Result<Embedding, String>>,
    keywords: KeywordSet,
}

impl PreparedRequirements {
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// One candidate document handed to `evaluate_batch`.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    pub name: Option<String>,
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Engine {
    oracle: Arc<dyn SimilarityOracle>,
    settings: EngineSettings,
}

impl Engine {
    pub fn new(oracle: Arc<dyn SimilarityOracle>, settings: EngineSettings) -> Self {
        Self { oracle, settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn oracle(&self) -> &dyn SimilarityOracle {
        self.oracle.as_ref()
    }

    /// Same oracle, different aggregation mode.
    pub fn with_aggregation(&self, aggregation: AggregationMode) -> Self {
        let mut engine = self.clone();
        engine.settings.aggregation = aggregation;
        engine
    }

    /// Decomposes the sections and encodes each requirement once, concurrently.
    pub async fn prepare(&self, sections: &[RequirementSection]) -> PreparedRequirements {
        let units = decompose_sections(sections);
        let keywords = units
            .iter()
            .flat_map(|u| extract_keywords(&u.text))
            .collect();

        let texts: Vec<String> = units.iter().map(|u| u.text.clone()).collect();
        let embeddings = self
            .encode_each(texts)
            .await
            .into_iter()
            .map(|r| r.map_err(|e| e.to_string()))
            .collect();

        debug!("Prepared {} requirement units", units.len());

        PreparedRequirements {
            units,
            embeddings,
            keywords,
        }
    }

    /// Convenience for a single document: prepare + evaluate.
    pub async fn evaluate_sections(
        &self,
        sections: &[RequirementSection],
        document_name: Option<&str>,
        document_text: &str,
    ) -> EvaluationReport {
        let prepared = self.prepare(sections).await;
        self.evaluate(&prepared, document_name, document_text).await
    }

    /// Scores one document against prepared requirements.
    pub async fn evaluate(
        &self,
        prepared: &PreparedRequirements,
        document_name: Option<&str>,
        document_text: &str,
    ) -> EvaluationReport {
        let keyword_gap = analyze(&prepared.keywords, &extract_keywords(document_text));

        let results = if prepared.is_empty() {
            vec![]
        } else if document_text.trim().is_empty() {
            warn!(
                "Document {:?} has no text; returning an empty evaluation",
                document_name
            );
            vec![]
        } else {
            self.score_units(prepared, document_text).await
        };

        let verdict = aggregate(&results, self.settings.aggregation);
        let requirement_gaps = collect_requirement_gaps(&results);

        info!(
            "Evaluated {:?}: {} requirements ({} failed), overall {:.2} ({:?}, {})",
            document_name,
            results.len(),
            verdict.failed,
            verdict.score,
            verdict.fit,
            verdict.mode
        );

        EvaluationReport {
            report_id: Uuid::new_v4(),
            document_name: document_name.map(String::from),
            evaluated_at: Utc::now(),
            oracle_backend: self.oracle.backend(),
            aggregation_mode: self.settings.aggregation,
            granularity: self.settings.granularity,
            results,
            keyword_gap,
            requirement_gaps,
            verdict,
        }
    }

    /// One report per document, in input order. A failure on one document
    /// never touches the reports of its siblings.
    pub async fn evaluate_batch(
        &self,
        prepared: &PreparedRequirements,
        documents: &[DocumentInput],
    ) -> Vec<EvaluationReport> {
        let mut reports = Vec::with_capacity(documents.len());
        for doc in documents {
            reports.push(self.evaluate(prepared, doc.name.as_deref(), &doc.text).await);
        }
        reports
    }

    async fn score_units(
        &self,
        prepared: &PreparedRequirements,
        document_text: &str,
    ) -> Vec<RequirementResult> {
        let segments = match self.settings.granularity {
            ScoringGranularity::WholeDocument => vec![document_text.to_string()],
            ScoringGranularity::BestSentence => {
                let sentences = split_sentences(document_text);
                if sentences.is_empty() {
                    vec![document_text.to_string()]
                } else {
                    sentences
                }
            }
        };

        let encoded = self.encode_document(&segments).await;

        prepared
            .units
            .iter()
            .zip(&prepared.embeddings)
            .map(|(unit, requirement)| {
                let outcome = match (requirement, &encoded) {
                    (Err(e), _) => RequirementOutcome::Failed { error: e.clone() },
                    (Ok(_), Err(e)) => RequirementOutcome::Failed {
                        error: format!("Document encoding failed: {e}"),
                    },
                    (Ok(req), Ok(doc)) => self.best_match(req, doc, &segments),
                };
                if let RequirementOutcome::Scored { score, band, .. } = &outcome {
                    debug!("Requirement {} '{}': {score:.3} {band}", unit.index, unit.text);
                }
                RequirementResult {
                    index: unit.index,
                    section: unit.section.clone(),
                    requirement: unit.text.clone(),
                    outcome,
                }
            })
            .collect()
    }

    fn best_match(
        &self,
        requirement: &Embedding,
        document: &[Embedding],
        segments: &[String],
    ) -> RequirementOutcome {
        let mut best_score = f32::NEG_INFINITY;
        let mut best_index = 0;
        for (i, segment) in document.iter().enumerate() {
            let score = self.oracle.similarity(requirement, segment);
            if score > best_score {
                best_score = score;
                best_index = i;
            }
        }
        if !best_score.is_finite() {
            best_score = 0.0;
        }

        let evidence = match self.settings.granularity {
            ScoringGranularity::BestSentence => segments.get(best_index).cloned(),
            ScoringGranularity::WholeDocument => None,
        };

        RequirementOutcome::Scored {
            score: best_score,
            band: self.settings.thresholds.classify(best_score),
            evidence,
        }
    }

    async fn encode_document(&self, segments: &[String]) -> Result<Vec<Embedding>, OracleError> {
        let refs: Vec<&str> = segments.iter().map(String::as_str).collect();
        let timeout = self.settings.oracle_timeout;
        match tokio::time::timeout(timeout, self.oracle.encode_batch(&refs)).await {
            Ok(result) => result,
            Err(_) => Err(OracleError::Timeout {
                millis: timeout.as_millis() as u64,
            }),
        }
    }

    /// Encodes each text on its own task with a bounded timeout; results come
    /// back in input order regardless of completion order.
    async fn encode_each(&self, texts: Vec<String>) -> Vec<Result<Embedding, OracleError>> {
        let total = texts.len();
        let semaphore = Arc::new(Semaphore::new(self.settings.max_concurrency.max(1)));
        let timeout = self.settings.oracle_timeout;
        let mut tasks = JoinSet::new();

        for (index, text) in texts.into_iter().enumerate() {
            let oracle = Arc::clone(&self.oracle);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let result = match tokio::time::timeout(timeout, oracle.encode(&text)).await {
                    Ok(result) => result,
                    Err(_) => Err(OracleError::Timeout {
                        millis: timeout.as_millis() as u64,
                    }),
                };
                (index, result)
            });
        }

        let mut collected: Vec<(usize, Result<Embedding, OracleError>)> =
            Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(pair) => collected.push(pair),
                Err(e) => warn!("Requirement encoding task failed: {e}"),
            }
        }
        collected.sort_by_key(|(index, _)| *index);

        // A panicked task leaves a hole; fill it so every unit still gets a result.
        let mut out: Vec<Result<Embedding, OracleError>> = Vec::with_capacity(total);
        let mut iter = collected.into_iter().peekable();
        for index in 0..total {
            match iter.peek() {
                Some((i, _)) if *i == index => {
                    if let Some((_, result)) = iter.next() {
                        out.push(result);
                    }
                }
                _ => out.push(Err(OracleError::Unavailable(
                    "encoding task aborted".to_string(),
                ))),
            }
        }
        out
    }
}

/// Splits a document into trimmed sentences: one per line, further split after
/// `.`, `!`, `?` or `;` when followed by whitespace.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();

    for line in text.lines() {
        let mut start = 0;
        let mut chars = line.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let at_boundary = matches!(c, '.' | '!' | '?' | ';')
                && chars.peek().map_or(true, |(_, next)| next.is_whitespace());
            if at_boundary {
                let end = i + c.len_utf8();
                sentences.push(line[start..end].trim().to_string());
                start = end;
            }
        }
        sentences.push(line[start..].trim().to_string());
    }

    sentences.retain(|s| !s.is_empty());
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::aggregator::OverallFit;
    use crate::screening::decomposer::{CORE_SKILLS, JOB_DESCRIPTION, JOB_DUTIES};
    use crate::screening::fit_band::FitBand;
    use crate::screening::oracle::{LexicalOracle, OracleBackend};
    use crate::screening::test_support::ScriptedOracle;

    const RESUME: &str = "Led a team of 5 engineers; wrote complex SQL queries daily";

    fn engine(oracle: ScriptedOracle, aggregation: AggregationMode) -> (Engine, Arc<ScriptedOracle>) {
        let oracle = Arc::new(oracle);
        let settings = EngineSettings {
            aggregation,
            ..EngineSettings::default()
        };
        (Engine::new(oracle.clone(), settings), oracle)
    }

    fn duties(text: &str) -> Vec<RequirementSection> {
        vec![RequirementSection::per_line(JOB_DUTIES, text)]
    }

    #[tokio::test]
    async fn test_end_to_end_mean_score() {
        let oracle = ScriptedOracle::new()
            .anchor(RESUME)
            .scored("Manage a team", 0.62)
            .scored("SQL experience", 0.71);
        let (engine, _) = engine(oracle, AggregationMode::MeanScore);

        let report = engine
            .evaluate_sections(&duties("Manage a team\nSQL experience"), Some("cv.txt"), RESUME)
            .await;

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].requirement, "Manage a team");
        assert_eq!(report.results[1].requirement, "SQL experience");
        for result in &report.results {
            assert!(result.band().unwrap() >= FitBand::Moderate);
        }
        assert!(report.verdict.fit == OverallFit::ModerateFit || report.verdict.fit == OverallFit::StrongFit);
        assert_eq!(report.aggregation_mode, AggregationMode::MeanScore);
        assert_eq!(report.document_name.as_deref(), Some("cv.txt"));
        assert_eq!(report.oracle_backend, OracleBackend::Semantic);
    }

    #[tokio::test]
    async fn test_end_to_end_keyword_gap() {
        let oracle = ScriptedOracle::new()
            .anchor(RESUME)
            .scored("Manage a team", 0.62)
            .scored("SQL experience", 0.71);
        let (engine, _) = engine(oracle, AggregationMode::MeanScore);

        let report = engine
            .evaluate_sections(&duties("Manage a team\nSQL experience"), None, RESUME)
            .await;

        assert!(report.keyword_gap.matched.contains("team"));
        assert!(report.keyword_gap.matched.contains("sql"));
        assert!(report.keyword_gap.missing.contains("manage"));
        assert!(report.keyword_gap.missing.contains("experience"));
    }

    #[tokio::test]
    async fn test_empty_requirements_give_empty_report() {
        let (engine, _) = engine(ScriptedOracle::new(), AggregationMode::MeanScore);
        let report = engine.evaluate_sections(&duties(""), None, RESUME).await;
        assert!(report.results.is_empty());
        assert_eq!(report.verdict.score, 0.0);
        assert_eq!(report.verdict.fit, OverallFit::Undetermined);
    }

    #[tokio::test]
    async fn test_blank_document_gives_empty_report() {
        let oracle = ScriptedOracle::new().scored("Rust", 0.9);
        let (engine, oracle) = engine(oracle, AggregationMode::BandWeighted);
        let report = engine.evaluate_sections(&duties("Rust"), None, "  \n ").await;
        assert!(report.results.is_empty());
        assert_eq!(report.verdict.fit, OverallFit::Undetermined);
        assert_eq!(report.keyword_gap.missing.len(), 1);
        assert_eq!(oracle.calls("  \n "), 0);
    }

    #[tokio::test]
    async fn test_order_preserved_and_duplicates_kept() {
        let oracle = ScriptedOracle::new()
            .anchor(RESUME)
            .scored("C", 0.1)
            .scored("A", 0.9)
            .scored("B", 0.5);
        let (engine, _) = engine(oracle, AggregationMode::BandWeighted);

        let report = engine.evaluate_sections(&duties("A\nB\n\nC\nA"), None, RESUME).await;

        let names: Vec<&str> = report.results.iter().map(|r| r.requirement.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "A"]);
        let indices: Vec<usize> = report.results.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(report.results[0].band(), Some(FitBand::Excellent));
        assert_eq!(report.results[1].band(), Some(FitBand::Moderate));
        assert_eq!(report.results[2].band(), Some(FitBand::Missing));
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_finishing_requirement_keeps_its_slot() {
        let oracle = ScriptedOracle::new()
            .anchor(RESUME)
            .scored("A", 0.9)
            .scored("B", 0.1)
            .slow("A", Duration::from_millis(500));
        let (engine, _) = engine(oracle, AggregationMode::MeanScore);

        let report = engine.evaluate_sections(&duties("A\nB"), None, RESUME).await;

        let order: Vec<(&str, usize)> = report
            .results
            .iter()
            .map(|r| (r.requirement.as_str(), r.index))
            .collect();
        assert_eq!(order, vec![("A", 0), ("B", 1)]);
        assert_eq!(report.results[0].band(), Some(FitBand::Excellent));
        assert_eq!(report.results[1].band(), Some(FitBand::Missing));
    }

    #[tokio::test]
    async fn test_requirement_failure_is_isolated() {
        let oracle = ScriptedOracle::new()
            .anchor(RESUME)
            .scored("Rust", 0.9)
            .failing("Kafka");
        let (engine, _) = engine(oracle, AggregationMode::MeanScore);

        let report = engine.evaluate_sections(&duties("Rust\nKafka"), None, RESUME).await;

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].band(), Some(FitBand::Excellent));
        assert!(report.results[1].is_failed());
        assert_eq!(report.results[1].score(), None);
        assert_eq!(report.verdict.failed, 1);
        assert_eq!(report.verdict.scored, 1);
        assert!(report.requirement_gaps.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_oracle_times_out_per_requirement() {
        let oracle = ScriptedOracle::new()
            .anchor(RESUME)
            .scored("Rust", 0.9)
            .scored("Kafka", 0.9)
            .slow("Kafka", Duration::from_secs(3600));
        let oracle = Arc::new(oracle);
        let settings = EngineSettings {
            oracle_timeout: Duration::from_millis(50),
            ..EngineSettings::default()
        };
        let engine = Engine::new(oracle, settings);

        let report = engine.evaluate_sections(&duties("Rust\nKafka"), None, RESUME).await;

        assert_eq!(report.results[0].band(), Some(FitBand::Excellent));
        match &report.results[1].outcome {
            RequirementOutcome::Failed { error } => assert!(error.contains("timed out")),
            other => panic!("expected timeout failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_document_failure_marks_all_failed() {
        let oracle = ScriptedOracle::new()
            .scored("Rust", 0.9)
            .scored("SQL", 0.9)
            .failing("broken resume");
        let (engine, _) = engine(oracle, AggregationMode::MeanScore);

        let report = engine
            .evaluate_sections(&duties("Rust\nSQL"), None, "broken resume")
            .await;

        assert_eq!(report.results.len(), 2);
        assert!(report.results.iter().all(|r| r.is_failed()));
        assert_eq!(report.verdict.fit, OverallFit::Undetermined);
    }

    #[tokio::test]
    async fn test_batch_reuses_requirement_embeddings() {
        let oracle = ScriptedOracle::new()
            .anchor("resume one")
            .anchor("resume two")
            .scored("Rust", 0.8)
            .failing("resume three");
        let (engine, oracle) = engine(oracle, AggregationMode::BandWeighted);

        let prepared = engine.prepare(&duties("Rust")).await;
        let documents = vec![
            DocumentInput { name: Some("one".into()), text: "resume one".into() },
            DocumentInput { name: Some("three".into()), text: "resume three".into() },
            DocumentInput { name: Some("two".into()), text: "resume two".into() },
        ];
        let reports = engine.evaluate_batch(&prepared, &documents).await;

        assert_eq!(oracle.calls("Rust"), 1);
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].document_name.as_deref(), Some("one"));
        assert_eq!(reports[0].verdict.fit, OverallFit::StrongFit);
        assert!(reports[1].results[0].is_failed());
        assert_eq!(reports[2].results[0].band(), Some(FitBand::Excellent));
    }

    #[tokio::test]
    async fn test_best_sentence_reports_evidence() {
        let resume = "Wrote SQL daily.\nPlays chess";
        let oracle = ScriptedOracle::new()
            .anchor("Wrote SQL daily.")
            .scored("Plays chess", 0.1)
            .anchor("SQL experience");
        let oracle = Arc::new(oracle);
        let settings = EngineSettings {
            granularity: ScoringGranularity::BestSentence,
            ..EngineSettings::default()
        };
        let engine = Engine::new(oracle, settings);

        let report = engine
            .evaluate_sections(&duties("SQL experience"), None, resume)
            .await;

        match &report.results[0].outcome {
            RequirementOutcome::Scored { band, evidence, .. } => {
                assert_eq!(*band, FitBand::Excellent);
                assert_eq!(evidence.as_deref(), Some("Wrote SQL daily."));
            }
            other => panic!("expected a score, got {other:?}"),
        }
        assert_eq!(report.granularity, ScoringGranularity::BestSentence);
    }

    #[tokio::test]
    async fn test_whole_description_mode() {
        let description = "Senior data engineer.\nOwns SQL pipelines.";
        let oracle = ScriptedOracle::new().anchor(RESUME).scored(description, 0.6);
        let (engine, _) = engine(oracle, AggregationMode::MeanScore);
        let sections = vec![RequirementSection::whole(JOB_DESCRIPTION, description)];

        let report = engine.evaluate_sections(&sections, None, RESUME).await;

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].section, JOB_DESCRIPTION);
        assert_eq!(report.results[0].band(), Some(FitBand::Strong));
    }

    #[tokio::test]
    async fn test_requirement_gaps_listed_across_sections() {
        let oracle = ScriptedOracle::new()
            .anchor(RESUME)
            .scored("Lead standups", 0.3)
            .scored("Rust", 0.05)
            .scored("SQL", 0.8);
        let (engine, _) = engine(oracle, AggregationMode::BandWeighted);
        let sections = vec![
            RequirementSection::per_line(JOB_DUTIES, "Lead standups"),
            RequirementSection::per_line(CORE_SKILLS, "Rust\nSQL"),
        ];

        let report = engine.evaluate_sections(&sections, None, RESUME).await;

        assert_eq!(report.requirement_gaps.len(), 2);
        assert_eq!(report.requirement_gaps[0].band, FitBand::Weak);
        assert_eq!(report.requirement_gaps[1].section, CORE_SKILLS);
        assert_eq!(report.requirement_gaps[1].band, FitBand::Missing);
    }

    #[tokio::test]
    async fn test_lexical_engine_is_deterministic() {
        let engine = Engine::new(Arc::new(LexicalOracle), EngineSettings::default());
        let sections = duties("Manage a team\nSQL experience");
        let first = engine.evaluate_sections(&sections, None, RESUME).await;
        let second = engine.evaluate_sections(&sections, None, RESUME).await;
        let bands = |r: &EvaluationReport| r.results.iter().map(|x| x.band()).collect::<Vec<_>>();
        assert_eq!(bands(&first), bands(&second));
        assert_eq!(first.oracle_backend, OracleBackend::Lexical);
    }

    #[test]
    fn test_with_aggregation_overrides_mode_only() {
        let engine = Engine::new(Arc::new(LexicalOracle), EngineSettings::default());
        let mean = engine.with_aggregation(AggregationMode::MeanScore);
        assert_eq!(mean.settings().aggregation, AggregationMode::MeanScore);
        assert_eq!(engine.settings().aggregation, AggregationMode::BandWeighted);
        assert_eq!(mean.settings().thresholds, FitThresholds::default());
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("Built APIs in Node.js. Led a team!\n\nWrote SQL; tuned indexes");
        assert_eq!(
            sentences,
            vec!["Built APIs in Node.js.", "Led a team!", "Wrote SQL;", "tuned indexes"]
        );
    }

    #[test]
    fn test_split_sentences_blank() {
        assert!(split_sentences(" \n\n ").is_empty());
    }

    #[test]
    fn test_granularity_parse() {
        assert_eq!(
            "best_sentence".parse::<ScoringGranularity>().unwrap(),
            ScoringGranularity::BestSentence
        );
        assert_eq!(ScoringGranularity::WholeDocument.to_string(), "whole_document");
        assert!("paragraph".parse::<ScoringGranularity>().is_err());
    }
}
