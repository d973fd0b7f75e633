//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::screening::aggregator::AggregationMode;
use crate::screening::decomposer::{
    RequirementSection, CORE_SKILLS, JOB_DESCRIPTION, JOB_DUTIES, SECONDARY_SKILLS,
};
use crate::screening::engine::DocumentInput;
use crate::screening::keywords::extract_keywords;
use crate::screening::report::EvaluationReport;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Requirement text as the screening form supplies it. The named fields map to
/// the standard sections; `sections` carries any additional titled blocks.
#[derive(Debug, Default, Deserialize)]
pub struct RequirementInput {
    pub job_duties: Option<String>,
    pub core_skills: Option<String>,
    pub secondary_skills: Option<String>,
    /// Scored as a single requirement.
    pub job_description: Option<String>,
    #[serde(default)]
    pub sections: Vec<RequirementSection>,
}

impl RequirementInput {
    /// Non-blank sections in screening order.
    pub fn into_sections(self) -> Vec<RequirementSection> {
        let mut sections = Vec::new();
        let named = [
            (JOB_DUTIES, self.job_duties),
            (CORE_SKILLS, self.core_skills),
            (SECONDARY_SKILLS, self.secondary_skills),
        ];
        for (title, text) in named {
            if let Some(text) = text {
                sections.push(RequirementSection::per_line(title, text));
            }
        }
        if let Some(text) = self.job_description {
            sections.push(RequirementSection::whole(JOB_DESCRIPTION, text));
        }
        sections.extend(self.sections);
        sections.retain(|s| !s.is_blank());
        sections
    }
}

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    #[serde(flatten)]
    pub requirements: RequirementInput,
    pub resume_text: String,
    pub document_name: Option<String>,
    pub aggregation: Option<AggregationMode>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchEntry {
    Evaluated {
        file_name: Option<String>,
        report: Box<EvaluationReport>,
    },
    Failed {
        file_name: Option<String>,
        error: String,
    },
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub reports: Vec<BatchEntry>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

struct UploadedFile {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

fn require_sections(requirements: RequirementInput) -> Result<Vec<RequirementSection>, AppError> {
    let sections = requirements.into_sections();
    if sections.is_empty() {
        return Err(AppError::Validation(
            "At least one requirement section must be non-empty".to_string(),
        ));
    }
    Ok(sections)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screen
///
/// Screens pasted resume text against the supplied requirements.
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<EvaluationReport>, AppError> {
    let sections = require_sections(request.requirements)?;

    let engine = match request.aggregation {
        Some(mode) => state.engine.with_aggregation(mode),
        None => state.engine.clone(),
    };

    let report = engine
        .evaluate_sections(
            &sections,
            request.document_name.as_deref(),
            &request.resume_text,
        )
        .await;

    Ok(Json(report))
}

/// POST /api/v1/screen/upload
///
/// Multipart form: requirement text fields (`job_duties`, `core_skills`,
/// `secondary_skills`, `job_description`), optional `aggregation`, and one or
/// more resume files. Requirements are encoded once for the whole batch; each
/// file gets its own report or its own extraction error. A single unreadable
/// file is rejected with 422.
pub async fn handle_screen_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchResponse>, AppError> {
    let mut requirements = RequirementInput::default();
    let mut aggregation: Option<AggregationMode> = None;
    let mut files: Vec<UploadedFile> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if field.file_name().is_some() {
            let file_name = field.file_name().map(String::from);
            let content_type = field.content_type().map(String::from);
            let data = field.bytes().await?;
            files.push(UploadedFile {
                file_name,
                content_type,
                data,
            });
            continue;
        }

        let value = field.text().await?;
        match name.as_str() {
            "job_duties" => requirements.job_duties = Some(value),
            "core_skills" => requirements.core_skills = Some(value),
            "secondary_skills" => requirements.secondary_skills = Some(value),
            "job_description" => requirements.job_description = Some(value),
            "aggregation" => {
                if !value.trim().is_empty() {
                    aggregation = Some(value.parse().map_err(AppError::Validation)?);
                }
            }
            other => warn!("Ignoring unknown form field '{other}'"),
        }
    }

    if files.is_empty() {
        return Err(AppError::Validation(
            "At least one resume file must be uploaded".to_string(),
        ));
    }
    let sections = require_sections(requirements)?;

    let engine = match aggregation {
        Some(mode) => state.engine.with_aggregation(mode),
        None => state.engine.clone(),
    };

    // A lone upload that cannot be read is a request error rather than a batch entry.
    let single = files.len() == 1;

    // Extract every file first; failures keep their slot so output order matches upload order.
    let mut extracted: Vec<Result<DocumentInput, (Option<String>, String)>> =
        Vec::with_capacity(files.len());
    for file in files {
        match extract_text(
            file.content_type.as_deref(),
            file.file_name.as_deref(),
            file.data,
        )
        .await
        {
            Ok(text) => extracted.push(Ok(DocumentInput {
                name: file.file_name,
                text,
            })),
            Err(e) if single => return Err(AppError::Extraction(e)),
            Err(e) => {
                warn!("Extraction failed for {:?}: {e}", file.file_name);
                extracted.push(Err((file.file_name, e.to_string())));
            }
        }
    }

    let documents: Vec<DocumentInput> = extracted
        .iter()
        .filter_map(|r| r.as_ref().ok().cloned())
        .collect();

    // Requirements only reach the oracle once some document has text to score.
    let mut reports = if documents.is_empty() {
        Vec::new().into_iter()
    } else {
        info!("Screening {} uploaded resume(s)", documents.len());
        let prepared = engine.prepare(&sections).await;
        engine.evaluate_batch(&prepared, &documents).await.into_iter()
    };

    let mut entries = Vec::with_capacity(extracted.len());
    for slot in extracted {
        let entry = match slot {
            Ok(doc) => match reports.next() {
                Some(report) => BatchEntry::Evaluated {
                    file_name: doc.name,
                    report: Box::new(report),
                },
                None => BatchEntry::Failed {
                    file_name: doc.name,
                    error: "Document was not evaluated".to_string(),
                },
            },
            Err((file_name, error)) => BatchEntry::Failed { file_name, error },
        };
        entries.push(entry);
    }

    Ok(Json(BatchResponse { reports: entries }))
}

/// POST /api/v1/keywords
///
/// Returns the sorted keyword set the gap analysis would extract from `text`.
pub async fn handle_keywords(Json(request): Json<KeywordsRequest>) -> Json<KeywordsResponse> {
    Json(KeywordsResponse {
        keywords: extract_keywords(&request.text).into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_fields_become_ordered_sections() {
        let input = RequirementInput {
            job_duties: Some("Lead standups".into()),
            core_skills: Some("Rust\nSQL".into()),
            secondary_skills: Some("   ".into()),
            job_description: Some("Full description".into()),
            sections: vec![RequirementSection::per_line("Extras", "Kafka")],
        };
        let sections = input.into_sections();
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec![JOB_DUTIES, CORE_SKILLS, JOB_DESCRIPTION, "Extras"]);
        assert_eq!(
            sections[2].mode,
            crate::screening::decomposer::SectionMode::WholeDescription
        );
    }

    #[test]
    fn test_all_blank_input_is_rejected() {
        let input = RequirementInput {
            job_duties: Some("\n\n".into()),
            ..RequirementInput::default()
        };
        assert!(matches!(
            require_sections(input),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_screen_request_accepts_flat_fields() {
        let request: ScreenRequest = serde_json::from_str(
            r#"{
                "core_skills": "Rust\nSQL",
                "resume_text": "Rust developer",
                "aggregation": "mean_score"
            }"#,
        )
        .unwrap();
        assert_eq!(request.aggregation, Some(AggregationMode::MeanScore));
        assert_eq!(request.requirements.into_sections().len(), 1);
    }

    #[test]
    fn test_batch_entry_tagging() {
        let entry = BatchEntry::Failed {
            file_name: Some("cv.docx".into()),
            error: "Unsupported document type".into(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["file_name"], "cv.docx");
    }
}
