//! Document text extraction: uploaded resume bytes → plain text.
//!
//! PDF goes through `pdf-extract`, DOCX through `zip` + `quick-xml` (the
//! `w:t` runs of `word/document.xml`), anything else is decoded as UTF-8.
//!
//! This is a collaborator of the screening engine, never called by it.
//! An empty or unreadable document is an error here so it cannot be scored
//! as if the candidate matched nothing.

use std::io::{Cursor, Read};

use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub const PDF: &str = "application/pdf";
pub const PLAIN_TEXT: &str = "text/plain";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MS_WORD: &str = "application/msword";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    PlainText,
    Word,
    Unknown,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported document type '{0}'")]
    Unsupported(String),

    #[error("Corrupt document: {0}")]
    Corrupt(String),

    #[error("Text file is not valid UTF-8")]
    InvalidUtf8,

    #[error("No text could be extracted")]
    Empty,
}

/// Resolves the document kind from the declared content type, falling back
/// to the file extension when the type is missing or generic.
pub fn detect_kind(content_type: Option<&str>, file_name: Option<&str>) -> DocumentKind {
    let mime = content_type
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
        .unwrap_or_default();

    match mime.as_str() {
        PDF => return DocumentKind::Pdf,
        PLAIN_TEXT => return DocumentKind::PlainText,
        DOCX | MS_WORD => return DocumentKind::Word,
        _ => {}
    }

    let extension = file_name
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => DocumentKind::Pdf,
        Some("txt") => DocumentKind::PlainText,
        Some("docx") | Some("doc") => DocumentKind::Word,
        _ => DocumentKind::Unknown,
    }
}

/// Extracts plain text from an uploaded document.
pub async fn extract_text(
    content_type: Option<&str>,
    file_name: Option<&str>,
    data: Bytes,
) -> Result<String, ExtractionError> {
    let kind = detect_kind(content_type, file_name);
    debug!("Extracting {:?} ({} bytes) as {:?}", file_name, data.len(), kind);

    let text = match kind {
        DocumentKind::Pdf => extract_pdf(data).await?,
        DocumentKind::PlainText => {
            String::from_utf8(data.to_vec()).map_err(|_| ExtractionError::InvalidUtf8)?
        }
        DocumentKind::Word => extract_docx(data).await?,
        // Undeclared types are tried as text; binary content is reported as unsupported.
        DocumentKind::Unknown => String::from_utf8(data.to_vec()).map_err(|_| {
            ExtractionError::Unsupported(
                content_type
                    .or(file_name)
                    .unwrap_or("unknown")
                    .to_string(),
            )
        })?,
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(text)
}

/// pdf-extract can panic on malformed input, so it runs on a blocking task
/// and a panic surfaces as a join error.
async fn extract_pdf(data: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| ExtractionError::Corrupt(e.to_string()))?
        .map_err(|e| ExtractionError::Corrupt(e.to_string()))
}

fn corrupt(e: impl std::fmt::Display) -> ExtractionError {
    ExtractionError::Corrupt(e.to_string())
}

async fn extract_docx(data: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || docx_text(&data))
        .await
        .map_err(|e| ExtractionError::Corrupt(e.to_string()))?
}

/// Joins the text runs of `word/document.xml`, one line per paragraph.
fn docx_text(data: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).map_err(corrupt)?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(corrupt)?
        .read_to_string(&mut xml)
        .map_err(corrupt)?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_run = false;

    loop {
        match reader.read_event().map_err(corrupt)? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" => text.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_run => {
                text.push_str(&e.unescape().map_err(corrupt)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
