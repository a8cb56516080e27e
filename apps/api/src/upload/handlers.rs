use std::io::Write;
use std::path::Path;

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::documents::{extract_text, DocumentKind};
use crate::errors::AppError;
use crate::state::AppState;
use crate::upload::filename::secure_filename;

/// Multipart field carrying the résumé file.
pub const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub skills: Vec<String>,
    /// Leading slice of the extracted text, `...`-terminated when cut.
    pub text: String,
}

struct ResumeUpload {
    filename: String,
    data: axum::body::Bytes,
}

/// POST /upload
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    // A request that is not multipart at all carries no file.
    let mut multipart = multipart.map_err(|_| AppError::NoFile)?;

    let upload = read_resume_field(&mut multipart)
        .await?
        .ok_or(AppError::NoFile)?;
    if upload.filename.is_empty() {
        return Err(AppError::EmptyFilename);
    }
    let kind = DocumentKind::from_filename(&upload.filename).ok_or(AppError::FileTypeNotAllowed)?;

    info!(
        filename = %upload.filename,
        kind = ?kind,
        bytes = upload.data.len(),
        "Received résumé upload"
    );

    let extractor = state.skills.clone();
    let upload_dir = state.config.upload_dir.clone();
    let (skills, text) = tokio::task::spawn_blocking(move || -> Result<_, AppError> {
        // Dropping `stored` deletes the file, on success and on every error path.
        let stored = store_upload(&upload_dir, &upload.filename, kind, &upload.data)?;
        let text = extract_text(stored.path())?;
        let skills = extractor.extract_skills(&text);
        Ok((skills, text))
    })
    .await
    .context("extraction task aborted")??;

    info!(skills = skills.len(), chars = text.chars().count(), "Extracted skills");

    Ok(Json(UploadResponse {
        success: true,
        skills,
        text: preview(&text, state.config.preview_chars),
    }))
}

/// Finds the `resume` file part. A `resume` part without a `filename`
/// parameter is a plain form field, not a file, and is skipped.
async fn read_resume_field(multipart: &mut Multipart) -> Result<Option<ResumeUpload>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field.bytes().await?;
        return Ok(Some(ResumeUpload { filename, data }));
    }
    Ok(None)
}

/// Writes the upload into `dir` under a unique name derived from the
/// sanitized client filename, keeping the extension that drives extraction.
fn store_upload(
    dir: &Path,
    filename: &str,
    kind: DocumentKind,
    data: &[u8],
) -> anyhow::Result<NamedTempFile> {
    let stem = secure_filename(filename.rsplit_once('.').map_or(filename, |(stem, _)| stem));
    let prefix = if stem.is_empty() {
        "upload-".to_string()
    } else {
        format!("{stem}-")
    };
    let suffix = format!(".{}", kind.extension());

    let mut file = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(&suffix)
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create upload file in {}", dir.display()))?;
    file.write_all(data).context("Failed to write upload file")?;
    file.flush().context("Failed to write upload file")?;
    Ok(file)
}

/// First `max_chars` characters of `text`, with `...` appended if anything
/// was cut off.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("python", 500), "python");
        assert_eq!(preview("", 500), "");
    }

    #[test]
    fn test_preview_exact_length_not_truncated() {
        let text = "a".repeat(500);
        assert_eq!(preview(&text, 500), text);
    }

    #[test]
    fn test_preview_truncates_by_characters() {
        let text = "é".repeat(501);
        let shown = preview(&text, 500);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 503);
    }

    #[test]
    fn test_store_upload_uses_sanitized_name_and_cleans_up_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let stored = store_upload(dir.path(), "../My CV.final.PDF", DocumentKind::Pdf, b"%PDF").unwrap();

        let name = stored.path().file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.starts_with("My_CV.final-"), "{name}");
        assert!(name.ends_with(".pdf"), "{name}");
        assert_eq!(std::fs::read(stored.path()).unwrap(), b"%PDF");

        drop(stored);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_store_upload_with_unusable_name() {
        let dir = tempfile::tempdir().unwrap();
        let stored = store_upload(dir.path(), "履歴書.txt", DocumentKind::Text, b"x").unwrap();
        let name = stored.path().file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("upload-"));
        assert!(name.ends_with(".txt"));
    }
}
