//! Document text extraction — turns an uploaded résumé file into plain text.
//!
//! Dispatch is by file extension only; content is never sniffed.

pub mod docx;
pub mod pdf;

use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

/// Document formats the service knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "txt" => Some(DocumentKind::Text),
            _ => None,
        }
    }

    /// Kind implied by the text after the last `.` of a filename.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::Text => "txt",
        }
    }
}

/// Extracts the text content of the file at `path`.
///
/// Files with an unrecognized extension yield an empty string. Read or parse
/// failures are returned as errors; no partial text is produced.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let kind = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(DocumentKind::from_extension);

    debug!("Extracting {} as {kind:?}", path.display());

    match kind {
        Some(DocumentKind::Pdf) => pdf::extract_text(path),
        Some(DocumentKind::Docx) => docx::extract_text(path),
        Some(DocumentKind::Text) => read_text(path),
        None => Ok(String::new()),
    }
}

/// Plain text is returned as-is; invalid UTF-8 sequences are replaced rather
/// than rejected.
fn read_text(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_with_suffix(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn test_kind_from_filename_is_case_insensitive() {
        assert_eq!(DocumentKind::from_filename("cv.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("cv.final.Docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_filename("notes.txt"), Some(DocumentKind::Text));
    }

    #[test]
    fn test_kind_from_filename_rejects_unknown_and_missing_extensions() {
        assert_eq!(DocumentKind::from_filename("setup.exe"), None);
        assert_eq!(DocumentKind::from_filename("resume"), None);
        assert_eq!(DocumentKind::from_filename("pdf"), None);
    }

    #[test]
    fn test_plain_text_is_returned_verbatim() {
        let file = temp_with_suffix(".txt", b"Rust\n  and SQL\n");
        assert_eq!(extract_text(file.path()).unwrap(), "Rust\n  and SQL\n");
    }

    #[test]
    fn test_plain_text_with_invalid_utf8_degrades_instead_of_failing() {
        let file = temp_with_suffix(".txt", b"python \xff\xfe docker");
        let text = extract_text(file.path()).unwrap();
        assert!(text.starts_with("python "));
        assert!(text.ends_with(" docker"));
    }

    #[test]
    fn test_unknown_extension_yields_empty_text() {
        let file = temp_with_suffix(".rtf", b"{\\rtf1 python}");
        assert_eq!(extract_text(file.path()).unwrap(), "");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_text(&dir.path().join("gone.txt")).unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }

    #[test]
    fn test_garbage_pdf_is_an_error() {
        let file = temp_with_suffix(".pdf", b"this is not a pdf");
        assert!(matches!(extract_text(file.path()), Err(ExtractError::Pdf(_))));
    }
}
