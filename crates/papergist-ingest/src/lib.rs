use std::path::Path;

use thiserror::Error;

// Re-export the backend seam for callers that bring their own extractor
pub use papergist_core::{ExtractionError, PdfBackend};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[cfg(not(feature = "pdf"))]
    #[error("PDF support not compiled in (enable the `pdf` feature of papergist-ingest)")]
    NoPdfSupport,
}

/// Extract the raw text of a document.
///
/// Dispatches on file extension:
/// - `.txt` / `.md` → read directly from disk
/// - anything else → PDF extraction (requires the `pdf` feature / mupdf)
///
/// Fails with [`ExtractionError::NoText`] when the file yields nothing
/// but whitespace.
pub fn extract_text(path: &Path) -> Result<String, IngestError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match ext.as_str() {
        "txt" | "md" => std::fs::read_to_string(path).map_err(|source| IngestError::Io {
            path: path.display().to_string(),
            source,
        })?,
        _ => extract_pdf(path)?,
    };

    if text.trim().is_empty() {
        tracing::warn!(path = %path.display(), "document yielded no text");
        return Err(ExtractionError::NoText.into());
    }
    Ok(text)
}

#[cfg(feature = "pdf")]
fn extract_pdf(path: &Path) -> Result<String, IngestError> {
    let backend = papergist_pdf_mupdf::MupdfBackend::default();
    Ok(backend.extract_text(path)?)
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(_path: &Path) -> Result<String, IngestError> {
    Err(IngestError::NoPdfSupport)
}
