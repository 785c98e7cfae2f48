use axum::extract::Multipart;

use papergist_core::SummaryMode;

/// The type of uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
}

/// An uploaded file with its data and metadata.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
    pub file_type: FileType,
}

/// Parsed form fields from the multipart upload.
pub struct FormFields {
    pub file: UploadedFile,
    /// Optional per-request override of the configured summary mode.
    pub mode: Option<SummaryMode>,
}

/// Parse a multipart form upload into structured form fields.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<FormFields, String> {
    let mut file: Option<UploadedFile> = None;
    let mut mode: Option<SummaryMode> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read form field: {}", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read file data: {}", e))?
                    .to_vec();

                let file_type = detect_file_type(&filename, &data)?;

                file = Some(UploadedFile {
                    filename,
                    data,
                    file_type,
                });
            }
            "mode" => {
                let val = field
                    .text()
                    .await
                    .map_err(|e| format!("Failed to read mode: {}", e))?;
                if !val.is_empty() {
                    mode = Some(SummaryMode::parse(&val).map_err(|e| e.to_string())?);
                }
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    let file = file.ok_or("No file uploaded")?;

    Ok(FormFields { file, mode })
}

/// Detect file type from extension and magic bytes.
fn detect_file_type(filename: &str, data: &[u8]) -> Result<FileType, String> {
    let lower = filename.to_lowercase();

    if lower.ends_with(".pdf") {
        // Verify PDF magic bytes
        if !data.starts_with(b"%PDF-") {
            return Err("File has .pdf extension but doesn't appear to be a valid PDF".to_string());
        }
        return Ok(FileType::Pdf);
    }
    if lower.ends_with(".txt") || lower.ends_with(".md") {
        return Ok(FileType::Text);
    }

    // Try detecting by content
    if data.starts_with(b"%PDF-") {
        return Ok(FileType::Pdf);
    }
    if std::str::from_utf8(data).is_ok() {
        return Ok(FileType::Text);
    }

    Err("Unsupported file type. Please upload a PDF or a plain-text file.".to_string())
}
