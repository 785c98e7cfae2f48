use std::path::Path;

use mupdf::{Document, TextPageFlags};

use papergist_core::{ExtractionError, PdfBackend};

/// Page regions to skip during extraction, as fractions of page height.
///
/// Running headers and footer page numbers would otherwise land in the
/// middle of the extracted text and survive cleanup (they rarely match any
/// citation pattern).
#[derive(Debug, Clone, Copy)]
pub struct PageMargins {
    /// Fraction of page height from the top to skip (0.0 disables).
    pub header: f32,
    /// Fraction of page height from the bottom to skip (0.0 disables).
    pub footer: f32,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self {
            header: 0.04,
            footer: 0.05,
        }
    }
}

impl PageMargins {
    /// Keep every block on the page.
    pub fn none() -> Self {
        Self {
            header: 0.0,
            footer: 0.0,
        }
    }
}

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency so
/// that the text pipeline and the model backends do not transitively
/// depend on it.
pub struct MupdfBackend {
    margins: PageMargins,
}

impl Default for MupdfBackend {
    fn default() -> Self {
        Self {
            margins: PageMargins::default(),
        }
    }
}

impl MupdfBackend {
    pub fn new(margins: PageMargins) -> Self {
        Self { margins }
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| ExtractionError::Open("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| ExtractionError::Open(e.to_string()))?;

        let mut pages_text = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| ExtractionError::Read(e.to_string()))?
        {
            let page = page_result.map_err(|e| ExtractionError::Read(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| ExtractionError::Read(e.to_string()))?;

            let bounds = page
                .bounds()
                .map_err(|e| ExtractionError::Read(e.to_string()))?;
            let page_height = bounds.y1 - bounds.y0;
            let header_cutoff = bounds.y0 + page_height * self.margins.header;
            let footer_cutoff = bounds.y1 - page_height * self.margins.footer;

            let mut page_text = String::new();
            for block in text_page.blocks() {
                let block_bounds = block.bounds();
                // Skip blocks fully inside the header region or whose top
                // edge starts in the footer region.
                if block_bounds.y1 <= header_cutoff || block_bounds.y0 >= footer_cutoff {
                    continue;
                }

                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
            }
            pages_text.push(page_text);
        }

        let full_text = pages_text.join("\n");
        if full_text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }
        Ok(full_text)
    }
}
