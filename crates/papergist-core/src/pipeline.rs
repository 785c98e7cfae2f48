use std::time::Duration;

use thiserror::Error;

use papergist_text::{SectionKind, chunk_text, clean, extract_sections_with_config, post_process};

use crate::model::{ModelError, SummaryBackend};
use crate::{Config, ConfigError, ProgressEvent, SummaryMode};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no usable text after cleanup")]
    NoText,
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// Summarize one document end to end.
///
/// Pipeline: clean → chunk (or carve into sections, then clean + chunk
/// each) → one model call per chunk, strictly in order → join fragments →
/// post-process. A failing model call aborts the whole run; there are no
/// retries and no partial results.
pub async fn summarize_document(
    text: &str,
    backend: &dyn SummaryBackend,
    client: &reqwest::Client,
    config: &Config,
    progress: impl Fn(ProgressEvent),
) -> Result<String, PipelineError> {
    config.validate()?;
    let timeout = Duration::from_secs(config.model_timeout_secs);

    let assembled = match config.mode {
        SummaryMode::Flat => {
            summarize_flat(text, backend, client, config, timeout, &progress).await?
        }
        SummaryMode::Sectioned => {
            // Sections are carved from the raw text: the heading heuristics
            // need the line structure that cleanup collapses away.
            let sections = extract_sections_with_config(text, &config.sections);
            if sections.is_empty() {
                tracing::warn!("no section headings found, falling back to flat summarization");
                summarize_flat(text, backend, client, config, timeout, &progress).await?
            } else {
                let mut parts = Vec::new();
                for (kind, body) in sections.iter() {
                    let cleaned = clean(body);
                    if cleaned.is_empty() {
                        continue;
                    }
                    let summary = summarize_block(
                        &cleaned,
                        backend,
                        client,
                        config,
                        timeout,
                        &progress,
                        Some(kind),
                    )
                    .await?;
                    parts.push(format!("{}: {}", kind.label(), summary));
                }
                if parts.is_empty() {
                    return Err(PipelineError::NoText);
                }
                parts.join(" ")
            }
        }
    };

    Ok(post_process(&assembled))
}

async fn summarize_flat(
    text: &str,
    backend: &dyn SummaryBackend,
    client: &reqwest::Client,
    config: &Config,
    timeout: Duration,
    progress: &impl Fn(ProgressEvent),
) -> Result<String, PipelineError> {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return Err(PipelineError::NoText);
    }
    summarize_block(&cleaned, backend, client, config, timeout, progress, None).await
}

/// Chunk one block of cleaned text and summarize its chunks serially.
async fn summarize_block(
    cleaned: &str,
    backend: &dyn SummaryBackend,
    client: &reqwest::Client,
    config: &Config,
    timeout: Duration,
    progress: &impl Fn(ProgressEvent),
    section: Option<SectionKind>,
) -> Result<String, PipelineError> {
    let chunks = chunk_text(cleaned, config.max_chunk_size);
    let total = chunks.len();
    if let Some(kind) = section {
        progress(ProgressEvent::SectionStart {
            kind,
            chunks: total,
        });
    }

    let mut fragments = Vec::with_capacity(total);
    for (index, chunk) in chunks.iter().enumerate() {
        progress(ProgressEvent::ChunkStart { index, total });
        tracing::debug!(
            backend = backend.name(),
            index,
            total,
            chars = chunk.len(),
            "summarizing chunk"
        );
        let fragment = backend.summarize(chunk, &config.decode, client, timeout).await?;
        progress(ProgressEvent::ChunkDone { index, total });
        fragments.push(fragment);
    }

    Ok(fragments.join(" "))
}
