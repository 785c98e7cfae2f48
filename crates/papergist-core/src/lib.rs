use thiserror::Error;

pub mod backend;
pub mod config_file;
pub mod model;
pub mod pipeline;

// Re-export for convenience
pub use backend::{ExtractionError, PdfBackend};
pub use model::{
    DecodeParams, ModelError, ModelSettings, ProviderKind, SummaryBackend, build_backend,
};
pub use papergist_text::{SectionConfig, SectionKind, Sections};
pub use pipeline::{PipelineError, summarize_document};

/// How a document is fed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryMode {
    /// Clean the whole document, chunk it, summarize chunk by chunk.
    #[default]
    Flat,
    /// Carve the document into labeled sections first and summarize each.
    Sectioned,
}

impl SummaryMode {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(SummaryMode::Flat),
            "sectioned" | "sections" => Ok(SummaryMode::Sectioned),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SummaryMode::Flat => "flat",
            SummaryMode::Sectioned => "sectioned",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("chunk size must be positive")]
    InvalidChunkSize,
    #[error("summary length bounds are inverted (min {min} >= max {max})")]
    InvalidLengthBounds { min: u32, max: u32 },
    #[error(transparent)]
    Pattern(#[from] papergist_text::PatternError),
    #[error("unknown model provider: {0}")]
    UnknownProvider(String),
    #[error("unknown summary mode: {0}")]
    UnknownMode(String),
}

/// Runtime configuration for the summarization pipeline.
///
/// Built once at startup (flags > env > config file > defaults) and passed
/// by reference into [`summarize_document`]; nothing in here changes per
/// request.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: SummaryMode,
    /// Chunk budget in characters of sentence text.
    pub max_chunk_size: usize,
    pub decode: DecodeParams,
    /// Per-model-call HTTP timeout.
    pub model_timeout_secs: u64,
    pub sections: SectionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: SummaryMode::Flat,
            max_chunk_size: 500,
            decode: DecodeParams::default(),
            model_timeout_secs: 120,
            sections: SectionConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize);
        }
        if self.decode.min_length >= self.decode.max_length {
            return Err(ConfigError::InvalidLengthBounds {
                min: self.decode.min_length,
                max: self.decode.max_length,
            });
        }
        Ok(())
    }
}

/// Progress events emitted while a document is summarized.
///
/// Delivered through a caller-supplied callback; the CLI drives a progress
/// bar off them, the web handler ignores them.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    SectionStart { kind: SectionKind, chunks: usize },
    ChunkStart { index: usize, total: usize },
    ChunkDone { index: usize, total: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let config = Config {
            max_chunk_size: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidChunkSize)
        ));
    }

    #[test]
    fn inverted_length_bounds_are_rejected() {
        let config = Config {
            decode: DecodeParams {
                max_length: 30,
                min_length: 130,
            },
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLengthBounds { .. })
        ));
    }

    #[test]
    fn mode_parses_known_names_only() {
        assert_eq!(SummaryMode::parse("flat").unwrap(), SummaryMode::Flat);
        assert_eq!(
            SummaryMode::parse(" Sectioned ").unwrap(),
            SummaryMode::Sectioned
        );
        assert!(SummaryMode::parse("fancy").is_err());
    }
}
