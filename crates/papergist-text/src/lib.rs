//! Pure text transforms used by the summarization pipeline.
//!
//! Everything in this crate is a stateless function of its input plus a
//! fixed rule table: no I/O, no model calls, no cross-call state.

pub mod chunk;
pub mod clean;
pub mod post;
pub mod section;

pub use chunk::{chunk_text, split_sentences};
pub use clean::{CleanRule, clean, clean_rules};
pub use post::post_process;
pub use section::{
    PatternError, SectionConfig, SectionConfigBuilder, SectionKind, Sections, extract_sections,
    extract_sections_with_config,
};
