use once_cell::sync::Lazy;
use regex::Regex;

// A sentence ends at `.`, `!` or `?` followed by whitespace. The terminator
// stays with its sentence; the whitespace is consumed.
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Split text into sentences using the boundary heuristic above.
///
/// A trailing fragment with no terminating whitespace is kept as its own
/// sentence. Abbreviations ("e.g.", "Fig.") split too; for chunking, a
/// boundary in the wrong place only shortens a chunk.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BOUNDARY.find_iter(text) {
        // The terminator is a single ASCII byte; +1 lands after it.
        let end = m.start() + 1;
        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = m.end();
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

/// Split `text` into chunks of at most `max_chunk_size` characters without
/// breaking sentences.
///
/// Sentences accumulate into the current chunk while the running sum of
/// their character lengths stays within the budget; join spaces are not
/// counted. A single sentence longer than the budget becomes its own
/// oversized chunk; sentences are never split. Empty input yields no
/// chunks.
pub fn chunk_text(text: &str, max_chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for sentence in split_sentences(text) {
        let len = sentence.chars().count();
        if !current.is_empty() && current_len + len > max_chunk_size {
            chunks.push(current.join(" "));
            current.clear();
            current_len = 0;
        }
        current.push(sentence);
        current_len += len;
    }
    if !current.is_empty() {
        chunks.push(current.join(" "));
    }
    chunks
}
