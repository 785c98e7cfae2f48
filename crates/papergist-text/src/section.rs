use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// The five document regions the extractor knows about, in precedence
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Abstract,
    Introduction,
    Methods,
    Results,
    Conclusion,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Abstract,
        SectionKind::Introduction,
        SectionKind::Methods,
        SectionKind::Results,
        SectionKind::Conclusion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Abstract => "Abstract",
            SectionKind::Introduction => "Introduction",
            SectionKind::Methods => "Methods",
            SectionKind::Results => "Results",
            SectionKind::Conclusion => "Conclusion",
        }
    }
}

/// Extracted section texts. Every key is always present; a section whose
/// heading was not found holds the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    pub abstract_text: String,
    pub introduction: String,
    pub methods: String,
    pub results: String,
    pub conclusion: String,
}

impl Sections {
    pub fn get(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Abstract => &self.abstract_text,
            SectionKind::Introduction => &self.introduction,
            SectionKind::Methods => &self.methods,
            SectionKind::Results => &self.results,
            SectionKind::Conclusion => &self.conclusion,
        }
    }

    fn set(&mut self, kind: SectionKind, value: String) {
        match kind {
            SectionKind::Abstract => self.abstract_text = value,
            SectionKind::Introduction => self.introduction = value,
            SectionKind::Methods => self.methods = value,
            SectionKind::Results => self.results = value,
            SectionKind::Conclusion => self.conclusion = value,
        }
    }

    /// All five sections in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &str)> {
        SectionKind::ALL.into_iter().map(|k| (k, self.get(k)))
    }

    /// True when no heading matched at all.
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, text)| text.is_empty())
    }
}

#[derive(Error, Debug)]
#[error("invalid {kind} heading pattern: {source}")]
pub struct PatternError {
    pub kind: &'static str,
    #[source]
    pub source: regex::Error,
}

/// Per-key heading regex overrides; defaults cover the common English
/// paper layouts.
#[derive(Debug, Clone, Default)]
pub struct SectionConfig {
    overrides: Vec<(SectionKind, Regex)>,
}

impl SectionConfig {
    fn heading_for(&self, kind: SectionKind) -> Option<&Regex> {
        self.overrides
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, re)| re)
    }
}

#[derive(Debug, Default)]
pub struct SectionConfigBuilder {
    entries: Vec<(SectionKind, String)>,
}

impl SectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the heading pattern for one section. The pattern's match
    /// end marks where the section content starts.
    pub fn heading_regex(mut self, kind: SectionKind, pattern: &str) -> Self {
        self.entries.push((kind, pattern.to_string()));
        self
    }

    pub fn build(self) -> Result<SectionConfig, PatternError> {
        let mut overrides = Vec::with_capacity(self.entries.len());
        for (kind, pattern) in self.entries {
            let re = Regex::new(&pattern).map_err(|source| PatternError {
                kind: kind.label(),
                source,
            })?;
            overrides.push((kind, re));
        }
        Ok(SectionConfig { overrides })
    }
}

// Headings allow an optional arabic or roman section number. Content runs
// from the heading's match end to the section's end marker, or to the end
// of the document.
static ABSTRACT_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|\n)\s*abstract\s*[.:]?\s*").unwrap());
static ABSTRACT_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\n\s*(?:(?:\d+|[ivx]+)\s*[.:]?\s+)?introduction\b|\n\s*\n").unwrap()
});

static INTRODUCTION_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\n\s*(?:(?:\d+|[ivx]+)\s*[.:]?\s+)?introduction\s*\n").unwrap()
});
static INTRODUCTION_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\n\s*(?:(?:\d+|[ivx]+)\s*[.:]?\s+)?(?:background|related\s+work|methods?|methodology|materials\s+and\s+methods|approach|experiments?|results|discussion|conclusions?)\b",
    )
    .unwrap()
});

static METHODS_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\n\s*(?:(?:\d+|[ivx]+)\s*[.:]?\s+)?(?:methods?|methodology|materials\s+and\s+methods|approach)\s*\n",
    )
    .unwrap()
});
static METHODS_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\n\s*(?:(?:\d+|[ivx]+)\s*[.:]?\s+)?(?:experiments?|results|evaluation|discussion|conclusions?)\b",
    )
    .unwrap()
});

static RESULTS_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\n\s*(?:(?:\d+|[ivx]+)\s*[.:]?\s+)?(?:results|experiments?|evaluation)\s*\n",
    )
    .unwrap()
});
static RESULTS_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\n\s*(?:(?:\d+|[ivx]+)\s*[.:]?\s+)?(?:discussion|conclusions?|references|bibliography)\b",
    )
    .unwrap()
});

static CONCLUSION_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\n\s*(?:(?:\d+|[ivx]+)\s*[.:]?\s+)?(?:conclusions?|concluding\s+remarks)\s*\n",
    )
    .unwrap()
});
static CONCLUSION_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\n\s*(?:references|bibliography|acknowledge?ments|appendix)\b").unwrap()
});

fn default_heading(kind: SectionKind) -> &'static Regex {
    match kind {
        SectionKind::Abstract => &ABSTRACT_HEADING,
        SectionKind::Introduction => &INTRODUCTION_HEADING,
        SectionKind::Methods => &METHODS_HEADING,
        SectionKind::Results => &RESULTS_HEADING,
        SectionKind::Conclusion => &CONCLUSION_HEADING,
    }
}

fn end_marker(kind: SectionKind) -> &'static Regex {
    match kind {
        SectionKind::Abstract => &ABSTRACT_END,
        SectionKind::Introduction => &INTRODUCTION_END,
        SectionKind::Methods => &METHODS_END,
        SectionKind::Results => &RESULTS_END,
        SectionKind::Conclusion => &CONCLUSION_END,
    }
}

/// Carve the text into the five fixed sections using the default heading
/// patterns.
pub fn extract_sections(text: &str) -> Sections {
    extract_sections_with_config(text, &SectionConfig::default())
}

/// Config-aware version of [`extract_sections`].
///
/// Best effort: a heading phrased differently than the patterns expect
/// yields an empty string for that key, never an error. Keys are extracted
/// independently in precedence order; overlapping spans are not
/// cross-validated.
pub fn extract_sections_with_config(text: &str, config: &SectionConfig) -> Sections {
    let mut sections = Sections::default();

    for kind in SectionKind::ALL {
        let heading = config
            .heading_for(kind)
            .unwrap_or_else(|| default_heading(kind));

        let Some(m) = heading.find(text) else {
            continue;
        };
        let rest = &text[m.end()..];

        let end = end_marker(kind).find(rest).map_or(rest.len(), |e| e.start());
        let content = rest[..end].trim();
        if !content.is_empty() {
            sections.set(kind, content.to_string());
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAPER: &str = "A Study of Things\n\
        \n\
        Abstract\n\
        We study the things and find them interesting.\n\
        \n\
        1 Introduction\n\
        Things have long been studied.\n\
        Prior work exists.\n\
        \n\
        2 Methods\n\
        We measured the things carefully.\n\
        \n\
        3 Results\n\
        The things were significant.\n\
        \n\
        4 Conclusion\n\
        Things matter.\n\
        \n\
        References\n\
        [1] Someone. A thing paper.\n";

    #[test]
    fn extracts_all_five_sections() {
        let s = extract_sections(PAPER);
        assert_eq!(s.abstract_text, "We study the things and find them interesting.");
        assert!(s.introduction.contains("long been studied"));
        assert_eq!(s.methods, "We measured the things carefully.");
        assert_eq!(s.results, "The things were significant.");
        assert_eq!(s.conclusion, "Things matter.");
    }

    #[test]
    fn always_exactly_five_keys() {
        let s = extract_sections("no recognizable headings anywhere");
        assert_eq!(s.iter().count(), 5);
        assert!(s.iter().all(|(_, text)| text.is_empty()));
        assert!(s.is_empty());
    }

    #[test]
    fn missing_sections_are_empty_strings() {
        let text = "Abstract\nJust an abstract and nothing else.\n\nsome body text follows here";
        let s = extract_sections(text);
        assert_eq!(s.abstract_text, "Just an abstract and nothing else.");
        assert_eq!(s.methods, "");
        assert_eq!(s.conclusion, "");
    }

    #[test]
    fn conclusion_stops_at_references() {
        let s = extract_sections(PAPER);
        assert!(!s.conclusion.contains("thing paper"));
    }

    #[test]
    fn abstract_stops_at_blank_line_gap() {
        let text = "Abstract\nFirst abstract paragraph.\n\nUnlabeled body paragraph.";
        let s = extract_sections(text);
        assert_eq!(s.abstract_text, "First abstract paragraph.");
    }

    #[test]
    fn numbered_and_roman_headings_match() {
        let text = "body\n\nIV. Results\nNumbers went up.\n\n5 Conclusion\nDone.\n";
        let s = extract_sections(text);
        assert_eq!(s.results, "Numbers went up.");
        assert_eq!(s.conclusion, "Done.");
    }

    #[test]
    fn heading_override_applies() {
        let config = SectionConfigBuilder::new()
            .heading_regex(SectionKind::Conclusion, r"(?i)\n\s*zusammenfassung\s*\n")
            .build()
            .unwrap();
        let text = "body\n\nZusammenfassung\nAlles gut.\n\nReferences\n[1] x.";
        let s = extract_sections_with_config(text, &config);
        assert_eq!(s.conclusion, "Alles gut.");
    }

    #[test]
    fn invalid_override_pattern_is_an_error() {
        let err = SectionConfigBuilder::new()
            .heading_regex(SectionKind::Methods, r"(unclosed")
            .build()
            .unwrap_err();
        assert_eq!(err.kind, "Methods");
    }
}
