use once_cell::sync::Lazy;
use regex::Regex;

/// A single substitution in the cleanup pass.
///
/// Rules are applied strictly in table order; later rules see the output of
/// earlier ones. The table is data, not control flow, so ordering and
/// content can be asserted on directly in tests.
pub struct CleanRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub replacement: &'static str,
}

static CLEAN_RULES: Lazy<Vec<CleanRule>> = Lazy::new(|| {
    vec![
        CleanRule {
            name: "email",
            pattern: Regex::new(r"\S+@\S+\.\S+").unwrap(),
            replacement: "",
        },
        // [1], [1,2], [1-3] style citation groups
        CleanRule {
            name: "bracket_citation",
            pattern: Regex::new(r"\[[\d,\s-]+\]").unwrap(),
            replacement: "",
        },
        // (Smith, 2020) / (Smith, 2020a)
        CleanRule {
            name: "author_year_citation",
            pattern: Regex::new(r"\([A-Za-z]+,\s*\d{4}[a-z]?\)").unwrap(),
            replacement: "",
        },
        // (Smith et al., 2020)
        CleanRule {
            name: "et_al_citation",
            pattern: Regex::new(r"\([A-Za-z]+\s+et\s+al\.,?\s*\d{4}[a-z]?\)").unwrap(),
            replacement: "",
        },
        // (Smith and Jones, 2020) / (Smith & Jones, 2020)
        CleanRule {
            name: "two_author_citation",
            pattern: Regex::new(r"\([A-Za-z]+\s+(?:and|&)\s+[A-Za-z]+,\s*\d{4}[a-z]?\)").unwrap(),
            replacement: "",
        },
        // Caption lines: "Figure 3: ..." through end of line
        CleanRule {
            name: "caption_line",
            pattern: Regex::new(r"(?m)^(?:Figure|Fig\.|Table)\s+\d+[.:][^\n]+$").unwrap(),
            replacement: "",
        },
        // Inline caption references, terminated at the next period
        CleanRule {
            name: "caption_inline",
            pattern: Regex::new(r"(?:Figure|Fig\.|Table)\s+\d+[.:][^.]+\.").unwrap(),
            replacement: "",
        },
        CleanRule {
            name: "supplementary_caption",
            pattern: Regex::new(
                r"(?:Supplementary|Supp\.)\s+(?:Figure|Fig\.|Table)\s+\d+[.:][^.]+\.",
            )
            .unwrap(),
            replacement: "",
        },
        // "see Figure 2", "c.f. Table 1", ...
        CleanRule {
            name: "caption_lead_in",
            pattern: Regex::new(r"(?:see|c\.f\.|compare|refer to)\s+(?:Figure|Fig\.|Table)\s+\d+")
                .unwrap(),
            replacement: "",
        },
        // Residual author-affiliation lines (anything still carrying an @)
        CleanRule {
            name: "affiliation_line",
            pattern: Regex::new(r"(?m)^.*@.*$").unwrap(),
            replacement: "",
        },
        CleanRule {
            name: "whitespace_run",
            pattern: Regex::new(r"\s+").unwrap(),
            replacement: " ",
        },
        CleanRule {
            name: "blank_lines",
            pattern: Regex::new(r"\n\s*\n+").unwrap(),
            replacement: "\n\n",
        },
    ]
});

/// The ordered cleanup rule table.
pub fn clean_rules() -> &'static [CleanRule] {
    &CLEAN_RULES
}

/// Strip bibliographic noise (emails, citations, captions, affiliation
/// lines) from raw extracted text and normalize whitespace.
///
/// Idempotent: the rules only delete or collapse, so re-applying the table
/// to its own output is a no-op.
pub fn clean(text: &str) -> String {
    let mut cleaned = text.to_string();
    for rule in clean_rules() {
        cleaned = rule
            .pattern
            .replace_all(&cleaned, rule.replacement)
            .into_owned();
    }
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_emails_and_citations() {
        let out = clean("Contact me at a@b.com (Smith, 2020) [1,2] for details.");
        assert_eq!(out, "Contact me at for details.");
    }

    #[test]
    fn removes_et_al_and_two_author_citations() {
        let out = clean("Shown before (Smith et al., 2019a) and (Lee & Park, 2021).");
        assert_eq!(out, "Shown before and .");
    }

    #[test]
    fn removes_full_line_captions() {
        let text = "Body text here.\nFigure 3: accuracy over time\nMore body text.";
        let out = clean(text);
        assert!(!out.contains("accuracy over time"), "caption survived: {out}");
        assert!(out.contains("Body text here."));
        assert!(out.contains("More body text."));
    }

    #[test]
    fn removes_inline_caption_through_period() {
        let out = clean("Intro sentence. Table 2: results by group and year. Next sentence.");
        assert!(!out.contains("results by group"), "inline caption survived: {out}");
        assert!(out.contains("Next sentence."));
    }

    #[test]
    fn removes_caption_lead_ins() {
        let out = clean("The trend holds, see Figure 4 for the breakdown.");
        assert!(!out.contains("Figure 4"));
        assert!(out.contains("The trend holds,"));
    }

    #[test]
    fn removes_affiliation_lines() {
        let text = "Title of the Paper\nJane Doe, Dept. of CS, jane @ example\nBody starts here.";
        let out = clean(text);
        assert!(!out.contains("Dept. of CS"));
        assert!(out.contains("Body starts here."));
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(clean("  a   b\t\tc \n d  "), "a b c d");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \n\n\t "), "");
    }

    #[test]
    fn idempotent_on_citation_heavy_text() {
        let text = "Prior work [1-3] at x@y.org (Kim et al., 2022) shows this.\n\
                    Figure 1: setup diagram\n\
                    See also (Ng and Ho, 2020b), refer to Table 3.";
        let once = clean(text);
        assert_eq!(clean(&once), once);
    }

    #[test]
    fn idempotent_on_plain_text() {
        let text = "A perfectly ordinary paragraph. Nothing to remove here.";
        let once = clean(text);
        assert_eq!(clean(&once), once);
    }

    #[test]
    fn rule_table_order_is_fixed() {
        let names: Vec<&str> = clean_rules().iter().map(|r| r.name).collect();
        // Whitespace normalization must run last, after all deletions.
        assert_eq!(names[0], "email");
        assert_eq!(&names[names.len() - 2..], &["whitespace_run", "blank_lines"]);
    }
}
