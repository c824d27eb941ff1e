//! Response interpreter — derives display data from the raw model reply.
//!
//! Both derivations are best-effort: a miss is a valid absent result, never
//! an error, and nothing here can fail the request.

use regex::Regex;

use crate::analysis::{AnalysisResponse, Mode};

/// Bound on the emphasis-term list, so a downstream text-marking pass has a
/// known worst case.
const MAX_EMPHASIS_TERMS: usize = 120;

/// Extracts the first percentage stated in `text`, clamped to 0–100.
///
/// First match wins, even when the prose mentions an unrelated percentage
/// before the intended score. Whitespace between the digits and the sign is
/// tolerated. `None` means "no percentage stated", which is distinct from
/// an explicit 0%.
pub fn extract_percent(text: &str) -> Option<u32> {
    let re = Regex::new(r"(\d{1,3})\s*%").expect("valid regex");
    let captures = re.captures(text)?;
    let value: u32 = captures[1].parse().ok()?;
    Some(value.min(100))
}

/// Tokenizes the job description into emphasis terms for highlighting.
///
/// Candidate terms start with a letter, run at least 3 characters, and may
/// contain letters, digits, `+`, `#`, and `-`, so "C++" and "CI-CD"
/// survive. Terms are trimmed, deduplicated case-sensitively, sorted by
/// descending length then ascending lowercase, and capped at
/// [`MAX_EMPHASIS_TERMS`]. Longest-first ordering keeps a short term from
/// fragmenting a longer term's match span when substring highlighting is
/// applied downstream.
pub fn emphasis_terms(job_description: &str) -> Vec<String> {
    let re = Regex::new(r"[A-Za-z][A-Za-z0-9+\-#]{2,}").expect("valid regex");

    let mut terms: Vec<String> = re
        .find_iter(job_description)
        .map(|m| m.as_str().trim().to_string())
        .collect();

    terms.sort();
    terms.dedup();
    terms.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
    });
    terms.truncate(MAX_EMPHASIS_TERMS);
    terms
}

/// Interprets a raw model reply for display. `raw_text` passes through
/// unmodified.
pub fn interpret(mode: Mode, raw_text: String, job_description: &str) -> AnalysisResponse {
    let extracted_percent = extract_percent(&raw_text);

    // Composite-score reports always render a gauge, falling back to 0 when
    // the model ignored the requested format. Every other mode shows a gauge
    // only when a percentage was actually found.
    let gauge_percent = match mode {
        Mode::CompositeScore => Some(extracted_percent.unwrap_or(0)),
        _ => extracted_percent,
    };

    AnalysisResponse {
        mode,
        report_filename: mode.report_filename(),
        emphasized_terms: emphasis_terms(job_description),
        extracted_percent,
        gauge_percent,
        raw_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_percent_first_integer_before_sign() {
        assert_eq!(extract_percent("Match: 87% overall"), Some(87));
    }

    #[test]
    fn test_extract_percent_absent_when_no_pattern() {
        assert_eq!(extract_percent("no numbers here"), None);
    }

    #[test]
    fn test_extract_percent_first_match_wins_and_clamps() {
        assert_eq!(extract_percent("999% plus 42%"), Some(100));
    }

    #[test]
    fn test_extract_percent_zero_is_not_absence() {
        assert_eq!(extract_percent("a dismal 0% match"), Some(0));
    }

    #[test]
    fn test_extract_percent_tolerates_space_before_sign() {
        assert_eq!(extract_percent("roughly 64 % of requirements"), Some(64));
    }

    #[test]
    fn test_extract_percent_ignores_bare_numbers() {
        assert_eq!(extract_percent("5 years of experience"), None);
    }

    #[test]
    fn test_emphasis_longer_terms_precede_shorter() {
        let terms = emphasis_terms("Python and PythonScript and Go");
        let python_script = terms.iter().position(|t| t == "PythonScript").unwrap();
        let python = terms.iter().position(|t| t == "Python").unwrap();
        assert!(python_script < python);
        // two-character tokens fall below the minimum length
        assert!(!terms.iter().any(|t| t == "Go"));
    }

    #[test]
    fn test_emphasis_keeps_symbol_bearing_tokens() {
        let terms = emphasis_terms("Expert in C++ and CI-CD pipelines");
        assert!(terms.iter().any(|t| t == "C++"));
        assert!(terms.iter().any(|t| t == "CI-CD"));
    }

    #[test]
    fn test_emphasis_dedup_is_case_sensitive() {
        let terms = emphasis_terms("Rust rust RUST Rust");
        assert_eq!(terms.len(), 3);
    }

    #[test]
    fn test_emphasis_equal_length_sorts_lowercase_alphabetical() {
        let terms = emphasis_terms("zebra Alpha");
        assert_eq!(terms, vec!["Alpha".to_string(), "zebra".to_string()]);
    }

    #[test]
    fn test_emphasis_caps_at_120_terms() {
        let jd: String = (0..150)
            .map(|i| format!("kw{i:03}x "))
            .collect::<Vec<_>>()
            .join("");
        assert_eq!(emphasis_terms(&jd).len(), 120);
    }

    #[test]
    fn test_emphasis_idempotent_under_retokenizing() {
        let terms = emphasis_terms("Build Kubernetes operators in Rust with gRPC and CI-CD");
        let rejoined = terms.join(" ");
        assert_eq!(emphasis_terms(&rejoined), terms);
    }

    #[test]
    fn test_emphasis_empty_input_yields_no_terms() {
        assert!(emphasis_terms("").is_empty());
    }

    #[test]
    fn test_interpret_composite_score_gauge_falls_back_to_zero() {
        let response = interpret(Mode::CompositeScore, "no figure given".to_string(), "Rust");
        assert_eq!(response.extracted_percent, None);
        assert_eq!(response.gauge_percent, Some(0));
    }

    #[test]
    fn test_interpret_other_modes_show_no_gauge_on_miss() {
        for mode in [
            Mode::Summary,
            Mode::SkillGap,
            Mode::KeywordGap,
            Mode::MatchPercentage,
        ] {
            let response = interpret(mode, "no figure given".to_string(), "Rust");
            assert_eq!(response.extracted_percent, None);
            assert_eq!(response.gauge_percent, None, "{mode:?}");
        }
    }

    #[test]
    fn test_interpret_gauge_matches_extraction_when_present() {
        let response = interpret(Mode::MatchPercentage, "Score: 73%".to_string(), "Rust");
        assert_eq!(response.extracted_percent, Some(73));
        assert_eq!(response.gauge_percent, Some(73));
    }

    #[test]
    fn test_interpret_preserves_raw_text_byte_for_byte() {
        let raw = "Line one\n\n  indented — with unicode ✓\r\ntrailing  ".to_string();
        let response = interpret(Mode::Summary, raw.clone(), "Rust");
        assert_eq!(response.raw_text, raw);
    }

    #[test]
    fn test_interpret_names_the_report_after_the_mode() {
        let response = interpret(Mode::KeywordGap, "reply".to_string(), "Rust");
        assert_eq!(response.report_filename, "ATS_Keyword_Analysis.txt");
    }
}
