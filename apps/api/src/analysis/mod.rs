// Analysis pipeline: prompt catalog → dispatch → interpretation.
// All model calls go through llm_client — no direct Gemini calls here.

pub mod dispatcher;
pub mod handlers;
pub mod interpreter;
pub mod prompts;

use serde::{Deserialize, Serialize};

/// The selected analysis type. The set is closed: extending it means adding
/// a catalog entry, not a new code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Summary,
    SkillGap,
    KeywordGap,
    MatchPercentage,
    CompositeScore,
}

impl Mode {
    /// Parses the form-field spelling of a mode. An unknown string is a
    /// request validation failure at the HTTP boundary — it can never reach
    /// the catalog.
    pub fn parse(s: &str) -> Option<Mode> {
        match s {
            "summary" => Some(Mode::Summary),
            "skill_gap" => Some(Mode::SkillGap),
            "keyword_gap" => Some(Mode::KeywordGap),
            "match_percentage" => Some(Mode::MatchPercentage),
            "composite_score" => Some(Mode::CompositeScore),
            _ => None,
        }
    }

    /// Human-readable label, used for report filenames and display headers.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Summary => "Resume Summary",
            Mode::SkillGap => "Skills Improvement",
            Mode::KeywordGap => "Keyword Analysis",
            Mode::MatchPercentage => "Percentage Match",
            Mode::CompositeScore => "Score Report",
        }
    }

    /// Filename offered for the downloadable plain-text report.
    pub fn report_filename(&self) -> String {
        format!("ATS_{}.txt", self.label().replace(' ', "_"))
    }
}

/// The interpreted result of one analysis invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub mode: Mode,
    /// The model reply, unmodified.
    pub raw_text: String,
    /// First percentage stated in the reply, clamped to 0–100. Absent when
    /// the model stated none; absence and zero are distinct.
    pub extracted_percent: Option<u32>,
    /// What a score gauge should show. Differs from `extracted_percent`
    /// only in composite-score mode, which always renders a gauge (0 on a
    /// miss); the other modes show a gauge only when a percentage was found.
    pub gauge_percent: Option<u32>,
    /// Job-description terms for highlighting, longest first.
    pub emphasized_terms: Vec<String>,
    pub report_filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parses_all_five_names() {
        assert_eq!(Mode::parse("summary"), Some(Mode::Summary));
        assert_eq!(Mode::parse("skill_gap"), Some(Mode::SkillGap));
        assert_eq!(Mode::parse("keyword_gap"), Some(Mode::KeywordGap));
        assert_eq!(Mode::parse("match_percentage"), Some(Mode::MatchPercentage));
        assert_eq!(Mode::parse("composite_score"), Some(Mode::CompositeScore));
    }

    #[test]
    fn test_mode_rejects_unknown_names() {
        assert_eq!(Mode::parse("score"), None);
        assert_eq!(Mode::parse("Summary"), None);
        assert_eq!(Mode::parse(""), None);
    }

    #[test]
    fn test_mode_parse_agrees_with_serde_spelling() {
        for mode in [
            Mode::Summary,
            Mode::SkillGap,
            Mode::KeywordGap,
            Mode::MatchPercentage,
            Mode::CompositeScore,
        ] {
            let json = serde_json::to_string(&mode).unwrap();
            let spelled = json.trim_matches('"');
            assert_eq!(Mode::parse(spelled), Some(mode));
        }
    }

    #[test]
    fn test_report_filename_convention() {
        assert_eq!(Mode::Summary.report_filename(), "ATS_Resume_Summary.txt");
        assert_eq!(
            Mode::MatchPercentage.report_filename(),
            "ATS_Percentage_Match.txt"
        );
        assert_eq!(
            Mode::CompositeScore.report_filename(),
            "ATS_Score_Report.txt"
        );
    }
}
