// All model instruction texts for the analysis API.
// One entry per mode; the catalog is immutable and defined once.

use crate::analysis::Mode;

/// Strengths/weaknesses evaluation.
pub const SUMMARY_INSTRUCTION: &str = "\
You are an experienced HR professional. Review the provided resume against the job description. \
Provide a professional evaluation: what are the candidate's strengths and weaknesses, \
and are they a good fit for this specific role?";

/// Recommendations to close the candidate's skill gap.
pub const SKILL_GAP_INSTRUCTION: &str = "\
Based on the Job Description and the candidate's current resume, what specific certifications, \
projects, or technical skills should the candidate acquire to become a 100% match?";

/// Keywords present in the job description but missing from the resume.
pub const KEYWORD_GAP_INSTRUCTION: &str = "\
You are an ATS (Applicant Tracking System) expert. Compare the resume to the job description \
and list the specific technical and soft skill keywords that are missing from the resume.";

/// Bare percentage match.
pub const MATCH_PERCENTAGE_INSTRUCTION: &str = "\
You are an ATS scanner. Give a percentage match for this resume against the job description. \
Provide the percentage first, then a list of missing keywords, and finally a concluding thought.";

/// Combined score report. Requests a strict reply format; the interpreter
/// never assumes the model obeys it.
pub const COMPOSITE_SCORE_INSTRUCTION: &str = "\
You are an ATS scanner evaluating this resume against the job description. \
Reply in exactly this format: first a single line with the overall match percentage, \
then a list of the skills from the job description that the resume matches, \
then a list of the skills that are missing, and finally a short concluding paragraph.";

/// Looks up the instruction text for a mode.
///
/// Total over the closed mode set — the exhaustive match makes an unknown
/// mode unrepresentable rather than a runtime condition.
pub fn instruction_for(mode: Mode) -> &'static str {
    match mode {
        Mode::Summary => SUMMARY_INSTRUCTION,
        Mode::SkillGap => SKILL_GAP_INSTRUCTION,
        Mode::KeywordGap => KEYWORD_GAP_INSTRUCTION,
        Mode::MatchPercentage => MATCH_PERCENTAGE_INSTRUCTION,
        Mode::CompositeScore => COMPOSITE_SCORE_INSTRUCTION,
    }
}
