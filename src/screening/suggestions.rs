//! Role-targeted suggestions and match score
//!
//! Content is placeholder data: it does not look at the resume. The
//! `SuggestionStrategy` trait is the seam where a real scoring engine plugs in.

use crate::screening::models::{JobRole, MatchScore, Priority, ResumeData, Suggestion, SuggestionType};

/// Produces the suggestion list and match score shown for a resume and role.
pub trait SuggestionStrategy: Send + Sync {
    fn suggestions(&self, resume: &ResumeData, role: JobRole) -> Vec<Suggestion>;

    fn match_score(&self, resume: &ResumeData, role: JobRole) -> MatchScore;

    fn name(&self) -> &'static str;
}

/// Fixed suggestions and an 85% score for every resume.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderStrategy;

pub const PLACEHOLDER_MATCH_PERCENT: u8 = 85;

impl SuggestionStrategy for PlaceholderStrategy {
    fn suggestions(&self, resume: &ResumeData, role: JobRole) -> Vec<Suggestion> {
        generate(resume, role)
    }

    fn match_score(&self, _resume: &ResumeData, role: JobRole) -> MatchScore {
        MatchScore {
            percent: PLACEHOLDER_MATCH_PERCENT,
            label: "Excellent Match".to_string(),
            summary: format!("Strong alignment with {} requirements", role),
        }
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}

/// The five suggestions for `role`. Order is display order.
pub fn generate(_resume: &ResumeData, role: JobRole) -> Vec<Suggestion> {
    vec![
        Suggestion::new(
            SuggestionType::Strength,
            "Experience",
            format!(
                "Strong {} background with 5+ years of relevant experience",
                role.display_name().to_lowercase()
            ),
            Priority::High,
        ),
        Suggestion::new(
            SuggestionType::Strength,
            "Technical Skills",
            "Excellent technical skill set matching the job requirements",
            Priority::High,
        ),
        Suggestion::new(
            SuggestionType::Improvement,
            "Certifications",
            "Consider adding cloud certifications (AWS, Azure) to strengthen your profile",
            Priority::Medium,
        ),
        Suggestion::new(
            SuggestionType::Missing,
            "Projects",
            "Include specific project examples with quantifiable results",
            Priority::High,
        ),
        Suggestion::new(
            SuggestionType::Improvement,
            "Keywords",
            "Add more industry-specific keywords for ATS optimization",
            Priority::Medium,
        ),
    ]
}
