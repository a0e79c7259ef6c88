//! Resume, role and suggestion structures

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fallback text when the backend answers without an `analysis` field.
pub const NO_ANALYSIS_FALLBACK: &str = "No analysis returned";

/// Resume data built from a successful analysis.
///
/// The analysis backend only returns one free-text blob, so the structured
/// fields stay empty until a richer extractor exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    pub file_name: String,
    pub extracted_text: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub education: String,
    pub contact: String,
}

impl ResumeData {
    pub fn from_analysis(file_name: impl Into<String>, analysis: Option<String>) -> Self {
        Self {
            file_name: file_name.into(),
            extracted_text: analysis.unwrap_or_else(|| NO_ANALYSIS_FALLBACK.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Strength,
    Improvement,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    pub category: String,
    pub message: String,
    pub priority: Priority,
}

impl Suggestion {
    pub fn new(
        suggestion_type: SuggestionType,
        category: &str,
        message: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            suggestion_type,
            category: category.to_string(),
            message: message.into(),
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    /// 0-100
    pub percent: u8,
    pub label: String,
    pub summary: String,
}

/// Target job roles offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobRole {
    SoftwareEngineer,
    FrontendDeveloper,
    BackendDeveloper,
    FullStackDeveloper,
    DataScientist,
    ProductManager,
    UxUiDesigner,
    DevOpsEngineer,
    MobileDeveloper,
    QaEngineer,
}

impl JobRole {
    /// Every role, in display order.
    pub const ALL: [JobRole; 10] = [
        JobRole::SoftwareEngineer,
        JobRole::FrontendDeveloper,
        JobRole::BackendDeveloper,
        JobRole::FullStackDeveloper,
        JobRole::DataScientist,
        JobRole::ProductManager,
        JobRole::UxUiDesigner,
        JobRole::DevOpsEngineer,
        JobRole::MobileDeveloper,
        JobRole::QaEngineer,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            JobRole::SoftwareEngineer => "Software Engineer",
            JobRole::FrontendDeveloper => "Frontend Developer",
            JobRole::BackendDeveloper => "Backend Developer",
            JobRole::FullStackDeveloper => "Full Stack Developer",
            JobRole::DataScientist => "Data Scientist",
            JobRole::ProductManager => "Product Manager",
            JobRole::UxUiDesigner => "UX/UI Designer",
            JobRole::DevOpsEngineer => "DevOps Engineer",
            JobRole::MobileDeveloper => "Mobile Developer",
            JobRole::QaEngineer => "QA Engineer",
        }
    }

    /// Kebab-case form used on the command line, e.g. `ux-ui-designer`.
    pub fn slug(&self) -> String {
        slugify(self.display_name())
    }
}

fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

impl fmt::Display for JobRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for JobRole {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = slugify(s);
        JobRole::ALL
            .iter()
            .copied()
            .find(|role| role.slug() == wanted)
            .ok_or_else(|| ScreenerError::Validation(format!("Unknown job role: {}", s)))
    }
}

impl fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SuggestionType::Strength => write!(f, "strength"),
            SuggestionType::Improvement => write!(f, "improvement"),
            SuggestionType::Missing => write!(f, "missing"),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}
