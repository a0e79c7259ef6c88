//! Report snapshot rendered by the formatters

use crate::screening::models::{MatchScore, ResumeData, Suggestion};
use crate::session::AppController;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the results view shows, taken from the session in one go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub resume: Option<ResumeData>,
    pub job_role: Option<String>,
    pub suggestions: Vec<Suggestion>,
    pub match_score: Option<MatchScore>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub strategy: String,
    pub backend_url: Option<String>,
}

impl ScreeningReport {
    pub fn from_controller(controller: &AppController, backend_url: Option<&str>) -> Self {
        let state = controller.state();
        Self {
            resume: state.resume.clone(),
            job_role: state.selected_role.map(|role| role.to_string()),
            suggestions: state.suggestions.clone(),
            match_score: controller.match_score(),
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                strategy: controller.strategy_name().to_string(),
                backend_url: backend_url.map(str::to_string),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.resume.is_none() && self.suggestions.is_empty()
    }
}
