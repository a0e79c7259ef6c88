//! Resume assistant replies

use crate::backend::Backend;
use async_trait::async_trait;
use log::warn;
use std::sync::Arc;

pub const GREETING: &str =
    "Hello! I'm here to help you with resume screening and provide guidance. Feel free to ask me anything!";

pub const RESUME_IMPROVEMENT_REPLY: &str = "To improve your resume, focus on: 1) Adding quantifiable achievements, 2) Using action verbs, 3) Tailoring keywords to the job description, 4) Keeping it concise and well-formatted. Would you like specific advice for any section?";

pub const ATS_REPLY: &str = "For ATS optimization: Use standard section headings, include relevant keywords from the job posting, use simple formatting, save as PDF, and avoid graphics or unusual fonts. This helps ensure your resume passes through applicant tracking systems.";

pub const SKILLS_REPLY: &str = "Focus on highlighting skills that match the job requirements. Group them by category (Programming Languages, Frameworks, Tools) and prioritize the most relevant ones. Include your proficiency level when possible.";

pub const CAPABILITIES_REPLY: &str = "I can help you with resume optimization, ATS tips, skill highlighting, job matching, and interview preparation. What specific aspect would you like to discuss?";

/// Canned reply for `message`. Rules are checked in order, first match wins.
pub fn respond(message: &str) -> &'static str {
    let lower = message.to_lowercase();

    if lower.contains("resume") && lower.contains("improve") {
        RESUME_IMPROVEMENT_REPLY
    } else if lower.contains("ats") {
        ATS_REPLY
    } else if lower.contains("skill") || lower.contains("technical") {
        SKILLS_REPLY
    } else {
        CAPABILITIES_REPLY
    }
}

/// Source of bot replies for the chat panel.
#[async_trait]
pub trait ChatResponder: Send + Sync {
    async fn reply(&self, message: &str) -> String;
}

/// Offline keyword matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordResponder;

#[async_trait]
impl ChatResponder for KeywordResponder {
    async fn reply(&self, message: &str) -> String {
        respond(message).to_string()
    }
}

/// Asks the backend `/chat` endpoint, falling back to keyword matching when
/// the call fails or returns no reply.
pub struct BackendResponder {
    backend: Arc<dyn Backend>,
}

impl BackendResponder {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ChatResponder for BackendResponder {
    async fn reply(&self, message: &str) -> String {
        match self.backend.chat(message).await {
            Ok(result) => match result.reply {
                Some(reply) if !reply.trim().is_empty() => reply,
                _ => {
                    warn!("Chat backend returned no reply, answering locally");
                    respond(message).to_string()
                }
            },
            Err(e) => {
                warn!("Chat backend unavailable ({}), answering locally", e);
                respond(message).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_improvement_rule() {
        assert_eq!(respond("please improve my resume"), RESUME_IMPROVEMENT_REPLY);
        assert_eq!(respond("How can I IMPROVE my Resume?"), RESUME_IMPROVEMENT_REPLY);
    }

    #[test]
    fn test_resume_rule_needs_both_words() {
        assert_eq!(respond("look at my resume"), CAPABILITIES_REPLY);
        assert_eq!(respond("help me improve"), CAPABILITIES_REPLY);
    }

    #[test]
    fn test_ats_precedes_skills() {
        assert_eq!(respond("tips for ats and skill"), ATS_REPLY);
    }

    #[test]
    fn test_ats_matches_as_substring() {
        // "whats" contains "ats"
        assert_eq!(respond("whats up"), ATS_REPLY);
    }

    #[test]
    fn test_resume_rule_precedes_ats() {
        assert_eq!(respond("improve resume for ats"), RESUME_IMPROVEMENT_REPLY);
    }

    #[test]
    fn test_skills_rule() {
        assert_eq!(respond("Which SKILLS matter?"), SKILLS_REPLY);
        assert_eq!(respond("technical background"), SKILLS_REPLY);
    }

    #[test]
    fn test_fallback_rule() {
        assert_eq!(respond(""), CAPABILITIES_REPLY);
        assert_eq!(respond("hi"), CAPABILITIES_REPLY);
        assert_eq!(respond(&"x".repeat(100_000)), CAPABILITIES_REPLY);
    }

    #[tokio::test]
    async fn test_keyword_responder_wraps_respond() {
        assert_eq!(KeywordResponder.reply("ats?").await, ATS_REPLY);
    }
}
