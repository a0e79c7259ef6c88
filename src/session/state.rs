//! Session state owned by the application controller

use crate::screening::chat::GREETING;
use crate::screening::models::{JobRole, ResumeData, Suggestion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Hands out message ids from the wall clock in milliseconds, bumped so that
/// ids never repeat and always increase.
#[derive(Debug, Clone, Default)]
pub struct MessageIdGenerator {
    last: i64,
}

impl MessageIdGenerator {
    pub fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let candidate = now.timestamp_millis();
        self.last = if candidate > self.last { candidate } else { self.last + 1 };
        self.last.to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub selected_role: Option<JobRole>,
    pub resume: Option<ResumeData>,
    pub suggestions: Vec<Suggestion>,
    pub transcript: Vec<ChatMessage>,
    pub analyzing: bool,
    pub draft: String,
    pub chat_open: bool,
    #[serde(skip)]
    ids: MessageIdGenerator,
}

impl SessionState {
    /// Fresh session with the bot greeting already in the transcript.
    pub fn new() -> Self {
        let mut state = Self {
            selected_role: None,
            resume: None,
            suggestions: Vec::new(),
            transcript: Vec::new(),
            analyzing: false,
            draft: String::new(),
            chat_open: false,
            ids: MessageIdGenerator::default(),
        };
        state.push_message(ChatRole::Bot, GREETING);
        state
    }

    pub fn push_message(&mut self, role: ChatRole, text: impl Into<String>) -> &ChatMessage {
        let timestamp = Utc::now();
        let id = self.ids.next_id(timestamp);
        self.transcript.push(ChatMessage {
            id,
            role,
            text: text.into(),
            timestamp,
        });
        // just pushed
        &self.transcript[self.transcript.len() - 1]
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.transcript.last()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
