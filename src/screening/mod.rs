//! Screening logic
//! Resume data model, role suggestions and the resume assistant

pub mod chat;
pub mod models;
pub mod suggestions;

pub use chat::{respond, BackendResponder, ChatResponder, KeywordResponder};
pub use models::{JobRole, MatchScore, Priority, ResumeData, Suggestion, SuggestionType};
pub use suggestions::{generate, PlaceholderStrategy, SuggestionStrategy};
