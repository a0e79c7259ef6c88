//! Integration tests for the application controller

use async_trait::async_trait;
use resume_screener::backend::{AnalysisResult, Backend, ChatResult};
use resume_screener::config::Config;
use resume_screener::error::{Result, ScreenerError};
use resume_screener::input::UploadFile;
use resume_screener::screening::chat::{respond, ATS_REPLY, CAPABILITIES_REPLY, SKILLS_REPLY};
use resume_screener::screening::models::NO_ANALYSIS_FALLBACK;
use resume_screener::screening::{JobRole, MatchScore, Priority, ResumeData, Suggestion, SuggestionStrategy, SuggestionType};
use resume_screener::session::{AppController, ChatRole, Notifier};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::Instant;

enum Reply {
    Json(serde_json::Value),
    Status,
}

/// Backend double that answers from a queue and counts calls.
struct MockBackend {
    analyze_replies: Mutex<VecDeque<Reply>>,
    chat_reply: Option<String>,
    analyze_calls: AtomicUsize,
    chat_calls: AtomicUsize,
}

impl MockBackend {
    fn new(analyze_replies: Vec<Reply>) -> Self {
        Self {
            analyze_replies: Mutex::new(analyze_replies.into()),
            chat_reply: None,
            analyze_calls: AtomicUsize::new(0),
            chat_calls: AtomicUsize::new(0),
        }
    }

    fn with_chat_reply(mut self, reply: &str) -> Self {
        self.chat_reply = Some(reply.to_string());
        self
    }

    fn analyze_calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn analyze(&self, _file: &UploadFile) -> Result<AnalysisResult> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.analyze_replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Json(value)) => Ok(serde_json::from_value(value)?),
            Some(Reply::Status) | None => Err(ScreenerError::Request("Analyze failed")),
        }
    }

    async fn chat(&self, _message: &str) -> Result<ChatResult> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        match &self.chat_reply {
            Some(reply) => Ok(serde_json::from_value(json!({ "reply": reply }))?),
            None => Err(ScreenerError::Request("Chat failed")),
        }
    }

    fn base_url(&self) -> &str {
        "http://mock:5000"
    }
}

/// Backend whose analysis blocks until the test releases it.
struct GatedBackend {
    gate: Semaphore,
    analysis: serde_json::Value,
}

impl GatedBackend {
    fn new(analysis: serde_json::Value) -> Self {
        Self {
            gate: Semaphore::new(0),
            analysis,
        }
    }

    fn release(&self) {
        self.gate.add_permits(1);
    }
}

#[async_trait]
impl Backend for GatedBackend {
    async fn analyze(&self, _file: &UploadFile) -> Result<AnalysisResult> {
        let _permit = self.gate.acquire().await.unwrap();
        Ok(serde_json::from_value(self.analysis.clone())?)
    }

    async fn chat(&self, _message: &str) -> Result<ChatResult> {
        Err(ScreenerError::Request("Chat failed"))
    }

    fn base_url(&self) -> &str {
        "http://gated:5000"
    }
}

#[derive(Default)]
struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

fn pdf(name: &str) -> UploadFile {
    UploadFile::new(name, "application/pdf", b"%PDF-1.4".to_vec())
}

fn controller_with(backend: Arc<MockBackend>, notifier: Arc<RecordingNotifier>) -> AppController {
    AppController::new(backend, notifier)
}

#[tokio::test]
async fn test_non_pdf_upload_never_reaches_backend() {
    let backend = Arc::new(MockBackend::new(vec![Reply::Json(json!({ "analysis": "X" }))]));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut controller = controller_with(backend.clone(), notifier.clone());

    let err = controller
        .upload_file(UploadFile::new("resume.docx", "application/msword", b"doc".to_vec()))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(backend.analyze_calls(), 0);
    assert_eq!(notifier.alerts(), vec!["Please upload a PDF file".to_string()]);
    assert!(controller.state().resume.is_none());
    assert!(!controller.is_analyzing());
}

#[tokio::test]
async fn test_successful_upload_builds_resume_data() {
    let backend = Arc::new(MockBackend::new(vec![Reply::Json(json!({ "status": "success", "analysis": "X" }))]));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut controller = controller_with(backend.clone(), notifier.clone());

    controller.upload_file(pdf("jane.pdf")).await.unwrap();

    let resume = controller.state().resume.as_ref().unwrap();
    assert_eq!(resume.file_name, "jane.pdf");
    assert_eq!(resume.extracted_text, "X");
    assert!(resume.skills.is_empty());
    assert!(resume.experience.is_empty());
    assert!(resume.education.is_empty());
    assert!(resume.contact.is_empty());

    assert_eq!(backend.analyze_calls(), 1);
    assert!(notifier.alerts().is_empty());
    assert!(!controller.is_analyzing());
    // no role selected yet
    assert!(controller.state().suggestions.is_empty());
    assert!(controller.match_score().is_none());
}

#[tokio::test]
async fn test_missing_analysis_uses_fallback_text() {
    let backend = Arc::new(MockBackend::new(vec![Reply::Json(json!({ "status": "success" }))]));
    let mut controller = controller_with(backend, Arc::new(RecordingNotifier::default()));

    controller.upload_file(pdf("jane.pdf")).await.unwrap();

    assert_eq!(
        controller.state().resume.as_ref().unwrap().extracted_text,
        NO_ANALYSIS_FALLBACK
    );
}

#[tokio::test]
async fn test_upload_with_role_selected_generates_suggestions() {
    let backend = Arc::new(MockBackend::new(vec![Reply::Json(json!({ "analysis": "X" }))]));
    let mut controller = controller_with(backend, Arc::new(RecordingNotifier::default()));

    controller.select_role(JobRole::DataScientist);
    assert!(controller.state().suggestions.is_empty());

    controller.upload_file(pdf("jane.pdf")).await.unwrap();

    let suggestions = &controller.state().suggestions;
    assert_eq!(suggestions.len(), 5);
    assert_eq!(
        suggestions[0].message,
        "Strong data scientist background with 5+ years of relevant experience"
    );

    let score = controller.match_score().unwrap();
    assert_eq!(score.percent, 85);
    assert_eq!(score.summary, "Strong alignment with Data Scientist requirements");
}

#[tokio::test]
async fn test_role_change_replaces_suggestions() {
    let backend = Arc::new(MockBackend::new(vec![Reply::Json(json!({ "analysis": "X" }))]));
    let mut controller = controller_with(backend, Arc::new(RecordingNotifier::default()));
    controller.upload_file(pdf("jane.pdf")).await.unwrap();

    controller.select_role(JobRole::FrontendDeveloper);
    assert_eq!(controller.state().suggestions.len(), 5);

    controller.select_role(JobRole::DevOpsEngineer);
    let suggestions = &controller.state().suggestions;
    assert_eq!(suggestions.len(), 5);
    assert!(suggestions[0].message.contains("devops engineer"));

    controller.clear_role();
    assert!(controller.state().suggestions.is_empty());
    assert!(controller.match_score().is_none());
}

#[tokio::test]
async fn test_failed_upload_keeps_previous_state() {
    let backend = Arc::new(MockBackend::new(vec![
        Reply::Json(json!({ "analysis": "first" })),
        Reply::Status,
    ]));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut controller = controller_with(backend.clone(), notifier.clone());
    controller.select_role(JobRole::SoftwareEngineer);

    controller.upload_file(pdf("first.pdf")).await.unwrap();
    let before_resume = controller.state().resume.clone();
    let before_suggestions = controller.state().suggestions.clone();

    let err = controller.upload_file(pdf("second.pdf")).await.unwrap_err();

    assert!(err.is_request());
    assert_eq!(err.to_string(), "Analyze failed");
    assert_eq!(backend.analyze_calls(), 2);
    assert_eq!(controller.state().resume, before_resume);
    assert_eq!(controller.state().suggestions, before_suggestions);
    assert!(!controller.is_analyzing());

    let alerts = notifier.alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("http://mock:5000"));
}

#[tokio::test]
async fn test_new_upload_replaces_resume_wholesale() {
    let backend = Arc::new(MockBackend::new(vec![
        Reply::Json(json!({ "analysis": "first" })),
        Reply::Json(json!({ "analysis": "second" })),
    ]));
    let mut controller = controller_with(backend, Arc::new(RecordingNotifier::default()));

    controller.upload_file(pdf("first.pdf")).await.unwrap();
    controller.upload_file(pdf("second.pdf")).await.unwrap();

    let resume = controller.state().resume.as_ref().unwrap();
    assert_eq!(resume.file_name, "second.pdf");
    assert_eq!(resume.extracted_text, "second");
}

#[tokio::test]
async fn test_any_json_analysis_body_is_stored() {
    let backend = Arc::new(MockBackend::new(vec![
        Reply::Json(json!(null)),
        Reply::Json(json!({ "analysis": "X", "status": 200 })),
    ]));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut controller = controller_with(backend, notifier.clone());

    controller.upload_file(pdf("first.pdf")).await.unwrap();
    assert_eq!(
        controller.state().resume.as_ref().unwrap().extracted_text,
        NO_ANALYSIS_FALLBACK
    );

    controller.upload_file(pdf("second.pdf")).await.unwrap();
    assert_eq!(controller.state().resume.as_ref().unwrap().extracted_text, "X");
    assert!(notifier.alerts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_chat_stays_live_while_analysis_in_flight() {
    let backend = Arc::new(GatedBackend::new(json!({ "analysis": "X" })));
    let mut controller = AppController::new(backend.clone(), Arc::new(RecordingNotifier::default()))
        .with_reply_delay(Duration::from_millis(10));
    controller.select_role(JobRole::SoftwareEngineer);

    controller.begin_upload(pdf("jane.pdf")).unwrap();
    assert!(controller.is_analyzing());

    assert!(controller.send_chat("ats?"));
    assert!(controller.next_event().await);
    assert_eq!(controller.state().last_message().unwrap().text, ATS_REPLY);
    assert!(controller.is_analyzing());
    assert!(controller.state().resume.is_none());

    backend.release();
    assert!(controller.next_event().await);

    assert!(!controller.is_analyzing());
    assert_eq!(controller.state().resume.as_ref().unwrap().extracted_text, "X");
    assert_eq!(controller.state().suggestions.len(), 5);
}

#[tokio::test]
async fn test_failed_background_analysis_alerts_once() {
    let backend = Arc::new(MockBackend::new(vec![Reply::Status]));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut controller = controller_with(backend, notifier.clone());

    controller.begin_upload(pdf("jane.pdf")).unwrap();
    assert!(controller.is_analyzing());

    assert!(!controller.next_event().await);
    assert!(!controller.is_analyzing());
    assert!(controller.state().resume.is_none());
    assert_eq!(notifier.alerts().len(), 1);
}

#[tokio::test]
async fn test_accepted_mime_type_comes_from_config() {
    let backend = Arc::new(MockBackend::new(vec![Reply::Json(json!({ "analysis": "plain" }))]));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut config = Config::default();
    config.upload.allowed_mime_type = "text/plain".to_string();
    let mut controller = AppController::from_config(&config, backend.clone(), notifier.clone());

    let err = controller.upload_file(pdf("jane.pdf")).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(backend.analyze_calls(), 0);
    assert_eq!(notifier.alerts(), vec!["Please upload a text/plain file".to_string()]);

    controller
        .upload_file(UploadFile::new("jane.txt", "text/plain", b"Jane".to_vec()))
        .await
        .unwrap();
    assert_eq!(backend.analyze_calls(), 1);
    assert_eq!(controller.state().resume.as_ref().unwrap().extracted_text, "plain");
}

#[test]
#[should_panic]
fn test_send_chat_requires_runtime() {
    let backend = Arc::new(MockBackend::new(vec![]));
    let mut controller = controller_with(backend, Arc::new(RecordingNotifier::default()));
    controller.send_chat("hello");
}

#[tokio::test(start_paused = true)]
async fn test_chat_reply_arrives_after_delay() {
    let backend = Arc::new(MockBackend::new(vec![]));
    let mut controller = controller_with(backend, Arc::new(RecordingNotifier::default()));
    let start = Instant::now();

    controller.set_draft("hi");
    assert!(controller.send_chat("hi"));

    assert_eq!(controller.state().transcript.len(), 2);
    assert_eq!(controller.state().transcript[1].role, ChatRole::User);
    assert_eq!(controller.state().transcript[1].text, "hi");
    assert!(controller.state().draft.is_empty());

    tokio::time::advance(Duration::from_millis(500)).await;
    assert_eq!(controller.process_pending_events(), 0);
    assert_eq!(controller.state().transcript.len(), 2);

    assert!(controller.next_event().await);
    assert!(start.elapsed() >= Duration::from_millis(1000));

    let transcript = &controller.state().transcript;
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[2].role, ChatRole::Bot);
    assert_eq!(transcript[2].text, respond("hi"));
    assert_eq!(transcript[2].text, CAPABILITIES_REPLY);
}

#[tokio::test]
async fn test_blank_chat_is_ignored() {
    let backend = Arc::new(MockBackend::new(vec![]));
    let mut controller = controller_with(backend, Arc::new(RecordingNotifier::default()));

    controller.set_draft("   ");
    assert!(!controller.send_draft());
    assert!(!controller.send_chat(""));

    assert_eq!(controller.state().transcript.len(), 1);
    assert_eq!(controller.state().draft, "   ");
}

#[tokio::test(start_paused = true)]
async fn test_replies_keep_send_order() {
    let backend = Arc::new(MockBackend::new(vec![]));
    let mut controller = controller_with(backend, Arc::new(RecordingNotifier::default()));

    controller.set_draft("ats tips?");
    assert!(controller.send_draft());
    tokio::time::advance(Duration::from_millis(10)).await;
    assert!(controller.send_chat("which skills?"));

    assert!(controller.next_event().await);
    assert!(controller.next_event().await);

    let texts: Vec<&str> = controller
        .state()
        .transcript
        .iter()
        .map(|m| m.text.as_str())
        .collect();
    assert_eq!(texts[1..], ["ats tips?", "which skills?", ATS_REPLY, SKILLS_REPLY]);

    let ids: Vec<i64> = controller
        .state()
        .transcript
        .iter()
        .map(|m| m.id.parse().unwrap())
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test(start_paused = true)]
async fn test_closing_chat_does_not_cancel_reply() {
    let backend = Arc::new(MockBackend::new(vec![]));
    let mut controller = controller_with(backend, Arc::new(RecordingNotifier::default()));

    controller.open_chat();
    controller.send_chat("hello");
    controller.close_chat();

    assert!(controller.next_event().await);
    assert!(!controller.state().chat_open);
    assert_eq!(controller.state().transcript.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_pending_drops_scheduled_replies() {
    let backend = Arc::new(MockBackend::new(vec![]));
    let mut controller = controller_with(backend, Arc::new(RecordingNotifier::default()));

    controller.send_chat("first");
    controller.send_chat("second");
    controller.cancel_pending();

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(controller.process_pending_events(), 0);
    assert_eq!(controller.state().transcript.len(), 3);

    // new generation still gets replies
    controller.send_chat("third");
    assert!(controller.next_event().await);
    assert_eq!(controller.state().transcript.len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_backend_chat_when_enabled() {
    let backend = Arc::new(MockBackend::new(vec![]).with_chat_reply("Use strong verbs."));
    let mut config = Config::default();
    config.chat.use_backend = true;
    config.chat.reply_delay_ms = 10;

    let mut controller = AppController::from_config(&config, backend.clone(), Arc::new(RecordingNotifier::default()));
    controller.send_chat("any tips?");
    assert!(controller.next_event().await);

    assert_eq!(backend.chat_calls.load(Ordering::SeqCst), 1);
    assert_eq!(controller.state().last_message().unwrap().text, "Use strong verbs.");
}

#[tokio::test(start_paused = true)]
async fn test_backend_chat_falls_back_to_keywords() {
    let backend = Arc::new(MockBackend::new(vec![]));
    let mut config = Config::default();
    config.chat.use_backend = true;

    let mut controller = AppController::from_config(&config, backend.clone(), Arc::new(RecordingNotifier::default()));
    controller.send_chat("ats?");
    assert!(controller.next_event().await);

    assert_eq!(backend.chat_calls.load(Ordering::SeqCst), 1);
    assert_eq!(controller.state().last_message().unwrap().text, ATS_REPLY);
}

#[tokio::test(start_paused = true)]
async fn test_offline_chat_never_calls_backend() {
    let backend = Arc::new(MockBackend::new(vec![]).with_chat_reply("remote"));
    let mut controller = AppController::from_config(
        &Config::default(),
        backend.clone(),
        Arc::new(RecordingNotifier::default()),
    );

    controller.send_chat("hello");
    assert!(controller.next_event().await);

    assert_eq!(backend.chat_calls.load(Ordering::SeqCst), 0);
    assert_eq!(controller.state().last_message().unwrap().text, CAPABILITIES_REPLY);
}

/// Scores by how much analysis text came back.
struct LengthStrategy;

impl SuggestionStrategy for LengthStrategy {
    fn suggestions(&self, resume: &ResumeData, role: JobRole) -> Vec<Suggestion> {
        vec![Suggestion::new(
            SuggestionType::Improvement,
            "Length",
            format!("{} chars for {}", resume.extracted_text.len(), role),
            Priority::Low,
        )]
    }

    fn match_score(&self, resume: &ResumeData, _role: JobRole) -> MatchScore {
        MatchScore {
            percent: resume.extracted_text.len().min(100) as u8,
            label: "Length".to_string(),
            summary: String::new(),
        }
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

#[tokio::test]
async fn test_custom_strategy_replaces_placeholder() {
    let backend = Arc::new(MockBackend::new(vec![Reply::Json(json!({ "analysis": "twelve chars" }))]));
    let mut controller = controller_with(backend, Arc::new(RecordingNotifier::default()))
        .with_strategy(Arc::new(LengthStrategy));

    controller.select_role(JobRole::ProductManager);
    controller.upload_file(pdf("pm.pdf")).await.unwrap();

    assert_eq!(controller.strategy_name(), "length");
    assert_eq!(controller.state().suggestions.len(), 1);
    assert_eq!(controller.state().suggestions[0].message, "12 chars for Product Manager");
    assert_eq!(controller.match_score().unwrap().percent, 12);
}
