//! Application controller: the only code that mutates session state

use crate::backend::{AnalysisResult, Backend};
use crate::config::{Config, PDF_MIME_TYPE};
use crate::error::{Result, ScreenerError};
use crate::input::UploadFile;
use crate::screening::chat::{BackendResponder, ChatResponder, KeywordResponder};
use crate::screening::models::{JobRole, MatchScore, ResumeData};
use crate::screening::suggestions::{PlaceholderStrategy, SuggestionStrategy};
use crate::session::state::{ChatRole, SessionState};
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// User-visible, blocking error surface.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Work finished outside the controller, queued until the controller applies it.
#[derive(Debug)]
pub enum ControllerEvent {
    BotReply {
        generation: u64,
        text: String,
    },
    AnalysisFinished {
        upload: u64,
        file_name: String,
        outcome: Result<AnalysisResult>,
    },
}

pub struct AppController {
    state: SessionState,
    backend: Arc<dyn Backend>,
    strategy: Arc<dyn SuggestionStrategy>,
    responder: Arc<dyn ChatResponder>,
    notifier: Arc<dyn Notifier>,
    accepted_mime_type: String,
    reply_delay: Duration,
    events_tx: mpsc::UnboundedSender<ControllerEvent>,
    events_rx: mpsc::UnboundedReceiver<ControllerEvent>,
    pending: Vec<JoinHandle<()>>,
    generation: u64,
    next_upload: u64,
    analyses_in_flight: usize,
}

impl AppController {
    pub fn new(backend: Arc<dyn Backend>, notifier: Arc<dyn Notifier>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: SessionState::new(),
            backend,
            strategy: Arc::new(PlaceholderStrategy),
            responder: Arc::new(KeywordResponder),
            notifier,
            accepted_mime_type: PDF_MIME_TYPE.to_string(),
            reply_delay: DEFAULT_REPLY_DELAY,
            events_tx,
            events_rx,
            pending: Vec::new(),
            generation: 0,
            next_upload: 0,
            analyses_in_flight: 0,
        }
    }

    /// Controller wired from the config file: accepted upload type, reply
    /// delay and, when `chat.use_backend` is set, backend chat replies.
    pub fn from_config(config: &Config, backend: Arc<dyn Backend>, notifier: Arc<dyn Notifier>) -> Self {
        let controller = Self::new(backend.clone(), notifier)
            .with_accepted_mime_type(config.upload.allowed_mime_type.clone())
            .with_reply_delay(Duration::from_millis(config.chat.reply_delay_ms));

        if config.chat.use_backend {
            controller.with_responder(Arc::new(BackendResponder::new(backend)))
        } else {
            controller
        }
    }

    pub fn with_strategy(mut self, strategy: Arc<dyn SuggestionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_responder(mut self, responder: Arc<dyn ChatResponder>) -> Self {
        self.responder = responder;
        self
    }

    pub fn with_accepted_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.accepted_mime_type = mime_type.into();
        self
    }

    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_analyzing(&self) -> bool {
        self.state.analyzing
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Placeholder score, available once both a resume and a role are set.
    pub fn match_score(&self) -> Option<MatchScore> {
        match (&self.state.resume, self.state.selected_role) {
            (Some(resume), Some(role)) => Some(self.strategy.match_score(resume, role)),
            _ => None,
        }
    }

    pub fn select_role(&mut self, role: JobRole) {
        info!("Selected job role: {}", role);
        self.state.selected_role = Some(role);
        if self.state.resume.is_some() {
            self.regenerate_suggestions();
        }
    }

    /// Back to "no role selected". Suggestions are role-specific, so they go too.
    pub fn clear_role(&mut self) {
        self.state.selected_role = None;
        self.state.suggestions.clear();
    }

    /// Validate the file and start its analysis in the background.
    ///
    /// Returns the upload id carried by the matching
    /// `ControllerEvent::AnalysisFinished`. The in-flight flag stays set until
    /// that event is applied. A rejected file raises one alert and never
    /// reaches the backend.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime.
    pub fn begin_upload(&mut self, file: UploadFile) -> Result<u64> {
        if !file.has_mime_type(&self.accepted_mime_type) {
            self.notifier.alert(&self.rejection_message());
            return Err(ScreenerError::Validation(format!(
                "{} is {}, expected {}",
                file.file_name, file.mime_type, self.accepted_mime_type
            )));
        }

        self.next_upload += 1;
        let upload = self.next_upload;
        self.analyses_in_flight += 1;
        self.state.analyzing = true;
        debug!("Upload {} of {} started", upload, file.file_name);

        let backend = self.backend.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = backend.analyze(&file).await;
            // receiver lives as long as the controller
            let _ = tx.send(ControllerEvent::AnalysisFinished {
                upload,
                file_name: file.file_name,
                outcome,
            });
        });

        Ok(upload)
    }

    /// Upload a resume and wait until its analysis is applied.
    ///
    /// Chat replies that land in the meantime are applied as they arrive. Any
    /// failure raises exactly one alert and leaves the previous resume and
    /// suggestions in place.
    pub async fn upload_file(&mut self, file: UploadFile) -> Result<()> {
        let upload = self.begin_upload(file)?;

        while let Some(event) = self.events_rx.recv().await {
            match event {
                ControllerEvent::AnalysisFinished {
                    upload: finished,
                    file_name,
                    outcome,
                } if finished == upload => return self.finish_analysis(file_name, outcome),
                other => {
                    self.apply(other);
                }
            }
        }

        Err(ScreenerError::Request("Analyze failed"))
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.state.draft = text.into();
    }

    pub fn open_chat(&mut self) {
        self.state.chat_open = true;
    }

    /// Hides the panel only; replies already scheduled still land.
    pub fn close_chat(&mut self) {
        self.state.chat_open = false;
    }

    /// Send the current draft. Same runtime requirement as `send_chat`.
    pub fn send_draft(&mut self) -> bool {
        let draft = std::mem::take(&mut self.state.draft);
        let sent = self.send_chat(&draft);
        if !sent {
            self.state.draft = draft;
        }
        sent
    }

    /// Append the user message now and schedule the bot reply after the
    /// reply delay. Blank input is ignored. Returns whether a message was sent.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime.
    pub fn send_chat(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        self.state.push_message(ChatRole::User, text);
        self.state.draft.clear();

        let deadline = tokio::time::Instant::now() + self.reply_delay;
        let responder = self.responder.clone();
        let tx = self.events_tx.clone();
        let generation = self.generation;
        let message = text.to_string();

        self.pending.retain(|handle| !handle.is_finished());
        self.pending.push(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let text = responder.reply(&message).await;
            // receiver lives as long as the controller
            let _ = tx.send(ControllerEvent::BotReply { generation, text });
        }));

        true
    }

    /// Abort every scheduled reply. Nothing in the default flows calls this.
    pub fn cancel_pending(&mut self) {
        for handle in self.pending.drain(..) {
            handle.abort();
        }
        self.generation += 1;
        debug!("Cancelled pending replies, now at generation {}", self.generation);
    }

    /// Apply every event that is already queued, without waiting.
    pub fn process_pending_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.apply(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next event and apply it. Returns `false` if it was a stale
    /// reply or a failed analysis.
    pub async fn next_event(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => self.apply(event),
            None => false,
        }
    }

    fn apply(&mut self, event: ControllerEvent) -> bool {
        match event {
            ControllerEvent::BotReply { generation, text } => {
                if generation != self.generation {
                    debug!("Ignoring stale reply from generation {}", generation);
                    return false;
                }
                self.state.push_message(ChatRole::Bot, text);
                true
            }
            ControllerEvent::AnalysisFinished {
                file_name, outcome, ..
            } => self.finish_analysis(file_name, outcome).is_ok(),
        }
    }

    fn finish_analysis(&mut self, file_name: String, outcome: Result<AnalysisResult>) -> Result<()> {
        self.analyses_in_flight = self.analyses_in_flight.saturating_sub(1);
        self.state.analyzing = self.analyses_in_flight > 0;

        match outcome {
            Ok(result) => {
                let resume = ResumeData::from_analysis(file_name, result.analysis);
                info!("Analysis stored for {}", resume.file_name);
                self.state.resume = Some(resume);
                if self.state.selected_role.is_some() {
                    self.regenerate_suggestions();
                }
                Ok(())
            }
            Err(e) => {
                error!("Resume analysis of {} failed: {}", file_name, e);
                self.notifier.alert(&format!(
                    "Failed to analyze resume. Is the backend running on {}?",
                    self.backend.base_url()
                ));
                Err(e)
            }
        }
    }

    fn rejection_message(&self) -> String {
        if self.accepted_mime_type.eq_ignore_ascii_case(PDF_MIME_TYPE) {
            "Please upload a PDF file".to_string()
        } else {
            format!("Please upload a {} file", self.accepted_mime_type)
        }
    }

    fn regenerate_suggestions(&mut self) {
        if let (Some(resume), Some(role)) = (&self.state.resume, self.state.selected_role) {
            self.state.suggestions = self.strategy.suggestions(resume, role);
            debug!("Generated {} suggestions for {}", self.state.suggestions.len(), role);
        }
    }
}
