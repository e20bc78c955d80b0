//! Agent runner seam and session driver
//!
//! The browser/LLM collaborator lives behind [`AgentRunner`]: starting a run
//! yields an [`AgentHandle`] whose channel delivers step events until the
//! run settles. [`Session`] drives that feed into a [`SessionHistory`] and,
//! when configured with an output path, hands the finished history to the
//! GIF exporter exactly once.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::agent::error::AgentError;
use crate::agent::events::AgentEvent;
use crate::agent::history::SessionHistory;
use crate::agent::session::SessionId;
use crate::config::SessionConfig;
use crate::export::{export_history_gif, GifOutcome};

/// Handle to a running agent
pub struct AgentHandle {
    /// Receiver for agent events
    pub events: mpsc::Receiver<AgentEvent>,
    /// Current session ID (may be set after the init event)
    pub session_id: Option<SessionId>,
}

impl AgentHandle {
    pub fn new(events: mpsc::Receiver<AgentEvent>) -> Self {
        Self {
            events,
            session_id: None,
        }
    }

    pub fn set_session_id(&mut self, session_id: SessionId) {
        self.session_id = Some(session_id);
    }
}

/// Trait for collaborators that execute agent steps and emit events
#[async_trait]
pub trait AgentRunner: Send + Sync {
    /// Short identifier for logs (e.g. "browser", "mock")
    fn name(&self) -> &'static str;

    /// Start the agent with the given configuration
    async fn start(&self, config: SessionConfig) -> Result<AgentHandle, AgentError>;

    /// Check if the collaborator is available on this host
    fn is_available(&self) -> bool {
        true
    }
}

/// One agent run: owns the history and the teardown export
pub struct Session {
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Drive the runner to completion and return the recorded history
    ///
    /// Consumes step events until a conclusive done step, the step limit, or
    /// channel close. If `generate_gif` is set, export runs exactly once
    /// after the step feed has settled; this includes early completion with
    /// fewer steps than the cap. A fatal agent error aborts the run without
    /// exporting.
    pub async fn run(&self, runner: &dyn AgentRunner) -> Result<SessionHistory, AgentError> {
        tracing::info!(
            runner = runner.name(),
            task = %self.config.task,
            max_steps = self.config.max_steps,
            "starting agent run"
        );

        let handle = runner.start(self.config.clone()).await?;
        let AgentHandle {
            mut events,
            mut session_id,
        } = handle;

        let mut history = SessionHistory::new();

        while let Some(event) = events.recv().await {
            match event {
                AgentEvent::SessionInit(init) => {
                    tracing::debug!(session_id = %init.session_id, model = ?init.model, "session initialized");
                    session_id = Some(init.session_id);
                }
                AgentEvent::StepStarted(step) => {
                    tracing::trace!(index = step.index, "step started");
                }
                AgentEvent::StepCompleted(step) => {
                    let done = step.outcome.is_done;
                    let record = history.append(step.outcome, step.screenshot);
                    tracing::debug!(
                        index = record.index,
                        action = %record.outcome.action,
                        has_screenshot = record.screenshot.is_some(),
                        "step completed"
                    );
                    if done {
                        break;
                    }
                    if history.len() >= self.config.max_steps {
                        tracing::warn!(
                            max_steps = self.config.max_steps,
                            "reached step limit before a done step"
                        );
                        break;
                    }
                }
                AgentEvent::Error(err) => {
                    if err.is_fatal {
                        return Err(AgentError::Fatal(err.message));
                    }
                    tracing::warn!(message = %err.message, "agent reported a recoverable error");
                }
            }
        }

        tracing::info!(
            session_id = ?session_id.as_ref().map(SessionId::as_str),
            steps = history.len(),
            done = history.is_done(),
            "agent run settled"
        );

        if let Some(path) = &self.config.generate_gif {
            match export_history_gif(&history, path, &self.config.gif)? {
                GifOutcome::Written { frames } => {
                    tracing::info!(path = %path.display(), frames, "session gif written");
                }
                GifOutcome::Skipped => {
                    tracing::info!(path = %path.display(), "session gif skipped, no real frames");
                }
            }
        }

        Ok(history)
    }
}
