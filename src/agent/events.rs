use serde::{Deserialize, Serialize};

use crate::agent::session::SessionId;
use crate::screenshot::Screenshot;

/// Unified event type emitted by agent collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AgentEvent {
    /// Session initialized with session ID
    SessionInit(SessionInitEvent),

    /// Step started executing
    StepStarted(StepStartedEvent),

    /// Step finished; carries the outcome and an optional screenshot capture
    StepCompleted(StepCompletedEvent),

    /// Error event
    Error(ErrorEvent),
}

impl AgentEvent {
    /// Get a human-readable event type name for display
    pub fn event_type_name(&self) -> &'static str {
        match self {
            AgentEvent::SessionInit(_) => "SessionInit",
            AgentEvent::StepStarted(_) => "StepStarted",
            AgentEvent::StepCompleted(_) => "StepCompleted",
            AgentEvent::Error(_) => "Error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInitEvent {
    pub session_id: SessionId,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepStartedEvent {
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepCompletedEvent {
    pub outcome: StepOutcome,
    /// Capture taken after the step settled. `None` when the driver took no
    /// screenshot for this step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<Screenshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub message: String,
    pub is_fatal: bool,
}

/// Result metadata for one completed step
///
/// Opaque to the exporter; only `is_done`/`content` participate in the
/// history's terminal-state queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Human-readable description of the action taken
    pub action: String,

    /// Extracted content or final answer produced by the step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Whether the step (or the overall task, for done steps) succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    /// True for the conclusive "done" step that ends a run
    #[serde(default)]
    pub is_done: bool,

    /// Error message if the step failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepOutcome {
    /// Outcome for an ordinary completed action
    pub fn action(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            content: None,
            success: None,
            is_done: false,
            error: None,
        }
    }

    /// Conclusive outcome that terminates the run
    pub fn done(text: impl Into<String>, success: bool) -> Self {
        Self {
            action: "done".to_string(),
            content: Some(text.into()),
            success: Some(success),
            is_done: true,
            error: None,
        }
    }

    /// Outcome for a step that failed without ending the run
    pub fn failed(action: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            content: None,
            success: Some(false),
            is_done: false,
            error: Some(error.into()),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}
