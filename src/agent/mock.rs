//! Mock agent runner for deterministic testing
//!
//! Implements the `AgentRunner` trait to emit a scripted sequence of step
//! events without driving a real browser or model. Use this for integration
//! tests that need to verify history accumulation and GIF export behavior.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::agent::error::AgentError;
use crate::agent::events::{
    AgentEvent, SessionInitEvent, StepCompletedEvent, StepOutcome, StepStartedEvent,
};
use crate::agent::runner::{AgentHandle, AgentRunner};
use crate::agent::session::SessionId;
use crate::config::SessionConfig;
use crate::screenshot::Screenshot;

/// One scripted step: an outcome plus the capture the driver would take
#[derive(Debug, Clone)]
pub struct MockStep {
    pub outcome: StepOutcome,
    pub screenshot: Option<Screenshot>,
}

impl MockStep {
    pub fn new(outcome: StepOutcome) -> Self {
        Self {
            outcome,
            screenshot: None,
        }
    }

    pub fn with_screenshot(mut self, screenshot: Screenshot) -> Self {
        self.screenshot = Some(screenshot);
        self
    }
}

/// Configuration for mock agent behavior
#[derive(Clone, Default)]
pub struct MockConfig {
    /// Steps to emit when started
    pub steps: Vec<MockStep>,
    /// Model name reported in the init event
    pub model: Option<String>,
    /// Delay between events (simulates a real step loop)
    pub event_delay: Duration,
    /// Whether start() should fail
    pub fail_on_start: bool,
}

impl MockConfig {
    /// Configure the steps to emit when the agent is started
    pub fn with_steps(mut self, steps: Vec<MockStep>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Configure delay between emitted events (default: Duration::ZERO)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.event_delay = delay;
        self
    }

    /// Configure the mock to fail on start
    pub fn failing(mut self) -> Self {
        self.fail_on_start = true;
        self
    }
}

/// Mock agent runner for testing
///
/// Emits the scripted steps and captures every start configuration for
/// later verification in tests.
pub struct MockAgentRunner {
    config: MockConfig,
    captured_configs: Arc<Mutex<Vec<SessionConfig>>>,
}

impl MockAgentRunner {
    pub fn new() -> Self {
        Self {
            config: MockConfig::default(),
            captured_configs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure the mock with a MockConfig
    pub fn with_config(mut self, config: MockConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure steps to emit (convenience method)
    pub fn with_steps(mut self, steps: Vec<MockStep>) -> Self {
        self.config.steps = steps;
        self
    }

    /// Get captured start configurations for assertions
    pub fn captured_configs(&self) -> Vec<SessionConfig> {
        self.captured_configs.lock().clone()
    }

    /// Get the last captured config (most recent start call)
    pub fn last_config(&self) -> Option<SessionConfig> {
        self.captured_configs.lock().last().cloned()
    }
}

impl Default for MockAgentRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentRunner for MockAgentRunner {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn start(&self, config: SessionConfig) -> Result<AgentHandle, AgentError> {
        self.captured_configs.lock().push(config);

        if self.config.fail_on_start {
            return Err(AgentError::ProcessSpawnFailed);
        }

        let (tx, rx) = mpsc::channel(32);
        let steps = self.config.steps.clone();
        let model = self.config.model.clone();
        let delay = self.config.event_delay;

        tokio::spawn(async move {
            let init = AgentEvent::SessionInit(SessionInitEvent {
                session_id: SessionId::new(),
                model,
            });
            if tx.send(init).await.is_err() {
                return;
            }

            for (index, step) in steps.into_iter().enumerate() {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                if tx
                    .send(AgentEvent::StepStarted(StepStartedEvent { index }))
                    .await
                    .is_err()
                {
                    return;
                }
                let completed = AgentEvent::StepCompleted(StepCompletedEvent {
                    outcome: step.outcome,
                    screenshot: step.screenshot,
                });
                if tx.send(completed).await.is_err() {
                    return;
                }
            }
        });

        Ok(AgentHandle::new(rx))
    }
}
