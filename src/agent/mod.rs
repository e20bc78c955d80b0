pub mod error;
pub mod events;
pub mod history;
pub mod mock;
pub mod runner;
pub mod session;

pub use error::AgentError;
pub use events::*;
pub use history::{HistoryError, SessionHistory, StepRecord};
pub use mock::{MockAgentRunner, MockConfig, MockStep};
pub use runner::{AgentHandle, AgentRunner, Session};
pub use session::SessionId;
