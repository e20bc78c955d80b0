pub mod agent;
pub mod config;
pub mod export;
pub mod screenshot;
pub mod util;

pub use agent::{
    AgentError, AgentEvent, AgentHandle, AgentRunner, HistoryError, Session, SessionHistory,
    SessionId, StepOutcome, StepRecord,
};
pub use config::SessionConfig;
pub use export::{export_history_gif, ExportError, GifOutcome, GifSettings};
pub use screenshot::{Screenshot, ScreenshotError};
