use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::export::GifSettings;

/// Configuration for one agent run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Task the agent is asked to carry out
    pub task: String,

    /// Hard cap on the number of steps before the run is cut off
    pub max_steps: usize,

    /// Whether the driver captures screenshots for the model to look at.
    /// Filtering recognizes both placeholder variants regardless of this
    /// flag.
    pub use_vision: bool,

    /// Destination for the session GIF. When unset, no export is attempted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_gif: Option<PathBuf>,

    /// Timing and loop policy for the generated GIF
    #[serde(default)]
    pub gif: GifSettings,
}

impl SessionConfig {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            max_steps: 100,
            use_vision: true,
            generate_gif: None,
            gif: GifSettings::default(),
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_vision(mut self, use_vision: bool) -> Self {
        self.use_vision = use_vision;
        self
    }

    pub fn with_gif_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.generate_gif = Some(path.into());
        self
    }

    pub fn with_gif_settings(mut self, settings: GifSettings) -> Self {
        self.gif = settings;
        self
    }
}
