//! Screenshot payloads captured alongside agent steps
//!
//! Screenshots travel as base64-encoded PNG text, matching what browser
//! drivers put on the wire. A step without a real capture is represented as
//! `Option::None` at the store boundary; the legacy placeholder sentinels are
//! kept only so payloads from older collaborators can still be recognized
//! and filtered.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel emitted by vision-enabled runs when no capture was taken (4x4 PNG)
pub const PLACEHOLDER_VISION: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAQAAAAECAIAAAAmkwkpAAAAFElEQVR4nGP8//8/AwwwMSAB3BwAlm4DBfIlvvkAAAAASUVORK5CYII=";

/// Sentinel emitted by no-vision runs when no capture was taken
pub const PLACEHOLDER_NO_VISION: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAQAAAAECAYAAACp8Z5+AAAAE0lEQVR42mP8/5+BgYGBgYGBgQEAAP//AwMC/wE=";

/// Error type for screenshot payload handling
#[derive(Debug, Error)]
pub enum ScreenshotError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not a decodable image: {0}")]
    Image(#[from] image::ImageError),
}

/// A single captured screenshot, stored as base64-encoded PNG text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Screenshot(String);

impl Screenshot {
    /// Wrap an already base64-encoded payload
    pub fn from_base64(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    /// Encode raw PNG bytes into a payload
    pub fn from_png_bytes(bytes: &[u8]) -> Self {
        Self(BASE64.encode(bytes))
    }

    /// Legacy "no real capture" sentinel for the given vision mode
    ///
    /// Compatibility shim for collaborators that still emit sentinel bytes
    /// instead of omitting the screenshot. New code should pass `None` at the
    /// history boundary.
    pub fn placeholder(vision: bool) -> Self {
        if vision {
            Self(PLACEHOLDER_VISION.to_string())
        } else {
            Self(PLACEHOLDER_NO_VISION.to_string())
        }
    }

    /// The base64 text of the payload
    pub fn as_base64(&self) -> &str {
        &self.0
    }

    /// Decode the payload back to raw image bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ScreenshotError> {
        Ok(BASE64.decode(&self.0)?)
    }

    /// Decode the payload into an image
    pub fn decode(&self) -> Result<image::DynamicImage, ScreenshotError> {
        let bytes = self.to_bytes()?;
        Ok(image::load_from_memory(&bytes)?)
    }

    /// Whether this payload is one of the known placeholder sentinels
    ///
    /// Comparison is exact and recognizes both sentinel variants regardless
    /// of which vision mode produced the run.
    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER_VISION || self.0 == PLACEHOLDER_NO_VISION
    }
}

impl std::fmt::Display for Screenshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Screenshot({} base64 chars)", self.0.len())
    }
}
