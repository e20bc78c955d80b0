//! Animated GIF export of a session's screenshots
//!
//! Runs once at session teardown. Placeholder sentinels and capture-less
//! steps are dropped first; if nothing real survives the filter, no file is
//! produced and that is a normal outcome. Otherwise every surviving frame is
//! decoded up front, encoded into a temp file in the destination directory,
//! and atomically renamed into place, so a failed export never leaves a
//! truncated artifact behind.

use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agent::history::SessionHistory;
use crate::screenshot::ScreenshotError;

/// Error type for GIF export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to decode frame {index}: {source}")]
    Frame {
        /// Position of the frame within the filtered sequence
        index: usize,
        source: ScreenshotError,
    },

    #[error("gif encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write gif: {0}")]
    Io(#[from] std::io::Error),
}

/// Timing and loop policy for the generated GIF
///
/// Deterministic: the same history and settings always produce the same
/// bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GifSettings {
    /// How long each frame is shown, in milliseconds
    pub frame_delay_ms: u32,
    /// Whether the animation loops forever
    pub repeat: bool,
}

impl Default for GifSettings {
    fn default() -> Self {
        Self {
            frame_delay_ms: 1000,
            repeat: true,
        }
    }
}

impl GifSettings {
    pub fn with_frame_delay_ms(mut self, delay_ms: u32) -> Self {
        self.frame_delay_ms = delay_ms;
        self
    }

    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }
}

/// What the exporter did for a given history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GifOutcome {
    /// Artifact written with this many frames
    Written { frames: usize },
    /// No real screenshots survived filtering; no file was created
    Skipped,
}

/// Compile the history's real screenshots into an animated GIF at `output`
///
/// Frames keep the relative order in which their steps ran. If no frame
/// survives placeholder filtering the export is skipped without touching the
/// filesystem. Decode and write failures are fatal to the whole export; the
/// destination path is never left with partial output.
pub fn export_history_gif(
    history: &SessionHistory,
    output: &Path,
    settings: &GifSettings,
) -> Result<GifOutcome, ExportError> {
    let surviving: Vec<_> = history
        .screenshots(false)
        .flatten()
        .filter(|shot| !shot.is_placeholder())
        .collect();

    if surviving.is_empty() {
        tracing::info!(
            path = %output.display(),
            steps = history.len(),
            "no real screenshots in history, skipping gif export"
        );
        return Ok(GifOutcome::Skipped);
    }

    // Decode everything before creating any file so a corrupt payload cannot
    // leave partial output.
    let mut frames: Vec<RgbaImage> = Vec::with_capacity(surviving.len());
    for (index, shot) in surviving.iter().enumerate() {
        let image = shot
            .decode()
            .map_err(|source| ExportError::Frame { index, source })?;
        frames.push(image.to_rgba8());
    }

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = tempfile::NamedTempFile::new_in(dir)?;

    let frame_count = frames.len();
    {
        let mut encoder = GifEncoder::new_with_speed(tmp.as_file(), 10);
        if settings.repeat {
            encoder.set_repeat(Repeat::Infinite)?;
        }
        for buffer in frames {
            let delay = Delay::from_numer_denom_ms(settings.frame_delay_ms, 1);
            encoder.encode_frame(Frame::from_parts(buffer, 0, 0, delay))?;
        }
    }

    tmp.persist(output).map_err(|err| ExportError::Io(err.error))?;

    tracing::info!(
        path = %output.display(),
        frames = frame_count,
        "wrote session gif"
    );
    Ok(GifOutcome::Written {
        frames: frame_count,
    })
}
