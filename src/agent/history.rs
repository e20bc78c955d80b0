//! Append-only session history
//!
//! One `SessionHistory` per run: the step loop appends a record per completed
//! step, and the GIF exporter reads the ordered screenshot sequence once at
//! teardown. Records are never mutated or removed after append.
//!
//! Histories persist as JSONL (one record per line) so a run can be replayed
//! or re-rendered later with `reel render`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agent::events::StepOutcome;
use crate::screenshot::Screenshot;

/// Error type for history persistence
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error on line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },

    #[error("record on line {line} is out of order")]
    OutOfOrder { line: usize },
}

/// One agent action's recorded outcome plus optional screenshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Ordinal position in the run, assigned at append time
    pub index: usize,
    pub outcome: StepOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<Screenshot>,
    pub captured_at: DateTime<Utc>,
}

/// Ordered, append-only sequence of step records for one run
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    records: Vec<StepRecord>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed step at the end of the history
    pub fn append(&mut self, outcome: StepOutcome, screenshot: Option<Screenshot>) -> &StepRecord {
        let index = self.records.len();
        self.records.push(StepRecord {
            index,
            outcome,
            screenshot,
            captured_at: Utc::now(),
        });
        &self.records[index]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Ordered screenshot sequence for the run
    ///
    /// With `include_missing`, steps without a capture yield an explicit
    /// `None` so the sequence stays positionally aligned with the steps.
    /// Without it, capture-less steps are skipped entirely. The iterator is
    /// cheap; call again to restart.
    pub fn screenshots(
        &self,
        include_missing: bool,
    ) -> impl Iterator<Item = Option<&Screenshot>> + '_ {
        self.records
            .iter()
            .map(|record| record.screenshot.as_ref())
            .filter(move |shot| include_missing || shot.is_some())
    }

    /// Whether the run ended with a conclusive done step
    pub fn is_done(&self) -> bool {
        self.records
            .last()
            .is_some_and(|record| record.outcome.is_done)
    }

    /// Task success as reported by the done step, if the run is done
    pub fn is_successful(&self) -> Option<bool> {
        let last = self.records.last()?;
        if last.outcome.is_done {
            last.outcome.success
        } else {
            None
        }
    }

    /// Content of the terminal done step, if the run concluded
    pub fn final_result(&self) -> Option<&str> {
        let last = self.records.last()?;
        if last.outcome.is_done {
            last.outcome.content.as_deref()
        } else {
            None
        }
    }

    /// Persist the history as JSONL, one record per line
    pub fn write_jsonl(&self, path: &Path) -> Result<(), HistoryError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for record in &self.records {
            let line = serde_json::to_string(record).map_err(|source| HistoryError::Parse {
                line: record.index + 1,
                source,
            })?;
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Load a persisted history, validating record order
    pub fn read_jsonl(path: &Path) -> Result<Self, HistoryError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: StepRecord =
                serde_json::from_str(&line).map_err(|source| HistoryError::Parse {
                    line: line_no + 1,
                    source,
                })?;
            if record.index != records.len() {
                return Err(HistoryError::OutOfOrder { line: line_no + 1 });
            }
            records.push(record);
        }

        Ok(Self { records })
    }
}
