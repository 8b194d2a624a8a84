//! Decoding task batches from JSON.
//!
//! Two payload shapes are accepted:
//!
//! - a bare array of task records: `[{"id": "1", "title": "..."}, ...]`
//! - a request envelope: `{"tasks": [...], "strategy": "high_impact"}`

use crate::domain::{Strategy, Task};
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Path value meaning "read from stdin"
pub const STDIN_PATH: &str = "-";

/// A decoded batch of tasks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskBatch {
    /// The task records, in input order
    pub tasks: Vec<Task>,

    /// Strategy requested by the payload itself, if any
    pub strategy: Option<Strategy>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Bare(Vec<Task>),
    Envelope {
        tasks: Vec<Task>,
        #[serde(default)]
        strategy: Option<Strategy>,
    },
}

impl TaskBatch {
    /// Decode a batch from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Json`] when the payload is neither a
    /// task array nor a request envelope.
    pub fn from_json(content: &str) -> Result<Self> {
        let batch = match serde_json::from_str::<Payload>(content)? {
            Payload::Bare(tasks) => Self {
                tasks,
                strategy: None,
            },
            Payload::Envelope { tasks, strategy } => Self { tasks, strategy },
        };
        tracing::debug!(tasks = batch.tasks.len(), "Decoded task batch");
        Ok(batch)
    }

    /// Read a batch from any reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the payload cannot be decoded.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_json(&content)
    }

    /// Read a batch from a file, or from stdin when `path` is `None` or `-`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or decoded.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path != Path::new(STDIN_PATH) => {
                tracing::debug!(path = %path.display(), "Reading tasks from file");
                Self::from_json(&fs::read_to_string(path)?)
            }
            _ => {
                tracing::debug!("Reading tasks from stdin");
                Self::from_reader(io::stdin().lock())
            }
        }
    }
}
