//! Event scripts: a recorded sequence of lifecycle events to replay.
//!
//! Scripts are TOML files with one `[[events]]` table per event:
//!
//! ```toml
//! [[events]]
//! kind = "request"
//!
//! [[events]]
//! kind = "succeed"
//! value = { id = 1, name = "alpha" }
//!
//! [[events]]
//! kind = "fail"
//! error = "upstream timeout"
//! ```
//!
//! Values are arbitrary JSON-compatible data. Errors are strings.

use std::path::{Path, PathBuf};

use refreshable_data::{Event, RemoteData, Resource};
use serde::Deserialize;
use serde_json::Value;

/// A resource as seen by the CLI.
pub type CliResource = Resource<String, Value>;

/// The four-state counterpart of [`CliResource`].
pub type CliRemoteData = RemoteData<String, Value>;

/// A lifecycle event as read from a script.
pub type CliEvent = Event<String, Value>;

/// Errors from loading an event script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Failed to read script {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Script contains no events")]
    Empty,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventScript {
    pub events: Vec<CliEvent>,
}

impl EventScript {
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// Apply every event in order, starting from `Absent`.
    ///
    /// Returns the state after each event.
    pub fn replay(&self) -> Vec<CliResource> {
        let mut state = CliResource::Absent;
        let mut trace = Vec::with_capacity(self.events.len());
        for (step, event) in self.events.iter().enumerate() {
            state = state.reduce(event.clone());
            tracing::debug!(
                step,
                state = %state.kind(),
                refreshing = state.is_refreshing(),
                "Replayed event"
            );
            trace.push(state.clone());
        }
        trace
    }

    /// Like [`replay`](Self::replay) but through the four-state model.
    pub fn replay_remote(&self) -> Vec<CliRemoteData> {
        self.events
            .iter()
            .scan(CliRemoteData::Absent, |state, event| {
                *state = std::mem::take(state).reduce(event.clone());
                tracing::debug!(state = %state.kind(), "Replayed event");
                Some(state.clone())
            })
            .collect()
    }
}

impl std::str::FromStr for EventScript {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let script: EventScript = toml::from_str(s)?;
        if script.events.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(script)
    }
}
