// file.rs — JSONL file sink.
//
// Appends each event as one JSON line, creating parent directories on
// demand. Useful as an always-available local sink and as a cheap audit
// trail of what was dispatched.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use gw_events::GateEvent;

use crate::config::{typed_params, SinkEntry};
use crate::error::{ConfigError, NotifyError};
use crate::notifier::{Notifier, DEFAULT_ORDINAL};

fn default_id() -> String {
    "file".to_string()
}

fn default_ordinal() -> i32 {
    DEFAULT_ORDINAL
}

/// Parameters of the file sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileNotifierConfig {
    /// The JSONL file events are appended to.
    pub path: PathBuf,

    /// Sink identifier (tie-break key).
    #[serde(default = "default_id")]
    pub id: String,

    /// Invocation priority, lower first.
    #[serde(default = "default_ordinal")]
    pub ordinal: i32,
}

/// Appends events as JSON lines to a local file.
pub struct FileNotifier {
    config: FileNotifierConfig,
    enabled: bool,
}

impl FileNotifier {
    pub fn new(config: FileNotifierConfig, enabled: bool) -> Self {
        Self { config, enabled }
    }

    /// Constructor registered under the "file" kind.
    pub fn from_entry(entry: &SinkEntry) -> Result<Box<dyn Notifier>, ConfigError> {
        let config: FileNotifierConfig = typed_params(entry)?;
        Ok(Box::new(Self::new(config, entry.enabled)))
    }
}

impl Notifier for FileNotifier {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn ordinal(&self) -> i32 {
        self.config.ordinal
    }

    fn id(&self) -> &str {
        &self.config.id
    }

    fn notify(&self, event: &GateEvent) -> Result<(), NotifyError> {
        if let Some(parent) = self.config.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.path)?;
        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }
}
