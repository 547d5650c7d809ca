// config.rs — Notifier configuration and the sink constructor registry.
//
// The host owns the config lifecycle: load at startup, save on update. At
// dispatch time the config is only ever seen as a read-only snapshot of
// already-built sinks.
//
// Sink construction is an explicit, statically compiled lookup: each sink
// kind registers a constructor function, and SinkRegistry::build resolves
// config entries against that map. Malformed parameters fail here — on the
// host's save path — never during dispatch.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::file::FileNotifier;
use crate::http::HttpNotifier;
use crate::notifier::Notifier;

/// One configured sink: its kind, enable flag, and kind-specific parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkEntry {
    /// Registry key selecting the constructor, e.g. "http" or "file".
    pub kind: String,

    /// Disabled sinks stay in the config but are excluded from dispatch.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Parameters interpreted by the sink's constructor.
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

fn default_enabled() -> bool {
    true
}

/// The ordered sink list the host persists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Configured sinks, in persisted order. Dispatch order is decided by
    /// each sink's ordinal, not by position here.
    #[serde(default, rename = "notifier")]
    pub notifiers: Vec<SinkEntry>,
}

impl NotifierConfig {
    /// Load a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }

    /// Save as TOML, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let raw = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, raw).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Constructor for one sink kind. Receives the full entry so it can honor
/// the enable flag alongside its own parameters.
pub type SinkFactory = fn(&SinkEntry) -> Result<Box<dyn Notifier>, ConfigError>;

/// Statically compiled map from configuration kind to sink constructor.
///
/// Hosts register additional kinds at process start; nothing is discovered
/// at runtime.
pub struct SinkRegistry {
    factories: BTreeMap<String, SinkFactory>,
}

impl SinkRegistry {
    /// A registry with no constructors.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// The built-in sinks: "http" and "file".
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("http", HttpNotifier::from_entry);
        registry.register("file", FileNotifier::from_entry);
        registry
    }

    /// Register a constructor for `kind`, replacing any previous one.
    pub fn register(&mut self, kind: impl Into<String>, factory: SinkFactory) {
        self.factories.insert(kind.into(), factory);
    }

    /// Materialize every configured sink, in config order.
    ///
    /// Fails on the first unknown kind or malformed parameter set, which is
    /// how configuration errors surface at save time.
    pub fn build(&self, config: &NotifierConfig) -> Result<Vec<Box<dyn Notifier>>, ConfigError> {
        config
            .notifiers
            .iter()
            .map(|entry| {
                let factory = self
                    .factories
                    .get(&entry.kind)
                    .ok_or_else(|| ConfigError::UnknownKind(entry.kind.clone()))?;
                factory(entry)
            })
            .collect()
    }
}

/// Deserialize a sink's typed parameters out of a config entry.
///
/// Shared by the built-in constructors and available to host-registered
/// ones.
pub fn typed_params<T: DeserializeOwned>(entry: &SinkEntry) -> Result<T, ConfigError> {
    serde_json::from_value(serde_json::Value::Object(entry.params.clone())).map_err(|source| {
        ConfigError::InvalidParams {
            kind: entry.kind.clone(),
            source,
        }
    })
}
