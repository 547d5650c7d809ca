// error.rs — Error types for the notifier subsystem.
//
// NotifyError is what a sink reports to the dispatcher (which logs and
// swallows it). ConfigError surfaces at configuration time — loading,
// saving, or building sinks from a config — and belongs to the host's
// save path, never to dispatch.

use std::path::PathBuf;

use thiserror::Error;

/// A sink failed to deliver an event. Isolated per sink by the dispatcher.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Event could not be serialized for the wire.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local I/O failure (file sinks).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network or TLS failure reaching the endpoint.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("endpoint {endpoint} returned status {status}")]
    Endpoint { endpoint: String, status: u16 },
}

/// Configuration could not be loaded, saved, or turned into live sinks.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No constructor registered for this sink kind.
    #[error("unknown sink kind \"{0}\"")]
    UnknownKind(String),

    /// Sink-specific parameters did not match the sink's expected shape.
    #[error("invalid parameters for sink \"{kind}\": {source}")]
    InvalidParams {
        kind: String,
        source: serde_json::Error,
    },

    /// A sink constructor failed (e.g. HTTP client could not be built).
    #[error("could not construct sink \"{kind}\": {reason}")]
    Construction { kind: String, reason: String },

    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file could not be written.
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file was not valid TOML for the expected shape.
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized back to TOML.
    #[error("config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
