// http.rs — Reference HTTP sink.
//
// POSTs the event as JSON (explicit nulls preserved) with a Referer header
// carrying the host root URL. Bounded timeouts; an opt-in ignore_tls mode
// disables certificate validation for trusted internal endpoints. Non-2xx
// responses and transport failures are logged with full context and
// reported as NotifyError — the dispatcher swallows them.

use std::time::Duration;

use reqwest::header;
use serde::{Deserialize, Serialize};

use gw_events::GateEvent;

use crate::config::{typed_params, SinkEntry};
use crate::error::{ConfigError, NotifyError};
use crate::notifier::Notifier;

fn default_id() -> String {
    "http".to_string()
}

fn default_ordinal() -> i32 {
    20
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Parameters of the HTTP sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpNotifierConfig {
    /// Where events are POSTed.
    pub endpoint: String,

    /// Disable TLS certificate validation. Explicitly insecure; only for
    /// trusted internal endpoints.
    #[serde(default)]
    pub ignore_tls: bool,

    /// Sink identifier (tie-break key). Distinct ids let several HTTP sinks
    /// coexist in one config.
    #[serde(default = "default_id")]
    pub id: String,

    /// Invocation priority, lower first.
    #[serde(default = "default_ordinal")]
    pub ordinal: i32,

    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Total request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// The reference HTTP notification sink.
pub struct HttpNotifier {
    config: HttpNotifierConfig,
    enabled: bool,
    client: reqwest::blocking::Client,
}

impl HttpNotifier {
    /// Build the sink, including its HTTP client.
    pub fn new(config: HttpNotifierConfig, enabled: bool) -> Result<Self, ConfigError> {
        let mut builder = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs));
        if config.ignore_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build().map_err(|err| ConfigError::Construction {
            kind: "http".into(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            config,
            enabled,
            client,
        })
    }

    /// Constructor registered under the "http" kind.
    pub fn from_entry(entry: &SinkEntry) -> Result<Box<dyn Notifier>, ConfigError> {
        let config: HttpNotifierConfig = typed_params(entry)?;
        Ok(Box::new(Self::new(config, entry.enabled)?))
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl Notifier for HttpNotifier {
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
        let body = serde_json::to_string(event)?;
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(header::REFERER, event.host_url.as_str())
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.clone())
            .send();

        match response {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(
                    "delivered {} to {}",
                    event.summary(),
                    self.config.endpoint
                );
                Ok(())
            }
            Ok(response) => {
                let status = response.status().as_u16();
                let reason = response.text().unwrap_or_default();
                tracing::warn!(
                    "endpoint {} rejected {} with status {}: payload {}, reason {}",
                    self.config.endpoint,
                    event.summary(),
                    status,
                    body,
                    reason
                );
                Err(NotifyError::Endpoint {
                    endpoint: self.config.endpoint.clone(),
                    status,
                })
            }
            Err(err) => {
                tracing::warn!(
                    "could not reach endpoint {} for {}: {}",
                    self.config.endpoint,
                    event.summary(),
                    err
                );
                Err(NotifyError::Transport(err))
            }
        }
    }
}
