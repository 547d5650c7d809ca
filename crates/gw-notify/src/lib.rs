//! # gw-notify
//!
//! The notifier subsystem: an ordered chain of independently-configured
//! sinks whose individual failures never affect sibling sinks or the host
//! build.
//!
//! - [`Notifier`] is the single sink trait (enabled, ordinal, id, notify).
//! - [`NotifierConfig`] is the host-persisted sink list; [`SinkRegistry`]
//!   turns it into live sinks through statically registered constructors.
//! - [`dispatch`] invokes enabled sinks in ordinal order, isolating errors
//!   and panics per sink.
//! - [`HttpNotifier`] is the reference transport; [`FileNotifier`] appends
//!   events as JSONL.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod file;
pub mod http;
pub mod notifier;

pub use config::{typed_params, NotifierConfig, SinkEntry, SinkFactory, SinkRegistry};
pub use dispatch::dispatch;
pub use error::{ConfigError, NotifyError};
pub use file::{FileNotifier, FileNotifierConfig};
pub use http::{HttpNotifier, HttpNotifierConfig};
pub use notifier::{ordered, Notifier, DEFAULT_ORDINAL};
