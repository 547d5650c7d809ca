//! # gw-observer
//!
//! The host-facing composition root. The host pushes each new flow node to
//! [`GateObserver::on_node`], which classifies it, resolves the owning build
//! through the host's [`RunResolver`], builds the lifecycle event, and
//! dispatches it to the current sink snapshot. `on_node` never raises to the
//! host: everything that can go wrong is logged and dropped.

pub mod observer;

pub use observer::{GateObserver, RunResolver};
