//! # gw-events
//!
//! The gate lifecycle event model: one immutable [`GateEvent`] per detected
//! transition, built from a [`gw_graph::GateTransition`] plus the owning
//! build's [`RunContext`]. The wire field names are fixed and null fields
//! serialize explicitly — receivers distinguish null from omitted.

pub mod event;
pub mod run;

pub use event::{GateEvent, GateResult};
pub use run::RunContext;
