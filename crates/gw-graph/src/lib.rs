//! # gw-graph
//!
//! The flow-graph node model and the approval-gate detector.
//!
//! The host build records execution progress as an append-only DAG of
//! [`FlowNode`]s, pushed to observers one at a time, in execution order.
//! [`GateDetector::classify`] inspects a single newly-arrived node (plus its
//! immediate parents) and decides whether it marks a gate starting, being
//! approved, being aborted, or nothing of interest — no history replay.

pub mod detector;
pub mod gate;
pub mod node;

pub use detector::{GateDetector, GateTransition, DEFAULT_GATE_STEP_NAME};
pub use gate::GateArguments;
pub use node::{FlowNode, TerminationCause};
