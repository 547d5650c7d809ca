// node.rs — Flow-graph node model.
//
// One FlowNode per recorded execution step. The graph is append-only: the
// host pushes each node exactly once, in execution order, and never mutates
// a node after reporting it. A node carries its immediate parents, which is
// all the structural context gate detection needs.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Why a terminated step ended abnormally.
///
/// Absent on a step that completed normally. For a gate step, absence after
/// termination means the gate was approved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationCause {
    /// A human explicitly declined the gate. `user` is `None` when the
    /// rejection was system-initiated (e.g., a timeout with no attributed
    /// user).
    Rejected { user: Option<String> },

    /// Any other interruption — timeout, build abort, infrastructure
    /// failure. Must never be reported as an abort of the gate itself.
    Other { reason: String },
}

/// One unit of recorded execution progress in the build's flow graph.
///
/// Owned by the host and read-only to this system.
#[derive(Debug, Clone)]
pub struct FlowNode {
    /// Host-assigned node identifier.
    pub id: String,

    /// The step function name displayed for this node (e.g. "sh", "input").
    /// Gate detection matches on this, never on position.
    pub display_name: String,

    /// Arguments the step was invoked with.
    pub arguments: BTreeMap<String, serde_json::Value>,

    /// Immediate predecessors. Multiple parents occur at parallel merges.
    pub parents: Vec<Arc<FlowNode>>,

    /// Terminal-error descriptor, set once the step failed or was
    /// interrupted.
    pub error: Option<TerminationCause>,

    /// Parameters submitted when a gate step was approved. Only ever present
    /// on a gate node, and only after the gate terminated.
    pub submitted: Option<BTreeMap<String, serde_json::Value>>,
}

impl FlowNode {
    /// Create a node with no parents, arguments, or error.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            arguments: BTreeMap::new(),
            parents: Vec::new(),
            error: None,
            submitted: None,
        }
    }

    /// Add a step argument and return self (builder pattern).
    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Add an immediate predecessor and return self.
    pub fn with_parent(mut self, parent: Arc<FlowNode>) -> Self {
        self.parents.push(parent);
        self
    }

    /// Set the terminal-error descriptor and return self.
    pub fn with_error(mut self, cause: TerminationCause) -> Self {
        self.error = Some(cause);
        self
    }

    /// Record a submitted approval parameter and return self.
    pub fn with_submitted(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.submitted
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}
