// detector.rs — Gate transition classification.
//
// Classifies one newly-arrived node using only local structure: its own
// display name, its immediate parents, and the origin gate node's terminal
// metadata. A gate start is recognized on the gate node itself; a gate
// termination is recognized only when a successor of the gate node arrives,
// so a still-pending gate never reports termination.
//
// "Not a gate" and "unrelated failure" are ordinary classification results,
// not error paths — most nodes in a build are neither gates nor gate
// successors.

use std::collections::BTreeMap;

use crate::gate::GateArguments;
use crate::node::{FlowNode, TerminationCause};

/// Step name recognized as an approval gate unless the host overrides it.
pub const DEFAULT_GATE_STEP_NAME: &str = "input";

/// The five-way classification of an arriving node.
#[derive(Debug, Clone, PartialEq)]
pub enum GateTransition {
    /// Neither a gate node nor the successor of one. The common case.
    NotAGate,

    /// The node itself is a gate step: the gate is now pending.
    Started { arguments: GateArguments },

    /// A successor of a gate node that terminated without error: approved.
    /// Carries the origin gate's arguments and its submitted parameters.
    Approved {
        arguments: GateArguments,
        submitted: BTreeMap<String, serde_json::Value>,
    },

    /// A successor of a gate node that was explicitly rejected.
    Aborted {
        arguments: GateArguments,
        rejector: Option<String>,
    },

    /// A successor of a gate node that terminated for an unrelated reason
    /// (timeout, build abort). Produces no event; distinct from `Aborted`.
    UnrelatedFailure,
}

/// Classifies arriving flow nodes against a configured gate step name.
#[derive(Debug, Clone)]
pub struct GateDetector {
    gate_step_name: String,
}

impl GateDetector {
    /// Create a detector recognizing `gate_step_name` as the gate step.
    pub fn new(gate_step_name: impl Into<String>) -> Self {
        Self {
            gate_step_name: gate_step_name.into(),
        }
    }

    /// The step name this detector matches on.
    pub fn gate_step_name(&self) -> &str {
        &self.gate_step_name
    }

    /// Classify a newly-arrived node.
    ///
    /// Matching is by display name only, independent of parent position —
    /// a parallel-merge node with several parents is scanned in full.
    pub fn classify(&self, node: &FlowNode) -> GateTransition {
        if node.display_name == self.gate_step_name {
            tracing::debug!("node {} starts a gate", node.id);
            return GateTransition::Started {
                arguments: GateArguments::from_node_arguments(&node.arguments),
            };
        }

        let Some(origin) = node
            .parents
            .iter()
            .find(|parent| parent.display_name == self.gate_step_name)
        else {
            return GateTransition::NotAGate;
        };

        let arguments = GateArguments::from_node_arguments(&origin.arguments);
        match &origin.error {
            None => GateTransition::Approved {
                arguments,
                submitted: origin.submitted.clone().unwrap_or_default(),
            },
            Some(TerminationCause::Rejected { user }) => GateTransition::Aborted {
                arguments,
                rejector: user.clone(),
            },
            Some(TerminationCause::Other { reason }) => {
                tracing::debug!(
                    "gate node {} terminated for an unrelated reason: {}",
                    origin.id,
                    reason
                );
                GateTransition::UnrelatedFailure
            }
        }
    }
}

impl Default for GateDetector {
    fn default() -> Self {
        Self::new(DEFAULT_GATE_STEP_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn gate_node(id: &str) -> FlowNode {
        FlowNode::new(id, "input")
            .with_argument("id", "deploy-gate")
            .with_argument("submitter", "team-lead")
            .with_argument("submitterParameter", "releaseApprover")
    }

    #[test]
    fn plain_node_is_not_a_gate() {
        let detector = GateDetector::default();
        let parent = Arc::new(FlowNode::new("1", "sh"));
        let node = FlowNode::new("2", "echo").with_parent(parent);

        assert_eq!(detector.classify(&node), GateTransition::NotAGate);
    }

    #[test]
    fn gate_node_classifies_as_started_with_arguments() {
        let detector = GateDetector::default();
        let transition = detector.classify(&gate_node("2"));

        match transition {
            GateTransition::Started { arguments } => {
                assert_eq!(arguments.id.as_deref(), Some("deploy-gate"));
                assert_eq!(arguments.submitter.as_deref(), Some("team-lead"));
                assert_eq!(arguments.submitter_parameter.as_deref(), Some("releaseApprover"));
            }
            other => panic!("expected Started, got {:?}", other),
        }
    }

    #[test]
    fn successor_of_clean_gate_is_approved() {
        let detector = GateDetector::default();
        let origin = Arc::new(gate_node("2").with_submitted("releaseApprover", "alice"));
        let node = FlowNode::new("3", "sh").with_parent(origin);

        match detector.classify(&node) {
            GateTransition::Approved { arguments, submitted } => {
                assert_eq!(arguments.id.as_deref(), Some("deploy-gate"));
                assert_eq!(submitted["releaseApprover"], "alice");
            }
            other => panic!("expected Approved, got {:?}", other),
        }
    }

    #[test]
    fn successor_of_rejected_gate_is_aborted_with_rejector() {
        let detector = GateDetector::default();
        let origin = Arc::new(gate_node("2").with_error(TerminationCause::Rejected {
            user: Some("alice".into()),
        }));
        let node = FlowNode::new("3", "sh").with_parent(origin);

        match detector.classify(&node) {
            GateTransition::Aborted { rejector, .. } => {
                assert_eq!(rejector.as_deref(), Some("alice"));
            }
            other => panic!("expected Aborted, got {:?}", other),
        }
    }

    #[test]
    fn system_initiated_rejection_carries_no_user() {
        let detector = GateDetector::default();
        let origin = Arc::new(gate_node("2").with_error(TerminationCause::Rejected { user: None }));
        let node = FlowNode::new("3", "sh").with_parent(origin);

        match detector.classify(&node) {
            GateTransition::Aborted { rejector, .. } => assert!(rejector.is_none()),
            other => panic!("expected Aborted, got {:?}", other),
        }
    }

    #[test]
    fn unrelated_termination_is_not_an_abort() {
        let detector = GateDetector::default();
        let origin = Arc::new(gate_node("2").with_error(TerminationCause::Other {
            reason: "build aborted".into(),
        }));
        let node = FlowNode::new("3", "sh").with_parent(origin);

        assert_eq!(detector.classify(&node), GateTransition::UnrelatedFailure);
    }

    #[test]
    fn parallel_merge_scans_all_parents() {
        let detector = GateDetector::default();
        let branch_a = Arc::new(FlowNode::new("4", "sh"));
        let branch_b = Arc::new(FlowNode::new("5", "echo"));
        let origin = Arc::new(gate_node("6"));
        // Gate parent last: matching must be position-independent.
        let node = FlowNode::new("7", "sh")
            .with_parent(branch_a)
            .with_parent(branch_b)
            .with_parent(origin);

        assert!(matches!(
            detector.classify(&node),
            GateTransition::Approved { .. }
        ));
    }

    #[test]
    fn custom_gate_step_name_is_honored() {
        let detector = GateDetector::new("approval");
        let node = FlowNode::new("2", "approval");

        assert!(matches!(
            detector.classify(&node),
            GateTransition::Started { .. }
        ));
        assert_eq!(
            detector.classify(&FlowNode::new("3", "input")),
            GateTransition::NotAGate
        );
    }

    #[test]
    fn gate_without_successor_never_reports_termination() {
        // Only nodes arriving *after* the gate can classify its termination;
        // the gate node itself always classifies as Started.
        let detector = GateDetector::default();
        let pending = gate_node("2");

        assert!(matches!(
            detector.classify(&pending),
            GateTransition::Started { .. }
        ));
    }
}
