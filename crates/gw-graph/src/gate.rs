// gate.rs — Arguments carried by a gate step.
//
// A gate ("input") step declares who may resolve it and under which
// parameter name the approving user is reported back. All of these are
// optional in the pipeline definition, so every field is an Option.

use std::collections::BTreeMap;

/// Argument key for the gate's custom identifier.
pub const GATE_ID_KEY: &str = "id";
/// Argument key naming the user class authorized to resolve the gate.
pub const SUBMITTER_KEY: &str = "submitter";
/// Argument key naming the submitted parameter that carries the approver.
pub const SUBMITTER_PARAMETER_KEY: &str = "submitterParameter";

/// The recognized arguments of a gate step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateArguments {
    /// Custom id of the gate, when the pipeline supplied one.
    pub id: Option<String>,

    /// The user class authorized to resolve the gate.
    pub submitter: Option<String>,

    /// Name of the submitted parameter holding the approving user.
    pub submitter_parameter: Option<String>,
}

impl GateArguments {
    /// Extract the recognized keys from a gate node's argument map.
    ///
    /// Non-string values are ignored, matching the behavior of treating an
    /// unusable argument the same as an absent one.
    pub fn from_node_arguments(arguments: &BTreeMap<String, serde_json::Value>) -> Self {
        Self {
            id: string_argument(arguments, GATE_ID_KEY),
            submitter: string_argument(arguments, SUBMITTER_KEY),
            submitter_parameter: string_argument(arguments, SUBMITTER_PARAMETER_KEY),
        }
    }
}

fn string_argument(arguments: &BTreeMap<String, serde_json::Value>, key: &str) -> Option<String> {
    arguments
        .get(key)
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
}
