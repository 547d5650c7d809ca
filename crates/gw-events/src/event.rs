// event.rs — Gate lifecycle event model and builder.
//
// One GateEvent per detected transition. The record is final at
// construction: the dispatcher hands every sink the same read-only event,
// and `result` is never recomputed downstream.
//
// Wire compatibility: the serialized field names (jenkinsUrl, jobUrl, ...)
// and the explicit-null treatment of absent optional fields are part of the
// contract with receivers and must not change.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use gw_graph::{GateArguments, GateTransition};

use crate::run::RunContext;

/// Lifecycle state carried by an event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateResult {
    /// The gate started and awaits a human decision.
    Pending,
    /// The gate was approved.
    Approved,
    /// The gate was explicitly rejected.
    Aborted,
}

impl fmt::Display for GateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateResult::Pending => write!(f, "PENDING"),
            GateResult::Approved => write!(f, "APPROVED"),
            GateResult::Aborted => write!(f, "ABORTED"),
        }
    }
}

/// One gate lifecycle transition, ready for dispatch.
///
/// None fields serialize as explicit JSON nulls — omission and null are
/// semantically distinct to receivers, so no field is ever skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GateEvent {
    /// Absolute root URL of the host.
    #[serde(rename = "jenkinsUrl")]
    pub host_url: String,

    /// URL of the job run, relative to the host root.
    #[serde(rename = "jobUrl")]
    pub job_url: String,

    /// Fully-qualified job name.
    #[serde(rename = "jobFullName")]
    pub job_full_name: String,

    /// Build number of the run.
    #[serde(rename = "buildNumber")]
    pub build_number: u32,

    /// Custom id of the gate step, when the pipeline supplied one.
    #[serde(rename = "inputId")]
    pub gate_id: Option<String>,

    /// The user class authorized to resolve the gate. Populated on PENDING
    /// only; APPROVED and ABORTED events carry an explicit null here.
    pub submitter: Option<String>,

    /// Who resolved the gate. On ABORTED this carries the *rejecting* user's
    /// name — a field reuse kept for wire compatibility with existing
    /// receivers.
    pub approver: Option<String>,

    /// Lifecycle state, final at construction.
    pub result: GateResult,
}

impl GateEvent {
    /// Event for a gate that just started: the decision is pending.
    pub fn pending(run: &RunContext, arguments: &GateArguments) -> Self {
        Self {
            host_url: run.host_url.clone(),
            job_url: run.job_url.clone(),
            job_full_name: run.job_full_name.clone(),
            build_number: run.build_number,
            gate_id: arguments.id.clone(),
            submitter: arguments.submitter.clone(),
            approver: None,
            result: GateResult::Pending,
        }
    }

    /// Event for an approved gate.
    ///
    /// The approver is looked up in the submitted-parameters map under the
    /// name given by the gate's `submitterParameter` argument; if either
    /// side is missing the approver stays null.
    pub fn approved(
        run: &RunContext,
        arguments: &GateArguments,
        submitted: &BTreeMap<String, serde_json::Value>,
    ) -> Self {
        let approver = arguments
            .submitter_parameter
            .as_deref()
            .and_then(|name| submitted.get(name))
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);

        Self {
            submitter: None,
            approver,
            result: GateResult::Approved,
            ..Self::pending(run, arguments)
        }
    }

    /// Event for an explicitly rejected gate.
    ///
    /// `rejector` is the rejecting user's display name, null when the
    /// rejection was system-initiated.
    pub fn aborted(run: &RunContext, arguments: &GateArguments, rejector: Option<String>) -> Self {
        Self {
            submitter: None,
            approver: rejector,
            result: GateResult::Aborted,
            ..Self::pending(run, arguments)
        }
    }

    /// Build the event for a classified transition, if one is warranted.
    ///
    /// `NotAGate` and `UnrelatedFailure` produce no event.
    pub fn from_transition(run: &RunContext, transition: &GateTransition) -> Option<Self> {
        match transition {
            GateTransition::NotAGate | GateTransition::UnrelatedFailure => None,
            GateTransition::Started { arguments } => Some(Self::pending(run, arguments)),
            GateTransition::Approved {
                arguments,
                submitted,
            } => Some(Self::approved(run, arguments, submitted)),
            GateTransition::Aborted {
                arguments,
                rejector,
            } => Some(Self::aborted(run, arguments, rejector.clone())),
        }
    }

    /// Short human-readable summary for log lines.
    pub fn summary(&self) -> String {
        format!(
            "{} #{} {}",
            self.job_full_name, self.build_number, self.result
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run() -> RunContext {
        RunContext::new("https://ci.example.com/", "job/foo/32/", "folder/foo", 32)
    }

    fn arguments() -> GateArguments {
        GateArguments {
            id: Some("deploy-gate".into()),
            submitter: Some("team-lead".into()),
            submitter_parameter: Some("releaseApprover".into()),
        }
    }

    #[test]
    fn pending_event_has_submitter_and_no_approver() {
        let event = GateEvent::pending(&run(), &arguments());
        assert_eq!(event.gate_id.as_deref(), Some("deploy-gate"));
        assert_eq!(event.submitter.as_deref(), Some("team-lead"));
        assert!(event.approver.is_none());
        assert_eq!(event.result, GateResult::Pending);
    }

    #[test]
    fn approved_event_resolves_approver_from_submitted_parameters() {
        let mut submitted = BTreeMap::new();
        submitted.insert("releaseApprover".to_string(), json!("alice"));
        submitted.insert("notes".to_string(), json!("lgtm"));

        let event = GateEvent::approved(&run(), &arguments(), &submitted);
        assert_eq!(event.approver.as_deref(), Some("alice"));
        assert_eq!(event.result, GateResult::Approved);
        assert!(event.submitter.is_none());
    }

    #[test]
    fn terminal_events_serialize_submitter_as_explicit_null() {
        // Only PENDING carries the submitter; APPROVED and ABORTED report it
        // as null on the wire even when the gate declared one.
        let mut submitted = BTreeMap::new();
        submitted.insert("releaseApprover".to_string(), json!("alice"));

        let approved = serde_json::to_value(GateEvent::approved(&run(), &arguments(), &submitted)).unwrap();
        assert!(approved.as_object().unwrap().contains_key("submitter"));
        assert!(approved["submitter"].is_null());

        let aborted =
            serde_json::to_value(GateEvent::aborted(&run(), &arguments(), Some("bob".into()))).unwrap();
        assert!(aborted["submitter"].is_null());
        assert_eq!(aborted["approver"], "bob");
    }

    #[test]
    fn approved_event_without_submitter_parameter_has_null_approver() {
        let mut args = arguments();
        args.submitter_parameter = None;
        let mut submitted = BTreeMap::new();
        submitted.insert("releaseApprover".to_string(), json!("alice"));

        let event = GateEvent::approved(&run(), &args, &submitted);
        assert!(event.approver.is_none());
    }

    #[test]
    fn aborted_event_carries_rejector_as_approver() {
        let event = GateEvent::aborted(&run(), &arguments(), Some("alice".into()));
        assert_eq!(event.approver.as_deref(), Some("alice"));
        assert_eq!(event.result, GateResult::Aborted);
    }

    #[test]
    fn wire_format_uses_fixed_field_names_and_explicit_nulls() {
        let event = GateEvent::pending(&run(), &arguments());
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["jenkinsUrl"], "https://ci.example.com/");
        assert_eq!(json["jobUrl"], "job/foo/32/");
        assert_eq!(json["jobFullName"], "folder/foo");
        assert_eq!(json["buildNumber"], 32);
        assert_eq!(json["inputId"], "deploy-gate");
        assert_eq!(json["result"], "PENDING");
        // Null, not omitted.
        let object = json.as_object().unwrap();
        assert!(object.contains_key("approver"));
        assert!(object["approver"].is_null());
    }

    #[test]
    fn serialization_round_trips() {
        let event = GateEvent::aborted(&run(), &arguments(), None);
        let json = serde_json::to_string(&event).unwrap();
        let restored: GateEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, restored);
    }

    #[test]
    fn from_transition_skips_non_events() {
        assert!(GateEvent::from_transition(&run(), &GateTransition::NotAGate).is_none());
        assert!(GateEvent::from_transition(&run(), &GateTransition::UnrelatedFailure).is_none());
    }

    #[test]
    fn from_transition_builds_each_lifecycle_event() {
        let started = GateTransition::Started {
            arguments: arguments(),
        };
        let event = GateEvent::from_transition(&run(), &started).unwrap();
        assert_eq!(event.result, GateResult::Pending);

        let mut submitted = BTreeMap::new();
        submitted.insert("releaseApprover".to_string(), json!("alice"));
        let approved = GateTransition::Approved {
            arguments: arguments(),
            submitted,
        };
        let event = GateEvent::from_transition(&run(), &approved).unwrap();
        assert_eq!(event.result, GateResult::Approved);
        assert_eq!(event.approver.as_deref(), Some("alice"));

        let aborted = GateTransition::Aborted {
            arguments: arguments(),
            rejector: Some("bob".into()),
        };
        let event = GateEvent::from_transition(&run(), &aborted).unwrap();
        assert_eq!(event.result, GateResult::Aborted);
        assert_eq!(event.approver.as_deref(), Some("bob"));
    }
}
