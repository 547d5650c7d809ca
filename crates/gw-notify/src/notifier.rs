// notifier.rs — The sink trait and the ordered dispatch view.
//
// One flat trait, no shared base state: each sink is an independent value
// type carrying its own enabled flag, ordinal, and identifier. Ordering is
// computed from the live sink list at time of use, so it always reflects
// the latest configuration snapshot.

use gw_events::GateEvent;

use crate::error::NotifyError;

/// Ordinal assigned to sinks that do not override [`Notifier::ordinal`].
pub const DEFAULT_ORDINAL: i32 = 100;

/// A pluggable destination for gate lifecycle events.
///
/// `notify` is best-effort: an error is logged and swallowed by the
/// dispatcher, never escalated to the host. Implementations must be safe to
/// call concurrently from distinct builds.
pub trait Notifier: Send + Sync {
    /// Whether this sink participates in dispatch at all.
    fn enabled(&self) -> bool {
        true
    }

    /// Invocation priority. Lower runs first; ties break on [`Notifier::id`].
    fn ordinal(&self) -> i32 {
        DEFAULT_ORDINAL
    }

    /// Stable identifier, used for tie-breaking and log lines.
    fn id(&self) -> &str;

    /// Deliver one event.
    fn notify(&self, event: &GateEvent) -> Result<(), NotifyError>;
}

impl std::fmt::Debug for dyn Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("id", &self.id())
            .field("ordinal", &self.ordinal())
            .field("enabled", &self.enabled())
            .finish()
    }
}

/// The dispatch order over a sink list: disabled sinks are excluded
/// entirely, the rest sorted by ordinal ascending, then id ascending.
pub fn ordered(sinks: &[Box<dyn Notifier>]) -> Vec<&dyn Notifier> {
    let mut view: Vec<&dyn Notifier> = sinks
        .iter()
        .filter(|sink| sink.enabled())
        .map(Box::as_ref)
        .collect();
    view.sort_by(|a, b| a.ordinal().cmp(&b.ordinal()).then_with(|| a.id().cmp(b.id())));
    view
}


#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::test_support::RecordingSink;
    use super::*;

    fn sink(id: &str, ordinal: i32, enabled: bool) -> Box<dyn Notifier> {
        Box::new(RecordingSink {
            id: id.into(),
            ordinal,
            enabled,
            log: Arc::new(Mutex::new(Vec::new())),
        })
    }

    #[test]
    fn orders_by_ordinal_then_id() {
        let sinks = vec![sink("c", 20, true), sink("a", 20, true), sink("x", 10, true)];
        let ids: Vec<&str> = ordered(&sinks).iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["x", "a", "c"]);
    }

    #[test]
    fn disabled_sinks_are_excluded_without_disturbing_order() {
        let sinks = vec![
            sink("a", 10, true),
            sink("b", 20, false),
            sink("c", 30, true),
        ];
        let ids: Vec<&str> = ordered(&sinks).iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn default_ordinal_applies_when_not_overridden() {
        struct Minimal;
        impl Notifier for Minimal {
            fn id(&self) -> &str {
                "minimal"
            }
            fn notify(&self, _event: &gw_events::GateEvent) -> Result<(), NotifyError> {
                Ok(())
            }
        }

        let sink = Minimal;
        assert_eq!(sink.ordinal(), DEFAULT_ORDINAL);
        assert!(sink.enabled());
    }
}
