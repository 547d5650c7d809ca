// dispatch.rs — Sequential, failure-isolated event dispatch.
//
// Sinks run synchronously in ordinal order. One sink's error or panic is
// caught and logged with the sink's identity and an event summary, and the
// remaining sinks still run. Nothing propagates to the caller: toward the
// host this subsystem is fire-and-forget.

use std::panic::{self, AssertUnwindSafe};

use gw_events::GateEvent;

use crate::notifier::{ordered, Notifier};

/// Deliver one event to every enabled sink, in dispatch order.
pub fn dispatch(event: &GateEvent, sinks: &[Box<dyn Notifier>]) {
    for sink in ordered(sinks) {
        match panic::catch_unwind(AssertUnwindSafe(|| sink.notify(event))) {
            Ok(Ok(())) => {
                tracing::debug!("sink {} delivered {}", sink.id(), event.summary());
            }
            Ok(Err(err)) => {
                tracing::warn!("sink {} failed for {}: {}", sink.id(), event.summary(), err);
            }
            Err(_) => {
                tracing::warn!("sink {} panicked for {}", sink.id(), event.summary());
            }
        }
    }
}
