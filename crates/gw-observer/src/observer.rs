// observer.rs — The gate observer: detector → event builder → dispatcher.
//
// One observer serves every build the host runs. Distinct builds invoke
// on_node concurrently from their own threads; the only shared state is the
// sink snapshot, an Arc behind an RwLock that is replaced wholesale when the
// host updates configuration. A snapshot taken at dispatch time stays valid
// for that dispatch even if the config is swapped mid-flight.

use std::sync::{Arc, RwLock};

use gw_events::GateEvent;
use gw_graph::{FlowNode, GateDetector, GateTransition};
use gw_notify::{dispatch, ConfigError, Notifier, NotifierConfig, SinkRegistry};

/// Host lookup from a flow node to the build that owns it.
///
/// `None` means the host could not map the execution to a build — a
/// recoverable condition; the observer logs and skips the node.
pub trait RunResolver: Send + Sync {
    fn run_for(&self, node: &FlowNode) -> Option<gw_events::RunContext>;
}

/// Observes one host's flow graphs and notifies the configured sinks.
pub struct GateObserver {
    detector: GateDetector,
    resolver: Box<dyn RunResolver>,
    sinks: RwLock<Arc<Vec<Box<dyn Notifier>>>>,
}

impl GateObserver {
    /// An observer with the default gate step name and no sinks yet.
    pub fn new(resolver: Box<dyn RunResolver>) -> Self {
        Self {
            detector: GateDetector::default(),
            resolver,
            sinks: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Override the gate detector (e.g. a custom gate step name).
    pub fn with_detector(mut self, detector: GateDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Replace the sink snapshot. Takes effect for subsequent dispatches
    /// only; a dispatch already under way keeps the snapshot it started
    /// with.
    pub fn update_sinks(&self, sinks: Vec<Box<dyn Notifier>>) {
        let snapshot = Arc::new(sinks);
        match self.sinks.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }

    /// Build sinks from a config through the registry and install them.
    ///
    /// Fails without touching the current snapshot when the config is
    /// malformed — the host surfaces the error on its save path.
    pub fn apply_config(
        &self,
        config: &NotifierConfig,
        registry: &SinkRegistry,
    ) -> Result<(), ConfigError> {
        let sinks = registry.build(config)?;
        self.update_sinks(sinks);
        Ok(())
    }

    /// Push callback for each newly-arrived flow node.
    ///
    /// Never raises to the host. Unclassifiable nodes and unresolvable runs
    /// are logged and skipped.
    pub fn on_node(&self, node: &FlowNode) {
        let transition = self.detector.classify(node);
        if matches!(
            transition,
            GateTransition::NotAGate | GateTransition::UnrelatedFailure
        ) {
            return;
        }

        let Some(run) = self.resolver.run_for(node) else {
            tracing::warn!(
                "could not resolve the owning build for node {} - notification will not be sent",
                node.id
            );
            return;
        };

        let Some(event) = GateEvent::from_transition(&run, &transition) else {
            return;
        };

        let sinks = self.snapshot();
        dispatch(&event, &sinks);
    }

    fn snapshot(&self) -> Arc<Vec<Box<dyn Notifier>>> {
        match self.sinks.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }
}
