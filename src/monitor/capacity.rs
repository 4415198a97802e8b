//! # Capacity Guard
//!
//! Poller that watches free storage under the trace folder. It never writes a
//! record: when free space falls below the threshold it raises
//! [`Fault::LowStorage`] and leaves the decision to the orchestrator. The
//! fault repeats every tick while storage stays low.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{trace, warn};

use crate::fault::{Fault, Orchestrator};
use crate::host::StorageProbe;

use super::Poller;

/// Default minimum free space, in KB
pub const DEFAULT_MIN_FREE_KB: u64 = 2048;

/// Checks free storage on every tick
pub struct CapacityGuard {
    storage: Arc<dyn StorageProbe>,
    trace_dir: PathBuf,
    min_free_kb: u64,
    orchestrator: Arc<dyn Orchestrator>,
}

impl CapacityGuard {
    pub fn new(
        storage: Arc<dyn StorageProbe>,
        trace_dir: PathBuf,
        min_free_kb: u64,
        orchestrator: Arc<dyn Orchestrator>,
    ) -> Self {
        Self {
            storage,
            trace_dir,
            min_free_kb,
            orchestrator,
        }
    }
}

impl Poller for CapacityGuard {
    fn name(&self) -> &'static str {
        "capacity"
    }

    fn tick(&mut self) {
        let free_kb = match self.storage.free_kb(&self.trace_dir) {
            Ok(free_kb) => free_kb,
            Err(e) => {
                warn!("Free space of {} unavailable: {:#}", self.trace_dir.display(), e);
                return;
            }
        };

        if free_kb < self.min_free_kb {
            warn!(
                "Free storage {} KB below minimum {} KB, requesting stop",
                free_kb, self.min_free_kb
            );
            self.orchestrator.on_fault(Fault::LowStorage {
                free_kb,
                threshold_kb: self.min_free_kb,
            });
            return;
        }

        trace!("Free storage {} KB", free_kb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::mocks::RecordingOrchestrator;
    use crate::fault::MockOrchestrator;
    use crate::host::oracle::MockStorageProbe;
    use mockall::predicate::eq;

    fn guard_with_free(free_kb: u64) -> (CapacityGuard, Arc<RecordingOrchestrator>) {
        let mut storage = MockStorageProbe::new();
        storage.expect_free_kb().returning(move |_| Ok(free_kb));
        let orchestrator = Arc::new(RecordingOrchestrator::new());
        let guard = CapacityGuard::new(
            Arc::new(storage),
            PathBuf::from("/sdcard/trace"),
            DEFAULT_MIN_FREE_KB,
            orchestrator.clone(),
        );
        (guard, orchestrator)
    }

    #[test]
    fn test_exact_threshold_does_not_abort() {
        let (mut guard, orchestrator) = guard_with_free(2048);
        guard.tick();
        assert!(orchestrator.faults().is_empty());
    }

    #[test]
    fn test_below_threshold_aborts() {
        let (mut guard, orchestrator) = guard_with_free(2047);
        guard.tick();
        assert_eq!(
            orchestrator.faults(),
            vec![Fault::LowStorage { free_kb: 2047, threshold_kb: 2048 }]
        );
    }

    #[test]
    fn test_fault_repeats_while_low() {
        let (mut guard, orchestrator) = guard_with_free(10);
        guard.tick();
        guard.tick();
        assert_eq!(orchestrator.faults().len(), 2);
    }

    #[test]
    fn test_probe_failure_is_absorbed() {
        let mut storage = MockStorageProbe::new();
        storage
            .expect_free_kb()
            .returning(|_| Err(anyhow::anyhow!("statfs failed")));
        let mut orchestrator = MockOrchestrator::new();
        orchestrator.expect_on_fault().never();

        let mut guard = CapacityGuard::new(
            Arc::new(storage),
            PathBuf::from("/sdcard/trace"),
            DEFAULT_MIN_FREE_KB,
            Arc::new(orchestrator),
        );
        guard.tick();
    }

    #[test]
    fn test_signals_through_orchestrator_once_per_tick() {
        let mut storage = MockStorageProbe::new();
        storage.expect_free_kb().times(1).returning(|_| Ok(100));
        let mut orchestrator = MockOrchestrator::new();
        orchestrator
            .expect_on_fault()
            .with(eq(Fault::LowStorage { free_kb: 100, threshold_kb: 4096 }))
            .times(1)
            .return_const(());

        let mut guard = CapacityGuard::new(
            Arc::new(storage),
            PathBuf::from("/data/trace"),
            4096,
            Arc::new(orchestrator),
        );
        guard.tick();
    }
}
