//! Shared test utilities for fixwell-db unit tests.

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::error::DatabaseError;
    use crate::supervisor::Connector;

    /// Handle produced by [`FakeConnector`]; the serial number identifies
    /// which connect call built it.
    pub struct FakeHandle {
        pub serial: u32,
    }

    /// Scriptable connector: tests can make the next N connects or probes fail.
    pub struct FakeConnector {
        connects: AtomicU32,
        failing_connects: AtomicU32,
        failing_probes: AtomicU32,
    }

    impl FakeConnector {
        pub fn new() -> Self {
            Self {
                connects: AtomicU32::new(0),
                failing_connects: AtomicU32::new(0),
                failing_probes: AtomicU32::new(0),
            }
        }

        pub fn fail_next_connects(&self, n: u32) {
            self.failing_connects.store(n, Ordering::SeqCst);
        }

        pub fn fail_next_probes(&self, n: u32) {
            self.failing_probes.store(n, Ordering::SeqCst);
        }

        pub fn connect_calls(&self) -> u32 {
            self.connects.load(Ordering::SeqCst)
        }

        /// Decrement-if-positive for the failure budgets.
        fn consume(budget: &AtomicU32) -> bool {
            budget
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        }
    }

    impl Connector for FakeConnector {
        type Handle = FakeHandle;

        async fn connect(&self) -> Result<FakeHandle, DatabaseError> {
            if Self::consume(&self.failing_connects) {
                return Err(DatabaseError::Query("fake connect refused".into()));
            }
            let serial = self.connects.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(FakeHandle { serial })
        }

        async fn probe(&self, _handle: &FakeHandle) -> Result<(), DatabaseError> {
            if Self::consume(&self.failing_probes) {
                return Err(DatabaseError::Query("fake probe refused".into()));
            }
            Ok(())
        }
    }
}
