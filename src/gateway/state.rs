use std::sync::Arc;

use crate::service::PoolService;

#[cfg(feature = "mock-ledger")]
use crate::ledger::InMemoryLedger;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    /// Lifecycle engine (all pool operations)
    pub service: Arc<PoolService>,
    /// Direct handle to the in-memory ledger for mock deposits
    #[cfg(feature = "mock-ledger")]
    pub mock_ledger: Arc<InMemoryLedger>,
}

impl AppState {
    pub fn new(
        service: Arc<PoolService>,
        #[cfg(feature = "mock-ledger")] mock_ledger: Arc<InMemoryLedger>,
    ) -> Self {
        Self {
            service,
            #[cfg(feature = "mock-ledger")]
            mock_ledger,
        }
    }
}
