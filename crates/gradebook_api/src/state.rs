//! Shared store handle for request handlers.

use crate::config::ServerConfig;
use gradebook_core::{InMemoryRecordsRepository, RecordsService, SeedData};
use parking_lot::RwLock;
use std::sync::Arc;

pub type Records = RecordsService<InMemoryRecordsRepository>;

/// Cloneable handle to the single records store of this process.
#[derive(Clone)]
pub struct AppState {
    records: Arc<RwLock<Records>>,
}

impl AppState {
    pub fn new(records: Records) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Builds a store pre-populated with `seed`.
    pub fn with_seed(seed: SeedData) -> Self {
        Self::new(RecordsService::new(InMemoryRecordsRepository::with_seed(
            seed,
        )))
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        if config.seed {
            Self::with_seed(SeedData::bootstrap())
        } else {
            Self::with_seed(SeedData::default())
        }
    }

    /// Runs `f` under the shared read lock.
    pub fn read<T>(&self, f: impl FnOnce(&Records) -> T) -> T {
        let guard = self.records.read();
        f(&*guard)
    }

    /// Runs `f` under the exclusive write lock.
    ///
    /// The whole closure is one critical section, so a cascade delete is
    /// never observed half-applied.
    pub fn write<T>(&self, f: impl FnOnce(&mut Records) -> T) -> T {
        let mut guard = self.records.write();
        f(&mut *guard)
    }
}
