//! In-memory canary flag store.
//!
//! # Purpose
//! Holds the rollout state for every catalog remote in a `HashMap` guarded
//! by `tokio::sync::RwLock`. Reads are concurrent; writes serialize on the
//! lock so a flag is always published as a whole `(enabled, percentage)`
//! pair and readers never observe a half-written update.
//!
//! # Durability and consistency
//! - Not durable: state is lost on process restart.
//! - Single-process: multiple instances each have independent flags.
//! - Updates replace the stored flag wholesale; there is no field merge.
use crate::model::CanaryFlag;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlagError {
    #[error("rolloutPercentage must be between 0 and 100, got {0}")]
    InvalidPercentage(i64),
    #[error("unknown remoteId: {0}")]
    UnknownRemote(String),
}

/// Concurrent flag map keyed by remote id.
///
/// Cloning shares the underlying state, so one store can be handed to
/// every request handler.
#[derive(Clone)]
pub struct CanaryFlagStore {
    /// Catalog ids in declaration order; fixed for the process lifetime.
    known_ids: Arc<Vec<String>>,
    flags: Arc<RwLock<HashMap<String, CanaryFlag>>>,
}

impl CanaryFlagStore {
    /// Build a store seeded with a disabled 0% flag per catalog id.
    pub fn new(catalog_ids: Vec<String>) -> Self {
        let seeded = catalog_ids
            .iter()
            .map(|id| (id.clone(), CanaryFlag::default_for(id)))
            .collect();
        Self {
            known_ids: Arc::new(catalog_ids),
            flags: Arc::new(RwLock::new(seeded)),
        }
    }

    /// Current flag for a remote, or the default when none is recorded.
    /// Never fails, including for ids outside the catalog.
    pub async fn get(&self, remote_id: &str) -> CanaryFlag {
        self.flags
            .read()
            .await
            .get(remote_id)
            .cloned()
            .unwrap_or_else(|| CanaryFlag::default_for(remote_id))
    }

    /// Replace the flag for a known remote.
    ///
    /// Validation happens before the write lock is taken, so a rejected
    /// update leaves prior state untouched.
    ///
    /// # Errors
    /// - `FlagError::InvalidPercentage` outside [0, 100].
    /// - `FlagError::UnknownRemote` for ids not in the catalog.
    pub async fn upsert(
        &self,
        remote_id: &str,
        enabled: bool,
        percentage: i64,
    ) -> Result<CanaryFlag, FlagError> {
        if !(0..=100).contains(&percentage) {
            return Err(FlagError::InvalidPercentage(percentage));
        }
        if !self.known_ids.iter().any(|id| id == remote_id) {
            return Err(FlagError::UnknownRemote(remote_id.to_string()));
        }
        let flag = CanaryFlag {
            remote_id: remote_id.to_string(),
            enabled,
            rollout_percentage: percentage as u8,
        };
        self.flags
            .write()
            .await
            .insert(remote_id.to_string(), flag.clone());
        metrics::counter!("mfe_canary_flag_updates_total").increment(1);
        Ok(flag)
    }

    /// One flag per catalog id, in catalog order, defaults filled in.
    pub async fn list_all(&self) -> Vec<CanaryFlag> {
        let flags = self.flags.read().await;
        self.known_ids
            .iter()
            .map(|id| {
                flags
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| CanaryFlag::default_for(id))
            })
            .collect()
    }
}
