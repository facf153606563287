// --- File: crates/advisor_api/src/scheduler.rs ---
//! Keyed fetch scheduling.
//!
//! A page asks for a resource under a [`ResourceKey`]. When a newer request arrives
//! under the same key while the previous one is still running, the previous task is
//! aborted and its caller gets [`ApiError::Superseded`] instead of a stale result.

use crate::error::ApiError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::AbortHandle;
use tracing::debug;

/// Backend resources a page can load.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    Links,
    Link { id: String },
    Meetings { link_id: String },
    Slots { link_id: String },
    Windows,
    GoogleAccounts,
    HubSpotAccounts,
    Events,
    Profile,
}

/// A resource as requested by one browser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    pub scope: String,
    pub resource: Resource,
}

impl ResourceKey {
    pub fn new(scope: impl Into<String>, resource: Resource) -> Self {
        Self {
            scope: scope.into(),
            resource,
        }
    }
}

struct InFlight {
    generation: u64,
    abort: AbortHandle,
}

#[derive(Default)]
struct Registry {
    next_generation: u64,
    in_flight: HashMap<ResourceKey, InFlight>,
}

/// Held by a spawned fetch. Dropping it, on completion or abort, removes the
/// fetch's entry unless a newer one has replaced it.
struct Registration {
    registry: Arc<Mutex<Registry>>,
    key: ResourceKey,
    generation: u64,
    finished: Arc<AtomicBool>,
}

impl Drop for Registration {
    fn drop(&mut self) {
        let mut registry = self.registry.lock();
        self.finished.store(true, Ordering::Relaxed);
        if registry
            .in_flight
            .get(&self.key)
            .is_some_and(|entry| entry.generation == self.generation)
        {
            registry.in_flight.remove(&self.key);
        }
    }
}

#[derive(Clone, Default)]
pub struct ResourceScheduler {
    registry: Arc<Mutex<Registry>>,
}

impl ResourceScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `fetch` as its own task, cancelling any unfinished fetch under the same key.
    ///
    /// The task deregisters itself when it ends, so a caller that goes away mid-fetch
    /// leaves nothing behind. Of two racing loads the later generation wins.
    pub async fn load<T, F>(&self, key: ResourceKey, fetch: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let generation = {
            let mut registry = self.registry.lock();
            let generation = registry.next_generation;
            registry.next_generation += 1;
            generation
        };

        let finished = Arc::new(AtomicBool::new(false));
        let registration = Registration {
            registry: self.registry.clone(),
            key: key.clone(),
            generation,
            finished: finished.clone(),
        };
        let handle = tokio::spawn(async move {
            let _registration = registration;
            fetch.await
        });
        let abort = handle.abort_handle();

        let to_abort = {
            let mut registry = self.registry.lock();
            let newer_registered = registry
                .in_flight
                .get(&key)
                .is_some_and(|entry| entry.generation > generation);
            if finished.load(Ordering::Relaxed) {
                None
            } else if newer_registered {
                debug!("Newer fetch already registered for {:?}", key);
                Some(abort)
            } else {
                registry
                    .in_flight
                    .insert(key.clone(), InFlight { generation, abort })
                    .map(|previous| {
                        debug!("Superseding in-flight fetch for {:?}", key);
                        previous.abort
                    })
            }
        };
        if let Some(abort) = to_abort {
            abort.abort();
        }

        match handle.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(ApiError::Superseded),
            Err(err) => Err(ApiError::InternalError(format!("fetch task failed: {}", err))),
        }
    }

    /// Number of fetches currently registered.
    pub fn in_flight(&self) -> usize {
        self.registry.lock().in_flight.len()
    }
}
