//! Single-slot request queue: the newest request supersedes any pending one.

use futures_util::future::{AbortHandle, Abortable};
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Slot {
    generation: u64,
    pending: Option<AbortHandle>,
}

/// Runs at most one request of a kind at a time.
///
/// Starting a request aborts the pending one. A finished request is applied
/// only if it is still the newest, so the last *issued* request wins no
/// matter in which order responses arrive.
#[derive(Default)]
pub struct LatestSlot {
    slot: Mutex<Slot>,
}

impl LatestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Drive `request`; when it completes and is still current, hand its
    /// output to `apply`. Returns `None` if it was superseded.
    pub async fn run<F, A, R>(&self, request: F, apply: A) -> Option<R>
    where
        F: Future,
        A: FnOnce(F::Output) -> R,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let generation = {
            let mut slot = self.lock();
            if let Some(previous) = slot.pending.replace(handle) {
                previous.abort();
            }
            slot.generation += 1;
            slot.generation
        };
        let _pending = PendingGuard {
            slot: self,
            generation,
        };

        let output = match Abortable::new(request, registration).await {
            Ok(output) => output,
            Err(_aborted) => {
                tracing::debug!(generation, "Request superseded before completion");
                return None;
            }
        };

        // Apply under the slot lock so a newer request cannot start in between
        let slot = self.lock();
        if slot.generation != generation {
            tracing::debug!(generation, "Discarding stale response");
            return None;
        }
        Some(apply(output))
    }

    /// True while a request is in flight
    pub fn is_pending(&self) -> bool {
        self.lock().pending.is_some()
    }
}

/// Clears the pending handle when a request ends, including when its caller
/// drops the future early. A newer request's handle is left alone.
struct PendingGuard<'a> {
    slot: &'a LatestSlot,
    generation: u64,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut slot = self.slot.lock();
        if slot.generation == self.generation {
            slot.pending = None;
        }
    }
}
