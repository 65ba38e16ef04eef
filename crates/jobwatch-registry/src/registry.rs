//! `JobRegistry` — maps job identities to their cancellation handle and
//! last-known status.
//!
//! The registry is a plain owned map: every mutating call takes `&mut self`
//! and there is no internal locking. Wrap it in a `Mutex` when it has to be
//! shared between tasks.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use jobwatch_core::{JobIdentity, JobKey};
use tracing::{debug, error, info, warn};

use crate::types::{CancelHandle, JobEntry};

/// Tracks in-flight jobs, at most one entry per [`JobIdentity`].
pub struct JobRegistry<S = serde_json::Value> {
    jobs: HashMap<JobKey, JobEntry<S>>,
}

impl<S> JobRegistry<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            jobs: HashMap::new(),
        }
    }

    /// Register a job and return its composite key.
    ///
    /// An existing entry for the same identity is replaced. Its handle is
    /// *not* invoked: cancelling the displaced operation first is the
    /// caller's job.
    pub fn add(
        &mut self,
        identity: &JobIdentity,
        cancel: Option<CancelHandle>,
        status: S,
    ) -> JobKey {
        let key = identity.key();
        let previous = self.jobs.insert(key.clone(), JobEntry::new(cancel, status));

        match previous {
            Some(old) if old.is_cancellable() => {
                warn!(job_key = %key, "job replaced while its cancel handle was still live");
            }
            Some(_) => debug!(job_key = %key, "job replaced"),
            None => debug!(job_key = %key, "job added"),
        }
        key
    }

    /// Look up the entry for `identity`.
    pub fn get(&self, identity: &JobIdentity) -> Option<&JobEntry<S>> {
        self.jobs.get(&identity.key())
    }

    pub fn contains(&self, identity: &JobIdentity) -> bool {
        self.jobs.contains_key(&identity.key())
    }

    /// Replace the stored status of an existing job.
    ///
    /// Returns `false` (and drops `status`) when no job is registered for
    /// `identity`; polling a job that was already removed is not an error.
    pub fn set_status(&mut self, identity: &JobIdentity, status: S) -> bool {
        match self.jobs.get_mut(&identity.key()) {
            Some(entry) => {
                entry.status = status;
                true
            }
            None => false,
        }
    }

    /// Signal the job to stop, keeping its entry.
    ///
    /// No-op when the identity is unknown, when no handle was supplied, or
    /// when the handle already fired.
    pub fn abort(&mut self, identity: &JobIdentity) {
        let key = identity.key();
        if let Some(entry) = self.jobs.get_mut(&key) {
            if let Some(handle) = entry.cancel.take() {
                invoke_cancel(&key, handle);
            }
        }
    }

    /// Abort the job, then drop its entry.
    ///
    /// The abort always happens first so an entry never disappears while its
    /// operation is still un-signalled.
    pub fn remove(&mut self, identity: &JobIdentity) {
        self.abort(identity);
        let key = identity.key();
        if self.jobs.remove(&key).is_some() {
            debug!(job_key = %key, "job removed");
        }
    }

    /// Abort every job that still holds a live handle. Entries are kept.
    pub fn abort_all(&mut self) {
        let mut aborted = 0usize;
        for (key, entry) in self.jobs.iter_mut() {
            if let Some(handle) = entry.cancel.take() {
                invoke_cancel(key, handle);
                aborted += 1;
            }
        }
        if aborted > 0 {
            info!(count = aborted, "aborted all live jobs");
        }
    }

    /// Snapshot of registered keys, in no particular order.
    pub fn keys(&self) -> Vec<JobKey> {
        self.jobs.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl<S> Default for JobRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a cancel handle, containing any panic so registry state stays valid.
fn invoke_cancel(key: &JobKey, handle: CancelHandle) {
    debug!(job_key = %key, "invoking cancel handle");
    if panic::catch_unwind(AssertUnwindSafe(|| handle.invoke())).is_err() {
        error!(job_key = %key, "cancel handle panicked");
    }
}
