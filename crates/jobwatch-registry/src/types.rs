//! Entry and handle types stored by the registry.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// CancelHandle
// ---------------------------------------------------------------------------

/// One-shot capability that asks an in-flight operation to stop.
///
/// Invoking the handle consumes it, so a handle can never fire twice. The
/// registry does not wait for the operation to actually stop.
pub struct CancelHandle(Box<dyn FnOnce() + Send>);

impl CancelHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self(Box::new(cancel))
    }

    pub(crate) fn invoke(self) {
        (self.0)()
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CancelHandle(..)")
    }
}

/// Cancels the token; cooperating tasks observe it via `cancelled().await`.
impl From<CancellationToken> for CancelHandle {
    fn from(token: CancellationToken) -> Self {
        Self::new(move || token.cancel())
    }
}

/// Aborts the spawned task at its next await point.
impl From<AbortHandle> for CancelHandle {
    fn from(handle: AbortHandle) -> Self {
        Self::new(move || handle.abort())
    }
}

// ---------------------------------------------------------------------------
// JobEntry
// ---------------------------------------------------------------------------

/// Registry slot for one job.
#[derive(Debug)]
pub struct JobEntry<S> {
    /// `None` once the handle has been invoked, or if none was supplied.
    pub(crate) cancel: Option<CancelHandle>,

    /// Last status reported by the caller. Never interpreted here.
    pub status: S,

    /// Unix timestamp (ms) when the entry was added.
    pub registered_at: u64,
}

impl<S> JobEntry<S> {
    pub(crate) fn new(cancel: Option<CancelHandle>, status: S) -> Self {
        let registered_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        Self {
            cancel,
            status,
            registered_at,
        }
    }

    /// Whether the entry still holds a handle that has not been invoked.
    pub fn is_cancellable(&self) -> bool {
        self.cancel.is_some()
    }
}
