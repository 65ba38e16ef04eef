//! `jobwatch-registry` — bookkeeping for in-flight asynchronous jobs.
//!
//! Each job is registered under its [`JobIdentity`](jobwatch_core::JobIdentity)
//! together with a [`CancelHandle`] and a caller-defined status value. The
//! registry holds at most one entry per identity and guarantees that a handle
//! is invoked at most once, whether through [`JobRegistry::abort`] or
//! [`JobRegistry::remove`].
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! use jobwatch_core::JobIdentity;
//! use jobwatch_registry::{CancelHandle, JobRegistry};
//!
//! let stopped = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&stopped);
//!
//! let mut registry = JobRegistry::new();
//! let job = JobIdentity::new("transfer", "alice", "42");
//! let key = registry.add(
//!     &job,
//!     Some(CancelHandle::new(move || flag.store(true, Ordering::SeqCst))),
//!     serde_json::json!({ "state": "uploading" }),
//! );
//! assert_eq!(key.as_str(), "transfer/alice/42");
//!
//! registry.remove(&job);
//! assert!(stopped.load(Ordering::SeqCst));
//! assert!(registry.get(&job).is_none());
//! ```

pub mod registry;
pub mod types;

pub use registry::JobRegistry;
pub use types::{CancelHandle, JobEntry};
