//! `jobwatch-core` — shared types, configuration and errors for the jobwatch
//! crates.
//!
//! [`types::JobIdentity`] names an in-flight asynchronous operation and
//! [`types::JobKey`] is its composite `source/user/id` form used as the
//! registry key. [`config::WatchConfig`] carries the tick intervals used by
//! the scheduler wheels.

pub mod config;
pub mod error;
pub mod types;

pub use config::{SchedulerConfig, WatchConfig};
pub use error::{Result, WatchError};
pub use types::{JobIdentity, JobKey};
