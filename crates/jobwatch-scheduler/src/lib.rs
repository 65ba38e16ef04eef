//! `jobwatch-scheduler` — coarse periodic callbacks on shared tick sources.
//!
//! # Overview
//!
//! A [`TickScheduler`] owns two wheels. Each wheel keeps an ordered list of
//! timer entries and a single recurring tokio task that ticks the
//! whole list, so registering a thousand callbacks still costs one timer per
//! wheel. Each entry counts down its own period in wheel ticks and fires when
//! it reaches zero, giving ±1 tick precision.
//!
//! | Wheel    | Tick interval | Registration                       |
//! |----------|---------------|------------------------------------|
//! | `Minute` | 60 000 ms     | [`TickScheduler::add_minute_timer`] |
//! | `Day`    | 86 400 000 ms | [`TickScheduler::add_day_timer`]    |
//!
//! The tick task is spawned on the first registration with a non-zero
//! period. Entries are never unregistered; they live as long as the
//! scheduler.

pub mod engine;
pub mod types;
pub mod wheel;

pub use engine::TickScheduler;
pub use types::WheelKind;
pub use wheel::Wheel;
