use std::time::Duration;

use jobwatch_core::config::{SchedulerConfig, DAY_TICK_MS, MINUTE_TICK_MS};
use tracing::warn;

use crate::{types::WheelKind, wheel::Wheel};

/// Minute- and day-granularity periodic callbacks.
///
/// Construct one per process (or per orchestrator) and keep it alive for as
/// long as its timers should run; dropping it stops both tick tasks. All
/// methods take `&self`, so the scheduler can be shared behind an `Arc` and
/// callbacks may register further timers.
pub struct TickScheduler {
    minutes: Wheel,
    days: Wheel,
}

impl TickScheduler {
    /// Scheduler with the standard 1 minute / 1 day tick intervals.
    pub fn new() -> Self {
        Self::with_config(&SchedulerConfig::default())
    }

    /// Scheduler with tick intervals taken from `config`.
    ///
    /// A zero interval would spin the tick task, so it falls back to the
    /// standard interval for that wheel.
    pub fn with_config(config: &SchedulerConfig) -> Self {
        Self {
            minutes: Wheel::new(
                WheelKind::Minute,
                interval_or_default(WheelKind::Minute, config.minute_interval(), MINUTE_TICK_MS),
            ),
            days: Wheel::new(
                WheelKind::Day,
                interval_or_default(WheelKind::Day, config.day_interval(), DAY_TICK_MS),
            ),
        }
    }

    /// Run `callback` every `period_in_minutes` minutes.
    ///
    /// `period_in_minutes == 0` schedules nothing. `run_immediately` also
    /// invokes the callback once before returning, whatever the period.
    pub fn add_minute_timer<F>(&self, callback: F, period_in_minutes: u32, run_immediately: bool)
    where
        F: FnMut() + Send + 'static,
    {
        self.minutes.add(callback, period_in_minutes, run_immediately);
    }

    /// Run `callback` every `period_in_days` days. Same rules as
    /// [`TickScheduler::add_minute_timer`].
    pub fn add_day_timer<F>(&self, callback: F, period_in_days: u32, run_immediately: bool)
    where
        F: FnMut() + Send + 'static,
    {
        self.days.add(callback, period_in_days, run_immediately);
    }

    /// Advance the minute wheel by one tick. Returns how many callbacks fired.
    ///
    /// Called from inside one of this wheel's own callbacks, the running
    /// callback is skipped for the nested tick rather than re-entered.
    pub fn tick_minutes(&self) -> usize {
        self.minutes.tick()
    }

    /// Advance the day wheel by one tick. Same re-entrancy rule as
    /// [`TickScheduler::tick_minutes`].
    pub fn tick_days(&self) -> usize {
        self.days.tick()
    }

    pub fn minute_timer_count(&self) -> usize {
        self.minutes.len()
    }

    pub fn day_timer_count(&self) -> usize {
        self.days.len()
    }

    pub fn is_minute_ticking(&self) -> bool {
        self.minutes.is_ticking()
    }

    pub fn is_day_ticking(&self) -> bool {
        self.days.is_ticking()
    }

    pub fn minute_wheel(&self) -> &Wheel {
        &self.minutes
    }

    pub fn day_wheel(&self) -> &Wheel {
        &self.days
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn interval_or_default(kind: WheelKind, interval: Duration, default_ms: u64) -> Duration {
    if interval.is_zero() {
        warn!(wheel = %kind, default_ms, "zero tick interval configured, using default");
        Duration::from_millis(default_ms)
    } else {
        interval
    }
}
