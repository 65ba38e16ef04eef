//! A single timer wheel: ordered entries plus one lazily spawned tick task.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError, TryLockError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::types::{Callback, TimerEntry, WheelKind};

/// Periodic callbacks sharing one recurring tick source.
pub struct Wheel {
    kind: WheelKind,
    interval: Duration,
    entries: Arc<Mutex<Vec<TimerEntry>>>,
    /// `None` until the first non-zero registration spawns the tick task.
    source: Mutex<Option<JoinHandle<()>>>,
}

impl Wheel {
    pub(crate) fn new(kind: WheelKind, interval: Duration) -> Self {
        Self {
            kind,
            interval,
            entries: Arc::new(Mutex::new(Vec::new())),
            source: Mutex::new(None),
        }
    }

    /// Register `callback` to fire every `period` ticks.
    ///
    /// With `run_immediately` the callback also runs once, synchronously,
    /// before this returns. A `period` of 0 stores nothing: the callback then
    /// only ever runs through `run_immediately`.
    pub fn add<F>(&self, callback: F, period: u32, run_immediately: bool)
    where
        F: FnMut() + Send + 'static,
    {
        let callback: Callback = Arc::new(Mutex::new(Box::new(callback)));

        if run_immediately {
            fire(self.kind, &callback);
        }

        if period == 0 {
            debug!(wheel = %self.kind, "zero period, timer not scheduled");
            return;
        }

        lock(&self.entries).push(TimerEntry::new(period, callback));
        debug!(wheel = %self.kind, period, "timer registered");

        self.ensure_ticking();
    }

    /// Run one tick by hand. Returns how many callbacks fired.
    ///
    /// The spawned tick task calls the same code once per interval; callers
    /// that drive time themselves (tests, simulations) use this directly.
    pub fn tick(&self) -> usize {
        run_tick(self.kind, &self.entries)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of scheduled entries.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a recurring tick task is currently alive.
    ///
    /// A task whose runtime has shut down counts as not ticking.
    pub fn is_ticking(&self) -> bool {
        lock(&self.source)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Spawn the tick task unless a live one already runs.
    ///
    /// Outside a tokio runtime nothing is spawned and the next registration
    /// tries again. The same happens when the previous task ended with its
    /// runtime. Manual [`Wheel::tick`] keeps working either way.
    fn ensure_ticking(&self) {
        let mut source = lock(&self.source);
        if source.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }
        if source.take().is_some() {
            warn!(wheel = %self.kind, "tick source ended, restarting");
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!(wheel = %self.kind, "no tokio runtime, tick source not started");
            return;
        };

        let kind = self.kind;
        let every = self.interval;
        let entries = Arc::clone(&self.entries);

        *source = Some(runtime.spawn(async move {
            // First tick one full interval from now, not immediately.
            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let fired = run_tick(kind, &entries);
                if fired > 0 {
                    debug!(wheel = %kind, fired, "wheel tick");
                }
            }
        }));

        info!(wheel = %self.kind, interval_ms = every.as_millis() as u64, "tick source started");
    }
}

impl Drop for Wheel {
    fn drop(&mut self) {
        if let Some(task) = lock(&self.source).take() {
            task.abort();
        }
    }
}

/// Count down every entry and fire the due ones, in registration order.
///
/// Due callbacks are collected first and invoked after the entry lock is
/// released, so a callback may register new timers on the same wheel. Those
/// take part from the following tick. Returns how many callbacks ran.
fn run_tick(kind: WheelKind, entries: &Mutex<Vec<TimerEntry>>) -> usize {
    let due: Vec<Callback> = lock(entries)
        .iter_mut()
        .filter_map(|entry| entry.advance().then(|| Arc::clone(&entry.callback)))
        .collect();

    due.iter().filter(|callback| fire(kind, callback)).count()
}

/// Invoke one callback, containing a panic so the rest of the tick still runs.
///
/// A callback that is already running (it ticked its own wheel, or the tick
/// task and a manual tick overlap) is skipped for this tick. Returns whether
/// the callback ran.
fn fire(kind: WheelKind, callback: &Callback) -> bool {
    let mut callback = match callback.try_lock() {
        Ok(guard) => guard,
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        Err(TryLockError::WouldBlock) => {
            warn!(wheel = %kind, "timer callback still running, skipped");
            return false;
        }
    };
    if panic::catch_unwind(AssertUnwindSafe(|| (&mut **callback)())).is_err() {
        error!(wheel = %kind, "timer callback panicked");
    }
    true
}

/// Lock ignoring poisoning; panics are contained before they can poison.
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
