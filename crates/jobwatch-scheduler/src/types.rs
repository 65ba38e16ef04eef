use std::fmt;
use std::sync::{Arc, Mutex};

/// Callback shared between the wheel's entry list and the tick that fires it,
/// so the list lock can be released before the callback runs.
pub(crate) type Callback = Arc<Mutex<Box<dyn FnMut() + Send>>>;

/// Granularity of a wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelKind {
    Minute,
    Day,
}

impl fmt::Display for WheelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WheelKind::Minute => "minute",
            WheelKind::Day => "day",
        };
        write!(f, "{s}")
    }
}

/// A periodic callback registered on a wheel.
pub(crate) struct TimerEntry {
    /// Wheel ticks between invocations. Always non-zero.
    period: u32,
    /// Ticks left until the next invocation.
    remaining: u32,
    pub(crate) callback: Callback,
}

impl TimerEntry {
    pub(crate) fn new(period: u32, callback: Callback) -> Self {
        debug_assert!(period > 0, "zero-period timers are never stored");
        Self {
            period,
            remaining: period,
            callback,
        }
    }

    /// Count down one tick. Returns `true` when the entry is due, in which
    /// case the countdown has already been reset to `period`.
    pub(crate) fn advance(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.remaining = self.period;
            true
        } else {
            false
        }
    }
}

impl fmt::Debug for TimerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEntry")
            .field("period", &self.period)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Callback {
        Arc::new(Mutex::new(Box::new(|| {})))
    }

    #[test]
    fn advance_fires_every_period_ticks() {
        let mut entry = TimerEntry::new(3, noop());
        let fired: Vec<bool> = (0..6).map(|_| entry.advance()).collect();
        assert_eq!(fired, [false, false, true, false, false, true]);
        assert_eq!(entry.remaining, 3);
    }

    #[test]
    fn period_one_fires_on_every_tick() {
        let mut entry = TimerEntry::new(1, noop());
        assert!((0..4).all(|_| entry.advance()));
        assert_eq!(entry.period, 1);
    }
}
