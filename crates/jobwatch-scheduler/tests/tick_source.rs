// The spawned tick source, driven with a shortened interval.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use jobwatch_core::SchedulerConfig;
use jobwatch_scheduler::TickScheduler;

fn fast_config() -> SchedulerConfig {
    SchedulerConfig {
        minute_tick_ms: 10,
        day_tick_ms: 60_000,
    }
}

fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&count);
    (count, move || {
        inner.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test]
async fn first_registration_starts_one_tick_source() {
    let sched = TickScheduler::with_config(&fast_config());
    assert!(!sched.is_minute_ticking());

    let (count, cb) = counter();
    sched.add_minute_timer(cb, 1, false);
    assert!(sched.is_minute_ticking());
    // The day wheel stays idle until something registers on it.
    assert!(!sched.is_day_ticking());

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(count.load(Ordering::SeqCst) >= 3);
}

#[tokio::test]
async fn zero_period_does_not_start_tick_source() {
    let sched = TickScheduler::with_config(&fast_config());
    let (count, cb) = counter();
    sched.add_minute_timer(cb, 0, true);

    assert!(!sched.is_minute_ticking());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn first_tick_waits_a_full_interval() {
    let sched = TickScheduler::with_config(&SchedulerConfig {
        minute_tick_ms: 500,
        day_tick_ms: 60_000,
    });
    let (count, cb) = counter();
    sched.add_minute_timer(cb, 1, false);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn dropping_scheduler_stops_ticking() {
    let sched = TickScheduler::with_config(&fast_config());
    let (count, cb) = counter();
    sched.add_minute_timer(cb, 1, false);

    tokio::time::sleep(Duration::from_millis(60)).await;
    drop(sched);
    let after_drop = count.load(Ordering::SeqCst);

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(count.load(Ordering::SeqCst), after_drop);
}

#[test]
fn tick_source_restarts_after_runtime_shutdown() {
    let sched = Arc::new(TickScheduler::with_config(&fast_config()));
    let (first, cb) = counter();

    let runtime_a = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime_a.block_on(async {
        sched.add_minute_timer(cb, 1, false);
        tokio::time::sleep(Duration::from_millis(60)).await;
    });
    drop(runtime_a);

    assert!(first.load(Ordering::SeqCst) >= 1);
    // The task died with its runtime.
    assert!(!sched.is_minute_ticking());

    let before = first.load(Ordering::SeqCst);
    let (second, cb) = counter();
    let runtime_b = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime_b.block_on(async {
        sched.add_minute_timer(cb, 1, false);
        assert!(sched.is_minute_ticking());
        tokio::time::sleep(Duration::from_millis(100)).await;
    });

    // Both the old and the new timer ride the restarted source.
    assert!(first.load(Ordering::SeqCst) > before);
    assert!(second.load(Ordering::SeqCst) >= 1);
}
