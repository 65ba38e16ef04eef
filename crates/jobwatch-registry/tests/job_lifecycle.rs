// End-to-end lifecycle of a registered job: add, abort, remove.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use jobwatch_core::JobIdentity;
use jobwatch_registry::{CancelHandle, JobRegistry};
use tokio_util::sync::CancellationToken;

#[test]
fn flag_handle_add_abort_remove() {
    let flag = Arc::new(AtomicBool::new(false));
    let handle_flag = Arc::clone(&flag);

    let mut registry = JobRegistry::new();
    let job = JobIdentity::new("A", "u1", "7");

    let key = registry.add(
        &job,
        Some(CancelHandle::new(move || handle_flag.store(true, Ordering::SeqCst))),
        serde_json::json!("running"),
    );
    assert_eq!(key.as_str(), "A/u1/7");

    registry.abort(&job);
    assert!(flag.load(Ordering::SeqCst));
    assert!(registry.get(&job).is_some());

    registry.remove(&job);
    assert!(flag.load(Ordering::SeqCst));
    assert!(registry.get(&job).is_none());
}

#[tokio::test]
async fn cancellation_token_stops_cooperating_task() {
    let token = CancellationToken::new();
    let child = token.child_token();

    let task = tokio::spawn(async move {
        tokio::select! {
            _ = child.cancelled() => "cancelled",
            _ = tokio::time::sleep(Duration::from_secs(30)) => "finished",
        }
    });

    let mut registry = JobRegistry::new();
    let job = JobIdentity::new("transfer", "alice", "upload-1");
    registry.add(&job, Some(CancelHandle::from(token.clone())), serde_json::json!(null));

    registry.remove(&job);

    assert!(token.is_cancelled());
    assert_eq!(task.await.unwrap(), "cancelled");
}

#[tokio::test]
async fn abort_handle_aborts_spawned_task() {
    let task = tokio::spawn(async {
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let mut registry = JobRegistry::new();
    let job = JobIdentity::new("remote", "bob", "poll-9");
    registry.add(&job, Some(CancelHandle::from(task.abort_handle())), serde_json::json!("polling"));

    registry.abort(&job);

    let err = task.await.unwrap_err();
    assert!(err.is_cancelled());
}
