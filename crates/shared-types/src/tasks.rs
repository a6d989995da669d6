//! Background ownership of abandoned peer tasks.

use tokio::task::JoinSet;

/// Hand still-running tasks to a background owner that awaits each one to
/// completion and discards the result.
///
/// Dropping a `JoinSet` aborts its tasks mid-request; draining lets each
/// task close its session on its own timeouts instead.
pub fn drain_in_background<T: Send + 'static>(mut set: JoinSet<T>) {
    if set.is_empty() {
        return;
    }
    tokio::spawn(async move { while set.join_next().await.is_some() {} });
}
