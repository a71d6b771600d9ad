//! Timers that work both natively and in the browser.

use std::future::Future;
use std::time::Duration;

use futures_util::future::{select, Either};

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

/// Run `future` to completion, or give up after `duration`.
///
/// Returns `None` on timeout; the future is dropped, which aborts an in-flight fetch.
pub async fn timeout<F: Future>(duration: Duration, future: F) -> Option<F::Output> {
    let future = std::pin::pin!(future);
    let timer = std::pin::pin!(sleep(duration));
    match select(future, timer).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(((), _)) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_completes() {
        let value = timeout(Duration::from_secs(1), async { 7 }).await;
        assert_eq!(value, Some(7));
    }

    #[tokio::test]
    async fn test_timeout_elapses() {
        let value = timeout(
            Duration::from_millis(10),
            sleep(Duration::from_secs(5)),
        )
        .await;
        assert_eq!(value, None);
    }
}
