use std::{future::Future, time::Duration};

use async_trait::async_trait;
use tokio::time::{sleep, Instant};

use crate::error::Result;

#[cfg(feature = "browser")]
pub mod browser_source;
pub mod http_source;

/// The profile listing page the scraper is currently looking at.
#[async_trait]
pub trait PageSource: Send {
    /// Loads the first page of the profile.
    async fn open(&mut self, profile_url: &str) -> Result<()>;

    /// HTML of the page currently displayed.
    async fn current_html(&mut self) -> Result<String>;

    /// Moves to listing page `page`. `false` means there was nothing to move to.
    async fn go_to_page(&mut self, page: u32) -> Result<bool>;

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Re-runs `check` every `interval` until it reports `true` or `timeout` runs out.
///
/// A failing check counts as "not ready yet": a page in the middle of a client
/// side navigation can reject scripts for a moment.
pub async fn poll_until<F, Fut>(mut check: F, timeout: Duration, interval: Duration) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let deadline = Instant::now() + timeout;

    loop {
        match check().await {
            Ok(true) => return true,
            Ok(false) => {}
            Err(e) => log::debug!("Readiness check failed, retrying: {}", e),
        }

        if Instant::now() >= deadline {
            return false;
        }
        sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn failing_checks_are_retried() {
        let calls = Cell::new(0);

        let ready = poll_until(
            || {
                calls.set(calls.get() + 1);
                let attempt = calls.get();
                async move {
                    if attempt < 3 {
                        Err(Error::Config("execution context was destroyed".to_string()))
                    } else {
                        Ok(true)
                    }
                }
            },
            Duration::from_secs(5),
            Duration::ZERO,
        )
        .await;

        assert!(ready);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_timeout() {
        let ready = poll_until(
            || async { Err(Error::Config("still loading".to_string())) },
            Duration::from_millis(20),
            Duration::from_millis(5),
        )
        .await;

        assert!(!ready);
    }

    #[tokio::test]
    async fn stays_false_until_timeout() {
        let ready = poll_until(
            || async { Ok(false) },
            Duration::from_millis(20),
            Duration::from_millis(5),
        )
        .await;

        assert!(!ready);
    }
}
