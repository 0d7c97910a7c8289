//! Live exchange-rate feed.
//!
//! The rate starts at [`ExchangeRate::DEFAULT`], is fetched from the
//! backend's settings row as soon as the feed starts, and is refreshed on a
//! fixed interval thereafter, standing in for the backend's row-change
//! notifications. The feed is an owned value with explicit teardown; totals
//! read the rate through a [`RateHandle`] at the moment they are computed.

use std::sync::Arc;
use std::time::Duration;

use benabazar::rates::ExchangeRate;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::settings::SettingsService;

/// Read access to the current exchange rate.
#[derive(Debug, Clone)]
pub struct RateHandle {
    rx: watch::Receiver<ExchangeRate>,
}

impl RateHandle {
    /// A handle pinned to a fixed rate, for tests and offline use.
    ///
    /// The value never changes; [`RateHandle::changed`] reports the feed as
    /// shut down.
    #[must_use]
    pub fn fixed(rate: ExchangeRate) -> Self {
        let (_tx, rx) = watch::channel(rate);

        Self { rx }
    }

    /// The rate as of this call.
    #[must_use]
    pub fn current(&self) -> ExchangeRate {
        *self.rx.borrow()
    }

    /// Waits until the rate changes from the last observed value.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed has shut down.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}

/// Background task keeping the shared rate current.
#[derive(Debug)]
pub struct RateFeed {
    rx: watch::Receiver<ExchangeRate>,
    task: JoinHandle<()>,
}

impl RateFeed {
    /// Starts the feed: one immediate fetch, then one per `poll_interval`.
    ///
    /// Fetch failures, including stored rates that fail validation, are
    /// logged and leave the previous value in effect.
    #[must_use]
    pub fn spawn(settings: Arc<dyn SettingsService>, poll_interval: Duration) -> Self {
        let (tx, rx) = watch::channel(ExchangeRate::DEFAULT);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);

            loop {
                ticker.tick().await;

                match settings.fetch_exchange_rate().await {
                    Ok(rate) => {
                        let updated = tx.send_if_modified(|current| {
                            let changed = *current != rate;
                            *current = rate;
                            changed
                        });

                        if updated {
                            debug!(%rate, "exchange rate updated");
                        }
                    }
                    Err(error) => {
                        warn!(%error, "exchange rate fetch failed; keeping previous value");
                    }
                }

                if tx.is_closed() {
                    break;
                }
            }
        });

        Self { rx, task }
    }

    /// A handle for reading the live rate.
    #[must_use]
    pub fn handle(&self) -> RateHandle {
        RateHandle {
            rx: self.rx.clone(),
        }
    }

    /// Stops the background task.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for RateFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{backend::BackendError, domain::settings::MockSettingsService};

    use super::*;

    fn rate(value: i64) -> ExchangeRate {
        ExchangeRate::new(Decimal::new(value, 0)).expect("positive test rate")
    }

    #[test]
    fn fixed_handle_returns_its_rate() {
        let handle = RateHandle::fixed(rate(1_450));

        assert_eq!(handle.current(), rate(1_450));
    }

    #[tokio::test(start_paused = true)]
    async fn feed_replaces_default_after_first_fetch() -> TestResult {
        let mut settings = MockSettingsService::new();
        settings
            .expect_fetch_exchange_rate()
            .returning(|| Ok(rate(1_450)));

        let feed = RateFeed::spawn(Arc::new(settings), Duration::from_secs(60));
        let mut handle = feed.handle();

        assert_eq!(handle.current(), ExchangeRate::DEFAULT);

        handle.changed().await?;
        assert_eq!(handle.current(), rate(1_450));

        feed.shutdown();

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_keeps_previous_value() -> TestResult {
        let mut settings = MockSettingsService::new();
        settings
            .expect_fetch_exchange_rate()
            .times(1)
            .returning(|| Ok(rate(1_450)));
        settings
            .expect_fetch_exchange_rate()
            .returning(|| Err(BackendError::MissingRow));

        let feed = RateFeed::spawn(Arc::new(settings), Duration::from_secs(60));
        let mut handle = feed.handle();

        handle.changed().await?;
        assert_eq!(handle.current(), rate(1_450));

        // Let several failing refreshes elapse; the value must not move.
        tokio::time::sleep(Duration::from_secs(200)).await;
        assert_eq!(handle.current(), rate(1_450));

        feed.shutdown();

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn feed_picks_up_rate_changes() -> TestResult {
        let mut settings = MockSettingsService::new();
        let mut calls = 0_u32;
        settings.expect_fetch_exchange_rate().returning(move || {
            calls += 1;
            Ok(if calls == 1 { rate(1_450) } else { rate(1_500) })
        });

        let feed = RateFeed::spawn(Arc::new(settings), Duration::from_secs(60));
        let mut handle = feed.handle();

        handle.changed().await?;
        assert_eq!(handle.current(), rate(1_450));

        handle.changed().await?;
        assert_eq!(handle.current(), rate(1_500));

        feed.shutdown();

        Ok(())
    }
}
