//! Live order-list feed.
//!
//! The order-management screen stays current without manual refreshes: the
//! list is fetched when the feed starts and refreshed on a fixed interval
//! thereafter, standing in for the backend's row-change notifications on
//! the `orders` table. Like the rate feed, this is an owned value with
//! explicit teardown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::orders::{OrderRecord, OrderScope, OrdersService};

/// Read access to the current order list.
#[derive(Debug, Clone)]
pub struct OrdersHandle {
    rx: watch::Receiver<Vec<OrderRecord>>,
}

impl OrdersHandle {
    /// The list as of the last successful refresh.
    #[must_use]
    pub fn current(&self) -> Vec<OrderRecord> {
        self.rx.borrow().clone()
    }

    /// Waits until the list changes from the last observed value.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed has shut down.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}

/// Background task keeping an order listing current.
#[derive(Debug)]
pub struct OrdersFeed {
    rx: watch::Receiver<Vec<OrderRecord>>,
    task: JoinHandle<()>,
}

impl OrdersFeed {
    /// Starts the feed over the given scope: one immediate fetch, then one
    /// per `poll_interval`.
    ///
    /// Fetch failures are logged and leave the previous list in effect.
    #[must_use]
    pub fn spawn(
        orders: Arc<dyn OrdersService>,
        scope: OrderScope,
        poll_interval: Duration,
    ) -> Self {
        let (tx, rx) = watch::channel(Vec::new());

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);

            loop {
                ticker.tick().await;

                match orders.list_orders(scope.clone()).await {
                    Ok(listing) => {
                        let updated = tx.send_if_modified(|current| {
                            let changed = *current != listing;
                            *current = listing;
                            changed
                        });

                        if updated {
                            debug!("order list updated");
                        }
                    }
                    Err(error) => {
                        warn!(%error, "order list refresh failed; keeping previous list");
                    }
                }

                if tx.is_closed() {
                    break;
                }
            }
        });

        Self { rx, task }
    }

    /// A handle for reading the live list.
    #[must_use]
    pub fn handle(&self) -> OrdersHandle {
        OrdersHandle {
            rx: self.rx.clone(),
        }
    }

    /// Stops the background task.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for OrdersFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use benabazar::{
        cities::City,
        orders::{OrderStatus, Submitter},
    };
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{backend::BackendError, domain::orders::MockOrdersService};

    use super::*;

    fn record(id: i64, status: OrderStatus) -> OrderRecord {
        OrderRecord {
            id,
            items: Vec::new(),
            total_price: Decimal::new(33_000, 0),
            delivery_price: 3_000,
            city: City::Erbil,
            address: "Street 1".to_string(),
            phone: "0750".to_string(),
            customer_name: "Aram".to_string(),
            user_email: Submitter::Guest,
            status,
            created_at: jiff::Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn feed_fills_the_list_after_first_fetch() -> TestResult {
        let mut orders = MockOrdersService::new();
        orders
            .expect_list_orders()
            .returning(|_| Ok(vec![record(1, OrderStatus::Pending)]));

        let feed = OrdersFeed::spawn(Arc::new(orders), OrderScope::All, Duration::from_secs(30));
        let mut handle = feed.handle();

        assert!(handle.current().is_empty());

        handle.changed().await?;
        assert_eq!(handle.current().len(), 1);
        assert_eq!(handle.current()[0].id, 1);

        feed.shutdown();

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn feed_picks_up_status_changes() -> TestResult {
        let mut orders = MockOrdersService::new();
        let mut calls = 0_u32;
        orders.expect_list_orders().returning(move |_| {
            calls += 1;
            Ok(vec![record(
                1,
                if calls == 1 {
                    OrderStatus::Pending
                } else {
                    OrderStatus::Confirmed
                },
            )])
        });

        let feed = OrdersFeed::spawn(Arc::new(orders), OrderScope::All, Duration::from_secs(30));
        let mut handle = feed.handle();

        handle.changed().await?;
        assert_eq!(handle.current()[0].status, OrderStatus::Pending);

        handle.changed().await?;
        assert_eq!(handle.current()[0].status, OrderStatus::Confirmed);

        feed.shutdown();

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_keeps_previous_list() -> TestResult {
        let mut orders = MockOrdersService::new();
        orders
            .expect_list_orders()
            .times(1)
            .returning(|_| Ok(vec![record(1, OrderStatus::Pending)]));
        orders
            .expect_list_orders()
            .returning(|_| Err(BackendError::MissingRow));

        let feed = OrdersFeed::spawn(Arc::new(orders), OrderScope::All, Duration::from_secs(30));
        let mut handle = feed.handle();

        handle.changed().await?;
        assert_eq!(handle.current().len(), 1);

        // Let several failing refreshes elapse; the list must not move.
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(handle.current().len(), 1);

        feed.shutdown();

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn feed_scopes_the_listing_to_the_submitter() -> TestResult {
        let mut orders = MockOrdersService::new();
        orders
            .expect_list_orders()
            .withf(|scope| *scope == OrderScope::Submitter("a@example.com".to_string()))
            .returning(|_| Ok(vec![record(7, OrderStatus::Shipped)]));

        let feed = OrdersFeed::spawn(
            Arc::new(orders),
            OrderScope::Submitter("a@example.com".to_string()),
            Duration::from_secs(30),
        );
        let mut handle = feed.handle();

        handle.changed().await?;
        assert_eq!(handle.current()[0].id, 7);

        feed.shutdown();

        Ok(())
    }
}
