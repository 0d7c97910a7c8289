//! App Context

use std::sync::Arc;
use std::time::Duration;

use crate::{
    backend::{BackendClient, BackendConfig},
    domain::{
        auth::{AuthService, RestAuthService},
        orders::{OrderScope, OrdersService, RestOrdersService},
        products::{ProductsService, RestProductsService},
        settings::{RestSettingsService, SettingsService},
    },
    orders_feed::OrdersFeed,
    rates::RateFeed,
};

/// Shared handles to every backend service, built once by the application
/// root and passed down explicitly.
#[derive(Clone)]
pub struct AppContext {
    /// Product catalog reads.
    pub products: Arc<dyn ProductsService>,

    /// Order submission and management.
    pub orders: Arc<dyn OrdersService>,

    /// Account sign-in/sign-up/sign-out.
    pub auth: Arc<dyn AuthService>,

    /// The shared settings row.
    pub settings: Arc<dyn SettingsService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Builds the context over a single shared HTTP client.
    #[must_use]
    pub fn from_backend(config: BackendConfig) -> Self {
        let client = BackendClient::new(config);

        Self {
            products: Arc::new(RestProductsService::new(client.clone())),
            orders: Arc::new(RestOrdersService::new(client.clone())),
            auth: Arc::new(RestAuthService::new(client.clone())),
            settings: Arc::new(RestSettingsService::new(client)),
        }
    }

    /// Starts the live exchange-rate feed against this context's settings
    /// service. The caller owns the feed and its teardown.
    #[must_use]
    pub fn spawn_rate_feed(&self, poll_interval: Duration) -> RateFeed {
        RateFeed::spawn(Arc::clone(&self.settings), poll_interval)
    }

    /// Starts the live order-list feed against this context's orders
    /// service. The caller owns the feed and its teardown.
    #[must_use]
    pub fn spawn_orders_feed(&self, scope: OrderScope, poll_interval: Duration) -> OrdersFeed {
        OrdersFeed::spawn(Arc::clone(&self.orders), scope, poll_interval)
    }
}
