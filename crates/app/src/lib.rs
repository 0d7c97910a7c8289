//! Application layer for the Bena Bazar storefront: durable cart
//! persistence, the session cart store, the live exchange-rate and
//! order-list feeds, the hosted-backend services, and the checkout flow.

pub mod backend;
pub mod checkout;
pub mod config;
pub mod context;
pub mod domain;
pub mod logging;
pub mod orders_feed;
pub mod rates;
pub mod session;
pub mod storage;
