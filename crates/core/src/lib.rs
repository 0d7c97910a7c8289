//! Bena Bazar
//!
//! Domain core for the Bena Bazar storefront: the shopping cart, the
//! delivery-fee table, exchange-rate conversion and checkout totals, and the
//! order snapshot submitted at checkout. Pure and synchronous; persistence
//! and backend access live in `benabazar-app`.

pub mod cart;
pub mod cities;
pub mod orders;
pub mod pricing;
pub mod products;
pub mod rates;
