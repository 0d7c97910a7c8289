//! Backend service traits and their REST implementations.

pub mod auth;
pub mod orders;
pub mod products;
pub mod settings;
