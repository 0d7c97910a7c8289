//! Orders service.

use async_trait::async_trait;
use benabazar::{
    cart::CartLine,
    cities::City,
    orders::{NewOrder, OrderStatus, Submitter},
};
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::backend::{BackendClient, BackendError, check_status, decode_json};

/// Which orders a listing should return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderScope {
    /// Every order; only the hard-coded admin sees this.
    All,

    /// Orders placed under the given submitter identity.
    Submitter(String),
}

/// An `orders` row as the backend returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderRecord {
    /// Row id.
    pub id: i64,

    /// Cart lines as they stood at checkout.
    pub items: Vec<CartLine>,

    /// Grand total in IQD, delivery included.
    pub total_price: Decimal,

    /// Delivery fee in IQD.
    pub delivery_price: u32,

    /// Destination city.
    pub city: City,

    /// Full street address.
    pub address: String,

    /// Contact phone number.
    pub phone: String,

    /// Customer full name.
    pub customer_name: String,

    /// Submitting identity, or the guest marker.
    pub user_email: Submitter,

    /// Current lifecycle state.
    pub status: OrderStatus,

    /// When the order was placed.
    pub created_at: Timestamp,
}

/// Order writes and the order-management reads.
///
/// Submission is a single best-effort insert: no retry and no idempotency
/// key; a failure is surfaced and the caller may resubmit. Everything else
/// here belongs to the order-management screen.
#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Inserts a new order row.
    async fn submit_order(&self, order: NewOrder) -> Result<(), BackendError>;

    /// Lists orders, newest first, within the given scope.
    async fn list_orders(&self, scope: OrderScope) -> Result<Vec<OrderRecord>, BackendError>;

    /// Moves an order to a new lifecycle state.
    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<(), BackendError>;

    /// Permanently deletes an order.
    async fn delete_order(&self, id: i64) -> Result<(), BackendError>;
}

/// Order operations against the hosted backend.
#[derive(Debug, Clone)]
pub struct RestOrdersService {
    client: BackendClient,
}

impl RestOrdersService {
    #[must_use]
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

/// Listing query parameters, left to the HTTP client to encode so filter
/// values with reserved characters survive intact.
fn list_params(scope: &OrderScope) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("select", "*".to_string()),
        ("order", "created_at.desc".to_string()),
    ];

    if let OrderScope::Submitter(email) = scope {
        params.push(("user_email", format!("eq.{email}")));
    }

    params
}

#[async_trait]
impl OrdersService for RestOrdersService {
    async fn submit_order(&self, order: NewOrder) -> Result<(), BackendError> {
        let response = self
            .client
            .rest(reqwest::Method::POST, "orders")
            .header("Prefer", "return=minimal")
            .json(&[order])
            .send()
            .await?;

        check_status(response).await?;

        Ok(())
    }

    async fn list_orders(&self, scope: OrderScope) -> Result<Vec<OrderRecord>, BackendError> {
        let response = self
            .client
            .rest(reqwest::Method::GET, "orders")
            .query(&list_params(&scope))
            .send()
            .await?;

        decode_json(response).await
    }

    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<(), BackendError> {
        let response = self
            .client
            .rest(reqwest::Method::PATCH, &format!("orders?id=eq.{id}"))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;

        check_status(response).await?;

        Ok(())
    }

    async fn delete_order(&self, id: i64) -> Result<(), BackendError> {
        let response = self
            .client
            .rest(reqwest::Method::DELETE, &format!("orders?id=eq.{id}"))
            .send()
            .await?;

        check_status(response).await?;

        Ok(())
    }
}
