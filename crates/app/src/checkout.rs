//! Checkout flow.
//!
//! Checkout is only reachable with a non-empty cart. Totals are derived at
//! submission time against the rate current at that moment, so a rate push
//! arriving mid-checkout is reflected in the submitted order rather than
//! the figure first rendered. A successful submission clears the cart and
//! hands back a confirmation that stays valid after the clear; a failed one
//! leaves the cart exactly as it was so the customer can resubmit.

use benabazar::{
    orders::{CustomerDetails, NewOrder, Submitter},
    pricing::{CheckoutTotals, checkout_totals},
    rates::ExchangeRate,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{backend::BackendError, domain::orders::OrdersService, session::CartSession};

/// Why an order could not be placed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart is empty; checkout redirects back to the shop.
    #[error("cart is empty")]
    EmptyCart,

    /// The backend rejected or failed the insert; the cart is untouched.
    #[error("order submission failed")]
    Submission(#[source] BackendError),
}

/// What the confirmation screen shows after a successful placement.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    /// Customer name, for the thank-you line.
    pub customer_name: String,

    /// Phone number the courier will call.
    pub phone: String,

    /// The totals the order was submitted with.
    pub totals: CheckoutTotals,
}

/// Places an order from the session cart.
///
/// `rate` must be the live rate at the moment of the call (read it from the
/// rate handle immediately before submitting).
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`] when there is nothing to order.
/// - [`CheckoutError::Submission`] when the backend write fails; the cart
///   is left intact for a retry.
pub async fn place_order(
    session: &mut CartSession,
    orders: &dyn OrdersService,
    details: &CustomerDetails,
    rate: ExchangeRate,
    submitter: Submitter,
) -> Result<OrderConfirmation, CheckoutError> {
    if session.cart().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let totals = checkout_totals(session.cart(), details.city, rate);
    let order = NewOrder::from_totals(session.cart(), details, totals, submitter);

    if let Err(error) = orders.submit_order(order).await {
        warn!(%error, "order submission failed; cart left intact");
        return Err(CheckoutError::Submission(error));
    }

    session.clear();

    info!(
        city = %details.city,
        total_iqd = %totals.grand_total_iqd,
        "order placed"
    );

    Ok(OrderConfirmation {
        customer_name: details.name.clone(),
        phone: details.phone.clone(),
        totals,
    })
}
