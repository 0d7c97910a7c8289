//! Orders

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    cities::City,
    pricing::{CheckoutTotals, checkout_totals},
    rates::ExchangeRate,
};

/// A status string that is not part of the order lifecycle.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

/// Order lifecycle states.
///
/// Orders are created [`OrderStatus::Pending`]; every later transition is
/// made by the order-management screen, never by checkout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Newly placed, awaiting confirmation.
    #[default]
    Pending,

    /// Confirmed with the customer.
    Confirmed,

    /// Being prepared for dispatch.
    Preparing,

    /// Handed to the courier.
    Shipped,

    /// Delivered to the customer.
    Delivered,

    /// Cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// The status as its wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Who placed an order.
///
/// Stored on the order record as a plain string: the customer's email, or
/// the literal `"guest"` marker for anonymous checkouts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submitter {
    /// A signed-in customer, identified by email.
    Customer(String),

    /// An anonymous checkout.
    Guest,
}

impl Submitter {
    /// The identity string stored on the order record.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Submitter::Customer(email) => email,
            Submitter::Guest => "guest",
        }
    }
}

impl From<Option<String>> for Submitter {
    fn from(email: Option<String>) -> Self {
        email.map_or(Submitter::Guest, Submitter::Customer)
    }
}

impl Serialize for Submitter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Submitter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;

        Ok(match value.as_str() {
            "guest" => Submitter::Guest,
            _ => Submitter::Customer(value),
        })
    }
}

/// Delivery details collected on the checkout form.
///
/// The optional notes field is collected for the courier call but is not
/// part of the submitted order record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// Customer full name.
    pub name: String,

    /// Contact phone number.
    pub phone: String,

    /// Full street address.
    pub address: String,

    /// Destination city.
    pub city: City,

    /// Optional delivery notes.
    pub notes: Option<String>,
}

/// The order snapshot written to the backend at checkout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Cart lines as they stood at checkout, prices included.
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

    /// Initial lifecycle state, always pending.
    pub status: OrderStatus,
}

impl NewOrder {
    /// Snapshots the cart and customer details into a submittable order,
    /// pricing it with the supplied exchange rate.
    #[must_use]
    pub fn from_cart(
        cart: &Cart,
        details: &CustomerDetails,
        rate: ExchangeRate,
        submitter: Submitter,
    ) -> Self {
        let totals = checkout_totals(cart, details.city, rate);

        Self::from_totals(cart, details, totals, submitter)
    }

    /// As [`NewOrder::from_cart`], but for totals already derived.
    #[must_use]
    pub fn from_totals(
        cart: &Cart,
        details: &CustomerDetails,
        totals: CheckoutTotals,
        submitter: Submitter,
    ) -> Self {
        Self {
            items: cart.lines().to_vec(),
            total_price: totals.grand_total_iqd,
            delivery_price: totals.delivery_fee_iqd,
            city: details.city,
            address: details.address.clone(),
            phone: details.phone.clone(),
            customer_name: details.name.clone(),
            user_email: submitter,
            status: OrderStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::products::{Product, ProductId};

    use super::*;

    fn details(city: City) -> CustomerDetails {
        CustomerDetails {
            name: "Aram".to_string(),
            phone: "0750 000 0000".to_string(),
            address: "Street 1".to_string(),
            city,
            notes: None,
        }
    }

    #[test]
    fn order_snapshot_prices_cart_at_the_given_rate() -> TestResult {
        let mut cart = Cart::new();
        cart.add(&Product {
            id: ProductId::new(1),
            name: "Soap".to_string(),
            unit_price: Decimal::new(1_000, 2),
            image_url: String::new(),
            category: String::new(),
        });
        cart.update_quantity(ProductId::new(1), 1);

        let rate = ExchangeRate::new(Decimal::new(1_500, 0))?;
        let order = NewOrder::from_cart(&cart, &details(City::Erbil), rate, Submitter::Guest);

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total_price, Decimal::new(33_000, 0));
        assert_eq!(order.delivery_price, 3_000);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.user_email, Submitter::Guest);

        Ok(())
    }

    #[test]
    fn order_serializes_with_wire_field_names() -> TestResult {
        let mut cart = Cart::new();
        cart.add(&Product {
            id: ProductId::new(2),
            name: "Lamp".to_string(),
            unit_price: Decimal::new(500, 2),
            image_url: String::new(),
            category: String::new(),
        });

        let rate = ExchangeRate::new(Decimal::new(1_400, 0))?;
        let order = NewOrder::from_cart(
            &cart,
            &details(City::Basra),
            rate,
            Submitter::Customer("a@example.com".to_string()),
        );

        let value = serde_json::to_value(&order)?;

        assert_eq!(value["status"], "pending");
        assert_eq!(value["city"], "Basra");
        assert_eq!(value["user_email"], "a@example.com");
        assert_eq!(value["delivery_price"], 5_000);

        Ok(())
    }

    #[test]
    fn guest_marker_round_trips() -> TestResult {
        let json = serde_json::to_string(&Submitter::Guest)?;
        assert_eq!(json, "\"guest\"");

        let back: Submitter = serde_json::from_str(&json)?;
        assert_eq!(back, Submitter::Guest);

        let customer: Submitter = serde_json::from_str("\"x@example.com\"")?;
        assert_eq!(customer, Submitter::Customer("x@example.com".to_string()));

        Ok(())
    }

    #[test]
    fn submitter_maps_from_optional_email() {
        assert_eq!(Submitter::from(None), Submitter::Guest);
        assert_eq!(
            Submitter::from(Some("x@example.com".to_string())),
            Submitter::Customer("x@example.com".to_string())
        );
    }

    #[test]
    fn status_parses_from_wire_strings() -> TestResult {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>()?, status);
        }

        assert!("unknown".parse::<OrderStatus>().is_err());

        Ok(())
    }
}
