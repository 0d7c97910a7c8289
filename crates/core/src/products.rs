//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product identifier, matching the backend's bigint primary key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Creates a product id from its raw backend key.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw backend key.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

/// A catalog product as the cart sees it.
///
/// The cart copies these display fields into its line when the product is
/// added; it never re-reads the catalog afterwards, so a later catalog price
/// change does not alter lines already in the cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price in USD.
    pub unit_price: Decimal,

    /// Image URL for display.
    pub image_url: String,

    /// Catalog category.
    pub category: String,
}
