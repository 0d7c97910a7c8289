//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

/// One entry in the cart: a product snapshot and its desired quantity.
///
/// The display fields are captured when the product is first added and are
/// deliberately never refreshed from the catalog, so the price a customer
/// agreed to see stays fixed for the life of the line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to.
    pub product_id: ProductId,

    /// Product name at add time.
    pub name: String,

    /// Unit price in USD at add time.
    pub unit_price: Decimal,

    /// Image URL at add time.
    pub image_url: String,

    /// Desired quantity, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot a product into a fresh line with quantity 1.
    #[must_use]
    pub fn snapshot(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.unit_price,
            image_url: product.image_url.clone(),
            quantity: 1,
        }
    }

    /// Line total in USD.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Ordered collection of cart lines, at most one line per product.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from a persisted snapshot of its lines.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Adds a product to the cart.
    ///
    /// If a line for the product already exists its quantity is incremented;
    /// otherwise a new line with quantity 1 is appended, snapshotting the
    /// product's current display fields. Always succeeds.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity += 1;
            return;
        }

        self.lines.push(CartLine::snapshot(product));
    }

    /// Removes the line for the given product, if present.
    ///
    /// Removing an absent product is a silent no-op, not an error.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Adjusts a line's quantity by `delta`.
    ///
    /// If the adjusted quantity would drop to zero or below the line is left
    /// unchanged; the only way to remove a line is [`Cart::remove`]. An
    /// unknown product id is a silent no-op.
    pub fn update_quantity(&mut self, product_id: ProductId, delta: i32) {
        let Some(line) = self.line_mut(product_id) else {
            return;
        };

        let adjusted = i64::from(line.quantity) + i64::from(delta);

        if let Ok(quantity) = u32::try_from(adjusted)
            && quantity > 0
        {
            line.quantity = quantity;
        }
    }

    /// Empties the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Cart subtotal in USD: the exact sum of `unit_price * quantity` over
    /// all lines, recomputed from current state on every call.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Returns the line for the given product, if any.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Iterates over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Borrows the lines as a slice, for persistence snapshots.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
