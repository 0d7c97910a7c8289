//! Session cart store.
//!
//! One [`CartSession`] exists per browsing session, owned by the
//! application root and passed by reference to whatever needs the cart;
//! nothing looks it up ambiently. Every mutation runs synchronously on the
//! session's thread of control and mirrors the full line collection to
//! durable storage before returning.

use benabazar::{
    cart::Cart,
    products::{Product, ProductId},
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::storage::CartStorage;

/// The authoritative in-memory cart plus its durable mirror and the
/// cart-drawer visibility flag.
pub struct CartSession {
    cart: Cart,
    storage: Box<dyn CartStorage>,
    cart_open: bool,
}

impl std::fmt::Debug for CartSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSession")
            .field("cart", &self.cart)
            .field("cart_open", &self.cart_open)
            .finish_non_exhaustive()
    }
}

impl CartSession {
    /// Starts a session, rehydrating the saved cart snapshot if one can be
    /// read; any failure falls back silently to an empty cart.
    #[must_use]
    pub fn restore(storage: Box<dyn CartStorage>) -> Self {
        let cart = match storage.load() {
            Ok(Some(lines)) => {
                debug!(lines = lines.len(), "restored saved cart");
                Cart::from_lines(lines)
            }
            Ok(None) => Cart::new(),
            Err(error) => {
                warn!(%error, "could not read saved cart; starting empty");
                Cart::new()
            }
        };

        Self {
            cart,
            storage,
            cart_open: false,
        }
    }

    /// Adds a product to the cart and opens the cart drawer.
    pub fn add_item(&mut self, product: &Product) {
        self.cart.add(product);
        self.cart_open = true;
        self.persist();
    }

    /// Removes the line for the given product, if present.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.cart.remove(product_id);
        self.persist();
    }

    /// Adjusts a line's quantity by `delta`; a result of zero or below
    /// leaves the line unchanged.
    pub fn update_quantity(&mut self, product_id: ProductId, delta: i32) {
        self.cart.update_quantity(product_id, delta);
        self.persist();
    }

    /// Empties the cart. Called after a successful order placement.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// The current cart state.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Cart subtotal in USD, recomputed from current lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }

    /// Whether the cart drawer is open.
    #[must_use]
    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    /// Opens or closes the cart drawer.
    pub fn set_cart_open(&mut self, open: bool) {
        self.cart_open = open;
    }

    // A failed mirror write keeps the in-memory mutation; the next
    // successful write carries the full current state anyway.
    fn persist(&self) {
        if let Err(error) = self.storage.save(self.cart.lines()) {
            warn!(%error, "failed to persist cart snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use benabazar::cart::CartLine;

    use crate::storage::{MemoryStorage, StorageError};

    use super::*;

    fn product(id: i64, unit_price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            unit_price,
            image_url: String::new(),
            category: String::new(),
        }
    }

    #[test]
    fn session_starts_empty_without_saved_cart() {
        let session = CartSession::restore(Box::new(MemoryStorage::new()));

        assert!(session.cart().is_empty());
        assert!(!session.is_cart_open());
        assert_eq!(session.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn mutations_mirror_to_storage_and_restore() {
        let soap = product(1, Decimal::new(250, 2));
        let lamp = product(2, Decimal::new(1_999, 2));
        let storage = MemoryStorage::new();

        let mut session = CartSession::restore(Box::new(storage.clone()));
        session.add_item(&soap);
        session.add_item(&soap);
        session.add_item(&lamp);
        session.update_quantity(lamp.id, 2);

        // A second session over the same storage sees the mirrored lines.
        let restored = CartSession::restore(Box::new(storage));

        assert_eq!(restored.cart(), session.cart());
        assert_eq!(restored.subtotal(), session.subtotal());
    }

    #[test]
    fn corrupt_saved_cart_falls_back_to_empty() {
        let session = CartSession::restore(Box::new(MemoryStorage::seeded("not json at all")));

        assert!(session.cart().is_empty());
    }

    #[test]
    fn add_item_opens_the_cart_drawer() {
        let mut session = CartSession::restore(Box::new(MemoryStorage::new()));

        session.add_item(&product(1, Decimal::ONE));
        assert!(session.is_cart_open());

        session.set_cart_open(false);
        session.remove_item(ProductId::new(1));
        assert!(!session.is_cart_open(), "remove must not reopen the drawer");
    }

    #[test]
    fn clear_empties_cart_and_mirror() {
        let mut session = CartSession::restore(Box::new(MemoryStorage::new()));
        session.add_item(&product(1, Decimal::ONE));

        session.clear();

        assert!(session.cart().is_empty());
        assert_eq!(session.subtotal(), Decimal::ZERO);
    }

    struct BrokenStorage;

    impl CartStorage for BrokenStorage {
        fn load(&self) -> Result<Option<Vec<CartLine>>, StorageError> {
            Ok(None)
        }

        fn save(&self, _lines: &[CartLine]) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk on fire")))
        }
    }

    #[test]
    fn failed_mirror_write_keeps_in_memory_state() {
        let mut session = CartSession::restore(Box::new(BrokenStorage));

        session.add_item(&product(1, Decimal::ONE));

        assert_eq!(session.cart().len(), 1);
    }
}
