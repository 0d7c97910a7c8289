//! Products service.

use async_trait::async_trait;
use benabazar::products::{Product, ProductId};
use mockall::automock;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::backend::{BackendClient, BackendError, decode_json};

/// Read access to the product catalog.
#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Fetches the full catalog.
    async fn list_products(&self) -> Result<Vec<Product>, BackendError>;
}

/// A `products` row as the backend returns it.
#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    /// Row id.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Unit price in USD.
    pub price: Decimal,

    /// Product image URL; empty when the column is null.
    #[serde(default)]
    pub image_url: String,

    /// Shop category; empty when the column is null.
    #[serde(default)]
    pub category: String,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product {
            id: ProductId::new(record.id),
            name: record.name,
            unit_price: record.price,
            image_url: record.image_url,
            category: record.category,
        }
    }
}

/// Catalog reads against the hosted backend.
#[derive(Debug, Clone)]
pub struct RestProductsService {
    client: BackendClient,
}

impl RestProductsService {
    #[must_use]
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductsService for RestProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, BackendError> {
        let response = self
            .client
            .rest(reqwest::Method::GET, "products?select=*")
            .send()
            .await?;

        let records: Vec<ProductRecord> = decode_json(response).await?;

        Ok(records.into_iter().map(Product::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn product_record_maps_to_catalog_product() -> TestResult {
        let record: ProductRecord = serde_json::from_str(
            r#"{"id": 4, "name": "Clay Pot", "price": 12.50, "image_url": "https://img/4.jpg", "category": "Kitchen"}"#,
        )?;

        let product = Product::from(record);

        assert_eq!(product.id, ProductId::new(4));
        assert_eq!(product.unit_price, Decimal::new(1_250, 2));
        assert_eq!(product.category, "Kitchen");

        Ok(())
    }

    #[test]
    fn missing_optional_columns_default_to_empty() -> TestResult {
        let record: ProductRecord =
            serde_json::from_str(r#"{"id": 1, "name": "Soap", "price": 2}"#)?;

        let product = Product::from(record);

        assert!(product.image_url.is_empty());
        assert!(product.category.is_empty());

        Ok(())
    }
}
