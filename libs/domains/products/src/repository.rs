use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter, Review, UpdateProduct};

/// Repository trait for Product persistence
///
/// This trait defines the data access interface for products.
/// Implementations can use different storage backends (MongoDB, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List one page of products matching the filter, newest first
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Count products matching a filter, ignoring pagination
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64>;

    /// Update an existing product
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Find products related to the excluded target: name matching the
    /// case-insensitive pattern (when present) or category equality.
    async fn find_related<'a>(
        &self,
        exclude: Uuid,
        name_pattern: Option<&'a str>,
        category: &'a str,
        limit: i64,
    ) -> ProductResult<Vec<Product>>;
}

/// Repository trait for Review persistence
///
/// Reviews live in their own collection; the product service drives their
/// lifecycle (cascade delete) through this interface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a review
    async fn insert(&self, review: &Review) -> ProductResult<()>;

    /// All reviews whose foreign key matches the product id
    async fn find_by_product(&self, product_id: Uuid) -> ProductResult<Vec<Review>>;

    /// Delete every review referencing the product; returns the count
    async fn delete_by_product(&self, product_id: Uuid) -> ProductResult<u64>;
}
