//! MongoDB implementations of ProductRepository and ReviewRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Bson, Document, doc, to_bson},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, FILTER_ALL, Product, ProductFilter, Review, UpdateProduct};
use crate::repository::{ProductRepository, ReviewRepository};

/// Create the indexes the catalog queries lean on: category and creation
/// time for filtered listings, the product foreign key for review lookups
/// and cascade deletes. Idempotent; safe to run at every startup.
pub async fn init_indexes(db: &Database) -> ProductResult<()> {
    use mongodb::IndexModel;

    let products = db.collection::<Product>("products");
    products
        .create_indexes(vec![
            IndexModel::builder().keys(doc! { "category": 1 }).build(),
            IndexModel::builder().keys(doc! { "created_at": -1 }).build(),
            IndexModel::builder().keys(doc! { "price": 1 }).build(),
        ])
        .await?;

    let reviews = db.collection::<Review>("reviews");
    reviews
        .create_indexes(vec![
            IndexModel::builder().keys(doc! { "product_id": 1 }).build(),
        ])
        .await?;

    tracing::info!("Catalog indexes ensured");
    Ok(())
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("catalog");
    /// let repo = MongoProductRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Build a MongoDB filter document from ProductFilter.
    ///
    /// The `"all"` sentinel disables the category/color clauses. The price
    /// range clause requires both bounds present and finite; a lone bound
    /// is silently ignored.
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref category) = filter.category {
            if !category.eq_ignore_ascii_case(FILTER_ALL) {
                doc.insert("category", category);
            }
        }

        if let Some(ref color) = filter.color {
            if !color.eq_ignore_ascii_case(FILTER_ALL) {
                doc.insert("color", color);
            }
        }

        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            if min.is_finite() && max.is_finite() {
                doc.insert("price", doc! { "$gte": min, "$lte": max });
            }
        }

        doc
    }

    /// Build the related-lookup filter: everything except the target whose
    /// name matches the pattern OR whose category equals the target's.
    ///
    /// `name_pattern == None` means no name token survived filtering; the
    /// regex clause is omitted so the lookup degrades to category matching
    /// instead of matching every product.
    fn build_related_filter(
        exclude: Uuid,
        name_pattern: Option<&str>,
        category: &str,
    ) -> Document {
        let mut clauses = vec![doc! { "category": category }];

        if let Some(pattern) = name_pattern {
            clauses.insert(0, doc! { "name": { "$regex": pattern, "$options": "i" } });
        }

        doc! {
            "_id": { "$ne": to_bson(&exclude).unwrap_or(Bson::Null) },
            "$or": clauses,
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let product = self.collection.find_one(filter).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let mongo_filter = Self::build_filter(&filter);

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.limit())
            .skip(filter.offset())
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self.collection.count_documents(mongo_filter).await?;
        Ok(count)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        // First, get the existing product
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(ProductError::NotFound(id))?;

        // Apply updates
        let mut updated = existing;
        updated.apply_update(input);

        // Replace the document
        self.collection.replace_one(filter, &updated).await?;

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(true)
    }

    #[instrument(skip(self, name_pattern))]
    async fn find_related<'a>(
        &self,
        exclude: Uuid,
        name_pattern: Option<&'a str>,
        category: &'a str,
        limit: i64,
    ) -> ProductResult<Vec<Product>> {
        let filter = Self::build_related_filter(exclude, name_pattern, category);

        let options = mongodb::options::FindOptions::builder()
            .limit(limit)
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }
}

/// MongoDB implementation of the ReviewRepository
pub struct MongoReviewRepository {
    collection: Collection<Review>,
}

impl MongoReviewRepository {
    /// Create a new MongoReviewRepository
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Review>("reviews");
        Self { collection }
    }

    /// Create a new MongoReviewRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Review>(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl ReviewRepository for MongoReviewRepository {
    #[instrument(skip(self, review), fields(review_id = %review.id))]
    async fn insert(&self, review: &Review) -> ProductResult<()> {
        self.collection.insert_one(review).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_product(&self, product_id: Uuid) -> ProductResult<Vec<Review>> {
        let filter = doc! { "product_id": to_bson(&product_id).unwrap_or(Bson::Null) };
        let cursor = self.collection.find(filter).await?;
        let reviews: Vec<Review> = cursor.try_collect().await?;
        Ok(reviews)
    }

    #[instrument(skip(self))]
    async fn delete_by_product(&self, product_id: Uuid) -> ProductResult<u64> {
        let filter = doc! { "product_id": to_bson(&product_id).unwrap_or(Bson::Null) };
        let result = self.collection.delete_many(filter).await?;
        Ok(result.deleted_count)
    }
}
