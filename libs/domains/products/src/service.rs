//! Product Service - Business logic layer

use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use domain_users::UserRepository;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, Product, ProductDetail, ProductFilter, ProductPage, ProductView, ReviewView,
    UpdateProduct,
};
use crate::related::{self, RELATED_LIMIT};
use crate::repository::{ProductRepository, ReviewRepository};

/// Product service providing the catalog operations.
///
/// The service layer handles validation, page math, reference expansion,
/// and the review cascade; storage details stay behind the repositories.
pub struct ProductService<P, R, U>
where
    P: ProductRepository,
    R: ReviewRepository,
    U: UserRepository,
{
    products: Arc<P>,
    reviews: Arc<R>,
    users: Arc<U>,
}

impl<P, R, U> ProductService<P, R, U>
where
    P: ProductRepository,
    R: ReviewRepository,
    U: UserRepository,
{
    /// Create a new ProductService over the given repositories
    pub fn new(products: P, reviews: R, users: U) -> Self {
        Self {
            products: Arc::new(products),
            reviews: Arc::new(reviews),
            users: Arc::new(users),
        }
    }

    /// Create a new product
    ///
    /// Defaults are applied for omitted optional fields (category
    /// `"general"`, price 0, quantity 1). No duplicate detection: identical
    /// products may coexist.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.products.create(input).await
    }

    /// List one page of products with authors expanded.
    ///
    /// Page math: offset = (page-1)*limit, totalPages = ceil(total/limit).
    /// A page beyond the data yields an empty sequence while the totals
    /// still describe the whole filtered set.
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<ProductPage> {
        let limit = filter.limit() as u64;

        let total_products = self.products.count(filter.clone()).await?;
        let products = self.products.list(filter).await?;

        let author_ids: Vec<Uuid> = products
            .iter()
            .map(|p| p.author)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let authors = self.users.find_summaries(&author_ids).await?;

        let products = products
            .into_iter()
            .map(|p| {
                let author = authors.get(&p.author).cloned();
                ProductView::new(p, author)
            })
            .collect();

        Ok(ProductPage {
            products,
            total_pages: total_products.div_ceil(limit),
            total_products,
        })
    }

    /// Get a product together with all of its reviews.
    ///
    /// The product read and the review read are independent; callers must
    /// tolerate the lack of mutual consistency between them.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<ProductDetail> {
        let product = self
            .products
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let author = self.users.find_summary(product.author).await?;

        let reviews = self.reviews.find_by_product(id).await?;
        let reviewer_ids: Vec<Uuid> = reviews
            .iter()
            .map(|r| r.user_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let reviewers = self.users.find_summaries(&reviewer_ids).await?;

        let reviews = reviews
            .into_iter()
            .map(|r| {
                let user = reviewers.get(&r.user_id).cloned();
                ReviewView::new(r, user)
            })
            .collect();

        Ok(ProductDetail {
            product: ProductView::new(product, author),
            reviews,
        })
    }

    /// Update an existing product with a partial payload
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        // Check if product exists
        self.products
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        self.products.update(id, input).await
    }

    /// Delete a product and cascade its reviews.
    ///
    /// The two steps are not atomic: an interruption after the product
    /// delete may leave orphaned reviews behind. That window is accepted
    /// for this domain; the sweep count is logged for visibility.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        self.products.delete(id).await?;

        let swept = self.reviews.delete_by_product(id).await?;
        tracing::info!(product_id = %id, reviews_deleted = swept, "Review cascade completed");

        Ok(())
    }

    /// Find products related to the given one.
    ///
    /// Relation is name-token overlap (case-insensitive) or category
    /// equality, excluding the target itself. When every name token is
    /// filtered out, the lookup degrades to category matching only.
    #[instrument(skip(self))]
    pub async fn related_products(&self, id: Uuid) -> ProductResult<Vec<Product>> {
        let target = self
            .products
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let tokens = related::name_tokens(&target.name);
        let pattern = related::token_pattern(&tokens);

        self.products
            .find_related(
                target.id,
                pattern.as_deref(),
                &target.category,
                RELATED_LIMIT,
            )
            .await
    }
}

impl<P, R, U> Clone for ProductService<P, R, U>
where
    P: ProductRepository,
    R: ReviewRepository,
    U: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            products: Arc::clone(&self.products),
            reviews: Arc::clone(&self.reviews),
            users: Arc::clone(&self.users),
        }
    }
}
