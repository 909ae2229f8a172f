use chrono::{DateTime, Utc};
use domain_users::UserSummary;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Category assigned when a product is created without one
pub const DEFAULT_CATEGORY: &str = "general";

/// Sentinel filter value meaning "no filter"
pub const FILTER_ALL: &str = "all";

/// Product entity - represents a catalog product stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Ordered stored-location strings; never empty once the product exists
    pub images: Vec<String>,
    /// Reference to the authoring user; resolved at read time, dangling
    /// references tolerated
    pub author: Uuid,
    /// Category, `"general"` when not supplied at creation
    pub category: String,
    /// Optional color attribute
    pub color: Option<String>,
    /// Unit price
    pub price: f64,
    /// Stock quantity
    pub quantity: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    /// At least one stored-location string
    #[validate(length(min = 1))]
    pub images: Vec<String>,
    pub author: Uuid,
    pub category: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 0))]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// DTO for updating an existing product
///
/// All fields optional; `image` replaces the whole image sequence with a
/// single stored location (the upload endpoint produces locations).
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub image: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub quantity: Option<i64>,
}

/// Query filters for listing products
///
/// `"all"` for category or color means "no filter". The price range applies
/// only when both bounds are present and finite; a single bound is ignored.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Filter by category (exact match, "all" disables)
    pub category: Option<String>,
    /// Filter by color (exact match, "all" disables)
    pub color: Option<String>,
    /// Lower price bound; only applied together with maxPrice
    pub min_price: Option<f64>,
    /// Upper price bound; only applied together with minPrice
    pub max_price: Option<f64>,
    /// 1-indexed page number
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            color: None,
            min_price: None,
            max_price: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl ProductFilter {
    /// Effective page, clamped to >= 1
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    /// Effective page size, falling back to the default for zero/negative
    pub fn limit(&self) -> i64 {
        if self.limit < 1 { default_limit() } else { self.limit }
    }

    /// Number of records to skip for the effective page
    pub fn offset(&self) -> u64 {
        ((self.page() - 1) * self.limit()) as u64
    }
}

/// Product with its author reference expanded
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    /// Expanded author projection; absent for dangling references
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserSummary>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductView {
    pub fn new(product: Product, author: Option<UserSummary>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            images: product.images,
            author,
            category: product.category,
            color: product.color,
            price: product.price,
            quantity: product.quantity,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// One page of a filtered product listing
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<ProductView>,
    /// ceil(totalProducts / limit)
    pub total_pages: u64,
    /// Total records matching the filter, across all pages
    pub total_products: u64,
}

/// Review entity - physically its own collection, logically owned by the
/// product for lifecycle purposes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Review {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Owning product
    pub product_id: Uuid,
    /// Reviewing user
    pub user_id: Uuid,
    /// 1-5 stars
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(product_id: Uuid, user_id: Uuid, rating: i32, comment: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            product_id,
            user_id,
            rating,
            comment: comment.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Review with its user reference expanded
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewView {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Expanded reviewer projection; absent for dangling references
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReviewView {
    pub fn new(review: Review, user: Option<UserSummary>) -> Self {
        Self {
            id: review.id,
            product_id: review.product_id,
            user,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

/// A product together with all of its reviews
///
/// The two reads behind this are independent; they are not transactionally
/// consistent with each other.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductDetail {
    pub product: ProductView,
    pub reviews: Vec<ReviewView>,
}

impl Product {
    /// Create a new product from the CreateProduct DTO, applying defaults
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            images: input.images,
            author: input.author,
            category: input
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            color: input.color,
            price: input.price,
            quantity: input.quantity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from the UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(image) = update.image {
            // A freshly uploaded image replaces the whole sequence
            self.images = vec![image];
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(color) = update.color {
            self.color = Some(color);
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> CreateProduct {
        CreateProduct {
            name: "Red Shoes Size 10".to_string(),
            description: "Comfortable running shoes".to_string(),
            images: vec!["shoes-front.jpg".to_string()],
            author: Uuid::now_v7(),
            category: None,
            color: None,
            price: 0.0,
            quantity: 1,
        }
    }

    #[test]
    fn test_create_applies_defaults() {
        let product = Product::new(create_input());
        assert_eq!(product.category, DEFAULT_CATEGORY);
        assert_eq!(product.price, 0.0);
        assert_eq!(product.quantity, 1);
        assert!(!product.images.is_empty());
    }

    #[test]
    fn test_create_keeps_explicit_category() {
        let input = CreateProduct {
            category: Some("footwear".to_string()),
            ..create_input()
        };
        let product = Product::new(input);
        assert_eq!(product.category, "footwear");
    }

    #[test]
    fn test_create_validation_rejects_empty_images() {
        let input = CreateProduct {
            images: vec![],
            ..create_input()
        };
        assert!(validator::Validate::validate(&input).is_err());
    }

    #[test]
    fn test_create_validation_rejects_negative_price() {
        let input = CreateProduct {
            price: -1.0,
            ..create_input()
        };
        assert!(validator::Validate::validate(&input).is_err());
    }

    #[test]
    fn test_apply_update_partial() {
        let mut product = Product::new(create_input());
        let before = product.images.clone();

        product.apply_update(UpdateProduct {
            price: Some(49.5),
            ..Default::default()
        });

        assert_eq!(product.price, 49.5);
        assert_eq!(product.images, before);
        assert_eq!(product.name, "Red Shoes Size 10");
    }

    #[test]
    fn test_apply_update_replaces_image_sequence() {
        let mut product = Product::new(CreateProduct {
            images: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            ..create_input()
        });

        product.apply_update(UpdateProduct {
            image: Some("c.jpg".to_string()),
            ..Default::default()
        });

        assert_eq!(product.images, vec!["c.jpg".to_string()]);
    }

    #[test]
    fn test_filter_effective_page_and_limit() {
        let filter = ProductFilter {
            page: 0,
            limit: -5,
            ..Default::default()
        };
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.limit(), 10);
        assert_eq!(filter.offset(), 0);

        let filter = ProductFilter {
            page: 3,
            limit: 20,
            ..Default::default()
        };
        assert_eq!(filter.offset(), 40);
    }

    #[test]
    fn test_filter_query_string_keys() {
        // Wire keys are camelCase: minPrice/maxPrice
        let filter: ProductFilter =
            serde_json::from_str(r#"{"minPrice": 10.0, "maxPrice": 20.0}"#).unwrap();
        assert_eq!(filter.min_price, Some(10.0));
        assert_eq!(filter.max_price, Some(20.0));
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 10);
    }
}
