//! Products Domain
//!
//! The catalog core: product CRUD, filtered pagination, review reads with
//! cascade deletion, and the related-product lookup, on MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation, reference expansion
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (traits + MongoDB implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     mongodb::{MongoProductRepository, MongoReviewRepository},
//!     service::ProductService,
//! };
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::MongoUserRepository;
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! let service = ProductService::new(
//!     MongoProductRepository::new(db.clone()),
//!     MongoReviewRepository::new(db.clone()),
//!     MongoUserRepository::new(db),
//! );
//!
//! let jwt = JwtAuth::new(&JwtConfig::new("secret"));
//! let router = handlers::router(service, jwt);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod related;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, Product, ProductDetail, ProductFilter, ProductPage, ProductView, Review,
    ReviewView, UpdateProduct,
};
pub use mongodb::{MongoProductRepository, MongoReviewRepository, init_indexes};
pub use repository::{ProductRepository, ReviewRepository};
pub use service::ProductService;
