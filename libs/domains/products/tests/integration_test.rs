//! Integration tests for the Products domain
//!
//! These tests use real MongoDB via testcontainers to ensure:
//! - Filter documents select the right records
//! - Pagination math matches the stored data
//! - The review cascade actually clears the reviews collection
//! - Related-product matching behaves on real regex queries

use chrono::Utc;
use domain_products::service::ProductService;
use domain_products::*;
use domain_users::{MongoUserRepository, User, UserRepository};
use test_utils::{TestDataBuilder, TestMongo, assertions::*};
use uuid::Uuid;

fn service(
    db: ::mongodb::Database,
) -> ProductService<MongoProductRepository, MongoReviewRepository, MongoUserRepository> {
    ProductService::new(
        MongoProductRepository::new(db.clone()),
        MongoReviewRepository::new(db.clone()),
        MongoUserRepository::new(db),
    )
}

fn create_input(name: &str, category: Option<&str>, author: Uuid) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        description: format!("{} description", name),
        images: vec![format!("{}.jpg", name.to_lowercase().replace(' ', "-"))],
        author,
        category: category.map(str::to_string),
        color: None,
        price: 0.0,
        quantity: 1,
    }
}

async fn seed_user(db: &::mongodb::Database, username: &str, email: &str) -> Uuid {
    let now = Utc::now();
    let user = User {
        id: Uuid::now_v7(),
        username: username.to_string(),
        email: email.to_string(),
        roles: vec![],
        created_at: now,
        updated_at: now,
    };
    MongoUserRepository::new(db.clone()).insert(&user).await.unwrap();
    user.id
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_product() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_test");
    let repo = MongoProductRepository::new(db);
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = create_input(&builder.name("product", "main"), None, builder.user_id());
    let created = repo.create(input.clone()).await.unwrap();

    assert_eq!(created.name, input.name);
    assert_eq!(created.category, "general");
    assert_eq!(created.price, 0.0);
    assert_eq!(created.quantity, 1);
    assert_uuid_eq(created.author, input.author, "author");

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "product should exist");
    assert_uuid_eq(retrieved.id, created.id, "retrieved product id");
    assert_eq!(retrieved.images, created.images);
}

#[tokio::test]
async fn test_list_filters_by_category_with_sentinel() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_test");
    let repo = MongoProductRepository::new(db);
    let author = Uuid::now_v7();

    repo.create(create_input("Boots", Some("footwear"), author))
        .await
        .unwrap();
    repo.create(create_input("Mug", Some("kitchen"), author))
        .await
        .unwrap();

    let filtered = repo
        .list(ProductFilter {
            category: Some("footwear".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Boots");

    // "all" disables the clause
    let all = repo
        .list(ProductFilter {
            category: Some("all".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_list_price_filter_requires_both_bounds() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_test");
    let repo = MongoProductRepository::new(db);
    let author = Uuid::now_v7();

    for (name, price) in [("Cheap", 5.0), ("Mid", 15.0), ("Dear", 50.0)] {
        repo.create(CreateProduct {
            price,
            ..create_input(name, None, author)
        })
        .await
        .unwrap();
    }

    // Only minPrice: no price filter at all
    let unfiltered = repo
        .list(ProductFilter {
            min_price: Some(10.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(unfiltered.len(), 3);

    // Both bounds: closed range
    let ranged = repo
        .list(ProductFilter {
            min_price: Some(10.0),
            max_price: Some(20.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ranged.len(), 1);
    assert_eq!(ranged[0].name, "Mid");
}

#[tokio::test]
async fn test_list_sorted_newest_first_and_paginated() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_test");
    let repo = MongoProductRepository::new(db);
    let author = Uuid::now_v7();

    for i in 0..5 {
        repo.create(create_input(&format!("Item {}", i), None, author))
            .await
            .unwrap();
        // Distinct created_at values for a deterministic sort
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let first_page = repo
        .list(ProductFilter {
            page: 1,
            limit: 2,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(first_page.len(), 2);
    assert_eq!(first_page[0].name, "Item 4");
    assert_eq!(first_page[1].name, "Item 3");

    let third_page = repo
        .list(ProductFilter {
            page: 3,
            limit: 2,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(third_page.len(), 1);
    assert_eq!(third_page[0].name, "Item 0");
}

#[tokio::test]
async fn test_update_and_delete() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_test");
    let repo = MongoProductRepository::new(db);

    let created = repo
        .create(create_input("Lamp", Some("home"), Uuid::now_v7()))
        .await
        .unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateProduct {
                price: Some(25.0),
                image: Some("lamp-new.jpg".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 25.0);
    assert_eq!(updated.images, vec!["lamp-new.jpg".to_string()]);
    assert_eq!(updated.name, "Lamp");

    assert!(repo.delete(created.id).await.unwrap());
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());

    // Deleting again reports NotFound
    let result = repo.delete(created.id).await;
    assert!(matches!(result, Err(ProductError::NotFound(_))));
}

// ============================================================================
// Service Tests (page math, expansion, cascade, related)
// ============================================================================

#[tokio::test]
async fn test_page_totals_reflect_filtered_set() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_test");
    let svc = service(db.clone());
    let author = Uuid::now_v7();

    let repo = MongoProductRepository::new(db);
    for i in 0..7 {
        repo.create(create_input(&format!("Thing {}", i), Some("stuff"), author))
            .await
            .unwrap();
    }

    let page = svc
        .list_products(ProductFilter {
            limit: 3,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_products, 7);
    assert_eq!(page.total_pages, 3); // ceil(7/3)
    assert_eq!(page.products.len(), 3);

    // Out-of-range page keeps the totals
    let empty = svc
        .list_products(ProductFilter {
            page: 9,
            limit: 3,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(empty.products.is_empty());
    assert_eq!(empty.total_products, 7);
    assert_eq!(empty.total_pages, 3);
}

#[tokio::test]
async fn test_get_product_expands_author_and_reviews() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_test");
    let svc = service(db.clone());

    let author = seed_user(&db, "amr", "amr@example.com").await;
    let reviewer = seed_user(&db, "nour", "nour@example.com").await;

    let product = MongoProductRepository::new(db.clone())
        .create(create_input("Red Shoes", Some("footwear"), author))
        .await
        .unwrap();
    let other = MongoProductRepository::new(db.clone())
        .create(create_input("Hat", Some("apparel"), author))
        .await
        .unwrap();

    let reviews = MongoReviewRepository::new(db.clone());
    reviews
        .insert(&Review::new(product.id, reviewer, 5, "great shoes"))
        .await
        .unwrap();
    reviews
        .insert(&Review::new(product.id, reviewer, 4, "still great"))
        .await
        .unwrap();
    reviews
        .insert(&Review::new(other.id, reviewer, 1, "not these"))
        .await
        .unwrap();

    let detail = svc.get_product(product.id).await.unwrap();

    // Exactly the reviews whose foreign key matches
    assert_eq!(detail.reviews.len(), 2);
    assert!(detail.reviews.iter().all(|r| r.product_id == product.id));

    let expanded_author = assert_some(detail.product.author, "author should expand");
    assert_eq!(expanded_author.email, "amr@example.com");
    assert_eq!(expanded_author.username, "amr");

    let reviewer_view = assert_some(detail.reviews[0].user.clone(), "reviewer should expand");
    assert_eq!(reviewer_view.username, "nour");
}

#[tokio::test]
async fn test_get_product_unknown_id_is_not_found() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_test");
    let svc = service(db);

    let result = svc.get_product(Uuid::now_v7()).await;
    assert!(matches!(result, Err(ProductError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_cascades_reviews() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_test");
    let svc = service(db.clone());

    let product = MongoProductRepository::new(db.clone())
        .create(create_input("Doomed", None, Uuid::now_v7()))
        .await
        .unwrap();
    let survivor = MongoProductRepository::new(db.clone())
        .create(create_input("Survivor", None, Uuid::now_v7()))
        .await
        .unwrap();

    let reviews = MongoReviewRepository::new(db.clone());
    reviews
        .insert(&Review::new(product.id, Uuid::now_v7(), 2, "meh"))
        .await
        .unwrap();
    reviews
        .insert(&Review::new(product.id, Uuid::now_v7(), 3, "ok"))
        .await
        .unwrap();
    reviews
        .insert(&Review::new(survivor.id, Uuid::now_v7(), 5, "keep me"))
        .await
        .unwrap();

    svc.delete_product(product.id).await.unwrap();

    assert!(reviews.find_by_product(product.id).await.unwrap().is_empty());
    assert_eq!(reviews.find_by_product(survivor.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_related_matches_tokens_and_category() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_test");
    let svc = service(db.clone());
    let author = Uuid::now_v7();

    let repo = MongoProductRepository::new(db);
    let target = repo
        .create(create_input("Red Shoes Size 10", Some("footwear"), author))
        .await
        .unwrap();
    let token_match = repo
        .create(create_input("Blue Shoes", Some("apparel"), author))
        .await
        .unwrap();
    let category_match = repo
        .create(create_input("Hat", Some("footwear"), author))
        .await
        .unwrap();
    let unrelated = repo
        .create(create_input("Blender", Some("kitchen"), author))
        .await
        .unwrap();

    let related = svc.related_products(target.id).await.unwrap();
    let ids: Vec<Uuid> = related.iter().map(|p| p.id).collect();

    assert!(ids.contains(&token_match.id), "shared token should match");
    assert!(ids.contains(&category_match.id), "same category should match");
    assert!(!ids.contains(&unrelated.id), "unrelated must be excluded");
    assert!(!ids.contains(&target.id), "target must exclude itself");
}

#[tokio::test]
async fn test_related_single_char_name_matches_category_only() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog_test");
    let svc = service(db.clone());
    let author = Uuid::now_v7();

    let repo = MongoProductRepository::new(db);
    let target = repo
        .create(create_input("A", Some("footwear"), author))
        .await
        .unwrap();
    let same_category = repo
        .create(create_input("Boots", Some("footwear"), author))
        .await
        .unwrap();
    let other_category = repo
        .create(create_input("Avocado Slicer", Some("kitchen"), author))
        .await
        .unwrap();

    // No name token survives; an empty alternation must NOT match everything
    let related = svc.related_products(target.id).await.unwrap();
    let ids: Vec<Uuid> = related.iter().map(|p| p.id).collect();

    assert!(ids.contains(&same_category.id));
    assert!(!ids.contains(&other_category.id));
}
