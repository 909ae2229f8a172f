use axum::Router;
use axum_helpers::JwtAuth;
use std::sync::Arc;

pub mod health;

use domain_media::FsImageIntake;
use domain_products::{
    mongodb::{MongoProductRepository, MongoReviewRepository},
    service::ProductService,
};
use domain_users::MongoUserRepository;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// This function takes a reference to AppState and initializes all services.
/// Returns a stateless Router (all sub-routers have state already applied);
/// only cheap handle clones remain.
pub fn routes(state: &crate::state::AppState) -> Router {
    let db = state.mongo.database(state.config.mongo.database());

    let service = ProductService::new(
        MongoProductRepository::new(db.clone()),
        MongoReviewRepository::new(db.clone()),
        MongoUserRepository::new(db),
    );
    let jwt = JwtAuth::new(&state.config.jwt);
    let intake = Arc::new(FsImageIntake::new(state.config.media_root.clone()));

    Router::new().nest(
        "/products",
        domain_products::handlers::router(service, jwt)
            .merge(domain_media::handlers::router(intake)),
    )
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app
/// router from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
