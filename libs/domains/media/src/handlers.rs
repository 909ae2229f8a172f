use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use axum_helpers::AppError;
use axum_helpers::errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::intake::ImageIntake;

/// OpenAPI documentation for the media endpoints
#[derive(OpenApi)]
#[openapi(
    paths(upload_images),
    components(responses(BadRequestValidationResponse, InternalServerErrorResponse)),
    tags(
        (name = "Media", description = "Image upload endpoints")
    )
)]
pub struct ApiDoc;

/// Create the media router
pub fn router<I: ImageIntake + 'static>(intake: Arc<I>) -> Router {
    Router::new()
        .route("/upload-images", post(upload_images))
        .with_state(intake)
}

/// Upload a batch of images
///
/// Accepts a JSON array of image payloads (`data:` URLs or already-hosted
/// `http(s)` URLs) and returns the stored-location identifiers in input
/// order. A missing body or anything that is not an array is a 400.
#[utoipa::path(
    post,
    path = "/upload-images",
    tag = "Media",
    request_body = Vec<String>,
    responses(
        (status = 200, description = "Stored locations, in input order", body = Vec<String>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_images<I: ImageIntake>(
    State(intake): State<Arc<I>>,
    payload: Result<Json<Vec<String>>, JsonRejection>,
) -> Result<Json<Vec<String>>, AppError> {
    let Json(payloads) =
        payload.map_err(|e| AppError::BadRequest(format!("Expected an image array: {}", e)))?;

    let locations = intake.store(&payloads).await.map_err(AppError::from)?;
    Ok(Json(locations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::MockImageIntake;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_upload_returns_locations() {
        let mut intake = MockImageIntake::new();
        intake
            .expect_store()
            .returning(|payloads| Ok(vec![format!("stored-{}", payloads.len())]));

        let app = router(Arc::new(intake));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload-images")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"["https://cdn.example.com/a.jpg"]"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_array_body() {
        let intake = MockImageIntake::new();

        let app = router(Arc::new(intake));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload-images")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"image": "x"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_missing_body_is_400() {
        let intake = MockImageIntake::new();

        let app = router(Arc::new(intake));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload-images")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_intake_failure_is_500() {
        let mut intake = MockImageIntake::new();
        intake
            .expect_store()
            .returning(|_| Err(crate::error::IntakeError::Storage("disk full".to_string())));

        let app = router(Arc::new(intake));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload-images")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"["https://cdn.example.com/a.jpg"]"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
