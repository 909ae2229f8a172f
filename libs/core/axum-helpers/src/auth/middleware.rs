use super::jwt::JwtAuth;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// Extract JWT from Authorization header or cookie
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    // Try Authorization header first: "Bearer <token>"
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        .or_else(|| {
            // Fallback to cookie: "access_token=<token>"
            headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
                        if parts.len() == 2 && parts[0] == "access_token" {
                            Some(parts[1].to_string())
                        } else {
                            None
                        }
                    })
                })
        })
}

/// JWT authentication middleware.
///
/// Validates the token from the Authorization header or cookie and inserts
/// [`super::JwtClaims`] into request extensions on success.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use axum::routing::patch;
/// use axum_helpers::{JwtAuth, auth::require_auth};
///
/// let protected_routes = Router::new()
///     .route("/update-product/{id}", patch(update_product))
///     .layer(axum::middleware::from_fn_with_state(auth.clone(), require_auth));
/// ```
pub async fn require_auth(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match extract_token_from_request(&headers) {
        Some(t) => t,
        None => {
            tracing::debug!("No JWT found in Authorization header or cookie");
            return Err(AppError::Unauthorized("No token provided".to_string()));
        }
    };

    let claims = match auth.verify_token(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return Err(AppError::Unauthorized("Invalid token".to_string()));
        }
    };

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Admin guard middleware.
///
/// Like [`require_auth`], but additionally requires the `admin` role.
/// Catalog mutations (product update) sit behind this guard.
pub async fn require_admin(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token_from_request(&headers)
        .ok_or_else(|| AppError::Unauthorized("No token provided".to_string()))?;

    let claims = auth.verify_token(&token).map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        AppError::Unauthorized("Invalid token".to_string())
    })?;

    if !claims.is_admin() {
        tracing::info!(user = %claims.sub, "Non-admin caller rejected");
        return Err(AppError::Forbidden(
            "Administrator role required".to_string(),
        ));
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ACCESS_TOKEN_TTL, JwtConfig};
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::{Router, middleware::from_fn_with_state};
    use tower::ServiceExt;

    fn app(auth: JwtAuth) -> Router {
        Router::new()
            .route("/guarded", get(|| async { "ok" }))
            .layer(from_fn_with_state(auth, require_admin))
    }

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("middleware-secret"))
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let response = app(auth())
            .oneshot(
                HttpRequest::builder()
                    .uri("/guarded")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_admin_is_403() {
        let auth = auth();
        let token = auth
            .create_token("7", "u@e.c", "U", &["user".to_string()], ACCESS_TOKEN_TTL)
            .unwrap();

        let response = app(auth)
            .oneshot(
                HttpRequest::builder()
                    .uri("/guarded")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_passes() {
        let auth = auth();
        let token = auth
            .create_token("1", "a@e.c", "A", &["admin".to_string()], ACCESS_TOKEN_TTL)
            .unwrap();

        let response = app(auth)
            .oneshot(
                HttpRequest::builder()
                    .uri("/guarded")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cookie_token_accepted() {
        let auth = auth();
        let token = auth
            .create_token("1", "a@e.c", "A", &["admin".to_string()], ACCESS_TOKEN_TTL)
            .unwrap();

        let response = app(auth)
            .oneshot(
                HttpRequest::builder()
                    .uri("/guarded")
                    .header("cookie", format!("access_token={}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
