use crate::auth::jwt::AuthService;
use crate::types::{AppError, Claims};
use crate::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};

const UNAUTHORIZED_USER: &str = "User is unauthorized!";

/// Validates the bearer token on every protected request.
///
/// Missing or malformed `Authorization` headers are rejected outright; token
/// decode failures carry their specific cause. The subject is resolved
/// against the user store on each request - no session state is kept.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated("Missing Authorization header".to_string()))?;

    let token = AuthService::parse_bearer(auth_header)
        .ok_or_else(|| AppError::Unauthenticated(UNAUTHORIZED_USER.to_string()))?;

    let claims = state.auth_service.verify_token(token)?;

    let user = state
        .db
        .get_user_by_username(&claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Invalid user name: {}", claims.sub)))?;

    if !state.auth_service.is_valid(token, &user.username)? {
        return Err(AppError::Unauthenticated(UNAUTHORIZED_USER.to_string()));
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extractor for the claims attached by [`auth_middleware`].
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
