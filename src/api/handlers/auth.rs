use crate::{
    types::{AppError, JwtResponse, MessageResponse, Result, SignInRequest, SignUpRequest},
    validation::{validate_signin, validate_signup},
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};

/// Registers user with given credentials.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Registers the user and returns the information message", body = MessageResponse),
        (status = 400, description = "Validation failure"),
        (status = 409, description = "Username or email is already in use")
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let violations = validate_signup(&payload);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    state.user_service.register(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully!".to_string(),
        }),
    ))
}

/// Authenticates user with given credentials.
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Authenticates the user and returns jwt token", body = JwtResponse),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> Result<Json<JwtResponse>> {
    let violations = validate_signin(&payload);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let jwt = state.user_service.authenticate(&payload).await?;

    Ok(Json(JwtResponse {
        jwt,
        message: "User is authenticated!".to_string(),
    }))
}
