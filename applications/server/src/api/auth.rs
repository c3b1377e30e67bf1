/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use spendwise_core::{
    types::{normalize_email, NewUser, User},
    SpendwiseError,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub token: String,
    pub token_type: &'static str,
}

/// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LoginResponse>)> {
    let Json(req) = payload?;

    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or(SpendwiseError::MissingField("password"))?;
    let name = req.name.ok_or(SpendwiseError::MissingField("name"))?;
    let email = req.email.ok_or(SpendwiseError::MissingField("email"))?;

    let password_hash = app_state.auth_service.hash_password(&password)?;
    let new_user = NewUser::new(name, &email, password_hash)?;

    let user = app_state
        .users
        .create_user(new_user)
        .await
        .map_err(|e| match e {
            SpendwiseError::Duplicate(_) => ServerError::Conflict("User already exists".to_string()),
            other => other.into(),
        })?;

    tracing::info!("Registered user {}", user.id);

    let response = issue_tokens(&app_state, user, "User registered successfully")?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(req) = payload?;

    let email = req.email.ok_or(SpendwiseError::MissingField("email"))?;
    let password = req.password.ok_or(SpendwiseError::MissingField("password"))?;
    let email = normalize_email(&email)?;

    let (user, password_hash) = app_state
        .users
        .find_credentials(&email)
        .await?
        .ok_or_else(|| ServerError::Auth(INVALID_CREDENTIALS.to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&password, &password_hash)?
    {
        return Err(ServerError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let response = issue_tokens(&app_state, user, "Login successful")?;
    Ok(Json(response))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<RefreshResponse>> {
    let Json(req) = payload?;

    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    // Account may have been removed since the refresh token was issued
    if app_state.users.get_user(&user_id).await?.is_none() {
        return Err(ServerError::Auth("Token is not valid".to_string()));
    }

    let token = app_state.auth_service.create_access_token(&user_id)?;

    Ok(Json(RefreshResponse {
        token,
        token_type: "Bearer",
    }))
}

fn issue_tokens(app_state: &AppState, user: User, message: &'static str) -> Result<LoginResponse> {
    let token = app_state.auth_service.create_access_token(&user.id)?;
    let refresh_token = app_state.auth_service.create_refresh_token(&user.id)?;

    Ok(LoginResponse {
        message,
        token,
        refresh_token,
        token_type: "Bearer",
        user,
    })
}
