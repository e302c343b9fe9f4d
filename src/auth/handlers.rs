use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AuthResponse, CheckPasswordRequest, LoginRequest, MeResponse, RegisterRequest,
            ResetPasswordRequest,
        },
        jwt::{AuthContext, JwtKeys},
        password::{hash_password, verify_password},
        repo::User,
    },
    error::AppError,
    response::ApiResponse,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/Auth/Register", post(register))
        .route("/Auth/Login/Email", post(login))
        .route("/Auth/CheckPassword", post(check_password))
        .route("/Auth/ResetPassword", post(reset_password))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::Validation("Invalid email format".into()));
    }
    if payload.password.trim().is_empty() {
        warn!("empty password");
        return Err(AppError::Validation("Password cannot be empty".into()));
    }

    // Pre-check keeps the common case friendly; the unique constraint on
    // users.email still decides concurrent registrations.
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.email, &hash).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.email, &user.roles)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(ApiResponse::ok(AuthResponse {
        email: user.email,
        token,
    })))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::Validation("Invalid email format".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password cannot be empty".into()));
    }

    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(AppError::Validation("User not found".into()));
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.email, &user.roles)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(ApiResponse::ok(AuthResponse {
        email: user.email,
        token,
    })))
}

#[instrument(skip(state, payload))]
pub async fn check_password(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<CheckPasswordRequest>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password cannot be empty".into()));
    }

    let user = User::find_by_email(&state.db, &ctx.email)
        .await?
        .ok_or_else(|| AppError::UserNotFound(ctx.email.clone()))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "password check failed");
        return Err(AppError::InvalidCredentials);
    }

    Ok(Json(ApiResponse::ok("Password check successful".into())))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    if payload.new_password.trim().is_empty() {
        return Err(AppError::Validation("New password cannot be empty".into()));
    }

    let user = User::find_by_email(&state.db, &ctx.email)
        .await?
        .ok_or_else(|| AppError::UserNotFound(ctx.email.clone()))?;

    if !verify_password(&payload.current_password, &user.password_hash)? {
        warn!(user_id = %user.id, "reset with wrong current password");
        return Err(AppError::InvalidCredentials);
    }

    let hash = hash_password(&payload.new_password)?;
    User::update_password(&state.db, user.id, &hash).await?;

    info!(user_id = %user.id, "password reset");
    Ok(Json(ApiResponse::ok("Password reset successfully".into())))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<MeResponse>>, AppError> {
    let user = User::find_by_email(&state.db, &ctx.email)
        .await?
        .ok_or_else(|| AppError::UserNotFound(ctx.email.clone()))?;

    Ok(Json(ApiResponse::ok(MeResponse {
        email: user.email,
        roles: user.roles,
    })))
}
