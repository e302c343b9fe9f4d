use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{jwt::AuthContext, repo::User},
    error::AppError,
    response::ApiResponse,
    state::AppState,
    videos::{
        dto::{AddVideoRequest, VideoResponse},
        repo,
    },
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/YTV/GetAllYTV", get(list_videos))
        .route("/YTV/GetbyIdYTV/:id", get(get_video))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/YTV/AddYTV", post(add_video))
        .route("/YTV/DeleteYTV/:id", delete(delete_video))
}

/// Resolve the bearer token's email claim to a user row.
async fn resolve_caller(state: &AppState, ctx: &AuthContext) -> Result<User, AppError> {
    User::find_by_email(&state.db, &ctx.email)
        .await?
        .ok_or_else(|| AppError::UserNotFound(ctx.email.clone()))
}

#[instrument(skip(state, payload))]
pub async fn add_video(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<AddVideoRequest>,
) -> Result<Json<ApiResponse<VideoResponse>>, AppError> {
    let url = payload.url.trim();
    if url.is_empty() {
        return Err(AppError::Validation("url is empty".into()));
    }

    let user = resolve_caller(&state, &ctx).await?;

    if repo::exists(&state.db, user.id, url).await? {
        warn!(user_id = %user.id, url, "duplicate video");
        return Err(AppError::DuplicateVideo);
    }

    // All-or-nothing: nothing is persisted when the resolver fails.
    let meta = state.oembed.resolve(url).await.map_err(|e| {
        warn!(user_id = %user.id, url, error = %e, "oembed fetch failed");
        AppError::MetadataFetch(e)
    })?;

    let video = repo::insert(&state.db, user.id, url, &meta).await?;

    info!(user_id = %user.id, video_id = video.id, "video added");
    Ok(Json(ApiResponse::ok(VideoResponse::from(video))))
}

#[instrument(skip(state))]
pub async fn list_videos(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<Vec<VideoResponse>>>, AppError> {
    let user = resolve_caller(&state, &ctx).await?;

    let videos = repo::list_by_owner(&state.db, user.id).await?;
    if videos.is_empty() {
        return Err(AppError::NotFound("No videos found for the user".into()));
    }

    let items = videos.into_iter().map(VideoResponse::from).collect();
    Ok(Json(ApiResponse::ok(items)))
}

#[instrument(skip(state))]
pub async fn get_video(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<VideoResponse>>, AppError> {
    let user = resolve_caller(&state, &ctx).await?;

    let video = repo::get_owned(&state.db, user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("No video found for the user".into()))?;

    Ok(Json(ApiResponse::ok(VideoResponse::from(video))))
}

#[instrument(skip(state))]
pub async fn delete_video(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    let user = resolve_caller(&state, &ctx).await?;

    if !repo::delete_owned(&state.db, user.id, id).await? {
        return Err(AppError::NotFound("No video found for the user".into()));
    }

    info!(user_id = %user.id, video_id = id, "video deleted");
    Ok(Json(ApiResponse::ok("Deleted successfully".into())))
}
