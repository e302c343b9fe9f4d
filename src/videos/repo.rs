use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{error::AppError, oembed::OembedMetadata};

/// Saved video row. Metadata columns are never NULL; a resolver that omitted
/// a field stored an empty string.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Video {
    pub id: i32,
    pub user_id: Uuid,
    pub url: String,
    pub title: String,
    pub author_name: String,
    pub thumbnail_url: String,
    pub created_at: OffsetDateTime,
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// Whether the owner already saved this URL.
pub async fn exists(db: &PgPool, user_id: Uuid, url: &str) -> Result<bool, AppError> {
    let row: Option<(i32,)> = sqlx::query_as(
        r#"
        SELECT id FROM videos
        WHERE user_id = $1 AND url = $2
        "#,
    )
    .bind(user_id)
    .bind(url)
    .fetch_optional(db)
    .await?;
    Ok(row.is_some())
}

/// Insert a resolved video. Two concurrent adds of the same URL race past
/// the existence check; the UNIQUE (user_id, url) constraint settles it and
/// the loser gets `DuplicateVideo`.
pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    url: &str,
    meta: &OembedMetadata,
) -> Result<Video, AppError> {
    let video = sqlx::query_as::<_, Video>(
        r#"
        INSERT INTO videos (user_id, url, title, author_name, thumbnail_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, url, title, author_name, thumbnail_url, created_at
        "#,
    )
    .bind(user_id)
    .bind(url)
    .bind(&meta.title)
    .bind(&meta.author_name)
    .bind(&meta.thumbnail_url)
    .fetch_one(db)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::DuplicateVideo
        } else {
            AppError::Database(e)
        }
    })?;
    Ok(video)
}

/// All of the owner's videos in insertion order.
pub async fn list_by_owner(db: &PgPool, user_id: Uuid) -> Result<Vec<Video>, AppError> {
    let rows = sqlx::query_as::<_, Video>(
        r#"
        SELECT id, user_id, url, title, author_name, thumbnail_url, created_at
        FROM videos
        WHERE user_id = $1
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Fetch one video, filtered on owner as well as id so a guessed id
/// belonging to someone else reads as absent.
pub async fn get_owned(db: &PgPool, user_id: Uuid, id: i32) -> Result<Option<Video>, AppError> {
    let video = sqlx::query_as::<_, Video>(
        r#"
        SELECT id, user_id, url, title, author_name, thumbnail_url, created_at
        FROM videos
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(video)
}

/// Hard-delete one of the owner's videos. Returns false when the row is
/// absent or owned by someone else.
pub async fn delete_owned(db: &PgPool, user_id: Uuid, id: i32) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        DELETE FROM videos
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}
