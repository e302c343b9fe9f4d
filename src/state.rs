use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;
use crate::oembed::OembedClient;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub oembed: OembedClient,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let oembed = OembedClient::new(&config.oembed)?;

        Ok(Self { db, config, oembed })
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>, oembed: OembedClient) -> Self {
        Self { db, config, oembed }
    }
}
