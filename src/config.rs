use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expire_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OembedConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub oembed: OembedConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "watchkids".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "watchkids-users".into()),
            expire_days: std::env::var("JWT_EXPIRE_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(3),
        };
        let oembed = OembedConfig {
            endpoint: std::env::var("OEMBED_ENDPOINT")
                .unwrap_or_else(|_| "https://www.youtube.com/oembed".into()),
            timeout_secs: std::env::var("OEMBED_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(10),
        };
        Ok(Self {
            database_url,
            jwt,
            oembed,
        })
    }
}
