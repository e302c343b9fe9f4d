use serde::{Deserialize, Serialize};

use crate::videos::repo::Video;

/// Request body for saving a video.
#[derive(Debug, Deserialize)]
pub struct AddVideoRequest {
    #[serde(rename = "YTVUrl")]
    pub url: String,
}

/// Public projection of a saved video. Owner id and timestamps stay internal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub id: i32,
    pub title: String,
    pub author_name: String,
    pub thumbnail_url: String,
    pub url: String,
}

impl From<Video> for VideoResponse {
    fn from(v: Video) -> Self {
        Self {
            id: v.id,
            title: v.title,
            author_name: v.author_name,
            thumbnail_url: v.thumbnail_url,
            url: v.url,
        }
    }
}
