use super::newtypes::{CategoryId, PostId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recipe. Counts are only present when read through `get_posts_with_counts`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub image_url: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub like_count: Option<i64>,
    #[serde(default)]
    pub comment_count: Option<i64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CreatePostParams {
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub avatar_url: Option<String>,
    pub category_id: Option<CategoryId>,
}

/// Image picked in the post form, read fully into memory before upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

/// Object name inside the image bucket: title, upload time in milliseconds and the
/// original file name, so repeated uploads of the same file never collide.
pub fn image_object_path(title: &str, uploaded_at: DateTime<Utc>, file_name: &str) -> String {
    format!("{title}-{}-{file_name}", uploaded_at.timestamp_millis())
}
