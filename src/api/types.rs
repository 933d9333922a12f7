use crate::models::User;
use serde::{Deserialize, Serialize};

/// Stored media URLs returned by `POST /upload/files`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UploadedMedia {
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub video: Option<String>,
}

impl UploadedMedia {
    /// Every stored URL, photos first
    pub fn urls(&self) -> Vec<String> {
        self.photos.iter().cloned().chain(self.video.clone()).collect()
    }
}

/// Body of `DELETE /upload/files`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUploadsRequest {
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Result of toggling a favorite
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteState {
    pub is_favorite: bool,
}
