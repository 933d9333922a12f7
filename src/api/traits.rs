use crate::api::error::ApiError;
use crate::api::types::{AuthResponse, Credentials, FavoriteState, Registration, UploadedMedia};
use crate::media::MediaFile;
use crate::models::{CreatedAd, NewAd, User};
use async_trait::async_trait;

/// The marketplace REST backend as seen by this client
///
/// Implemented over HTTP by [`HttpApi`](crate::api::HttpApi); tests drive the
/// workflows through in-memory implementations.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Upload files as multipart `files`, returning the stored URLs
    async fn upload_files(&self, files: &[MediaFile]) -> Result<UploadedMedia, ApiError>;

    /// Remove previously uploaded files that no ad refers to
    async fn delete_uploads(&self, urls: &[String]) -> Result<(), ApiError>;

    /// Create an ad. The key lets the backend drop duplicate submissions.
    async fn create_ad(&self, ad: &NewAd, idempotency_key: &str) -> Result<CreatedAd, ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError>;

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError>;

    /// The user behind the current token
    async fn current_user(&self) -> Result<User, ApiError>;

    async fn toggle_favorite(&self, ad_id: &str) -> Result<FavoriteState, ApiError>;

    /// Replace (or clear) the bearer token sent with every request
    fn set_token(&self, token: Option<String>);
}
