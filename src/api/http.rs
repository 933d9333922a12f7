use crate::api::error::ApiError;
use crate::api::traits::MarketplaceApi;
use crate::api::types::{
    AuthResponse, Credentials, DeleteUploadsRequest, FavoriteState, Registration, UploadedMedia,
};
use crate::media::MediaFile;
use crate::models::{CreatedAd, NewAd, User};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::sync::RwLock;
use std::time::Duration;
use tracing::{debug, info, warn};

const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// reqwest-backed marketplace client
///
/// Owns the base URL and injects the bearer token into every request.
pub struct HttpApi {
    client: Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl HttpApi {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let raw = base_url.as_ref().trim_end_matches('/');
        let base_url =
            Url::parse(raw).with_context(|| format!("Invalid API base URL: {}", raw))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL {} cannot carry a path", raw);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rentals-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            token: RwLock::new(None),
        })
    }

    pub fn with_token(self, token: Option<String>) -> Self {
        self.set_token(token);
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::RequestBuild {
                details: format!("{} cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(segments)?;
        debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        Ok(match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::checked(builder).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode {
            details: e.to_string(),
        })
    }

    async fn checked(builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".into());
            warn!("Backend returned status: {}", status);
            return Err(ApiError::from_response(status, &text));
        }

        Ok(response)
    }

    async fn multipart_form(files: &[MediaFile]) -> Result<Form, ApiError> {
        let mut form = Form::new();

        for file in files {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|e| ApiError::RequestBuild {
                    details: format!("failed to read {}: {}", file.path.display(), e),
                })?;

            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str(&file.mime)
                .map_err(|e| ApiError::RequestBuild {
                    details: e.to_string(),
                })?;

            form = form.part("files", part);
        }

        Ok(form)
    }
}

#[async_trait]
impl MarketplaceApi for HttpApi {
    #[tracing::instrument(skip(self, files), fields(count = files.len()))]
    async fn upload_files(&self, files: &[MediaFile]) -> Result<UploadedMedia, ApiError> {
        let form = Self::multipart_form(files).await?;
        let uploaded: UploadedMedia =
            Self::send(self.request(Method::POST, &["upload", "files"])?.multipart(form)).await?;

        info!(
            "Uploaded {} photo(s){}",
            uploaded.photos.len(),
            if uploaded.video.is_some() { " and a video" } else { "" }
        );
        Ok(uploaded)
    }

    #[tracing::instrument(skip(self, urls), fields(count = urls.len()))]
    async fn delete_uploads(&self, urls: &[String]) -> Result<(), ApiError> {
        let body = DeleteUploadsRequest {
            urls: urls.to_vec(),
        };
        Self::checked(self.request(Method::DELETE, &["upload", "files"])?.json(&body)).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, ad), fields(title = %ad.title))]
    async fn create_ad(&self, ad: &NewAd, idempotency_key: &str) -> Result<CreatedAd, ApiError> {
        let builder = self
            .request(Method::POST, &["ads"])?
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key)
            .json(ad);
        Self::send(builder).await
    }

    #[tracing::instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        Self::send(self.request(Method::POST, &["auth", "login"])?.json(credentials)).await
    }

    #[tracing::instrument(skip(self, registration), fields(email = %registration.email))]
    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        Self::send(self.request(Method::POST, &["auth", "register"])?.json(registration)).await
    }

    #[tracing::instrument(skip(self))]
    async fn current_user(&self) -> Result<User, ApiError> {
        Self::send(self.request(Method::GET, &["auth", "me"])?).await
    }

    #[tracing::instrument(skip(self))]
    async fn toggle_favorite(&self, ad_id: &str) -> Result<FavoriteState, ApiError> {
        Self::send(self.request(Method::POST, &["favorites", ad_id, "toggle"])?).await
    }

    fn set_token(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }
}
