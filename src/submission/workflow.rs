use crate::api::{ApiError, MarketplaceApi, UploadedMedia};
use crate::media::{accept_files, MediaError, MediaFile, MediaPolicy};
use crate::models::CreatedAd;
use crate::submission::form::{compose, AdForm};
use crate::toast::ToastQueue;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error("upload failed: {0}")]
    Upload(#[source] ApiError),
    #[error("ad creation failed: {0}")]
    Create(#[source] ApiError),
}

impl SubmitError {
    /// Text for the failure toast
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Media(e) => e.to_string(),
            SubmitError::Upload(e) | SubmitError::Create(e) => e.user_message().to_string(),
        }
    }
}

/// Drives one ad draft from form state to a created ad
///
/// Steps run strictly in order: local validation, upload, compose, create.
/// The form survives any failure untouched so the user can retry.
pub struct AdSubmission<A: MarketplaceApi + ?Sized> {
    api: Arc<A>,
    toasts: ToastQueue,
    policy: MediaPolicy,
    form: AdForm,
    idempotency_key: String,
}

impl<A: MarketplaceApi + ?Sized> AdSubmission<A> {
    pub fn new(api: Arc<A>, toasts: ToastQueue, policy: MediaPolicy) -> Self {
        Self {
            api,
            toasts,
            policy,
            form: AdForm::default(),
            idempotency_key: Uuid::new_v4().to_string(),
        }
    }

    /// Start from a prefilled draft
    pub fn with_form(mut self, form: AdForm) -> Self {
        self.form = form;
        self
    }

    pub fn form(&self) -> &AdForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut AdForm {
        &mut self.form
    }

    pub fn policy(&self) -> &MediaPolicy {
        &self.policy
    }

    /// Key sent with every create attempt for the current draft
    pub fn idempotency_key(&self) -> &str {
        &self.idempotency_key
    }

    /// Attach newly picked files; a refusal is reported as a toast
    pub fn attach(&mut self, files: Vec<MediaFile>) -> bool {
        accept_files(&mut self.form.attachments, &self.policy, files, &self.toasts)
    }

    /// Discard the draft and start a new one
    pub fn reset(&mut self) {
        self.form.reset();
        self.idempotency_key = Uuid::new_v4().to_string();
    }

    /// Publish the draft
    ///
    /// `on_success` runs once, after the backend created the ad and before
    /// the form is reset.
    pub async fn submit<F>(&mut self, on_success: F) -> Result<CreatedAd, SubmitError>
    where
        F: FnOnce(&CreatedAd),
    {
        let files = self.form.attachments.files();
        if let Err(e) = self.policy.check_submission(files) {
            return Err(self.fail(e.into()));
        }

        info!("Uploading {} attachment(s)", files.len());
        let uploaded = match self.api.upload_files(files).await {
            Ok(uploaded) => uploaded,
            Err(e) => return Err(self.fail(SubmitError::Upload(e))),
        };

        let ad = compose(&self.form, &uploaded);

        let created = match self.api.create_ad(&ad, &self.idempotency_key).await {
            Ok(created) => created,
            Err(e) => {
                self.compensate(&uploaded, &e).await;
                return Err(self.fail(SubmitError::Create(e)));
            }
        };

        info!("Ad {} created", created.id);
        self.toasts
            .success("Ad published", "Your ad has been created successfully");
        on_success(&created);
        self.reset();

        Ok(created)
    }

    fn fail(&self, error: SubmitError) -> SubmitError {
        warn!("Ad submission failed: {}", error);
        self.toasts.error("Could not publish ad", error.user_message());
        error
    }

    /// Delete media uploaded for a create call the backend refused
    ///
    /// Skipped when the outcome of the create call is unknown, since the ad
    /// may exist and refer to these files.
    async fn compensate(&self, uploaded: &UploadedMedia, cause: &ApiError) {
        if !cause.is_definitive() {
            warn!("Create outcome unknown, keeping uploaded media");
            return;
        }

        let urls = uploaded.urls();
        if urls.is_empty() {
            return;
        }

        match self.api.delete_uploads(&urls).await {
            Ok(()) => info!("Removed {} orphaned upload(s)", urls.len()),
            Err(e) => warn!("Failed to remove orphaned uploads: {}", e),
        }
    }
}
