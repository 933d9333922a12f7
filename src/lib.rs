pub mod api;
pub mod config;
pub mod media;
pub mod models;
pub mod session;
pub mod submission;
pub mod toast;

pub use api::{ApiError, HttpApi, MarketplaceApi};
pub use config::ClientConfig;
pub use media::{AttachmentSet, MediaFile, MediaPolicy};
pub use session::{Session, SessionState};
pub use submission::{AdForm, AdSubmission, SubmitError};
pub use toast::ToastQueue;
