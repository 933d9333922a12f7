pub mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use error::ApiError;
pub use http::HttpApi;
pub use traits::MarketplaceApi;
pub use types::{AuthResponse, Credentials, FavoriteState, Registration, UploadedMedia};
