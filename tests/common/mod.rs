#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use rentals_client::api::{
    ApiError, AuthResponse, Credentials, FavoriteState, MarketplaceApi, Registration,
    UploadedMedia,
};
use rentals_client::media::{MediaFile, MEGABYTE};
use rentals_client::models::{CreatedAd, NewAd, Role, User};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

/// A request the fake backend received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Upload(Vec<String>),
    DeleteUploads(Vec<String>),
    CreateAd { ad: NewAd, key: String },
    Login(String),
    Register(String),
    CurrentUser,
    ToggleFavorite(String),
}

/// How a scripted call should fail
#[derive(Debug, Clone)]
pub enum Failure {
    Rejected {
        status: u16,
        message: Option<&'static str>,
    },
    Undecodable,
}

impl Failure {
    fn into_error(self) -> ApiError {
        match self {
            Failure::Rejected { status, message } => {
                let body = match message {
                    Some(m) => serde_json::json!({ "message": m }).to_string(),
                    None => String::new(),
                };
                ApiError::from_response(StatusCode::from_u16(status).unwrap(), &body)
            }
            Failure::Undecodable => ApiError::Decode {
                details: "expected value at line 1 column 1".into(),
            },
        }
    }
}

/// In-memory stand-in for the marketplace backend
#[derive(Default)]
pub struct FakeApi {
    pub calls: Mutex<Vec<Call>>,
    pub upload_failures: Mutex<VecDeque<Failure>>,
    pub create_failures: Mutex<VecDeque<Failure>>,
    pub delete_failures: Mutex<VecDeque<Failure>>,
    pub user: Mutex<Option<User>>,
    pub token: Mutex<Option<String>>,
    pub favorites: Mutex<HashSet<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_upload(&self, failure: Failure) {
        self.upload_failures.lock().unwrap().push_back(failure);
    }

    pub fn fail_create(&self, failure: Failure) {
        self.create_failures.lock().unwrap().push_back(failure);
    }

    pub fn fail_delete(&self, failure: Failure) {
        self.delete_failures.lock().unwrap().push_back(failure);
    }

    pub fn signed_in_as(&self, user: User) {
        *self.user.lock().unwrap() = Some(user);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    pub fn created_ads(&self) -> Vec<(NewAd, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateAd { ad, key } => Some((ad, key)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn scripted(queue: &Mutex<VecDeque<Failure>>) -> Result<(), ApiError> {
        match queue.lock().unwrap().pop_front() {
            Some(failure) => Err(failure.into_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MarketplaceApi for FakeApi {
    async fn upload_files(&self, files: &[MediaFile]) -> Result<UploadedMedia, ApiError> {
        self.record(Call::Upload(files.iter().map(|f| f.name.clone()).collect()));
        Self::scripted(&self.upload_failures)?;

        let mut uploaded = UploadedMedia::default();
        for file in files {
            let url = format!("/uploads/{}", file.name);
            if file.is_video() {
                uploaded.video = Some(url);
            } else {
                uploaded.photos.push(url);
            }
        }
        Ok(uploaded)
    }

    async fn delete_uploads(&self, urls: &[String]) -> Result<(), ApiError> {
        self.record(Call::DeleteUploads(urls.to_vec()));
        Self::scripted(&self.delete_failures)
    }

    async fn create_ad(&self, ad: &NewAd, idempotency_key: &str) -> Result<CreatedAd, ApiError> {
        self.record(Call::CreateAd {
            ad: ad.clone(),
            key: idempotency_key.to_string(),
        });
        Self::scripted(&self.create_failures)?;

        Ok(serde_json::from_value(serde_json::json!({
            "_id": format!("ad-{}", self.created_ads().len()),
            "title": ad.title,
        }))
        .unwrap())
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.record(Call::Login(credentials.email.clone()));
        if credentials.password != "secret" {
            return Err(Failure::Rejected {
                status: 401,
                message: Some("Invalid email or password"),
            }
            .into_error());
        }

        let user = user(&credentials.email, Role::User);
        *self.user.lock().unwrap() = Some(user.clone());
        Ok(AuthResponse {
            token: "token-1".into(),
            user,
        })
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.record(Call::Register(registration.email.clone()));
        let mut user = user(&registration.email, Role::User);
        user.name = registration.name.clone();
        *self.user.lock().unwrap() = Some(user.clone());
        Ok(AuthResponse {
            token: "token-new".into(),
            user,
        })
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.record(Call::CurrentUser);
        match (self.token(), self.user.lock().unwrap().clone()) {
            (Some(_), Some(user)) => Ok(user),
            _ => Err(Failure::Rejected {
                status: 401,
                message: None,
            }
            .into_error()),
        }
    }

    async fn toggle_favorite(&self, ad_id: &str) -> Result<FavoriteState, ApiError> {
        self.record(Call::ToggleFavorite(ad_id.to_string()));
        let mut favorites = self.favorites.lock().unwrap();
        let is_favorite = if favorites.remove(ad_id) {
            false
        } else {
            favorites.insert(ad_id.to_string());
            true
        };
        Ok(FavoriteState { is_favorite })
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }
}

pub fn user(email: &str, role: Role) -> User {
    User {
        id: format!("user-{}", email),
        name: "Test User".into(),
        email: email.into(),
        role,
    }
}

pub fn photo(name: &str, mb: u64) -> MediaFile {
    MediaFile::new(name, "image/jpeg", mb * MEGABYTE, name)
}

pub fn video(name: &str, mb: u64) -> MediaFile {
    MediaFile::new(name, "video/mp4", mb * MEGABYTE, name)
}
