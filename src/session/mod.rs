//! Authentication state for the running client.

pub mod guard;

pub use guard::{GuardDecision, RouteGuard, HOME_PATH, LOGIN_PATH};

use crate::api::{ApiError, AuthResponse, Credentials, MarketplaceApi, Registration};
use crate::models::User;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Loading,
    Authenticated(User),
    Unauthenticated,
}

/// Holds who is signed in and keeps the API token in step with it
pub struct Session<A: MarketplaceApi + ?Sized> {
    api: Arc<A>,
    state: SessionState,
}

impl<A: MarketplaceApi + ?Sized> Session<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// Settle the session from whatever token the API already carries
    pub async fn restore(&mut self) -> &SessionState {
        self.state = SessionState::Loading;

        self.state = match self.api.current_user().await {
            Ok(user) => {
                info!("Session restored for {}", user.email);
                SessionState::Authenticated(user)
            }
            Err(ApiError::Unauthorized { .. }) => {
                self.api.set_token(None);
                SessionState::Unauthenticated
            }
            Err(e) => {
                warn!("Could not restore session: {}", e);
                SessionState::Unauthenticated
            }
        };

        &self.state
    }

    pub async fn login(&mut self, credentials: &Credentials) -> Result<User, ApiError> {
        self.state = SessionState::Loading;
        let result = self.api.login(credentials).await;
        self.settle(result)
    }

    pub async fn register(&mut self, registration: &Registration) -> Result<User, ApiError> {
        self.state = SessionState::Loading;
        let result = self.api.register(registration).await;
        self.settle(result)
    }

    pub fn logout(&mut self) {
        self.api.set_token(None);
        self.state = SessionState::Unauthenticated;
    }

    pub fn guard(&self, guard: RouteGuard, requested_path: &str) -> GuardDecision {
        guard.decide(&self.state, requested_path)
    }

    fn settle(&mut self, result: Result<AuthResponse, ApiError>) -> Result<User, ApiError> {
        match result {
            Ok(auth) => {
                info!("Signed in as {}", auth.user.email);
                self.api.set_token(Some(auth.token));
                self.state = SessionState::Authenticated(auth.user.clone());
                Ok(auth.user)
            }
            Err(e) => {
                self.state = SessionState::Unauthenticated;
                Err(e)
            }
        }
    }
}
