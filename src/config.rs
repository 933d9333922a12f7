use crate::media::FormVariant;
use anyhow::{Context, Result};
use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the REST API (default: `http://localhost:5000/api`).
    pub api_base_url: String,
    /// Bearer token to start with, if already signed in.
    pub api_token: Option<String>,
    /// HTTP request timeout (default: 30 s).
    pub request_timeout: Duration,
    /// Which ad form's media limits apply (default: `modal`).
    pub form_variant: FormVariant,
    /// How long a toast stays visible (default: 5000 ms).
    pub toast_duration: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".into(),
            api_token: None,
            request_timeout: Duration::from_secs(30),
            form_variant: FormVariant::Modal,
            toast_duration: crate::toast::DEFAULT_TOAST_DURATION,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `API_BASE_URL`         | `http://localhost:5000/api` |
    /// | `API_TOKEN`            | unset                       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    /// | `AD_FORM_VARIANT`      | `modal`                     |
    /// | `TOAST_DURATION_MS`    | `5000`                      |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let api_base_url = lookup("API_BASE_URL").unwrap_or(defaults.api_base_url);
        let api_token = lookup("API_TOKEN").filter(|t| !t.trim().is_empty());

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => defaults.request_timeout,
        };

        let form_variant = match lookup("AD_FORM_VARIANT") {
            Some(raw) => raw
                .parse::<FormVariant>()
                .context("Invalid AD_FORM_VARIANT")?,
            None => defaults.form_variant,
        };

        let toast_duration = match lookup("TOAST_DURATION_MS") {
            Some(raw) => Duration::from_millis(
                raw.trim()
                    .parse::<u64>()
                    .context("TOAST_DURATION_MS must be a whole number of milliseconds")?,
            ),
            None => defaults.toast_duration,
        };

        Ok(Self {
            api_base_url,
            api_token,
            request_timeout,
            form_variant,
            toast_duration,
        })
    }
}
