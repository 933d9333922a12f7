use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rentals_client::api::{Credentials, HttpApi, MarketplaceApi};
use rentals_client::media::{MediaFile, MediaPolicy};
use rentals_client::session::Session;
use rentals_client::submission::{AdForm, AdSubmission};
use rentals_client::toast::ToastQueue;
use rentals_client::ClientConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line client for the rentals marketplace API
#[derive(Parser, Debug)]
#[command(name = "rentals-client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check media files against the configured ad form limits
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Publish an ad from a JSON draft with the given media
    Submit {
        /// Ad form saved as JSON
        draft: PathBuf,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Add an ad to favorites, or remove it if already there
    Favorite { ad_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "rentals_client=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env()?;
    info!("🏠 Rentals client → {}", config.api_base_url);

    let toasts = ToastQueue::new(config.toast_duration);

    let result = match &cli.command {
        Command::Validate { files } => validate(&config, files).await,
        Command::Submit { draft, files } => submit(&config, &toasts, draft, files).await,
        Command::Favorite { ad_id } => favorite(&config, ad_id).await,
    };

    for toast in toasts.snapshot() {
        match toast.message {
            Some(message) => println!("[{:?}] {}: {}", toast.severity, toast.title, message),
            None => println!("[{:?}] {}", toast.severity, toast.title),
        }
    }
    toasts.clear();

    result
}

async fn load_files(paths: &[PathBuf]) -> Result<Vec<MediaFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(MediaFile::from_path(path).await?);
    }
    Ok(files)
}

async fn validate(config: &ClientConfig, paths: &[PathBuf]) -> Result<()> {
    let files = load_files(paths).await?;
    let policy = MediaPolicy::for_variant(config.form_variant);

    match policy.check_submission(&files) {
        Ok(()) => {
            println!("✅ {} file(s) accepted ({:?} form)", files.len(), config.form_variant);
            Ok(())
        }
        Err(reason) => anyhow::bail!("❌ {}", reason),
    }
}

async fn signed_in_api(config: &ClientConfig) -> Result<Arc<HttpApi>> {
    let api = Arc::new(
        HttpApi::new(&config.api_base_url, config.request_timeout)?
            .with_token(config.api_token.clone()),
    );

    let mut session = Session::new(api.clone());

    if config.api_token.is_some() {
        session.restore().await;
    }

    if !session.is_authenticated() {
        let email = std::env::var("API_EMAIL").context("Set API_TOKEN or API_EMAIL/API_PASSWORD")?;
        let password = std::env::var("API_PASSWORD").context("API_PASSWORD must be set")?;

        session
            .login(&Credentials { email, password })
            .await
            .map_err(|e| anyhow::anyhow!("Login failed: {}", e.user_message()))?;
    }

    if let Some(user) = session.user() {
        info!("Signed in as {} ({:?})", user.name, user.role);
    }

    Ok(api)
}

async fn submit(
    config: &ClientConfig,
    toasts: &ToastQueue,
    draft_path: &Path,
    paths: &[PathBuf],
) -> Result<()> {
    let draft = tokio::fs::read_to_string(draft_path)
        .await
        .with_context(|| format!("Failed to read draft {}", draft_path.display()))?;
    let form: AdForm = serde_json::from_str(&draft).context("Draft is not a valid ad form")?;

    let api = signed_in_api(config).await?;
    let policy = MediaPolicy::for_variant(config.form_variant);
    let mut submission = AdSubmission::new(api, toasts.clone(), policy).with_form(form);

    if !submission.attach(load_files(paths).await?) {
        anyhow::bail!("Attachments rejected");
    }

    let created = submission
        .submit(|ad| info!("💾 Published ad {}", ad.id))
        .await?;

    println!("{}", created.id);
    Ok(())
}

async fn favorite(config: &ClientConfig, ad_id: &str) -> Result<()> {
    let api = signed_in_api(config).await?;

    let state = api.toggle_favorite(ad_id).await.map_err(|e| {
        warn!("Favorite toggle failed: {}", e);
        anyhow::anyhow!(e.user_message().to_string())
    })?;

    if state.is_favorite {
        println!("⭐ {} added to favorites", ad_id);
    } else {
        println!("☆ {} removed from favorites", ad_id);
    }
    Ok(())
}
