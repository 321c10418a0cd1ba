use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{app, AppState, ServerConfig};
use cogkit_files::{FileStore, UploadPolicy, DEFAULT_MAX_UPLOAD_MB};

/// Main entry point for the CogKit results server
///
/// Starts the HTTP server that collects cognitive-test result CSVs and hosts
/// the browser battery's static assets.
///
/// # Environment Variables
/// - `COGKIT_ADDR`: listen address (default: "0.0.0.0:3000")
/// - `APP_BASE_URL`: base URL path prefix for all routes (default: empty)
/// - `APP_UPLOAD_FOLDER`: storage directory for uploads (default: "uploads")
/// - `APP_MAX_FILE_SIZE_MB`: request body cap in MiB (default: 8)
/// - `APP_PUBLIC_DIR`: public asset root (default: "public")
/// - `APP_ALLOWED_DOMAIN`: domain granted CORS access to `/api/*` (default:
///   unset, meaning same-origin only)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, storage setup, or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cogkit_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("COGKIT_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let base_path = std::env::var("APP_BASE_URL").unwrap_or_default();
    let upload_dir =
        PathBuf::from(std::env::var("APP_UPLOAD_FOLDER").unwrap_or_else(|_| "uploads".into()));
    let public_dir =
        PathBuf::from(std::env::var("APP_PUBLIC_DIR").unwrap_or_else(|_| "public".into()));
    let allowed_domain = std::env::var("APP_ALLOWED_DOMAIN").ok();

    let max_upload_mb = match std::env::var("APP_MAX_FILE_SIZE_MB") {
        Ok(v) => v.trim().parse::<u64>().map_err(|e| {
            anyhow::anyhow!("APP_MAX_FILE_SIZE_MB must be a positive integer: {e}")
        })?,
        Err(_) => DEFAULT_MAX_UPLOAD_MB,
    };

    let policy = UploadPolicy::new(
        upload_dir,
        usize::try_from(max_upload_mb * 1024 * 1024)?,
        ["csv"],
        "text/csv",
    )?;

    // Created eagerly and idempotently so the first upload never races
    // directory setup.
    let store = FileStore::open(policy.storage_dir())?;

    let server = ServerConfig::new(base_path, public_dir, allowed_domain);

    tracing::info!("++ Starting CogKit results server on {}", addr);
    tracing::info!(
        storage_dir = %store.storage_dir().display(),
        public_dir = %server.public_dir().display(),
        base_path = %server.base_path(),
        cors_domain = ?server.allowed_domain(),
        "resolved configuration"
    );

    let state = AppState {
        policy: Arc::new(policy),
        store: Arc::new(store),
        server: Arc::new(server),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
