//! # API REST
//!
//! REST API implementation for the CogKit results server.
//!
//! Handles:
//! - the `POST /api/upload` result-collection endpoint
//! - static hosting of the browser battery under the public asset root
//! - CORS for `/api/*`, derived from one optional configured domain
//! - OpenAPI/Swagger documentation
//!
//! The storage core lives in `cogkit-files`; this crate only translates HTTP
//! requests into policy checks and store calls.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use cogkit_files::{FileStore, UploadPolicy};

pub mod assets;
pub mod config;
pub mod error;
pub mod health;
pub mod upload;

pub use config::{cors_allowed_origins, ServerConfig};
pub use error::{ApiError, ApiResult, ResponseEnvelope};
pub use health::HealthRes;

/// Application state shared across REST API handlers.
///
/// All three pieces are resolved once at startup and immutable afterwards.
#[derive(Clone)]
pub struct AppState {
    pub policy: Arc<UploadPolicy>,
    pub store: Arc<FileStore>,
    pub server: Arc<ServerConfig>,
}

#[derive(OpenApi)]
#[openapi(
    paths(upload::upload_handler, health::health_handler),
    components(schemas(ResponseEnvelope, HealthRes))
)]
struct ApiDoc;

/// Builds the complete application router.
///
/// Layout (all under the configured base path prefix):
/// - `POST /api/upload`, `GET /api/health` — the API, with CORS applied only
///   here and only when a domain is configured
/// - `GET /` and `GET /<file>` — static assets
/// - `/swagger-ui` — OpenAPI documentation
///
/// The request body cap from the upload policy is enforced as a layer, so
/// oversized uploads are rejected at the framing level before any handler
/// buffers them.
pub fn app(state: AppState) -> Router {
    let base_path = state.server.base_path().to_string();

    let mut api = Router::new()
        .route("/upload", post(upload::upload_handler))
        .route("/health", get(health::health_handler));
    if let Some(origins) = cors_allowed_origins(state.server.allowed_domain()) {
        api = api.layer(cors_layer(&origins));
    }

    let routes = Router::new()
        .nest("/api", api)
        .route("/", get(assets::index_handler))
        .route("/*path", get(assets::static_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(state.policy.max_upload_bytes()))
        .with_state(state);

    if base_path.is_empty() {
        routes
    } else {
        Router::new().nest(&base_path, routes)
    }
}

fn cors_layer(origins: &[String; 2]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
