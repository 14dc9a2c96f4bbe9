use axum::Json;
use axum::http::{HeaderValue, header};
use axum::{Router, routing::get};
use serde_json::{Value, json};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::{Environment, ServerConfig};
use crate::weather::Clock;
use crate::weather_routes;

// 30 days, matching what browsers are usually told by default.
const HSTS_VALUE: &str = "max-age=2592000";

// Anything that goes in here must be cheap to clone, every handler gets a copy.
#[derive(Clone, Debug)]
pub struct AppState {
    pub clock: Clock,
}

pub fn create_app(config: &ServerConfig, clock: Clock) -> Router {
    let state = AppState { clock };

    let mut app = Router::new()
        .route("/health", get(health))
        .nest("/weatherforecast", weather_routes::routes(state))
        .layer(TraceLayer::new_for_http());

    log::debug!("serving assets from {}", config.assets_path.display());
    // ServeDir answers directory requests with their index.html.
    let assets_service = ServeDir::new(&config.assets_path);
    app = app.fallback_service(assets_service);

    with_environment(app, config.environment)
}

/// A panicking handler becomes a 500 in every environment. Production also
/// compresses responses and tells browsers to stick to https.
fn with_environment(app: Router, environment: Environment) -> Router {
    let app = app.layer(CatchPanicLayer::new());
    match environment {
        Environment::Development => app,
        Environment::Production => app.layer(CompressionLayer::new()).layer(
            SetResponseHeaderLayer::if_not_present(
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static(HSTS_VALUE),
            ),
        ),
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
