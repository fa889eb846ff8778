mod api;
mod auth;
mod db;
mod models;
mod raw_sql;
mod schema;

use axum::extract::{FromRef, MatchedPath};
use axum::http::Request;
use axum::middleware;
use axum::Router;
use foodcoma_core::{AiConfig, MockGateway, OpenAiGateway, RecipeModelGateway, UploadStore};
use std::env;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: db::DbPool,
    pub gateway: Arc<dyn RecipeModelGateway>,
    pub uploads: UploadStore,
}

impl FromRef<AppState> for db::DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

fn init_telemetry() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn build_gateway(config: AiConfig) -> Arc<dyn RecipeModelGateway> {
    if config.mock {
        tracing::info!("MOCK_AI set, using the mock recipe gateway");
        Arc::new(MockGateway)
    } else {
        tracing::info!(model = %config.model, "Using the OpenAI recipe gateway");
        Arc::new(OpenAiGateway::new(config))
    }
}

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json().unwrap();
        println!("{}", spec);
        return;
    }

    init_telemetry();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = db::create_pool(&database_url);

    let ai_config = AiConfig::from_env().expect("AI gateway configuration is incomplete");
    let gateway = build_gateway(ai_config);

    let uploads_dir =
        env::var("FOODCOMA_UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string());
    let uploads = UploadStore::new(&uploads_dir);

    let state = AppState {
        pool,
        gateway,
        uploads,
    };

    // Public routes (no auth required)
    let public_router = api::public::router();

    // Protected routes (auth required)
    let protected_router = Router::new()
        .nest("/api/test", api::testing::router())
        .nest("/api/auth", api::account::router())
        .nest("/api/recipes", api::recipes::router())
        .nest("/api/ingredients", api::ingredients::router())
        .nest("/api/mix", api::mix::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let app = Router::new()
        .merge(public_router)
        .merge(protected_router)
        .nest_service("/uploads", ServeDir::new(&uploads_dir))
        .merge(swagger_ui)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    // Don't create a span at all for noisy endpoints
                    if matched_path == "/api/test/unauthed-ping" {
                        tracing::trace_span!("http_request")
                    } else {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            path = %matched_path,
                        )
                    }
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        // Skip logging for noisy endpoints (trace-level spans)
                        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                            return;
                        }
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        );

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());
    tracing::info!("Swagger UI available at http://localhost:3000/swagger-ui/");
    tracing::info!("OpenAPI spec available at http://localhost:3000/api-docs/openapi.json");

    axum::serve(listener, app).await.unwrap();
}
