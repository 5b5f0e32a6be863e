use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config;
use crate::database::manager;
use crate::handlers::{admin, public};
use crate::middleware;
use crate::state::AppState;

/// Start the HTTP server. The bind port comes from the CLI override when
/// given, otherwise from configuration (env-overridable via FIBRA_PORT).
pub async fn run(port_override: Option<u16>) -> anyhow::Result<()> {
    let config = config::config();
    let state = AppState::from_config(config)?;

    // Best-effort: the server still comes up (degraded /health) when the
    // store is unreachable at boot.
    if let Err(e) = manager::run_migrations(&state.pool).await {
        tracing::warn!("migrations not applied at startup: {}", e);
    }

    let port = port_override.unwrap_or(config.server.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("fibra-api listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server")?;
    Ok(())
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(session_routes(state.clone()))
        .nest("/api/admin", admin_routes(state.clone()))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/streets", get(public::streets::list))
        .route("/api/streets/:id", get(public::streets::get))
        .route("/api/suggestions", post(public::suggestions::create))
        .route(
            "/api/oauth/google/redirect_url",
            get(public::auth::google_redirect_url),
        )
        .route("/api/sessions", post(public::auth::create_session))
        .route("/api/logout", get(public::auth::logout))
        .route("/api/maps/key", get(public::maps::key))
}

fn session_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/users/me", get(public::auth::me))
        .layer(axum_middleware::from_fn_with_state(
            state,
            middleware::session_auth,
        ))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/streets", post(admin::streets::create))
        .route(
            "/streets/:id",
            put(admin::streets::update).delete(admin::streets::remove),
        )
        .route("/suggestions", get(admin::suggestions::list))
        .route("/suggestions/:id/review", put(admin::suggestions::review))
        .route("/users", post(admin::users::register))
        .route("/photos", post(admin::photos::upload))
        .route(
            "/photos/:id",
            get(admin::photos::list_for_street).delete(admin::photos::remove),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn_with_state(
                    state.clone(),
                    middleware::session_auth,
                ))
                .layer(axum_middleware::from_fn_with_state(
                    state,
                    middleware::require_admin,
                )),
        )
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = config::config()
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "fibra-api",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Municipal cabling-progress tracking API",
        "endpoints": {
            "streets": "/api/streets[/:id] (public, read-only)",
            "suggestions": "/api/suggestions (public, submit)",
            "session": "/api/sessions, /api/users/me, /api/logout",
            "admin": "/api/admin/* (active admins only)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match manager::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok",
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string(),
            })),
        ),
    }
}
