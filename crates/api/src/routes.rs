use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use synth::{ComponentRequest, ComponentSynthesizer};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{CorsOrigins, ServerConfig};
use crate::error::ApiError;

pub struct AppState {
    project_name: String,
    synthesizer: ComponentSynthesizer,
}

#[derive(Serialize)]
struct RootResponse {
    name: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Build the application router: `/` plus the API routes under the configured
/// prefix, wrapped in tracing and CORS layers.
pub fn router(server: &ServerConfig, synthesizer: ComponentSynthesizer) -> Result<Router> {
    let state = Arc::new(AppState {
        project_name: server.project_name.clone(),
        synthesizer,
    });

    let api = Router::new()
        .route("/health", get(health_check))
        .route("/messages/create_component", post(create_component));

    let prefix = server.api_prefix.trim_end_matches('/');
    let app = Router::new().route("/", get(root));
    let app = if prefix.is_empty() {
        app.merge(api)
    } else if prefix.starts_with('/') {
        app.nest(prefix, api)
    } else {
        app.nest(&format!("/{prefix}"), api)
    };

    Ok(app
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_origins)?))
}

fn cors_layer(origins: &CorsOrigins) -> Result<CorsLayer> {
    match origins {
        CorsOrigins::Any => Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)),
        CorsOrigins::List(list) => {
            let origins = list
                .iter()
                .map(|o| {
                    HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin: {o}"))
                })
                .collect::<Result<Vec<_>>>()?;

            // Credentials rule out wildcards, so methods and headers are mirrored.
            Ok(CorsLayer::new()
                .allow_origin(origins)
                .allow_credentials(true)
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request()))
        }
    }
}

async fn root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        name: state.project_name.clone(),
    })
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Generate a component and return its HTML as plain text.
async fn create_component(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ComponentRequest>,
) -> Result<String, ApiError> {
    tracing::info!(
        model = state.synthesizer.model(),
        message_chars = payload.message.chars().count(),
        "Creating component"
    );

    let component = state.synthesizer.synthesize(&payload.message).await?;

    Ok(component.html)
}
