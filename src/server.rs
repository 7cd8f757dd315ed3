// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

#[cfg(test)]
mod tests;

use std::net::SocketAddr;

use anyhow::{Context, Error};
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json as JsonBody, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{cow_json::Json, process_template::process_json_template};

pub struct ServerConfig {
    pub listen: SocketAddr,
    pub max_body_bytes: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    pub source_json: Json,
    pub destination_json_template: Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("template evaluation failed: {0}")]
    Evaluation(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

pub fn create_router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/v1", post(transform))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(config: ServerConfig) -> Result<(), Error> {
    let app = create_router(&config);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("cannot listen on {}", config.listen))?;
    info!("listening on {}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("cannot listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}

async fn health_check() -> JsonBody<serde_json::Value> {
    JsonBody(serde_json::json!({ "status": "ok" }))
}

async fn transform(JsonBody(request): JsonBody<TransformRequest>) -> Result<JsonBody<Json>, ApiError> {
    info!("transform request received");

    // Evaluation is CPU bound; keep it off the async workers.
    let output = tokio::task::spawn_blocking(move || {
        process_json_template(&request.source_json, &request.destination_json_template)
    })
    .await
    .map_err(|err| ApiError::Evaluation(err.to_string()))?;

    Ok(JsonBody(output))
}
