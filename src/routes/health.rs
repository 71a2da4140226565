// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Store connectivity diagnostic.
//!
//! Always answers 200; store problems are reported in the body.

use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/test", get(test_database))
}

#[derive(Debug, Serialize)]
pub struct DiagnosticResponse {
    pub backend: String,
    pub database: String,
    /// `None` when no store is configured
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}

async fn test_database(State(state): State<Arc<AppState>>) -> Json<DiagnosticResponse> {
    let mut response = DiagnosticResponse {
        backend: "Running".to_string(),
        database: "Not Available".to_string(),
        database_url: None,
        database_name: None,
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    if !state.store.is_available() {
        if state.config.database_url.is_some() {
            response.database = "Available but not initialized".to_string();
        }
        return Json(response);
    }

    response.database = "Available".to_string();
    response.database_url = Some(
        if state.config.database_url.is_some() {
            "Set"
        } else {
            "Not Set"
        }
        .to_string(),
    );
    response.database_name = state.store.database_name();
    response.connection_status = "Connected".to_string();

    match state.store.list_collections(MAX_COLLECTIONS).await {
        Ok(collections) => {
            response.collections = collections;
            response.database = "Connected & Working".to_string();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Store diagnostic failed");
            response.database = format!("Connected but Error: {}", truncate(&e.to_string()));
        }
    }

    Json(response)
}
