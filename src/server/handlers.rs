//! HTTP route handlers
//!
//! This module provides HTTP route handler functions.

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde_json::json;

/// Health check endpoint handler
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "model": state.generator.model(),
        "outputMode": state.images.mode().to_string(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
