use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::schema::GatewaySchema;

pub fn router() -> Router<GatewaySchema> {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "Parking gateway is healthy"
    }))
}
