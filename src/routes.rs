use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::notes;
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Protected note collection
        .merge(note_routes(state))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// One collection path, four verbs, all behind the JWT gate. A request that
/// fails authentication never reaches a handler.
fn note_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/notes",
            get(notes::get_all_notes)
                .post(notes::create_new_note)
                .patch(notes::update_note)
                .delete(notes::delete_note),
        )
        .route_layer(middleware::from_fn(jwt_auth_middleware))
        .with_state(state)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Notes API (Rust)",
        "version": version,
        "description": "JWT-protected note management service built with Rust (Axum)",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "notes": "/notes GET/POST/PATCH/DELETE (protected)",
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}
