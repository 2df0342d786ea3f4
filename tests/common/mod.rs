use std::sync::Arc;

use anyhow::{Context, Result};
use uuid::Uuid;

use notes_api_rust::auth::{generate_jwt, Claims};
use notes_api_rust::models::User;
use notes_api_rust::routes;
use notes_api_rust::state::AppState;
use notes_api_rust::store::{MemoryNoteStore, MemoryUserStore};

pub struct TestServer {
    pub base_url: String,
    pub user_id: Uuid,
    pub token: String,
}

/// Start the real router in-process on an ephemeral port, with one seeded
/// account ("dan") and a valid bearer token for it. Each call gets an
/// isolated store, so tests do not observe each other's notes.
pub async fn start_server() -> Result<TestServer> {
    let users = MemoryUserStore::new();
    let user_id = Uuid::new_v4();
    users
        .insert(User {
            id: user_id,
            username: "dan".to_string(),
        })
        .await;

    let state = AppState::new(Arc::new(MemoryNoteStore::new()), Arc::new(users));
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let base_url = format!("http://{}", listener.local_addr()?);

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    // Development config carries a non-empty secret, so minting works
    let token = generate_jwt(Claims::new("dan")).context("failed to mint test token")?;

    Ok(TestServer {
        base_url,
        user_id,
        token,
    })
}
