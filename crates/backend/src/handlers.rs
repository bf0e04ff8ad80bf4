use axum::{
    extract::{Query, State},
    Json,
};
use serde_derive::Deserialize;
use std::time::Duration;
use tracing::info;

use model::UserData;

use crate::AppState;

/// keeps a delayed reply well inside the 30s `TimeoutLayer`
pub const MAX_DELAY_MS: u64 = 10_000;

#[derive(Deserialize)]
pub struct UserQuery {
    /// milliseconds to hold the response, to leave room for a cancel
    pub delay: Option<u64>,
}

pub async fn get_user(
    State(app): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Json<UserData> {
    if let Some(delay) = query.delay {
        let delay = delay.min(MAX_DELAY_MS);
        info!("hold user response for {} ms", delay);
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    Json(UserData::clone(&app.user))
}
