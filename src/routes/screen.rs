use axum::{extract::State, Json};

use crate::controller::{ScreenEvent, ScreenSnapshot};
use crate::error::Result;
use crate::AppState;

/// Current view of the shared screen session
///
/// GET /api/screen
pub async fn current_screen(State(state): State<AppState>) -> Json<ScreenSnapshot> {
    let screen = state.screen.lock().await;
    Json(screen.snapshot())
}

/// Apply a user action to the screen session and return the new view
///
/// The session lock is held across the store call, so actions are applied
/// one at a time in arrival order.
///
/// POST /api/screen/events
pub async fn screen_event(
    State(state): State<AppState>,
    Json(event): Json<ScreenEvent>,
) -> Result<Json<ScreenSnapshot>> {
    let mut screen = state.screen.lock().await;
    tracing::debug!("Screen event received on {} screen", screen.screen());

    screen.dispatch(event).await?;
    Ok(Json(screen.snapshot()))
}
