use serde::Serialize;

use crate::models::UserRecord;

/// What the current screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum View {
    Login { email: String, password: String },
    List { users: Vec<UserRecord> },
    Edit { id: String, email: String, password: String },
    /// Nothing to draw
    Blank,
}

/// Rendered view plus the latest notice
#[derive(Debug, Clone, Serialize)]
pub struct ScreenSnapshot {
    pub view: View,
    pub notice: Option<String>,
}
