use serde::{Deserialize, Serialize};

/// Row of the local cache table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CachedUser {
    /// Integer primary key, chosen by the caller
    pub uid: i64,
    pub username: String,
    pub password: String,
}

impl CachedUser {
    pub fn new(uid: i64, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            uid,
            username: username.into(),
            password: password.into(),
        }
    }
}
