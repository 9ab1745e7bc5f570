use serde::{Deserialize, Serialize};

/// Editable fields of a user entry, as submitted by a form or API client
///
/// No format is enforced on either field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub email: String,
    pub password: String,
}

impl UserFields {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Reset both fields to empty strings
    pub fn clear(&mut self) {
        self.email.clear();
        self.password.clear();
    }
}

/// User document stored in redb
/// Uses Unix timestamps (microseconds) for compact storage with bincode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    /// Insertion sequence within the collection; fixes list order
    pub seq: u64,
    pub email: String,
    pub password: String,
    /// When the document was added
    pub created_at: i64,
    /// When the document was last overwritten
    pub updated_at: i64,
}

impl UserDocument {
    pub fn new(fields: UserFields, seq: u64, now: i64) -> Self {
        Self {
            seq,
            email: fields.email,
            password: fields.password,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every field, keeping the sequence and creation time
    pub fn overwrite(&mut self, fields: UserFields, now: i64) {
        self.email = fields.email;
        self.password = fields.password;
        self.updated_at = now;
    }

    pub fn into_record(self, id: String) -> UserRecord {
        UserRecord {
            id,
            email: self.email,
            password: self.password,
        }
    }
}

/// User model for API responses and the list screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Store-assigned document id
    pub id: String,
    pub email: String,
    pub password: String,
}

impl UserRecord {
    pub fn fields(&self) -> UserFields {
        UserFields::new(self.email.clone(), self.password.clone())
    }
}
