/// Name of the record store collection holding user documents
pub const USERS_COLLECTION: &str = "users";

// =============================================================================
// Notices
// =============================================================================

/// Shown after a registration is stored
pub const NOTICE_REGISTERED: &str = "User registered";

/// Shown after an edit is stored
pub const NOTICE_UPDATED: &str = "User updated";

/// Shown after a record is removed
pub const NOTICE_DELETED: &str = "User deleted";

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for an edit or delete that points at no record
pub const ERR_NO_RECORD_SELECTED: &str = "No record selected";
