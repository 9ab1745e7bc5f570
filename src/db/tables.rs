use redb::TableDefinition;

use crate::constants::USERS_COLLECTION;

/// Users collection: document id -> UserDocument (bincode)
pub const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new(USERS_COLLECTION);

/// Per-collection insertion counters: collection name -> last sequence handed out
pub const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");
