//! Record store holding the `users` collection
//!
//! Every operation completes exactly once, with a value or an error. Callers
//! decide what a failure means; the store never retries.

use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable};
use std::future::Future;

use crate::constants::USERS_COLLECTION;
use crate::db::{tables, Db};
use crate::error::{AppError, Result};
use crate::models::{UserDocument, UserFields, UserRecord};

const BINCODE_CONFIG: bincode::config::Configuration = bincode::config::standard();

/// Asynchronous access to the user collection
pub trait RecordStore: Send + Sync {
    /// All records, oldest first
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<UserRecord>>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = Result<Option<UserRecord>>> + Send;

    /// Store a new document and return its generated id
    fn add(&self, fields: UserFields) -> impl Future<Output = Result<String>> + Send;

    /// Overwrite every field of an existing document
    fn update(&self, id: &str, fields: UserFields) -> impl Future<Output = Result<()>> + Send;

    /// Remove a document; removing an unknown id is not an error
    fn delete(&self, id: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Record store backed by a redb table, one bincode document per id
#[derive(Clone)]
pub struct DocumentStore {
    db: Db,
}

impl DocumentStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }
}

/// Fresh opaque document id
fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

impl RecordStore for DocumentStore {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>> {
        let db = self.db.clone();

        let records = tokio::task::spawn_blocking(move || -> Result<Vec<UserRecord>> {
            let read_txn = db.begin_read()?;
            let table = read_txn.open_table(tables::USERS)?;

            let mut documents = Vec::new();
            for entry in table.iter()? {
                let (key, value) = entry?;
                let (doc, _): (UserDocument, _) =
                    bincode::serde::decode_from_slice(value.value(), BINCODE_CONFIG)?;
                documents.push((key.value().to_string(), doc));
            }

            // Keys are random; the insertion sequence keeps list indices stable
            documents.sort_by(|(a_id, a), (b_id, b)| {
                a.seq.cmp(&b.seq).then_with(|| a_id.cmp(b_id))
            });

            Ok(documents
                .into_iter()
                .map(|(id, doc)| doc.into_record(id))
                .collect())
        })
        .await??;

        tracing::debug!("Fetched {} user records", records.len());
        Ok(records)
    }

    async fn get(&self, id: &str) -> Result<Option<UserRecord>> {
        let db = self.db.clone();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || -> Result<Option<UserRecord>> {
            let read_txn = db.begin_read()?;
            let table = read_txn.open_table(tables::USERS)?;

            let Some(bytes) = table.get(id.as_str())? else {
                return Ok(None);
            };
            let (doc, _): (UserDocument, _) =
                bincode::serde::decode_from_slice(bytes.value(), BINCODE_CONFIG)?;

            Ok(Some(doc.into_record(id)))
        })
        .await?
    }

    async fn add(&self, fields: UserFields) -> Result<String> {
        let db = self.db.clone();

        let id = tokio::task::spawn_blocking(move || -> Result<String> {
            let write_txn = db.begin_write()?;
            let id = {
                let mut sequences = write_txn.open_table(tables::SEQUENCES)?;
                let seq = sequences
                    .get(USERS_COLLECTION)?
                    .map(|last| last.value())
                    .unwrap_or(0)
                    + 1;
                sequences.insert(USERS_COLLECTION, seq)?;

                let mut table = write_txn.open_table(tables::USERS)?;

                let mut id = generate_id();
                while table.get(id.as_str())?.is_some() {
                    id = generate_id();
                }

                let doc = UserDocument::new(fields, seq, Utc::now().timestamp_micros());
                let bytes = bincode::serde::encode_to_vec(&doc, BINCODE_CONFIG)?;
                table.insert(id.as_str(), bytes.as_slice())?;
                id
            };
            write_txn.commit()?;
            Ok(id)
        })
        .await??;

        tracing::info!("Added user record {}", id);
        Ok(id)
    }

    async fn update(&self, id: &str, fields: UserFields) -> Result<()> {
        let db = self.db.clone();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(tables::USERS)?;

                let mut doc = match table.get(id.as_str())? {
                    Some(bytes) => {
                        let (doc, _): (UserDocument, _) =
                            bincode::serde::decode_from_slice(bytes.value(), BINCODE_CONFIG)?;
                        doc
                    }
                    None => {
                        tracing::warn!("Update for unknown user record {}", id);
                        return Err(AppError::RecordNotFound);
                    }
                };

                doc.overwrite(fields, Utc::now().timestamp_micros());
                let bytes = bincode::serde::encode_to_vec(&doc, BINCODE_CONFIG)?;
                table.insert(id.as_str(), bytes.as_slice())?;
            }
            write_txn.commit()?;

            tracing::info!("Updated user record {}", id);
            Ok(())
        })
        .await?
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let db = self.db.clone();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let write_txn = db.begin_write()?;
            let removed = {
                let mut table = write_txn.open_table(tables::USERS)?;
                let removed = table.remove(id.as_str())?.is_some();
                removed
            };
            write_txn.commit()?;

            if removed {
                tracing::info!("Deleted user record {}", id);
            } else {
                tracing::debug!("Delete for unknown user record {}", id);
            }
            Ok(())
        })
        .await?
    }
}
