// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document store layer.
//!
//! Every write stamps `created_at` and assigns a time-ordered document ID,
//! whichever backend is in use:
//! - Firestore (production)
//! - In-memory (local development and tests)
//! - Unavailable (no connection string, or connecting failed)

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::Config;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

const MEMORY_URL_SCHEME: &str = "memory://";
const FIRESTORE_URL_SCHEME: &str = "firestore://";

/// Storage namespace for each entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Participant,
    SessionTopic,
    PictureCard,
    VoiceNote,
    Thread,
    Attendance,
    Pitch,
    Selection,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Participant,
        Collection::SessionTopic,
        Collection::PictureCard,
        Collection::VoiceNote,
        Collection::Thread,
        Collection::Attendance,
        Collection::Pitch,
        Collection::Selection,
    ];

    /// Collection name in the backing store (lowercased type name).
    pub const fn as_str(self) -> &'static str {
        match self {
            Collection::Participant => "participant",
            Collection::SessionTopic => "sessiontopic",
            Collection::PictureCard => "picturecard",
            Collection::VoiceNote => "voicenote",
            Collection::Thread => "thread",
            Collection::Attendance => "attendance",
            Collection::Pitch => "pitch",
            Collection::Selection => "selection",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact-match constraints on record fields. Empty matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(&'static str, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`.
    pub fn eq(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.conditions.push((field, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[(&'static str, String)] {
        &self.conditions
    }

    /// Check a serialized document against every condition.
    pub fn matches(&self, doc: &serde_json::Value) -> bool {
        self.conditions
            .iter()
            .all(|(field, value)| doc.get(field).and_then(|v| v.as_str()) == Some(value.as_str()))
    }
}

/// A record as persisted: the entity's fields plus store-assigned metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord<T> {
    /// Document ID (UUIDv7, so ID order is insertion order)
    pub id: String,
    /// Stamped on insert. Absent only on documents written by other tools.
    #[serde(
        default,
        with = "crate::time_utils::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub record: T,
}

/// Serialize a record into the owned JSON object both backends persist.
fn to_document<T: Serialize>(record: &T) -> Result<serde_json::Value, AppError> {
    let doc = serde_json::to_value(record)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("serialize record")))?;

    if !doc.is_object() {
        return Err(AppError::Internal(anyhow::anyhow!(
            "record must serialize to a JSON object"
        )));
    }
    Ok(doc)
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
    Unavailable,
}

/// Handle to the document store, shared by all request handlers.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Backend,
}

impl DocumentStore {
    /// Connect to the store named by `config.database_url`.
    ///
    /// Returns an unavailable store when no URL is configured. Connection
    /// failures are returned so the caller can decide to degrade.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let Some(url) = config.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL not set, document store unavailable");
            return Ok(Self::unavailable());
        };

        if url.starts_with(MEMORY_URL_SCHEME) {
            tracing::info!("Using in-memory document store");
            return Ok(Self::in_memory());
        }

        let project_id = url.strip_prefix(FIRESTORE_URL_SCHEME).unwrap_or(url);
        let project_id = project_id.trim_end_matches('/');
        if project_id.is_empty() {
            return Err(AppError::Database(format!(
                "DATABASE_URL has no project id: {url}"
            )));
        }

        let db = FirestoreDb::new(project_id, config.database_name.as_deref()).await?;
        Ok(Self {
            backend: Backend::Firestore(db),
        })
    }

    /// Store with no backend; every operation fails with `StoreUnavailable`.
    pub fn unavailable() -> Self {
        Self {
            backend: Backend::Unavailable,
        }
    }

    /// Fresh, empty in-process store.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(MemoryDb::new()),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, Backend::Unavailable)
    }

    /// Name of the database in use, if any.
    pub fn database_name(&self) -> Option<String> {
        match &self.backend {
            Backend::Firestore(db) => Some(db.database_name().to_string()),
            Backend::Memory(_) => Some(MemoryDb::DATABASE_NAME.to_string()),
            Backend::Unavailable => None,
        }
    }

    /// Insert a record, stamping `created_at`. Returns the new document ID.
    pub async fn create<T>(&self, collection: Collection, record: &T) -> Result<String, AppError>
    where
        T: Serialize + Sync,
    {
        self.create_at(collection, record, Utc::now()).await
    }

    /// Insert a record with an explicit creation time (imports and backfills).
    pub async fn create_at<T>(
        &self,
        collection: Collection,
        record: &T,
        created_at: DateTime<Utc>,
    ) -> Result<String, AppError>
    where
        T: Serialize + Sync,
    {
        let stored = StoredRecord {
            id: uuid::Uuid::now_v7().to_string(),
            created_at: Some(created_at),
            record: to_document(record)?,
        };

        match &self.backend {
            Backend::Firestore(db) => db.insert(collection, &stored).await?,
            Backend::Memory(db) => db.insert(collection, &stored)?,
            Backend::Unavailable => return Err(AppError::StoreUnavailable),
        }

        tracing::debug!(%collection, id = %stored.id, "Document created");
        Ok(stored.id)
    }

    /// All records matching `filter`, in insertion order.
    pub async fn list<T>(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<StoredRecord<T>>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        let records = match &self.backend {
            Backend::Firestore(db) => db.query(collection, filter).await?,
            Backend::Memory(db) => db.query(collection, filter)?,
            Backend::Unavailable => return Err(AppError::StoreUnavailable),
        };

        tracing::debug!(%collection, count = records.len(), "Documents listed");
        Ok(records)
    }

    /// Number of records matching `filter`.
    pub async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.count(collection, filter).await,
            Backend::Memory(db) => Ok(db.count(collection, filter)),
            Backend::Unavailable => Err(AppError::StoreUnavailable),
        }
    }

    /// Up to `limit` collection names present in the store.
    pub async fn list_collections(&self, limit: usize) -> Result<Vec<String>, AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.list_collections(limit).await,
            Backend::Memory(db) => Ok(db.list_collections(limit)),
            Backend::Unavailable => Err(AppError::StoreUnavailable),
        }
    }
}
