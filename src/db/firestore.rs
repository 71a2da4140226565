// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore backend for the document store.

use super::{Collection, Filter, StoredRecord};
use crate::error::AppError;
use firestore::{FirestoreListCollectionIdsParams, FirestoreListingSupport};
use serde::{de::DeserializeOwned, Deserialize};

const DEFAULT_DATABASE_ID: &str = "(default)";

/// Row shape returned by a count aggregation.
#[derive(Debug, Deserialize)]
struct CountAggregate {
    count: u64,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
    database_id: String,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str, database_id: Option<&str>) -> Result<Self, AppError> {
        let database_id = database_id.unwrap_or(DEFAULT_DATABASE_ID).to_string();
        let options = firestore::FirestoreDbOptions::new(project_id.to_string())
            .with_database_id(database_id.clone());

        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(options, database_id).await;
        }

        let client = firestore::FirestoreDb::with_options(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, database = %database_id, "Connected to Firestore");

        Ok(Self {
            client,
            database_id,
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(
        options: firestore::FirestoreDbOptions,
        database_id: String,
    ) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(database = %database_id, "Connected to Firestore (Emulator/Unauthenticated)");

        Ok(Self {
            client,
            database_id,
        })
    }

    pub fn database_name(&self) -> &str {
        &self.database_id
    }

    /// Write a new document under its own ID.
    pub async fn insert(
        &self,
        collection: Collection,
        record: &StoredRecord<serde_json::Value>,
    ) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .insert()
            .into(collection.as_str())
            .document_id(&record.id)
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Fetch all documents matching `filter`, ordered by document ID.
    pub async fn query<T>(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<StoredRecord<T>>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        let query = self.client.fluent().select().from(collection.as_str());

        let query = if filter.is_empty() {
            query
        } else {
            query.filter(|q| {
                q.for_all(
                    filter
                        .conditions()
                        .iter()
                        .map(|(field, value)| q.field(*field).eq(value.as_str())),
                )
            })
        };

        query
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count documents matching `filter` with a server-side aggregation.
    pub async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, AppError> {
        let query = self.client.fluent().select().from(collection.as_str());

        let query = if filter.is_empty() {
            query
        } else {
            query.filter(|q| {
                q.for_all(
                    filter
                        .conditions()
                        .iter()
                        .map(|(field, value)| q.field(*field).eq(value.as_str())),
                )
            })
        };

        let rows: Vec<CountAggregate> = query
            .aggregate(|a| a.fields([a.field("count").count()]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.first().map(|row| row.count).unwrap_or(0))
    }

    /// Top-level collection IDs, at most `limit`.
    pub async fn list_collections(&self, limit: usize) -> Result<Vec<String>, AppError> {
        let result = self
            .client
            .list_collection_ids(FirestoreListCollectionIdsParams::new().with_page_size(limit))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.collection_ids.into_iter().take(limit).collect())
    }
}
