// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store, used for local development and tests.

use super::{Collection, Filter, StoredRecord};
use crate::error::AppError;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Documents kept as JSON values, one vector per collection in insertion order.
#[derive(Clone, Default)]
pub struct MemoryDb {
    collections: Arc<DashMap<Collection, Vec<serde_json::Value>>>,
}

impl MemoryDb {
    pub const DATABASE_NAME: &'static str = "memory";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &self,
        collection: Collection,
        record: &StoredRecord<serde_json::Value>,
    ) -> Result<(), AppError> {
        let doc = serde_json::to_value(record)
            .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("serialize record")))?;

        self.collections.entry(collection).or_default().push(doc);
        Ok(())
    }

    pub fn query<T: DeserializeOwned>(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<StoredRecord<T>>, AppError> {
        let Some(docs) = self.collections.get(&collection) else {
            return Ok(Vec::new());
        };

        docs.iter()
            .filter(|doc| filter.matches(doc))
            .map(|doc| {
                serde_json::from_value(doc.clone()).map_err(|e| {
                    AppError::Database(format!("Malformed document in {collection}: {e}"))
                })
            })
            .collect()
    }

    pub fn count(&self, collection: Collection, filter: &Filter) -> u64 {
        self.collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).count() as u64)
            .unwrap_or(0)
    }

    /// Names of non-empty collections, alphabetically.
    pub fn list_collections(&self, limit: usize) -> Vec<String> {
        let mut names: Vec<&'static str> = self
            .collections
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().as_str())
            .collect();
        names.sort_unstable();
        names.into_iter().take(limit).map(String::from).collect()
    }
}
