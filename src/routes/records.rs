// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Create/list routes, one pair per collection.

use crate::db::{Filter, StoredRecord};
use crate::error::Result;
use crate::middleware::validation::ValidatedJson;
use crate::models::{
    Attendance, Entity, Participant, PictureCard, Pitch, Selection, SessionTopic, Thread,
    VoiceNote,
};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/participants",
            get(list_records::<Participant>).post(create_record::<Participant>),
        )
        .route(
            "/api/topics",
            get(list_records::<SessionTopic>).post(create_record::<SessionTopic>),
        )
        .route(
            "/api/picture-cards",
            get(list_records::<PictureCard>).post(create_record::<PictureCard>),
        )
        .route(
            "/api/voice-notes",
            get(list_records::<VoiceNote>).post(create_record::<VoiceNote>),
        )
        .route(
            "/api/threads",
            get(list_records::<Thread>).post(create_record::<Thread>),
        )
        .route(
            "/api/attendance",
            get(list_records::<Attendance>).post(create_record::<Attendance>),
        )
        .route(
            "/api/pitches",
            get(list_records::<Pitch>).post(create_record::<Pitch>),
        )
        .route(
            "/api/selections",
            get(list_records::<Selection>).post(create_record::<Selection>),
        )
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Equality filters a list request may carry.
#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    user_id: Option<String>,
    topic: Option<String>,
}

impl RecordQuery {
    /// Keep only the filters `T` supports; empty values count as absent.
    fn into_filter<T: Entity>(self) -> Filter {
        [("user_id", self.user_id), ("topic", self.topic)]
            .into_iter()
            .filter(|(field, _)| T::FILTER_FIELDS.contains(field))
            .filter_map(|(field, value)| value.filter(|v| !v.is_empty()).map(|v| (field, v)))
            .fold(Filter::new(), |filter, (field, value)| filter.eq(field, value))
    }
}

async fn create_record<T: Entity>(
    State(state): State<Arc<AppState>>,
    ValidatedJson(record): ValidatedJson<T>,
) -> Result<Json<CreatedResponse>> {
    let id = state.store.create(T::COLLECTION, &record).await?;
    tracing::info!(collection = %T::COLLECTION, %id, "Record created");
    Ok(Json(CreatedResponse { id }))
}

async fn list_records<T: Entity>(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecordQuery>,
) -> Result<Json<Vec<StoredRecord<T>>>> {
    let filter = query.into_filter::<T>();
    let records = state.store.list(T::COLLECTION, &filter).await?;
    Ok(Json(records))
}
