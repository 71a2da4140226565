// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-participant metrics.

use crate::db::{Collection, Filter, StoredRecord};
use crate::error::Result;
use crate::models::metrics::weekly_progress;
use crate::models::{Metrics, SelectionStatus, VoiceNote};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/metrics/{user_id}", get(get_metrics))
}

async fn get_metrics(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Metrics>> {
    let store = &state.store;
    let by_user = Filter::new().eq("user_id", user_id.as_str());
    let selected = by_user
        .clone()
        .eq("status", SelectionStatus::Selected.as_str());

    let (
        sessions_attended,
        pitches_attempted,
        sd_selected,
        picture_cards,
        voice_notes,
        thread_contributions,
        notes,
    ) = tokio::try_join!(
        store.count(Collection::Attendance, &by_user),
        store.count(Collection::Pitch, &by_user),
        store.count(Collection::Selection, &selected),
        store.count(Collection::PictureCard, &by_user),
        store.count(Collection::VoiceNote, &by_user),
        store.count(Collection::Thread, &by_user),
        store.list::<VoiceNote>(Collection::VoiceNote, &by_user),
    )?;

    let now = chrono::Utc::now();
    let weekly_progress = weekly_progress(
        notes.iter().map(|note: &StoredRecord<VoiceNote>| note.created_at),
        now,
    );

    tracing::debug!(
        user_id = %user_id,
        voice_notes,
        weeks = weekly_progress.len(),
        "Metrics computed"
    );

    Ok(Json(Metrics {
        sessions_attended,
        pitches_attempted,
        sd_selected,
        picture_cards,
        voice_notes,
        thread_contributions,
        weekly_progress,
    }))
}
