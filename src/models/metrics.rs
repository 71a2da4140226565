// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-participant progress metrics.

use crate::time_utils::iso_week_key;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Activity counts for one participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub sessions_attended: u64,
    pub pitches_attempted: u64,
    /// Selections with status `selected` only
    pub sd_selected: u64,
    pub picture_cards: u64,
    pub voice_notes: u64,
    pub thread_contributions: u64,
    /// Voice notes per ISO week, oldest first
    pub weekly_progress: Vec<WeeklyProgress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyProgress {
    /// `YYYY-Www`
    pub week: String,
    pub count: u64,
}

/// Bucket creation timestamps by ISO week.
///
/// Records without a timestamp count toward the week containing `now`.
/// Keys are zero-padded, so sorting them as strings is chronological.
pub fn weekly_progress<I>(timestamps: I, now: DateTime<Utc>) -> Vec<WeeklyProgress>
where
    I: IntoIterator<Item = Option<DateTime<Utc>>>,
{
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();

    for ts in timestamps {
        *buckets.entry(iso_week_key(ts.unwrap_or(now))).or_default() += 1;
    }

    buckets
        .into_iter()
        .map(|(week, count)| WeeklyProgress { week, count })
        .collect()
}
