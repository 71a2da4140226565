// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Session engagement records: threads, attendance, pitches and selections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A discussion thread contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub user_id: String,
    pub topic: String,
    pub content: String,
    #[serde(default, with = "crate::time_utils::optional_timestamp")]
    pub session_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub user_id: String,
    pub topic: String,
    #[serde(with = "crate::time_utils::timestamp")]
    pub session_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pitch {
    pub user_id: String,
    pub topic: String,
    #[serde(with = "crate::time_utils::timestamp")]
    pub session_date: DateTime<Utc>,
    #[serde(default)]
    pub selected_for_sd: bool,
}

/// Outcome of an SD selection round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStatus {
    #[default]
    Selected,
    Rejected,
    Waitlist,
}

impl SelectionStatus {
    /// Stored string form, used in equality filters.
    pub const fn as_str(self) -> &'static str {
        match self {
            SelectionStatus::Selected => "selected",
            SelectionStatus::Rejected => "rejected",
            SelectionStatus::Waitlist => "waitlist",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub user_id: String,
    pub topic: String,
    #[serde(with = "crate::time_utils::timestamp")]
    pub session_date: DateTime<Utc>,
    #[serde(default)]
    pub status: SelectionStatus,
}
