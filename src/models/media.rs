// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Picture card and voice note uploads.
//!
//! Media files live elsewhere; these records only hold their public URLs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictureCard {
    /// Participant identifier (email or id)
    pub user_id: String,
    /// Session topic title or id
    pub topic: String,
    /// Public URL of the uploaded image
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default, with = "crate::time_utils::optional_timestamp")]
    pub session_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceNote {
    pub user_id: String,
    pub topic: String,
    /// Public URL of the uploaded audio
    pub audio_url: String,
    #[serde(default)]
    pub transcript: Option<String>,
    /// Recording length in seconds
    #[serde(default)]
    pub duration_sec: Option<i64>,
    #[serde(default, with = "crate::time_utils::optional_timestamp")]
    pub session_date: Option<DateTime<Utc>>,
}
