// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod engagement;
pub mod media;
pub mod metrics;
pub mod participant;

pub use engagement::{Attendance, Pitch, Selection, SelectionStatus, Thread};
pub use media::{PictureCard, VoiceNote};
pub use metrics::{Metrics, WeeklyProgress};
pub use participant::{Participant, SessionTopic};

use crate::db::Collection;
use serde::{de::DeserializeOwned, Serialize};

/// A record type with its own collection and create/list endpoints.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection the records are stored in.
    const COLLECTION: Collection;

    /// Fields the list endpoint accepts as equality filters.
    const FILTER_FIELDS: &'static [&'static str] = &[];
}

impl Entity for Participant {
    const COLLECTION: Collection = Collection::Participant;
}

impl Entity for SessionTopic {
    const COLLECTION: Collection = Collection::SessionTopic;
}

impl Entity for PictureCard {
    const COLLECTION: Collection = Collection::PictureCard;
    const FILTER_FIELDS: &'static [&'static str] = &["user_id"];
}

impl Entity for VoiceNote {
    const COLLECTION: Collection = Collection::VoiceNote;
    const FILTER_FIELDS: &'static [&'static str] = &["user_id"];
}

impl Entity for Thread {
    const COLLECTION: Collection = Collection::Thread;
    const FILTER_FIELDS: &'static [&'static str] = &["user_id", "topic"];
}

impl Entity for Attendance {
    const COLLECTION: Collection = Collection::Attendance;
    const FILTER_FIELDS: &'static [&'static str] = &["user_id"];
}

impl Entity for Pitch {
    const COLLECTION: Collection = Collection::Pitch;
    const FILTER_FIELDS: &'static [&'static str] = &["user_id"];
}

impl Entity for Selection {
    const COLLECTION: Collection = Collection::Selection;
    const FILTER_FIELDS: &'static [&'static str] = &["user_id"];
}
