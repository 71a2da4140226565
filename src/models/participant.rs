// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Participant and session topic models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A programme participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Full name
    pub name: String,
    /// Email address (used as the participant's user_id elsewhere)
    pub email: String,
    /// Cohort or batch identifier
    #[serde(default)]
    pub cohort: Option<String>,
    /// participant / mentor / admin
    #[serde(default)]
    pub role: Option<String>,
}

/// A scheduled session topic; uploads are tagged with its title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTopic {
    pub title: String,
    #[serde(with = "crate::time_utils::timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_participant_optional_fields_default() {
        let p: Participant =
            serde_json::from_value(json!({"name": "Ada", "email": "ada@example.com"})).unwrap();

        assert_eq!(p.cohort, None);
        assert_eq!(p.role, None);
    }

    #[test]
    fn test_participant_missing_email_is_rejected() {
        let err = serde_json::from_value::<Participant>(json!({"name": "Ada"})).unwrap_err();
        assert!(err.to_string().contains("missing field `email`"));
    }

    #[test]
    fn test_participant_accepts_empty_strings() {
        let p: Participant =
            serde_json::from_value(json!({"name": "", "email": ""})).unwrap();

        assert_eq!(p.name, "");
        assert_eq!(p.email, "");
    }

    #[test]
    fn test_topic_date_accepts_bare_date() {
        let t: SessionTopic =
            serde_json::from_value(json!({"title": "Storytelling", "date": "2024-03-04"})).unwrap();

        assert_eq!(t.date, Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap());
        assert_eq!(
            serde_json::to_value(&t).unwrap()["date"],
            json!("2024-03-04T00:00:00Z")
        );
    }
}
