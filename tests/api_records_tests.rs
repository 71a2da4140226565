// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Create/list behaviour of the per-collection routes.

use axum::http::StatusCode;
use serde_json::{json, Value};
use std::collections::HashSet;

mod common;
use common::{create_test_app, get_json, post_json};

/// One valid payload per collection route.
fn valid_payloads() -> Vec<(&'static str, Value)> {
    vec![
        (
            "/api/participants",
            json!({"name": "Ada Lovelace", "email": "ada@example.com", "cohort": "2024-A"}),
        ),
        (
            "/api/topics",
            json!({"title": "Storytelling", "date": "2024-01-08T09:00:00Z", "description": "Week 2"}),
        ),
        (
            "/api/picture-cards",
            json!({"user_id": "ada@example.com", "topic": "Storytelling", "image_url": "https://cdn.example.com/1.png", "caption": "my card"}),
        ),
        (
            "/api/voice-notes",
            json!({"user_id": "ada@example.com", "topic": "Storytelling", "audio_url": "https://cdn.example.com/1.m4a", "duration_sec": 42}),
        ),
        (
            "/api/threads",
            json!({"user_id": "ada@example.com", "topic": "Storytelling", "content": "Loved it", "likes": 3}),
        ),
        (
            "/api/attendance",
            json!({"user_id": "ada@example.com", "topic": "Storytelling", "session_date": "2024-01-08T09:00:00Z"}),
        ),
        (
            "/api/pitches",
            json!({"user_id": "ada@example.com", "topic": "Storytelling", "session_date": "2024-01-08T09:00:00Z", "selected_for_sd": true}),
        ),
        (
            "/api/selections",
            json!({"user_id": "ada@example.com", "topic": "Storytelling", "session_date": "2024-01-08T09:00:00Z", "status": "waitlist"}),
        ),
    ]
}

/// Does `record` carry every field of `submitted` with the same value?
fn contains_fields(record: &Value, submitted: &Value) -> bool {
    submitted
        .as_object()
        .unwrap()
        .iter()
        .all(|(key, value)| record.get(key) == Some(value))
}

#[tokio::test]
async fn test_post_then_list_returns_each_record_once() {
    let (app, _state) = create_test_app();
    let mut ids = HashSet::new();

    for (uri, payload) in valid_payloads() {
        let (status, body) = post_json(&app, uri, payload.clone()).await;
        assert_eq!(status, StatusCode::OK, "POST {uri} failed: {body}");

        let id = body["id"].as_str().expect("id is a string").to_string();
        assert!(ids.insert(id.clone()), "duplicate id {id}");

        let (status, list) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK);

        let matching: Vec<&Value> = list
            .as_array()
            .unwrap()
            .iter()
            .filter(|record| contains_fields(record, &payload))
            .collect();
        assert_eq!(matching.len(), 1, "GET {uri}: {list}");
        assert_eq!(matching[0]["id"], json!(id));
        assert!(matching[0]["created_at"].is_string());
    }
}

#[tokio::test]
async fn test_ids_unique_across_repeated_posts() {
    let (app, _state) = create_test_app();
    let payload = json!({"name": "Ada", "email": "ada@example.com"});

    let mut ids = HashSet::new();
    for _ in 0..20 {
        let (status, body) = post_json(&app, "/api/participants", payload.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(ids.insert(body["id"].as_str().unwrap().to_string()));
    }

    let (_, list) = get_json(&app, "/api/participants").await;
    assert_eq!(list.as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_list_preserves_creation_order() {
    let (app, _state) = create_test_app();

    let mut created = Vec::new();
    for n in 0..5 {
        let (_, body) = post_json(
            &app,
            "/api/threads",
            json!({"user_id": "ada", "topic": "t", "content": format!("post {n}")}),
        )
        .await;
        created.push(body["id"].clone());
    }

    let (_, list) = get_json(&app, "/api/threads").await;
    let listed: Vec<Value> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].clone())
        .collect();
    assert_eq!(listed, created);
}

#[tokio::test]
async fn test_optional_fields_get_defaults() {
    let (app, _state) = create_test_app();

    post_json(
        &app,
        "/api/threads",
        json!({"user_id": "ada", "topic": "t", "content": "hello"}),
    )
    .await;
    post_json(
        &app,
        "/api/pitches",
        json!({"user_id": "ada", "topic": "t", "session_date": "2024-01-08"}),
    )
    .await;
    post_json(
        &app,
        "/api/selections",
        json!({"user_id": "ada", "topic": "t", "session_date": "2024-01-08"}),
    )
    .await;

    let (_, threads) = get_json(&app, "/api/threads").await;
    assert_eq!(threads[0]["likes"], json!(0));
    assert_eq!(threads[0]["session_date"], Value::Null);

    let (_, pitches) = get_json(&app, "/api/pitches").await;
    assert_eq!(pitches[0]["selected_for_sd"], json!(false));
    assert_eq!(pitches[0]["session_date"], json!("2024-01-08T00:00:00Z"));

    let (_, selections) = get_json(&app, "/api/selections").await;
    assert_eq!(selections[0]["status"], json!("selected"));
}

#[tokio::test]
async fn test_fractional_seconds_preserved() {
    let (app, _state) = create_test_app();

    let (status, _) = post_json(
        &app,
        "/api/voice-notes",
        json!({
            "user_id": "ada",
            "topic": "t",
            "audio_url": "https://cdn.example.com/1.m4a",
            "session_date": "2024-01-01T10:00:00.123456Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, notes) = get_json(&app, "/api/voice-notes?user_id=ada").await;
    assert_eq!(notes[0]["session_date"], json!("2024-01-01T10:00:00.123456Z"));
}

#[tokio::test]
async fn test_filter_by_user_excludes_other_users() {
    let (app, _state) = create_test_app();

    for user in ["ada", "grace", "ada"] {
        post_json(
            &app,
            "/api/voice-notes",
            json!({"user_id": user, "topic": "t", "audio_url": "https://cdn.example.com/a.m4a"}),
        )
        .await;
    }

    let (status, list) = get_json(&app, "/api/voice-notes?user_id=ada").await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|r| r["user_id"] == "ada"));

    let (_, list) = get_json(&app, "/api/voice-notes?user_id=nobody").await;
    assert_eq!(list, json!([]));

    // Empty filter value means no filter
    let (_, list) = get_json(&app, "/api/voice-notes?user_id=").await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_thread_filters_combine() {
    let (app, _state) = create_test_app();

    for (user, topic) in [
        ("ada", "storytelling"),
        ("ada", "pitching"),
        ("grace", "storytelling"),
    ] {
        post_json(
            &app,
            "/api/threads",
            json!({"user_id": user, "topic": topic, "content": "c"}),
        )
        .await;
    }

    let (_, list) = get_json(&app, "/api/threads?topic=storytelling").await;
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (_, list) = get_json(&app, "/api/threads?user_id=ada&topic=storytelling").await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["user_id"], "ada");
    assert_eq!(list[0]["topic"], "storytelling");
}

#[tokio::test]
async fn test_unsupported_filters_are_ignored() {
    let (app, _state) = create_test_app();

    post_json(
        &app,
        "/api/participants",
        json!({"name": "Ada", "email": "ada@example.com"}),
    )
    .await;

    let (status, list) = get_json(&app, "/api/participants?user_id=someone-else").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_root_reports_running() {
    let (app, _state) = create_test_app();

    let (status, body) = get_json(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("running"));
}
