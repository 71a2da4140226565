// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Skill tracker: participant activity records and progress metrics
//!
//! This crate provides the backend API that stores participants, session
//! topics and session uploads, and aggregates them into per-user metrics.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod time_utils;

use config::Config;
use db::DocumentStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: DocumentStore,
}
