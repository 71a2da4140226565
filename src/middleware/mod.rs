// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware and extractors (security headers, request validation).

pub mod security;
pub mod validation;

pub use validation::ValidatedJson;
