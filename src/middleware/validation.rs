// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON body extractor that reports the offending field on failure.

use crate::error::AppError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// Field name reported when a failure can't be pinned to a single field.
const BODY_FIELD: &str = "(body)";

/// Like `Json<T>`, but maps every rejection to `AppError`.
///
/// Type and presence checks come from `T`'s `Deserialize` impl; a failure
/// there is a 422 naming the field, anything else about the body is a 400.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let detail = err.body_text();
            let detail = detail
                .split_once("target type: ")
                .map_or(detail.as_str(), |(_, rest)| rest)
                .to_string();
            let field = offending_field(&detail).unwrap_or_else(|| BODY_FIELD.to_string());
            AppError::validation(field, detail)
        }
        other => AppError::BadRequest(other.body_text()),
    }
}

/// Pull the field name out of a deserialization message.
///
/// Handles "missing field `x` at ..." and path-prefixed "x: invalid type ...".
fn offending_field(detail: &str) -> Option<String> {
    if let Some((_, rest)) = detail.split_once("missing field `") {
        return rest.split('`').next().map(str::to_string);
    }

    let (path, _) = detail.split_once(": ")?;
    if path.is_empty() || path.contains(char::is_whitespace) {
        return None;
    }
    Some(path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offending_field_missing() {
        assert_eq!(
            offending_field("missing field `email` at line 1 column 15").as_deref(),
            Some("email")
        );
    }

    #[test]
    fn test_offending_field_type_error() {
        assert_eq!(
            offending_field("likes: invalid type: string \"many\", expected i64 at line 1 column 60")
                .as_deref(),
            Some("likes")
        );
    }

    #[test]
    fn test_offending_field_unknown() {
        assert_eq!(
            offending_field("invalid type: integer `5`, expected struct Thread"),
            None
        );
    }
}
