//! Request extractors shared by all handlers

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use validator::Validate;

use crate::error::AppError;

/// Header carrying the caller's participant name
pub const USER_HEADER: &str = "user";

/// JSON body that has been deserialized and checked against its validation
/// rules. Any failure is reported as [`AppError::Validation`].
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Name from the `user` header, if present and non-empty.
///
/// The raw bytes are decoded as UTF-8 so any name accepted at registration
/// can be sent back in the header.
#[derive(Debug, Clone, Default)]
pub struct User(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for User
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
            .filter(|name| !name.is_empty())
            .map(str::to_owned);

        Ok(Self(name))
    }
}
