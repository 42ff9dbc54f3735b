//! Extractors whose rejections are [`AppError`]s.
//!
//! axum's stock `Json`, `Query` and `Path` reject with plain-text bodies;
//! these wrappers route the same failures through the JSON error format.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use tasktracker_core::types::DbId;

use crate::error::AppError;

/// A JSON request body that may legitimately be `null`.
///
/// The services decide what a missing payload means, so `null` is passed
/// through as `None` instead of being rejected here.
#[derive(Debug)]
pub struct Payload<T>(pub Option<T>);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Option<T>>::from_request(req, state).await?;
        Ok(Payload(value))
    }
}

/// Query-string parameters.
#[derive(Debug)]
pub struct Params<T>(pub T);

impl<T, S> FromRequestParts<S> for Params<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Params(value))
    }
}

/// The `{id}` segment of a resource path.
#[derive(Debug, Clone, Copy)]
pub struct Key(pub DbId);

impl<S> FromRequestParts<S> for Key
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state).await?;
        Ok(Key(id))
    }
}
