//! Custom extractors for the HTTP server.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Extractor for HTML form bodies, URL-encoded or `multipart/form-data`.
///
/// A request without a `Content-Type` header yields `T::default()`, so a bare
/// `POST` reaches the handler and is reported as missing input. Any other
/// form rejection (wrong content type, undecodable body) becomes a 400.
pub struct FormExtractor<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormExtractor<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Some(content_type) = req.headers().get(CONTENT_TYPE) else {
            return Ok(FormExtractor(T::default()));
        };

        let is_multipart = content_type
            .to_str()
            .map(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"))
            .unwrap_or(false);

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return multipart_fields(multipart).await.map(FormExtractor);
        }

        Form::<T>::from_request(req, state)
            .await
            .map(|Form(value)| FormExtractor(value))
            .map_err(|e| AppError::BadRequest(e.body_text()))
    }
}

/// Decode the text fields of a multipart body into `T`.
///
/// File parts are ignored and the first occurrence of a repeated name wins.
async fn multipart_fields<T: DeserializeOwned>(mut multipart: Multipart) -> Result<T, AppError> {
    let mut fields = Map::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let text = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        fields.entry(name).or_insert(Value::String(text));
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| AppError::BadRequest(format!("Invalid form fields: {e}")))
}
