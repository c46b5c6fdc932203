use axum::{
    async_trait,
    extract::{
        multipart::{Multipart, MultipartError},
        FromRequest, Request,
    },
    http::{header::CONTENT_TYPE, StatusCode},
    Form,
};
use std::collections::HashMap;

use crate::{domain::extraction::UploadedDocument, error::AppError};

/// Name of the multipart part carrying the document
pub const FILE_FIELD: &str = "file";

/// The `file` part of an upload form, if the request carried one.
///
/// Only a part that has a `filename` parameter counts as a file part. A
/// request that is not multipart at all, or whose multipart stream is cut
/// short before a complete file part, has no file part.
pub struct UploadForm(pub Option<UploadedDocument>);

#[async_trait]
impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = match Multipart::from_request(req, state).await {
            Ok(multipart) => multipart,
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Upload is not a multipart form");
                return Ok(Self(None));
            }
        };

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(err) => {
                    reject_if_too_large(err)?;
                    break;
                }
            };
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            let Some(filename) = field.file_name().map(str::to_owned) else {
                continue;
            };

            return match field.bytes().await {
                Ok(bytes) => Ok(Self(Some(UploadedDocument { filename, bytes }))),
                Err(err) => {
                    reject_if_too_large(err)?;
                    Ok(Self(None))
                }
            };
        }

        Ok(Self(None))
    }
}

/// Plain form values from either an urlencoded or a multipart body.
///
/// File parts are ignored and the first value of a repeated name wins.
/// Bodies of any other type yield no fields.
#[derive(Debug, Default)]
pub struct FormFields(pub HashMap<String, String>);

impl FormFields {
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if !is_multipart {
            return match Form::<HashMap<String, String>>::from_request(req, state).await {
                Ok(Form(fields)) => Ok(Self(fields)),
                Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                    Err(AppError::PayloadTooLarge(rejection.body_text()))
                }
                Err(rejection) => {
                    tracing::debug!(reason = %rejection.body_text(), "Form body not readable, treating as empty");
                    Ok(Self::default())
                }
            };
        }

        let mut multipart = match Multipart::from_request(req, state).await {
            Ok(multipart) => multipart,
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Multipart body not readable, treating as empty");
                return Ok(Self::default());
            }
        };

        let mut fields = HashMap::new();
        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(err) => {
                    reject_if_too_large(err)?;
                    break;
                }
            };
            if field.file_name().is_some() {
                continue;
            }
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match field.text().await {
                Ok(value) => {
                    fields.entry(name).or_insert(value);
                }
                Err(err) => {
                    reject_if_too_large(err)?;
                    break;
                }
            }
        }

        Ok(Self(fields))
    }
}

/// A body over the size limit is the only multipart failure surfaced to the
/// caller. Any other malformed stream ends the form where it broke.
fn reject_if_too_large(err: MultipartError) -> Result<(), AppError> {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return Err(AppError::PayloadTooLarge(err.body_text()));
    }
    tracing::debug!(reason = %err.body_text(), "Multipart stream ended early");
    Ok(())
}
