//! Request extractors that report failures as [`AppError`] JSON bodies.
//!
//! Axum's stock extractors reject with plain-text bodies; these wrappers
//! keep every error response in the `{ "error", "code" }` shape.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Multipart, Path, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::Json;
use heroes_core::document::{is_structured_field, parse_document_text};
use heroes_core::types::DbId;
use heroes_db::models::hero::HeroInput;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::upload::IMAGE_FIELD;

// ---------------------------------------------------------------------------
// Path / query / JSON wrappers
// ---------------------------------------------------------------------------

/// Numeric hero id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct HeroId(pub DbId);

impl<S> FromRequestParts<S> for HeroId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        raw.parse::<DbId>()
            .map(HeroId)
            .map_err(|_| AppError::BadRequest(format!("Invalid hero id '{raw}'")))
    }
}

/// `Query<T>` with JSON error reporting.
#[derive(Debug)]
pub struct AppQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(AppQuery(value))
    }
}

/// `Json<T>` with JSON error reporting.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

// ---------------------------------------------------------------------------
// Create payload (JSON or multipart)
// ---------------------------------------------------------------------------

/// A file received in the `image` multipart field.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub data: Bytes,
}

/// Body of a create request.
///
/// `application/json` bodies are decoded directly. `multipart/form-data`
/// bodies carry `name`/`slug` as text, each structured field as JSON text,
/// and optionally an image file in the `image` field.
#[derive(Debug)]
pub struct CreateHeroPayload {
    pub input: HeroInput,
    pub image: Option<ImageFile>,
}

impl<S> FromRequest<S> for CreateHeroPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            let multipart = Multipart::from_request(req, state).await?;
            read_multipart(multipart).await
        } else {
            let Json(body) = Json::<Value>::from_request(req, state).await?;
            Ok(Self {
                input: HeroInput::from_json(body)?,
                image: None,
            })
        }
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

async fn read_multipart(mut multipart: Multipart) -> Result<CreateHeroPayload, AppError> {
    let mut body = Map::new();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        if name == IMAGE_FIELD {
            let file_name = field.file_name().unwrap_or("").to_string();
            let data = field.bytes().await?;
            // Browsers send an empty part when no file was chosen.
            if !data.is_empty() {
                image = Some(ImageFile { file_name, data });
            }
            continue;
        }

        if name == "name" || name == "slug" {
            body.insert(name, Value::String(field.text().await?));
        } else if is_structured_field(&name) {
            let text = field.text().await?;
            let doc = parse_document_text(&name, &text)?;
            body.insert(name, Value::Object(doc));
        }
        // Unknown fields are ignored.
    }

    Ok(CreateHeroPayload {
        input: HeroInput::from_json(Value::Object(body))?,
        image,
    })
}
