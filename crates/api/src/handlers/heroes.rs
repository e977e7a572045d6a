//! Handlers for the hero resource.
//!
//! Listing, lookup by id, name search, create (JSON or multipart with an
//! image), full-replace update, delete, and bulk create.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use heroes_core::error::CoreError;
use heroes_core::search::contains_pattern;
use heroes_core::types::DbId;
use heroes_db::models::hero::{Hero, HeroInput};
use heroes_db::repositories::hero_repo::MAX_BULK_ROWS;
use heroes_db::repositories::HeroRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery, CreateHeroPayload, HeroId};
use crate::query::{PageParams, SearchParams};
use crate::response::{BulkInsertResponse, CreatedResponse, MessageResponse, PageResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Hero", id })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/heroes?page=&limit=
///
/// One page of heroes plus the total count. The count and the page are
/// fetched concurrently on separate pool connections.
pub async fn list_heroes(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<PageResponse<Hero>>> {
    let request = params.resolve();

    let (total, heroes) = tokio::try_join!(
        HeroRepo::count(&state.pool),
        HeroRepo::list_page(&state.pool, request.limit, request.offset()),
    )?;

    Ok(Json(PageResponse::new(request, total, heroes)))
}

/// GET /api/heroes/{id}
pub async fn get_hero(
    State(state): State<AppState>,
    HeroId(id): HeroId,
) -> AppResult<Json<Hero>> {
    let hero = HeroRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(hero))
}

/// GET /api/heroes/search?name=
///
/// Case-insensitive substring match on `name`. Unpaginated.
pub async fn search_heroes(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<Vec<Hero>>> {
    let term = params
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing required query parameter 'name'".into()))?;

    let heroes = HeroRepo::search_by_name(&state.pool, &contains_pattern(&term)).await?;
    Ok(Json(heroes))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/heroes
///
/// When an image is attached it is stored first and the hero's `images`
/// document is replaced with `{ "url": ... }`. If the insert then fails the
/// stored file is removed again.
pub async fn create_hero(
    State(state): State<AppState>,
    payload: CreateHeroPayload,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let CreateHeroPayload { mut input, image } = payload;

    let stored = match image {
        Some(file) => {
            let stored = state.uploads.save(&file.file_name, &file.data).await?;
            tracing::info!(file = %stored.file_name, bytes = file.data.len(), "Hero image stored");
            input.images = stored.to_document();
            Some(stored)
        }
        None => None,
    };

    let id = match HeroRepo::create(&state.pool, &input).await {
        Ok(id) => id,
        Err(err) => {
            if let Some(stored) = &stored {
                if let Err(e) = state.uploads.remove(stored).await {
                    tracing::warn!(file = %stored.file_name, error = %e, "Failed to remove orphaned upload");
                }
            }
            return Err(err.into());
        }
    };

    tracing::info!(hero_id = id, name = %input.name, "Hero created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            images: stored.map(|s| s.to_document()),
        }),
    ))
}

/// PUT /api/heroes/{id}
///
/// Full replace: every column is overwritten, omitted documents become `{}`.
pub async fn update_hero(
    State(state): State<AppState>,
    HeroId(id): HeroId,
    AppJson(body): AppJson<Value>,
) -> AppResult<Json<MessageResponse>> {
    let input = HeroInput::from_json(body)?;

    if !HeroRepo::replace(&state.pool, id, &input).await? {
        return Err(not_found(id));
    }

    tracing::info!(hero_id = id, "Hero updated");

    Ok(Json(MessageResponse {
        message: "Hero updated",
    }))
}

/// DELETE /api/heroes/{id}
pub async fn delete_hero(
    State(state): State<AppState>,
    HeroId(id): HeroId,
) -> AppResult<Json<MessageResponse>> {
    if !HeroRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(hero_id = id, "Hero deleted");

    Ok(Json(MessageResponse {
        message: "Hero deleted",
    }))
}

/// POST /api/heroes/bulk
///
/// The body must be an array of hero objects. All rows go in with a single
/// statement, so either every hero is inserted or none is.
pub async fn bulk_create_heroes(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> AppResult<(StatusCode, Json<BulkInsertResponse>)> {
    let Value::Array(items) = body else {
        return Err(AppError::BadRequest("Expected an array of heroes".into()));
    };

    if items.len() > MAX_BULK_ROWS {
        return Err(AppError::BadRequest(format!(
            "Too many heroes in one request: {} (max {MAX_BULK_ROWS})",
            items.len()
        )));
    }

    let inputs = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            HeroInput::from_json(item)
                .map_err(|e| AppError::BadRequest(format!("Hero at index {index}: {e}")))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let inserted = HeroRepo::bulk_create(&state.pool, &inputs).await?;

    tracing::info!(submitted = inputs.len(), inserted, "Heroes bulk inserted");

    Ok((StatusCode::CREATED, Json(BulkInsertResponse { inserted })))
}
