//! Translation CRUD, search and tagging handlers.
//!
//! Every response is wrapped in the standard [`Envelope`].

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use glossa_core::envelope::Envelope;
use glossa_core::storage::PageRequest;
use glossa_core::translation::{
    to_views, AssignTagsRequest, CreateTranslationRequest, ListTranslationsQuery, SearchQuery,
    TranslationView, UpdateTranslationRequest,
};

use crate::{handlers::AppError, state::AppState};

type JsonBody<T> = Result<Json<T>, JsonRejection>;
type IdPath = Result<Path<i64>, PathRejection>;

/// List translations (GET /api/translations).
pub async fn list_translations(
    State(state): State<AppState>,
    query: Result<Query<ListTranslationsQuery>, QueryRejection>,
) -> Result<Json<Envelope>, AppError> {
    let Query(query) = query?;
    let page = PageRequest::new(query.page, query.per_page);

    let page = state.translations.list(page).await?;

    Ok(Json(Envelope::success(
        page,
        "Translations retrieved successfully.",
    )))
}

/// Create a translation (POST /api/translations).
pub async fn create_translation(
    State(state): State<AppState>,
    payload: JsonBody<CreateTranslationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    let translation = state.translations.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(
            TranslationView::from(translation),
            "Translation created successfully",
        )),
    ))
}

/// Get a single translation (GET /api/translations/{id}).
pub async fn get_translation(
    State(state): State<AppState>,
    id: IdPath,
) -> Result<Json<Envelope>, AppError> {
    let Path(id) = id?;

    let translation = state.translations.find(id).await?;

    Ok(Json(Envelope::success(
        TranslationView::from(translation),
        "Translation retrieved successfully",
    )))
}

/// Update a translation (PUT /api/translations/{id}).
pub async fn update_translation(
    State(state): State<AppState>,
    id: IdPath,
    payload: JsonBody<UpdateTranslationRequest>,
) -> Result<Json<Envelope>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    let translation = state.translations.update(id, payload).await?;

    Ok(Json(Envelope::success(
        TranslationView::from(translation),
        "Translation updated successfully",
    )))
}

/// Delete a translation (DELETE /api/translations/{id}).
pub async fn delete_translation(
    State(state): State<AppState>,
    id: IdPath,
) -> Result<Json<Envelope>, AppError> {
    let Path(id) = id?;

    state.translations.delete(id).await?;

    Ok(Json(Envelope::message("Translation deleted successfully")))
}

/// Search translations (GET /api/translations/search?query=).
pub async fn search_translations(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Envelope>, AppError> {
    let Query(query) = query?;

    let translations = state.translations.search(query.query.as_deref()).await?;

    Ok(Json(Envelope::success(
        to_views(translations),
        "Search results",
    )))
}

/// Translations with a given tag (GET /api/translations/tags/{tag_name}).
pub async fn translations_by_tag(
    State(state): State<AppState>,
    Path(tag_name): Path<String>,
) -> Result<Json<Envelope>, AppError> {
    let translations = state.translations.by_tag(&tag_name).await?;

    Ok(Json(Envelope::success(
        to_views(translations),
        "Translations retrieved successfully",
    )))
}

/// Add tags to a translation (POST /api/translations/{id}/assign-tags).
pub async fn assign_tags(
    State(state): State<AppState>,
    id: IdPath,
    payload: JsonBody<AssignTagsRequest>,
) -> Result<Json<Envelope>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    let translation = state.translations.assign_tags(id, payload).await?;

    Ok(Json(Envelope::success(
        TranslationView::from(translation),
        "Tags assigned successfully",
    )))
}
