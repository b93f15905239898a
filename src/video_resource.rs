// Video resource - HTTP surface for the /video/{video_id} endpoint.
// Handlers validate the request, then delegate to the configured store.

use std::sync::Arc;

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{Video, VideoId},
    schema::{parse_new_video, parse_video_body, ParseMode},
    store::VideoStore,
};

/// Update semantics exposed by a deployment. The two modes are distinct
/// contracts, not interchangeable: partial updates merge, full replaces
/// overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// PATCH route; present fields overwrite, absent fields are kept.
    /// Used by table-backed deployments.
    Partial,
    /// PUT route; the whole field set is required and replaces the
    /// record. Used by in-memory deployments.
    Replace,
}

/// Handler state for the video resource: the store it runs against and
/// the update contract it exposes.
#[derive(Clone)]
pub struct VideoResource {
    store: Arc<dyn VideoStore>,
    update_mode: UpdateMode,
}

impl VideoResource {
    pub fn new(store: Arc<dyn VideoStore>, update_mode: UpdateMode) -> Self {
        VideoResource { store, update_mode }
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }
}

fn not_found(video_id: VideoId) -> AppError {
    AppError::NotFound(format!("could not find video with id {}", video_id))
}

// HTTP Handlers

pub async fn get_video_handler(
    State(resource): State<VideoResource>,
    AxumPath(video_id): AxumPath<VideoId>,
) -> AppResult<Json<Video>> {
    match resource.store.get(video_id).await? {
        Some(video) => Ok(Json(video)),
        None => Err(not_found(video_id)),
    }
}

pub async fn create_video_handler(
    State(resource): State<VideoResource>,
    AxumPath(video_id): AxumPath<VideoId>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Video>)> {
    let video = parse_new_video(&body, video_id)?;
    if !resource.store.insert(video.clone()).await? {
        return Err(AppError::Conflict(format!(
            "video id {} is already taken",
            video_id
        )));
    }
    Ok((StatusCode::CREATED, Json(video)))
}

// Serves PATCH in partial mode and PUT in replace mode; the mode decides
// which fields the body must carry. Replies 201, matching create.
pub async fn update_video_handler(
    State(resource): State<VideoResource>,
    AxumPath(video_id): AxumPath<VideoId>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Video>)> {
    let parse_mode = match resource.update_mode() {
        UpdateMode::Partial => ParseMode::Optional,
        UpdateMode::Replace => ParseMode::Required,
    };
    let changes = parse_video_body(&body, parse_mode)?;
    match resource.store.update(video_id, changes).await? {
        Some(video) => Ok((StatusCode::CREATED, Json(video))),
        None => Err(not_found(video_id)),
    }
}

pub async fn delete_video_handler(
    State(resource): State<VideoResource>,
    AxumPath(video_id): AxumPath<VideoId>,
) -> AppResult<StatusCode> {
    if !resource.store.delete(video_id).await? {
        return Err(not_found(video_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Build the router for the collection-item endpoint. The update verb
/// follows the resource's mode: PATCH for partial, PUT for replace.
pub fn create_video_router(resource: VideoResource) -> Router {
    let handlers = get(get_video_handler)
        .post(create_video_handler)
        .delete(delete_video_handler);
    let handlers = match resource.update_mode() {
        UpdateMode::Partial => handlers.patch(update_video_handler),
        UpdateMode::Replace => handlers.put(update_video_handler),
    };

    Router::new()
        .route("/video/{video_id}", handlers)
        .with_state(resource)
}
