//! Axum route handlers for the notebook page and its actions.
//!
//! Form actions redirect back to `/` so the browser always shows a page rendered
//! fresh from the stores.

use crate::commands::{self, CommandError, ErrorKind, SaveDrawingRequest, SaveDrawingResponse};
use crate::page;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Form, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

impl IntoResponse for CommandError {
    fn into_response(self) -> Response {
        let status = match self.kind {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Html(page::render_error(&self.message))).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub saved: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub text: String,
}

/// Builds the router with every notebook route.
pub fn router(state: AppState) -> Router {
    let upload_limit = state.upload_limit();
    Router::new()
        .route("/", get(index))
        .route("/notes", post(add_note))
        .route("/notes/:index/delete", post(delete_note))
        .route("/drawings", post(save_drawing))
        .route("/drawings/:filename", get(drawing))
        .route("/drawings/:filename/delete", post(delete_drawing))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

// GET /
async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, CommandError> {
    let view = commands::current_view(&state)?;
    Ok(Html(page::render_page(&view, &state, query.saved.as_deref())))
}

// POST /notes
async fn add_note(
    State(state): State<AppState>,
    Form(form): Form<NoteForm>,
) -> Result<Redirect, CommandError> {
    log::debug!("POST /notes ({} bytes)", form.text.len());
    commands::add_note(&state, &form.text)?;
    Ok(Redirect::to("/"))
}

// POST /notes/:index/delete
async fn delete_note(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Redirect, CommandError> {
    log::debug!("POST /notes/{index}/delete");
    commands::delete_note(&state, index)?;
    Ok(Redirect::to("/"))
}

// POST /drawings
//
// An empty body means nothing was drawn, same as `{"canvas": null}`.
async fn save_drawing(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SaveDrawingResponse>, CommandError> {
    let request = commands::parse_save_request(&body)?;
    log::debug!("POST /drawings (canvas: {})", request.canvas.is_some());
    commands::save_drawing(&state, request).map(Json)
}

// GET /drawings/:filename
async fn drawing(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, CommandError> {
    let bytes = commands::read_drawing(&state, &filename)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}

// POST /drawings/:filename/delete
async fn delete_drawing(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Redirect, CommandError> {
    log::debug!("POST /drawings/{filename}/delete");
    commands::delete_drawing(&state, &filename)?;
    Ok(Redirect::to("/"))
}
