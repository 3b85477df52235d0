use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AgeGroup, Category, ClassGroup, SessionId};
use super::repository::{RepositoryError, ScoreRepository};
use super::service::{StandingsService, StandingsServiceError};
use super::standings::StandingsFilter;

/// Router builder exposing the standings and score-breakdown endpoints.
pub fn standings_router<R>(service: Arc<StandingsService<R>>) -> Router
where
    R: ScoreRepository + 'static,
{
    Router::new()
        .route("/api/v1/standings", get(standings_handler::<R>))
        .route(
            "/api/v1/standings/champion/combined",
            get(combined_handler::<R>),
        )
        .route(
            "/api/v1/standings/champion/:class_group",
            get(champion_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/score",
            get(breakdown_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StandingsQuery {
    class_group: Option<String>,
    age_group: Option<String>,
    category: Option<String>,
}

pub(crate) async fn standings_handler<R>(
    State(service): State<Arc<StandingsService<R>>>,
    Query(query): Query<StandingsQuery>,
) -> Response
where
    R: ScoreRepository + 'static,
{
    let class_group = match query.class_group.as_deref() {
        Some(raw) => match ClassGroup::parse(raw) {
            Some(class_group) => Some(class_group),
            None => return unknown_class_group(raw),
        },
        None => None,
    };

    let filter = StandingsFilter {
        class_group,
        age_group: query.age_group.map(AgeGroup),
        category: query.category.map(Category),
    };

    match service.standings(&filter) {
        Ok(entries) => {
            (StatusCode::OK, axum::Json(json!({ "entries": entries }))).into_response()
        }
        Err(error) => service_error(error),
    }
}

pub(crate) async fn champion_handler<R>(
    State(service): State<Arc<StandingsService<R>>>,
    Path(class_group): Path<String>,
) -> Response
where
    R: ScoreRepository + 'static,
{
    let Some(class_group) = ClassGroup::parse(&class_group) else {
        return unknown_class_group(&class_group);
    };

    match service.champion(class_group) {
        Ok(board) => (StatusCode::OK, axum::Json(board)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn combined_handler<R>(
    State(service): State<Arc<StandingsService<R>>>,
) -> Response
where
    R: ScoreRepository + 'static,
{
    match service.combined_champion() {
        Ok(entries) => {
            (StatusCode::OK, axum::Json(json!({ "entries": entries }))).into_response()
        }
        Err(error) => service_error(error),
    }
}

pub(crate) async fn breakdown_handler<R>(
    State(service): State<Arc<StandingsService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: ScoreRepository + 'static,
{
    match service.session_breakdown(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(StandingsServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "session not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => service_error(error),
    }
}

fn service_error(error: StandingsServiceError) -> Response {
    let status = match &error {
        StandingsServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        StandingsServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn unknown_class_group(raw: &str) -> Response {
    let payload = json!({ "error": format!("unknown class group '{raw}'") });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
