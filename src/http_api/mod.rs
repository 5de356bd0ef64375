use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::assignment::Assignment;
use crate::report::{self, ReportError, WorkloadReport};
use crate::roster::{LookupError, Room, Teacher};
use crate::timetable::{
    BatchOutcome, BatchRequest, MasterRow, ReplaceSummary, ScheduleRow, Timetable, TimetableError,
};

#[derive(Clone)]
pub struct AppState {
    timetable: Arc<RwLock<Timetable>>,
}

impl AppState {
    pub fn new(timetable: Timetable) -> Self {
        Self {
            timetable: Arc::new(RwLock::new(timetable)),
        }
    }

    pub fn with_shared(timetable: Arc<RwLock<Timetable>>) -> Self {
        Self { timetable }
    }

    fn timetable(&self) -> Arc<RwLock<Timetable>> {
        self.timetable.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<LookupError> for ApiError {
    fn from(value: LookupError) -> Self {
        match value {
            LookupError::UnknownTeacher(_) | LookupError::UnknownRoom(_) => {
                ApiError::not_found(value.to_string())
            }
            LookupError::AmbiguousTeacher(_) | LookupError::AmbiguousRoom(_) => {
                ApiError::invalid(value.to_string())
            }
        }
    }
}

impl From<TimetableError> for ApiError {
    fn from(value: TimetableError) -> Self {
        match value {
            TimetableError::Lookup(err) => ApiError::from(err),
            TimetableError::InvalidRequest(message) => ApiError::Invalid(message),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(value: ReportError) -> Self {
        match value {
            ReportError::Lookup(err) => ApiError::from(err),
            ReportError::DataFrame(err) => ApiError::internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal(message) => {
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/teachers", get(list_teachers).put(replace_teachers))
        .route("/rooms", get(list_rooms).put(replace_rooms))
        .route("/schedule", get(list_schedule).delete(clear_schedule))
        .route("/schedule/batch", post(schedule_batch))
        .route("/schedule/master", put(replace_master))
        .route("/schedule/teacher/:id", get(teacher_agenda))
        .route("/schedule/room/:id", get(room_agenda))
        .route("/report", get(range_report))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, timetable: Timetable) -> std::io::Result<()> {
    let state = AppState::new(timetable);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_teachers(State(state): State<AppState>) -> Json<Vec<Teacher>> {
    let timetable = state.timetable();
    let teachers = {
        let guard = timetable.read();
        guard.roster().teachers().to_vec()
    };
    Json(teachers)
}

async fn replace_teachers(
    State(state): State<AppState>,
    Json(teachers): Json<Vec<Teacher>>,
) -> StatusCode {
    let timetable = state.timetable();
    let mut guard = timetable.write();
    guard.roster_mut().set_teachers(teachers);
    StatusCode::NO_CONTENT
}

async fn list_rooms(State(state): State<AppState>) -> Json<Vec<Room>> {
    let timetable = state.timetable();
    let rooms = {
        let guard = timetable.read();
        guard.roster().rooms().to_vec()
    };
    Json(rooms)
}

async fn replace_rooms(
    State(state): State<AppState>,
    Json(rooms): Json<Vec<Room>>,
) -> StatusCode {
    let timetable = state.timetable();
    let mut guard = timetable.write();
    guard.roster_mut().set_rooms(rooms);
    StatusCode::NO_CONTENT
}

async fn list_schedule(State(state): State<AppState>) -> Result<Json<Vec<ScheduleRow>>, ApiError> {
    let timetable = state.timetable();
    let rows = {
        let guard = timetable.read();
        guard.rows()?
    };
    Ok(Json(rows))
}

async fn clear_schedule(State(state): State<AppState>) -> StatusCode {
    let timetable = state.timetable();
    let mut guard = timetable.write();
    guard.clear();
    StatusCode::NO_CONTENT
}

async fn schedule_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchOutcome>, ApiError> {
    let timetable = state.timetable();
    let outcome = {
        let mut guard = timetable.write();
        guard.schedule_batch(&request)?
    };
    Ok(Json(outcome))
}

async fn replace_master(
    State(state): State<AppState>,
    Json(rows): Json<Vec<MasterRow>>,
) -> Json<ReplaceSummary> {
    let timetable = state.timetable();
    let summary = {
        let mut guard = timetable.write();
        guard.replace_all(rows)
    };
    Json(summary)
}

async fn teacher_agenda(
    State(state): State<AppState>,
    Path(teacher_id): Path<String>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
    let timetable = state.timetable();
    let assignments = {
        let guard = timetable.read();
        guard.roster().teacher_by_id(&teacher_id)?;
        guard
            .assignments_for_teacher(&teacher_id)
            .into_iter()
            .cloned()
            .collect()
    };
    Ok(Json(assignments))
}

async fn room_agenda(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
    let timetable = state.timetable();
    let assignments = {
        let guard = timetable.read();
        guard.roster().room_by_id(&room_id)?;
        guard
            .assignments_for_room(&room_id)
            .into_iter()
            .cloned()
            .collect()
    };
    Ok(Json(assignments))
}

#[derive(Debug, Deserialize)]
struct ReportQuery {
    start: NaiveDate,
    end: NaiveDate,
}

async fn range_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<WorkloadReport>, ApiError> {
    let timetable = state.timetable();
    let report = {
        let guard = timetable.read();
        report::aggregate_range(&guard, query.start, query.end)?
    };
    Ok(Json(report))
}
