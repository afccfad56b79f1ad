//! Student CRUD handlers.
//!
//! These are thin adapters: payload parsing and response shaping happen
//! here, all caching and validation policy lives in the grade service.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use gradebook_core::metrics::round2;

use crate::{
    handlers::AppError,
    models::{
        CreateStudent, ListStudentsQuery, ListStudentsResponse, MessageResponse, StudentResponse,
        UpdateStudent,
    },
    state::AppState,
};

/// Unwraps a JSON body, turning axum's rejection into the API error shape.
fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(payload)| payload)
        .map_err(|e| AppError::BadRequest(format!("Failed to parse request body: {e}")))
}

/// List students, optionally filtered by name (GET /api/students).
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<ListStudentsQuery>,
) -> Result<Json<ListStudentsResponse>, AppError> {
    let result = state.students.list_students(query.name.as_deref()).await?;

    Ok(Json(ListStudentsResponse {
        success: true,
        count: result.students.len(),
        from_cache: result.from_cache,
        access_time: round2(result.access_time_ms),
        students: result.students,
    }))
}

/// Create a new student (POST /api/students).
pub async fn create_student(
    State(state): State<AppState>,
    body: Result<Json<CreateStudent>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let payload = parse_body(body)?;

    let student = state
        .students
        .create_student(&payload.name, payload.grade)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(StudentResponse {
            success: true,
            message: "Student created successfully".to_string(),
            student,
        }),
    ))
}

/// Partially update a student (PUT /api/students/{id}).
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<UpdateStudent>, JsonRejection>,
) -> Result<Json<StudentResponse>, AppError> {
    let payload = parse_body(body)?;

    let student = state
        .students
        .update_student(id, payload.name.as_deref(), payload.grade)
        .await?;

    Ok(Json(StudentResponse {
        success: true,
        message: "Student updated successfully".to_string(),
        student,
    }))
}

/// Delete a student (DELETE /api/students/{id}).
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.students.delete_student(id).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Student deleted successfully".to_string(),
    }))
}
