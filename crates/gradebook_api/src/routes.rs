//! Route table and request handlers.
//!
//! Paths, success payloads and error statuses are part of the public
//! contract, including the trailing-slash `GET /students/{id}/` delete route.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use gradebook_core::{core_version, Student, StudentId, Test, TestId, TestResult};
use serde::Serialize;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Success envelope for write operations.
#[derive(Debug, Serialize)]
pub struct ResponseMessage {
    pub message: &'static str,
}

impl ResponseMessage {
    fn new(message: &'static str) -> Json<Self> {
        Json(Self { message })
    }
}

#[derive(Debug, Serialize)]
pub struct AverageScore {
    #[serde(rename = "Average score")]
    pub average_score: f64,
}

#[derive(Debug, Serialize)]
pub struct HighestScore {
    #[serde(rename = "Highest score")]
    pub highest_score: i64,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

/// Builds the application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/students/", post(create_student).get(list_students))
        .route(
            "/students/{student_id}",
            get(get_student).delete(delete_student),
        )
        .route("/students/{student_id}/", get(delete_student))
        .route("/tests/", post(create_test).get(list_tests))
        .route("/tests/{test_id}", get(get_test))
        .route("/results/", post(create_result))
        .route(
            "/results/students/{student_id}/",
            get(list_results_by_student),
        )
        .route("/results/test/{test_id}/", get(list_results_by_test))
        .route("/results/test/{test_id}/average", get(average_score))
        .route("/results/test/{test_id}/highest", get(highest_score))
        .with_state(state)
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: core_version(),
    })
}

async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<Student>, JsonRejection>,
) -> ApiResult<ResponseMessage> {
    let Json(student) = payload?;
    state.write(|records| records.create_student(&student))?;
    Ok(ResponseMessage::new("Student created successfully"))
}

async fn get_student(
    State(state): State<AppState>,
    id: Result<Path<StudentId>, PathRejection>,
) -> ApiResult<Student> {
    let Path(id) = id?;
    Ok(Json(state.read(|records| records.get_student(id))?))
}

async fn list_students(State(state): State<AppState>) -> ApiResult<Vec<Student>> {
    Ok(Json(state.read(|records| records.list_students())?))
}

async fn delete_student(
    State(state): State<AppState>,
    id: Result<Path<StudentId>, PathRejection>,
) -> ApiResult<ResponseMessage> {
    let Path(id) = id?;
    state.write(|records| records.delete_student(id))?;
    Ok(ResponseMessage::new("Student deleted successfully"))
}

async fn create_test(
    State(state): State<AppState>,
    payload: Result<Json<Test>, JsonRejection>,
) -> ApiResult<ResponseMessage> {
    let Json(test) = payload?;
    state.write(|records| records.create_test(&test))?;
    Ok(ResponseMessage::new("Test created successfully"))
}

async fn get_test(
    State(state): State<AppState>,
    id: Result<Path<TestId>, PathRejection>,
) -> ApiResult<Test> {
    let Path(id) = id?;
    Ok(Json(state.read(|records| records.get_test(id))?))
}

async fn list_tests(State(state): State<AppState>) -> ApiResult<Vec<Test>> {
    Ok(Json(state.read(|records| records.list_tests())?))
}

async fn create_result(
    State(state): State<AppState>,
    payload: Result<Json<TestResult>, JsonRejection>,
) -> ApiResult<ResponseMessage> {
    let Json(result) = payload?;
    state.write(|records| records.create_result(&result))?;
    Ok(ResponseMessage::new("Result created successfully"))
}

async fn list_results_by_student(
    State(state): State<AppState>,
    id: Result<Path<StudentId>, PathRejection>,
) -> ApiResult<Vec<TestResult>> {
    let Path(id) = id?;
    Ok(Json(state.read(|records| records.list_results_by_student(id))?))
}

async fn list_results_by_test(
    State(state): State<AppState>,
    id: Result<Path<TestId>, PathRejection>,
) -> ApiResult<Vec<TestResult>> {
    let Path(id) = id?;
    Ok(Json(state.read(|records| records.list_results_by_test(id))?))
}

async fn average_score(
    State(state): State<AppState>,
    id: Result<Path<TestId>, PathRejection>,
) -> ApiResult<AverageScore> {
    let Path(id) = id?;
    let average_score = state.read(|records| records.average_score(id))?;
    Ok(Json(AverageScore { average_score }))
}

async fn highest_score(
    State(state): State<AppState>,
    id: Result<Path<TestId>, PathRejection>,
) -> ApiResult<HighestScore> {
    let Path(id) = id?;
    let highest_score = state.read(|records| records.highest_score(id))?;
    Ok(Json(HighestScore { highest_score }))
}
