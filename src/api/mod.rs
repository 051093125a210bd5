mod extract;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::{Router, extract::State, http::StatusCode, routing::{get, post}};
use chrono::Utc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub use extract::Ids;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/user/{id}", get(get_user))
        .route("/user/{id}/courses", get(list_user_courses))
        .route("/user/{id}/todo", get(list_todo_items))
        .route("/courses", get(list_courses))
        .route("/courses/{id}", get(get_course))
        .route("/courses/{id}/modules", get(list_modules))
        .route("/courses/{id}/assignments", get(list_assignments))
        .route("/courses/{id}/quizzes", get(list_quizzes))
        .route("/courses/{id}/announcements", get(list_course_announcements))
        .route("/modules/{id}/items", get(list_module_items))
        .route("/assignments", post(create_assignment))
        .route("/assignments/{id}", get(get_assignment))
        .route("/assignments/{id}/submissions/{user_id}", get(get_submission))
        .route("/submissions", post(create_submission))
        .route("/quizzes", post(create_quiz))
        .route("/quizzes/{id}", get(get_quiz))
        .route("/quizzes/{id}/questions", get(list_quiz_questions))
        .route("/questions/{id}/options", get(list_question_options))
        .route("/announcements", get(list_announcements).post(create_announcement))
}

/// Unwraps a JSON body, collapsing every decoding failure into the same
/// generic message for the entity.
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>, entity: &str) -> Result<T, AppError> {
    payload.map(|Json(req)| req).map_err(|rejection| {
        warn!("invalid {} payload: {}", entity, rejection.body_text());
        invalid_data(entity)
    })
}

fn invalid_data(entity: &str) -> AppError {
    AppError::BadRequest(format!("Invalid {} data", entity))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn get_user(
    State(state): State<AppState>,
    Ids(id): Ids<Id>,
) -> Result<Json<UserProfile>, AppError> {
    let user = state.storage.get_user(id).await.ok_or(AppError::NotFound("User"))?;
    Ok(Json(user.into()))
}

async fn list_courses(State(state): State<AppState>) -> Json<Vec<Course>> {
    Json(state.storage.get_courses().await)
}

async fn list_user_courses(State(state): State<AppState>, Ids(user_id): Ids<Id>) -> Json<Vec<Course>> {
    Json(state.storage.get_user_courses(user_id).await)
}

async fn get_course(
    State(state): State<AppState>,
    Ids(id): Ids<Id>,
) -> Result<Json<Course>, AppError> {
    let course = state.storage.get_course(id).await.ok_or(AppError::NotFound("Course"))?;
    Ok(Json(course))
}

async fn list_modules(State(state): State<AppState>, Ids(course_id): Ids<Id>) -> Json<Vec<Module>> {
    Json(state.storage.get_modules(course_id).await)
}

async fn list_module_items(State(state): State<AppState>, Ids(module_id): Ids<Id>) -> Json<Vec<ModuleItem>> {
    Json(state.storage.get_module_items(module_id).await)
}

async fn list_assignments(State(state): State<AppState>, Ids(course_id): Ids<Id>) -> Json<Vec<Assignment>> {
    Json(state.storage.get_assignments(course_id).await)
}

async fn get_assignment(
    State(state): State<AppState>,
    Ids(id): Ids<Id>,
) -> Result<Json<Assignment>, AppError> {
    let assignment = state
        .storage
        .get_assignment(id)
        .await
        .ok_or(AppError::NotFound("Assignment"))?;
    Ok(Json(assignment))
}

async fn create_assignment(
    State(state): State<AppState>,
    payload: Result<Json<NewAssignmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Assignment>), AppError> {
    let req = parse_body(payload, "assignment")?;
    let assignment = state
        .storage
        .create_assignment(req)
        .await
        .map_err(|_| invalid_data("assignment"))?;
    info!("assignment {} created for course {}", assignment.id, assignment.course_id);
    Ok((StatusCode::CREATED, Json(assignment)))
}

async fn get_submission(
    State(state): State<AppState>,
    Ids((assignment_id, user_id)): Ids<(Id, Id)>,
) -> Result<Json<Submission>, AppError> {
    let submission = state
        .storage
        .get_submission(assignment_id, user_id)
        .await
        .ok_or(AppError::NotFound("Submission"))?;
    Ok(Json(submission))
}

async fn create_submission(
    State(state): State<AppState>,
    payload: Result<Json<NewSubmissionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Submission>), AppError> {
    let req = parse_body(payload, "submission")?;
    let submission = state
        .storage
        .create_submission(req, Utc::now())
        .await
        .map_err(|_| invalid_data("submission"))?;
    info!(
        "user {} submitted assignment {}",
        submission.user_id, submission.assignment_id
    );
    Ok((StatusCode::CREATED, Json(submission)))
}

async fn list_quizzes(State(state): State<AppState>, Ids(course_id): Ids<Id>) -> Json<Vec<Quiz>> {
    Json(state.storage.get_quizzes(course_id).await)
}

async fn get_quiz(
    State(state): State<AppState>,
    Ids(id): Ids<Id>,
) -> Result<Json<Quiz>, AppError> {
    let quiz = state.storage.get_quiz(id).await.ok_or(AppError::NotFound("Quiz"))?;
    Ok(Json(quiz))
}

async fn create_quiz(
    State(state): State<AppState>,
    payload: Result<Json<NewQuizRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Quiz>), AppError> {
    let req = parse_body(payload, "quiz")?;
    let quiz = state
        .storage
        .create_quiz(req)
        .await
        .map_err(|_| invalid_data("quiz"))?;
    info!("quiz {} created for course {}", quiz.id, quiz.course_id);
    Ok((StatusCode::CREATED, Json(quiz)))
}

async fn list_quiz_questions(State(state): State<AppState>, Ids(quiz_id): Ids<Id>) -> Json<Vec<QuizQuestion>> {
    Json(state.storage.get_quiz_questions(quiz_id).await)
}

async fn list_question_options(State(state): State<AppState>, Ids(question_id): Ids<Id>) -> Json<Vec<QuizOption>> {
    Json(state.storage.get_quiz_options(question_id).await)
}

async fn list_course_announcements(
    State(state): State<AppState>,
    Ids(course_id): Ids<Id>,
) -> Json<Vec<Announcement>> {
    Json(state.storage.get_announcements(Some(course_id)).await)
}

async fn list_announcements(State(state): State<AppState>) -> Json<Vec<Announcement>> {
    Json(state.storage.get_announcements(None).await)
}

async fn create_announcement(
    State(state): State<AppState>,
    payload: Result<Json<NewAnnouncementRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Announcement>), AppError> {
    let req = parse_body(payload, "announcement")?;
    let announcement = state
        .storage
        .create_announcement(req, Utc::now())
        .await
        .map_err(|_| invalid_data("announcement"))?;
    info!("announcement {} posted to course {}", announcement.id, announcement.course_id);
    Ok((StatusCode::CREATED, Json(announcement)))
}

async fn list_todo_items(State(state): State<AppState>, Ids(user_id): Ids<Id>) -> Json<Vec<TodoItem>> {
    Json(state.storage.get_user_todo_items(user_id).await)
}
