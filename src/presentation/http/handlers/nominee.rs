//! Nominee Handlers
//!
//! HTTP handlers for the nominee of a loan application. Every route is
//! scoped under `/applications/{application_id}`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::dto::{NomineeRequest, NomineeResponse};
use crate::application::services::NomineeError;
use crate::presentation::http::extractors::BearerToken;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Helper to convert NomineeError to AppError
fn map_nominee_error(e: NomineeError) -> AppError {
    match e {
        NomineeError::NotFound => AppError::NotFound("Nominee not found".into()),
        NomineeError::ApplicationNotFound => {
            AppError::NotFound("Loan application not found".into())
        }
        NomineeError::AlreadyExists => {
            AppError::Conflict("Nominee already exists for this application".into())
        }
        NomineeError::Internal(msg) => AppError::Internal(msg),
    }
}

fn parse_id(raw: &str, what: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} ID", what)))
}

/// Unpack a JSON nominee body. Syntax, date and content-type failures are 400.
fn read_body(payload: Result<Json<NomineeRequest>, JsonRejection>) -> Result<NomineeRequest, AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(body)
}

/// Get the nominee of an application
///
/// GET /api/applications/{application_id}/nominee
///
/// Returns 404 with an empty body when the application has no nominee yet.
#[tracing::instrument(skip_all, fields(application_id = %application_id, authenticated = token.is_present()))]
pub async fn get_nominee(
    State(state): State<AppState>,
    token: BearerToken,
    Path(application_id): Path<String>,
) -> Result<Response, AppError> {
    let application_id = parse_id(&application_id, "application")?;

    let nominee = state
        .nominee_service
        .get_by_application_id(application_id)
        .await
        .map_err(map_nominee_error)?;

    Ok(match nominee {
        Some(nominee) => Json(NomineeResponse::from(nominee)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

/// Create or replace the nominee of an application
///
/// POST /api/applications/{application_id}/nominee
///
/// Every nominee field is overwritten; missing or null fields clear the
/// stored value.
///
/// ## Errors
/// - 400: Malformed body
/// - 404: Loan application not found
#[tracing::instrument(skip_all, fields(application_id = %application_id, authenticated = token.is_present()))]
pub async fn upsert_nominee(
    State(state): State<AppState>,
    token: BearerToken,
    Path(application_id): Path<String>,
    payload: Result<Json<NomineeRequest>, JsonRejection>,
) -> Result<Json<NomineeResponse>, AppError> {
    let application_id = parse_id(&application_id, "application")?;
    let body = read_body(payload)?;

    let saved = state
        .nominee_service
        .upsert_nominee(application_id, body.into())
        .await
        .map_err(map_nominee_error)?;

    Ok(Json(NomineeResponse::from(saved)))
}

/// Delete the nominee of an application
///
/// DELETE /api/applications/{application_id}/nominee
///
/// Succeeds with 204 whether or not a nominee existed.
#[tracing::instrument(skip_all, fields(application_id = %application_id, authenticated = token.is_present()))]
pub async fn delete_application_nominee(
    State(state): State<AppState>,
    token: BearerToken,
    Path(application_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let application_id = parse_id(&application_id, "application")?;

    state
        .nominee_service
        .delete_by_application_id(application_id)
        .await
        .map_err(map_nominee_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the nominees of an application
///
/// GET /api/applications/{application_id}/nominees
#[tracing::instrument(skip_all, fields(application_id = %application_id, authenticated = token.is_present()))]
pub async fn list_nominees(
    State(state): State<AppState>,
    token: BearerToken,
    Path(application_id): Path<String>,
) -> Result<Json<Vec<NomineeResponse>>, AppError> {
    let application_id = parse_id(&application_id, "application")?;

    let nominees = state
        .nominee_service
        .get_all_by_application_id(application_id)
        .await
        .map_err(map_nominee_error)?;

    Ok(Json(nominees.into_iter().map(NomineeResponse::from).collect()))
}

/// Create the nominee of an application
///
/// POST /api/applications/{application_id}/nominees
///
/// ## Errors
/// - 400: Malformed body
/// - 404: Loan application not found
/// - 409: The application already has a nominee
#[tracing::instrument(skip_all, fields(application_id = %application_id, authenticated = token.is_present()))]
pub async fn create_nominee(
    State(state): State<AppState>,
    token: BearerToken,
    Path(application_id): Path<String>,
    payload: Result<Json<NomineeRequest>, JsonRejection>,
) -> Result<Json<NomineeResponse>, AppError> {
    let application_id = parse_id(&application_id, "application")?;
    let body = read_body(payload)?;

    let created = state
        .nominee_service
        .create_nominee(application_id, body.into())
        .await
        .map_err(map_nominee_error)?;

    Ok(Json(NomineeResponse::from(created)))
}

/// Get a nominee by id
///
/// GET /api/applications/{application_id}/nominee/{nominee_id}
///
/// A nominee belonging to another application is reported as absent.
#[tracing::instrument(skip_all, fields(application_id = %application_id, nominee_id = %nominee_id, authenticated = token.is_present()))]
pub async fn get_nominee_by_id(
    State(state): State<AppState>,
    token: BearerToken,
    Path((application_id, nominee_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let application_id = parse_id(&application_id, "application")?;
    let nominee_id = parse_id(&nominee_id, "nominee")?;

    let nominee = state
        .nominee_service
        .get_one(application_id, nominee_id)
        .await
        .map_err(map_nominee_error)?;

    Ok(match nominee {
        Some(nominee) => Json(NomineeResponse::from(nominee)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

/// Replace a nominee
///
/// PUT /api/applications/{application_id}/nominee/{nominee_id}
///
/// ## Errors
/// - 400: Malformed body
/// - 404: Nominee not found for this application
#[tracing::instrument(skip_all, fields(application_id = %application_id, nominee_id = %nominee_id, authenticated = token.is_present()))]
pub async fn update_nominee(
    State(state): State<AppState>,
    token: BearerToken,
    Path((application_id, nominee_id)): Path<(String, String)>,
    payload: Result<Json<NomineeRequest>, JsonRejection>,
) -> Result<Json<NomineeResponse>, AppError> {
    let application_id = parse_id(&application_id, "application")?;
    let nominee_id = parse_id(&nominee_id, "nominee")?;
    let body = read_body(payload)?;

    let updated = state
        .nominee_service
        .update_nominee(application_id, nominee_id, body.into())
        .await
        .map_err(map_nominee_error)?;

    Ok(Json(NomineeResponse::from(updated)))
}

/// Delete a nominee
///
/// DELETE /api/applications/{application_id}/nominee/{nominee_id}
///
/// Succeeds with 204 whether or not the nominee existed.
#[tracing::instrument(skip_all, fields(application_id = %application_id, nominee_id = %nominee_id, authenticated = token.is_present()))]
pub async fn delete_nominee(
    State(state): State<AppState>,
    token: BearerToken,
    Path((application_id, nominee_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let application_id = parse_id(&application_id, "application")?;
    let nominee_id = parse_id(&nominee_id, "nominee")?;

    state
        .nominee_service
        .delete_nominee(application_id, nominee_id)
        .await
        .map_err(map_nominee_error)?;

    Ok(StatusCode::NO_CONTENT)
}
