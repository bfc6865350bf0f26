use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{AttendanceInput, Decision};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecideAttendanceRequest {
    pub decision: Decision,
    pub approver_id: Uuid,
}

/// Ingest an attendance record from the attendance collaborator.
pub async fn record_attendance(
    state: web::Data<AppState>,
    input: web::Json<AttendanceInput>,
) -> Result<HttpResponse, AppError> {
    let record = state.approvals.record_attendance(input.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(record)))
}

pub async fn get_attendance(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let record = state.approvals.get_attendance(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}

/// Approve or reject a pending attendance record. Approval creates the
/// earning in the same unit of work; the response carries both.
pub async fn decide_attendance(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<DecideAttendanceRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let outcome = state
        .approvals
        .decide_attendance(path.into_inner(), request.decision, request.approver_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(outcome)))
}
