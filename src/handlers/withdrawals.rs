use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{Decision, WithdrawalInput, WithdrawalStatus};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalsQuery {
    pub staff_id: Option<Uuid>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecideWithdrawalRequest {
    pub decision: Decision,
    pub decided_by: Uuid,
    pub notes: Option<String>,
}

/// Staff-initiated withdrawal request.
pub async fn request_withdrawal(
    state: web::Data<AppState>,
    input: web::Json<WithdrawalInput>,
) -> Result<HttpResponse, AppError> {
    let request = state
        .withdrawals
        .request_withdrawal(input.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(request)))
}

/// Withdrawal requests scoped to a staff member and/or status.
pub async fn get_withdrawals(
    state: web::Data<AppState>,
    query: web::Query<WithdrawalsQuery>,
) -> Result<HttpResponse, AppError> {
    let status = match &query.status {
        Some(status_str) => Some(
            status_str
                .parse::<WithdrawalStatus>()
                .map_err(AppError::Validation)?,
        ),
        None => None,
    };

    let requests = state
        .withdrawals
        .list_withdrawals(query.staff_id, status)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(requests)))
}

pub async fn get_withdrawal(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let request = state.withdrawals.get_withdrawal(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(request)))
}

/// Administrative approval or rejection. Approval debits the wallet; an
/// insufficient balance surfaces as a 409 and moves the request to
/// rejected with the reason recorded.
pub async fn decide_withdrawal(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<DecideWithdrawalRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let withdrawal = state
        .withdrawals
        .decide_withdrawal(
            path.into_inner(),
            request.decision,
            request.decided_by,
            request.notes,
        )
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(withdrawal)))
}

/// Confirmation that the external funds transfer went through.
pub async fn complete_withdrawal(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let withdrawal = state
        .withdrawals
        .complete_withdrawal(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(withdrawal)))
}
