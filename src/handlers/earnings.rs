use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::EarningStatus;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsQuery {
    pub staff_id: Option<Uuid>,
    pub status: Option<String>,
}

/// Earnings scoped to a staff member and/or status.
pub async fn get_earnings(
    state: web::Data<AppState>,
    query: web::Query<EarningsQuery>,
) -> Result<HttpResponse, AppError> {
    let status = match &query.status {
        Some(status_str) => Some(
            status_str
                .parse::<EarningStatus>()
                .map_err(AppError::Validation)?,
        ),
        None => None,
    };

    let earnings = state.ledger.list_earnings(query.staff_id, status).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(earnings)))
}

pub async fn get_earning(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let earning = state.ledger.get_earning(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(earning)))
}

/// Second-stage approval: credit a pending earning to the wallet.
pub async fn credit_earning(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let earning = state.ledger.credit_earning(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(earning)))
}

/// Reject a miscalculated pending earning without reversing the
/// attendance decision behind it.
pub async fn reject_earning(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let earning = state.ledger.reject_earning(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(earning)))
}
