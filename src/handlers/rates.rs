use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::database::models::SetRateInput;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::AppState;

/// Set the active pay rate for a staff member (administrative).
pub async fn set_rate(
    state: web::Data<AppState>,
    input: web::Json<SetRateInput>,
) -> Result<HttpResponse, AppError> {
    let rate = state.rates.set_rate(input.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(rate)))
}

/// The currently-effective rate for a staff member.
pub async fn get_active_rate(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let rate = state.rates.active_rate(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(rate)))
}

/// All rates ever set for a staff member, newest first.
pub async fn get_rate_history(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let rates = state.rates.rate_history(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(rates)))
}
