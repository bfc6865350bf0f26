use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::AppState;

/// Wallet summary for a staff member: balance plus lifetime totals.
pub async fn get_wallet_summary(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let wallet = state.ledger.wallet_summary(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(wallet)))
}
