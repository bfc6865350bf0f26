use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pay-rate row for a staff member. Amounts are integer minor units
/// (cents). Exactly one row per staff member carries `active = true`;
/// superseded rows are kept for history.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PayRate {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub per_session_amount: i64, // cents per session
    pub per_hour_amount: i64,    // cents per hour
    pub effective_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRateInput {
    pub staff_id: Uuid,
    pub per_session_amount: i64,
    pub per_hour_amount: i64,
    pub effective_date: NaiveDate,
}
