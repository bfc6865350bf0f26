use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

/// One unit of pay derived from a single approved attendance record.
/// `attendance_id` is unique: an attendance record produces at most one
/// earning, ever. Amount and method are fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Earning {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub attendance_id: Uuid,
    pub amount: i64, // cents
    pub calculation_method: CalculationMethod,
    pub session_duration_minutes: Option<i64>,
    pub rate_applied: i64, // cents, the per-session or per-hour figure used
    pub status: EarningStatus,
    pub created_at: DateTime<Utc>,
    pub credited_at: Option<DateTime<Utc>>,
}

/// Calculator output, inserted inside the attendance-approval transaction.
#[derive(Debug, Clone)]
pub struct NewEarning {
    pub staff_id: Uuid,
    pub attendance_id: Uuid,
    pub amount: i64,
    pub calculation_method: CalculationMethod,
    pub session_duration_minutes: Option<i64>,
    pub rate_applied: i64,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum CalculationMethod {
        PerSession => "per_session",
        PerHour => "per_hour",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum EarningStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}
