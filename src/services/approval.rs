use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{
    ApprovalStatus, AttendanceInput, AttendanceRecord, Decision, Earning,
};
use crate::database::repositories::{AttendanceRepository, EarningRepository, RateRepository};
use crate::error::AppError;
use crate::services::calculator;

/// Result of an approval decision: the updated record, plus the earning
/// created alongside it when the decision was an approval.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOutcome {
    pub record: AttendanceRecord,
    pub earning: Option<Earning>,
}

/// Gateway for attendance decisions. Moving a record out of pending and
/// creating its earning are one transaction: a crash or a missing rate
/// can never leave an approved record with no earning behind it.
#[derive(Clone)]
pub struct ApprovalService {
    pool: SqlitePool,
    attendance: AttendanceRepository,
    rates: RateRepository,
    earnings: EarningRepository,
}

impl ApprovalService {
    pub fn new(
        pool: SqlitePool,
        attendance: AttendanceRepository,
        rates: RateRepository,
        earnings: EarningRepository,
    ) -> Self {
        Self {
            pool,
            attendance,
            rates,
            earnings,
        }
    }

    /// Ingest endpoint for the attendance collaborator.
    pub async fn record_attendance(
        &self,
        input: AttendanceInput,
    ) -> Result<AttendanceRecord, AppError> {
        if input.session_type.trim().is_empty() {
            return Err(AppError::Validation("session type is required".to_string()));
        }
        if let (Some(check_in), Some(check_out)) = (input.check_in, input.check_out) {
            if check_out <= check_in {
                return Err(AppError::Validation(
                    "check-out must be after check-in".to_string(),
                ));
            }
        }

        self.attendance.record(input).await
    }

    pub async fn get_attendance(&self, id: Uuid) -> Result<AttendanceRecord, AppError> {
        self.attendance
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("attendance record {}", id)))
    }

    /// Entry point for an approval decision. Exactly-once: re-deciding an
    /// already-decided record fails with `AlreadyDecided` and has no effect.
    pub async fn decide_attendance(
        &self,
        attendance_id: Uuid,
        decision: Decision,
        approver_id: Uuid,
    ) -> Result<DecisionOutcome, AppError> {
        let record = self.get_attendance(attendance_id).await?;

        let status = match decision {
            Decision::Approve => ApprovalStatus::Approved,
            Decision::Reject => ApprovalStatus::Rejected,
        };
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let flipped = self
            .attendance
            .decide_in_tx(&mut tx, attendance_id, status, approver_id, now)
            .await?;
        if flipped == 0 {
            // Dropping the transaction rolls it back.
            return Err(AppError::AlreadyDecided(attendance_id));
        }

        let earning = match decision {
            Decision::Reject => None,
            Decision::Approve => {
                let rate = self
                    .rates
                    .active_rate_in_tx(&mut tx, record.staff_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::PreconditionFailed(format!(
                            "no active pay rate for staff {}",
                            record.staff_id
                        ))
                    })?;

                let new_earning = calculator::compute(&record, &rate);
                Some(self.earnings.insert_in_tx(&mut tx, new_earning).await?)
            }
        };

        tx.commit().await?;

        log::info!(
            "Attendance {} for staff {} decided: {}{}",
            attendance_id,
            record.staff_id,
            status,
            earning
                .as_ref()
                .map(|e| format!(", earning {} created for {} ({})", e.id, e.amount, e.calculation_method))
                .unwrap_or_default()
        );

        let record = self.get_attendance(attendance_id).await?;
        Ok(DecisionOutcome { record, earning })
    }
}
