use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use crate::database::models::{ApprovalStatus, AttendanceInput, AttendanceRecord};
use crate::error::AppError;

const ATTENDANCE_COLUMNS: &str = r#"
    id, staff_id, date, session_type, check_in, check_out,
    approval_status, decided_by, decided_at, created_at
"#;

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: SqlitePool,
}

impl AttendanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Ingest a record from the attendance collaborator. Records always
    /// start out pending.
    pub async fn record(&self, input: AttendanceInput) -> Result<AttendanceRecord, AppError> {
        let now = Utc::now();

        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            INSERT INTO attendance_records (
                id, staff_id, date, session_type, check_in, check_out,
                approval_status, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {ATTENDANCE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(input.staff_id)
        .bind(input.date)
        .bind(input.session_type)
        .bind(input.check_in)
        .bind(input.check_out)
        .bind(ApprovalStatus::Pending)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<AttendanceRecord>, AppError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            SELECT {ATTENDANCE_COLUMNS}
            FROM attendance_records
            WHERE id = ?
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Flip a pending record to its terminal status. The `WHERE
    /// approval_status = 'pending'` guard makes the transition
    /// exactly-once: a second decision matches zero rows.
    pub async fn decide_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: Uuid,
        status: ApprovalStatus,
        decided_by: Uuid,
        decided_at: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE attendance_records
            SET approval_status = ?, decided_by = ?, decided_at = ?
            WHERE id = ? AND approval_status = 'pending'
            "#,
        )
        .bind(status)
        .bind(decided_by)
        .bind(decided_at)
        .bind(id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }
}
