use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use crate::database::models::{Earning, EarningStatus, NewEarning};
use crate::error::AppError;

const EARNING_COLUMNS: &str = r#"
    id, staff_id, attendance_id, amount, calculation_method,
    session_duration_minutes, rate_applied, status, created_at, credited_at
"#;

#[derive(Clone)]
pub struct EarningRepository {
    pool: SqlitePool,
}

impl EarningRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the earning computed for an approved attendance record,
    /// inside the same transaction that flips the attendance status.
    /// The UNIQUE constraint on attendance_id makes a second insert for
    /// the same record impossible even across restarts.
    pub async fn insert_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        new: NewEarning,
    ) -> Result<Earning, AppError> {
        let now = Utc::now();

        let earning = sqlx::query_as::<_, Earning>(&format!(
            r#"
            INSERT INTO earnings (
                id, staff_id, attendance_id, amount, calculation_method,
                session_duration_minutes, rate_applied, status, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {EARNING_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new.staff_id)
        .bind(new.attendance_id)
        .bind(new.amount)
        .bind(new.calculation_method)
        .bind(new.session_duration_minutes)
        .bind(new.rate_applied)
        .bind(EarningStatus::Pending)
        .bind(now)
        .fetch_one(&mut **tx)
        .await?;

        Ok(earning)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Earning>, AppError> {
        let earning = sqlx::query_as::<_, Earning>(&format!(
            r#"
            SELECT {EARNING_COLUMNS}
            FROM earnings
            WHERE id = ?
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(earning)
    }

    /// Earnings with optional staff/status filtering, newest first.
    pub async fn list(
        &self,
        staff_id: Option<Uuid>,
        status: Option<EarningStatus>,
    ) -> Result<Vec<Earning>, AppError> {
        let mut query = format!(
            r#"
            SELECT {EARNING_COLUMNS}
            FROM earnings
            WHERE 1=1
            "#
        );

        if staff_id.is_some() {
            query.push_str(" AND staff_id = ?");
        }
        if status.is_some() {
            query.push_str(" AND status = ?");
        }
        query.push_str(" ORDER BY created_at DESC");

        let mut sql_query = sqlx::query_as::<_, Earning>(&query);
        if let Some(staff_id) = staff_id {
            sql_query = sql_query.bind(staff_id);
        }
        if let Some(status) = status {
            sql_query = sql_query.bind(status);
        }

        let earnings = sql_query.fetch_all(&self.pool).await?;
        Ok(earnings)
    }

    /// Flip a pending earning to approved. Zero rows affected means the
    /// earning was already credited (or rejected) and the caller must not
    /// touch the wallet.
    pub async fn mark_credited_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: Uuid,
        credited_at: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE earnings
            SET status = 'approved', credited_at = ?
            WHERE id = ? AND status = 'pending'
            "#,
        )
        .bind(credited_at)
        .bind(id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }

    /// Reject a pending earning (no wallet involvement, so no transaction
    /// scope is needed beyond the single statement).
    pub async fn mark_rejected(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE earnings
            SET status = 'rejected'
            WHERE id = ? AND status = 'pending'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
