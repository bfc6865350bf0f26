use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use crate::database::models::{WithdrawalInput, WithdrawalRequest, WithdrawalStatus};
use crate::error::AppError;

const WITHDRAWAL_COLUMNS: &str = r#"
    id, staff_id, amount, bank_details, status, decided_by,
    decision_notes, requested_at, decided_at, completed_at
"#;

#[derive(Clone)]
pub struct WithdrawalRepository {
    pool: SqlitePool,
}

impl WithdrawalRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: WithdrawalInput) -> Result<WithdrawalRequest, AppError> {
        let now = Utc::now();

        let request = sqlx::query_as::<_, WithdrawalRequest>(&format!(
            r#"
            INSERT INTO withdrawal_requests (
                id, staff_id, amount, bank_details, status, requested_at
            )
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {WITHDRAWAL_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(input.staff_id)
        .bind(input.amount)
        .bind(input.bank_details)
        .bind(WithdrawalStatus::Pending)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<WithdrawalRequest>, AppError> {
        let request = sqlx::query_as::<_, WithdrawalRequest>(&format!(
            r#"
            SELECT {WITHDRAWAL_COLUMNS}
            FROM withdrawal_requests
            WHERE id = ?
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// Withdrawal requests with optional staff/status filtering, newest first.
    pub async fn list(
        &self,
        staff_id: Option<Uuid>,
        status: Option<WithdrawalStatus>,
    ) -> Result<Vec<WithdrawalRequest>, AppError> {
        let mut query = format!(
            r#"
            SELECT {WITHDRAWAL_COLUMNS}
            FROM withdrawal_requests
            WHERE 1=1
            "#
        );

        if staff_id.is_some() {
            query.push_str(" AND staff_id = ?");
        }
        if status.is_some() {
            query.push_str(" AND status = ?");
        }
        query.push_str(" ORDER BY requested_at DESC");

        let mut sql_query = sqlx::query_as::<_, WithdrawalRequest>(&query);
        if let Some(staff_id) = staff_id {
            sql_query = sql_query.bind(staff_id);
        }
        if let Some(status) = status {
            sql_query = sql_query.bind(status);
        }

        let requests = sql_query.fetch_all(&self.pool).await?;
        Ok(requests)
    }

    /// Move a pending request to approved or rejected. Zero rows affected
    /// means the request was already decided.
    pub async fn decide_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: Uuid,
        status: WithdrawalStatus,
        decided_by: Option<Uuid>,
        notes: Option<&str>,
        decided_at: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE withdrawal_requests
            SET status = ?, decided_by = ?, decision_notes = ?, decided_at = ?
            WHERE id = ? AND status = 'pending'
            "#,
        )
        .bind(status)
        .bind(decided_by)
        .bind(notes)
        .bind(decided_at)
        .bind(id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }

    /// Record the external funds-transfer confirmation. Only an approved
    /// request can complete; no balance mutation happens here.
    pub async fn mark_completed(&self, id: Uuid) -> Result<u64, AppError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE withdrawal_requests
            SET status = 'completed', completed_at = ?
            WHERE id = ? AND status = 'approved'
            "#,
        )
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
