use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use crate::database::models::{PayRate, SetRateInput};
use crate::error::AppError;

const RATE_COLUMNS: &str = r#"
    id, staff_id, per_session_amount, per_hour_amount,
    effective_date, active, created_at
"#;

#[derive(Clone)]
pub struct RateRepository {
    pool: SqlitePool,
}

impl RateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Replace the active rate for a staff member. Deactivating the previous
    /// rate and inserting the new one happen in a single transaction, so no
    /// instant observes zero or two active rows. A partial unique index on
    /// (staff_id) WHERE active backstops this against concurrent callers.
    pub async fn set_rate(&self, input: SetRateInput) -> Result<PayRate, AppError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE pay_rates
            SET active = FALSE
            WHERE staff_id = ? AND active = TRUE
            "#,
        )
        .bind(input.staff_id)
        .execute(&mut *tx)
        .await?;

        let rate = sqlx::query_as::<_, PayRate>(&format!(
            r#"
            INSERT INTO pay_rates (
                id, staff_id, per_session_amount, per_hour_amount,
                effective_date, active, created_at
            )
            VALUES (?, ?, ?, ?, ?, TRUE, ?)
            RETURNING {RATE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(input.staff_id)
        .bind(input.per_session_amount)
        .bind(input.per_hour_amount)
        .bind(input.effective_date)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(rate)
    }

    /// The single currently-effective rate for a staff member, if any.
    pub async fn resolve_active_rate(&self, staff_id: Uuid) -> Result<Option<PayRate>, AppError> {
        let rate = sqlx::query_as::<_, PayRate>(&format!(
            r#"
            SELECT {RATE_COLUMNS}
            FROM pay_rates
            WHERE staff_id = ? AND active = TRUE
            "#
        ))
        .bind(staff_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rate)
    }

    /// Same lookup, pinned to an open transaction so the rate an earning is
    /// computed from cannot change under the approval it belongs to.
    pub async fn active_rate_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        staff_id: Uuid,
    ) -> Result<Option<PayRate>, AppError> {
        let rate = sqlx::query_as::<_, PayRate>(&format!(
            r#"
            SELECT {RATE_COLUMNS}
            FROM pay_rates
            WHERE staff_id = ? AND active = TRUE
            "#
        ))
        .bind(staff_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(rate)
    }

    /// Full rate history for a staff member, newest first.
    pub async fn rate_history(&self, staff_id: Uuid) -> Result<Vec<PayRate>, AppError> {
        let rates = sqlx::query_as::<_, PayRate>(&format!(
            r#"
            SELECT {RATE_COLUMNS}
            FROM pay_rates
            WHERE staff_id = ?
            ORDER BY created_at DESC
            "#
        ))
        .bind(staff_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rates)
    }
}
