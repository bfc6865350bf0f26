use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use crate::database::models::Wallet;
use crate::error::AppError;

const WALLET_COLUMNS: &str = r#"
    staff_id, balance, total_earned, total_withdrawn, created_at, updated_at
"#;

#[derive(Clone)]
pub struct WalletRepository {
    pool: SqlitePool,
}

impl WalletRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, staff_id: Uuid) -> Result<Option<Wallet>, AppError> {
        let wallet = sqlx::query_as::<_, Wallet>(&format!(
            r#"
            SELECT {WALLET_COLUMNS}
            FROM wallets
            WHERE staff_id = ?
            "#
        ))
        .bind(staff_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(wallet)
    }

    /// Lazily create a zeroed wallet. Called inside the credit transaction
    /// so the first earning and the wallet row commit together.
    pub async fn ensure_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        staff_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO wallets (staff_id, balance, total_earned, total_withdrawn, created_at, updated_at)
            VALUES (?, 0, 0, 0, ?, ?)
            ON CONFLICT (staff_id) DO NOTHING
            "#,
        )
        .bind(staff_id)
        .bind(now)
        .bind(now)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Increment balance and total_earned in one statement; the wallet
    /// aggregate is only ever mutated through these single-row updates.
    pub async fn credit_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        staff_id: Uuid,
        amount: i64,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE wallets
            SET balance = balance + ?,
                total_earned = total_earned + ?,
                updated_at = ?
            WHERE staff_id = ?
            "#,
        )
        .bind(amount)
        .bind(amount)
        .bind(now)
        .bind(staff_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Debit with the sufficiency check folded into the statement itself:
    /// `balance >= amount` is evaluated at the instant of the update, so a
    /// concurrent debit that got there first makes this one match zero rows
    /// instead of driving the balance negative.
    pub async fn debit_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        staff_id: Uuid,
        amount: i64,
        now: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE wallets
            SET balance = balance - ?,
                total_withdrawn = total_withdrawn + ?,
                updated_at = ?
            WHERE staff_id = ? AND balance >= ?
            "#,
        )
        .bind(amount)
        .bind(amount)
        .bind(now)
        .bind(staff_id)
        .bind(amount)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }
}
