use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{Earning, EarningStatus, Wallet};
use crate::database::repositories::{EarningRepository, WalletRepository};
use crate::error::AppError;
use crate::services::notifier::{LedgerEvent, Notifier};

/// Owner of all wallet and earning mutation. Crediting an earning and
/// bumping the wallet aggregate are a single transaction per staff row;
/// nothing else writes these tables.
#[derive(Clone)]
pub struct LedgerService {
    pool: SqlitePool,
    earnings: EarningRepository,
    wallets: WalletRepository,
    notifier: Notifier,
}

impl LedgerService {
    pub fn new(
        pool: SqlitePool,
        earnings: EarningRepository,
        wallets: WalletRepository,
        notifier: Notifier,
    ) -> Self {
        Self {
            pool,
            earnings,
            wallets,
            notifier,
        }
    }

    /// Approve a pending earning and credit its amount to the wallet.
    /// Idempotency guard: a second credit for the same earning fails with
    /// `AlreadyCredited` and leaves the balance untouched.
    pub async fn credit_earning(&self, earning_id: Uuid) -> Result<Earning, AppError> {
        let earning = self.get_earning(earning_id).await?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let flipped = self
            .earnings
            .mark_credited_in_tx(&mut tx, earning_id, now)
            .await?;
        if flipped == 0 {
            return Err(AppError::AlreadyCredited(earning_id));
        }

        self.wallets
            .ensure_in_tx(&mut tx, earning.staff_id, now)
            .await?;
        self.wallets
            .credit_in_tx(&mut tx, earning.staff_id, earning.amount, now)
            .await?;

        tx.commit().await?;

        log::info!(
            "Credited earning {} ({}) to wallet of staff {}",
            earning_id,
            earning.amount,
            earning.staff_id
        );
        self.notifier.notify(LedgerEvent::EarningCredited {
            staff_id: earning.staff_id,
            earning_id,
            amount: earning.amount,
        });

        self.get_earning(earning_id).await
    }

    /// Reject a miscalculated pending earning without touching the
    /// attendance decision it came from.
    pub async fn reject_earning(&self, earning_id: Uuid) -> Result<Earning, AppError> {
        self.get_earning(earning_id).await?;

        let rejected = self.earnings.mark_rejected(earning_id).await?;
        if rejected == 0 {
            return Err(AppError::PreconditionFailed(format!(
                "earning {} is not pending",
                earning_id
            )));
        }

        self.get_earning(earning_id).await
    }

    pub async fn get_earning(&self, earning_id: Uuid) -> Result<Earning, AppError> {
        self.earnings
            .get(earning_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("earning {}", earning_id)))
    }

    pub async fn list_earnings(
        &self,
        staff_id: Option<Uuid>,
        status: Option<EarningStatus>,
    ) -> Result<Vec<Earning>, AppError> {
        self.earnings.list(staff_id, status).await
    }

    /// Wallet summary; staff members with no credited earning yet get a
    /// zeroed summary rather than a 404.
    pub async fn wallet_summary(&self, staff_id: Uuid) -> Result<Wallet, AppError> {
        Ok(self
            .wallets
            .get(staff_id)
            .await?
            .unwrap_or_else(|| Wallet::empty(staff_id)))
    }
}
