use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{Decision, WithdrawalInput, WithdrawalRequest, WithdrawalStatus};
use crate::database::repositories::{WalletRepository, WithdrawalRepository};
use crate::error::AppError;
use crate::services::notifier::{LedgerEvent, Notifier};

/// Withdrawal request lifecycle: pending -> approved -> completed, or
/// pending -> rejected. Funds are only moved at approval time, by a debit
/// whose sufficiency check is atomic with the update.
#[derive(Clone)]
pub struct WithdrawalService {
    pool: SqlitePool,
    withdrawals: WithdrawalRepository,
    wallets: WalletRepository,
    notifier: Notifier,
}

impl WithdrawalService {
    pub fn new(
        pool: SqlitePool,
        withdrawals: WithdrawalRepository,
        wallets: WalletRepository,
        notifier: Notifier,
    ) -> Self {
        Self {
            pool,
            withdrawals,
            wallets,
            notifier,
        }
    }

    /// Record a withdrawal request. The balance check here is advisory
    /// only (it may be stale by approval time); the request is stored as
    /// pending without reserving funds either way.
    pub async fn request_withdrawal(
        &self,
        input: WithdrawalInput,
    ) -> Result<WithdrawalRequest, AppError> {
        if input.amount <= 0 {
            return Err(AppError::Validation(
                "withdrawal amount must be positive".to_string(),
            ));
        }
        if input.bank_details.trim().is_empty() {
            return Err(AppError::Validation(
                "bank details are required".to_string(),
            ));
        }

        let balance = self.current_balance(input.staff_id).await?;
        if input.amount > balance {
            log::warn!(
                "Withdrawal request for staff {} exceeds current balance ({} > {})",
                input.staff_id,
                input.amount,
                balance
            );
        }

        self.withdrawals.create(input).await
    }

    /// Administrative decision. Approval debits the wallet atomically; if
    /// the balance has dropped since the request was made, the request is
    /// moved to rejected with the reason recorded instead of staying
    /// pending forever.
    pub async fn decide_withdrawal(
        &self,
        id: Uuid,
        decision: Decision,
        decided_by: Uuid,
        notes: Option<String>,
    ) -> Result<WithdrawalRequest, AppError> {
        let request = self.get_withdrawal(id).await?;
        let now = Utc::now();

        match decision {
            Decision::Reject => {
                let mut tx = self.pool.begin().await?;
                let flipped = self
                    .withdrawals
                    .decide_in_tx(
                        &mut tx,
                        id,
                        WithdrawalStatus::Rejected,
                        Some(decided_by),
                        notes.as_deref(),
                        now,
                    )
                    .await?;
                if flipped == 0 {
                    return Err(AppError::AlreadyDecided(id));
                }
                tx.commit().await?;

                self.notifier.notify(LedgerEvent::WithdrawalDecided {
                    staff_id: request.staff_id,
                    withdrawal_id: id,
                    status: WithdrawalStatus::Rejected,
                });
            }
            Decision::Approve => {
                let mut tx = self.pool.begin().await?;
                let flipped = self
                    .withdrawals
                    .decide_in_tx(
                        &mut tx,
                        id,
                        WithdrawalStatus::Approved,
                        Some(decided_by),
                        notes.as_deref(),
                        now,
                    )
                    .await?;
                if flipped == 0 {
                    return Err(AppError::AlreadyDecided(id));
                }

                let debited = self
                    .wallets
                    .debit_in_tx(&mut tx, request.staff_id, request.amount, now)
                    .await?;
                if debited == 0 {
                    tx.rollback().await?;
                    return self.reject_insufficient(&request, decided_by).await;
                }

                tx.commit().await?;

                log::info!(
                    "Withdrawal {} approved: debited {} from wallet of staff {}",
                    id,
                    request.amount,
                    request.staff_id
                );
                self.notifier.notify(LedgerEvent::WithdrawalDecided {
                    staff_id: request.staff_id,
                    withdrawal_id: id,
                    status: WithdrawalStatus::Approved,
                });
            }
        }

        self.get_withdrawal(id).await
    }

    /// External funds-transfer confirmation. No balance mutation; the
    /// debit already happened at approval.
    pub async fn complete_withdrawal(&self, id: Uuid) -> Result<WithdrawalRequest, AppError> {
        self.get_withdrawal(id).await?;

        let completed = self.withdrawals.mark_completed(id).await?;
        if completed == 0 {
            return Err(AppError::PreconditionFailed(format!(
                "withdrawal {} is not approved",
                id
            )));
        }

        self.get_withdrawal(id).await
    }

    pub async fn get_withdrawal(&self, id: Uuid) -> Result<WithdrawalRequest, AppError> {
        self.withdrawals
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("withdrawal request {}", id)))
    }

    pub async fn list_withdrawals(
        &self,
        staff_id: Option<Uuid>,
        status: Option<WithdrawalStatus>,
    ) -> Result<Vec<WithdrawalRequest>, AppError> {
        self.withdrawals.list(staff_id, status).await
    }

    async fn current_balance(&self, staff_id: Uuid) -> Result<i64, AppError> {
        Ok(self
            .wallets
            .get(staff_id)
            .await?
            .map(|w| w.balance)
            .unwrap_or(0))
    }

    /// The balance moved between request and approval. The approval was
    /// rolled back; record the rejection with its reason and surface the
    /// failure to the caller.
    async fn reject_insufficient(
        &self,
        request: &WithdrawalRequest,
        decided_by: Uuid,
    ) -> Result<WithdrawalRequest, AppError> {
        let available = self.current_balance(request.staff_id).await?;
        let reason = format!(
            "insufficient balance: requested {}, available {}",
            request.amount, available
        );
        log::warn!("Withdrawal {} rejected: {}", request.id, reason);

        let mut tx = self.pool.begin().await?;
        let flipped = self
            .withdrawals
            .decide_in_tx(
                &mut tx,
                request.id,
                WithdrawalStatus::Rejected,
                Some(decided_by),
                Some(&reason),
                Utc::now(),
            )
            .await?;
        if flipped == 0 {
            return Err(AppError::AlreadyDecided(request.id));
        }
        tx.commit().await?;

        self.notifier.notify(LedgerEvent::WithdrawalDecided {
            staff_id: request.staff_id,
            withdrawal_id: request.id,
            status: WithdrawalStatus::Rejected,
        });

        Err(AppError::InsufficientBalance {
            requested: request.amount,
            available,
        })
    }
}
