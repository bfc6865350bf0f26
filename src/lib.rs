pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::AppError;

use sqlx::SqlitePool;

use database::repositories::{
    AttendanceRepository, EarningRepository, RateRepository, WalletRepository,
    WithdrawalRepository,
};
use services::{ApprovalService, LedgerService, Notifier, RateService, WithdrawalService};

pub struct AppState {
    pub rates: RateService,
    pub approvals: ApprovalService,
    pub ledger: LedgerService,
    pub withdrawals: WithdrawalService,
}

impl AppState {
    /// Wire the full service stack over a pool. Used by main and by the
    /// integration tests so both run the exact same composition.
    pub fn build(pool: SqlitePool, notifier: Notifier) -> Self {
        let rate_repository = RateRepository::new(pool.clone());
        let attendance_repository = AttendanceRepository::new(pool.clone());
        let earning_repository = EarningRepository::new(pool.clone());
        let wallet_repository = WalletRepository::new(pool.clone());
        let withdrawal_repository = WithdrawalRepository::new(pool.clone());

        AppState {
            rates: RateService::new(rate_repository.clone(), notifier.clone()),
            approvals: ApprovalService::new(
                pool.clone(),
                attendance_repository,
                rate_repository,
                earning_repository.clone(),
            ),
            ledger: LedgerService::new(
                pool.clone(),
                earning_repository,
                wallet_repository.clone(),
                notifier.clone(),
            ),
            withdrawals: WithdrawalService::new(
                pool,
                withdrawal_repository,
                wallet_repository,
                notifier,
            ),
        }
    }
}
