use uuid::Uuid;

use crate::database::models::{PayRate, SetRateInput};
use crate::database::repositories::RateRepository;
use crate::error::AppError;
use crate::services::notifier::{LedgerEvent, Notifier};

/// Administrative write path for pay rates, plus the resolver the
/// earning calculation depends on.
#[derive(Clone)]
pub struct RateService {
    rates: RateRepository,
    notifier: Notifier,
}

impl RateService {
    pub fn new(rates: RateRepository, notifier: Notifier) -> Self {
        Self { rates, notifier }
    }

    pub async fn set_rate(&self, input: SetRateInput) -> Result<PayRate, AppError> {
        if input.per_session_amount <= 0 || input.per_hour_amount <= 0 {
            return Err(AppError::Validation(
                "rate amounts must be positive".to_string(),
            ));
        }

        let rate = self.rates.set_rate(input).await?;

        log::info!(
            "Set rate for staff {}: per_session={} per_hour={} effective {}",
            rate.staff_id,
            rate.per_session_amount,
            rate.per_hour_amount,
            rate.effective_date
        );
        self.notifier.notify(LedgerEvent::RateChanged {
            staff_id: rate.staff_id,
            rate_id: rate.id,
        });

        Ok(rate)
    }

    /// The single currently-effective rate; a missing rate is a hard
    /// precondition failure for any earning computation downstream.
    pub async fn active_rate(&self, staff_id: Uuid) -> Result<PayRate, AppError> {
        self.rates
            .resolve_active_rate(staff_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no active rate for staff {}", staff_id)))
    }

    pub async fn rate_history(&self, staff_id: Uuid) -> Result<Vec<PayRate>, AppError> {
        self.rates.rate_history(staff_id).await
    }
}
