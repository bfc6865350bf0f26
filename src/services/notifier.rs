use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::database::models::WithdrawalStatus;

/// Events the notification collaborator is told about.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    RateChanged {
        staff_id: Uuid,
        rate_id: Uuid,
    },
    EarningCredited {
        staff_id: Uuid,
        earning_id: Uuid,
        amount: i64,
    },
    WithdrawalDecided {
        staff_id: Uuid,
        withdrawal_id: Uuid,
        status: WithdrawalStatus,
    },
}

/// Delivery seam for the external notification dispatcher. The shipped
/// implementation writes to the application log; a push/email dispatcher
/// plugs in behind the same trait.
pub trait EventSink: Send + Sync {
    fn dispatch(&self, event: &LedgerEvent) -> anyhow::Result<()>;
}

pub struct LogSink;

impl EventSink for LogSink {
    fn dispatch(&self, event: &LedgerEvent) -> anyhow::Result<()> {
        log::info!("ledger event: {}", serde_json::to_string(event)?);
        Ok(())
    }
}

#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn EventSink>,
}

impl Notifier {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    pub fn log_only() -> Self {
        Self::new(Arc::new(LogSink))
    }

    /// Best-effort dispatch after commit. A failing sink is logged and
    /// never fails the ledger operation that produced the event.
    pub fn notify(&self, event: LedgerEvent) {
        if let Err(err) = self.sink.dispatch(&event) {
            log::warn!("Failed to dispatch ledger event: {}", err);
        }
    }
}
