pub mod approval;
pub mod calculator;
pub mod ledger;
pub mod notifier;
pub mod rates;
pub mod withdrawal;

pub use approval::{ApprovalService, DecisionOutcome};
pub use ledger::LedgerService;
pub use notifier::{EventSink, LedgerEvent, LogSink, Notifier};
pub use rates::RateService;
pub use withdrawal::WithdrawalService;
