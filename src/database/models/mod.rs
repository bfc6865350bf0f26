pub(crate) mod macros;

pub mod attendance;
pub mod earning;
pub mod rate;
pub mod wallet;
pub mod withdrawal;

pub use attendance::{ApprovalStatus, AttendanceInput, AttendanceRecord, Decision};
pub use earning::{CalculationMethod, Earning, EarningStatus, NewEarning};
pub use rate::{PayRate, SetRateInput};
pub use wallet::Wallet;
pub use withdrawal::{WithdrawalInput, WithdrawalRequest, WithdrawalStatus};
