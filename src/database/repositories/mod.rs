pub mod attendance;
pub mod earning;
pub mod rate;
pub mod wallet;
pub mod withdrawal;

pub use attendance::AttendanceRepository;
pub use earning::EarningRepository;
pub use rate::RateRepository;
pub use wallet::WalletRepository;
pub use withdrawal::WithdrawalRepository;
