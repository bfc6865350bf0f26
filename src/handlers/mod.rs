pub mod attendance;
pub mod earnings;
pub mod rates;
pub mod shared;
pub mod wallets;
pub mod withdrawals;
