use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The durable running balance for a staff member, one-to-one with the
/// staff id. `balance = total_earned - total_withdrawn` at every
/// observable point, and never negative.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub staff_id: Uuid,
    pub balance: i64,         // cents
    pub total_earned: i64,    // cents, lifetime
    pub total_withdrawn: i64, // cents, lifetime
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Zeroed summary for a staff member whose wallet has not been
    /// created yet (wallets are created lazily on first credit).
    pub fn empty(staff_id: Uuid) -> Self {
        let now = Utc::now();
        Wallet {
            staff_id,
            balance: 0,
            total_earned: 0,
            total_withdrawn: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
