#![allow(dead_code)]

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

use paylinkr::database::models::{
    AttendanceInput, AttendanceRecord, Decision, Earning, PayRate, SetRateInput,
};
use paylinkr::services::Notifier;
use paylinkr::AppState;

// Test database wrapper: every test gets its own file-backed SQLite
// database in a temp dir, wired through the same AppState composition
// the server uses.
pub struct TestApp {
    pub pool: SqlitePool,
    pub state: AppState,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
        let pool = paylinkr::database::init_database(&database_url).await?;
        let state = AppState::build(pool.clone(), Notifier::log_only());

        Ok(TestApp {
            pool,
            state,
            _temp_dir: temp_dir,
        })
    }
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

pub async fn seed_rate(
    app: &TestApp,
    staff_id: Uuid,
    per_session: i64,
    per_hour: i64,
) -> PayRate {
    app.state
        .rates
        .set_rate(SetRateInput {
            staff_id,
            per_session_amount: per_session,
            per_hour_amount: per_hour,
            effective_date: test_date(),
        })
        .await
        .unwrap()
}

/// Ingest an attendance record, optionally with a checked-in/out session
/// of the given length.
pub async fn seed_attendance(
    app: &TestApp,
    staff_id: Uuid,
    duration_minutes: Option<i64>,
) -> AttendanceRecord {
    let check_in = Utc::now();
    app.state
        .approvals
        .record_attendance(AttendanceInput {
            staff_id,
            date: test_date(),
            session_type: "tutoring".to_string(),
            check_in: duration_minutes.map(|_| check_in),
            check_out: duration_minutes.map(|m| check_in + Duration::minutes(m)),
        })
        .await
        .unwrap()
}

/// Approve an attendance record and return the pending earning it created.
pub async fn approved_earning(
    app: &TestApp,
    staff_id: Uuid,
    duration_minutes: Option<i64>,
) -> Earning {
    let record = seed_attendance(app, staff_id, duration_minutes).await;
    app.state
        .approvals
        .decide_attendance(record.id, Decision::Approve, Uuid::new_v4())
        .await
        .unwrap()
        .earning
        .unwrap()
}

/// Put `amount` into a staff member's wallet via the full earning flow:
/// flat rate of `amount`, one approved attendance, one credit.
pub async fn fund_wallet(app: &TestApp, staff_id: Uuid, amount: i64) {
    seed_rate(app, staff_id, amount, amount).await;
    let earning = approved_earning(app, staff_id, None).await;
    app.state.ledger.credit_earning(earning.id).await.unwrap();
}
