use crate::database::models::{AttendanceRecord, CalculationMethod, NewEarning, PayRate};

/// Sessions longer than this are paid hourly; everything else (including
/// sessions with a missing check-in or check-out) earns the flat
/// per-session figure.
pub const PER_HOUR_THRESHOLD_MINUTES: i64 = 120;

/// Compute the earning for an approved attendance record against the
/// staff member's resolved rate. Pure policy: the result is fixed at
/// creation and never recomputed.
pub fn compute(attendance: &AttendanceRecord, rate: &PayRate) -> NewEarning {
    let duration_minutes = match (attendance.check_in, attendance.check_out) {
        (Some(check_in), Some(check_out)) => Some((check_out - check_in).num_minutes()),
        _ => None,
    };

    match duration_minutes {
        Some(minutes) if minutes > PER_HOUR_THRESHOLD_MINUTES => NewEarning {
            staff_id: attendance.staff_id,
            attendance_id: attendance.id,
            amount: minutes * rate.per_hour_amount / 60,
            calculation_method: CalculationMethod::PerHour,
            session_duration_minutes: Some(minutes),
            rate_applied: rate.per_hour_amount,
        },
        _ => NewEarning {
            staff_id: attendance.staff_id,
            attendance_id: attendance.id,
            amount: rate.per_session_amount,
            calculation_method: CalculationMethod::PerSession,
            session_duration_minutes: duration_minutes,
            rate_applied: rate.per_session_amount,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::ApprovalStatus;
    use chrono::{Duration, NaiveDate, Utc};
    use uuid::Uuid;

    fn attendance(duration_minutes: Option<i64>) -> AttendanceRecord {
        let check_in = Utc::now();
        AttendanceRecord {
            id: Uuid::new_v4(),
            staff_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            session_type: "tutoring".to_string(),
            check_in: duration_minutes.map(|_| check_in),
            check_out: duration_minutes.map(|m| check_in + Duration::minutes(m)),
            approval_status: ApprovalStatus::Pending,
            decided_by: None,
            decided_at: None,
            created_at: check_in,
        }
    }

    fn rate(per_session: i64, per_hour: i64) -> PayRate {
        PayRate {
            id: Uuid::new_v4(),
            staff_id: Uuid::new_v4(),
            per_session_amount: per_session,
            per_hour_amount: per_hour,
            effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn short_session_pays_flat_rate() {
        let earning = compute(&attendance(Some(90)), &rate(50, 30));
        assert_eq!(earning.calculation_method, CalculationMethod::PerSession);
        assert_eq!(earning.amount, 50);
        assert_eq!(earning.session_duration_minutes, Some(90));
        assert_eq!(earning.rate_applied, 50);
    }

    #[test]
    fn long_session_pays_hourly() {
        let earning = compute(&attendance(Some(150)), &rate(50, 30));
        assert_eq!(earning.calculation_method, CalculationMethod::PerHour);
        assert_eq!(earning.amount, 75);
        assert_eq!(earning.session_duration_minutes, Some(150));
        assert_eq!(earning.rate_applied, 30);
    }

    #[test]
    fn threshold_itself_pays_flat_rate() {
        let earning = compute(&attendance(Some(PER_HOUR_THRESHOLD_MINUTES)), &rate(50, 30));
        assert_eq!(earning.calculation_method, CalculationMethod::PerSession);
        assert_eq!(earning.amount, 50);
    }

    #[test]
    fn missing_timestamps_pay_flat_rate() {
        let earning = compute(&attendance(None), &rate(50, 30));
        assert_eq!(earning.calculation_method, CalculationMethod::PerSession);
        assert_eq!(earning.amount, 50);
        assert_eq!(earning.session_duration_minutes, None);
    }
}
