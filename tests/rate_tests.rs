use pretty_assertions::assert_eq;
use uuid::Uuid;

use paylinkr::database::models::SetRateInput;
use paylinkr::AppError;

mod common;

#[tokio::test]
async fn set_rate_replaces_previous_active_rate() {
    let app = common::TestApp::new().await.unwrap();
    let staff_id = Uuid::new_v4();

    let first = common::seed_rate(&app, staff_id, 50, 30).await;
    let second = common::seed_rate(&app, staff_id, 60, 35).await;

    let active = app.state.rates.active_rate(staff_id).await.unwrap();
    assert_eq!(active.id, second.id);
    assert_eq!(active.per_session_amount, 60);

    let history = app.state.rates.rate_history(staff_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.iter().filter(|r| r.active).count(), 1);
    assert!(history.iter().any(|r| r.id == first.id && !r.active));
}

#[tokio::test]
async fn active_rate_missing_is_not_found() {
    let app = common::TestApp::new().await.unwrap();

    let err = app
        .state
        .rates
        .active_rate(Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn set_rate_rejects_nonpositive_amounts() {
    let app = common::TestApp::new().await.unwrap();

    let err = app
        .state
        .rates
        .set_rate(SetRateInput {
            staff_id: Uuid::new_v4(),
            per_session_amount: 0,
            per_hour_amount: 30,
            effective_date: common::test_date(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn concurrent_set_rate_leaves_exactly_one_active() {
    let app = common::TestApp::new().await.unwrap();
    let staff_id = Uuid::new_v4();

    let rates_a = app.state.rates.clone();
    let rates_b = app.state.rates.clone();

    let task_a = tokio::spawn(async move {
        rates_a
            .set_rate(SetRateInput {
                staff_id,
                per_session_amount: 50,
                per_hour_amount: 30,
                effective_date: common::test_date(),
            })
            .await
    });
    let task_b = tokio::spawn(async move {
        rates_b
            .set_rate(SetRateInput {
                staff_id,
                per_session_amount: 60,
                per_hour_amount: 35,
                effective_date: common::test_date(),
            })
            .await
    });

    task_a.await.unwrap().unwrap();
    task_b.await.unwrap().unwrap();

    let history = app.state.rates.rate_history(staff_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.iter().filter(|r| r.active).count(), 1);
}
