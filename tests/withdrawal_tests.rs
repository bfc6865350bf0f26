use pretty_assertions::assert_eq;
use uuid::Uuid;

use paylinkr::database::models::{Decision, WithdrawalInput, WithdrawalStatus};
use paylinkr::AppError;

mod common;

fn withdrawal(staff_id: Uuid, amount: i64) -> WithdrawalInput {
    WithdrawalInput {
        staff_id,
        amount,
        bank_details: "IBAN 123".to_string(),
    }
}

#[tokio::test]
async fn request_rejects_malformed_input() {
    let app = common::TestApp::new().await.unwrap();
    let staff_id = Uuid::new_v4();

    let err = app
        .state
        .withdrawals
        .request_withdrawal(withdrawal(staff_id, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = app
        .state
        .withdrawals
        .request_withdrawal(WithdrawalInput {
            staff_id,
            amount: 50,
            bank_details: "  ".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn approval_debits_wallet() {
    let app = common::TestApp::new().await.unwrap();
    let staff_id = Uuid::new_v4();
    common::fund_wallet(&app, staff_id, 100).await;

    let request = app
        .state
        .withdrawals
        .request_withdrawal(withdrawal(staff_id, 60))
        .await
        .unwrap();
    assert_eq!(request.status, WithdrawalStatus::Pending);

    let decided = app
        .state
        .withdrawals
        .decide_withdrawal(request.id, Decision::Approve, Uuid::new_v4(), None)
        .await
        .unwrap();
    assert_eq!(decided.status, WithdrawalStatus::Approved);
    assert!(decided.decided_at.is_some());

    let wallet = app.state.ledger.wallet_summary(staff_id).await.unwrap();
    assert_eq!(wallet.balance, 40);
    assert_eq!(wallet.total_withdrawn, 60);
}

#[tokio::test]
async fn over_balance_request_is_recorded_but_rejected_at_approval() {
    let app = common::TestApp::new().await.unwrap();
    let staff_id = Uuid::new_v4();
    common::fund_wallet(&app, staff_id, 200).await;

    // The advisory check at request time does not block the request.
    let request = app
        .state
        .withdrawals
        .request_withdrawal(withdrawal(staff_id, 250))
        .await
        .unwrap();
    assert_eq!(request.status, WithdrawalStatus::Pending);

    let err = app
        .state
        .withdrawals
        .decide_withdrawal(request.id, Decision::Approve, Uuid::new_v4(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InsufficientBalance {
            requested: 250,
            available: 200
        }
    ));

    // Not left pending: rejected with the reason on record.
    let request = app
        .state
        .withdrawals
        .get_withdrawal(request.id)
        .await
        .unwrap();
    assert_eq!(request.status, WithdrawalStatus::Rejected);
    assert!(request
        .decision_notes
        .unwrap()
        .contains("insufficient balance"));

    let wallet = app.state.ledger.wallet_summary(staff_id).await.unwrap();
    assert_eq!(wallet.balance, 200);
    assert_eq!(wallet.total_withdrawn, 0);
}

#[tokio::test]
async fn concurrent_approvals_never_both_succeed() {
    let app = common::TestApp::new().await.unwrap();
    let staff_id = Uuid::new_v4();
    common::fund_wallet(&app, staff_id, 100).await;

    let first = app
        .state
        .withdrawals
        .request_withdrawal(withdrawal(staff_id, 60))
        .await
        .unwrap();
    let second = app
        .state
        .withdrawals
        .request_withdrawal(withdrawal(staff_id, 60))
        .await
        .unwrap();

    let service_a = app.state.withdrawals.clone();
    let service_b = app.state.withdrawals.clone();
    let first_id = first.id;
    let second_id = second.id;

    let task_a = tokio::spawn(async move {
        service_a
            .decide_withdrawal(first_id, Decision::Approve, Uuid::new_v4(), None)
            .await
    });
    let task_b = tokio::spawn(async move {
        service_b
            .decide_withdrawal(second_id, Decision::Approve, Uuid::new_v4(), None)
            .await
    });

    let result_a = task_a.await.unwrap();
    let result_b = task_b.await.unwrap();

    // Exactly one side saw the funds; the other got InsufficientBalance.
    assert_eq!(result_a.is_ok() as u8 + result_b.is_ok() as u8, 1);

    let first = app.state.withdrawals.get_withdrawal(first_id).await.unwrap();
    let second = app
        .state
        .withdrawals
        .get_withdrawal(second_id)
        .await
        .unwrap();
    let statuses = [first.status, second.status];
    assert!(statuses.contains(&WithdrawalStatus::Approved));
    assert!(statuses.contains(&WithdrawalStatus::Rejected));

    let wallet = app.state.ledger.wallet_summary(staff_id).await.unwrap();
    assert_eq!(wallet.balance, 40);
    assert_eq!(wallet.total_withdrawn, 60);
}

#[tokio::test]
async fn deciding_twice_fails_with_already_decided() {
    let app = common::TestApp::new().await.unwrap();
    let staff_id = Uuid::new_v4();
    common::fund_wallet(&app, staff_id, 100).await;

    let request = app
        .state
        .withdrawals
        .request_withdrawal(withdrawal(staff_id, 60))
        .await
        .unwrap();
    app.state
        .withdrawals
        .decide_withdrawal(request.id, Decision::Approve, Uuid::new_v4(), None)
        .await
        .unwrap();

    let err = app
        .state
        .withdrawals
        .decide_withdrawal(request.id, Decision::Approve, Uuid::new_v4(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyDecided(id) if id == request.id));

    // The duplicate decision did not double-debit.
    let wallet = app.state.ledger.wallet_summary(staff_id).await.unwrap();
    assert_eq!(wallet.balance, 40);
}

#[tokio::test]
async fn completion_confirms_transfer_without_touching_balance() {
    let app = common::TestApp::new().await.unwrap();
    let staff_id = Uuid::new_v4();
    common::fund_wallet(&app, staff_id, 100).await;

    let request = app
        .state
        .withdrawals
        .request_withdrawal(withdrawal(staff_id, 60))
        .await
        .unwrap();

    // Pending requests cannot complete.
    let err = app
        .state
        .withdrawals
        .complete_withdrawal(request.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::PreconditionFailed(_)));

    app.state
        .withdrawals
        .decide_withdrawal(request.id, Decision::Approve, Uuid::new_v4(), None)
        .await
        .unwrap();
    let completed = app
        .state
        .withdrawals
        .complete_withdrawal(request.id)
        .await
        .unwrap();
    assert_eq!(completed.status, WithdrawalStatus::Completed);
    assert!(completed.completed_at.is_some());

    let wallet = app.state.ledger.wallet_summary(staff_id).await.unwrap();
    assert_eq!(wallet.balance, 40);
    assert_eq!(wallet.total_withdrawn, 60);
}

#[tokio::test]
async fn rejection_keeps_funds_untouched() {
    let app = common::TestApp::new().await.unwrap();
    let staff_id = Uuid::new_v4();
    common::fund_wallet(&app, staff_id, 100).await;

    let request = app
        .state
        .withdrawals
        .request_withdrawal(withdrawal(staff_id, 60))
        .await
        .unwrap();
    let rejected = app
        .state
        .withdrawals
        .decide_withdrawal(
            request.id,
            Decision::Reject,
            Uuid::new_v4(),
            Some("details unverified".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(rejected.status, WithdrawalStatus::Rejected);
    assert_eq!(rejected.decision_notes.as_deref(), Some("details unverified"));

    let wallet = app.state.ledger.wallet_summary(staff_id).await.unwrap();
    assert_eq!(wallet.balance, 100);
}

#[tokio::test]
async fn listing_scopes_to_staff_and_status() {
    let app = common::TestApp::new().await.unwrap();
    let staff_a = Uuid::new_v4();
    let staff_b = Uuid::new_v4();
    common::fund_wallet(&app, staff_a, 300).await;
    common::fund_wallet(&app, staff_b, 300).await;

    app.state
        .withdrawals
        .request_withdrawal(withdrawal(staff_a, 50))
        .await
        .unwrap();
    let decided = app
        .state
        .withdrawals
        .request_withdrawal(withdrawal(staff_a, 70))
        .await
        .unwrap();
    app.state
        .withdrawals
        .request_withdrawal(withdrawal(staff_b, 90))
        .await
        .unwrap();

    app.state
        .withdrawals
        .decide_withdrawal(decided.id, Decision::Approve, Uuid::new_v4(), None)
        .await
        .unwrap();

    let pending_a = app
        .state
        .withdrawals
        .list_withdrawals(Some(staff_a), Some(WithdrawalStatus::Pending))
        .await
        .unwrap();
    assert_eq!(pending_a.len(), 1);
    assert_eq!(pending_a[0].amount, 50);

    let all_a = app
        .state
        .withdrawals
        .list_withdrawals(Some(staff_a), None)
        .await
        .unwrap();
    assert_eq!(all_a.len(), 2);
}
