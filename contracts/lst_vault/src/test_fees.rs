extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address,
};

use crate::testutils::{setup, FEE_UPDATE_PERIOD, NODERUNNER_BPS, PLATFORM_BPS};
use crate::{PendingFeeUpdate, VaultError};

// ── Rate updates ─────────────────────────────────────────────────────────────

#[test]
fn test_fee_decrease_applies_immediately() {
    let t = setup();

    let applicable_at = t.client.queue_update_fees(&t.fee_admin, &50, &50);
    assert_eq!(applicable_at, 0);

    let ledger = t.client.get_ledger();
    assert_eq!(ledger.platform_fee_bps, 50);
    assert_eq!(ledger.noderunner_fee_bps, 50);
    assert_eq!(ledger.pending_fee_update, None);
}

#[test]
fn test_fee_increase_waits_one_period() {
    let t = setup();
    t.env.ledger().set_timestamp(1_000);

    let applicable_at = t.client.queue_update_fees(&t.fee_admin, &300, &NODERUNNER_BPS);
    assert_eq!(applicable_at, 1_000 + FEE_UPDATE_PERIOD);

    let ledger = t.client.get_ledger();
    assert_eq!(ledger.platform_fee_bps, PLATFORM_BPS);
    assert_eq!(
        ledger.pending_fee_update,
        Some(PendingFeeUpdate {
            applicable_at,
            platform_fee_bps: 300,
            noderunner_fee_bps: NODERUNNER_BPS,
        })
    );

    // one second early: settlement leaves it pending
    t.env.ledger().set_timestamp(applicable_at - 1);
    t.client.query_rate();
    assert_eq!(t.client.get_ledger().platform_fee_bps, PLATFORM_BPS);

    t.env.ledger().set_timestamp(applicable_at);
    t.client.query_rate();
    let ledger = t.client.get_ledger();
    assert_eq!(ledger.platform_fee_bps, 300);
    assert_eq!(ledger.pending_fee_update, None);
}

#[test]
fn test_pending_increase_applies_before_next_swap() {
    let t = setup();
    t.new_staker(10_000_000, 0);
    let applicable_at = t.client.queue_update_fees(&t.fee_admin, &400, &NODERUNNER_BPS);

    t.env.ledger().set_timestamp(applicable_at);
    t.add_rewards(1_000_000);
    t.client.query_rate();

    // 999_700 * 400 / 10_000
    assert_eq!(t.client.get_ledger().platform_fees, 39_988);
}

#[test]
fn test_fee_delta_is_bounded() {
    let t = setup();

    // max delta is 250 bps per side
    match t.client.try_queue_update_fees(&t.fee_admin, &451, &NODERUNNER_BPS) {
        Err(Ok(e)) => assert_eq!(e, VaultError::FeeDeltaExceeded),
        _ => unreachable!("Expected FeeDeltaExceeded error"),
    }
    match t.client.try_queue_update_fees(&t.fee_admin, &PLATFORM_BPS, &351) {
        Err(Ok(e)) => assert_eq!(e, VaultError::FeeDeltaExceeded),
        _ => unreachable!("Expected FeeDeltaExceeded error"),
    }

    t.client.queue_update_fees(&t.fee_admin, &450, &350);
    assert!(t.client.get_ledger().pending_fee_update.is_some());
}

#[test]
fn test_new_update_overwrites_pending() {
    let t = setup();

    t.client.queue_update_fees(&t.fee_admin, &300, &NODERUNNER_BPS);
    t.env.ledger().set_timestamp(500);
    let applicable_at = t.client.queue_update_fees(&t.fee_admin, &250, &150);

    let pending = t.client.get_ledger().pending_fee_update.unwrap();
    assert_eq!(pending.applicable_at, applicable_at);
    assert_eq!(pending.platform_fee_bps, 250);
    assert_eq!(pending.noderunner_fee_bps, 150);
}

#[test]
fn test_decrease_leaves_pending_increase_in_place() {
    let t = setup();

    t.client.queue_update_fees(&t.fee_admin, &300, &NODERUNNER_BPS);
    t.client.queue_update_fees(&t.fee_admin, &100, &50);

    let ledger = t.client.get_ledger();
    assert_eq!(ledger.platform_fee_bps, 100);
    assert_eq!(ledger.noderunner_fee_bps, 50);
    assert!(ledger.pending_fee_update.is_some());
}

#[test]
fn test_reset_pending_update() {
    let t = setup();

    match t.client.try_reset_update_fees(&t.fee_admin) {
        Err(Ok(e)) => assert_eq!(e, VaultError::NoPendingUpdate),
        _ => unreachable!("Expected NoPendingUpdate error"),
    }

    let applicable_at = t.client.queue_update_fees(&t.fee_admin, &300, &NODERUNNER_BPS);
    t.client.reset_update_fees(&t.fee_admin);

    t.env.ledger().set_timestamp(applicable_at);
    t.client.query_rate();
    let ledger = t.client.get_ledger();
    assert_eq!(ledger.platform_fee_bps, PLATFORM_BPS);
    assert_eq!(ledger.pending_fee_update, None);
}

#[test]
fn test_fee_updates_require_fee_admin() {
    let t = setup();

    match t.client.try_queue_update_fees(&t.admin, &100, &50) {
        Err(Ok(e)) => assert_eq!(e, VaultError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match t.client.try_queue_update_fees(&t.node_runner, &100, &50) {
        Err(Ok(e)) => assert_eq!(e, VaultError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Withdrawals ──────────────────────────────────────────────────────────────

fn accrued() -> crate::testutils::TestVault {
    let t = setup();
    t.new_staker(10_000_000, 0);
    t.add_rewards(1_000_000);
    t.client.query_rate();
    t
}

#[test]
fn test_withdraw_platform_fees() {
    let t = accrued();

    t.client.withdraw_platform_fees(&t.fee_admin, &10_000);
    assert_eq!(t.native_balance(&t.fee_admin), 10_000);
    assert_eq!(t.client.get_ledger().platform_fees, 9_994);

    match t.client.try_withdraw_platform_fees(&t.fee_admin, &9_995) {
        Err(Ok(e)) => assert_eq!(e, VaultError::FeeWithdrawalExceeded),
        _ => unreachable!("Expected FeeWithdrawalExceeded error"),
    }
    match t.client.try_withdraw_platform_fees(&t.fee_admin, &0) {
        Err(Ok(e)) => assert_eq!(e, VaultError::ZeroAmount),
        _ => unreachable!("Expected ZeroAmount error"),
    }

    t.client.withdraw_platform_fees(&t.fee_admin, &9_994);
    assert_eq!(t.client.get_ledger().platform_fees, 0);
}

#[test]
fn test_node_runner_fees_go_to_node_runner() {
    let t = accrued();

    // fee admin triggers, node runner receives
    t.client.withdraw_node_runner_fees(&t.fee_admin, &4_000);
    assert_eq!(t.native_balance(&t.node_runner), 4_000);
    assert_eq!(t.native_balance(&t.fee_admin), 0);

    t.client.withdraw_node_runner_fees(&t.node_runner, &5_997);
    assert_eq!(t.native_balance(&t.node_runner), 9_997);
    assert_eq!(t.client.get_ledger().noderunner_fees, 0);

    let outsider = Address::generate(&t.env);
    match t.client.try_withdraw_node_runner_fees(&outsider, &1) {
        Err(Ok(e)) => assert_eq!(e, VaultError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_withdrawals_do_not_disturb_rate() {
    let t = accrued();
    let rate = t.client.query_rate();

    t.client.withdraw_platform_fees(&t.fee_admin, &19_994);
    t.client.withdraw_node_runner_fees(&t.node_runner, &9_997);

    assert!(!t.client.need_swap());
    assert_eq!(t.client.query_rate(), rate);
}
