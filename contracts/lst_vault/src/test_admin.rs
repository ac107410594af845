extern crate std;

use common::Role;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Bytes,
};

use crate::admin::ADMIN_CHANGE_WINDOW;
use crate::testutils::setup;
use crate::{VaultError, MAX_BALANCE_CEILING};

// ── Admin handshake ──────────────────────────────────────────────────────────

#[test]
fn test_admin_transfer_handshake() {
    let t = setup();
    let candidate = Address::generate(&t.env);
    t.env.ledger().set_timestamp(1_000);

    let expires_at = t.client.propose_admin(&t.admin, &candidate);
    assert_eq!(expires_at, 1_000 + ADMIN_CHANGE_WINDOW);

    let pending = t.client.get_pending_admin().unwrap();
    assert_eq!(pending.candidate, candidate);
    assert_eq!(pending.proposed_by, t.admin);

    // proposing alone changes nothing
    assert_eq!(t.client.get_role(&Role::Admin), Some(t.admin.clone()));

    t.client.accept_admin(&candidate);
    assert_eq!(t.client.get_role(&Role::Admin), Some(candidate.clone()));
    assert_eq!(t.client.get_pending_admin(), None);

    // the previous admin lost its powers
    let hashes = Bytes::from_array(&t.env, &[0u8; 32]);
    match t.client.try_queue_upgrade(&t.admin, &hashes) {
        Err(Ok(e)) => assert_eq!(e, VaultError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_accept_by_wrong_candidate_fails() {
    let t = setup();
    let candidate = Address::generate(&t.env);
    let intruder = Address::generate(&t.env);
    t.client.propose_admin(&t.admin, &candidate);

    match t.client.try_accept_admin(&intruder) {
        Err(Ok(e)) => assert_eq!(e, VaultError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_accept_after_window_fails() {
    let t = setup();
    let candidate = Address::generate(&t.env);
    let expires_at = t.client.propose_admin(&t.admin, &candidate);

    t.env.ledger().set_timestamp(expires_at + 1);
    match t.client.try_accept_admin(&candidate) {
        Err(Ok(e)) => assert_eq!(e, VaultError::AdminChangeExpired),
        _ => unreachable!("Expected AdminChangeExpired error"),
    }

    // a fresh proposal restarts the window
    t.client.propose_admin(&t.admin, &candidate);
    t.client.accept_admin(&candidate);
    assert_eq!(t.client.get_role(&Role::Admin), Some(candidate));
}

#[test]
fn test_cancel_admin_transfer() {
    let t = setup();
    let candidate = Address::generate(&t.env);

    match t.client.try_cancel_admin_transfer(&t.admin) {
        Err(Ok(e)) => assert_eq!(e, VaultError::NoPendingAdmin),
        _ => unreachable!("Expected NoPendingAdmin error"),
    }

    t.client.propose_admin(&t.admin, &candidate);
    t.client.cancel_admin_transfer(&t.admin);

    match t.client.try_accept_admin(&candidate) {
        Err(Ok(e)) => assert_eq!(e, VaultError::NoPendingAdmin),
        _ => unreachable!("Expected NoPendingAdmin error"),
    }
}

#[test]
fn test_only_admin_proposes() {
    let t = setup();
    let candidate = Address::generate(&t.env);

    match t.client.try_propose_admin(&t.fee_admin, &candidate) {
        Err(Ok(e)) => assert_eq!(e, VaultError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Role rotation ────────────────────────────────────────────────────────────

#[test]
fn test_set_fee_admin() {
    let t = setup();
    let next = Address::generate(&t.env);
    let last = Address::generate(&t.env);

    t.client.set_fee_admin(&t.admin, &next);
    assert_eq!(t.client.get_role(&Role::FeeAdmin), Some(next.clone()));

    // the fee admin may hand the role on itself
    t.client.set_fee_admin(&next, &last);
    assert_eq!(t.client.get_role(&Role::FeeAdmin), Some(last));

    match t.client.try_set_fee_admin(&t.node_runner, &next) {
        Err(Ok(e)) => assert_eq!(e, VaultError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_set_node_runner_requires_withdrawn_fees() {
    let t = setup();
    t.new_staker(10_000_000, 0);
    t.add_rewards(1_000_000);
    let next = Address::generate(&t.env);

    // settlement inside accrues 9_997 node-runner fees first
    match t.client.try_set_node_runner(&t.fee_admin, &next) {
        Err(Ok(e)) => assert_eq!(e, VaultError::NodeRunnerFeesOutstanding),
        _ => unreachable!("Expected NodeRunnerFeesOutstanding error"),
    }

    t.client.query_rate();
    t.client.withdraw_node_runner_fees(&t.node_runner, &9_997);
    t.client.set_node_runner(&t.node_runner, &next);
    assert_eq!(t.client.get_role(&Role::NodeRunner), Some(next));

    match t.client.try_set_node_runner(&t.admin, &t.node_runner) {
        Err(Ok(e)) => assert_eq!(e, VaultError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Limits ───────────────────────────────────────────────────────────────────

#[test]
fn test_update_max_balance() {
    let t = setup();

    t.client.update_max_balance(&t.fee_admin, &2_000_000);
    assert_eq!(t.config().max_balance, 2_000_000);

    let user = Address::generate(&t.env);
    t.fund_native(&user, 1_000_001);
    match t.client.try_mint(&user, &1_000_001, &0) {
        Err(Ok(e)) => assert_eq!(e, VaultError::BalanceCapExceeded),
        _ => unreachable!("Expected BalanceCapExceeded error"),
    }

    match t.client.try_update_max_balance(&t.fee_admin, &0) {
        Err(Ok(e)) => assert_eq!(e, VaultError::InvalidConfig),
        _ => unreachable!("Expected InvalidConfig error"),
    }
    match t.client.try_update_max_balance(&t.fee_admin, &(MAX_BALANCE_CEILING + 1)) {
        Err(Ok(e)) => assert_eq!(e, VaultError::BalanceCapExceeded),
        _ => unreachable!("Expected BalanceCapExceeded error"),
    }
    match t.client.try_update_max_balance(&t.admin, &3_000_000) {
        Err(Ok(e)) => assert_eq!(e, VaultError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    t.client.update_max_balance(&t.fee_admin, &MAX_BALANCE_CEILING);
    assert_eq!(t.config().max_balance, MAX_BALANCE_CEILING);
}

#[test]
fn test_close_vault_requires_admin() {
    let t = setup();

    match t.client.try_close_vault(&t.fee_admin, &t.fee_admin) {
        Err(Ok(e)) => assert_eq!(e, VaultError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert!(t.client.is_ready());
}
