extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    vec, Address, Bytes, Env,
};

use crate::testutils::{setup, UPGRADE_PERIOD};
use crate::{storage, upgrade, VaultError};

fn page(env: &Env, fill: u8, len: usize) -> Bytes {
    let mut page = Bytes::new(env);
    for _ in 0..len {
        page.push_back(fill);
    }
    page
}

fn manifest(env: &Env, pages: &[&Bytes]) -> Bytes {
    let mut hashes = Bytes::new(env);
    for page in pages {
        hashes.append(&Bytes::from(env.crypto().sha256(page).to_bytes()));
    }
    hashes
}

// ── Queue / cancel ───────────────────────────────────────────────────────────

#[test]
fn test_queue_upgrade_sets_maturity() {
    let t = setup();
    t.env.ledger().set_timestamp(10_000);

    let hashes = manifest(&t.env, &[&page(&t.env, 1, 64), &page(&t.env, 2, 16)]);
    let maturity = t.client.queue_upgrade(&t.admin, &hashes);
    assert_eq!(maturity, 10_000 + UPGRADE_PERIOD);

    let staged = t.client.get_ledger().pending_upgrade.unwrap();
    assert_eq!(staged.maturity, maturity);
    assert_eq!(staged.page_hashes.len(), 2);
}

#[test]
fn test_queue_upgrade_rejects_bad_hash_blob() {
    let t = setup();

    match t.client.try_queue_upgrade(&t.admin, &page(&t.env, 9, 33)) {
        Err(Ok(e)) => assert_eq!(e, VaultError::InvalidHashLength),
        _ => unreachable!("Expected InvalidHashLength error"),
    }
    match t.client.try_queue_upgrade(&t.admin, &Bytes::new(&t.env)) {
        Err(Ok(e)) => assert_eq!(e, VaultError::InvalidHashLength),
        _ => unreachable!("Expected InvalidHashLength error"),
    }
    assert_eq!(t.client.get_ledger().pending_upgrade, None);
}

#[test]
fn test_queue_upgrade_requires_admin() {
    let t = setup();
    let hashes = page(&t.env, 0, 32);

    match t.client.try_queue_upgrade(&t.fee_admin, &hashes) {
        Err(Ok(e)) => assert_eq!(e, VaultError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_requeue_replaces_manifest() {
    let t = setup();
    t.client.queue_upgrade(&t.admin, &page(&t.env, 0, 96));

    t.env.ledger().set_timestamp(50);
    t.client.queue_upgrade(&t.admin, &page(&t.env, 0, 32));

    let staged = t.client.get_ledger().pending_upgrade.unwrap();
    assert_eq!(staged.page_hashes.len(), 1);
    assert_eq!(staged.maturity, 50 + UPGRADE_PERIOD);
}

#[test]
fn test_cancel_upgrade() {
    let t = setup();

    match t.client.try_cancel_upgrade(&t.admin) {
        Err(Ok(e)) => assert_eq!(e, VaultError::NoUpgradeStaged),
        _ => unreachable!("Expected NoUpgradeStaged error"),
    }

    t.client.queue_upgrade(&t.admin, &page(&t.env, 0, 32));
    match t.client.try_cancel_upgrade(&t.node_runner) {
        Err(Ok(e)) => assert_eq!(e, VaultError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    // fee admin may cancel as well
    t.client.cancel_upgrade(&t.fee_admin);
    assert_eq!(t.client.get_ledger().pending_upgrade, None);
}

// ── Apply ────────────────────────────────────────────────────────────────────

#[test]
fn test_apply_checks_staging_and_maturity() {
    let t = setup();
    let first = page(&t.env, 1, 48);
    let pages = vec![&t.env, first.clone()];

    match t.client.try_apply_upgrade(&t.admin, &pages) {
        Err(Ok(e)) => assert_eq!(e, VaultError::NoUpgradeStaged),
        _ => unreachable!("Expected NoUpgradeStaged error"),
    }

    t.client.queue_upgrade(&t.admin, &manifest(&t.env, &[&first]));
    t.env.ledger().set_timestamp(UPGRADE_PERIOD - 1);
    match t.client.try_apply_upgrade(&t.admin, &pages) {
        Err(Ok(e)) => assert_eq!(e, VaultError::NotMatured),
        _ => unreachable!("Expected NotMatured error"),
    }
}

#[test]
fn test_apply_blocked_by_protest() {
    let t = setup();
    let holder = t.new_staker(5_000_000, 0);
    let first = page(&t.env, 1, 48);
    t.client.queue_upgrade(&t.admin, &manifest(&t.env, &[&first]));
    t.client.protest(&holder, &1_000_000);

    t.env.ledger().set_timestamp(UPGRADE_PERIOD);
    match t.client.try_apply_upgrade(&t.admin, &vec![&t.env, first]) {
        Err(Ok(e)) => assert_eq!(e, VaultError::ProtestOutstanding),
        _ => unreachable!("Expected ProtestOutstanding error"),
    }
    assert!(t.client.get_ledger().pending_upgrade.is_some());
}

#[test]
fn test_apply_rejects_wrong_pages() {
    let t = setup();
    let first = page(&t.env, 1, 48);
    let second = page(&t.env, 2, 48);
    t.client.queue_upgrade(&t.admin, &manifest(&t.env, &[&first, &second]));
    t.env.ledger().set_timestamp(UPGRADE_PERIOD);

    match t.client.try_apply_upgrade(&t.admin, &vec![&t.env, first.clone()]) {
        Err(Ok(e)) => assert_eq!(e, VaultError::PageCountMismatch),
        _ => unreachable!("Expected PageCountMismatch error"),
    }
    match t.client.try_apply_upgrade(&t.fee_admin, &vec![&t.env, second, first]) {
        Err(Ok(e)) => assert_eq!(e, VaultError::PageHashMismatch),
        _ => unreachable!("Expected PageHashMismatch error"),
    }
    assert!(t.client.get_ledger().pending_upgrade.is_some());

    let outsider = Address::generate(&t.env);
    match t.client.try_apply_upgrade(&outsider, &vec![&t.env]) {
        Err(Ok(e)) => assert_eq!(e, VaultError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_apply_hashes_concatenated_pages() {
    let t = setup();
    let env = &t.env;
    let first = page(env, 1, 40);
    let second = page(env, 2, 24);

    env.as_contract(&t.vault, || {
        let config = storage::load_config(env).unwrap();
        let mut ledger = storage::load_ledger(env).unwrap();

        let maturity =
            upgrade::queue(env, &config, &mut ledger, manifest(env, &[&first, &second])).unwrap();
        env.ledger().set_timestamp(maturity);

        let pages = vec![env, first.clone(), second.clone()];
        let code_hash = upgrade::apply(env, &mut ledger, &pages).unwrap();

        let mut code = first.clone();
        code.append(&second);
        assert_eq!(code_hash, env.crypto().sha256(&code).to_bytes());
        assert_eq!(ledger.pending_upgrade, None);
    });
}
