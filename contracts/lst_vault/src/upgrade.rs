//! Staged, hash-verified, timelocked code upgrades.
//!
//! `queue` records one SHA-256 hash per code page. `apply` accepts the pages
//! only after maturity, with no outstanding protest, and when every page hash
//! matches in order. The installed code hash is the SHA-256 of the
//! concatenated pages. Any failure leaves the staged record untouched.

use soroban_sdk::{Bytes, BytesN, Env, Vec};

use crate::errors::VaultError;
use crate::events;
use crate::types::{Ledger, PendingUpgrade, VaultConfig};

const HASH_LEN: u32 = 32;

/// Stages `hashes` (concatenated 32-byte page hashes). Returns the maturity.
///
/// An empty manifest is refused even though zero is a multiple of 32; no
/// code can be installed from zero pages.
pub fn queue(
    env: &Env,
    config: &VaultConfig,
    ledger: &mut Ledger,
    hashes: Bytes,
) -> Result<u64, VaultError> {
    if hashes.is_empty() || hashes.len() % HASH_LEN != 0 {
        return Err(VaultError::InvalidHashLength);
    }

    let mut page_hashes = Vec::new(env);
    let mut offset = 0;
    while offset < hashes.len() {
        let chunk = hashes.slice(offset..offset + HASH_LEN);
        let hash = BytesN::<32>::try_from(chunk).map_err(|_| VaultError::InvalidHashLength)?;
        page_hashes.push_back(hash);
        offset += HASH_LEN;
    }

    let maturity = env
        .ledger()
        .timestamp()
        .checked_add(config.upgrade_period)
        .ok_or(VaultError::ArithmeticOverflow)?;
    let page_count = page_hashes.len();
    ledger.pending_upgrade = Some(PendingUpgrade {
        maturity,
        page_hashes,
    });

    events::publish_upgrade_queued(env, maturity, page_count);
    Ok(maturity)
}

pub fn cancel(ledger: &mut Ledger) -> Result<(), VaultError> {
    if ledger.pending_upgrade.is_none() {
        return Err(VaultError::NoUpgradeStaged);
    }
    ledger.pending_upgrade = None;
    Ok(())
}

/// Verifies `pages` against the staged manifest, clears it, and returns the
/// code hash to install.
pub fn apply(env: &Env, ledger: &mut Ledger, pages: &Vec<Bytes>) -> Result<BytesN<32>, VaultError> {
    let staged = ledger
        .pending_upgrade
        .as_ref()
        .ok_or(VaultError::NoUpgradeStaged)?;
    if env.ledger().timestamp() < staged.maturity {
        return Err(VaultError::NotMatured);
    }
    if ledger.protest_sum != 0 {
        return Err(VaultError::ProtestOutstanding);
    }
    if pages.len() != staged.page_hashes.len() {
        return Err(VaultError::PageCountMismatch);
    }

    let mut code = Bytes::new(env);
    for (index, page) in pages.iter().enumerate() {
        let expected = staged
            .page_hashes
            .get(index as u32)
            .ok_or(VaultError::PageCountMismatch)?;
        if env.crypto().sha256(&page).to_bytes() != expected {
            return Err(VaultError::PageHashMismatch);
        }
        events::publish_page_validated(env, index as u32);
        code.append(&page);
    }

    let code_hash = env.crypto().sha256(&code).to_bytes();
    ledger.pending_upgrade = None;
    Ok(code_hash)
}
