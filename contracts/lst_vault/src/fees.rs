//! Time-locked, delta-bounded fee-rate updates and fee-pool withdrawals.
//!
//! Decreases (or no-ops) take effect immediately. Any increase waits
//! `fee_update_period` seconds. Only one update is ever pending; queueing a
//! new one overwrites it.

use common::{abs_diff, BPS_DENOMINATOR};
use soroban_sdk::{symbol_short, Address, Env};

use crate::delivery;
use crate::errors::VaultError;
use crate::events;
use crate::types::{Ledger, PendingFeeUpdate, VaultConfig};

/// Commits the pending update once `applicable_at` is reached.
pub fn apply_due(env: &Env, ledger: &mut Ledger) -> bool {
    match ledger.pending_fee_update.clone() {
        Some(update) if env.ledger().timestamp() >= update.applicable_at => {
            commit(env, ledger, update.platform_fee_bps, update.noderunner_fee_bps);
            ledger.pending_fee_update = None;
            true
        }
        _ => false,
    }
}

fn commit(env: &Env, ledger: &mut Ledger, platform_fee_bps: u32, noderunner_fee_bps: u32) {
    ledger.platform_fee_bps = platform_fee_bps;
    ledger.noderunner_fee_bps = noderunner_fee_bps;
    events::publish_fee_update(env, platform_fee_bps, noderunner_fee_bps);
}

/// Rejects rate pairs above 100% combined.
pub fn validate_rates(platform_fee_bps: u32, noderunner_fee_bps: u32) -> Result<(), VaultError> {
    if platform_fee_bps as u64 + noderunner_fee_bps as u64 > BPS_DENOMINATOR {
        return Err(VaultError::FeeRateTooHigh);
    }
    Ok(())
}

/// Returns 0 when applied immediately, otherwise the applicability timestamp.
pub fn queue_update(
    env: &Env,
    config: &VaultConfig,
    ledger: &mut Ledger,
    platform_fee_bps: u32,
    noderunner_fee_bps: u32,
) -> Result<u64, VaultError> {
    validate_rates(platform_fee_bps, noderunner_fee_bps)?;
    if abs_diff(ledger.platform_fee_bps, platform_fee_bps) > config.fee_update_max_delta
        || abs_diff(ledger.noderunner_fee_bps, noderunner_fee_bps) > config.fee_update_max_delta
    {
        return Err(VaultError::FeeDeltaExceeded);
    }

    if platform_fee_bps <= ledger.platform_fee_bps && noderunner_fee_bps <= ledger.noderunner_fee_bps {
        commit(env, ledger, platform_fee_bps, noderunner_fee_bps);
        return Ok(0);
    }

    let applicable_at = env
        .ledger()
        .timestamp()
        .checked_add(config.fee_update_period)
        .ok_or(VaultError::ArithmeticOverflow)?;
    ledger.pending_fee_update = Some(PendingFeeUpdate {
        applicable_at,
        platform_fee_bps,
        noderunner_fee_bps,
    });
    events::publish_fee_update_queued(env, applicable_at, platform_fee_bps, noderunner_fee_bps);
    Ok(applicable_at)
}

pub fn reset_update(env: &Env, ledger: &mut Ledger) -> Result<(), VaultError> {
    if ledger.pending_fee_update.is_none() {
        return Err(VaultError::NoPendingUpdate);
    }
    ledger.pending_fee_update = None;
    events::publish_fee_update_reset(env);
    Ok(())
}

// ── Withdrawals ──────────────────────────────────────────────────────────────

fn checked_withdrawal(pool: u64, amount: u64) -> Result<u64, VaultError> {
    if amount == 0 {
        return Err(VaultError::ZeroAmount);
    }
    pool.checked_sub(amount)
        .ok_or(VaultError::FeeWithdrawalExceeded)
}

pub fn withdraw_platform(
    env: &Env,
    config: &VaultConfig,
    ledger: &mut Ledger,
    recipient: &Address,
    amount: u64,
) -> Result<(), VaultError> {
    let remaining = checked_withdrawal(ledger.platform_fees, amount)?;
    delivery::send(env, &config.native_token, recipient, amount)?;
    ledger.platform_fees = remaining;
    events::publish_fees_withdrawn(env, symbol_short!("PLATFORM"), recipient.clone(), amount, remaining);
    Ok(())
}

/// Node-runner fees always go to the registered node runner.
pub fn withdraw_node_runner(
    env: &Env,
    config: &VaultConfig,
    ledger: &mut Ledger,
    node_runner: &Address,
    amount: u64,
) -> Result<(), VaultError> {
    let remaining = checked_withdrawal(ledger.noderunner_fees, amount)?;
    delivery::send(env, &config.native_token, node_runner, amount)?;
    ledger.noderunner_fees = remaining;
    events::publish_fees_withdrawn(env, symbol_short!("NODE"), node_runner.clone(), amount, remaining);
    Ok(())
}
