//! Exchange-rate engine.
//!
//! Every rate read goes through [`settle`] first: it applies a due fee update
//! and performs a due surplus swap, then hands back a [`Settled`] token.
//! [`rate`] only accepts that token, so reading a rate without settling does
//! not compile. The token also pins the ledger sequence it was minted in and
//! is re-checked at read time.

use common::mul_div_floor;
use soroban_sdk::{token, Address, Env};

use crate::errors::VaultError;
use crate::fees;
use crate::swap;
use crate::types::{Ledger, VaultConfig};

/// Proof that settlement ran in the current invocation.
///
/// Not `Clone` and not a contract type, so it cannot outlive the call that
/// produced it.
#[derive(Debug)]
pub struct Settled {
    sequence: u32,
    swapped: bool,
}

impl Settled {
    /// Whether settlement performed a swap.
    pub fn swapped(&self) -> bool {
        self.swapped
    }
}

/// Applies any due fee update, then swaps surplus if a swap is due.
pub fn settle(env: &Env, config: &VaultConfig, ledger: &mut Ledger) -> Result<Settled, VaultError> {
    fees::apply_due(env, ledger);

    let swapped = if swap::need_swap(env, config, ledger)? {
        swap::swap(env, config, ledger)?
    } else {
        false
    };

    Ok(Settled {
        sequence: env.ledger().sequence(),
        swapped,
    })
}

/// `floor(rate_precision * paired_balance / staked)`, or 0 when nothing is staked.
pub fn rate(
    env: &Env,
    config: &VaultConfig,
    ledger: &Ledger,
    settled: &Settled,
) -> Result<u64, VaultError> {
    if settled.sequence != env.ledger().sequence() {
        return Err(VaultError::SettlementNotPerformed);
    }
    if ledger.staked == 0 {
        return Ok(0);
    }
    let paired = paired_balance(env, config)?;
    mul_div_floor(config.rate_precision, paired, ledger.staked).ok_or(VaultError::ArithmeticOverflow)
}

// ── Balances ─────────────────────────────────────────────────────────────────

pub fn balance_of(env: &Env, token: &Address) -> Result<u64, VaultError> {
    let raw = token::Client::new(env, token).balance(&env.current_contract_address());
    u64::try_from(raw).map_err(|_| VaultError::ArithmeticOverflow)
}

pub fn native_balance(env: &Env, config: &VaultConfig) -> Result<u64, VaultError> {
    balance_of(env, &config.native_token)
}

pub fn paired_balance(env: &Env, config: &VaultConfig) -> Result<u64, VaultError> {
    balance_of(env, &config.paired_token)
}

/// Operating reserve, plus the registration allowance while registration is deferred.
pub fn minimum_reserve(config: &VaultConfig, ledger: &Ledger) -> Result<u64, VaultError> {
    if !ledger.registration_pending {
        return Ok(config.min_reserve);
    }
    config
        .min_reserve
        .checked_add(config.registration_allowance)
        .and_then(|v| v.checked_add(config.min_fee))
        .ok_or(VaultError::ArithmeticOverflow)
}

/// Native balance the vault would hold with no unswapped rewards.
pub fn expected_balance(config: &VaultConfig, ledger: &Ledger) -> Result<u64, VaultError> {
    ledger
        .staked
        .checked_add(ledger.platform_fees)
        .and_then(|v| v.checked_add(ledger.noderunner_fees))
        .and_then(|v| v.checked_add(minimum_reserve(config, ledger).ok()?))
        .ok_or(VaultError::ArithmeticOverflow)
}

/// Native balance above `expected_balance`, zero when at or below it.
pub fn surplus(config: &VaultConfig, ledger: &Ledger, actual: u64) -> Result<u64, VaultError> {
    Ok(actual.saturating_sub(expected_balance(config, ledger)?))
}
