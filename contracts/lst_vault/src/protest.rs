//! Holder vetoes against a staged upgrade.
//!
//! A protest locks LST in the vault. While any protest is outstanding the
//! staged upgrade cannot be applied. `protest_sum` / `protest_count` on the
//! ledger always mirror the per-holder records.

use soroban_sdk::{token, Address, Env};

use crate::delivery;
use crate::errors::VaultError;
use crate::events;
use crate::rate;
use crate::staking;
use crate::storage;
use crate::types::{Ledger, Redemption, VaultConfig};

pub fn protest(
    env: &Env,
    config: &VaultConfig,
    ledger: &mut Ledger,
    lst_token: &Address,
    holder: &Address,
    amount: u64,
) -> Result<(), VaultError> {
    if ledger.pending_upgrade.is_none() {
        return Err(VaultError::NoUpgradeStaged);
    }
    if amount < config.min_protest {
        return Err(VaultError::BelowMinimumProtest);
    }

    delivery::pull(env, lst_token, holder, amount);

    let recorded = match storage::protest_amount(env, holder) {
        Some(previous) => previous
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?,
        None => {
            ledger.protest_count = ledger
                .protest_count
                .checked_add(1)
                .ok_or(VaultError::ArithmeticOverflow)?;
            amount
        }
    };
    storage::set_protest_amount(env, holder, recorded);
    ledger.protest_sum = ledger
        .protest_sum
        .checked_add(amount)
        .ok_or(VaultError::ArithmeticOverflow)?;

    events::publish_protest(env, holder.clone(), amount, ledger.protest_sum);
    Ok(())
}

/// Returns the holder's full protesting stake. Fails as a whole if the
/// holder cannot receive the LST back.
pub fn unprotest(
    env: &Env,
    ledger: &mut Ledger,
    lst_token: &Address,
    holder: &Address,
    user_initiated: bool,
) -> Result<u64, VaultError> {
    let amount = storage::protest_amount(env, holder).ok_or(VaultError::NotProtesting)?;
    delivery::send(env, lst_token, holder, amount)?;
    release(env, ledger, holder, amount)?;
    events::publish_unprotest(env, holder.clone(), amount, user_initiated);
    Ok(amount)
}

/// Governance clean-up; only allowed when no upgrade is staged.
pub fn admin_unprotest(
    env: &Env,
    ledger: &mut Ledger,
    lst_token: &Address,
    holder: &Address,
) -> Result<u64, VaultError> {
    if ledger.pending_upgrade.is_some() {
        return Err(VaultError::UpgradeInProgress);
    }
    unprotest(env, ledger, lst_token, holder, false)
}

/// Redeems a holder's protesting stake once the staged upgrade has matured.
pub fn dissolve(
    env: &Env,
    config: &VaultConfig,
    ledger: &mut Ledger,
    lst_token: &Address,
    holder: &Address,
) -> Result<Redemption, VaultError> {
    let maturity = ledger
        .pending_upgrade
        .as_ref()
        .map(|upgrade| upgrade.maturity)
        .ok_or(VaultError::NoUpgradeStaged)?;
    if env.ledger().timestamp() < maturity {
        return Err(VaultError::NotMatured);
    }
    let amount = storage::protest_amount(env, holder).ok_or(VaultError::NotProtesting)?;

    let settled = rate::settle(env, config, ledger)?;
    token::Client::new(env, lst_token).burn(&env.current_contract_address(), &i128::from(amount));
    let redemption =
        staking::internal_redeem(env, config, ledger, &settled, holder, amount, config.min_fee)?;

    release(env, ledger, holder, amount)?;
    Ok(redemption)
}

fn release(env: &Env, ledger: &mut Ledger, holder: &Address, amount: u64) -> Result<(), VaultError> {
    ledger.protest_count = ledger
        .protest_count
        .checked_sub(1)
        .ok_or(VaultError::ArithmeticOverflow)?;
    ledger.protest_sum = ledger
        .protest_sum
        .checked_sub(amount)
        .ok_or(VaultError::ArithmeticOverflow)?;
    storage::remove_protest(env, holder);
    Ok(())
}
