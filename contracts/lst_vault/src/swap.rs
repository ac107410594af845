use common::{after_venue_fee, bps_share, constant_product_out};
use soroban_sdk::{contractclient, Address, Env};

use crate::delivery;
use crate::errors::VaultError;
use crate::events;
use crate::rate;
use crate::types::{Ledger, PoolReserves, VaultConfig, VenueKind};

/// Surplus must exceed this many `min_fee` units before a swap is due.
const SWAP_THRESHOLD_FEES: u64 = 1_000;
/// `min_fee` units held back from each swap to cover its execution.
const SWAP_EXECUTION_FEES: u64 = 3;

/// Liquidity venue the vault converts native surplus through.
///
/// `swap` is called after the vault has already transferred `amount_in`
/// native to the venue; the venue must pay at least `min_out` paired asset
/// to `to`.
#[contractclient(name = "SwapVenueClient")]
pub trait SwapVenue {
    fn reserves(env: Env) -> Option<PoolReserves>;
    fn swap(env: Env, to: Address, amount_in: i128, min_out: i128) -> i128;
}

pub fn need_swap(env: &Env, config: &VaultConfig, ledger: &Ledger) -> Result<bool, VaultError> {
    let balance = rate::native_balance(env, config)?;

    // a deferred registration is only completed once payouts are safe
    if ledger.registration_pending && balance <= config.payout_min_balance {
        return Ok(false);
    }
    if ledger.staked == 0 {
        return Ok(false);
    }
    let threshold = config
        .min_fee
        .checked_mul(SWAP_THRESHOLD_FEES)
        .ok_or(VaultError::ArithmeticOverflow)?;
    Ok(rate::surplus(config, ledger, balance)? > threshold)
}

/// Splits surplus into fee pools and swaps the rest. Returns whether a swap
/// was executed; a zero quote skips the venue call but still commits fees.
pub fn swap(env: &Env, config: &VaultConfig, ledger: &mut Ledger) -> Result<bool, VaultError> {
    if config.venue_kind != VenueKind::ConstantProduct {
        return Err(VaultError::SwapVenueUnsupported);
    }

    let balance = rate::native_balance(env, config)?;
    let surplus = rate::surplus(config, ledger, balance)?;
    let reward = surplus.saturating_sub(config.min_fee.saturating_mul(SWAP_EXECUTION_FEES));

    let platform_cut = bps_share(reward, ledger.platform_fee_bps);
    let noderunner_cut = bps_share(reward, ledger.noderunner_fee_bps);
    ledger.platform_fees = ledger
        .platform_fees
        .checked_add(platform_cut)
        .ok_or(VaultError::ArithmeticOverflow)?;
    ledger.noderunner_fees = ledger
        .noderunner_fees
        .checked_add(noderunner_cut)
        .ok_or(VaultError::ArithmeticOverflow)?;
    let swap_amount = reward
        .saturating_sub(platform_cut)
        .saturating_sub(noderunner_cut);

    if ledger.registration_pending {
        ledger.registration_pending = false;
        events::publish_registered(env, config.paired_token.clone());
    }

    let price = get_price(env, config, swap_amount)?;
    if price == 0 {
        // nothing leaves the vault, but the fee pools moved
        events::publish_swap(env, 0, 0, rate::paired_balance(env, config)?);
        return Ok(false);
    }
    execute(env, config, swap_amount, price)?;
    Ok(true)
}

/// Paired-asset output the venue would give for `amount` native.
pub fn get_price(env: &Env, config: &VaultConfig, amount: u64) -> Result<u64, VaultError> {
    let venue = SwapVenueClient::new(env, &config.venue);
    let reserves = match venue.try_reserves() {
        Ok(Ok(Some(reserves))) => reserves,
        _ => return Err(VaultError::LiquidityDataUnavailable),
    };
    if reserves.reserve_1 < 0 || reserves.reserve_2 < 0 {
        return Err(VaultError::LiquidityDataUnavailable);
    }

    let (reserve_in, reserve_out) = if reserves.asset_1 == config.native_token {
        (reserves.reserve_1, reserves.reserve_2)
    } else {
        (reserves.reserve_2, reserves.reserve_1)
    };

    let out = constant_product_out(
        reserve_in as u128,
        reserve_out as u128,
        after_venue_fee(amount) as u128,
    )
    .ok_or(VaultError::ArithmeticOverflow)?;
    u64::try_from(out).map_err(|_| VaultError::ArithmeticOverflow)
}

fn execute(env: &Env, config: &VaultConfig, amount: u64, price: u64) -> Result<(), VaultError> {
    let vault = env.current_contract_address();
    let before = rate::paired_balance(env, config)?;

    delivery::send(env, &config.native_token, &config.venue, amount)?;
    let venue = SwapVenueClient::new(env, &config.venue);
    match venue.try_swap(&vault, &i128::from(amount), &i128::from(price)) {
        Ok(Ok(_)) => {}
        _ => return Err(VaultError::SwapFailed),
    }

    let after = rate::paired_balance(env, config)?;
    let received = after.saturating_sub(before);
    if received < price {
        return Err(VaultError::SwapFailed);
    }

    events::publish_swap(env, amount, received, after);
    Ok(())
}
