use common::mul_div_floor;
use soroban_sdk::{token, token::StellarAssetClient, Address, Env};

use crate::delivery;
use crate::errors::VaultError;
use crate::events;
use crate::rate::{self, Settled};
use crate::types::{Ledger, Redemption, VaultConfig};

/// Smallest native deposit accepted by `mint`.
pub const MIN_PAYMENT: u64 = 1_000_000;

/// Deposits native (plus paired asset at the current rate) and issues LST 1:1.
pub fn mint(
    env: &Env,
    config: &VaultConfig,
    ledger: &mut Ledger,
    lst_token: &Address,
    minter: &Address,
    native_amount: u64,
    paired_amount: u64,
) -> Result<u64, VaultError> {
    if native_amount < MIN_PAYMENT {
        return Err(VaultError::BelowMinimumPayment);
    }

    let settled = rate::settle(env, config, ledger)?;

    let balance = rate::native_balance(env, config)?;
    match balance.checked_add(native_amount) {
        Some(total) if total <= config.max_balance => {}
        _ => return Err(VaultError::BalanceCapExceeded),
    }

    let rate = rate::rate(env, config, ledger, &settled)?;
    events::publish_rate(env, rate);

    let paired_required = if rate > 0 {
        mul_div_floor(native_amount, rate, config.rate_precision)
            .ok_or(VaultError::ArithmeticOverflow)?
    } else {
        0
    };
    if paired_amount < paired_required {
        return Err(VaultError::InsufficientPairedAsset);
    }

    // at a zero rate the paired leg is not taken
    let paired_received = if rate > 0 { paired_amount } else { 0 };
    delivery::pull(env, &config.native_token, minter, native_amount);
    if paired_received > 0 {
        delivery::pull(env, &config.paired_token, minter, paired_received);
    }

    ledger.staked = ledger
        .staked
        .checked_add(native_amount)
        .ok_or(VaultError::ArithmeticOverflow)?;
    StellarAssetClient::new(env, lst_token).mint(minter, &i128::from(native_amount));

    events::publish_mint(
        env,
        minter.clone(),
        native_amount,
        paired_required,
        paired_received,
        rate::paired_balance(env, config)?,
    );
    Ok(native_amount)
}

/// Burns `lst_amount` of the holder's LST and pays out native plus paired share.
pub fn redeem(
    env: &Env,
    config: &VaultConfig,
    ledger: &mut Ledger,
    lst_token: &Address,
    holder: &Address,
    lst_amount: u64,
) -> Result<Redemption, VaultError> {
    if lst_amount == 0 {
        return Err(VaultError::ZeroAmount);
    }
    if lst_amount > ledger.staked {
        return Err(VaultError::InsufficientStake);
    }

    let settled = rate::settle(env, config, ledger)?;
    token::Client::new(env, lst_token).burn(holder, &i128::from(lst_amount));
    internal_redeem(env, config, ledger, &settled, holder, lst_amount, 0)
}

/// Shared payout for user redemptions (`fee == 0`) and protest dissolution.
///
/// The caller has already burned `amount` LST.
pub fn internal_redeem(
    env: &Env,
    config: &VaultConfig,
    ledger: &mut Ledger,
    settled: &Settled,
    recipient: &Address,
    amount: u64,
    fee: u64,
) -> Result<Redemption, VaultError> {
    if amount == 0 {
        return Err(VaultError::ZeroAmount);
    }
    let remaining = ledger
        .staked
        .checked_sub(amount)
        .ok_or(VaultError::InsufficientStake)?;

    let rate = rate::rate(env, config, ledger, settled)?;
    events::publish_rate(env, rate);

    let redemption = if rate > 0 {
        let paired_amount = mul_div_floor(amount, rate, config.rate_precision)
            .ok_or(VaultError::ArithmeticOverflow)?;
        let native_amount = delivery::pay_out(env, config, recipient, amount, paired_amount, fee)?;
        Redemption {
            native_amount,
            paired_amount,
        }
    } else {
        let native_amount = amount.checked_sub(fee).ok_or(VaultError::AmountBelowFees)?;
        delivery::send(env, &config.native_token, recipient, native_amount)?;
        Redemption {
            native_amount,
            paired_amount: 0,
        }
    };

    ledger.staked = remaining;

    events::publish_redeem(
        env,
        recipient.clone(),
        amount,
        redemption.native_amount,
        redemption.paired_amount,
        rate::paired_balance(env, config)?,
    );
    Ok(redemption)
}
