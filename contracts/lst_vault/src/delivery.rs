use soroban_sdk::{contractclient, token, Address, Env};

use crate::errors::VaultError;
use crate::types::{DeliveryChannel, VaultConfig};

/// Asset router holding paired asset for recipients that cannot receive it.
///
/// The vault pays `DeliveryChannel::cost` native to the router and moves the
/// asset to `inbox` before calling `deliver`.
#[contractclient(name = "DeliveryRouterClient")]
pub trait DeliveryRouter {
    fn get_or_create_channel(env: Env, recipient: Address, asset: Address) -> DeliveryChannel;
    fn deliver(env: Env, recipient: Address, asset: Address, amount: i128);
}

/// Pulls `amount` of `token` from `from` into the vault.
pub fn pull(env: &Env, token: &Address, from: &Address, amount: u64) {
    token::Client::new(env, token).transfer(from, &env.current_contract_address(), &i128::from(amount));
}

/// Sends `amount` of `token` from the vault; a refused transfer is `TransferFailed`.
pub fn send(env: &Env, token: &Address, to: &Address, amount: u64) -> Result<(), VaultError> {
    if amount == 0 {
        return Ok(());
    }
    let client = token::Client::new(env, token);
    match client.try_transfer(&env.current_contract_address(), to, &i128::from(amount)) {
        Ok(Ok(())) => Ok(()),
        _ => Err(VaultError::TransferFailed),
    }
}

/// Pays a redemption: `paired` directly or through the router, then the
/// native leg net of execution costs. Returns the native amount paid.
///
/// The direct path deducts `2 * fee`. The router path deducts the channel
/// cost plus `fee`, and is refused when `fee` is zero.
pub fn pay_out(
    env: &Env,
    config: &VaultConfig,
    recipient: &Address,
    native: u64,
    paired: u64,
    fee: u64,
) -> Result<u64, VaultError> {
    let direct = paired == 0 || send(env, &config.paired_token, recipient, paired).is_ok();

    let deduction = if direct {
        fee.checked_mul(2).ok_or(VaultError::ArithmeticOverflow)?
    } else {
        if fee == 0 {
            return Err(VaultError::RecipientCannotReceive);
        }
        route(env, config, recipient, paired)?
            .checked_add(fee)
            .ok_or(VaultError::ArithmeticOverflow)?
    };

    let native_out = native
        .checked_sub(deduction)
        .ok_or(VaultError::AmountBelowFees)?;
    send(env, &config.native_token, recipient, native_out)?;
    Ok(native_out)
}

fn route(env: &Env, config: &VaultConfig, recipient: &Address, amount: u64) -> Result<u64, VaultError> {
    let router = DeliveryRouterClient::new(env, &config.router);
    let channel = match router.try_get_or_create_channel(recipient, &config.paired_token) {
        Ok(Ok(channel)) => channel,
        _ => return Err(VaultError::TransferFailed),
    };
    let cost = u64::try_from(channel.cost).map_err(|_| VaultError::TransferFailed)?;

    send(env, &config.native_token, &config.router, cost)?;
    send(env, &config.paired_token, &channel.inbox, amount)?;
    match router.try_deliver(recipient, &config.paired_token, &i128::from(amount)) {
        Ok(Ok(())) => Ok(cost),
        _ => Err(VaultError::TransferFailed),
    }
}
