use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::errors::VaultError;
use crate::types::{Ledger, VaultConfig};

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const LEDGER: Symbol = symbol_short!("LEDGER");
const LST_TOKEN: Symbol = symbol_short!("LST_TOK");

// Per-holder persistent storage uses tuple keys: (prefix, holder)
const PROTEST: Symbol = symbol_short!("PROTEST");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// Extends the instance TTL; every state-changing entry point calls this.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Config / Ledger ──────────────────────────────────────────────────────────

pub fn is_configured(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load_config(env: &Env) -> Result<VaultConfig, VaultError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(VaultError::NotReady)
}

pub fn save_config(env: &Env, config: &VaultConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn load_ledger(env: &Env) -> Result<Ledger, VaultError> {
    env.storage()
        .instance()
        .get(&LEDGER)
        .ok_or(VaultError::NotReady)
}

pub fn save_ledger(env: &Env, ledger: &Ledger) {
    env.storage().instance().set(&LEDGER, ledger);
}

// ── LST token ────────────────────────────────────────────────────────────────

/// The LST token address; its presence marks the vault ready.
pub fn lst_token(env: &Env) -> Option<Address> {
    env.storage().instance().get(&LST_TOKEN)
}

pub fn set_lst_token(env: &Env, token: &Address) {
    env.storage().instance().set(&LST_TOKEN, token);
}

pub fn clear_lst_token(env: &Env) {
    env.storage().instance().remove(&LST_TOKEN);
}

// ── Protest records ──────────────────────────────────────────────────────────

fn protest_key(holder: &Address) -> (Symbol, Address) {
    (PROTEST, holder.clone())
}

/// Protesting amount of `holder`; `None` means the holder is not protesting.
pub fn protest_amount(env: &Env, holder: &Address) -> Option<u64> {
    let key = protest_key(holder);
    let amount: Option<u64> = env.storage().persistent().get(&key);
    if amount.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    amount
}

pub fn set_protest_amount(env: &Env, holder: &Address, amount: u64) {
    let key = protest_key(holder);
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn remove_protest(env: &Env, holder: &Address) {
    env.storage().persistent().remove(&protest_key(holder));
}
