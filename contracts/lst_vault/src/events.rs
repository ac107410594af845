#![allow(deprecated)] // events().publish migration tracked separately

use common::Role;
use soroban_sdk::{symbol_short, Address, BytesN, Env, Symbol};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the vault is configured.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub fee_admin: Address,
    pub node_runner: Address,
    pub platform_fee_bps: u32,
    pub noderunner_fee_bps: u32,
    pub timestamp: u64,
}

/// Fired when the LST token is attached and the vault starts accepting mints.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReadyEvent {
    pub lst_token: Address,
    pub timestamp: u64,
}

/// Exchange rate observed by a mint or redemption.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateEvent {
    pub rate: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapEvent {
    pub native_in: u64,
    pub paired_out: u64,
    pub paired_balance: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintEvent {
    pub minter: Address,
    pub native_amount: u64,
    pub paired_required: u64,
    pub paired_received: u64,
    pub paired_balance: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedeemEvent {
    pub holder: Address,
    pub lst_amount: u64,
    pub native_amount: u64,
    pub paired_amount: u64,
    pub paired_balance: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtestEvent {
    pub holder: Address,
    pub amount: u64,
    pub protest_sum: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnprotestEvent {
    pub holder: Address,
    pub amount: u64,
    pub user_initiated: bool,
}

/// Fee rates that just took effect.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeUpdateEvent {
    pub platform_fee_bps: u32,
    pub noderunner_fee_bps: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeUpdateQueuedEvent {
    pub applicable_at: u64,
    pub platform_fee_bps: u32,
    pub noderunner_fee_bps: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesWithdrawnEvent {
    pub recipient: Address,
    pub amount: u64,
    pub remaining: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradeQueuedEvent {
    pub maturity: u64,
    pub page_count: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradeAppliedEvent {
    pub code_hash: BytesN<32>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferEvent {
    pub current_admin: Address,
    pub candidate: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleSetEvent {
    pub role: Role,
    pub holder: Address,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultClosedEvent {
    pub recipient: Address,
    pub native_swept: u64,
    pub paired_swept: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    fee_admin: Address,
    node_runner: Address,
    platform_fee_bps: u32,
    noderunner_fee_bps: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            fee_admin,
            node_runner,
            platform_fee_bps,
            noderunner_fee_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_ready(env: &Env, lst_token: Address) {
    env.events().publish(
        (symbol_short!("READY"),),
        ReadyEvent {
            lst_token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rate(env: &Env, rate: u64) {
    env.events()
        .publish((symbol_short!("RATE"),), RateEvent { rate });
}

pub fn publish_swap(env: &Env, native_in: u64, paired_out: u64, paired_balance: u64) {
    env.events().publish(
        (symbol_short!("SWAP"),),
        SwapEvent {
            native_in,
            paired_out,
            paired_balance,
        },
    );
}

pub fn publish_registered(env: &Env, paired_token: Address) {
    env.events()
        .publish((symbol_short!("REGISTER"),), paired_token);
}

pub fn publish_mint(
    env: &Env,
    minter: Address,
    native_amount: u64,
    paired_required: u64,
    paired_received: u64,
    paired_balance: u64,
) {
    env.events().publish(
        (symbol_short!("MINT"), minter.clone()),
        MintEvent {
            minter,
            native_amount,
            paired_required,
            paired_received,
            paired_balance,
        },
    );
}

pub fn publish_redeem(
    env: &Env,
    holder: Address,
    lst_amount: u64,
    native_amount: u64,
    paired_amount: u64,
    paired_balance: u64,
) {
    env.events().publish(
        (symbol_short!("REDEEM"), holder.clone()),
        RedeemEvent {
            holder,
            lst_amount,
            native_amount,
            paired_amount,
            paired_balance,
        },
    );
}

pub fn publish_protest(env: &Env, holder: Address, amount: u64, protest_sum: u64) {
    env.events().publish(
        (symbol_short!("PROTEST"), holder.clone()),
        ProtestEvent {
            holder,
            amount,
            protest_sum,
        },
    );
}

pub fn publish_unprotest(env: &Env, holder: Address, amount: u64, user_initiated: bool) {
    env.events().publish(
        (symbol_short!("UNPROTST"), holder.clone()),
        UnprotestEvent {
            holder,
            amount,
            user_initiated,
        },
    );
}

pub fn publish_fee_update(env: &Env, platform_fee_bps: u32, noderunner_fee_bps: u32) {
    env.events().publish(
        (symbol_short!("FEE_UPD"),),
        FeeUpdateEvent {
            platform_fee_bps,
            noderunner_fee_bps,
        },
    );
}

pub fn publish_fee_update_queued(
    env: &Env,
    applicable_at: u64,
    platform_fee_bps: u32,
    noderunner_fee_bps: u32,
) {
    env.events().publish(
        (symbol_short!("FEE_QUE"),),
        FeeUpdateQueuedEvent {
            applicable_at,
            platform_fee_bps,
            noderunner_fee_bps,
        },
    );
}

pub fn publish_fee_update_reset(env: &Env) {
    env.events()
        .publish((symbol_short!("FEE_RST"),), env.ledger().timestamp());
}

pub fn publish_fees_withdrawn(
    env: &Env,
    pool: Symbol,
    recipient: Address,
    amount: u64,
    remaining: u64,
) {
    env.events().publish(
        (symbol_short!("FEE_WDRW"), pool),
        FeesWithdrawnEvent {
            recipient,
            amount,
            remaining,
        },
    );
}

pub fn publish_upgrade_queued(env: &Env, maturity: u64, page_count: u32) {
    env.events().publish(
        (symbol_short!("UPG_QUE"),),
        UpgradeQueuedEvent {
            maturity,
            page_count,
        },
    );
}

pub fn publish_upgrade_cancelled(env: &Env, caller: Address) {
    env.events()
        .publish((symbol_short!("UPG_CNCL"),), caller);
}

pub fn publish_page_validated(env: &Env, index: u32) {
    env.events()
        .publish((symbol_short!("UPG_PAGE"),), index);
}

pub fn publish_upgrade_applied(env: &Env, code_hash: BytesN<32>) {
    env.events().publish(
        (symbol_short!("UPG_APLD"),),
        UpgradeAppliedEvent {
            code_hash,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, candidate: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"),),
        AdminTransferEvent {
            current_admin,
            candidate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"),),
        AdminTransferEvent {
            current_admin: old_admin,
            candidate: new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, current_admin: Address, candidate: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"),),
        AdminTransferEvent {
            current_admin,
            candidate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_set(env: &Env, role: Role, holder: Address) {
    env.events()
        .publish((symbol_short!("ROLE_SET"),), RoleSetEvent { role, holder });
}

pub fn publish_max_balance(env: &Env, max_balance: u64) {
    env.events()
        .publish((symbol_short!("MAX_BAL"),), max_balance);
}

pub fn publish_closed(env: &Env, recipient: Address, native_swept: u64, paired_swept: u64) {
    env.events().publish(
        (symbol_short!("CLOSED"),),
        VaultClosedEvent {
            recipient,
            native_swept,
            paired_swept,
        },
    );
}
