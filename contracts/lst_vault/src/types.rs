use soroban_sdk::{contracttype, Address, BytesN, String, Symbol, Vec};

/// Kind of liquidity venue the vault swaps surplus through.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VenueKind {
    /// x·y = k pool with a 0.30% input fee.
    ConstantProduct,
    /// Anything else; recorded but never swapped through.
    Other(Symbol),
}

/// Bootstrap configuration, stored once in instance storage.
///
/// * `rate_precision`      – fixed-point scale of the exchange rate (1e8 = 1.0).
/// * `min_fee`             – smallest transaction-cost unit; sizes swap
///                           thresholds and the dissolve deduction.
/// * `min_reserve`         – native balance the vault must always keep.
/// * `payout_min_balance`  – balance that must be exceeded before a swap
///                           may complete a deferred registration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    pub native_token: Address,
    pub paired_token: Address,
    pub venue: Address,
    pub venue_kind: VenueKind,
    pub router: Address,
    pub max_balance: u64,
    pub rate_precision: u64,
    pub fee_update_period: u64,
    pub fee_update_max_delta: u32,
    pub upgrade_period: u64,
    pub min_fee: u64,
    pub min_reserve: u64,
    pub payout_min_balance: u64,
    pub registration_allowance: u64,
    pub min_protest: u64,
}

/// A fee-rate change waiting for `applicable_at`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingFeeUpdate {
    pub applicable_at: u64,
    pub platform_fee_bps: u32,
    pub noderunner_fee_bps: u32,
}

/// Staged code upgrade: one SHA-256 hash per code page, in order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingUpgrade {
    pub maturity: u64,
    pub page_hashes: Vec<BytesN<32>>,
}

/// Admin rotation token written by `propose_admin`, consumed by `accept_admin`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingAdminChange {
    pub candidate: Address,
    pub proposed_by: Address,
    pub expires_at: u64,
}

/// The vault's single mutable aggregate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ledger {
    pub staked: u64,
    pub platform_fees: u64,
    pub noderunner_fees: u64,
    pub platform_fee_bps: u32,
    pub noderunner_fee_bps: u32,
    pub pending_fee_update: Option<PendingFeeUpdate>,
    pub pending_upgrade: Option<PendingUpgrade>,
    pub protest_count: u64,
    pub protest_sum: u64,
    pub registration_pending: bool,
    pub pending_admin: Option<PendingAdminChange>,
}

impl Ledger {
    pub fn new(platform_fee_bps: u32, noderunner_fee_bps: u32, registration_pending: bool) -> Self {
        Ledger {
            staked: 0,
            platform_fees: 0,
            noderunner_fees: 0,
            platform_fee_bps,
            noderunner_fee_bps,
            pending_fee_update: None,
            pending_upgrade: None,
            protest_count: 0,
            protest_sum: 0,
            registration_pending,
            pending_admin: None,
        }
    }
}

/// Reserve snapshot reported by a swap venue.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolReserves {
    pub asset_1: Address,
    pub reserve_1: i128,
    pub reserve_2: i128,
}

/// Router-managed inbox for a recipient that cannot hold the paired asset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeliveryChannel {
    pub inbox: Address,
    pub cost: i128,
}

/// Amounts paid out by a redemption.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redemption {
    pub native_amount: u64,
    pub paired_amount: u64,
}

/// Rate plus raw vault balances.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateAndBalances {
    pub rate: u64,
    pub native_balance: u64,
    pub paired_balance: u64,
}

/// Enough to render an index entry for the vault.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultListing {
    pub rate: u64,
    pub native_balance: u64,
    pub paired_balance: u64,
    pub staked: u64,
    pub lst_token: Address,
    pub lst_name: String,
    pub paired_token: Address,
    pub paired_name: String,
    pub paired_symbol: String,
    pub paired_decimals: u32,
    pub swapped: bool,
    pub need_swap: bool,
}
