#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lst_vault::{LstVault, LstVaultClient, PoolReserves, VaultConfig, VenueKind};
use soroban_sdk::{
    contract, contractimpl, symbol_short,
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Bytes, Env, Symbol,
};

const RESERVES: Symbol = symbol_short!("RESERVES");
const PAIRED: Symbol = symbol_short!("PAIRED");

/// Constant-product venue that pays the quoted minimum from its own stock.
#[contract]
pub struct PoolStub;

#[contractimpl]
impl PoolStub {
    pub fn configure(env: Env, paired: Address, reserves: PoolReserves) {
        env.storage().instance().set(&PAIRED, &paired);
        env.storage().instance().set(&RESERVES, &reserves);
    }

    pub fn reserves(env: Env) -> Option<PoolReserves> {
        env.storage().instance().get(&RESERVES)
    }

    pub fn swap(env: Env, to: Address, _amount_in: i128, min_out: i128) -> i128 {
        let paired: Address = env.storage().instance().get(&PAIRED).unwrap();
        TokenClient::new(&env, &paired).transfer(&env.current_contract_address(), &to, &min_out);
        min_out
    }
}

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Mint { native: u64, paired: u64 },
    Redeem { amount: u64 },
    Reward { amount: u32 },
    QueueFees { platform: u16, noderunner: u16 },
    QueueUpgrade { hashes: Vec<u8> },
    Protest { amount: u64 },
    Unprotest,
    Dissolve,
    WithdrawFees { amount: u64 },
    Advance { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let issuer = Address::generate(&env);
    let native = env.register_stellar_asset_contract_v2(issuer.clone()).address();
    let paired = env.register_stellar_asset_contract_v2(issuer).address();

    let pool = env.register(PoolStub, ());
    PoolStubClient::new(&env, &pool).configure(
        &paired,
        &PoolReserves {
            asset_1: native.clone(),
            reserve_1: 1_000_000_000_000,
            reserve_2: 2_000_000_000_000,
        },
    );
    StellarAssetClient::new(&env, &paired).mint(&pool, &2_000_000_000_000);

    let vault = env.register(LstVault, ());
    let client = LstVaultClient::new(&env, &vault);
    let admin = Address::generate(&env);
    let fee_admin = Address::generate(&env);

    let config = VaultConfig {
        native_token: native.clone(),
        paired_token: paired.clone(),
        venue: pool,
        venue_kind: VenueKind::ConstantProduct,
        router: Address::generate(&env),
        max_balance: 65_432_100_000_000,
        rate_precision: 100_000_000,
        fee_update_period: 86_400,
        fee_update_max_delta: 250,
        upgrade_period: 604_800,
        min_fee: 100,
        min_reserve: 1_000_000,
        payout_min_balance: 2_000_000,
        registration_allowance: 500_000,
        min_protest: 1_000_000,
    };
    client.initialize(&admin, &fee_admin, &admin, &config, &200, &100, &false);
    let lst = env.register_stellar_asset_contract_v2(vault.clone()).address();
    client.set_lst_token(&admin, &lst);
    StellarAssetClient::new(&env, &native).mint(&vault, &1_000_000);

    let mut users = vec![admin.clone()];
    for _ in 0..3 {
        users.push(Address::generate(&env));
    }
    let mut now = 0u64;

    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Mint { native: n, paired: p } => {
                let n = n % 1_000_000_000_000;
                let p = p % 1_000_000_000_000;
                StellarAssetClient::new(&env, &native).mint(caller, &(n as i128));
                StellarAssetClient::new(&env, &paired).mint(caller, &(p as i128));
                let _ = client.try_mint(caller, &n, &p);
            }
            FuzzAction::Redeem { amount } => {
                let _ = client.try_redeem(caller, &amount);
            }
            FuzzAction::Reward { amount } => {
                StellarAssetClient::new(&env, &native).mint(&vault, &(amount as i128));
            }
            FuzzAction::QueueFees { platform, noderunner } => {
                let _ = client.try_queue_update_fees(&fee_admin, &(platform as u32), &(noderunner as u32));
            }
            FuzzAction::QueueUpgrade { hashes } => {
                let mut blob = Bytes::new(&env);
                for byte in hashes.iter().take(256) {
                    blob.push_back(*byte);
                }
                let _ = client.try_queue_upgrade(&admin, &blob);
            }
            FuzzAction::Protest { amount } => {
                let _ = client.try_protest(caller, &amount);
            }
            FuzzAction::Unprotest => {
                let _ = client.try_unprotest(caller);
            }
            FuzzAction::Dissolve => {
                let _ = client.try_dissolve(&fee_admin, caller);
            }
            FuzzAction::WithdrawFees { amount } => {
                let _ = client.try_withdraw_platform_fees(&fee_admin, &amount);
            }
            FuzzAction::Advance { seconds } => {
                now = now.saturating_add(seconds as u64);
                env.ledger().set_timestamp(now);
            }
        }

        // Bookkeeping must survive every sequence.
        let ledger = client.get_ledger();
        let held: i128 = users
            .iter()
            .map(|u| TokenClient::new(&env, &lst).balance(u))
            .sum();
        let protested = TokenClient::new(&env, &lst).balance(&vault);
        assert_eq!(ledger.staked as i128, held + protested);
        assert_eq!(ledger.protest_sum as i128, protested);
        assert!(ledger.platform_fee_bps + ledger.noderunner_fee_bps <= 10_000);
        let native_held = TokenClient::new(&env, &native).balance(&vault);
        assert!((ledger.platform_fees + ledger.noderunner_fees) as i128 <= native_held);
    }
});
