#![no_std]

pub mod admin;
pub mod delivery;
pub mod errors;
pub mod events;
pub mod fees;
pub mod protest;
pub mod rate;
pub mod staking;
pub mod storage;
pub mod swap;
pub mod types;
pub mod upgrade;

use common::{roles, Role};
use soroban_sdk::{
    contract, contractimpl, token, token::StellarAssetClient, Address, Bytes, BytesN, Env, Vec,
};

pub use errors::{ErrorCategory, VaultError};
pub use types::{
    DeliveryChannel, Ledger, PendingAdminChange, PendingFeeUpdate, PendingUpgrade, PoolReserves,
    RateAndBalances, Redemption, VaultConfig, VaultListing, VenueKind,
};

/// Hard ceiling for `max_balance`.
pub const MAX_BALANCE_CEILING: u64 = 65_432_100_000_000;

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct LstVault;

#[contractimpl]
impl LstVault {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the vault.
    ///
    /// * `config`             – token, venue, and router addresses plus limits.
    /// * `defer_registration` – hold back the paired-asset registration
    ///                          allowance until the first swap.
    ///
    /// The vault is not ready until `set_lst_token` attaches the LST.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        admin: Address,
        fee_admin: Address,
        node_runner: Address,
        config: VaultConfig,
        platform_fee_bps: u32,
        noderunner_fee_bps: u32,
        defer_registration: bool,
    ) -> Result<(), VaultError> {
        if storage::is_configured(&env) {
            return Err(VaultError::AlreadyConfigured);
        }
        admin.require_auth();

        Self::validate_config(&config)?;
        fees::validate_rates(platform_fee_bps, noderunner_fee_bps)?;

        storage::save_config(&env, &config);
        storage::save_ledger(
            &env,
            &Ledger::new(platform_fee_bps, noderunner_fee_bps, defer_registration),
        );
        roles::set_holder(&env, Role::Admin, &admin);
        roles::set_holder(&env, Role::FeeAdmin, &fee_admin);
        roles::set_holder(&env, Role::NodeRunner, &node_runner);
        storage::extend_instance(&env);

        events::publish_initialized(
            &env,
            admin,
            fee_admin,
            node_runner,
            platform_fee_bps,
            noderunner_fee_bps,
        );
        Ok(())
    }

    /// Attach the LST token. The vault must already be the token's admin.
    pub fn set_lst_token(env: Env, caller: Address, lst_token: Address) -> Result<(), VaultError> {
        Self::require_role(&env, &caller, &[Role::Admin])?;
        if storage::lst_token(&env).is_some() {
            return Err(VaultError::AlreadyConfigured);
        }

        match StellarAssetClient::new(&env, &lst_token).try_admin() {
            Ok(Ok(token_admin)) if token_admin == env.current_contract_address() => {}
            _ => return Err(VaultError::LstNotManaged),
        }

        storage::set_lst_token(&env, &lst_token);
        storage::extend_instance(&env);
        events::publish_ready(&env, lst_token);
        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `native_amount` (plus paired asset at the current rate) and
    /// receive the same amount of LST.
    pub fn mint(
        env: Env,
        minter: Address,
        native_amount: u64,
        paired_amount: u64,
    ) -> Result<u64, VaultError> {
        minter.require_auth();
        let lst_token = Self::require_ready(&env)?;
        let (config, mut ledger) = Self::load(&env)?;

        let minted = staking::mint(
            &env,
            &config,
            &mut ledger,
            &lst_token,
            &minter,
            native_amount,
            paired_amount,
        )?;

        Self::commit(&env, &ledger);
        Ok(minted)
    }

    /// Burn `lst_amount` LST and receive native plus the paired share.
    pub fn redeem(env: Env, holder: Address, lst_amount: u64) -> Result<Redemption, VaultError> {
        holder.require_auth();
        let lst_token = Self::require_ready(&env)?;
        let (config, mut ledger) = Self::load(&env)?;

        let redemption =
            staking::redeem(&env, &config, &mut ledger, &lst_token, &holder, lst_amount)?;

        Self::commit(&env, &ledger);
        Ok(redemption)
    }

    // ── Rate queries (settle first) ─────────────────────────────────────────

    pub fn query_rate(env: Env) -> Result<u64, VaultError> {
        Self::require_ready(&env)?;
        let (config, mut ledger) = Self::load(&env)?;

        let settled = rate::settle(&env, &config, &mut ledger)?;
        let current = rate::rate(&env, &config, &ledger, &settled)?;

        Self::commit(&env, &ledger);
        Ok(current)
    }

    pub fn query_balances(env: Env) -> Result<RateAndBalances, VaultError> {
        Self::require_ready(&env)?;
        let (config, mut ledger) = Self::load(&env)?;

        let settled = rate::settle(&env, &config, &mut ledger)?;
        let result = RateAndBalances {
            rate: rate::rate(&env, &config, &ledger, &settled)?,
            native_balance: rate::native_balance(&env, &config)?,
            paired_balance: rate::paired_balance(&env, &config)?,
        };

        Self::commit(&env, &ledger);
        Ok(result)
    }

    /// Everything an index page needs to list the vault.
    pub fn query_listing(env: Env) -> Result<VaultListing, VaultError> {
        let lst_token = Self::require_ready(&env)?;
        let (config, mut ledger) = Self::load(&env)?;

        let settled = rate::settle(&env, &config, &mut ledger)?;
        let current = rate::rate(&env, &config, &ledger, &settled)?;

        let lst = token::Client::new(&env, &lst_token);
        let paired = token::Client::new(&env, &config.paired_token);
        let listing = VaultListing {
            rate: current,
            native_balance: rate::native_balance(&env, &config)?,
            paired_balance: rate::paired_balance(&env, &config)?,
            staked: ledger.staked,
            lst_token: lst_token.clone(),
            lst_name: lst.name(),
            paired_token: config.paired_token.clone(),
            paired_name: paired.name(),
            paired_symbol: paired.symbol(),
            paired_decimals: paired.decimals(),
            swapped: settled.swapped(),
            need_swap: swap::need_swap(&env, &config, &ledger)?,
        };

        Self::commit(&env, &ledger);
        Ok(listing)
    }

    /// Whether surplus is large enough to swap. Read-only.
    pub fn need_swap(env: Env) -> Result<bool, VaultError> {
        Self::require_ready(&env)?;
        let (config, ledger) = Self::load(&env)?;
        swap::need_swap(&env, &config, &ledger)
    }

    /// Swap now, failing with `NoSwapDue` if surplus is below the threshold.
    pub fn swap_or_fail(env: Env) -> Result<(), VaultError> {
        Self::require_ready(&env)?;
        let (config, mut ledger) = Self::load(&env)?;

        fees::apply_due(&env, &mut ledger);
        if !swap::need_swap(&env, &config, &ledger)? {
            return Err(VaultError::NoSwapDue);
        }
        if !swap::swap(&env, &config, &mut ledger)? {
            return Err(VaultError::SwapFailed);
        }

        Self::commit(&env, &ledger);
        Ok(())
    }

    // ── Fees ────────────────────────────────────────────────────────────────

    /// Decreases apply at once (returns 0); increases wait one update period
    /// (returns the applicability timestamp).
    pub fn queue_update_fees(
        env: Env,
        caller: Address,
        platform_fee_bps: u32,
        noderunner_fee_bps: u32,
    ) -> Result<u64, VaultError> {
        Self::require_role(&env, &caller, &[Role::FeeAdmin])?;
        let (config, mut ledger) = Self::load(&env)?;

        fees::apply_due(&env, &mut ledger);
        let applicable_at = fees::queue_update(
            &env,
            &config,
            &mut ledger,
            platform_fee_bps,
            noderunner_fee_bps,
        )?;

        Self::commit(&env, &ledger);
        Ok(applicable_at)
    }

    pub fn reset_update_fees(env: Env, caller: Address) -> Result<(), VaultError> {
        Self::require_role(&env, &caller, &[Role::FeeAdmin])?;
        let (_, mut ledger) = Self::load(&env)?;

        fees::reset_update(&env, &mut ledger)?;

        Self::commit(&env, &ledger);
        Ok(())
    }

    /// Pay `amount` of platform fees to the fee admin.
    pub fn withdraw_platform_fees(env: Env, caller: Address, amount: u64) -> Result<(), VaultError> {
        Self::require_role(&env, &caller, &[Role::FeeAdmin])?;
        let (config, mut ledger) = Self::load(&env)?;

        fees::withdraw_platform(&env, &config, &mut ledger, &caller, amount)?;

        Self::commit(&env, &ledger);
        Ok(())
    }

    /// Pay `amount` of node-runner fees to the registered node runner.
    pub fn withdraw_node_runner_fees(
        env: Env,
        caller: Address,
        amount: u64,
    ) -> Result<(), VaultError> {
        Self::require_role(&env, &caller, &[Role::FeeAdmin, Role::NodeRunner])?;
        let (config, mut ledger) = Self::load(&env)?;
        let node_runner = roles::holder(&env, Role::NodeRunner).ok_or(VaultError::NotReady)?;

        fees::withdraw_node_runner(&env, &config, &mut ledger, &node_runner, amount)?;

        Self::commit(&env, &ledger);
        Ok(())
    }

    // ── Protests ────────────────────────────────────────────────────────────

    /// Lock `amount` LST against the staged upgrade.
    pub fn protest(env: Env, holder: Address, amount: u64) -> Result<(), VaultError> {
        holder.require_auth();
        let lst_token = Self::require_ready(&env)?;
        let (config, mut ledger) = Self::load(&env)?;

        protest::protest(&env, &config, &mut ledger, &lst_token, &holder, amount)?;

        Self::commit(&env, &ledger);
        Ok(())
    }

    /// Withdraw the caller's entire protest.
    pub fn unprotest(env: Env, holder: Address) -> Result<u64, VaultError> {
        holder.require_auth();
        let lst_token = Self::require_ready(&env)?;
        let (_, mut ledger) = Self::load(&env)?;

        let amount = protest::unprotest(&env, &mut ledger, &lst_token, &holder, true)?;

        Self::commit(&env, &ledger);
        Ok(amount)
    }

    /// Return a holder's protest when no upgrade is staged.
    pub fn admin_unprotest(env: Env, caller: Address, holder: Address) -> Result<u64, VaultError> {
        Self::require_role(&env, &caller, &[Role::FeeAdmin])?;
        let lst_token = Self::require_ready(&env)?;
        let (_, mut ledger) = Self::load(&env)?;

        let amount = protest::admin_unprotest(&env, &mut ledger, &lst_token, &holder)?;

        Self::commit(&env, &ledger);
        Ok(amount)
    }

    /// Redeem a holder's protest after the staged upgrade has matured.
    pub fn dissolve(env: Env, caller: Address, holder: Address) -> Result<Redemption, VaultError> {
        Self::require_role(&env, &caller, &[Role::FeeAdmin])?;
        let lst_token = Self::require_ready(&env)?;
        let (config, mut ledger) = Self::load(&env)?;

        let redemption = protest::dissolve(&env, &config, &mut ledger, &lst_token, &holder)?;

        Self::commit(&env, &ledger);
        Ok(redemption)
    }

    // ── Upgrades ────────────────────────────────────────────────────────────

    /// Stage an upgrade; `hashes` is the concatenation of 32-byte page hashes.
    pub fn queue_upgrade(env: Env, caller: Address, hashes: Bytes) -> Result<u64, VaultError> {
        Self::require_role(&env, &caller, &[Role::Admin])?;
        let (config, mut ledger) = Self::load(&env)?;

        let maturity = upgrade::queue(&env, &config, &mut ledger, hashes)?;

        Self::commit(&env, &ledger);
        Ok(maturity)
    }

    pub fn cancel_upgrade(env: Env, caller: Address) -> Result<(), VaultError> {
        Self::require_role(&env, &caller, &[Role::Admin, Role::FeeAdmin])?;
        let (_, mut ledger) = Self::load(&env)?;

        upgrade::cancel(&mut ledger)?;

        Self::commit(&env, &ledger);
        events::publish_upgrade_cancelled(&env, caller);
        Ok(())
    }

    /// Verify `pages` against the staged hashes and install the new code.
    /// The code must already be uploaded; its hash is returned.
    pub fn apply_upgrade(
        env: Env,
        caller: Address,
        pages: Vec<Bytes>,
    ) -> Result<BytesN<32>, VaultError> {
        Self::require_role(&env, &caller, &[Role::Admin, Role::FeeAdmin])?;
        let (_, mut ledger) = Self::load(&env)?;

        let code_hash = upgrade::apply(&env, &mut ledger, &pages)?;

        Self::commit(&env, &ledger);
        env.deployer()
            .update_current_contract_wasm(code_hash.clone());
        events::publish_upgrade_applied(&env, code_hash.clone());
        Ok(code_hash)
    }

    // ── Governance ──────────────────────────────────────────────────────────

    /// Propose `candidate` as admin; it must accept within the change window.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        candidate: Address,
    ) -> Result<u64, VaultError> {
        Self::require_role(&env, &current_admin, &[Role::Admin])?;
        let (_, mut ledger) = Self::load(&env)?;

        let expires_at = admin::propose(&env, &mut ledger, &current_admin, &candidate)?;

        Self::commit(&env, &ledger);
        Ok(expires_at)
    }

    pub fn accept_admin(env: Env, candidate: Address) -> Result<(), VaultError> {
        candidate.require_auth();
        let (_, mut ledger) = Self::load(&env)?;

        admin::accept(&env, &mut ledger, &candidate)?;

        Self::commit(&env, &ledger);
        Ok(())
    }

    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), VaultError> {
        Self::require_role(&env, &current_admin, &[Role::Admin])?;
        let (_, mut ledger) = Self::load(&env)?;

        admin::cancel(&env, &mut ledger, &current_admin)?;

        Self::commit(&env, &ledger);
        Ok(())
    }

    pub fn set_fee_admin(env: Env, caller: Address, fee_admin: Address) -> Result<(), VaultError> {
        Self::require_role(&env, &caller, &[Role::Admin, Role::FeeAdmin])?;

        roles::set_holder(&env, Role::FeeAdmin, &fee_admin);
        storage::extend_instance(&env);
        events::publish_role_set(&env, Role::FeeAdmin, fee_admin);
        Ok(())
    }

    /// Rotate the node runner. Settles first; accrued node-runner fees must
    /// have been withdrawn to the outgoing runner.
    pub fn set_node_runner(
        env: Env,
        caller: Address,
        node_runner: Address,
    ) -> Result<(), VaultError> {
        Self::require_role(&env, &caller, &[Role::FeeAdmin, Role::NodeRunner])?;
        let (config, mut ledger) = Self::load(&env)?;

        rate::settle(&env, &config, &mut ledger)?;
        if ledger.noderunner_fees != 0 {
            return Err(VaultError::NodeRunnerFeesOutstanding);
        }

        roles::set_holder(&env, Role::NodeRunner, &node_runner);
        Self::commit(&env, &ledger);
        events::publish_role_set(&env, Role::NodeRunner, node_runner);
        Ok(())
    }

    pub fn update_max_balance(env: Env, caller: Address, max_balance: u64) -> Result<(), VaultError> {
        Self::require_role(&env, &caller, &[Role::FeeAdmin])?;
        let (mut config, _) = Self::load(&env)?;

        if max_balance == 0 {
            return Err(VaultError::InvalidConfig);
        }
        if max_balance > MAX_BALANCE_CEILING {
            return Err(VaultError::BalanceCapExceeded);
        }
        config.max_balance = max_balance;

        storage::save_config(&env, &config);
        storage::extend_instance(&env);
        events::publish_max_balance(&env, max_balance);
        Ok(())
    }

    /// Tear the vault down once nothing is staked and both fee pools are
    /// empty. Remaining balances go to `recipient` and the vault stops being
    /// ready.
    pub fn close_vault(env: Env, caller: Address, recipient: Address) -> Result<(), VaultError> {
        Self::require_role(&env, &caller, &[Role::Admin])?;
        let (config, ledger) = Self::load(&env)?;

        if ledger.staked != 0 || ledger.platform_fees != 0 || ledger.noderunner_fees != 0 {
            return Err(VaultError::BalancesOutstanding);
        }

        let native_swept = rate::native_balance(&env, &config)?;
        let paired_swept = rate::paired_balance(&env, &config)?;
        delivery::send(&env, &config.native_token, &recipient, native_swept)?;
        delivery::send(&env, &config.paired_token, &recipient, paired_swept)?;

        storage::clear_lst_token(&env);
        storage::extend_instance(&env);
        events::publish_closed(&env, recipient, native_swept, paired_swept);
        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_ledger(env: Env) -> Result<Ledger, VaultError> {
        storage::load_ledger(&env)
    }

    pub fn get_config(env: Env) -> Result<VaultConfig, VaultError> {
        storage::load_config(&env)
    }

    /// Protesting amount of `holder`, if any.
    pub fn get_protest(env: Env, holder: Address) -> Option<u64> {
        storage::protest_amount(&env, &holder)
    }

    pub fn get_role(env: Env, role: Role) -> Option<Address> {
        roles::holder(&env, role)
    }

    pub fn get_lst_token(env: Env) -> Option<Address> {
        storage::lst_token(&env)
    }

    pub fn get_pending_admin(env: Env) -> Option<PendingAdminChange> {
        storage::load_ledger(&env)
            .ok()
            .and_then(|ledger| ledger.pending_admin)
    }

    pub fn is_ready(env: Env) -> bool {
        storage::is_configured(&env) && storage::lst_token(&env).is_some()
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn load(env: &Env) -> Result<(VaultConfig, Ledger), VaultError> {
        Ok((storage::load_config(env)?, storage::load_ledger(env)?))
    }

    fn commit(env: &Env, ledger: &Ledger) {
        storage::save_ledger(env, ledger);
        storage::extend_instance(env);
    }

    fn require_ready(env: &Env) -> Result<Address, VaultError> {
        storage::lst_token(env).ok_or(VaultError::NotReady)
    }

    /// Authenticates `caller` and checks it holds one of `allowed`.
    fn require_role(env: &Env, caller: &Address, allowed: &[Role]) -> Result<(), VaultError> {
        if !storage::is_configured(env) {
            return Err(VaultError::NotReady);
        }
        caller.require_auth();
        if !roles::holds_any(env, allowed, caller) {
            return Err(VaultError::Unauthorized);
        }
        Ok(())
    }

    fn validate_config(config: &VaultConfig) -> Result<(), VaultError> {
        if config.rate_precision == 0
            || config.max_balance == 0
            || config.max_balance > MAX_BALANCE_CEILING
            || config.native_token == config.paired_token
            || config.fee_update_max_delta as u64 > common::BPS_DENOMINATOR
        {
            return Err(VaultError::InvalidConfig);
        }
        Ok(())
    }
}


#[cfg(test)]
mod test_admin;
#[cfg(test)]
mod test_fees;
#[cfg(test)]
mod test_upgrade;
