use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");

// ── Role Enum ────────────────────────────────────────────────────────────────

/// Governance roles of a vault. Each role has exactly one holder.
///
/// - `Admin`      – Stages code upgrades and rotates the admin seat.
/// - `FeeAdmin`   – Manages fee rates, fee withdrawals, and protest clean-up.
/// - `NodeRunner` – Operates the validator and receives node-runner fees.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 1,
    FeeAdmin = 2,
    NodeRunner = 3,
}

fn role_key(role: Role) -> (Symbol, Role) {
    (ROLE_PREFIX, role)
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Assigns `holder` to `role`, replacing any previous holder.
/// Only callable internally; callers verify authorization beforehand.
pub fn set_holder(env: &Env, role: Role, holder: &Address) {
    env.storage().instance().set(&role_key(role), holder);
}

/// Returns the current holder of `role`, if assigned.
pub fn holder(env: &Env, role: Role) -> Option<Address> {
    env.storage().instance().get(&role_key(role))
}

/// Returns `true` if `caller` currently holds `role`.
pub fn holds(env: &Env, role: Role, caller: &Address) -> bool {
    match holder(env, role) {
        Some(h) => h == *caller,
        None => false,
    }
}

/// Guard: `true` if `caller` holds at least one of `roles`.
pub fn holds_any(env: &Env, roles: &[Role], caller: &Address) -> bool {
    roles.iter().any(|role| holds(env, *role, caller))
}
