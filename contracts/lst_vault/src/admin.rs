use common::{roles, Role};
use soroban_sdk::{Address, Env};

use crate::errors::VaultError;
use crate::events;
use crate::types::{Ledger, PendingAdminChange};

/// Seconds a proposed admin has to accept.
pub const ADMIN_CHANGE_WINDOW: u64 = 3_600;

/// Records a handshake token naming `candidate`, overwriting any earlier one.
pub fn propose(
    env: &Env,
    ledger: &mut Ledger,
    current_admin: &Address,
    candidate: &Address,
) -> Result<u64, VaultError> {
    let expires_at = env
        .ledger()
        .timestamp()
        .checked_add(ADMIN_CHANGE_WINDOW)
        .ok_or(VaultError::ArithmeticOverflow)?;
    ledger.pending_admin = Some(PendingAdminChange {
        candidate: candidate.clone(),
        proposed_by: current_admin.clone(),
        expires_at,
    });
    events::publish_admin_transfer_proposed(env, current_admin.clone(), candidate.clone());
    Ok(expires_at)
}

/// Completes the handshake. The token must name `candidate`, its proposer
/// must still be admin, and it must not have expired.
pub fn accept(env: &Env, ledger: &mut Ledger, candidate: &Address) -> Result<(), VaultError> {
    let pending = ledger
        .pending_admin
        .clone()
        .ok_or(VaultError::NoPendingAdmin)?;
    if pending.candidate != *candidate {
        return Err(VaultError::Unauthorized);
    }
    if !roles::holds(env, Role::Admin, &pending.proposed_by) {
        return Err(VaultError::Unauthorized);
    }
    if env.ledger().timestamp() > pending.expires_at {
        return Err(VaultError::AdminChangeExpired);
    }

    roles::set_holder(env, Role::Admin, candidate);
    ledger.pending_admin = None;
    events::publish_admin_transfer_accepted(env, pending.proposed_by, candidate.clone());
    Ok(())
}

pub fn cancel(env: &Env, ledger: &mut Ledger, current_admin: &Address) -> Result<(), VaultError> {
    let pending = ledger
        .pending_admin
        .take()
        .ok_or(VaultError::NoPendingAdmin)?;
    events::publish_admin_transfer_cancelled(env, current_admin.clone(), pending.candidate);
    Ok(())
}
