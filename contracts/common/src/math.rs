/// Denominator for every basis-point quantity (100% = 10 000 bps).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Input fee charged by constant-product venues, in bps (0.30%).
pub const VENUE_FEE_BPS: u64 = 30;

/// `floor(a * b / d)` computed through a `u128` intermediate.
///
/// Returns `None` when `d == 0` or the quotient does not fit a `u64`.
pub fn mul_div_floor(a: u64, b: u64, d: u64) -> Option<u64> {
    if d == 0 {
        return None;
    }
    let wide = (a as u128) * (b as u128) / (d as u128);
    u64::try_from(wide).ok()
}

/// Share of `amount` at `bps` basis points, rounded down.
pub fn bps_share(amount: u64, bps: u32) -> u64 {
    // bps is capped at 10 000 by callers, so the quotient never exceeds amount.
    mul_div_floor(amount, bps as u64, BPS_DENOMINATOR).unwrap_or(0)
}

/// Absolute difference of two rates.
pub fn abs_diff(a: u32, b: u32) -> u32 {
    if a > b {
        a - b
    } else {
        b - a
    }
}

/// `amount` after the venue's input fee is taken.
pub fn after_venue_fee(amount: u64) -> u64 {
    amount - bps_share(amount, VENUE_FEE_BPS as u32)
}

/// Output of a constant-product swap of `amount_in` (already net of fees).
///
/// One unit is shaved off the output reserve so rounding can never drain the
/// pool. Saturates at zero; `None` only when `reserve_in * reserve_out`
/// overflows.
pub fn constant_product_out(reserve_in: u128, reserve_out: u128, amount_in: u128) -> Option<u128> {
    let k = reserve_in.checked_mul(reserve_out)?;
    let new_in = reserve_in.checked_add(amount_in)?;
    if new_in == 0 {
        return Some(0);
    }
    Some(reserve_out.saturating_sub(1).saturating_sub(k / new_in))
}
