use alloy::primitives::{U256, U512};

pub const BPS_SCALAR: u32 = 10_000;

// Calculate the amount out for a constant product (x * y = k) swap.
// Mirrors the router: fee taken from the input first, multiply before divide,
// floor division. Products are widened to 512 bits so reserve-scale inputs
// cannot overflow.
#[inline]
pub fn get_amount_out(amount_in: U256, reserve_in: U256, reserve_out: U256, fee_bps: u32) -> U256 {
    if amount_in.is_zero() || reserve_in.is_zero() || reserve_out.is_zero() {
        return U256::ZERO;
    }

    let scalar = U512::from(BPS_SCALAR);
    let fee_factor = U512::from(BPS_SCALAR - fee_bps.min(BPS_SCALAR));

    let amount_in_with_fee = U512::from(amount_in) * fee_factor / scalar;
    let numerator = amount_in_with_fee * U512::from(reserve_out);
    let denominator = U512::from(reserve_in) + amount_in_with_fee;
    if denominator.is_zero() {
        return U256::ZERO;
    }

    // strictly below reserve_out, always fits
    U256::saturating_from(numerator / denominator)
}
