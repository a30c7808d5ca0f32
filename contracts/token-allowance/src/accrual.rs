//! Recovery of allowances over time.

use cosmwasm_std::Uint128;

use crate::state::Allowance;

/// Amount `allowance` lets its spender draw at block time `now`.
///
/// Stored `available` plus `recovery_rate` for every second since
/// `last_updated`, saturating at `Uint128::MAX` and capped at `ceiling`.
/// A clock running behind `last_updated` recovers nothing. No record means
/// no drawing rights.
pub fn available_now(allowance: Option<&Allowance>, now: u64) -> Uint128 {
    let Some(allowance) = allowance else {
        return Uint128::zero();
    };

    let elapsed = now.saturating_sub(allowance.last_updated);
    let recovered = allowance
        .recovery_rate
        .saturating_mul(Uint128::from(elapsed));

    allowance
        .available
        .saturating_add(recovered)
        .min(allowance.ceiling)
}
