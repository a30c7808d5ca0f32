use cosmwasm_std::{Addr, Binary, DepsMut, Env, MessageInfo, Response, Uint128};
use shared::AllowanceNotice;

use crate::accrual::available_now;
use crate::budget::reserve;
use crate::error::ContractError;
use crate::notify::dispatch;
use crate::state::{load_allowance, remove_allowance, save_allowance, Allowance, Config, CONFIG};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adjustment {
    Increase,
    Decrease,
}

impl Adjustment {
    /// New target from what the spender could draw right now
    fn apply(self, current: Uint128, amount: Uint128) -> Uint128 {
        match self {
            Adjustment::Increase => current.saturating_add(amount),
            Adjustment::Decrease => current.saturating_sub(amount),
        }
    }
}

/// Where the execution budget goes once the allowance is written
pub struct Delivery {
    pub remaining_budget_target: String,
    pub notify: bool,
    pub payload: Option<Binary>,
}

pub fn execute_adjust_allowance(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    method: &str,
    spender: String,
    adjustment: Adjustment,
    amount: Uint128,
    recovery_rate: Uint128,
    delivery: Delivery,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }

    let spender_addr = deps.api.addr_validate(&spender)?;
    let current = available_now(
        load_allowance(deps.storage, &spender_addr)?.as_ref(),
        env.block.time.seconds(),
    );
    let target = adjustment.apply(current, amount);

    set_allowance(
        deps,
        &env,
        &info,
        &config,
        method,
        spender_addr,
        target,
        recovery_rate,
        delivery,
    )
}

/// Replaces the spender's grant with a fresh one of `ceiling`.
///
/// Unspent remainder of the previous grant is discarded. A zero ceiling
/// revokes the grant outright.
fn set_allowance(
    deps: DepsMut,
    env: &Env,
    info: &MessageInfo,
    config: &Config,
    method: &str,
    spender: Addr,
    ceiling: Uint128,
    recovery_rate: Uint128,
    delivery: Delivery,
) -> Result<Response, ContractError> {
    if !ceiling.is_zero() && recovery_rate >= ceiling {
        return Err(ContractError::RecoveryRateExceeded {});
    }

    let beneficiary = deps.api.addr_validate(&delivery.remaining_budget_target)?;
    reserve(info, config, 1, Uint128::zero())?;

    if ceiling.is_zero() {
        remove_allowance(deps.storage, &spender);
    } else {
        save_allowance(
            deps.storage,
            &spender,
            &Allowance {
                ceiling,
                available: ceiling,
                recovery_rate,
                last_updated: env.block.time.seconds(),
            },
        )?;
    }

    let response = Response::new()
        .add_attribute("method", method)
        .add_attribute("owner", config.owner.as_str())
        .add_attribute("spender", spender.as_str())
        .add_attribute("amount", ceiling)
        .add_attribute("recovery_rate", recovery_rate);

    let notice = delivery.notify.then(|| {
        (
            spender.clone(),
            AllowanceNotice {
                issuer: config.registry.clone(),
                amount: ceiling,
                recovery_rate,
                owner: config.owner.clone(),
                remaining_budget_target: beneficiary.clone(),
                payload: delivery.payload.unwrap_or_default(),
            },
        )
    });

    dispatch(
        deps.storage,
        response,
        notice,
        beneficiary,
        info.funds.clone(),
    )
}
