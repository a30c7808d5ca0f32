use cosmwasm_std::{Addr, BankMsg, Coin, CosmosMsg, MessageInfo, StdError, Uint128};

use crate::error::ContractError;
use crate::state::Config;

/// Execution budget attached to a call, in the configured denom
pub fn attached_budget(funds: &[Coin], denom: &str) -> Uint128 {
    funds
        .iter()
        .filter(|coin| coin.denom == denom)
        .fold(Uint128::zero(), |acc, coin| acc.saturating_add(coin.amount))
}

/// Checks the attached budget covers `messages` outbound messages plus
/// `extra`. Must run before the caller touches storage.
pub fn reserve(
    info: &MessageInfo,
    config: &Config,
    messages: u64,
    extra: Uint128,
) -> Result<Uint128, ContractError> {
    let provided = attached_budget(&info.funds, &config.budget_denom);
    let required = config
        .message_reserve
        .checked_mul(Uint128::from(messages))
        .map_err(StdError::from)?
        .checked_add(extra)
        .map_err(StdError::from)?;

    if provided < required {
        return Err(ContractError::InsufficientBudget { required, provided });
    }

    Ok(provided)
}

/// Hands unspent funds back, skipping empty transfers
pub fn refund_msg(beneficiary: &Addr, funds: Vec<Coin>) -> Option<CosmosMsg> {
    let amount: Vec<Coin> = funds.into_iter().filter(|c| !c.amount.is_zero()).collect();
    if amount.is_empty() {
        return None;
    }

    Some(
        BankMsg::Send {
            to_address: beneficiary.to_string(),
            amount,
        }
        .into(),
    )
}
