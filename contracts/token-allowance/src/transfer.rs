use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response, StdResult, Uint128};
use shared::{deploy_wallet_msg, query_wallet_address, AcceptTransferMsg, MAX_AMOUNT};

use crate::accrual::available_now;
use crate::budget::{refund_msg, reserve};
use crate::error::ContractError;
use crate::state::{
    load_allowance, remove_allowance, save_allowance, Allowance, BALANCE, CONFIG,
};

/// Spends part of the caller's allowance and forwards the tokens.
///
/// Balance and allowance are only written after every check has passed,
/// including destination resolution and budget reservation. If the forward
/// fails downstream the whole transaction is reverted.
pub fn execute_transfer_from(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    deployment_budget: Uint128,
    remaining_budget_target: String,
    notify: bool,
    payload: Option<Binary>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let beneficiary = deps.api.addr_validate(&remaining_budget_target)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }

    let balance = BALANCE.load(deps.storage)?;
    if amount > balance {
        return Err(ContractError::InsufficientBalance {});
    }

    let spender = info.sender.clone();
    let allowance =
        load_allowance(deps.storage, &spender)?.ok_or(ContractError::NotAuthorizedSpender {})?;

    let now = env.block.time.seconds();
    let available = available_now(Some(&allowance), now);
    if available < amount {
        return Err(ContractError::InsufficientAuthorization {});
    }

    let destination = query_wallet_address(&deps.querier, &config.registry, &config.owner)?;
    let deploy = match destination {
        Some(_) => Uint128::zero(),
        None if deployment_budget.is_zero() => {
            return Err(ContractError::DestinationNotDeployed {})
        }
        None => deployment_budget,
    };
    reserve(&info, &config, 1, deploy)?;

    let remaining = available - amount;
    if remaining.is_zero() && allowance.recovery_rate.is_zero() {
        remove_allowance(deps.storage, &spender);
    } else if available != MAX_AMOUNT {
        // A saturated allowance is left as is: it clamps back to the
        // ceiling on every read and refreshing it would drop recovery time.
        save_allowance(
            deps.storage,
            &spender,
            &Allowance {
                available: remaining,
                last_updated: now,
                ..allowance
            },
        )?;
    }
    BALANCE.save(deps.storage, &(balance - amount))?;

    let transfer = AcceptTransferMsg {
        amount,
        sender_owner: config.owner.clone(),
        remaining_budget_target: beneficiary,
        notify,
        payload: payload.unwrap_or_default(),
    };
    let (forward, destination) = match destination {
        Some(wallet) => (
            transfer.into_cosmos_msg(wallet.as_str(), info.funds.clone())?,
            wallet,
        ),
        None => (
            deploy_wallet_msg(
                config.registry.as_str(),
                &config.owner,
                transfer,
                info.funds.clone(),
            )?,
            config.registry.clone(),
        ),
    };

    Ok(Response::new()
        .add_message(forward)
        .add_attribute("method", "transfer_from")
        .add_attribute("owner", config.owner)
        .add_attribute("spender", spender)
        .add_attribute("amount", amount)
        .add_attribute("remaining_allowance", remaining)
        .add_attribute("destination", destination)
        .add_attribute("deployed", (!deploy.is_zero()).to_string()))
}

/// Credits tokens arriving from the registry or a wallet it vouches for
pub fn execute_accept_transfer(
    deps: DepsMut,
    info: MessageInfo,
    msg: AcceptTransferMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if info.sender != config.registry {
        let wallet = query_wallet_address(&deps.querier, &config.registry, &msg.sender_owner)?;
        if wallet.as_ref() != Some(&info.sender) {
            return Err(ContractError::UnknownWallet {});
        }
    }

    let balance = BALANCE.update(deps.storage, |balance| -> StdResult<_> {
        Ok(balance.checked_add(msg.amount)?)
    })?;

    let mut response = Response::new()
        .add_attribute("method", "accept_transfer")
        .add_attribute("sender_owner", msg.sender_owner.as_str())
        .add_attribute("amount", msg.amount)
        .add_attribute("balance", balance);
    if let Some(refund) = refund_msg(&msg.remaining_budget_target, info.funds) {
        response = response.add_message(refund);
    }

    Ok(response)
}
