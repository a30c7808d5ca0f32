use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Reply,
    Response, StdResult, Uint128,
};
use cw2::{get_contract_version, set_contract_version};
use cw_storage_plus::Bound;
use semver::Version;

use crate::accrual::available_now;
use crate::allowance::{execute_adjust_allowance, Adjustment, Delivery};
use crate::error::ContractError;
use crate::msg::{
    AllowanceInfo, AllowanceRenewableResponse, AllowanceResponse, AllowancesResponse,
    BalanceResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg,
};
use crate::notify::{handle_notify_reply, NOTIFY_REPLY_ID};
use crate::state::{load_allowance, Config, ALLOWANCES, BALANCE, CONFIG};
use crate::transfer::{execute_accept_transfer, execute_transfer_from};

const CONTRACT_NAME: &str = "crates.io:token-allowance";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        registry: deps.api.addr_validate(&msg.registry)?,
        budget_denom: msg.budget_denom,
        message_reserve: msg.message_reserve.unwrap_or_default(),
    };
    CONFIG.save(deps.storage, &config)?;

    let balance = msg.initial_balance.unwrap_or_default();
    BALANCE.save(deps.storage, &balance)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("registry", config.registry)
        .add_attribute("balance", balance))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::IncreaseAllowance {
            spender,
            amount,
            remaining_budget_target,
            notify,
            payload,
        } => execute_adjust_allowance(
            deps,
            env,
            info,
            "increase_allowance",
            spender,
            Adjustment::Increase,
            amount,
            Uint128::zero(),
            Delivery {
                remaining_budget_target,
                notify,
                payload,
            },
        ),
        ExecuteMsg::DecreaseAllowance {
            spender,
            amount,
            remaining_budget_target,
            notify,
            payload,
        } => execute_adjust_allowance(
            deps,
            env,
            info,
            "decrease_allowance",
            spender,
            Adjustment::Decrease,
            amount,
            Uint128::zero(),
            Delivery {
                remaining_budget_target,
                notify,
                payload,
            },
        ),
        ExecuteMsg::IncreaseAllowanceRenewable {
            spender,
            amount,
            recovery_rate,
            remaining_budget_target,
            notify,
            payload,
        } => execute_adjust_allowance(
            deps,
            env,
            info,
            "increase_allowance_renewable",
            spender,
            Adjustment::Increase,
            amount,
            recovery_rate,
            Delivery {
                remaining_budget_target,
                notify,
                payload,
            },
        ),
        ExecuteMsg::DecreaseAllowanceRenewable {
            spender,
            amount,
            recovery_rate,
            remaining_budget_target,
            notify,
            payload,
        } => execute_adjust_allowance(
            deps,
            env,
            info,
            "decrease_allowance_renewable",
            spender,
            Adjustment::Decrease,
            amount,
            recovery_rate,
            Delivery {
                remaining_budget_target,
                notify,
                payload,
            },
        ),
        ExecuteMsg::TransferFrom {
            amount,
            deployment_budget,
            remaining_budget_target,
            notify,
            payload,
        } => execute_transfer_from(
            deps,
            env,
            info,
            amount,
            deployment_budget,
            remaining_budget_target,
            notify,
            payload,
        ),
        ExecuteMsg::AcceptTransfer(msg) => execute_accept_transfer(deps, info, msg),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        NOTIFY_REPLY_ID => handle_notify_reply(deps, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let previous = get_contract_version(deps.storage)?;
    if previous.contract != CONTRACT_NAME {
        return Err(ContractError::WrongContract {
            previous: previous.contract,
        });
    }
    if parse_version(&previous.version)? > parse_version(CONTRACT_VERSION)? {
        return Err(ContractError::CannotDowngrade {
            previous: previous.version,
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("from_version", previous.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}

fn parse_version(version: &str) -> Result<Version, ContractError> {
    version
        .parse()
        .map_err(|err: semver::Error| ContractError::InvalidVersion {
            version: version.to_string(),
            reason: err.to_string(),
        })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Allowance { spender } => to_json_binary(&query_allowance(deps, env, spender)?),
        QueryMsg::AllowanceRenewable { spender } => {
            to_json_binary(&query_allowance_renewable(deps, spender)?)
        }
        QueryMsg::Allowances { start_after, limit } => {
            to_json_binary(&query_allowances(deps, env, start_after, limit)?)
        }
        QueryMsg::Balance {} => to_json_binary(&BalanceResponse {
            balance: BALANCE.load(deps.storage)?,
        }),
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
    }
}

fn query_allowance(deps: Deps, env: Env, spender: String) -> StdResult<AllowanceResponse> {
    let spender_addr = deps.api.addr_validate(&spender)?;
    let allowance = load_allowance(deps.storage, &spender_addr)?;

    Ok(AllowanceResponse {
        amount: available_now(allowance.as_ref(), env.block.time.seconds()),
    })
}

fn query_allowance_renewable(deps: Deps, spender: String) -> StdResult<AllowanceRenewableResponse> {
    let spender_addr = deps.api.addr_validate(&spender)?;

    Ok(match load_allowance(deps.storage, &spender_addr)? {
        Some(allowance) => AllowanceRenewableResponse {
            ceiling: allowance.ceiling,
            recovery_rate: allowance.recovery_rate,
        },
        None => AllowanceRenewableResponse {
            ceiling: Uint128::zero(),
            recovery_rate: Uint128::zero(),
        },
    })
}

fn query_allowances(
    deps: Deps,
    env: Env,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AllowancesResponse> {
    let start_after = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_after.as_ref().map(Bound::exclusive);
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let now = env.block.time.seconds();

    let allowances = ALLOWANCES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (spender, allowance) = item?;
            Ok(AllowanceInfo {
                spender,
                ceiling: allowance.ceiling,
                available: available_now(Some(&allowance), now),
                recovery_rate: allowance.recovery_rate,
                last_updated: allowance.last_updated,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AllowancesResponse { allowances })
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        registry: config.registry,
        budget_denom: config.budget_denom,
        message_reserve: config.message_reserve,
    })
}
