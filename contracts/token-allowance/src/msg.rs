use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};
use shared::AcceptTransferMsg;

#[cw_serde]
pub struct InstantiateMsg {
    /// Wallet owner
    pub owner: String,
    /// Registry that resolves and deploys peer wallets
    pub registry: String,
    /// Tokens minted into the wallet at deployment
    pub initial_balance: Option<Uint128>,
    /// Native coin carrying the execution budget
    pub budget_denom: String,
    /// Budget held back per outbound message (default 0)
    pub message_reserve: Option<Uint128>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Raise a spender's allowance (owner only, non-renewable)
    IncreaseAllowance {
        spender: String,
        amount: Uint128,
        remaining_budget_target: String,
        notify: bool,
        payload: Option<Binary>,
    },
    /// Lower a spender's allowance, clamping at zero (owner only)
    DecreaseAllowance {
        spender: String,
        amount: Uint128,
        remaining_budget_target: String,
        notify: bool,
        payload: Option<Binary>,
    },
    /// Raise a spender's allowance and set how fast it recovers
    IncreaseAllowanceRenewable {
        spender: String,
        amount: Uint128,
        recovery_rate: Uint128,
        remaining_budget_target: String,
        notify: bool,
        payload: Option<Binary>,
    },
    /// Lower a spender's allowance and set how fast it recovers
    DecreaseAllowanceRenewable {
        spender: String,
        amount: Uint128,
        recovery_rate: Uint128,
        remaining_budget_target: String,
        notify: bool,
        payload: Option<Binary>,
    },
    /// Draw on the caller's allowance and send the tokens on
    TransferFrom {
        amount: Uint128,
        deployment_budget: Uint128,
        remaining_budget_target: String,
        notify: bool,
        payload: Option<Binary>,
    },
    /// Receive tokens from the registry or a peer wallet
    AcceptTransfer(AcceptTransferMsg),
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Amount a spender may draw right now
    #[returns(AllowanceResponse)]
    Allowance { spender: String },

    /// Ceiling and recovery rate of a spender's grant
    #[returns(AllowanceRenewableResponse)]
    AllowanceRenewable { spender: String },

    /// List live allowances
    #[returns(AllowancesResponse)]
    Allowances {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Wallet token balance
    #[returns(BalanceResponse)]
    Balance {},

    /// Get configuration
    #[returns(ConfigResponse)]
    Config {},
}

// Response types

#[cw_serde]
pub struct AllowanceResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct AllowanceRenewableResponse {
    pub ceiling: Uint128,
    pub recovery_rate: Uint128,
}

#[cw_serde]
pub struct AllowanceInfo {
    pub spender: Addr,
    pub ceiling: Uint128,
    /// Drawable at query time, recovery included
    pub available: Uint128,
    pub recovery_rate: Uint128,
    pub last_updated: u64,
}

#[cw_serde]
pub struct AllowancesResponse {
    pub allowances: Vec<AllowanceInfo>,
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub registry: Addr,
    pub budget_denom: String,
    pub message_reserve: Uint128,
}
