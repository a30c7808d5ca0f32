use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Wallet owner (the only party that can grant allowances)
    pub owner: Addr,
    /// Registry that issued this wallet and resolves peer wallets
    pub registry: Addr,
    /// Native coin carrying the execution budget
    pub budget_denom: String,
    /// Budget held back for every outbound message
    pub message_reserve: Uint128,
}

/// Spending right granted to one spender
#[cw_serde]
pub struct Allowance {
    /// Maximum amount the grant allows at once
    pub ceiling: Uint128,
    /// Drawable amount as of `last_updated`
    pub available: Uint128,
    /// Amount regained per second, always below `ceiling`
    pub recovery_rate: Uint128,
    /// Block time (seconds) of the last grant or draw
    pub last_updated: u64,
}

impl Allowance {
    /// Nothing left to draw and nothing to recover
    pub fn is_dead(&self) -> bool {
        self.available.is_zero() && self.recovery_rate.is_zero()
    }
}

/// Budget to hand back if an allowance notification bounces
#[cw_serde]
pub struct PendingRefund {
    pub beneficiary: Addr,
    pub funds: Vec<Coin>,
}

/// Configuration storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Token balance of this wallet
pub const BALANCE: Item<Uint128> = Item::new("balance");

/// Allowances indexed by spender
pub const ALLOWANCES: Map<&Addr, Allowance> = Map::new("allowances");

/// Refund parked while a notification submessage is in flight
pub const PENDING_NOTIFICATION: Item<PendingRefund> = Item::new("pending_notification");

pub fn load_allowance(storage: &dyn Storage, spender: &Addr) -> StdResult<Option<Allowance>> {
    ALLOWANCES.may_load(storage, spender)
}

pub fn save_allowance(
    storage: &mut dyn Storage,
    spender: &Addr,
    allowance: &Allowance,
) -> StdResult<()> {
    ALLOWANCES.save(storage, spender, allowance)
}

pub fn remove_allowance(storage: &mut dyn Storage, spender: &Addr) {
    ALLOWANCES.remove(storage, spender);
}
