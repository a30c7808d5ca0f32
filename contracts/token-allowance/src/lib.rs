pub mod accrual;
pub mod allowance;
pub mod budget;
pub mod contract;
mod error;
pub mod msg;
pub mod notify;
pub mod state;
pub mod transfer;

pub use crate::error::ContractError;
