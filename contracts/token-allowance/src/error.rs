use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Amount must be greater than zero")]
    InvalidAmount {},

    #[error("Transfer amount exceeds wallet balance")]
    InsufficientBalance {},

    #[error("Caller holds no allowance on this wallet")]
    NotAuthorizedSpender {},

    #[error("Transfer amount exceeds available allowance")]
    InsufficientAuthorization {},

    #[error("Recovery rate must be lower than the allowance it recovers toward")]
    RecoveryRateExceeded {},

    #[error("Execution budget too low: required {required}, provided {provided}")]
    InsufficientBudget { required: Uint128, provided: Uint128 },

    #[error("Destination wallet is not deployed and no deployment budget was given")]
    DestinationNotDeployed {},

    #[error("Transfer did not come from a known wallet")]
    UnknownWallet {},

    #[error("An allowance notification is already in flight")]
    NotificationInFlight {},

    #[error("Unknown reply id {id}")]
    UnknownReplyId { id: u64 },

    #[error("Cannot migrate from contract {previous}")]
    WrongContract { previous: String },

    #[error("Invalid contract version {version}: {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("Cannot migrate from newer version {previous}")]
    CannotDowngrade { previous: String },
}
