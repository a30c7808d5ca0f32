// Shared message interfaces for delegated token wallets on CosmWasm

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Coin, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};

/// Largest amount a wallet balance or allowance can express
pub const MAX_AMOUNT: Uint128 = Uint128::MAX;

/// Tokens arriving at a destination wallet
#[cw_serde]
pub struct AcceptTransferMsg {
    pub amount: Uint128,
    /// Owner of the wallet the tokens left
    pub sender_owner: Addr,
    /// Receives whatever execution budget is left over
    pub remaining_budget_target: Addr,
    pub notify: bool,
    pub payload: Binary,
}

impl AcceptTransferMsg {
    pub fn into_cosmos_msg<T: Into<String>>(
        self,
        contract_addr: T,
        funds: Vec<Coin>,
    ) -> StdResult<CosmosMsg> {
        let msg = WalletExecuteMsg::AcceptTransfer(self);
        Ok(WasmMsg::Execute {
            contract_addr: contract_addr.into(),
            msg: to_json_binary(&msg)?,
            funds,
        }
        .into())
    }
}

/// Sent to a spender after its allowance changed
#[cw_serde]
pub struct AllowanceNotice {
    pub issuer: Addr,
    pub amount: Uint128,
    pub recovery_rate: Uint128,
    pub owner: Addr,
    pub remaining_budget_target: Addr,
    pub payload: Binary,
}

impl AllowanceNotice {
    pub fn into_cosmos_msg<T: Into<String>>(
        self,
        contract_addr: T,
        funds: Vec<Coin>,
    ) -> StdResult<CosmosMsg> {
        let msg = SpenderExecuteMsg::OnAcceptTokensAllowance(self);
        Ok(WasmMsg::Execute {
            contract_addr: contract_addr.into(),
            msg: to_json_binary(&msg)?,
            funds,
        }
        .into())
    }
}

/// What every wallet accepts from its peers
#[cw_serde]
pub enum WalletExecuteMsg {
    AcceptTransfer(AcceptTransferMsg),
}

/// What a spender contract implements to hear about allowance changes
#[cw_serde]
pub enum SpenderExecuteMsg {
    OnAcceptTokensAllowance(AllowanceNotice),
}

/// Registry side of wallet resolution
#[cw_serde]
pub enum RegistryExecuteMsg {
    /// Deploy the wallet of `owner`, then deliver `transfer` to it
    DeployWallet {
        owner: String,
        transfer: AcceptTransferMsg,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum RegistryQueryMsg {
    /// Resolve the wallet address of an owner, if deployed
    #[returns(WalletAddressResponse)]
    WalletAddress { owner: String },
}

#[cw_serde]
pub struct WalletAddressResponse {
    pub wallet: Option<Addr>,
}

pub fn query_wallet_address(
    querier: &QuerierWrapper,
    registry: &Addr,
    owner: &Addr,
) -> StdResult<Option<Addr>> {
    let res: WalletAddressResponse = querier.query_wasm_smart(
        registry,
        &RegistryQueryMsg::WalletAddress {
            owner: owner.to_string(),
        },
    )?;
    Ok(res.wallet)
}

pub fn deploy_wallet_msg<T: Into<String>>(
    registry: T,
    owner: &Addr,
    transfer: AcceptTransferMsg,
    funds: Vec<Coin>,
) -> StdResult<CosmosMsg> {
    let msg = RegistryExecuteMsg::DeployWallet {
        owner: owner.to_string(),
        transfer,
    };
    Ok(WasmMsg::Execute {
        contract_addr: registry.into(),
        msg: to_json_binary(&msg)?,
        funds,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::{coins, from_json};

    #[test]
    fn test_accept_transfer_wire_shape() {
        let transfer = AcceptTransferMsg {
            amount: Uint128::new(250),
            sender_owner: Addr::unchecked("alice"),
            remaining_budget_target: Addr::unchecked("relayer"),
            notify: false,
            payload: Binary::default(),
        };
        let msg = transfer.clone().into_cosmos_msg("wallet", coins(5, "ucosm")).unwrap();

        match msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr,
                msg,
                funds,
            }) => {
                assert_eq!(contract_addr, "wallet");
                assert_eq!(funds, coins(5, "ucosm"));
                let decoded: WalletExecuteMsg = from_json(&msg).unwrap();
                assert_eq!(decoded, WalletExecuteMsg::AcceptTransfer(transfer));
                assert!(String::from_utf8(msg.to_vec())
                    .unwrap()
                    .starts_with("{\"accept_transfer\":"));
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_allowance_notice_targets_spender() {
        let notice = AllowanceNotice {
            issuer: Addr::unchecked("registry"),
            amount: Uint128::new(1000),
            recovery_rate: Uint128::new(10),
            owner: Addr::unchecked("alice"),
            remaining_budget_target: Addr::unchecked("alice"),
            payload: Binary::from(b"hi".to_vec()),
        };
        let msg = notice.into_cosmos_msg("spender", vec![]).unwrap();

        match msg {
            CosmosMsg::Wasm(WasmMsg::Execute { contract_addr, msg, .. }) => {
                assert_eq!(contract_addr, "spender");
                let decoded: SpenderExecuteMsg = from_json(&msg).unwrap();
                let SpenderExecuteMsg::OnAcceptTokensAllowance(notice) = decoded;
                assert_eq!(notice.recovery_rate, Uint128::new(10));
            }
            other => panic!("unexpected message {:?}", other),
        }
    }
}
