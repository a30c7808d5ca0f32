use cosmwasm_std::{Addr, Coin, DepsMut, Reply, Response, Storage, SubMsg, SubMsgResult};
use shared::AllowanceNotice;

use crate::budget::refund_msg;
use crate::error::ContractError;
use crate::state::{PendingRefund, PENDING_NOTIFICATION};

pub const NOTIFY_REPLY_ID: u64 = 1;

/// Either tells the spender about its new allowance or refunds the budget.
///
/// The notification runs as a submessage with `reply_always`, so a spender
/// that rejects it only loses its own state changes; the allowance written
/// by the caller stays committed and [`handle_notify_reply`] refunds the
/// budget that rode along. Only one notification can be in flight: a
/// nested notifying grant issued from inside the spender's callback is
/// rejected, which fails the outer notification and refunds its budget.
pub fn dispatch(
    storage: &mut dyn Storage,
    response: Response,
    notice: Option<(Addr, AllowanceNotice)>,
    beneficiary: Addr,
    funds: Vec<Coin>,
) -> Result<Response, ContractError> {
    match notice {
        Some((spender, notice)) => {
            if PENDING_NOTIFICATION.may_load(storage)?.is_some() {
                return Err(ContractError::NotificationInFlight {});
            }
            PENDING_NOTIFICATION.save(
                storage,
                &PendingRefund {
                    beneficiary,
                    funds: funds.clone(),
                },
            )?;
            let msg = notice.into_cosmos_msg(spender, funds)?;
            Ok(response
                .add_submessage(SubMsg::reply_always(msg, NOTIFY_REPLY_ID))
                .add_attribute("dispatch", "notify"))
        }
        None => {
            let response = match refund_msg(&beneficiary, funds) {
                Some(msg) => response.add_message(msg),
                None => response,
            };
            Ok(response.add_attribute("dispatch", "refund"))
        }
    }
}

pub fn handle_notify_reply(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let pending = PENDING_NOTIFICATION.may_load(deps.storage)?;
    PENDING_NOTIFICATION.remove(deps.storage);

    match msg.result {
        SubMsgResult::Ok(_) => Ok(Response::new()
            .add_attribute("method", "notify_reply")
            .add_attribute("notification", "delivered")),
        SubMsgResult::Err(err) => {
            deps.api
                .debug(&format!("allowance notification failed: {}", err));

            let mut response = Response::new()
                .add_attribute("method", "notify_reply")
                .add_attribute("notification_error", err);
            if let Some(pending) = pending {
                if let Some(refund) = refund_msg(&pending.beneficiary, pending.funds) {
                    response = response.add_message(refund);
                }
            }
            Ok(response)
        }
    }
}
