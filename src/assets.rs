//! Calls into the cw20 credit token and the cw721 collateral collection.

use cosmwasm_std::{
    to_binary, Addr, BlockInfo, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use cw20::{AllowanceResponse, Cw20Contract, Cw20ExecuteMsg, Cw20QueryMsg};
use cw721::{Approval, Cw721ExecuteMsg, Cw721QueryMsg, OperatorsResponse, OwnerOfResponse};

use crate::error::ContractError;

/// page size when walking a collection's operator list
const OPERATOR_PAGE: u32 = 30;

pub fn collateral_owner(
    querier: &QuerierWrapper,
    collateral: &Addr,
    token_id: &str,
) -> StdResult<OwnerOfResponse> {
    querier.query_wasm_smart(
        collateral.to_string(),
        &Cw721QueryMsg::OwnerOf {
            token_id: token_id.to_string(),
            include_expired: Some(false),
        },
    )
}

fn grants(approvals: &[Approval], block: &BlockInfo, spender: &Addr) -> bool {
    approvals
        .iter()
        .any(|a| a.spender == spender.as_str() && !a.expires.is_expired(block))
}

/// Whether `owner` made `operator` a live operator over all of its items in `collateral`.
pub fn is_collateral_operator(
    querier: &QuerierWrapper,
    block: &BlockInfo,
    collateral: &Addr,
    owner: &Addr,
    operator: &Addr,
) -> StdResult<bool> {
    let mut start_after = None;
    loop {
        let res: OperatorsResponse = querier.query_wasm_smart(
            collateral.to_string(),
            &Cw721QueryMsg::ApprovedForAll {
                owner: owner.to_string(),
                include_expired: Some(false),
                start_after: start_after.take(),
                limit: Some(OPERATOR_PAGE),
            },
        )?;
        if grants(&res.operators, block, operator) {
            return Ok(true);
        }
        if res.operators.len() < OPERATOR_PAGE as usize {
            return Ok(false);
        }
        start_after = res.operators.last().map(|a| a.spender.clone());
    }
}

/// Checks `sender` owns the item and has approved `spender` to move it, either for this
/// token or as an operator over the whole collection.
pub fn ensure_collateral_transferable(
    querier: &QuerierWrapper,
    block: &BlockInfo,
    collateral: &Addr,
    token_id: &str,
    sender: &Addr,
    spender: &Addr,
) -> Result<(), ContractError> {
    let res = collateral_owner(querier, collateral, token_id)?;
    if res.owner != sender.as_str() {
        return Err(ContractError::unauthorized("Sender is not collateral owner"));
    }

    let approved = grants(&res.approvals, block, spender)
        || is_collateral_operator(querier, block, collateral, sender, spender)?;
    if !approved {
        return Err(ContractError::transfer_failed(format!(
            "Collateral {} is not approved for transfer",
            token_id
        )));
    }
    Ok(())
}

pub fn credit_allowance(
    querier: &QuerierWrapper,
    credit: &Addr,
    owner: &Addr,
    spender: &Addr,
) -> StdResult<AllowanceResponse> {
    querier.query_wasm_smart(
        credit.to_string(),
        &Cw20QueryMsg::Allowance {
            owner: owner.to_string(),
            spender: spender.to_string(),
        },
    )
}

/// The token re-checks on `TransferFrom`; this only fails early with a readable reason.
pub fn ensure_credit_allowance(
    querier: &QuerierWrapper,
    block: &BlockInfo,
    credit: &Addr,
    owner: &Addr,
    spender: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let res = credit_allowance(querier, credit, owner, spender)?;
    if res.expires.is_expired(block) || res.allowance < amount {
        return Err(ContractError::transfer_failed(format!(
            "Insufficient allowance: {} approved {}, {} required",
            owner, res.allowance, amount
        )));
    }
    Ok(())
}

pub fn transfer_collateral(
    collateral: &Addr,
    recipient: &Addr,
    token_id: &str,
) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: collateral.to_string(),
        msg: to_binary(&Cw721ExecuteMsg::TransferNft {
            recipient: recipient.to_string(),
            token_id: token_id.to_string(),
        })?,
        funds: vec![],
    }
    .into())
}

pub fn transfer_credit_from(
    credit: &Addr,
    owner: &Addr,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    Cw20Contract(credit.clone()).call(Cw20ExecuteMsg::TransferFrom {
        owner: owner.to_string(),
        recipient: recipient.to_string(),
        amount,
    })
}

pub fn transfer_credit(credit: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    Cw20Contract(credit.clone()).call(Cw20ExecuteMsg::Transfer {
        recipient: recipient.to_string(),
        amount,
    })
}
