#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
    Storage, Uint128,
};
use cw2::set_contract_version;

use crate::assets::{
    ensure_collateral_transferable, ensure_credit_allowance, transfer_collateral,
    transfer_credit, transfer_credit_from,
};
use crate::claim_right;
use crate::error::ContractError;
use crate::events;
use crate::msg::{
    ClaimRightOwnerResponse, ClaimRightsResponse, ContractInfoResponse, CountersResponse,
    ExecuteMsg, InstantiateMsg, LoanResponse, LoanStatusResponse, LoansResponse, OfferResponse,
    OffersResponse, QueryMsg,
};
use crate::state::{
    list_loans, list_offers, loan_expiration, next_loan_id, next_offer_id, Config, Loan,
    LoanState, LoanTerms, Offer, OfferTerms, CONFIG, LOANS, LOAN_SEQ, OFFERS, OFFER_SEQ,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:p2p-loan";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_NAME: &str = "P2PLoan";
const DEFAULT_SYMBOL: &str = "2PL";

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        owner: info.sender,
        name: msg.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
        symbol: msg.symbol.unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
    };
    CONFIG.save(deps.storage, &config)?;

    // init sequences, first ids are 1
    OFFER_SEQ.save(deps.storage, &0)?;
    LOAN_SEQ.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("name", config.name)
        .add_attribute("symbol", config.symbol))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::ProposeOffer {
            collateral,
            collateral_id,
            credit,
            credit_amount,
            credit_to_be_paid_amount,
            duration,
        } => execute_propose_offer(
            deps,
            env,
            info,
            collateral,
            collateral_id,
            credit,
            credit_amount,
            credit_to_be_paid_amount,
            duration,
        ),
        ExecuteMsg::RevokeOffer { offer_id } => execute_revoke_offer(deps, info, offer_id),
        ExecuteMsg::AcceptOffer { offer_id } => execute_accept_offer(deps, env, info, offer_id),
        ExecuteMsg::Repay { loan_id } => execute_repay(deps, env, info, loan_id),
        ExecuteMsg::Claim { loan_id } => execute_claim(deps, env, info, loan_id),
        ExecuteMsg::TransferClaimRight { loan_id, recipient } => {
            execute_transfer_claim_right(deps, info, loan_id, recipient)
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn execute_propose_offer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    collateral: String,
    collateral_id: String,
    credit: String,
    credit_amount: Uint128,
    credit_to_be_paid_amount: Uint128,
    duration: u64,
) -> Result<Response, ContractError> {
    // a zero cw20 transfer is always rejected, such an offer could never be accepted
    if credit_amount.is_zero() || credit_to_be_paid_amount.is_zero() {
        return Err(ContractError::InvalidZeroAmount {});
    }
    if loan_expiration(env.block.time, duration).is_none() {
        return Err(ContractError::InvalidDuration { duration });
    }

    let terms = OfferTerms {
        lender: info.sender,
        collateral: deps.api.addr_validate(&collateral)?,
        collateral_id,
        credit: deps.api.addr_validate(&credit)?,
        credit_amount,
        credit_to_be_paid_amount,
        duration,
    };

    let offer_id = next_offer_id(deps.storage)?;
    let event = events::offer_created(offer_id, &terms.lender, &terms.collateral);
    OFFERS.save(deps.storage, offer_id, &Offer::Open(terms))?;

    Ok(Response::new()
        .set_data(to_binary(&offer_id)?)
        .add_attribute("action", "propose_offer")
        .add_attribute("offer_id", offer_id.to_string())
        .add_event(event))
}

pub fn execute_revoke_offer(
    deps: DepsMut,
    info: MessageInfo,
    offer_id: u64,
) -> Result<Response, ContractError> {
    // a vacant slot is InvalidState for everyone, checked before the lender
    let offer = OFFERS
        .may_load(deps.storage, offer_id)?
        .ok_or_else(|| ContractError::invalid_state("Loan offer is not in Open state"))?;

    if offer.terms().lender != info.sender {
        return Err(ContractError::unauthorized("Sender is not offer lender"));
    }
    if !matches!(offer, Offer::Open(_)) {
        return Err(ContractError::invalid_state("Loan offer is not in Open state"));
    }

    // the slot reads back as dead and zeroed
    OFFERS.remove(deps.storage, offer_id);

    Ok(Response::new()
        .add_attribute("action", "revoke_offer")
        .add_attribute("offer_id", offer_id.to_string())
        .add_event(events::offer_revoked(offer_id, &info.sender)))
}

pub fn execute_accept_offer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    offer_id: u64,
) -> Result<Response, ContractError> {
    let terms = match OFFERS.may_load(deps.storage, offer_id)? {
        Some(Offer::Open(terms)) => terms,
        _ => return Err(ContractError::invalid_state("Loan offer is not in Open state")),
    };

    let custody = &env.contract.address;
    ensure_collateral_transferable(
        &deps.querier,
        &env.block,
        &terms.collateral,
        &terms.collateral_id,
        &info.sender,
        custody,
    )?;
    ensure_credit_allowance(
        &deps.querier,
        &env.block,
        &terms.credit,
        &terms.lender,
        custody,
        terms.credit_amount,
    )?;

    let expiration = loan_expiration(env.block.time, terms.duration).ok_or(
        ContractError::InvalidDuration {
            duration: terms.duration,
        },
    )?;

    let loan_id = next_loan_id(deps.storage)?;
    let loan = Loan::Running(LoanTerms {
        accepted_offer_id: offer_id,
        borrower: info.sender.clone(),
        expiration,
    });
    LOANS.save(deps.storage, loan_id, &loan)?;
    claim_right::mint(deps.storage, loan_id, &terms.lender)?;

    // both transfers run after the state commit, either failing reverts everything
    let take_collateral = transfer_collateral(&terms.collateral, custody, &terms.collateral_id)?;
    let lend_credit = transfer_credit_from(
        &terms.credit,
        &terms.lender,
        &info.sender,
        terms.credit_amount,
    )?;

    let event = events::loan_offer_accepted(
        offer_id,
        loan_id,
        &terms.lender,
        &terms.collateral,
        &terms.collateral_id,
    );
    OFFERS.save(deps.storage, offer_id, &Offer::Accepted(terms))?;

    Ok(Response::new()
        .set_data(to_binary(&loan_id)?)
        .add_message(take_collateral)
        .add_message(lend_credit)
        .add_attribute("action", "accept_offer")
        .add_attribute("offer_id", offer_id.to_string())
        .add_attribute("loan_id", loan_id.to_string())
        .add_attribute("borrower", info.sender)
        .add_event(event))
}

/// Callable by anyone: the credit is always pulled from the borrower's allowance.
pub fn execute_repay(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    loan_id: u64,
) -> Result<Response, ContractError> {
    let terms = match LOANS.may_load(deps.storage, loan_id)? {
        Some(Loan::Running(terms)) => terms,
        _ => return Err(ContractError::invalid_state("Loan is not running")),
    };
    if env.block.time >= terms.expiration {
        return Err(ContractError::invalid_state("Loan is expired"));
    }

    let offer = accepted_offer(deps.storage, terms.accepted_offer_id)?;
    let custody = &env.contract.address;
    ensure_credit_allowance(
        &deps.querier,
        &env.block,
        &offer.credit,
        &terms.borrower,
        custody,
        offer.credit_to_be_paid_amount,
    )?;

    // collateral stays in custody until the claim-right holder settles
    let pay_back = transfer_credit_from(
        &offer.credit,
        &terms.borrower,
        custody,
        offer.credit_to_be_paid_amount,
    )?;
    LOANS.save(deps.storage, loan_id, &Loan::PaidBack(terms))?;

    Ok(Response::new()
        .add_message(pay_back)
        .add_attribute("action", "repay")
        .add_attribute("loan_id", loan_id.to_string())
        .add_attribute("payer", info.sender)
        .add_event(events::loan_paid_back(
            loan_id,
            &offer.collateral,
            &offer.collateral_id,
        )))
}

pub fn execute_claim(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    loan_id: u64,
) -> Result<Response, ContractError> {
    claim_right::ensure_holder(deps.storage, loan_id, &info.sender)?;

    let loan = LOANS.load(deps.storage, loan_id)?;
    let offer = accepted_offer(deps.storage, loan.terms().accepted_offer_id)?;

    // a repaid loan also hands the collateral back to its borrower
    let (releases, outcome): (Vec<CosmosMsg>, _) = match loan.status(env.block.time) {
        LoanState::PaidBack => (
            vec![
                transfer_credit(&offer.credit, &info.sender, offer.credit_to_be_paid_amount)?,
                transfer_collateral(
                    &offer.collateral,
                    &loan.terms().borrower,
                    &offer.collateral_id,
                )?,
            ],
            "credit",
        ),
        LoanState::Expired => (
            vec![transfer_collateral(
                &offer.collateral,
                &info.sender,
                &offer.collateral_id,
            )?],
            "collateral",
        ),
        _ => return Err(ContractError::invalid_state("Loan cannot be claimed")),
    };

    LOANS.remove(deps.storage, loan_id);
    claim_right::burn(deps.storage, loan_id)?;

    Ok(Response::new()
        .add_messages(releases)
        .add_attribute("action", "claim")
        .add_attribute("loan_id", loan_id.to_string())
        .add_attribute("outcome", outcome)
        .add_event(events::loan_claimed(loan_id, &info.sender, outcome)))
}

pub fn execute_transfer_claim_right(
    deps: DepsMut,
    info: MessageInfo,
    loan_id: u64,
    recipient: String,
) -> Result<Response, ContractError> {
    let recipient = deps.api.addr_validate(&recipient)?;
    claim_right::transfer(deps.storage, loan_id, &info.sender, &recipient)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_claim_right")
        .add_attribute("loan_id", loan_id.to_string())
        .add_attribute("recipient", recipient.as_str())
        .add_event(events::claim_right_transferred(
            loan_id,
            &info.sender,
            &recipient,
        )))
}

fn accepted_offer(storage: &dyn Storage, offer_id: u64) -> StdResult<OfferTerms> {
    OFFERS.load(storage, offer_id).map(Offer::into_terms)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Offer { offer_id } => to_binary(&query_offer(deps, offer_id)?),
        QueryMsg::Offers { start_after, limit } => {
            to_binary(&query_offers(deps, start_after, limit)?)
        }
        QueryMsg::Loan { loan_id } => to_binary(&query_loan(deps, loan_id)?),
        QueryMsg::Loans { start_after, limit } => {
            to_binary(&query_loans(deps, start_after, limit)?)
        }
        QueryMsg::LoanStatus { loan_id } => to_binary(&query_loan_status(deps, env, loan_id)?),
        QueryMsg::ClaimRightOwner { loan_id } => {
            to_binary(&query_claim_right_owner(deps, loan_id)?)
        }
        QueryMsg::ClaimRights {
            owner,
            start_after,
            limit,
        } => to_binary(&query_claim_rights(deps, owner, start_after, limit)?),
        QueryMsg::Counters {} => to_binary(&query_counters(deps)?),
        QueryMsg::ContractInfo {} => to_binary(&query_contract_info(deps)?),
    }
}

fn query_offer(deps: Deps, offer_id: u64) -> StdResult<OfferResponse> {
    let offer = OFFERS.may_load(deps.storage, offer_id)?;
    Ok(OfferResponse::new(offer_id, offer.as_ref()))
}

fn query_offers(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<OffersResponse> {
    let offers = list_offers(deps.storage, start_after, limit)?
        .into_iter()
        .map(|(offer_id, offer)| OfferResponse::new(offer_id, Some(&offer)))
        .collect();
    Ok(OffersResponse { offers })
}

fn query_loan(deps: Deps, loan_id: u64) -> StdResult<LoanResponse> {
    let loan = LOANS.may_load(deps.storage, loan_id)?;
    Ok(LoanResponse::new(loan_id, loan.as_ref()))
}

fn query_loans(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<LoansResponse> {
    let loans = list_loans(deps.storage, start_after, limit)?
        .into_iter()
        .map(|(loan_id, loan)| LoanResponse::new(loan_id, Some(&loan)))
        .collect();
    Ok(LoansResponse { loans })
}

fn query_loan_status(deps: Deps, env: Env, loan_id: u64) -> StdResult<LoanStatusResponse> {
    let status = LOANS
        .may_load(deps.storage, loan_id)?
        .map(|loan| loan.status(env.block.time))
        .unwrap_or(LoanState::Dead);
    Ok(LoanStatusResponse { loan_id, status })
}

fn query_claim_right_owner(deps: Deps, loan_id: u64) -> StdResult<ClaimRightOwnerResponse> {
    let owner = claim_right::owner_of(deps.storage, loan_id)?
        .ok_or_else(|| StdError::not_found(format!("claim right for loan {}", loan_id)))?;
    Ok(ClaimRightOwnerResponse {
        owner: owner.into_string(),
    })
}

fn query_claim_rights(
    deps: Deps,
    owner: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<ClaimRightsResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let loan_ids = claim_right::rights_of(deps.storage, &owner, start_after, limit)?;
    Ok(ClaimRightsResponse { loan_ids })
}

fn query_counters(deps: Deps) -> StdResult<CountersResponse> {
    Ok(CountersResponse {
        offer_id: OFFER_SEQ.load(deps.storage)?,
        loan_id: LOAN_SEQ.load(deps.storage)?,
    })
}

fn query_contract_info(deps: Deps) -> StdResult<ContractInfoResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ContractInfoResponse {
        name: config.name,
        symbol: config.symbol,
        owner: config.owner.into_string(),
    })
}
