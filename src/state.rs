use cosmwasm_std::{Addr, Order, StdResult, Storage, Timestamp, Uint128};
use cw_storage_plus::{Bound, Item, Map};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const CONFIG: Item<Config> = Item::new("config");

/// OFFER_SEQ holds the last allocated offer id
pub const OFFER_SEQ: Item<u64> = Item::new("offer_seq");
pub const OFFERS: Map<u64, Offer> = Map::new("offers");

/// LOAN_SEQ holds the last allocated loan id
pub const LOAN_SEQ: Item<u64> = Item::new("loan_seq");
pub const LOANS: Map<u64, Loan> = Map::new("loans");

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 30;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    pub owner: Addr,
    /// name of the claim-right collection
    pub name: String,
    pub symbol: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OfferState {
    #[default]
    Dead,
    Open,
    Accepted,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoanState {
    #[default]
    Dead,
    Running,
    PaidBack,
    /// Never stored. Reported by status queries for running loans past expiration.
    Expired,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct OfferTerms {
    pub lender: Addr,
    /// cw721 collection the collateral item belongs to
    pub collateral: Addr,
    pub collateral_id: String,
    /// cw20 token lent to the borrower
    pub credit: Addr,
    pub credit_amount: Uint128,
    pub credit_to_be_paid_amount: Uint128,
    /// loan duration in seconds
    pub duration: u64,
}

/// A vacant slot is simply absent from `OFFERS`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Offer {
    Open(OfferTerms),
    Accepted(OfferTerms),
}

impl Offer {
    pub fn terms(&self) -> &OfferTerms {
        match self {
            Offer::Open(terms) | Offer::Accepted(terms) => terms,
        }
    }

    pub fn into_terms(self) -> OfferTerms {
        match self {
            Offer::Open(terms) | Offer::Accepted(terms) => terms,
        }
    }

    pub fn state(&self) -> OfferState {
        match self {
            Offer::Open(_) => OfferState::Open,
            Offer::Accepted(_) => OfferState::Accepted,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct LoanTerms {
    pub accepted_offer_id: u64,
    pub borrower: Addr,
    pub expiration: Timestamp,
}

/// A deleted loan is simply absent from `LOANS`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Loan {
    Running(LoanTerms),
    PaidBack(LoanTerms),
}

impl Loan {
    pub fn terms(&self) -> &LoanTerms {
        match self {
            Loan::Running(terms) | Loan::PaidBack(terms) => terms,
        }
    }

    pub fn state(&self) -> LoanState {
        match self {
            Loan::Running(_) => LoanState::Running,
            Loan::PaidBack(_) => LoanState::PaidBack,
        }
    }

    /// Status as seen at `now`. A recorded repayment is never overridden by the clock.
    pub fn status(&self, now: Timestamp) -> LoanState {
        match self {
            Loan::Running(terms) if now >= terms.expiration => LoanState::Expired,
            loan => loan.state(),
        }
    }
}

/// `start` plus `duration` seconds, or `None` past the end of the timestamp range.
pub fn loan_expiration(start: Timestamp, duration: u64) -> Option<Timestamp> {
    duration
        .checked_mul(1_000_000_000)
        .and_then(|nanos| start.nanos().checked_add(nanos))
        .map(Timestamp::from_nanos)
}

pub fn next_offer_id(storage: &mut dyn Storage) -> StdResult<u64> {
    let id = OFFER_SEQ.load(storage)? + 1;
    OFFER_SEQ.save(storage, &id)?;
    Ok(id)
}

pub fn next_loan_id(storage: &mut dyn Storage) -> StdResult<u64> {
    let id = LOAN_SEQ.load(storage)? + 1;
    LOAN_SEQ.save(storage, &id)?;
    Ok(id)
}

pub fn page_limit(limit: Option<u32>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize
}

pub fn list_offers(
    storage: &dyn Storage,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Vec<(u64, Offer)>> {
    OFFERS
        .range(
            storage,
            start_after.map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(page_limit(limit))
        .collect()
}

pub fn list_loans(
    storage: &dyn Storage,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Vec<(u64, Loan)>> {
    LOANS
        .range(
            storage,
            start_after.map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(page_limit(limit))
        .collect()
}
