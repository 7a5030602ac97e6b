use cosmwasm_std::{Timestamp, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Loan, LoanState, Offer, OfferState};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    /// Name of the claim-right collection, "P2PLoan" when unset
    pub name: Option<String>,
    /// Symbol of the claim-right collection, "2PL" when unset
    pub symbol: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Offers `credit_amount` of the `credit` cw20 against item `collateral_id` of the
    /// `collateral` cw721 collection. Nothing is escrowed until the offer is accepted.
    ProposeOffer {
        collateral: String,
        collateral_id: String,
        credit: String,
        credit_amount: Uint128,
        credit_to_be_paid_amount: Uint128,
        /// seconds between acceptance and expiration
        duration: u64,
    },
    RevokeOffer {
        offer_id: u64,
    },
    /// Sender must own the collateral and have approved this contract to move it. The
    /// lender must have granted this contract a cw20 allowance of at least `credit_amount`.
    AcceptOffer {
        offer_id: u64,
    },
    /// Anyone may repay a loan. The amount is pulled from the borrower's allowance.
    Repay {
        loan_id: u64,
    },
    /// Settles a repaid or expired loan in favour of the claim-right holder.
    Claim {
        loan_id: u64,
    },
    TransferClaimRight {
        loan_id: u64,
        recipient: String,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Vacant ids report state `dead` with every other field zeroed.
    Offer {
        offer_id: u64,
    },
    Offers {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    /// Reports the stored state, which is never `expired`.
    Loan {
        loan_id: u64,
    },
    Loans {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    /// Reports `expired` for running loans at or past their expiration.
    LoanStatus {
        loan_id: u64,
    },
    ClaimRightOwner {
        loan_id: u64,
    },
    ClaimRights {
        owner: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    Counters {},
    ContractInfo {},
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
pub struct OfferResponse {
    pub offer_id: u64,
    pub state: OfferState,
    pub lender: String,
    pub collateral: String,
    pub collateral_id: String,
    pub credit: String,
    pub credit_amount: Uint128,
    pub credit_to_be_paid_amount: Uint128,
    pub duration: u64,
}

impl OfferResponse {
    pub fn new(offer_id: u64, offer: Option<&Offer>) -> Self {
        match offer {
            Some(offer) => {
                let terms = offer.terms();
                OfferResponse {
                    offer_id,
                    state: offer.state(),
                    lender: terms.lender.to_string(),
                    collateral: terms.collateral.to_string(),
                    collateral_id: terms.collateral_id.clone(),
                    credit: terms.credit.to_string(),
                    credit_amount: terms.credit_amount,
                    credit_to_be_paid_amount: terms.credit_to_be_paid_amount,
                    duration: terms.duration,
                }
            }
            None => OfferResponse {
                offer_id,
                ..Default::default()
            },
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct OffersResponse {
    pub offers: Vec<OfferResponse>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct LoanResponse {
    pub loan_id: u64,
    pub state: LoanState,
    pub accepted_offer_id: u64,
    pub borrower: String,
    pub expiration: Timestamp,
}

impl LoanResponse {
    pub fn new(loan_id: u64, loan: Option<&Loan>) -> Self {
        match loan {
            Some(loan) => {
                let terms = loan.terms();
                LoanResponse {
                    loan_id,
                    state: loan.state(),
                    accepted_offer_id: terms.accepted_offer_id,
                    borrower: terms.borrower.to_string(),
                    expiration: terms.expiration,
                }
            }
            None => LoanResponse {
                loan_id,
                state: LoanState::Dead,
                accepted_offer_id: 0,
                borrower: String::new(),
                expiration: Timestamp::from_seconds(0),
            },
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct LoansResponse {
    pub loans: Vec<LoanResponse>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct LoanStatusResponse {
    pub loan_id: u64,
    pub status: LoanState,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ClaimRightOwnerResponse {
    pub owner: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ClaimRightsResponse {
    pub loan_ids: Vec<u64>,
}

/// Last allocated ids, 0 before the first offer or loan.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct CountersResponse {
    pub offer_id: u64,
    pub loan_id: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ContractInfoResponse {
    pub name: String,
    pub symbol: String,
    pub owner: String,
}
