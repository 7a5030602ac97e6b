use cosmwasm_std::{Addr, Event};

pub fn offer_created(offer_id: u64, lender: &Addr, collateral: &Addr) -> Event {
    Event::new("offer_created")
        .add_attribute("offer_id", offer_id.to_string())
        .add_attribute("lender", lender.as_str())
        .add_attribute("collateral", collateral.as_str())
}

pub fn offer_revoked(offer_id: u64, lender: &Addr) -> Event {
    Event::new("offer_revoked")
        .add_attribute("offer_id", offer_id.to_string())
        .add_attribute("lender", lender.as_str())
}

pub fn loan_offer_accepted(
    offer_id: u64,
    loan_id: u64,
    lender: &Addr,
    collateral: &Addr,
    collateral_id: &str,
) -> Event {
    Event::new("loan_offer_accepted")
        .add_attribute("offer_id", offer_id.to_string())
        .add_attribute("loan_id", loan_id.to_string())
        .add_attribute("lender", lender.as_str())
        .add_attribute("collateral", collateral.as_str())
        .add_attribute("collateral_id", collateral_id)
}

pub fn loan_paid_back(loan_id: u64, collateral: &Addr, collateral_id: &str) -> Event {
    Event::new("loan_paid_back")
        .add_attribute("loan_id", loan_id.to_string())
        .add_attribute("collateral", collateral.as_str())
        .add_attribute("collateral_id", collateral_id)
}

/// `outcome` is "credit" for repaid loans and "collateral" for defaulted ones.
pub fn loan_claimed(loan_id: u64, claimer: &Addr, outcome: &str) -> Event {
    Event::new("loan_claimed")
        .add_attribute("loan_id", loan_id.to_string())
        .add_attribute("claimer", claimer.as_str())
        .add_attribute("outcome", outcome)
}

pub fn claim_right_transferred(loan_id: u64, from: &Addr, to: &Addr) -> Event {
    Event::new("claim_right_transferred")
        .add_attribute("loan_id", loan_id.to_string())
        .add_attribute("from", from.as_str())
        .add_attribute("to", to.as_str())
}
