//! Ownership registry for claim rights.
//!
//! One right exists per live loan, keyed by loan id. Whoever holds it is the only party
//! allowed to claim the loan, regardless of who funded the offer.

use cosmwasm_std::{Addr, Empty, Order, StdError, StdResult, Storage};
use cw_storage_plus::{Bound, Map};

use crate::error::ContractError;
use crate::state::page_limit;

pub const CLAIM_RIGHTS: Map<u64, Addr> = Map::new("claim_rights");

/// secondary index so holders can list their rights
const HOLDINGS: Map<(&Addr, u64), Empty> = Map::new("claim_rights__owner");

pub fn mint(storage: &mut dyn Storage, loan_id: u64, owner: &Addr) -> StdResult<()> {
    if CLAIM_RIGHTS.may_load(storage, loan_id)?.is_some() {
        return Err(StdError::generic_err(format!(
            "Claim right for loan {} already minted",
            loan_id
        )));
    }
    CLAIM_RIGHTS.save(storage, loan_id, owner)?;
    HOLDINGS.save(storage, (owner, loan_id), &Empty {})
}

pub fn owner_of(storage: &dyn Storage, loan_id: u64) -> StdResult<Option<Addr>> {
    CLAIM_RIGHTS.may_load(storage, loan_id)
}

/// Fails with `Unauthorized` unless `sender` currently holds the right.
pub fn ensure_holder(
    storage: &dyn Storage,
    loan_id: u64,
    sender: &Addr,
) -> Result<(), ContractError> {
    match owner_of(storage, loan_id)? {
        Some(owner) if owner == *sender => Ok(()),
        _ => Err(ContractError::unauthorized("Sender is not loan token owner")),
    }
}

pub fn transfer(
    storage: &mut dyn Storage,
    loan_id: u64,
    sender: &Addr,
    recipient: &Addr,
) -> Result<(), ContractError> {
    ensure_holder(storage, loan_id, sender)?;

    HOLDINGS.remove(storage, (sender, loan_id));
    CLAIM_RIGHTS.save(storage, loan_id, recipient)?;
    HOLDINGS.save(storage, (recipient, loan_id), &Empty {})?;
    Ok(())
}

/// Removes the right and returns its last holder.
pub fn burn(storage: &mut dyn Storage, loan_id: u64) -> StdResult<Addr> {
    let owner = CLAIM_RIGHTS.load(storage, loan_id)?;
    CLAIM_RIGHTS.remove(storage, loan_id);
    HOLDINGS.remove(storage, (&owner, loan_id));
    Ok(owner)
}

pub fn rights_of(
    storage: &dyn Storage,
    owner: &Addr,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Vec<u64>> {
    HOLDINGS
        .prefix(owner)
        .range(
            storage,
            start_after.map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(page_limit(limit))
        .map(|item| item.map(|(loan_id, _)| loan_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;

    #[test]
    fn transfer_moves_holder() {
        let mut deps = mock_dependencies();
        let lender = Addr::unchecked("lender");
        let buyer = Addr::unchecked("buyer");

        mint(deps.as_mut().storage, 1, &lender).unwrap();
        mint(deps.as_mut().storage, 2, &lender).unwrap();

        // only the holder can move it
        let err = transfer(deps.as_mut().storage, 1, &buyer, &buyer).unwrap_err();
        assert_eq!(
            err,
            ContractError::unauthorized("Sender is not loan token owner")
        );

        transfer(deps.as_mut().storage, 1, &lender, &buyer).unwrap();
        assert_eq!(Some(buyer.clone()), owner_of(&deps.storage, 1).unwrap());
        assert!(ensure_holder(&deps.storage, 1, &lender).is_err());
        ensure_holder(&deps.storage, 1, &buyer).unwrap();

        assert_eq!(vec![2], rights_of(&deps.storage, &lender, None, None).unwrap());
        assert_eq!(vec![1], rights_of(&deps.storage, &buyer, None, None).unwrap());
    }

    #[test]
    fn burn_clears_both_indexes() {
        let mut deps = mock_dependencies();
        let lender = Addr::unchecked("lender");

        mint(deps.as_mut().storage, 7, &lender).unwrap();
        assert_eq!(lender, burn(deps.as_mut().storage, 7).unwrap());

        assert_eq!(None, owner_of(&deps.storage, 7).unwrap());
        assert!(rights_of(&deps.storage, &lender, None, None)
            .unwrap()
            .is_empty());
        // a burned right cannot be burned again
        burn(deps.as_mut().storage, 7).unwrap_err();
    }

    #[test]
    fn double_mint_is_rejected() {
        let mut deps = mock_dependencies();
        mint(deps.as_mut().storage, 1, &Addr::unchecked("a")).unwrap();
        mint(deps.as_mut().storage, 1, &Addr::unchecked("b")).unwrap_err();
    }

    #[test]
    fn rights_of_paginates() {
        let mut deps = mock_dependencies();
        let holder = Addr::unchecked("holder");
        for loan_id in 1..=5 {
            mint(deps.as_mut().storage, loan_id, &holder).unwrap();
        }

        // another holder's rights never leak into the page
        mint(deps.as_mut().storage, 6, &Addr::unchecked("other")).unwrap();

        let page = rights_of(&deps.storage, &holder, Some(2), Some(2)).unwrap();
        assert_eq!(vec![3, 4], page);
        let page = rights_of(&deps.storage, &holder, Some(4), None).unwrap();
        assert_eq!(vec![5], page);
        assert!(rights_of(&deps.storage, &holder, Some(5), None)
            .unwrap()
            .is_empty());
    }
}
