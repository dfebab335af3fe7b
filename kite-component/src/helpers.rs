use std::collections::BTreeMap;

use cosmwasm_std::{Addr, Deps, MessageInfo, Storage, Timestamp, Uint128};
use kite_fighter::msg::{BalanceResponse, QueryMsg as FighterQueryMsg};

use crate::error::ContractError;
use crate::state::{Config, SalePhase, BALANCES, CONFIG, LAST_PUBLIC_MINT_WEEK, SECONDS_PER_WEEK};

pub fn assert_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.owner {
        return Err(ContractError::NotOwner);
    }
    Ok(())
}

/// Builder contract or owner.
pub fn assert_authorized_caller(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    if *sender != config.builder && *sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

pub fn assert_trusted_forwarder(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    match config.trusted_forwarder {
        Some(forwarder) if forwarder == *sender => Ok(()),
        _ => Err(ContractError::NotTrustedForwarder),
    }
}

pub fn sale_active(phase: &SalePhase) -> bool {
    matches!(phase, SalePhase::WhitelistOpen | SalePhase::PublicOpen)
}

pub fn assert_valid_component(config: &Config, component_id: u32) -> Result<(), ContractError> {
    if component_id >= config.number_of_components {
        return Err(ContractError::InvalidComponent {
            component_id,
            max: config.number_of_components,
        });
    }
    Ok(())
}

/// Ask the Fighter contract whether `addr` holds at least one fighter.
pub fn assert_fighter_holder(deps: Deps, config: &Config, addr: &Addr) -> Result<(), ContractError> {
    let res: BalanceResponse = deps.querier.query_wasm_smart(
        &config.fighter_contract,
        &FighterQueryMsg::BalanceOf {
            owner: addr.to_string(),
        },
    )?;
    if res.count == 0 {
        return Err(ContractError::NotFighterHolder);
    }
    Ok(())
}

pub fn check_payment(info: &MessageInfo, denom: &str, price: Uint128) -> Result<(), ContractError> {
    let sent = info
        .funds
        .iter()
        .filter(|c| c.denom == denom)
        .try_fold(Uint128::zero(), |acc, c| acc.checked_add(c.amount))
        .map_err(|_| ContractError::Overflow)?;
    if sent < price {
        return Err(ContractError::InsufficientFunds {
            required: price.to_string(),
            sent: sent.to_string(),
        });
    }
    Ok(())
}

pub fn week_of(now: Timestamp) -> u64 {
    now.seconds() / SECONDS_PER_WEEK
}

/// One public mint per address per week. Stores the current week on success.
pub fn record_weekly_claim(
    storage: &mut dyn Storage,
    addr: &Addr,
    now: Timestamp,
) -> Result<u64, ContractError> {
    let week = week_of(now);
    if LAST_PUBLIC_MINT_WEEK.may_load(storage, addr)? == Some(week) {
        return Err(ContractError::AlreadyMintedThisWeek);
    }
    LAST_PUBLIC_MINT_WEEK.save(storage, addr, &week)?;
    Ok(week)
}

pub fn credit(
    storage: &mut dyn Storage,
    holder: &Addr,
    component_id: u32,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let balance = BALANCES
        .may_load(storage, (holder, component_id))?
        .unwrap_or_default()
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow)?;
    BALANCES.save(storage, (holder, component_id), &balance)?;
    Ok(balance)
}

/// Validate a whole burn batch without writing. Duplicate ids are summed.
pub fn plan_burn(
    storage: &dyn Storage,
    config: &Config,
    from: &Addr,
    component_ids: &[u32],
    amounts: &[Uint128],
) -> Result<BTreeMap<u32, Uint128>, ContractError> {
    if component_ids.is_empty() {
        return Err(ContractError::EmptyBatch);
    }
    if component_ids.len() != amounts.len() {
        return Err(ContractError::LengthMismatch);
    }

    let mut totals: BTreeMap<u32, Uint128> = BTreeMap::new();
    for (id, amount) in component_ids.iter().zip(amounts) {
        assert_valid_component(config, *id)?;
        let total = totals.entry(*id).or_default();
        *total = total
            .checked_add(*amount)
            .map_err(|_| ContractError::Overflow)?;
    }

    let mut remaining = BTreeMap::new();
    for (id, total) in totals {
        let balance = BALANCES
            .may_load(storage, (from, id))?
            .unwrap_or_default();
        let left = balance
            .checked_sub(total)
            .map_err(|_| ContractError::BurnBatchFailed {
                reason: format!(
                    "component {} balance {} is less than {}",
                    id, balance, total
                ),
            })?;
        remaining.insert(id, left);
    }
    Ok(remaining)
}

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}
