use cosmwasm_std::{Addr, Deps, MessageInfo};

use crate::error::ContractError;
use crate::state::{Config, CONFIG};

pub fn assert_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.owner {
        return Err(ContractError::NotOwner);
    }
    Ok(())
}

/// The owner is not implicitly an admin.
pub fn assert_admin(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    if *sender != config.admin {
        return Err(ContractError::NotAdmin);
    }
    Ok(())
}

pub fn assert_gen_one_started(deps: Deps, config: &Config) -> Result<(), ContractError> {
    let fighter: kite_fighter::state::Config = deps.querier.query_wasm_smart(
        &config.fighter_contract,
        &kite_fighter::msg::QueryMsg::Config {},
    )?;
    if !fighter.gen_one_started {
        return Err(ContractError::GenOneNotStarted);
    }
    Ok(())
}

pub fn assert_component_sale_active(deps: Deps, config: &Config) -> Result<(), ContractError> {
    let component: kite_component::state::Config = deps.querier.query_wasm_smart(
        &config.component_contract,
        &kite_component::msg::QueryMsg::Config {},
    )?;
    if !kite_component::helpers::sale_active(&component.sale_phase) {
        return Err(ContractError::SaleNotActive);
    }
    Ok(())
}

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}
