use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
    Uint128, WasmMsg,
};
use cw2::set_contract_version;

use kite_component::msg::ExecuteMsg as ComponentExecuteMsg;
use kite_fighter::msg::ExecuteMsg as FighterExecuteMsg;

use crate::error::ContractError;
use crate::helpers::{
    assert_admin, assert_component_sale_active, assert_gen_one_started, assert_owner,
    reject_funds,
};
use crate::msg::*;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:kite-builder";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ─── Instantiate ────────────────────────────────────────────────────────────

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
        admin: deps.api.addr_validate(&msg.admin)?,
        fighter_contract: deps.api.addr_validate(&msg.fighter_contract)?,
        component_contract: deps.api.addr_validate(&msg.component_contract)?,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("owner", config.owner.as_str())
        .add_attribute("admin", config.admin.as_str()))
}

// ─── Execute ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::BuildKite {
            component_ids,
            amounts,
            to,
            uri,
        } => execute_build_kite(deps, env, info, component_ids, amounts, to, uri),
        ExecuteMsg::MintComponent {
            to,
            component_id,
            amount,
        } => execute_mint_component(deps, env, info, to, component_id, amount),
        ExecuteMsg::SetContractAddresses { fighter, component } => {
            execute_set_contract_addresses(deps, info, fighter, component)
        }
        ExecuteMsg::SetAdmin { admin } => execute_set_admin(deps, info, admin),
        ExecuteMsg::ProposeOwner { new_owner } => execute_propose_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, info),
        ExecuteMsg::CancelOwnerTransfer {} => execute_cancel_owner_transfer(deps, info),
    }
}

// ─── Execute: Crafting ──────────────────────────────────────────────────────

/// Burn from `to`, then mint `to` a gen-one fighter. Both ledgers re-check
/// that this contract may call them; a failure in either reverts both.
pub fn execute_build_kite(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    component_ids: Vec<u32>,
    amounts: Vec<Uint128>,
    to: String,
    uri: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let config = CONFIG.load(deps.storage)?;
    assert_admin(&config, &info.sender)?;
    assert_gen_one_started(deps.as_ref(), &config)?;

    let recipient = deps.api.addr_validate(&to)?;

    let burn = WasmMsg::Execute {
        contract_addr: config.component_contract.to_string(),
        msg: to_json_binary(&ComponentExecuteMsg::BurnBatch {
            from: recipient.to_string(),
            component_ids,
            amounts,
        })?,
        funds: vec![],
    };
    let mint = WasmMsg::Execute {
        contract_addr: config.fighter_contract.to_string(),
        msg: to_json_binary(&FighterExecuteMsg::MintGenOne {
            to: recipient.to_string(),
            uri: uri.clone(),
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(burn)
        .add_message(mint)
        .add_attribute("action", "build_kite")
        .add_attribute("to", recipient.as_str())
        .add_attribute("uri", uri))
}

pub fn execute_mint_component(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    to: String,
    component_id: u32,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let config = CONFIG.load(deps.storage)?;
    assert_admin(&config, &info.sender)?;
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount);
    }
    assert_component_sale_active(deps.as_ref(), &config)?;

    let recipient = deps.api.addr_validate(&to)?;
    let mint = WasmMsg::Execute {
        contract_addr: config.component_contract.to_string(),
        msg: to_json_binary(&ComponentExecuteMsg::DappMint {
            to: recipient.to_string(),
            component_id,
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(mint)
        .add_attribute("action", "mint_component")
        .add_attribute("to", recipient.as_str())
        .add_attribute("component_id", component_id.to_string())
        .add_attribute("amount", amount.to_string()))
}

// ─── Execute: Admin ─────────────────────────────────────────────────────────

pub fn execute_set_contract_addresses(
    deps: DepsMut,
    info: MessageInfo,
    fighter: String,
    component: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    let fighter = deps.api.addr_validate(&fighter)?;
    let component = deps.api.addr_validate(&component)?;

    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.fighter_contract = fighter.clone();
        c.component_contract = component.clone();
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", "set_contract_addresses")
        .add_attribute("fighter_contract", fighter.as_str())
        .add_attribute("component_contract", component.as_str()))
}

pub fn execute_set_admin(
    deps: DepsMut,
    info: MessageInfo,
    admin: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    let admin = deps.api.addr_validate(&admin)?;

    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.admin = admin.clone();
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", "set_admin")
        .add_attribute("admin", admin.as_str()))
}

pub fn execute_propose_owner(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    if PENDING_OWNER.may_load(deps.storage)?.is_some() {
        return Err(ContractError::OwnerTransferAlreadyPending);
    }
    let proposed = deps.api.addr_validate(&new_owner)?;
    PENDING_OWNER.save(
        deps.storage,
        &PendingOwnerTransfer {
            proposed_owner: proposed.clone(),
        },
    )?;
    Ok(Response::new()
        .add_attribute("action", "propose_owner")
        .add_attribute("proposed_owner", proposed.as_str()))
}

pub fn execute_accept_owner(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoOwnerTransferPending)?;
    if info.sender != pending.proposed_owner {
        return Err(ContractError::NotPendingOwner);
    }
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.owner = pending.proposed_owner.clone();
        Ok(c)
    })?;
    PENDING_OWNER.remove(deps.storage);
    Ok(Response::new()
        .add_attribute("action", "accept_owner")
        .add_attribute("new_owner", pending.proposed_owner.as_str()))
}

pub fn execute_cancel_owner_transfer(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    if PENDING_OWNER.may_load(deps.storage)?.is_none() {
        return Err(ContractError::NoOwnerTransferPending);
    }
    PENDING_OWNER.remove(deps.storage);
    Ok(Response::new().add_attribute("action", "cancel_owner_transfer"))
}

// ─── Queries ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::PendingOwner {} => to_json_binary(&PENDING_OWNER.may_load(deps.storage)?),
    }
}

// ─── Migrate ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
