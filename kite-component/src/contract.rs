use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    StdResult, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::helpers::{
    assert_authorized_caller, assert_fighter_holder, assert_owner, assert_trusted_forwarder,
    assert_valid_component, check_payment, credit, plan_burn, record_weekly_claim, reject_funds,
    sale_active,
};
use crate::msg::*;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:kite-component";
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

    if msg.denom.is_empty() {
        return Err(ContractError::InvalidConfig {
            reason: "denom must not be empty".to_string(),
        });
    }

    let config = Config {
        owner: info.sender,
        builder: deps.api.addr_validate(&msg.builder)?,
        fighter_contract: deps.api.addr_validate(&msg.fighter_contract)?,
        trusted_forwarder: msg
            .trusted_forwarder
            .map(|f| deps.api.addr_validate(&f))
            .transpose()?,
        name: msg.name,
        uri: msg.uri,
        denom: msg.denom,
        component_price: msg.component_price,
        number_of_components: msg.number_of_components,
        sale_phase: SalePhase::Paused,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("owner", config.owner.as_str())
        .add_attribute("fighter_contract", config.fighter_contract.as_str()))
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
        ExecuteMsg::Relay { signer, msg } => {
            assert_trusted_forwarder(deps.as_ref(), &info.sender)?;
            let forwarder = info.sender.clone();
            let mut relayed = info;
            relayed.sender = deps.api.addr_validate(&signer)?;
            let res = dispatch(deps, env, relayed, *msg)?;
            Ok(res.add_attribute("relayed_by", forwarder.as_str()))
        }
        msg => dispatch(deps, env, info, msg),
    }
}

fn dispatch(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::DappMint {
            to,
            component_id,
            amount,
        } => execute_dapp_mint(deps, env, info, to, component_id, amount),
        ExecuteMsg::PublicMint { component_id } => {
            execute_public_mint(deps, env, info, component_id)
        }
        ExecuteMsg::BurnBatch {
            from,
            component_ids,
            amounts,
        } => execute_burn_batch(deps, env, info, from, component_ids, amounts),
        ExecuteMsg::Relay { .. } => Err(ContractError::NestedRelay),
        ExecuteMsg::SetComponentPrice { price } => {
            update_config(deps, info, "set_component_price", |c| c.component_price = price)
        }
        ExecuteMsg::SetNumberOfComponents { count } => {
            update_config(deps, info, "set_number_of_components", |c| {
                c.number_of_components = count
            })
        }
        ExecuteMsg::SetUri { uri } => update_config(deps, info, "set_uri", |c| c.uri = uri),
        ExecuteMsg::SetName { name } => update_config(deps, info, "set_name", |c| c.name = name),
        ExecuteMsg::SetBuilderContract { builder } => {
            let builder = deps.api.addr_validate(&builder)?;
            update_config(deps, info, "set_builder_contract", |c| c.builder = builder)
        }
        ExecuteMsg::SetFighterContract { fighter } => {
            let fighter = deps.api.addr_validate(&fighter)?;
            update_config(deps, info, "set_fighter_contract", |c| {
                c.fighter_contract = fighter
            })
        }
        ExecuteMsg::SetTrustedForwarder { forwarder } => {
            let forwarder = forwarder
                .map(|f| deps.api.addr_validate(&f))
                .transpose()?;
            update_config(deps, info, "set_trusted_forwarder", |c| {
                c.trusted_forwarder = forwarder
            })
        }
        ExecuteMsg::SetSalePhase { phase } => {
            update_config(deps, info, "set_sale_phase", |c| c.sale_phase = phase)
        }
        ExecuteMsg::FlipSaleState {} => update_config(deps, info, "flip_sale_state", |c| {
            c.sale_phase = match c.sale_phase {
                SalePhase::Paused => SalePhase::WhitelistOpen,
                SalePhase::WhitelistOpen | SalePhase::PublicOpen => SalePhase::Paused,
            }
        }),
        ExecuteMsg::EnablePublicMinting {} => {
            update_config(deps, info, "enable_public_minting", |c| {
                c.sale_phase = SalePhase::PublicOpen
            })
        }
        ExecuteMsg::DisablePublicMinting {} => {
            update_config(deps, info, "disable_public_minting", |c| {
                if c.sale_phase == SalePhase::PublicOpen {
                    c.sale_phase = SalePhase::WhitelistOpen;
                }
            })
        }
        ExecuteMsg::ProposeOwner { new_owner } => execute_propose_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, info),
        ExecuteMsg::CancelOwnerTransfer {} => execute_cancel_owner_transfer(deps, info),
    }
}

// ─── Execute: Minting ───────────────────────────────────────────────────────

pub fn execute_dapp_mint(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    to: String,
    component_id: u32,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let config = CONFIG.load(deps.storage)?;
    assert_authorized_caller(&config, &info.sender)?;
    if !sale_active(&config.sale_phase) {
        return Err(ContractError::SaleNotActive);
    }
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount);
    }
    assert_valid_component(&config, component_id)?;

    let recipient = deps.api.addr_validate(&to)?;
    let balance = credit(deps.storage, &recipient, component_id, amount)?;

    Ok(Response::new()
        .add_attribute("action", "dapp_mint")
        .add_attribute("to", recipient.as_str())
        .add_attribute("component_id", component_id.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("balance", balance.to_string()))
}

pub fn execute_public_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    component_id: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.sale_phase != SalePhase::PublicOpen {
        return Err(ContractError::PublicSaleNotActive);
    }
    assert_valid_component(&config, component_id)?;
    assert_fighter_holder(deps.as_ref(), &config, &info.sender)?;
    check_payment(&info, &config.denom, config.component_price)?;

    let week = record_weekly_claim(deps.storage, &info.sender, env.block.time)?;
    credit(deps.storage, &info.sender, component_id, Uint128::one())?;

    Ok(Response::new()
        .add_attribute("action", "public_mint")
        .add_attribute("to", info.sender.as_str())
        .add_attribute("component_id", component_id.to_string())
        .add_attribute("week", week.to_string()))
}

// ─── Execute: Burning ───────────────────────────────────────────────────────

pub fn execute_burn_batch(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    from: String,
    component_ids: Vec<u32>,
    amounts: Vec<Uint128>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let config = CONFIG.load(deps.storage)?;
    assert_authorized_caller(&config, &info.sender)?;

    let from = deps.api.addr_validate(&from)?;
    let remaining = plan_burn(deps.storage, &config, &from, &component_ids, &amounts)?;
    for (id, balance) in remaining {
        BALANCES.save(deps.storage, (&from, id), &balance)?;
    }

    let ids = component_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let amounts = amounts
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(",");

    Ok(Response::new()
        .add_attribute("action", "burn_batch")
        .add_attribute("from", from.as_str())
        .add_attribute("component_ids", ids)
        .add_attribute("amounts", amounts))
}

// ─── Execute: Admin ─────────────────────────────────────────────────────────

fn update_config<F>(
    deps: DepsMut,
    info: MessageInfo,
    action: &str,
    apply: F,
) -> Result<Response, ContractError>
where
    F: FnOnce(&mut Config),
{
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    let config = CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        apply(&mut c);
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", action)
        .add_attribute("sale_phase", format!("{:?}", config.sale_phase)))
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
        QueryMsg::Balance {
            owner,
            component_id,
        } => query_balance(deps, owner, component_id),
        QueryMsg::BalanceOfBatch {
            owners,
            component_ids,
        } => query_balance_of_batch(deps, owners, component_ids),
        QueryMsg::Uri { component_id } => query_uri(deps, component_id),
        QueryMsg::LastPublicMintWeek { address } => query_last_public_mint_week(deps, address),
        QueryMsg::PendingOwner {} => to_json_binary(&PENDING_OWNER.may_load(deps.storage)?),
    }
}

pub fn query_balance(deps: Deps, owner: String, component_id: u32) -> StdResult<Binary> {
    let owner = deps.api.addr_validate(&owner)?;
    let balance = BALANCES
        .may_load(deps.storage, (&owner, component_id))?
        .unwrap_or_default();
    to_json_binary(&BalanceResponse { balance })
}

pub fn query_balance_of_batch(
    deps: Deps,
    owners: Vec<String>,
    component_ids: Vec<u32>,
) -> StdResult<Binary> {
    if owners.len() != component_ids.len() {
        return Err(StdError::generic_err(
            ContractError::LengthMismatch.to_string(),
        ));
    }
    let balances = owners
        .iter()
        .zip(component_ids)
        .map(|(owner, id)| -> StdResult<Uint128> {
            let owner = deps.api.addr_validate(owner)?;
            Ok(BALANCES
                .may_load(deps.storage, (&owner, id))?
                .unwrap_or_default())
        })
        .collect::<StdResult<Vec<_>>>()?;
    to_json_binary(&BalanceOfBatchResponse { balances })
}

/// Shared URI template; clients substitute the id.
pub fn query_uri(deps: Deps, component_id: u32) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    assert_valid_component(&config, component_id)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&UriResponse { uri: config.uri })
}

pub fn query_last_public_mint_week(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let week = LAST_PUBLIC_MINT_WEEK.may_load(deps.storage, &addr)?;
    to_json_binary(&LastPublicMintWeekResponse { week })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
