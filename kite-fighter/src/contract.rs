use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, HexBinary, MessageInfo, Order,
    Response, StdResult, Storage, WasmMsg,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::allowlist::is_allowlisted;
use crate::error::ContractError;
use crate::helpers::{
    assert_authorized_caller, assert_free_mint_open, assert_owner, assert_public_sale,
    assert_trusted_forwarder, assert_whitelist_sale, check_mint_amount, check_payment,
    check_supply, has_claimed, record_claim, reject_funds, token_uri, validate_root_length,
};
use crate::msg::*;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:kite-fighter";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_QUERY_LIMIT: u32 = 30;
const MAX_QUERY_LIMIT: u32 = 100;
const DEFAULT_URI_SUFFIX: &str = ".json";

// ─── Instantiate ────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.max_supply == 0 {
        return Err(ContractError::InvalidConfig {
            reason: "max_supply must be greater than 0".to_string(),
        });
    }
    if msg.max_mint_amount == 0 || msg.max_mint_amount_free == 0 || msg.max_mint_amount_public == 0
    {
        return Err(ContractError::InvalidConfig {
            reason: "max mint amounts must be greater than 0".to_string(),
        });
    }
    if msg.denom.is_empty() {
        return Err(ContractError::InvalidConfig {
            reason: "denom must not be empty".to_string(),
        });
    }

    let builder = deps.api.addr_validate(&msg.builder)?;
    let trusted_forwarder = msg
        .trusted_forwarder
        .map(|f| deps.api.addr_validate(&f))
        .transpose()?;

    let config = Config {
        owner: info.sender,
        builder,
        trusted_forwarder,
        name: msg.name,
        symbol: msg.symbol,
        denom: msg.denom,
        cost: msg.cost,
        max_mint_amount: msg.max_mint_amount,
        max_mint_amount_free: msg.max_mint_amount_free,
        max_mint_amount_public: msg.max_mint_amount_public,
        max_supply: msg.max_supply,
        sale_phase: SalePhase::Paused,
        gen_one_started: false,
        revealed: false,
        uri_prefix: msg.hidden_metadata_uri.clone(),
        uri_suffix: DEFAULT_URI_SUFFIX.to_string(),
        hidden_metadata_uri: msg.hidden_metadata_uri,
        paid_root: HexBinary::from(ZERO_ROOT.to_vec()),
        free_root: HexBinary::from(ZERO_ROOT.to_vec()),
    };
    CONFIG.save(deps.storage, &config)?;
    TOKEN_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("owner", config.owner.as_str())
        .add_attribute("builder", config.builder.as_str()))
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
        ExecuteMsg::Relay { signer, msg } => execute_relay(deps, env, info, signer, *msg),
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
        ExecuteMsg::Mint { amount } => execute_mint(deps, env, info, amount),
        ExecuteMsg::WhitelistMint { amount, proof } => {
            execute_whitelist_mint(deps, env, info, amount, proof)
        }
        ExecuteMsg::FreeMint { amount, proof } => {
            execute_free_mint(deps, env, info, amount, proof)
        }
        ExecuteMsg::MintGenOne { to, uri } => execute_mint_gen_one(deps, env, info, to, uri),
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => execute_transfer_nft(deps, env, info, recipient, token_id),
        ExecuteMsg::SendNft {
            contract,
            token_id,
            msg,
        } => execute_send_nft(deps, env, info, contract, token_id, msg),
        ExecuteMsg::Relay { .. } => Err(ContractError::NestedRelay),
        ExecuteMsg::SetCost { cost } => update_config(deps, info, "set_cost", |c| {
            c.cost = cost;
            Ok(())
        }),
        ExecuteMsg::SetMaxMintAmount { amount } => {
            update_config(deps, info, "set_max_mint_amount", |c| {
                c.max_mint_amount = amount;
                Ok(())
            })
        }
        ExecuteMsg::SetMaxMintAmountFree { amount } => {
            update_config(deps, info, "set_max_mint_amount_free", |c| {
                c.max_mint_amount_free = amount;
                Ok(())
            })
        }
        ExecuteMsg::SetMaxMintAmountPublic { amount } => {
            update_config(deps, info, "set_max_mint_amount_public", |c| {
                c.max_mint_amount_public = amount;
                Ok(())
            })
        }
        ExecuteMsg::SetUriPrefix { prefix } => update_config(deps, info, "set_uri_prefix", |c| {
            c.uri_prefix = prefix;
            Ok(())
        }),
        ExecuteMsg::SetUriSuffix { suffix } => update_config(deps, info, "set_uri_suffix", |c| {
            c.uri_suffix = suffix;
            Ok(())
        }),
        ExecuteMsg::SetHiddenMetadataUri { uri } => {
            update_config(deps, info, "set_hidden_metadata_uri", |c| {
                c.hidden_metadata_uri = uri;
                Ok(())
            })
        }
        ExecuteMsg::SetRevealed { revealed } => update_config(deps, info, "set_revealed", |c| {
            c.revealed = revealed;
            Ok(())
        }),
        ExecuteMsg::SetMerkleRoot { root } => update_config(deps, info, "set_merkle_root", |c| {
            validate_root_length(root.len())?;
            c.paid_root = root;
            Ok(())
        }),
        ExecuteMsg::SetMerkleRootFree { root } => {
            update_config(deps, info, "set_merkle_root_free", |c| {
                validate_root_length(root.len())?;
                c.free_root = root;
                Ok(())
            })
        }
        ExecuteMsg::SetSalePhase { phase } => execute_set_sale_phase(deps, info, phase),
        ExecuteMsg::SetPaused { paused } => {
            let current = CONFIG.load(deps.storage)?.sale_phase;
            let phase = match (paused, current) {
                (true, SalePhase::PublicOpen) => SalePhase::Paused,
                (true, other) => other,
                (false, _) => SalePhase::PublicOpen,
            };
            execute_set_sale_phase(deps, info, phase)
        }
        ExecuteMsg::SetWhitelistMintEnabled { enabled } => {
            let current = CONFIG.load(deps.storage)?.sale_phase;
            let phase = match (enabled, current) {
                (true, _) => SalePhase::WhitelistOpen,
                (false, SalePhase::WhitelistOpen) => SalePhase::Paused,
                (false, other) => other,
            };
            execute_set_sale_phase(deps, info, phase)
        }
        ExecuteMsg::SetGenOneStarted { started } => {
            update_config(deps, info, "set_gen_one_started", |c| {
                c.gen_one_started = started;
                Ok(())
            })
        }
        ExecuteMsg::SetBuilderContract { builder } => {
            let builder = deps.api.addr_validate(&builder)?;
            update_config(deps, info, "set_builder_contract", |c| {
                c.builder = builder;
                Ok(())
            })
        }
        ExecuteMsg::SetTrustedForwarder { forwarder } => {
            let forwarder = forwarder
                .map(|f| deps.api.addr_validate(&f))
                .transpose()?;
            update_config(deps, info, "set_trusted_forwarder", |c| {
                c.trusted_forwarder = forwarder;
                Ok(())
            })
        }
        ExecuteMsg::ProposeOwner { new_owner } => {
            execute_propose_owner(deps, env, info, new_owner)
        }
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, env, info),
        ExecuteMsg::CancelOwnerTransfer {} => execute_cancel_owner_transfer(deps, env, info),
    }
}

// ─── Execute: Relay ─────────────────────────────────────────────────────────

/// Meta-transaction: the trusted forwarder submits `msg` signed by `signer`.
pub fn execute_relay(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    signer: String,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    assert_trusted_forwarder(deps.as_ref(), &info.sender)?;
    let signer = deps.api.addr_validate(&signer)?;
    let forwarder = info.sender.clone();

    let mut relayed = info;
    relayed.sender = signer;
    let res = dispatch(deps, env, relayed, msg)?;
    Ok(res.add_attribute("relayed_by", forwarder.as_str()))
}

// ─── Execute: Minting ───────────────────────────────────────────────────────

pub fn execute_mint(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    amount: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_public_sale(&config)?;
    check_mint_amount(deps.storage, &config, amount, config.max_mint_amount_public)?;
    check_payment(&info, &config.denom, config.cost, amount)?;

    let (first, last) = mint_many(deps.storage, &info.sender, amount)?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("to", info.sender.as_str())
        .add_attribute("amount", amount.to_string())
        .add_attribute("first_token_id", first.to_string())
        .add_attribute("last_token_id", last.to_string()))
}

pub fn execute_whitelist_mint(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    amount: u32,
    proof: Vec<HexBinary>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_whitelist_sale(&config)?;
    check_mint_amount(deps.storage, &config, amount, config.max_mint_amount)?;
    check_payment(&info, &config.denom, config.cost, amount)?;

    if has_claimed(deps.storage, &info.sender, ClaimKind::Whitelist)? {
        return Err(ContractError::AlreadyClaimed);
    }
    if !is_allowlisted(&config.paid_root, &proof, &info.sender) {
        return Err(ContractError::InvalidProof);
    }
    record_claim(deps.storage, &info.sender, ClaimKind::Whitelist)?;

    let (first, last) = mint_many(deps.storage, &info.sender, amount)?;

    Ok(Response::new()
        .add_attribute("action", "whitelist_mint")
        .add_attribute("to", info.sender.as_str())
        .add_attribute("amount", amount.to_string())
        .add_attribute("first_token_id", first.to_string())
        .add_attribute("last_token_id", last.to_string()))
}

pub fn execute_free_mint(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    amount: u32,
    proof: Vec<HexBinary>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let config = CONFIG.load(deps.storage)?;
    assert_free_mint_open(&config)?;
    check_mint_amount(deps.storage, &config, amount, config.max_mint_amount_free)?;

    if has_claimed(deps.storage, &info.sender, ClaimKind::Free)? {
        return Err(ContractError::AlreadyClaimed);
    }
    if !is_allowlisted(&config.free_root, &proof, &info.sender) {
        return Err(ContractError::InvalidProof);
    }
    record_claim(deps.storage, &info.sender, ClaimKind::Free)?;

    let (first, last) = mint_many(deps.storage, &info.sender, amount)?;

    Ok(Response::new()
        .add_attribute("action", "free_mint")
        .add_attribute("to", info.sender.as_str())
        .add_attribute("amount", amount.to_string())
        .add_attribute("first_token_id", first.to_string())
        .add_attribute("last_token_id", last.to_string()))
}

pub fn execute_mint_gen_one(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    to: String,
    uri: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let config = CONFIG.load(deps.storage)?;
    assert_authorized_caller(&config, &info.sender)?;
    if !config.gen_one_started {
        return Err(ContractError::GenOneNotStarted);
    }
    check_supply(deps.storage, &config, 1)?;

    let recipient = deps.api.addr_validate(&to)?;
    let token_id = mint_single(deps.storage, &recipient, Some(uri.clone()))?;

    Ok(Response::new()
        .add_attribute("action", "mint_gen_one")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("to", recipient.as_str())
        .add_attribute("uri", uri))
}

fn mint_many(
    storage: &mut dyn Storage,
    recipient: &Addr,
    amount: u32,
) -> Result<(u64, u64), ContractError> {
    let mut first = 0;
    let mut last = 0;
    for i in 0..amount {
        last = mint_single(storage, recipient, None)?;
        if i == 0 {
            first = last;
        }
    }
    Ok((first, last))
}

/// Assign the next token id to `recipient`. Ids are never reused.
fn mint_single(
    storage: &mut dyn Storage,
    recipient: &Addr,
    token_uri: Option<String>,
) -> Result<u64, ContractError> {
    let count = TOKEN_COUNT
        .load(storage)?
        .checked_add(1)
        .ok_or(ContractError::Overflow)?;

    TOKENS.save(
        storage,
        count,
        &TokenData {
            owner: recipient.clone(),
            token_uri,
        },
    )?;
    OWNER_TOKENS.save(storage, (recipient, count), &true)?;
    BALANCES.update(storage, recipient, |b| -> StdResult<_> {
        Ok(b.unwrap_or_default() + 1)
    })?;
    TOKEN_COUNT.save(storage, &count)?;

    Ok(count)
}

// ─── Execute: Transfers ─────────────────────────────────────────────────────

pub fn execute_transfer_nft(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipient: String,
    token_id: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let new_owner = deps.api.addr_validate(&recipient)?;
    let old_owner = transfer(deps.storage, &info.sender, &new_owner, token_id)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_nft")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("from", old_owner.as_str())
        .add_attribute("to", new_owner.as_str()))
}

pub fn execute_send_nft(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    contract: String,
    token_id: u64,
    msg: Binary,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let contract_addr = deps.api.addr_validate(&contract)?;
    let old_owner = transfer(deps.storage, &info.sender, &contract_addr, token_id)?;

    let callback = cw721::receiver::Cw721ReceiveMsg {
        sender: info.sender.to_string(),
        token_id: token_id.to_string(),
        msg,
    };
    let callback_msg = WasmMsg::Execute {
        contract_addr: contract_addr.to_string(),
        msg: to_json_binary(&callback)?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(callback_msg)
        .add_attribute("action", "send_nft")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("from", old_owner.as_str())
        .add_attribute("to", contract_addr.as_str()))
}

fn transfer(
    storage: &mut dyn Storage,
    sender: &Addr,
    new_owner: &Addr,
    token_id: u64,
) -> Result<Addr, ContractError> {
    let mut token = TOKENS
        .may_load(storage, token_id)?
        .ok_or(ContractError::TokenNotFound { token_id })?;
    if token.owner != *sender {
        return Err(ContractError::Unauthorized);
    }
    let old_owner = token.owner.clone();

    OWNER_TOKENS.remove(storage, (&old_owner, token_id));
    OWNER_TOKENS.save(storage, (new_owner, token_id), &true)?;
    BALANCES.update(storage, &old_owner, |b| -> StdResult<_> {
        Ok(b.unwrap_or_default().saturating_sub(1))
    })?;
    BALANCES.update(storage, new_owner, |b| -> StdResult<_> {
        Ok(b.unwrap_or_default() + 1)
    })?;

    token.owner = new_owner.clone();
    TOKENS.save(storage, token_id, &token)?;

    Ok(old_owner)
}

// ─── Execute: Admin ─────────────────────────────────────────────────────────

/// Owner-gated config mutation: load, apply, validate, save a new snapshot.
fn update_config<F>(
    deps: DepsMut,
    info: MessageInfo,
    action: &str,
    apply: F,
) -> Result<Response, ContractError>
where
    F: FnOnce(&mut Config) -> Result<(), ContractError>,
{
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    apply(&mut config)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", action))
}

pub fn execute_set_sale_phase(
    deps: DepsMut,
    info: MessageInfo,
    phase: SalePhase,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.sale_phase = phase.clone();
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", "set_sale_phase")
        .add_attribute("phase", format!("{:?}", phase)))
}

pub fn execute_propose_owner(
    deps: DepsMut,
    _env: Env,
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

pub fn execute_accept_owner(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
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
    _env: Env,
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
        QueryMsg::Config {} => query_config(deps),
        QueryMsg::NftInfo { token_id } => query_nft_info(deps, token_id),
        QueryMsg::OwnerOf { token_id } => query_owner_of(deps, token_id),
        QueryMsg::TokenUri { token_id } => query_token_uri(deps, token_id),
        QueryMsg::Tokens {
            owner,
            start_after,
            limit,
        } => query_tokens(deps, owner, start_after, limit),
        QueryMsg::BalanceOf { owner } => query_balance_of(deps, owner),
        QueryMsg::NumTokens {} => query_num_tokens(deps),
        QueryMsg::ClaimStatus { address } => query_claim_status(deps, address),
        QueryMsg::PendingOwner {} => query_pending_owner(deps),
    }
}

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&CONFIG.load(deps.storage)?)
}

pub fn query_nft_info(deps: Deps, token_id: u64) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let token = TOKENS.load(deps.storage, token_id)?;
    to_json_binary(&NftInfoResponse {
        token_id,
        owner: token.owner.to_string(),
        token_uri: token_uri(&config, token_id, token.token_uri.as_deref()),
    })
}

pub fn query_owner_of(deps: Deps, token_id: u64) -> StdResult<Binary> {
    let token = TOKENS.load(deps.storage, token_id)?;
    to_json_binary(&OwnerOfResponse {
        owner: token.owner.to_string(),
    })
}

pub fn query_token_uri(deps: Deps, token_id: u64) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let token = TOKENS.may_load(deps.storage, token_id)?.ok_or_else(|| {
        cosmwasm_std::StdError::generic_err(
            ContractError::TokenNotFound { token_id }.to_string(),
        )
    })?;
    to_json_binary(&TokenUriResponse {
        token_uri: token_uri(&config, token_id, token.token_uri.as_deref()),
    })
}

pub fn query_tokens(
    deps: Deps,
    owner: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let owner_addr = deps.api.addr_validate(&owner)?;
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let tokens: Vec<u64> = OWNER_TOKENS
        .prefix(&owner_addr)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&TokensResponse { tokens })
}

pub fn query_balance_of(deps: Deps, owner: String) -> StdResult<Binary> {
    let owner_addr = deps.api.addr_validate(&owner)?;
    let count = BALANCES
        .may_load(deps.storage, &owner_addr)?
        .unwrap_or_default();
    to_json_binary(&BalanceResponse { count })
}

pub fn query_num_tokens(deps: Deps) -> StdResult<Binary> {
    let count = TOKEN_COUNT.load(deps.storage)?;
    to_json_binary(&NumTokensResponse { count })
}

pub fn query_claim_status(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let whitelist_claimed = WHITELIST_CLAIMED
        .may_load(deps.storage, &addr)?
        .unwrap_or(false);
    let free_claimed = FREE_CLAIMED.may_load(deps.storage, &addr)?.unwrap_or(false);
    to_json_binary(&ClaimStatusResponse {
        whitelist_claimed,
        free_claimed,
    })
}

pub fn query_pending_owner(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&PENDING_OWNER.may_load(deps.storage)?)
}

// ─── Migrate ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}

