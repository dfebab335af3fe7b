use cosmwasm_std::{Addr, Deps, MessageInfo, Storage, Uint128};

use crate::error::ContractError;
use crate::state::{
    ClaimKind, Config, SalePhase, CONFIG, FREE_CLAIMED, TOKEN_COUNT, WHITELIST_CLAIMED,
};

pub fn assert_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.owner {
        return Err(ContractError::NotOwner);
    }
    Ok(())
}

/// Builder contract or owner. Anyone else is rejected.
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

pub fn assert_public_sale(config: &Config) -> Result<(), ContractError> {
    match config.sale_phase {
        SalePhase::PublicOpen => Ok(()),
        _ => Err(ContractError::Paused),
    }
}

pub fn assert_whitelist_sale(config: &Config) -> Result<(), ContractError> {
    match config.sale_phase {
        SalePhase::WhitelistOpen => Ok(()),
        _ => Err(ContractError::WhitelistSaleNotEnabled),
    }
}

pub fn assert_free_mint_open(config: &Config) -> Result<(), ContractError> {
    match config.sale_phase {
        SalePhase::WhitelistOpen | SalePhase::PublicOpen => Ok(()),
        SalePhase::Paused => Err(ContractError::FreeMintNotEnabled),
    }
}

/// `0 < amount <= max` and the supply cap still holds after minting.
pub fn check_mint_amount(
    storage: &dyn Storage,
    config: &Config,
    amount: u32,
    max_per_tx: u32,
) -> Result<(), ContractError> {
    if amount == 0 || amount > max_per_tx {
        return Err(ContractError::InvalidMintAmount);
    }
    check_supply(storage, config, amount as u64)
}

pub fn check_supply(
    storage: &dyn Storage,
    config: &Config,
    requested: u64,
) -> Result<(), ContractError> {
    let minted = TOKEN_COUNT.load(storage)?;
    let total = minted.checked_add(requested).ok_or(ContractError::Overflow)?;
    if total > config.max_supply {
        return Err(ContractError::MaxSupplyExceeded {
            minted,
            requested,
            max_supply: config.max_supply,
        });
    }
    Ok(())
}

/// Sum of coins sent in `denom`; must cover `cost * amount`. Excess is kept.
pub fn check_payment(
    info: &MessageInfo,
    denom: &str,
    cost: Uint128,
    amount: u32,
) -> Result<(), ContractError> {
    let required = cost
        .checked_mul(Uint128::from(amount))
        .map_err(|_| ContractError::Overflow)?;
    let sent = info
        .funds
        .iter()
        .filter(|c| c.denom == denom)
        .try_fold(Uint128::zero(), |acc, c| acc.checked_add(c.amount))
        .map_err(|_| ContractError::Overflow)?;
    if sent < required {
        return Err(ContractError::InsufficientFunds {
            required: required.to_string(),
            sent: sent.to_string(),
        });
    }
    Ok(())
}

pub fn has_claimed(
    storage: &dyn Storage,
    addr: &Addr,
    kind: ClaimKind,
) -> Result<bool, ContractError> {
    let claimed = match kind {
        ClaimKind::Whitelist => WHITELIST_CLAIMED.may_load(storage, addr)?,
        ClaimKind::Free => FREE_CLAIMED.may_load(storage, addr)?,
    };
    Ok(claimed.unwrap_or(false))
}

/// Check-and-set in one step: a second claim of the same kind always fails.
pub fn record_claim(
    storage: &mut dyn Storage,
    addr: &Addr,
    kind: ClaimKind,
) -> Result<(), ContractError> {
    if has_claimed(storage, addr, kind)? {
        return Err(ContractError::AlreadyClaimed);
    }
    match kind {
        ClaimKind::Whitelist => WHITELIST_CLAIMED.save(storage, addr, &true)?,
        ClaimKind::Free => FREE_CLAIMED.save(storage, addr, &true)?,
    }
    Ok(())
}

pub fn validate_root_length(len: usize) -> Result<(), ContractError> {
    if len != 32 {
        return Err(ContractError::InvalidRootLength { length: len });
    }
    Ok(())
}

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}

/// Resolve the metadata URI for a token.
pub fn token_uri(config: &Config, token_id: u64, override_uri: Option<&str>) -> String {
    if let Some(uri) = override_uri {
        return uri.to_string();
    }
    if !config.revealed {
        return config.hidden_metadata_uri.clone();
    }
    format!("{}{}{}", config.uri_prefix, token_id, config.uri_suffix)
}
