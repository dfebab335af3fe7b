use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Uint128};
use cw_storage_plus::{Item, Map};

/// Which mint paths a ledger currently accepts.
#[cw_serde]
pub enum SalePhase {
    Paused,
    WhitelistOpen,
    PublicOpen,
}

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// Builder contract allowed to mint gen-one fighters
    pub builder: Addr,
    /// Relay whose `Relay` messages execute on behalf of the signer
    pub trusted_forwarder: Option<Addr>,
    pub name: String,
    pub symbol: String,
    /// Native denomination accepted as payment
    pub denom: String,
    /// Price per token, applies to whitelist and public sales
    pub cost: Uint128,
    /// Max per whitelist mint
    pub max_mint_amount: u32,
    pub max_mint_amount_free: u32,
    pub max_mint_amount_public: u32,
    pub max_supply: u64,
    pub sale_phase: SalePhase,
    pub gen_one_started: bool,
    pub revealed: bool,
    pub uri_prefix: String,
    pub uri_suffix: String,
    pub hidden_metadata_uri: String,
    /// Merkle root of the paid allowlist; all zero until set
    pub paid_root: HexBinary,
    /// Merkle root of the free allowlist; all zero until set
    pub free_root: HexBinary,
}

#[cw_serde]
pub struct PendingOwnerTransfer {
    pub proposed_owner: Addr,
}

#[cw_serde]
pub struct TokenData {
    pub owner: Addr,
    /// Per-token URI, set only for gen-one fighters
    pub token_uri: Option<String>,
}

/// One-time sale paths tracked by the claim ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimKind {
    Whitelist,
    Free,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const PENDING_OWNER: Item<PendingOwnerTransfer> = Item::new("pending_owner");

/// Total minted; doubles as the last assigned token id
pub const TOKEN_COUNT: Item<u64> = Item::new("token_count");

pub const TOKENS: Map<u64, TokenData> = Map::new("fighter_tokens");

/// (owner, token_id) -> bool
pub const OWNER_TOKENS: Map<(&Addr, u64), bool> = Map::new("owner_tokens");

/// owner -> number of fighters held
pub const BALANCES: Map<&Addr, u64> = Map::new("balances");

pub const WHITELIST_CLAIMED: Map<&Addr, bool> = Map::new("whitelist_claimed");
pub const FREE_CLAIMED: Map<&Addr, bool> = Map::new("free_claimed");

pub const ZERO_ROOT: [u8; 32] = [0u8; 32];
