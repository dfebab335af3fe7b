use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, HexBinary, Uint128};

use crate::state::SalePhase;

#[cw_serde]
pub struct InstantiateMsg {
    /// Builder contract allowed to mint gen-one fighters
    pub builder: String,
    pub name: String,
    pub symbol: String,
    /// Native denomination accepted as payment
    pub denom: String,
    /// Price per token
    pub cost: Uint128,
    /// Max tokens per whitelist mint
    pub max_mint_amount: u32,
    /// Max tokens per free mint
    pub max_mint_amount_free: u32,
    pub max_supply: u64,
    /// Max tokens per public mint
    pub max_mint_amount_public: u32,
    /// Served for every token until the collection is revealed
    pub hidden_metadata_uri: String,
    pub trusted_forwarder: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Public sale mint, requires `PublicOpen`
    Mint { amount: u32 },
    /// Paid allowlist mint, one claim per address
    WhitelistMint {
        amount: u32,
        proof: Vec<HexBinary>,
    },
    /// Free allowlist mint, one claim per address
    FreeMint {
        amount: u32,
        proof: Vec<HexBinary>,
    },
    /// Crafted fighter with its own metadata URI (builder or owner)
    MintGenOne { to: String, uri: String },

    TransferNft { recipient: String, token_id: u64 },
    SendNft {
        contract: String,
        token_id: u64,
        msg: Binary,
    },

    /// Execute `msg` on behalf of `signer` (trusted forwarder only)
    Relay {
        signer: String,
        msg: Box<ExecuteMsg>,
    },

    // Owner-only configuration
    SetCost { cost: Uint128 },
    SetMaxMintAmount { amount: u32 },
    SetMaxMintAmountFree { amount: u32 },
    SetMaxMintAmountPublic { amount: u32 },
    SetUriPrefix { prefix: String },
    SetUriSuffix { suffix: String },
    SetHiddenMetadataUri { uri: String },
    SetRevealed { revealed: bool },
    SetMerkleRoot { root: HexBinary },
    SetMerkleRootFree { root: HexBinary },
    SetSalePhase { phase: SalePhase },
    /// `true` closes a running public sale, `false` opens the public sale
    SetPaused { paused: bool },
    /// `true` opens the whitelist sale, `false` closes a running whitelist sale
    SetWhitelistMintEnabled { enabled: bool },
    SetGenOneStarted { started: bool },
    SetBuilderContract { builder: String },
    SetTrustedForwarder { forwarder: Option<String> },

    ProposeOwner { new_owner: String },
    AcceptOwner {},
    CancelOwnerTransfer {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
    #[returns(NftInfoResponse)]
    NftInfo { token_id: u64 },
    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: u64 },
    #[returns(TokenUriResponse)]
    TokenUri { token_id: u64 },
    #[returns(TokensResponse)]
    Tokens {
        owner: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(BalanceResponse)]
    BalanceOf { owner: String },
    #[returns(NumTokensResponse)]
    NumTokens {},
    #[returns(ClaimStatusResponse)]
    ClaimStatus { address: String },
    #[returns(Option<crate::state::PendingOwnerTransfer>)]
    PendingOwner {},
}

#[cw_serde]
pub struct NftInfoResponse {
    pub token_id: u64,
    pub owner: String,
    pub token_uri: String,
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: String,
}

#[cw_serde]
pub struct TokenUriResponse {
    pub token_uri: String,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<u64>,
}

#[cw_serde]
pub struct BalanceResponse {
    pub count: u64,
}

#[cw_serde]
pub struct NumTokensResponse {
    pub count: u64,
}

#[cw_serde]
pub struct ClaimStatusResponse {
    pub whitelist_claimed: bool,
    pub free_claimed: bool,
}

#[cw_serde]
pub struct MigrateMsg {}
