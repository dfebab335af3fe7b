use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("caller is not the owner")]
    NotOwner,

    #[error("caller is not authorized to make the call")]
    Unauthorized,

    #[error("caller is not the trusted forwarder")]
    NotTrustedForwarder,

    #[error("relayed message cannot be relayed again")]
    NestedRelay,

    #[error("the contract is paused")]
    Paused,

    #[error("the whitelist sale is not enabled")]
    WhitelistSaleNotEnabled,

    #[error("free mint is not enabled")]
    FreeMintNotEnabled,

    #[error("gen 1 can not mint yet")]
    GenOneNotStarted,

    #[error("invalid mint amount")]
    InvalidMintAmount,

    #[error("max supply exceeded: {minted} minted, {requested} requested, max {max_supply}")]
    MaxSupplyExceeded {
        minted: u64,
        requested: u64,
        max_supply: u64,
    },

    #[error("insufficient funds: required {required}, sent {sent}")]
    InsufficientFunds { required: String, sent: String },

    #[error("address already claimed")]
    AlreadyClaimed,

    #[error("invalid proof")]
    InvalidProof,

    #[error("invalid merkle root length: {length} bytes (expected 32)")]
    InvalidRootLength { length: usize },

    #[error("token not found: {token_id}")]
    TokenNotFound { token_id: u64 },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("overflow in arithmetic operation")]
    Overflow,

    #[error("no owner transfer pending")]
    NoOwnerTransferPending,

    #[error("caller is not the pending owner")]
    NotPendingOwner,

    #[error("owner transfer already pending")]
    OwnerTransferAlreadyPending,

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,
}
