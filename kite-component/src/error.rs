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

    #[error("sale must be active to mint")]
    SaleNotActive,

    #[error("public sale must be active to mint")]
    PublicSaleNotActive,

    #[error("address must own a kite fighter")]
    NotFighterHolder,

    #[error("insufficient funds: required {required}, sent {sent}")]
    InsufficientFunds { required: String, sent: String },

    #[error("address already minted a component this week")]
    AlreadyMintedThisWeek,

    #[error("amount must be a number larger than 0")]
    InvalidAmount,

    #[error("invalid component id {component_id}: only {max} components exist")]
    InvalidComponent { component_id: u32, max: u32 },

    #[error("burn batch did not pass: {reason}")]
    BurnBatchFailed { reason: String },

    #[error("component ids and amounts length mismatch")]
    LengthMismatch,

    #[error("batch must not be empty")]
    EmptyBatch,

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
