use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("caller is not the owner")]
    NotOwner,

    #[error("only admin can build a kite, nice try")]
    NotAdmin,

    #[error("gen 1 can not mint yet")]
    GenOneNotStarted,

    #[error("sale must be active to mint")]
    SaleNotActive,

    #[error("amount must be a number larger than 0")]
    InvalidAmount,

    #[error("no owner transfer pending")]
    NoOwnerTransferPending,

    #[error("caller is not the pending owner")]
    NotPendingOwner,

    #[error("owner transfer already pending")]
    OwnerTransferAlreadyPending,

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,
}
