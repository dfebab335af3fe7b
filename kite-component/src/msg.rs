use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

use crate::state::SalePhase;

#[cw_serde]
pub struct InstantiateMsg {
    pub builder: String,
    pub fighter_contract: String,
    pub uri: String,
    pub name: String,
    pub denom: String,
    /// Price of one public mint
    pub component_price: Uint128,
    pub number_of_components: u32,
    pub trusted_forwarder: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Mint on behalf of a user (builder or owner)
    DappMint {
        to: String,
        component_id: u32,
        amount: Uint128,
    },
    /// One paid component per fighter holder per week
    PublicMint { component_id: u32 },
    /// Burn several components from `from` atomically (builder or owner)
    BurnBatch {
        from: String,
        component_ids: Vec<u32>,
        amounts: Vec<Uint128>,
    },

    Relay {
        signer: String,
        msg: Box<ExecuteMsg>,
    },

    SetComponentPrice { price: Uint128 },
    SetNumberOfComponents { count: u32 },
    SetUri { uri: String },
    SetName { name: String },
    SetBuilderContract { builder: String },
    SetFighterContract { fighter: String },
    SetTrustedForwarder { forwarder: Option<String> },
    SetSalePhase { phase: SalePhase },
    /// Paused <-> WhitelistOpen; PublicOpen -> Paused
    FlipSaleState {},
    EnablePublicMinting {},
    /// PublicOpen -> WhitelistOpen; other phases unchanged
    DisablePublicMinting {},

    ProposeOwner { new_owner: String },
    AcceptOwner {},
    CancelOwnerTransfer {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
    #[returns(BalanceResponse)]
    Balance { owner: String, component_id: u32 },
    /// Pairwise `owners[i]` / `component_ids[i]`
    #[returns(BalanceOfBatchResponse)]
    BalanceOfBatch {
        owners: Vec<String>,
        component_ids: Vec<u32>,
    },
    #[returns(UriResponse)]
    Uri { component_id: u32 },
    #[returns(LastPublicMintWeekResponse)]
    LastPublicMintWeek { address: String },
    #[returns(Option<crate::state::PendingOwnerTransfer>)]
    PendingOwner {},
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct BalanceOfBatchResponse {
    pub balances: Vec<Uint128>,
}

#[cw_serde]
pub struct UriResponse {
    pub uri: String,
}

#[cw_serde]
pub struct LastPublicMintWeekResponse {
    pub week: Option<u64>,
}

#[cw_serde]
pub struct MigrateMsg {}
