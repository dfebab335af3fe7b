use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    pub fighter_contract: String,
    pub component_contract: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Burn `to`'s components and mint them a gen-one fighter, all or nothing
    BuildKite {
        component_ids: Vec<u32>,
        amounts: Vec<Uint128>,
        to: String,
        uri: String,
    },
    MintComponent {
        to: String,
        component_id: u32,
        amount: Uint128,
    },

    SetContractAddresses { fighter: String, component: String },
    SetAdmin { admin: String },

    ProposeOwner { new_owner: String },
    AcceptOwner {},
    CancelOwnerTransfer {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
    #[returns(Option<crate::state::PendingOwnerTransfer>)]
    PendingOwner {},
}

#[cw_serde]
pub struct MigrateMsg {}
