use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// Only address allowed to build kites and mint components
    pub admin: Addr,
    pub fighter_contract: Addr,
    pub component_contract: Addr,
}

#[cw_serde]
pub struct PendingOwnerTransfer {
    pub proposed_owner: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const PENDING_OWNER: Item<PendingOwnerTransfer> = Item::new("pending_owner");
