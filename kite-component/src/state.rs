use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

pub use kite_fighter::state::SalePhase;

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// Builder contract allowed to mint and burn on behalf of users
    pub builder: Addr,
    /// Fighter contract; holders may use the weekly public mint
    pub fighter_contract: Addr,
    pub trusted_forwarder: Option<Addr>,
    pub name: String,
    /// Metadata URI template shared by every component id
    pub uri: String,
    pub denom: String,
    pub component_price: Uint128,
    /// Valid ids are `0..number_of_components`
    pub number_of_components: u32,
    pub sale_phase: SalePhase,
}

#[cw_serde]
pub struct PendingOwnerTransfer {
    pub proposed_owner: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const PENDING_OWNER: Item<PendingOwnerTransfer> = Item::new("pending_owner");

/// (holder, component_id) -> balance
pub const BALANCES: Map<(&Addr, u32), Uint128> = Map::new("component_balances");

/// holder -> week index of their last public mint
pub const LAST_PUBLIC_MINT_WEEK: Map<&Addr, u64> = Map::new("last_public_mint_week");

pub const SECONDS_PER_WEEK: u64 = 604_800;
