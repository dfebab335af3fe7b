pub mod allowlist;
pub mod contract;
pub mod error;
pub mod helpers;
pub mod msg;
pub mod state;
