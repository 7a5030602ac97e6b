pub mod assets;
pub mod claim_right;
pub mod contract;
mod error;
pub mod events;
pub mod msg;
pub mod state;


pub use crate::error::ContractError;
