use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("Invalid state: {reason}")]
    InvalidState { reason: String },

    #[error("External transfer failed: {reason}")]
    ExternalTransferFailed { reason: String },

    #[error("Amount must be greater than 0")]
    InvalidZeroAmount {},

    #[error("Duration of {duration} seconds overflows the loan expiration")]
    InvalidDuration { duration: u64 },
}

impl ContractError {
    pub fn unauthorized(reason: &str) -> Self {
        ContractError::Unauthorized {
            reason: reason.to_string(),
        }
    }

    pub fn invalid_state(reason: &str) -> Self {
        ContractError::InvalidState {
            reason: reason.to_string(),
        }
    }

    pub fn transfer_failed(reason: impl Into<String>) -> Self {
        ContractError::ExternalTransferFailed {
            reason: reason.into(),
        }
    }
}
