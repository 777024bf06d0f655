//! Pool lifecycle error types.
//!
//! Every operation returns a typed error; nothing panics in non-test code.
//! Each variant carries a stable numeric code served to API callers - the
//! codes are part of the wire contract and must not be renumbered.

use axum::http::StatusCode;
use thiserror::Error;

use crate::ledger::TransferError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// 2001: Caller is not permitted to perform this operation
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    /// 4001: No pool with the given id
    #[error("pool not found")]
    PoolNotFound,

    /// 4002: Caller has no active membership in the pool
    #[error("not an active member of this pool")]
    NotMember,

    /// 1003: Caller already holds a membership index entry for the pool
    #[error("already a member of this pool")]
    AlreadyMember,

    /// 1001: Zero/invalid quantity, or a fee above the cap
    #[error("invalid amount")]
    InvalidAmount,

    /// 1004: Pool is not accepting joins (wrong status or at capacity)
    #[error("pool is not accepting joins")]
    PoolNotActive,

    /// 1005: Activation requires a fully funded pool
    #[error("pool is not funded")]
    PoolNotFunded,

    /// 1006: Pool has already been activated
    #[error("pool is already activated")]
    AlreadyActivated,

    /// 1002: Escrow cannot cover the requested debit
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Ledger Port rejected the value transfer; no state was mutated
    #[error("ledger transfer failed: {0}")]
    Ledger(#[from] TransferError),
}

impl PoolError {
    /// Stable numeric error code (wire contract).
    pub fn code(&self) -> i32 {
        match self {
            PoolError::InvalidAmount => 1001,
            PoolError::InsufficientFunds => 1002,
            PoolError::AlreadyMember => 1003,
            PoolError::PoolNotActive => 1004,
            PoolError::PoolNotFunded => 1005,
            PoolError::AlreadyActivated => 1006,
            PoolError::Unauthorized => 2001,
            PoolError::PoolNotFound => 4001,
            PoolError::NotMember => 4002,
            PoolError::Ledger(TransferError::InsufficientFunds) => 1002,
            PoolError::Ledger(_) => 5000,
        }
    }

    /// Error name string (SCREAMING_CASE, mirrors the code table).
    pub fn name(&self) -> &'static str {
        match self {
            PoolError::InvalidAmount => "INVALID_AMOUNT",
            PoolError::InsufficientFunds => "INSUFFICIENT_FUNDS",
            PoolError::AlreadyMember => "ALREADY_MEMBER",
            PoolError::PoolNotActive => "POOL_NOT_ACTIVE",
            PoolError::PoolNotFunded => "POOL_NOT_FUNDED",
            PoolError::AlreadyActivated => "ALREADY_ACTIVATED",
            PoolError::Unauthorized => "UNAUTHORIZED",
            PoolError::PoolNotFound => "POOL_NOT_FOUND",
            PoolError::NotMember => "NOT_MEMBER",
            PoolError::Ledger(TransferError::InsufficientFunds) => "INSUFFICIENT_FUNDS",
            PoolError::Ledger(_) => "LEDGER_ERROR",
        }
    }

    /// HTTP status for the gateway layer.
    pub fn http_status(&self) -> StatusCode {
        match self {
            PoolError::InvalidAmount
            | PoolError::InsufficientFunds
            | PoolError::Ledger(TransferError::InsufficientFunds) => StatusCode::BAD_REQUEST,
            PoolError::AlreadyMember
            | PoolError::PoolNotActive
            | PoolError::PoolNotFunded
            | PoolError::AlreadyActivated => StatusCode::CONFLICT,
            PoolError::Unauthorized => StatusCode::FORBIDDEN,
            PoolError::PoolNotFound | PoolError::NotMember => StatusCode::NOT_FOUND,
            PoolError::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(PoolError::InvalidAmount.code(), 1001);
        assert_eq!(PoolError::InsufficientFunds.code(), 1002);
        assert_eq!(PoolError::AlreadyMember.code(), 1003);
        assert_eq!(PoolError::PoolNotActive.code(), 1004);
        assert_eq!(PoolError::PoolNotFunded.code(), 1005);
        assert_eq!(PoolError::AlreadyActivated.code(), 1006);
        assert_eq!(PoolError::Unauthorized.code(), 2001);
        assert_eq!(PoolError::PoolNotFound.code(), 4001);
        assert_eq!(PoolError::NotMember.code(), 4002);
    }

    #[test]
    fn test_ledger_insufficient_maps_to_client_code() {
        let err = PoolError::Ledger(TransferError::InsufficientFunds);
        assert_eq!(err.code(), 1002);
        assert_eq!(err.name(), "INSUFFICIENT_FUNDS");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(PoolError::Unauthorized.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(PoolError::PoolNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(PoolError::AlreadyMember.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            PoolError::Ledger(TransferError::BalanceOverflow).http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
