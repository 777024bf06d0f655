//! Authorization Guard - role checks applied per operation.
//!
//! Two roles exist: the platform owner (global admin) and a pool's
//! creator (pool admin). Callers are identified by account id; identity
//! verification is outside this engine.

use crate::core_types::AccountId;
use crate::error::PoolError;

/// Owner-only operations (fee administration, emergency withdraw).
pub fn ensure_owner(caller: AccountId, owner: AccountId) -> Result<(), PoolError> {
    if caller != owner {
        return Err(PoolError::Unauthorized);
    }
    Ok(())
}

/// Pool-admin operations (activate, cancel): creator or owner.
pub fn ensure_pool_admin(
    caller: AccountId,
    creator: AccountId,
    owner: AccountId,
) -> Result<(), PoolError> {
    if caller != creator && caller != owner {
        return Err(PoolError::Unauthorized);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_owner() {
        assert!(ensure_owner(1, 1).is_ok());
        assert_eq!(ensure_owner(2, 1), Err(PoolError::Unauthorized));
    }

    #[test]
    fn test_ensure_pool_admin_accepts_creator_and_owner() {
        assert!(ensure_pool_admin(10, 10, 1).is_ok());
        assert!(ensure_pool_admin(1, 10, 1).is_ok());
        assert_eq!(ensure_pool_admin(99, 10, 1), Err(PoolError::Unauthorized));
    }
}
