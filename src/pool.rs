//! Pool record and lifecycle states.
//!
//! `PoolStatus` is the finite-state machine gating every mutating
//! operation. Status IDs are stable numeric values for storage and
//! API compatibility.
//!
//! The `Pool` record enforces its own invariants through private fields:
//! all mutation goes through validated methods, checked arithmetic only.

use std::fmt;

use crate::core_types::{AccountId, Amount, PoolId, Ticks};
use crate::error::PoolError;

/// Sentinel for "service not started yet".
pub const SERVICE_START_UNSET: Ticks = 0;

/// Pool lifecycle states
///
/// ```text
/// Active --join reaches capacity--> Funded --activate--> Activated (terminal)
///   ^                                 |
///   +-------- member leaves ----------+
/// Active/Funded --cancel--> Cancelled
/// ```
///
/// `Activated` and `Cancelled` are terminal for forward progress. One
/// deliberate quirk survives from the original platform: a member leaving
/// a non-activated pool forces the status back to `Active`, even from
/// `Cancelled` (see `Pool::release_one`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum PoolStatus {
    /// Accepting joins
    Active = 0,

    /// Capacity reached, awaiting activation
    Funded = 10,

    /// Terminal: funds disbursed, service running
    Activated = 20,

    /// Terminal: no further joins; members reclaim via leave
    Cancelled = -10,
}

impl PoolStatus {
    /// Check if this is a terminal state for forward progress
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, PoolStatus::Activated | PoolStatus::Cancelled)
    }

    /// Only `Active` pools admit new participants
    #[inline]
    pub fn accepts_joins(&self) -> bool {
        matches!(self, PoolStatus::Active)
    }

    /// Get the numeric status ID for storage
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// Convert from a numeric status ID
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(PoolStatus::Active),
            10 => Some(PoolStatus::Funded),
            20 => Some(PoolStatus::Activated),
            -10 => Some(PoolStatus::Cancelled),
            _ => None,
        }
    }

    /// Get human-readable status name
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolStatus::Active => "ACTIVE",
            PoolStatus::Funded => "FUNDED",
            PoolStatus::Activated => "ACTIVATED",
            PoolStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i16> for PoolStatus {
    type Error = ();

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        PoolStatus::from_id(value).ok_or(())
    }
}

/// One subscription-sharing arrangement.
///
/// # Invariants (enforced by private fields):
/// - `current_participants <= max_participants` always
/// - while status != Activated, `escrow_balance` equals the sum of
///   `amount_paid` over active participants (emergency_withdraw is the
///   one trusted override that breaks this)
/// - `cost_per_participant * max_participants <= total_cost`
#[derive(Debug, Clone)]
pub struct Pool {
    id: PoolId,
    creator: AccountId,
    provider: AccountId,
    total_cost: Amount,
    cost_per_participant: Amount,
    max_participants: u32,
    current_participants: u32,
    status: PoolStatus,
    created_at: Ticks,
    duration: Ticks,
    service_start: Ticks,
    escrow_balance: Amount,
}

impl Pool {
    /// Build a new pool record. Inputs are validated by the registry;
    /// the per-seat cost is the truncating split of `total_cost` - the
    /// remainder is never collected (accepted rounding loss).
    pub fn new(
        id: PoolId,
        creator: AccountId,
        provider: AccountId,
        total_cost: Amount,
        max_participants: u32,
        duration: Ticks,
        created_at: Ticks,
    ) -> Self {
        Self {
            id,
            creator,
            provider,
            total_cost,
            cost_per_participant: total_cost / max_participants as Amount,
            max_participants,
            current_participants: 0,
            status: PoolStatus::Active,
            created_at,
            duration,
            service_start: SERVICE_START_UNSET,
            escrow_balance: 0,
        }
    }

    // ============================================================
    // READ-ONLY GETTERS
    // ============================================================

    #[inline(always)]
    pub fn id(&self) -> PoolId {
        self.id
    }

    #[inline(always)]
    pub fn creator(&self) -> AccountId {
        self.creator
    }

    #[inline(always)]
    pub fn provider(&self) -> AccountId {
        self.provider
    }

    #[inline(always)]
    pub fn total_cost(&self) -> Amount {
        self.total_cost
    }

    #[inline(always)]
    pub fn cost_per_participant(&self) -> Amount {
        self.cost_per_participant
    }

    #[inline(always)]
    pub fn max_participants(&self) -> u32 {
        self.max_participants
    }

    #[inline(always)]
    pub fn current_participants(&self) -> u32 {
        self.current_participants
    }

    #[inline(always)]
    pub fn status(&self) -> PoolStatus {
        self.status
    }

    #[inline(always)]
    pub fn created_at(&self) -> Ticks {
        self.created_at
    }

    #[inline(always)]
    pub fn duration(&self) -> Ticks {
        self.duration
    }

    #[inline(always)]
    pub fn service_start(&self) -> Ticks {
        self.service_start
    }

    #[inline(always)]
    pub fn escrow_balance(&self) -> Amount {
        self.escrow_balance
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.current_participants >= self.max_participants
    }

    /// Whether a credit of `amount` would stay within u64
    #[inline]
    pub fn can_credit_escrow(&self, amount: Amount) -> bool {
        self.escrow_balance.checked_add(amount).is_some()
    }

    // ============================================================
    // VALIDATED MUTATIONS
    // ============================================================

    /// Credit the pool's held balance after a successful transfer-in.
    pub fn credit_escrow(&mut self, amount: Amount) -> Result<(), PoolError> {
        self.escrow_balance = self
            .escrow_balance
            .checked_add(amount)
            .ok_or(PoolError::InvalidAmount)?;
        Ok(())
    }

    /// Debit the pool's held balance for a refund transfer-out.
    ///
    /// Fails with `InvalidAmount` if the escrow cannot cover the debit -
    /// should not occur while invariants hold, but is checked anyway.
    pub fn debit_escrow(&mut self, amount: Amount) -> Result<(), PoolError> {
        self.escrow_balance = self
            .escrow_balance
            .checked_sub(amount)
            .ok_or(PoolError::InvalidAmount)?;
        Ok(())
    }

    /// Count one admitted participant; promotes to `Funded` at capacity.
    pub fn admit_one(&mut self) -> Result<(), PoolError> {
        if self.is_full() {
            return Err(PoolError::PoolNotActive);
        }
        self.current_participants += 1;
        if self.current_participants == self.max_participants {
            self.status = PoolStatus::Funded;
        }
        Ok(())
    }

    /// Count one departed participant and force status back to `Active`.
    ///
    /// The force is unconditional - from `Funded` this is the documented
    /// revert, from `Active` a no-op, and from `Cancelled` it resurrects
    /// the pool. The last case is a quirk of the original platform that
    /// callers rely on; do not "fix" it here.
    pub fn release_one(&mut self) {
        self.current_participants = self.current_participants.saturating_sub(1);
        self.status = PoolStatus::Active;
    }

    /// Transition `Funded` -> `Activated`: record the service start and
    /// zero the held balance (funds have left the engine's custody).
    pub fn mark_activated(&mut self, now: Ticks) -> Result<(), PoolError> {
        if self.status != PoolStatus::Funded || self.escrow_balance < self.total_cost {
            return Err(PoolError::PoolNotFunded);
        }
        self.status = PoolStatus::Activated;
        self.service_start = now;
        self.escrow_balance = 0;
        Ok(())
    }

    /// Transition to `Cancelled`; disallowed once activated.
    pub fn cancel(&mut self) -> Result<(), PoolError> {
        if self.status == PoolStatus::Activated {
            return Err(PoolError::AlreadyActivated);
        }
        self.status = PoolStatus::Cancelled;
        Ok(())
    }

    /// Empty the held balance, returning the drained amount.
    /// Trusted override used by emergency_withdraw only.
    pub fn drain_escrow(&mut self) -> Amount {
        std::mem::take(&mut self.escrow_balance)
    }
}
