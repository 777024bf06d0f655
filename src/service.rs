//! Lifecycle engine - the escrow-backed pool service.
//!
//! Composes the pool registry, membership table, Ledger Port, and clock
//! into the operation surface callers see. Every mutating operation on a
//! pool runs inside that pool's lock; validations come first, the ledger
//! transfer second, record mutation last, so a failing step leaves all
//! state exactly as it was.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::auth::{ensure_owner, ensure_pool_admin};
use crate::clock::Clock;
use crate::core_types::{AccountId, Amount, PoolId, Ticks};
use crate::error::PoolError;
use crate::fee::{fee_within_cap, split_payment};
use crate::ledger::LedgerPort;
use crate::membership::{MembershipTable, ParticipantRecord};
use crate::pool::{Pool, PoolStatus};
use crate::refund::prorated_refund;
use crate::registry::PoolRegistry;

/// Read-only funding snapshot for one pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingStatus {
    pub escrow_balance: Amount,
    pub total_cost: Amount,
    pub current_participants: u32,
    pub max_participants: u32,
    pub status: PoolStatus,
}

pub struct PoolService {
    registry: PoolRegistry,
    members: MembershipTable,
    ledger: Arc<dyn LedgerPort>,
    clock: Arc<dyn Clock>,
    /// Platform owner - receives fees and holds the admin role
    owner: AccountId,
    /// Ledger account holding all pool escrow (and the operating
    /// reserve that backs post-activation refunds)
    escrow_account: AccountId,
    /// Global fee setting in basis points, capped at 1000 (10%)
    fee_bps: AtomicU64,
}

impl PoolService {
    pub fn new(
        ledger: Arc<dyn LedgerPort>,
        clock: Arc<dyn Clock>,
        owner: AccountId,
        escrow_account: AccountId,
        fee_bps: u64,
    ) -> Result<Self, PoolError> {
        if !fee_within_cap(fee_bps) {
            return Err(PoolError::InvalidAmount);
        }
        Ok(Self {
            registry: PoolRegistry::new(),
            members: MembershipTable::new(),
            ledger,
            clock,
            owner,
            escrow_account,
            fee_bps: AtomicU64::new(fee_bps),
        })
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    pub fn platform_fee_bps(&self) -> u64 {
        self.fee_bps.load(Ordering::Relaxed)
    }

    // ============================================================
    // MUTATING OPERATIONS
    // ============================================================

    /// Create a pool. No ledger side effects; the creator pays nothing
    /// until they join like anyone else.
    pub fn create_pool(
        &self,
        creator: AccountId,
        provider: AccountId,
        total_cost: Amount,
        max_participants: u32,
        duration: Ticks,
    ) -> Result<PoolId, PoolError> {
        let now = self.clock.now_ticks();
        let pool_id = self.registry.create(
            creator,
            provider,
            total_cost,
            max_participants,
            duration,
            now,
        )?;
        tracing::info!(
            "pool {} created: creator={} provider={} total_cost={} seats={} duration={}",
            pool_id,
            creator,
            provider,
            total_cost,
            max_participants,
            duration
        );
        Ok(pool_id)
    }

    /// Join a pool, paying the per-seat cost into escrow.
    pub fn join_pool(&self, pool_id: PoolId, participant: AccountId) -> Result<(), PoolError> {
        let now = self.clock.now_ticks();
        self.registry.with_pool(pool_id, |pool| {
            if !pool.status().accepts_joins() {
                return Err(PoolError::PoolNotActive);
            }
            if pool.is_full() {
                return Err(PoolError::PoolNotActive);
            }
            if self.members.is_member(participant, pool_id) {
                return Err(PoolError::AlreadyMember);
            }
            let amount = pool.cost_per_participant();
            if !pool.can_credit_escrow(amount) {
                return Err(PoolError::InvalidAmount);
            }

            // All checks passed; the transfer is the only fallible step
            // left, so a rejection here leaves no trace.
            self.ledger.transfer(participant, self.escrow_account, amount)?;

            pool.credit_escrow(amount)?;
            self.members.admit(pool_id, participant, amount, now);
            pool.admit_one()?;

            tracing::info!(
                "pool {} join: participant={} paid={} members={}/{} status={}",
                pool_id,
                participant,
                amount,
                pool.current_participants(),
                pool.max_participants(),
                pool.status()
            );
            Ok(())
        })
    }

    /// Disburse the pooled funds to the provider (minus the platform
    /// fee) and start the service period.
    pub fn activate_subscription(
        &self,
        caller: AccountId,
        pool_id: PoolId,
    ) -> Result<(), PoolError> {
        let now = self.clock.now_ticks();
        let fee_bps = self.platform_fee_bps();
        self.registry.with_pool(pool_id, |pool| {
            ensure_pool_admin(caller, pool.creator(), self.owner)?;
            if pool.status() != PoolStatus::Funded || pool.escrow_balance() < pool.total_cost() {
                return Err(PoolError::PoolNotFunded);
            }

            let (provider_payment, platform_fee) = split_payment(pool.total_cost(), fee_bps);

            self.ledger
                .transfer(self.escrow_account, pool.provider(), provider_payment)?;
            if let Err(err) =
                self.ledger
                    .transfer(self.escrow_account, self.owner, platform_fee)
            {
                // Second leg failed with the first already applied:
                // compensate the provider payment before surfacing the
                // error so no state change is visible.
                tracing::warn!(
                    "pool {} activation fee leg failed ({}), compensating provider payment",
                    pool_id,
                    err
                );
                if let Err(comp_err) = self.ledger.transfer(
                    pool.provider(),
                    self.escrow_account,
                    provider_payment,
                ) {
                    tracing::error!(
                        "pool {} compensation failed: {} - ledger imbalance of {}",
                        pool_id,
                        comp_err,
                        provider_payment
                    );
                }
                return Err(err.into());
            }

            pool.mark_activated(now)?;
            tracing::info!(
                "pool {} activated: provider={} paid={} fee={} ({}bps) service_start={}",
                pool_id,
                pool.provider(),
                provider_payment,
                platform_fee,
                fee_bps,
                now
            );
            Ok(())
        })
    }

    /// Leave a pool. Returns the refunded amount (possibly 0).
    ///
    /// Activated pools refund pro rata for the unconsumed service period
    /// and leave the roster count and status untouched; non-activated
    /// pools (including cancelled ones) refund in full, shrink the
    /// roster, and force the status back to Active.
    pub fn leave_pool(
        &self,
        pool_id: PoolId,
        participant: AccountId,
    ) -> Result<Amount, PoolError> {
        let now = self.clock.now_ticks();
        self.registry.with_pool(pool_id, |pool| {
            let record = self.members.get_active(pool_id, participant)?;

            let refund = if pool.status() == PoolStatus::Activated {
                let refund = prorated_refund(
                    record.amount_paid,
                    pool.service_start(),
                    pool.duration(),
                    now,
                );
                if refund > 0 {
                    // Drawn from the operating reserve; escrow_balance was
                    // zeroed at activation and is not touched here.
                    self.ledger
                        .transfer(self.escrow_account, participant, refund)?;
                }
                self.members.deactivate(pool_id, participant)?;
                refund
            } else {
                let refund = record.amount_paid;
                if pool.escrow_balance() < refund {
                    return Err(PoolError::InvalidAmount);
                }
                self.ledger
                    .transfer(self.escrow_account, participant, refund)?;
                pool.debit_escrow(refund)?;
                self.members.deactivate(pool_id, participant)?;
                pool.release_one();
                refund
            };

            tracing::info!(
                "pool {} leave: participant={} refund={} members={}/{} status={}",
                pool_id,
                participant,
                refund,
                pool.current_participants(),
                pool.max_participants(),
                pool.status()
            );
            Ok(refund)
        })
    }

    /// Cancel a pool. Does not refund anyone by itself - members reclaim
    /// their full contribution through `leave_pool` afterwards.
    pub fn cancel_pool(&self, caller: AccountId, pool_id: PoolId) -> Result<(), PoolError> {
        self.registry.with_pool(pool_id, |pool| {
            ensure_pool_admin(caller, pool.creator(), self.owner)?;
            pool.cancel()?;
            tracing::info!("pool {} cancelled by {}", pool_id, caller);
            Ok(())
        })
    }

    /// Owner-only: update the global platform fee.
    pub fn set_platform_fee(&self, caller: AccountId, new_fee_bps: u64) -> Result<(), PoolError> {
        ensure_owner(caller, self.owner)?;
        if !fee_within_cap(new_fee_bps) {
            return Err(PoolError::InvalidAmount);
        }
        self.fee_bps.store(new_fee_bps, Ordering::Relaxed);
        tracing::info!("platform fee set to {}bps by {}", new_fee_bps, caller);
        Ok(())
    }

    /// Owner-only escape hatch: drain a pool's entire held balance to
    /// the owner, bypassing participant entitlements. Membership records
    /// are left as they are, so the escrow reconciliation invariant is
    /// knowingly broken for this pool. Trust boundary, not a bug.
    pub fn emergency_withdraw(
        &self,
        caller: AccountId,
        pool_id: PoolId,
    ) -> Result<Amount, PoolError> {
        ensure_owner(caller, self.owner)?;
        self.registry.with_pool(pool_id, |pool| {
            let amount = pool.escrow_balance();
            if amount > 0 {
                self.ledger
                    .transfer(self.escrow_account, self.owner, amount)?;
            }
            pool.drain_escrow();
            tracing::warn!(
                "pool {} emergency withdraw: {} drained to owner {}",
                pool_id,
                amount,
                self.owner
            );
            Ok(amount)
        })
    }

    // ============================================================
    // READ-ONLY OPERATIONS
    // ============================================================

    pub fn get_pool(&self, pool_id: PoolId) -> Result<Pool, PoolError> {
        self.registry.snapshot(pool_id)
    }

    pub fn get_participant_info(
        &self,
        pool_id: PoolId,
        participant: AccountId,
    ) -> Result<ParticipantRecord, PoolError> {
        // Distinguish "no such pool" from "never joined"
        self.registry.snapshot(pool_id)?;
        self.members
            .get(pool_id, participant)
            .ok_or(PoolError::NotMember)
    }

    pub fn is_pool_member(
        &self,
        pool_id: PoolId,
        participant: AccountId,
    ) -> Result<bool, PoolError> {
        self.registry.snapshot(pool_id)?;
        Ok(self.members.is_member(participant, pool_id))
    }

    pub fn get_pool_funding_status(&self, pool_id: PoolId) -> Result<FundingStatus, PoolError> {
        let pool = self.registry.snapshot(pool_id)?;
        Ok(FundingStatus {
            escrow_balance: pool.escrow_balance(),
            total_cost: pool.total_cost(),
            current_participants: pool.current_participants(),
            max_participants: pool.max_participants(),
            status: pool.status(),
        })
    }

    /// Reconciliation probe: sum of active contributions for a pool.
    pub fn active_contributions(&self, pool_id: PoolId) -> Amount {
        self.members.active_total(pool_id)
    }
}
