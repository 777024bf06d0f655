//! Membership Table - per-(pool, participant) contribution records.
//!
//! Owns the participant records and the (participant, pool) membership
//! index used to reject duplicate joins in O(1). Records are marked
//! inactive on leave, never deleted - they stay for history/audit.
//!
//! Consistency rule: the index entry is true exactly when the record's
//! `is_active` flag is true. Both flip together, and callers mutate this
//! table only while holding the owning pool's lock.

use dashmap::DashMap;

use crate::core_types::{AccountId, Amount, PoolId, Ticks};
use crate::error::PoolError;

/// Contribution record for one participant in one pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRecord {
    pub amount_paid: Amount,
    pub joined_at: Ticks,
    pub is_active: bool,
}

#[derive(Debug, Default)]
pub struct MembershipTable {
    /// (pool, participant) -> contribution record
    records: DashMap<(PoolId, AccountId), ParticipantRecord>,
    /// (participant, pool) -> is member; the O(1) duplicate-join check
    index: DashMap<(AccountId, PoolId), bool>,
}

impl MembershipTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// O(1) membership check against the index.
    pub fn is_member(&self, participant: AccountId, pool_id: PoolId) -> bool {
        self.index
            .get(&(participant, pool_id))
            .map(|entry| *entry)
            .unwrap_or(false)
    }

    /// Create/activate the participant record and set the index.
    ///
    /// A re-join after leaving overwrites the old (inactive) record; a
    /// join while active is rejected upstream via `is_member`.
    pub fn admit(&self, pool_id: PoolId, participant: AccountId, amount: Amount, now: Ticks) {
        self.records.insert(
            (pool_id, participant),
            ParticipantRecord {
                amount_paid: amount,
                joined_at: now,
                is_active: true,
            },
        );
        self.index.insert((participant, pool_id), true);
    }

    /// Mark the record and index inactive, returning the record as it
    /// was at departure. Fails with `NotMember` when there is no active
    /// record.
    pub fn deactivate(
        &self,
        pool_id: PoolId,
        participant: AccountId,
    ) -> Result<ParticipantRecord, PoolError> {
        let mut entry = self
            .records
            .get_mut(&(pool_id, participant))
            .ok_or(PoolError::NotMember)?;
        if !entry.is_active {
            return Err(PoolError::NotMember);
        }
        let departed = entry.clone();
        entry.is_active = false;
        drop(entry);

        self.index.insert((participant, pool_id), false);
        Ok(departed)
    }

    /// Snapshot of a participant record (active or historical).
    pub fn get(&self, pool_id: PoolId, participant: AccountId) -> Option<ParticipantRecord> {
        self.records
            .get(&(pool_id, participant))
            .map(|entry| entry.clone())
    }

    /// Active record lookup used by leave_pool.
    pub fn get_active(
        &self,
        pool_id: PoolId,
        participant: AccountId,
    ) -> Result<ParticipantRecord, PoolError> {
        match self.get(pool_id, participant) {
            Some(record) if record.is_active => Ok(record),
            _ => Err(PoolError::NotMember),
        }
    }

    /// Sum of `amount_paid` over active participants of a pool. Used by
    /// the funding-status read and by reconciliation tests; O(records).
    pub fn active_total(&self, pool_id: PoolId) -> Amount {
        self.records
            .iter()
            .filter(|entry| entry.key().0 == pool_id && entry.value().is_active)
            .map(|entry| entry.value().amount_paid)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admit_sets_record_and_index() {
        let table = MembershipTable::new();
        assert!(!table.is_member(7, 1));

        table.admit(1, 7, 25, 100);
        assert!(table.is_member(7, 1));

        let record = table.get(1, 7).unwrap();
        assert_eq!(record.amount_paid, 25);
        assert_eq!(record.joined_at, 100);
        assert!(record.is_active);
    }

    #[test]
    fn test_deactivate_keeps_history() {
        let table = MembershipTable::new();
        table.admit(1, 7, 25, 100);

        let departed = table.deactivate(1, 7).unwrap();
        assert_eq!(departed.amount_paid, 25);
        assert!(departed.is_active);

        // Record retained, flagged inactive; index cleared
        let record = table.get(1, 7).unwrap();
        assert!(!record.is_active);
        assert!(!table.is_member(7, 1));
    }

    #[test]
    fn test_deactivate_twice_fails() {
        let table = MembershipTable::new();
        table.admit(1, 7, 25, 100);
        table.deactivate(1, 7).unwrap();
        assert_eq!(table.deactivate(1, 7), Err(PoolError::NotMember));
    }

    #[test]
    fn test_deactivate_unknown_fails() {
        let table = MembershipTable::new();
        assert_eq!(table.deactivate(1, 7), Err(PoolError::NotMember));
    }

    #[test]
    fn test_rejoin_overwrites_inactive_record() {
        let table = MembershipTable::new();
        table.admit(1, 7, 25, 100);
        table.deactivate(1, 7).unwrap();

        table.admit(1, 7, 30, 200);
        assert!(table.is_member(7, 1));
        let record = table.get(1, 7).unwrap();
        assert_eq!(record.amount_paid, 30);
        assert_eq!(record.joined_at, 200);
    }

    #[test]
    fn test_active_total_sums_only_active_in_pool() {
        let table = MembershipTable::new();
        table.admit(1, 7, 25, 0);
        table.admit(1, 8, 25, 0);
        table.admit(2, 9, 99, 0);
        assert_eq!(table.active_total(1), 50);

        table.deactivate(1, 7).unwrap();
        assert_eq!(table.active_total(1), 25);
        assert_eq!(table.active_total(2), 99);
    }

    #[test]
    fn test_membership_isolated_per_pool() {
        let table = MembershipTable::new();
        table.admit(1, 7, 25, 0);
        assert!(table.is_member(7, 1));
        assert!(!table.is_member(7, 2));
    }
}
