//! QA walkthrough of the full pool lifecycle against the public API.
//!
//! Exercises the engine end to end with a manual clock and the in-memory
//! ledger: group funding, fee-split activation, prorated refunds,
//! cancellation, and the owner escape hatch.

use std::sync::Arc;

use subpool::clock::ManualClock;
use subpool::error::PoolError;
use subpool::ledger::InMemoryLedger;
use subpool::pool::PoolStatus;
use subpool::service::PoolService;

const OWNER: u64 = 1;
const ESCROW: u64 = 2;
const PROVIDER: u64 = 5;
const ALICE: u64 = 10;
const BOB: u64 = 11;
const CAROL: u64 = 12;
const DAVE: u64 = 13;
const MEMBERS: [u64; 4] = [ALICE, BOB, CAROL, DAVE];

const INITIAL_FUNDS: u64 = 1_000;

fn setup(fee_bps: u64) -> (PoolService, Arc<InMemoryLedger>, Arc<ManualClock>) {
    let ledger = Arc::new(InMemoryLedger::new());
    let clock = Arc::new(ManualClock::new(0));
    for account in MEMBERS {
        ledger.deposit(account, INITIAL_FUNDS).unwrap();
    }
    let service = PoolService::new(ledger.clone(), clock.clone(), OWNER, ESCROW, fee_bps).unwrap();
    (service, ledger, clock)
}

/// Scenario: four accounts fund a 100-unit subscription, the creator
/// activates it, and the provider is paid minus a 3% platform fee.
#[test]
fn test_full_lifecycle_with_fee_split() {
    let (service, ledger, clock) = setup(300);

    let pool_id = service.create_pool(ALICE, PROVIDER, 100, 4, 1_000).unwrap();

    for account in MEMBERS {
        service.join_pool(pool_id, account).unwrap();
    }

    // Fully funded: 4 x 25 in escrow, pool promoted
    let funding = service.get_pool_funding_status(pool_id).unwrap();
    assert_eq!(funding.escrow_balance, 100);
    assert_eq!(funding.status, PoolStatus::Funded);
    assert_eq!(ledger.balance_of(ESCROW), 100);

    clock.set(1_000);
    service.activate_subscription(ALICE, pool_id).unwrap();

    // 3% of 100: provider gets 97, platform owner 3, escrow emptied
    assert_eq!(ledger.balance_of(PROVIDER), 97);
    assert_eq!(ledger.balance_of(OWNER), 3);
    assert_eq!(ledger.balance_of(ESCROW), 0);

    let pool = service.get_pool(pool_id).unwrap();
    assert_eq!(pool.status(), PoolStatus::Activated);
    assert_eq!(pool.service_start(), 1_000);
}

/// Scenario: a participant leaves halfway through the service period and
/// gets back half of their 25-unit share, truncated to 12.
#[test]
fn test_prorated_refund_halfway() {
    let (service, ledger, clock) = setup(0);

    let pool_id = service.create_pool(ALICE, PROVIDER, 100, 4, 1_000).unwrap();
    for account in MEMBERS {
        service.join_pool(pool_id, account).unwrap();
    }
    clock.set(2_000);
    service.activate_subscription(ALICE, pool_id).unwrap();

    // Post-activation refunds come out of the platform's operating
    // reserve on the same escrow account
    ledger.deposit(ESCROW, 100).unwrap();

    clock.set(2_500);
    let refund = service.leave_pool(pool_id, BOB).unwrap();
    assert_eq!(refund, 12); // 25 * 500 / 1000, truncated
    assert_eq!(ledger.balance_of(BOB), INITIAL_FUNDS - 25 + 12);

    // The departure does not alter the running subscription
    let pool = service.get_pool(pool_id).unwrap();
    assert_eq!(pool.status(), PoolStatus::Activated);
    assert_eq!(pool.current_participants(), 4);
    assert!(!service.is_pool_member(pool_id, BOB).unwrap());

    // After the period is fully consumed nothing is owed
    clock.set(9_999);
    assert_eq!(service.leave_pool(pool_id, CAROL).unwrap(), 0);
    assert_eq!(ledger.balance_of(CAROL), INITIAL_FUNDS - 25);
}

/// Scenario: leaving before activation refunds in full, frees the seat,
/// and demotes a Funded pool back to Active.
#[test]
fn test_pre_activation_leave_reopens_pool() {
    let (service, ledger, _) = setup(300);

    let pool_id = service.create_pool(ALICE, PROVIDER, 100, 4, 1_000).unwrap();
    for account in MEMBERS {
        service.join_pool(pool_id, account).unwrap();
    }
    assert_eq!(
        service.get_pool(pool_id).unwrap().status(),
        PoolStatus::Funded
    );

    let refund = service.leave_pool(pool_id, DAVE).unwrap();
    assert_eq!(refund, 25);
    assert_eq!(ledger.balance_of(DAVE), INITIAL_FUNDS);

    let pool = service.get_pool(pool_id).unwrap();
    assert_eq!(pool.status(), PoolStatus::Active);
    assert_eq!(pool.current_participants(), 3);
    assert_eq!(pool.escrow_balance(), 75);

    // The freed seat can be taken again, re-funding the pool
    service.join_pool(pool_id, DAVE).unwrap();
    assert_eq!(
        service.get_pool(pool_id).unwrap().status(),
        PoolStatus::Funded
    );
}

/// Scenario: the creator cancels a partially funded pool; every member
/// reclaims their full contribution afterwards. Leaving flips the status
/// back to Active each time, so cancellation is not sticky.
#[test]
fn test_cancel_then_members_reclaim() {
    let (service, ledger, _) = setup(300);

    let pool_id = service.create_pool(ALICE, PROVIDER, 100, 4, 1_000).unwrap();
    for account in [ALICE, BOB, CAROL] {
        service.join_pool(pool_id, account).unwrap();
    }

    service.cancel_pool(ALICE, pool_id).unwrap();
    assert_eq!(
        service.get_pool(pool_id).unwrap().status(),
        PoolStatus::Cancelled
    );
    assert_eq!(
        service.join_pool(pool_id, DAVE),
        Err(PoolError::PoolNotActive)
    );

    for account in [ALICE, BOB, CAROL] {
        assert_eq!(service.leave_pool(pool_id, account).unwrap(), 25);
        assert_eq!(ledger.balance_of(account), INITIAL_FUNDS);
        assert_eq!(
            service.get_pool(pool_id).unwrap().status(),
            PoolStatus::Active
        );
    }

    assert_eq!(service.get_pool(pool_id).unwrap().escrow_balance(), 0);
    assert_eq!(ledger.balance_of(ESCROW), 0);
}

/// Scenario: the owner drains a pool's escrow directly. Participant
/// records are untouched, so their claims survive on paper only.
#[test]
fn test_emergency_withdraw() {
    let (service, ledger, _) = setup(300);

    let pool_id = service.create_pool(ALICE, PROVIDER, 100, 4, 1_000).unwrap();
    service.join_pool(pool_id, ALICE).unwrap();
    service.join_pool(pool_id, BOB).unwrap();

    // Only the platform owner may pull this lever
    assert_eq!(
        service.emergency_withdraw(ALICE, pool_id),
        Err(PoolError::Unauthorized)
    );

    let amount = service.emergency_withdraw(OWNER, pool_id).unwrap();
    assert_eq!(amount, 50);
    assert_eq!(ledger.balance_of(OWNER), 50);
    assert_eq!(service.get_pool(pool_id).unwrap().escrow_balance(), 0);
    assert!(service.is_pool_member(pool_id, ALICE).unwrap());
}

/// Property: while a pool is not activated, its tracked escrow equals
/// the sum of active contributions, through an arbitrary join/leave mix.
#[test]
fn test_escrow_reconciliation_invariant() {
    let (service, _, _) = setup(250);

    let pool_id = service.create_pool(ALICE, PROVIDER, 100, 4, 1_000).unwrap();

    let check = |label: &str| {
        let pool = service.get_pool(pool_id).unwrap();
        assert_eq!(
            pool.escrow_balance(),
            service.active_contributions(pool_id),
            "reconciliation broken after {}",
            label
        );
    };

    service.join_pool(pool_id, ALICE).unwrap();
    check("join alice");
    service.join_pool(pool_id, BOB).unwrap();
    check("join bob");
    service.leave_pool(pool_id, ALICE).unwrap();
    check("leave alice");
    service.join_pool(pool_id, CAROL).unwrap();
    check("join carol");
    service.join_pool(pool_id, ALICE).unwrap();
    check("rejoin alice");
    service.join_pool(pool_id, DAVE).unwrap();
    check("join dave");
    service.leave_pool(pool_id, DAVE).unwrap();
    check("leave dave");
}

/// Failed joins must leave no partial state behind.
#[test]
fn test_rejected_join_has_no_side_effects() {
    let (service, ledger, _) = setup(250);

    let pool_id = service.create_pool(ALICE, PROVIDER, 100, 4, 1_000).unwrap();

    // Account 99 holds nothing; the escrow transfer is rejected
    assert!(service.join_pool(pool_id, 99).is_err());

    let pool = service.get_pool(pool_id).unwrap();
    assert_eq!(pool.current_participants(), 0);
    assert_eq!(pool.escrow_balance(), 0);
    assert!(!service.is_pool_member(pool_id, 99).unwrap());
    assert_eq!(ledger.balance_of(ESCROW), 0);
}
