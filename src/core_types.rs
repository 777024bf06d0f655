//! Core types used throughout the system
//!
//! These are fundamental type aliases used by all modules.
//! They provide semantic meaning and enable future type evolution.

/// Account ID - globally unique identifier for a ledger account.
///
/// # Constraints:
/// - **Immutable**: Once assigned, NEVER changes
/// - Identifies participants, pool creators, providers, and the
///   platform owner/escrow accounts alike
pub type AccountId = u64;

/// Pool ID - unique within the system, assigned sequentially (1, 2, 3, ...).
///
/// # Usage:
/// - Primary key for pool records
/// - Used in DashMap for O(1) pool lookup
pub type PoolId = u64;

/// Amount in scaled integer units (no floats anywhere in money paths).
pub type Amount = u64;

/// Logical time in ticks.
///
/// The engine never interprets ticks beyond subtraction; `SystemClock`
/// maps them to Unix seconds, tests drive them manually.
pub type Ticks = u64;
