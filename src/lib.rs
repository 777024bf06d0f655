//! Subpool - escrow-backed subscription pool lifecycle engine
//!
//! Groups of accounts split the cost of a shared subscription: each
//! participant pays an equal share into escrow, the pool's creator
//! activates it once fully funded (paying the provider minus a platform
//! fee), and departures are refunded pro rata for the unconsumed
//! service period.
//!
//! # Modules
//!
//! - [`core_types`] - Core type aliases (AccountId, PoolId, Amount, Ticks)
//! - [`error`] - Typed operation errors with stable numeric codes
//! - [`ledger`] - Ledger Port trait and the in-memory implementation
//! - [`clock`] - Clock trait, system and manual implementations
//! - [`fee`] - Basis-point fee math
//! - [`refund`] - Time-prorated refund math
//! - [`pool`] - Pool record and lifecycle state machine
//! - [`registry`] - Pool table with per-pool locking
//! - [`membership`] - Participant records and the membership index
//! - [`auth`] - Owner / pool-admin role checks
//! - [`service`] - The lifecycle engine composing everything above
//! - [`gateway`] - HTTP API (axum)

// Core types - must be first!
pub mod core_types;

// Engine components
pub mod auth;
pub mod clock;
pub mod error;
pub mod fee;
pub mod ledger;
pub mod membership;
pub mod pool;
pub mod refund;
pub mod registry;
pub mod service;

// Service plumbing
pub mod config;
pub mod gateway;
pub mod logging;

// Convenient re-exports at crate root
pub use clock::{Clock, ManualClock, SystemClock};
pub use core_types::{AccountId, Amount, PoolId, Ticks};
pub use error::PoolError;
pub use ledger::{InMemoryLedger, LedgerPort, TransferError};
pub use membership::{MembershipTable, ParticipantRecord};
pub use pool::{Pool, PoolStatus};
pub use registry::PoolRegistry;
pub use service::{FundingStatus, PoolService};
