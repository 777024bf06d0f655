//! Gateway types: request DTOs, the unified response wrapper, and the
//! `ApiError` type handlers bubble failures through.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::PoolError;
use crate::membership::ParticipantRecord;
use crate::pool::Pool;
use crate::service::FundingStatus;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }
}

/// Handler result type: success tuple or an `ApiError` that renders to
/// the same envelope with a non-zero code.
pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// Success shorthand used by every handler
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

// ============================================================================
// API Error
// ============================================================================

/// Error carried out of a handler; renders as the standard envelope with
/// `data` omitted.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER, msg)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error_codes::MISSING_AUTH, msg)
    }
}

impl From<PoolError> for ApiError {
    fn from(err: PoolError) -> Self {
        Self {
            status: err.http_status(),
            code: err.code(),
            msg: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body: ApiResponse<()> = ApiResponse {
            code: self.code,
            msg: self.msg,
            data: None,
        };
        (self.status, Json(body)).into_response()
    }
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Create pool request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePoolRequest {
    /// Service provider account paid at activation
    pub provider: u64,
    /// Total subscription cost, in base units
    pub total_cost: u64,
    /// Seat count the cost is split across
    pub max_participants: u32,
    /// Service period length in ticks
    pub duration: u64,
}

/// Request naming a pool (join / activate / leave / cancel / withdraw)
#[derive(Debug, Deserialize, ToSchema)]
pub struct PoolActionRequest {
    pub pool_id: u64,
}

/// Owner fee update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetFeeRequest {
    /// New platform fee in basis points (max 1000 = 10%)
    pub fee_bps: u64,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Create pool response data
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatePoolData {
    pub pool_id: u64,
}

/// Refund response data (leave)
#[derive(Debug, Serialize, ToSchema)]
pub struct RefundData {
    /// Amount returned to the participant (0 when the period is consumed)
    pub refund: u64,
}

/// Emergency withdraw response data
#[derive(Debug, Serialize, ToSchema)]
pub struct WithdrawData {
    pub amount: u64,
}

/// Pool snapshot returned by the pool query endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolData {
    pub pool_id: u64,
    pub creator: u64,
    pub provider: u64,
    pub total_cost: u64,
    pub cost_per_participant: u64,
    pub current_participants: u32,
    pub max_participants: u32,
    /// Lifecycle status: ACTIVE | FUNDED | ACTIVATED | CANCELLED
    #[schema(example = "ACTIVE")]
    pub status: String,
    pub created_at: u64,
    pub duration: u64,
    pub service_start: u64,
    pub escrow_balance: u64,
}

impl From<Pool> for PoolData {
    fn from(pool: Pool) -> Self {
        Self {
            pool_id: pool.id(),
            creator: pool.creator(),
            provider: pool.provider(),
            total_cost: pool.total_cost(),
            cost_per_participant: pool.cost_per_participant(),
            current_participants: pool.current_participants(),
            max_participants: pool.max_participants(),
            status: pool.status().to_string(),
            created_at: pool.created_at(),
            duration: pool.duration(),
            service_start: pool.service_start(),
            escrow_balance: pool.escrow_balance(),
        }
    }
}

/// Funding progress snapshot
#[derive(Debug, Serialize, ToSchema)]
pub struct FundingStatusData {
    pub escrow_balance: u64,
    pub total_cost: u64,
    pub current_participants: u32,
    pub max_participants: u32,
    pub is_funded: bool,
    #[schema(example = "FUNDED")]
    pub status: String,
}

impl From<FundingStatus> for FundingStatusData {
    fn from(status: FundingStatus) -> Self {
        Self {
            escrow_balance: status.escrow_balance,
            total_cost: status.total_cost,
            current_participants: status.current_participants,
            max_participants: status.max_participants,
            is_funded: status.escrow_balance >= status.total_cost,
            status: status.status.to_string(),
        }
    }
}

/// Participant record (active or historical)
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantData {
    pub amount_paid: u64,
    pub joined_at: u64,
    pub is_active: bool,
}

impl From<ParticipantRecord> for ParticipantData {
    fn from(record: ParticipantRecord) -> Self {
        Self {
            amount_paid: record.amount_paid,
            joined_at: record.joined_at,
            is_active: record.is_active,
        }
    }
}

/// Membership check response data
#[derive(Debug, Serialize, ToSchema)]
pub struct MemberData {
    pub is_member: bool,
}

/// Mock deposit request (test builds only)
#[cfg(feature = "mock-ledger")]
#[derive(Debug, Deserialize, ToSchema)]
pub struct MockDepositRequest {
    pub account: u64,
    pub amount: u64,
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_BALANCE: i32 = 1002;
    pub const ALREADY_MEMBER: i32 = 1003;
    pub const POOL_NOT_ACTIVE: i32 = 1004;
    pub const POOL_NOT_FUNDED: i32 = 1005;
    pub const ALREADY_ACTIVATED: i32 = 1006;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;

    // Resource errors (4xxx)
    pub const POOL_NOT_FOUND: i32 = 4001;
    pub const NOT_MEMBER: i32 = 4002;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
}
