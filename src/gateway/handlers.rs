//! HTTP handlers for the pool lifecycle API.
//!
//! Callers identify themselves through the `X-Account-ID` header; the
//! engine enforces the actual role checks. Every handler returns the
//! unified `ApiResponse` envelope.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use utoipa::ToSchema;

use super::state::AppState;
use super::types::{
    ApiError, ApiResult, CreatePoolData, CreatePoolRequest, FundingStatusData, MemberData,
    ParticipantData, PoolActionRequest, PoolData, RefundData, SetFeeRequest, WithdrawData, ok,
};

/// Extract the caller's account id from the `X-Account-ID` header
fn extract_account_id(headers: &HeaderMap) -> Result<u64, ApiError> {
    let raw = headers
        .get("X-Account-ID")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing X-Account-ID header"))?;

    raw.parse::<u64>()
        .map_err(|_| ApiError::bad_request("Invalid X-Account-ID format"))
}

// ============================================================================
// Pool Lifecycle
// ============================================================================

/// Create a new pool
///
/// POST /api/v1/pool/create
#[utoipa::path(
    post,
    path = "/api/v1/pool/create",
    request_body = CreatePoolRequest,
    responses(
        (status = 200, description = "Pool created", content_type = "application/json"),
        (status = 400, description = "Invalid parameters")
    ),
    tag = "Pool"
)]
pub async fn create_pool(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreatePoolRequest>,
) -> ApiResult<CreatePoolData> {
    let creator = extract_account_id(&headers)?;
    let pool_id = state.service.create_pool(
        creator,
        req.provider,
        req.total_cost,
        req.max_participants,
        req.duration,
    )?;
    ok(CreatePoolData { pool_id })
}

/// Join a pool, paying the per-seat cost into escrow
///
/// POST /api/v1/pool/join
#[utoipa::path(
    post,
    path = "/api/v1/pool/join",
    request_body = PoolActionRequest,
    responses(
        (status = 200, description = "Joined", content_type = "application/json"),
        (status = 400, description = "Insufficient funds"),
        (status = 404, description = "Pool not found"),
        (status = 409, description = "Pool full, cancelled, or already a member")
    ),
    tag = "Pool"
)]
pub async fn join_pool(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<PoolActionRequest>,
) -> ApiResult<()> {
    let participant = extract_account_id(&headers)?;
    state.service.join_pool(req.pool_id, participant)?;
    ok(())
}

/// Activate a funded pool: pay the provider, start the service period
///
/// POST /api/v1/pool/activate
#[utoipa::path(
    post,
    path = "/api/v1/pool/activate",
    request_body = PoolActionRequest,
    responses(
        (status = 200, description = "Activated", content_type = "application/json"),
        (status = 403, description = "Caller is not creator or owner"),
        (status = 404, description = "Pool not found"),
        (status = 409, description = "Pool not fully funded")
    ),
    tag = "Pool"
)]
pub async fn activate_pool(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<PoolActionRequest>,
) -> ApiResult<()> {
    let caller = extract_account_id(&headers)?;
    state.service.activate_subscription(caller, req.pool_id)?;
    ok(())
}

/// Leave a pool; the refund depends on lifecycle stage
///
/// POST /api/v1/pool/leave
#[utoipa::path(
    post,
    path = "/api/v1/pool/leave",
    request_body = PoolActionRequest,
    responses(
        (status = 200, description = "Left pool, refund in response", content_type = "application/json"),
        (status = 404, description = "Pool not found or not a member")
    ),
    tag = "Pool"
)]
pub async fn leave_pool(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<PoolActionRequest>,
) -> ApiResult<RefundData> {
    let participant = extract_account_id(&headers)?;
    let refund = state.service.leave_pool(req.pool_id, participant)?;
    ok(RefundData { refund })
}

/// Cancel a pool (members then reclaim funds via leave)
///
/// POST /api/v1/pool/cancel
#[utoipa::path(
    post,
    path = "/api/v1/pool/cancel",
    request_body = PoolActionRequest,
    responses(
        (status = 200, description = "Cancelled", content_type = "application/json"),
        (status = 403, description = "Caller is not creator or owner"),
        (status = 404, description = "Pool not found"),
        (status = 409, description = "Pool already activated")
    ),
    tag = "Pool"
)]
pub async fn cancel_pool(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<PoolActionRequest>,
) -> ApiResult<()> {
    let caller = extract_account_id(&headers)?;
    state.service.cancel_pool(caller, req.pool_id)?;
    ok(())
}

// ============================================================================
// Admin
// ============================================================================

/// Update the global platform fee (owner only)
///
/// POST /api/v1/admin/fee
#[utoipa::path(
    post,
    path = "/api/v1/admin/fee",
    request_body = SetFeeRequest,
    responses(
        (status = 200, description = "Fee updated", content_type = "application/json"),
        (status = 400, description = "Fee above the 10% cap"),
        (status = 403, description = "Caller is not the owner")
    ),
    tag = "Admin"
)]
pub async fn set_platform_fee(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SetFeeRequest>,
) -> ApiResult<()> {
    let caller = extract_account_id(&headers)?;
    state.service.set_platform_fee(caller, req.fee_bps)?;
    ok(())
}

/// Drain a pool's escrow to the owner (owner only)
///
/// POST /api/v1/admin/withdraw
#[utoipa::path(
    post,
    path = "/api/v1/admin/withdraw",
    request_body = PoolActionRequest,
    responses(
        (status = 200, description = "Escrow drained, amount in response", content_type = "application/json"),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Pool not found")
    ),
    tag = "Admin"
)]
pub async fn emergency_withdraw(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<PoolActionRequest>,
) -> ApiResult<WithdrawData> {
    let caller = extract_account_id(&headers)?;
    let amount = state.service.emergency_withdraw(caller, req.pool_id)?;
    ok(WithdrawData { amount })
}

// ============================================================================
// Queries
// ============================================================================

/// Pool snapshot
///
/// GET /api/v1/pool/{pool_id}
#[utoipa::path(
    get,
    path = "/api/v1/pool/{pool_id}",
    params(("pool_id" = u64, Path, description = "Pool id")),
    responses(
        (status = 200, description = "Pool snapshot", content_type = "application/json"),
        (status = 404, description = "Pool not found")
    ),
    tag = "Query"
)]
pub async fn get_pool(
    State(state): State<Arc<AppState>>,
    Path(pool_id): Path<u64>,
) -> ApiResult<PoolData> {
    let pool = state.service.get_pool(pool_id)?;
    ok(pool.into())
}

/// Funding progress for a pool
///
/// GET /api/v1/pool/{pool_id}/funding
#[utoipa::path(
    get,
    path = "/api/v1/pool/{pool_id}/funding",
    params(("pool_id" = u64, Path, description = "Pool id")),
    responses(
        (status = 200, description = "Funding status", content_type = "application/json"),
        (status = 404, description = "Pool not found")
    ),
    tag = "Query"
)]
pub async fn get_funding_status(
    State(state): State<Arc<AppState>>,
    Path(pool_id): Path<u64>,
) -> ApiResult<FundingStatusData> {
    let status = state.service.get_pool_funding_status(pool_id)?;
    ok(status.into())
}

/// Participant record (active or historical)
///
/// GET /api/v1/pool/{pool_id}/participant/{account}
#[utoipa::path(
    get,
    path = "/api/v1/pool/{pool_id}/participant/{account}",
    params(
        ("pool_id" = u64, Path, description = "Pool id"),
        ("account" = u64, Path, description = "Participant account id")
    ),
    responses(
        (status = 200, description = "Participant record", content_type = "application/json"),
        (status = 404, description = "Pool not found or never joined")
    ),
    tag = "Query"
)]
pub async fn get_participant(
    State(state): State<Arc<AppState>>,
    Path((pool_id, account)): Path<(u64, u64)>,
) -> ApiResult<ParticipantData> {
    let record = state.service.get_participant_info(pool_id, account)?;
    ok(record.into())
}

/// Active membership check
///
/// GET /api/v1/pool/{pool_id}/member/{account}
#[utoipa::path(
    get,
    path = "/api/v1/pool/{pool_id}/member/{account}",
    params(
        ("pool_id" = u64, Path, description = "Pool id"),
        ("account" = u64, Path, description = "Account id")
    ),
    responses(
        (status = 200, description = "Membership flag", content_type = "application/json"),
        (status = 404, description = "Pool not found")
    ),
    tag = "Query"
)]
pub async fn is_member(
    State(state): State<Arc<AppState>>,
    Path((pool_id, account)): Path<(u64, u64)>,
) -> ApiResult<MemberData> {
    let is_member = state.service.is_pool_member(pool_id, account)?;
    ok(MemberData { is_member })
}

// ============================================================================
// System
// ============================================================================

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
    /// Build revision
    pub version: &'static str,
}

/// Health check endpoint
///
/// GET /api/v1/health
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse, content_type = "application/json")
    ),
    tag = "System"
)]
pub async fn health_check() -> ApiResult<HealthResponse> {
    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    ok(HealthResponse {
        timestamp_ms,
        version: env!("GIT_HASH"),
    })
}

// ============================================================================
// Mock Ledger (test builds only)
// ============================================================================

/// Credit an account on the in-memory ledger.
///
/// POST /internal/mock/deposit
///
/// Only compiled with the `mock-ledger` feature; production builds must
/// use `--no-default-features` to exclude it.
#[cfg(feature = "mock-ledger")]
pub async fn mock_deposit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<super::types::MockDepositRequest>,
) -> ApiResult<()> {
    state
        .mock_ledger
        .deposit(req.account, req.amount)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    tracing::info!("mock deposit: account={} amount={}", req.account, req.amount);
    ok(())
}
