//! OpenAPI / Swagger UI documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{
    CreatePoolData, CreatePoolRequest, FundingStatusData, MemberData, ParticipantData,
    PoolActionRequest, PoolData, RefundData, SetFeeRequest, WithdrawData,
};

/// Main API documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Subpool API",
        version = "1.0.0",
        description = "Escrow-backed subscription pool lifecycle engine: group funding, \
                       fee-split activation, and time-prorated refunds.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::create_pool,
        crate::gateway::handlers::join_pool,
        crate::gateway::handlers::activate_pool,
        crate::gateway::handlers::leave_pool,
        crate::gateway::handlers::cancel_pool,
        crate::gateway::handlers::set_platform_fee,
        crate::gateway::handlers::emergency_withdraw,
        crate::gateway::handlers::get_pool,
        crate::gateway::handlers::get_funding_status,
        crate::gateway::handlers::get_participant,
        crate::gateway::handlers::is_member,
        crate::gateway::handlers::health_check,
    ),
    components(
        schemas(
            CreatePoolRequest,
            PoolActionRequest,
            SetFeeRequest,
            CreatePoolData,
            RefundData,
            WithdrawData,
            PoolData,
            FundingStatusData,
            ParticipantData,
            MemberData,
            HealthResponse,
        )
    ),
    tags(
        (name = "Pool", description = "Pool lifecycle operations"),
        (name = "Admin", description = "Owner-only platform administration"),
        (name = "Query", description = "Read-only pool and membership queries"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
