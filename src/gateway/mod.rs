pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

/// Start the HTTP gateway server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) {
    // ==========================================================================
    // Pool lifecycle routes
    // ==========================================================================
    let pool_routes = Router::new()
        .route("/create", post(handlers::create_pool))
        .route("/join", post(handlers::join_pool))
        .route("/activate", post(handlers::activate_pool))
        .route("/leave", post(handlers::leave_pool))
        .route("/cancel", post(handlers::cancel_pool))
        .route("/{pool_id}", get(handlers::get_pool))
        .route("/{pool_id}/funding", get(handlers::get_funding_status))
        .route(
            "/{pool_id}/participant/{account}",
            get(handlers::get_participant),
        )
        .route("/{pool_id}/member/{account}", get(handlers::is_member));

    // ==========================================================================
    // Owner-only admin routes (authorization enforced in the engine)
    // ==========================================================================
    let admin_routes = Router::new()
        .route("/fee", post(handlers::set_platform_fee))
        .route("/withdraw", post(handlers::emergency_withdraw));

    let app = Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .nest("/api/v1/pool", pool_routes)
        .nest("/api/v1/admin", admin_routes);

    // [SECURITY] Mock ledger routes - only compiled when 'mock-ledger' feature
    // is enabled. Production builds MUST be compiled with
    // `--no-default-features` to exclude this.
    #[cfg(feature = "mock-ledger")]
    let app = app.nest(
        "/internal/mock",
        Router::new().route("/deposit", post(handlers::mock_deposit)),
    );

    let app = app
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()));

    let addr = format!("{}:{}", host, port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("FATAL: Failed to bind to {}: {}", addr, e);
            eprintln!(
                "   Hint: Port {} may already be in use. Check with: lsof -i :{}",
                port, port
            );
            std::process::exit(1);
        }
    };

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/docs", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("FATAL: Server error: {}", e);
        std::process::exit(1);
    }
}
