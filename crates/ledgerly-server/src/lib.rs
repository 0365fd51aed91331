//! Ledgerly Web Server
//!
//! Axum-based REST API for the Ledgerly personal finance backend.
//!
//! Security features:
//! - Bearer-token authentication (secure by default, use --no-auth for local dev)
//! - Argon2id password hashing
//! - Restrictive CORS policy
//! - Every entry is scoped to the authenticated user
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{debug, error, info, warn};

use ledgerly_core::{Allocator, Analyzer, DataStore, Ledger, ValidationError};

pub mod auth;
mod handlers;

pub use auth::{JwtConfig, DEFAULT_TOKEN_TTL_MINUTES};

/// Maximum accepted request body (64 KB)
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// User id every request acts as when authentication is disabled
pub const LOCAL_DEV_USER: &str = "local-dev";

/// Authorization header for bearer tokens
const AUTHORIZATION_HEADER: &str = "authorization";

/// Routes reachable without a token
const PUBLIC_PATHS: [&str; 2] = ["/api/auth/register", "/api/auth/login"];

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Access token signing
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Parse a comma-separated origin list, dropping blanks
    pub fn parse_origins(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Shared application state
pub struct AppState {
    pub ledger: Ledger,
    pub config: ServerConfig,
    pub allocator: Allocator,
    pub analyzer: Analyzer,
}

/// The authenticated caller, placed in request extensions by the auth
/// middleware
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
}

/// Authentication middleware - validates the bearer token and records the
/// caller for handlers
///
/// With auth disabled every request runs as [`LOCAL_DEV_USER`].
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        request.extensions_mut().insert(CurrentUser {
            id: LOCAL_DEV_USER.to_string(),
        });
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();
    if PUBLIC_PATHS.contains(&path.as_str()) {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    let Some(token) = token else {
        warn!(path = %path, "Unauthorized request - no bearer token");
        return AppError::unauthorized("Authentication required").into_response();
    };

    match auth::verify_token(&state.config.jwt, &token) {
        Ok(claims) => {
            debug!(user_id = %claims.sub, path = %path, "Authenticated via bearer token");
            request
                .extensions_mut()
                .insert(CurrentUser { id: claims.sub });
            next.run(request).await
        }
        Err(e) => {
            warn!(error = %e, path = %path, "Rejected bearer token");
            AppError::unauthorized("Invalid or expired token").into_response()
        }
    }
}

/// The caller recorded by [`auth_middleware`]
pub(crate) fn current_user(request: &Request) -> Result<CurrentUser, AppError> {
    request
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(ledger: Ledger, config: ServerConfig) -> Router {
    create_router_with_engine(ledger, config, Allocator::default(), Analyzer::default())
}

/// Create the application router with a specific allocator and analyzer
pub fn create_router_with_engine(
    ledger: Ledger,
    config: ServerConfig,
    allocator: Allocator,
    analyzer: Analyzer,
) -> Router {
    let state = Arc::new(AppState {
        ledger,
        config: config.clone(),
        allocator,
        analyzer,
    });

    let api_routes = Router::new()
        // Auth
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/me", get(handlers::get_me))
        // Profile
        .route(
            "/profile",
            get(handlers::get_profile).patch(handlers::update_profile),
        )
        // Incomes
        .route(
            "/incomes",
            get(handlers::list_incomes).post(handlers::create_income),
        )
        .route(
            "/incomes/:id",
            get(handlers::get_income)
                .put(handlers::update_income)
                .delete(handlers::delete_income),
        )
        // Expenses
        .route(
            "/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route(
            "/expenses/:id",
            get(handlers::get_expense)
                .put(handlers::update_expense)
                .delete(handlers::delete_expense),
        )
        // Savings plans
        .route(
            "/savings-plans",
            get(handlers::list_savings_plans).post(handlers::create_savings_plan),
        )
        .route(
            "/savings-plans/:id",
            get(handlers::get_savings_plan)
                .put(handlers::update_savings_plan)
                .delete(handlers::delete_savings_plan),
        )
        // Budget plans
        .route("/budget-plans/preview", post(handlers::preview_budget_plan))
        .route(
            "/budget-plans",
            get(handlers::list_budget_plans).post(handlers::create_budget_plan),
        )
        .route(
            "/budget-plans/:id",
            get(handlers::get_budget_plan)
                .put(handlers::update_budget_plan)
                .delete(handlers::delete_budget_plan),
        )
        .route(
            "/budget-plans/:id/analysis",
            get(handlers::analyze_budget_plan),
        )
        // Reports
        .route("/reports/range", get(handlers::report_range));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        // Allow specified origins
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        // Liveness stays outside the auth layer
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    ledger: Ledger,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    }

    check_store_connection(&ledger).await;

    let app = create_router(ledger, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log data store connection status
async fn check_store_connection(ledger: &Ledger) {
    let store = ledger.store();
    if !store.is_persistent() {
        warn!("⚠️  No LEDGERLY_STORE_URL set - using in-memory store, data is lost on exit");
        return;
    }

    if ledger.health_check().await {
        info!("✅ Data store connected: {}", store.describe());
    } else {
        warn!(
            "⚠️  Data store configured but not responding: {}",
            store.describe()
        );
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn conflict(msg: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Caller mistakes keep their own status and message
        if let Some(validation) = err.downcast_ref::<ValidationError>() {
            return Self::bad_request(&validation.to_string());
        }
        if let Some(core) = err.downcast_ref::<ledgerly_core::Error>() {
            match core {
                ledgerly_core::Error::Validation(v) => return Self::bad_request(&v.to_string()),
                ledgerly_core::Error::NotFound(msg) => return Self::not_found(msg),
                ledgerly_core::Error::Conflict(msg) => return Self::conflict(msg),
                ledgerly_core::Error::Auth(msg) => return Self::unauthorized(msg),
                _ => {}
            }
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
