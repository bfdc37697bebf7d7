//! # Server Module
//!
//! HTTP server setup and route configuration for the placement portal.
//!
//! The router is the authorization policy's route → requirement table:
//! routes without a policy layer are public, everything else names its
//! requirement explicitly. The authentication gate wraps the whole router
//! so every request carries an identity context (or none) by the time a
//! policy layer sees it.

use anyhow::Context;
use axum::http::{Method, header};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::jwt::TokenService;
use crate::auth::middleware::authenticate;
use crate::auth::models::Role;
use crate::auth::password;
use crate::auth::policy;
use crate::auth::revocation::{MemoryRevocationStore, RevocationBackend, spawn_sweeper};
use crate::auth::session::SessionService;
use crate::config::CONFIG;
use crate::routes;
use crate::store::jobs::JobBoard;
use crate::store::users::UserDirectory;

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserDirectory>,
    pub tokens: Arc<TokenService>,
    pub revocations: Arc<dyn RevocationBackend>,
    pub sessions: Arc<SessionService>,
    pub jobs: Arc<JobBoard>,
}

/// Build the full application router over the given state.
pub fn build_router(state: AppState) -> Router {
    // Public surface: reachable with no identity, including with a garbage
    // Authorization header.
    let public_routes = Router::new()
        .route("/ping", get(routes::health::ping))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/jobs", get(routes::jobs::list_jobs));

    let authenticated_routes = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .layer(from_fn(policy::require_authenticated));

    let student_routes = Router::new()
        .route("/api/jobs/{id}/apply", post(routes::jobs::apply))
        .layer(from_fn(policy::require_student));

    let staff_routes = Router::new()
        .route("/api/jobs", post(routes::jobs::post_job))
        .layer(from_fn(policy::require_staff));

    // Route layer only demands authentication; the handler asserts Admin.
    let admin_routes = Router::new()
        .route("/api/admin/overview", get(routes::admin::overview))
        .layer(from_fn(policy::require_authenticated));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(student_routes)
        .merge(staff_routes)
        .merge(admin_routes)
        .layer(from_fn_with_state(state.clone(), authenticate))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    header::ORIGIN,
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                    header::AUTHORIZATION,
                ]),
        )
        .with_state(state)
}

/// Starts the placement portal HTTP server.
pub async fn start() -> anyhow::Result<()> {
    let config = &*CONFIG;

    let users = Arc::new(UserDirectory::new());
    let admin_digest = password::hash_password(&config.auth.admin_password)?;
    users.upsert(&config.auth.admin_username, admin_digest, vec![Role::Admin]);

    let tokens = Arc::new(TokenService::new(&config.auth.jwt_secret));
    let revocations: Arc<dyn RevocationBackend> = Arc::new(MemoryRevocationStore::new());
    let sessions = Arc::new(SessionService::new(
        users.clone(),
        tokens.clone(),
        revocations.clone(),
    ));

    // Periodic blacklist garbage collection, detached from request handling.
    let _sweeper = spawn_sweeper(
        revocations.clone(),
        std::time::Duration::from_secs(config.auth.sweep_interval_secs),
    );

    let state = AppState {
        users,
        tokens,
        revocations,
        sessions,
        jobs: Arc::new(JobBoard::new()),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("placement server listening on http://{addr}");
    tracing::info!("health check available at http://{addr}/ping");

    axum::serve(listener, app).await?;
    Ok(())
}
