//! # Placement Server
//!
//! Multi-role placement-portal backend built with Rust, Axum, and Tokio.
//! The security core — stateless session tokens with revocation, a
//! per-request authentication gate, and role-based authorization — lives in
//! the `auth` module; the `routes` and `store` modules are the thin
//! collaborator surface it protects.
//!
//! ## Environment Setup
//! `JWT_SECRET` is required; see `config.rs` for the rest.
//!
//! ## Running the Server
//! ```bash
//! JWT_SECRET=... cargo run
//! ```

mod auth;
mod config;
mod routes;
mod server;
mod store;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();

    tracing::info!(
        "starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    server::start().await
}
