//! # Authentication Module
//!
//! The security core of the placement portal: token issuance and parsing,
//! revocation (blacklisting), password hashing, the per-request
//! authentication gate, and the role-based authorization policy.
//!
//! The gate is deliberately fail-open: a malformed, expired, or revoked
//! token downgrades the request to "no identity" rather than rejecting it,
//! so public routes stay reachable. Authorization, not authentication, is
//! the enforcement boundary — every protected route must carry a policy
//! layer (see [`policy`]).

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod policy;
pub mod revocation;
pub mod session;
