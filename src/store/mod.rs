//! In-memory application stores
//!
//! The portal's persistence is out of scope here; these maps stand in for
//! the relational store behind the same interfaces the auth core consumes.

pub mod jobs;
pub mod users;
