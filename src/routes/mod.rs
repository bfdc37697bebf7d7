//! HTTP route handlers organized by functionality

pub mod admin;
pub mod auth;
pub mod health;
pub mod jobs;
