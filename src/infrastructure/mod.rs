//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database access (PostgreSQL)
//! - Nominee repositories (PostgreSQL and in-memory)
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
