//! # Nominee Service Library
//!
//! This crate serves the nominee attached to a loan application:
//! - RESTful HTTP API scoped under an application identifier
//! - PostgreSQL or in-memory storage behind a repository trait
//! - One transaction per service operation
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Nominee entity and repository traits
//! - **Application Layer**: Nominee service and DTOs
//! - **Infrastructure Layer**: Database, repositories and metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! nominee_service/
//! +-- config/         Configuration management
//! +-- domain/         Nominee entity and repository traits
//! +-- application/    Nominee service and DTOs
//! +-- infrastructure/ Database, repositories, metrics
//! +-- presentation/   HTTP routes, handlers, middleware
//! +-- shared/         Error types
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
