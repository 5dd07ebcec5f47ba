//! # Domain Layer
//!
//! The domain layer holds the nominee entity and the storage contracts the
//! rest of the service is written against.
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities encapsulate field-level behavior

pub mod entities;

pub use entities::*;
