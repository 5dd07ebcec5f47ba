//! # Domain Entities
//!
//! Core domain entities. Entities map directly to their database tables.
//!
//! - **Nominee**: the nominee attached to a loan application
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer.

mod nominee;

pub use nominee::{Nominee, NomineeFields, NomineeRepository, NomineeSession};
