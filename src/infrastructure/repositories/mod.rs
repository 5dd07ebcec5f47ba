//! Repository Implementations
//!
//! Implementations of the domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgNomineeRepository** - PostgreSQL nominee storage, one transaction per session
//! - **InMemoryNomineeRepository** - process-local nominee storage
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use crate::domain::{NomineeRepository, NomineeSession};
//! use crate::infrastructure::repositories::PgNomineeRepository;
//!
//! async fn primary_nominee(pool: PgPool) -> Result<Option<Nominee>, AppError> {
//!     let repo = PgNomineeRepository::new(pool);
//!     let mut session = repo.begin().await?;
//!     let found = session.find_by_application_id(42).await?;
//!     session.commit().await?;
//!     Ok(found.into_iter().next())
//! }
//! ```

use async_trait::async_trait;

use crate::shared::error::AppError;

pub mod memory_nominee_repository;
pub mod nominee_repository;

pub use memory_nominee_repository::{InMemoryNomineeRepository, InMemoryNomineeSession};
pub use nominee_repository::{PgNomineeRepository, PgNomineeSession};

/// Reachability check for a storage backend.
#[async_trait]
pub trait StorageProbe: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
}
