//! Nominee Service
//!
//! Business rules for the nominee attached to a loan application.
//!
//! Each application has at most one nominee, whose id equals the application
//! id. Every operation runs in its own storage session: reads, checks and the
//! single write commit together or not at all. Create, update and upsert
//! replace all nominee fields; a `None` field clears the stored value.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Nominee, NomineeFields, NomineeRepository, NomineeSession};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Nominee service trait defining nominee operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NomineeService: Send + Sync {
    /// Get the nominee of an application, if any.
    async fn get_by_application_id(&self, application_id: i64)
        -> Result<Option<Nominee>, NomineeError>;

    /// Get every nominee of an application.
    async fn get_all_by_application_id(&self, application_id: i64)
        -> Result<Vec<Nominee>, NomineeError>;

    /// Get a nominee by id, only if it belongs to the application.
    async fn get_one(
        &self,
        application_id: i64,
        nominee_id: i64,
    ) -> Result<Option<Nominee>, NomineeError>;

    /// Create the nominee of an application.
    async fn create_nominee(
        &self,
        application_id: i64,
        fields: NomineeFields,
    ) -> Result<Nominee, NomineeError>;

    /// Overwrite an existing nominee.
    async fn update_nominee(
        &self,
        application_id: i64,
        nominee_id: i64,
        fields: NomineeFields,
    ) -> Result<Nominee, NomineeError>;

    /// Create the nominee of an application or overwrite the existing one.
    async fn upsert_nominee(
        &self,
        application_id: i64,
        fields: NomineeFields,
    ) -> Result<Nominee, NomineeError>;

    /// Delete a nominee scoped to its application. Absent nominees are ignored.
    async fn delete_nominee(&self, application_id: i64, nominee_id: i64)
        -> Result<(), NomineeError>;

    /// Delete the nominee of an application. Absent nominees are ignored.
    async fn delete_by_application_id(&self, application_id: i64) -> Result<(), NomineeError>;
}

/// Nominee service errors.
#[derive(Debug, thiserror::Error)]
pub enum NomineeError {
    #[error("Nominee not found")]
    NotFound,

    #[error("Loan application not found")]
    ApplicationNotFound,

    #[error("Nominee already exists for this application")]
    AlreadyExists,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl NomineeError {
    fn outcome(&self) -> &'static str {
        match self {
            NomineeError::NotFound => "not_found",
            NomineeError::ApplicationNotFound => "application_not_found",
            NomineeError::AlreadyExists => "conflict",
            NomineeError::Internal(_) => "error",
        }
    }
}

impl From<AppError> for NomineeError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Conflict(_) => NomineeError::AlreadyExists,
            e => NomineeError::Internal(e.to_string()),
        }
    }
}

/// NomineeService implementation over any nominee repository.
pub struct NomineeServiceImpl<R>
where
    R: NomineeRepository,
{
    nominee_repo: Arc<R>,
}

impl<R> NomineeServiceImpl<R>
where
    R: NomineeRepository,
{
    pub fn new(nominee_repo: Arc<R>) -> Self {
        Self { nominee_repo }
    }

    async fn ensure_application(
        session: &mut R::Session,
        application_id: i64,
    ) -> Result<(), NomineeError> {
        if session.application_exists(application_id).await? {
            Ok(())
        } else {
            Err(NomineeError::ApplicationNotFound)
        }
    }
}

fn record<T>(operation: &str, result: &Result<T, NomineeError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    metrics::record_nominee_operation(operation, outcome);
}

#[async_trait]
impl<R> NomineeService for NomineeServiceImpl<R>
where
    R: NomineeRepository + 'static,
{
    async fn get_by_application_id(
        &self,
        application_id: i64,
    ) -> Result<Option<Nominee>, NomineeError> {
        let nominees = self.get_all_by_application_id(application_id).await?;
        Ok(nominees.into_iter().next())
    }

    async fn get_all_by_application_id(
        &self,
        application_id: i64,
    ) -> Result<Vec<Nominee>, NomineeError> {
        let mut session = self.nominee_repo.begin().await?;
        let nominees = session.find_by_application_id(application_id).await?;
        session.commit().await?;

        tracing::debug!(application_id, count = nominees.len(), "Loaded nominees");
        Ok(nominees)
    }

    async fn get_one(
        &self,
        application_id: i64,
        nominee_id: i64,
    ) -> Result<Option<Nominee>, NomineeError> {
        let mut session = self.nominee_repo.begin().await?;
        let nominee = session
            .find_by_id_and_application_id(nominee_id, application_id)
            .await?;
        session.commit().await?;

        Ok(nominee)
    }

    async fn create_nominee(
        &self,
        application_id: i64,
        fields: NomineeFields,
    ) -> Result<Nominee, NomineeError> {
        let result = async {
            let mut session = self.nominee_repo.begin().await?;
            Self::ensure_application(&mut session, application_id).await?;

            let mut nominee = Nominee::new(application_id);
            nominee.apply(fields);

            let created = session.insert(&nominee).await?;
            session.commit().await?;
            Ok::<_, NomineeError>(created)
        }
        .await;

        record("create", &result);
        if let Ok(created) = &result {
            tracing::info!(application_id, nominee_id = created.id, "Nominee created");
        }
        result
    }

    async fn update_nominee(
        &self,
        application_id: i64,
        nominee_id: i64,
        fields: NomineeFields,
    ) -> Result<Nominee, NomineeError> {
        let result = async {
            let mut target = Nominee::new(application_id);
            target.id = nominee_id;
            target.apply(fields);

            // Scoped UPDATE: a concurrently deleted row stays deleted
            let mut session = self.nominee_repo.begin().await?;
            let updated = session
                .update(&target)
                .await?
                .ok_or(NomineeError::NotFound)?;
            session.commit().await?;
            Ok::<_, NomineeError>(updated)
        }
        .await;

        record("update", &result);
        if result.is_ok() {
            tracing::info!(application_id, nominee_id, "Nominee updated");
        }
        result
    }

    async fn upsert_nominee(
        &self,
        application_id: i64,
        fields: NomineeFields,
    ) -> Result<Nominee, NomineeError> {
        let result = async {
            let mut session = self.nominee_repo.begin().await?;
            Self::ensure_application(&mut session, application_id).await?;

            let mut nominee = session
                .find_by_application_id(application_id)
                .await?
                .into_iter()
                .next()
                .unwrap_or_else(|| Nominee::new(application_id));

            nominee.application_id = application_id;
            nominee.apply(fields);

            let saved = session.save(&nominee).await?;
            session.commit().await?;
            Ok::<_, NomineeError>(saved)
        }
        .await;

        record("upsert", &result);
        if let Ok(saved) = &result {
            tracing::info!(application_id, nominee_id = saved.id, "Nominee saved");
        }
        result
    }

    async fn delete_nominee(
        &self,
        application_id: i64,
        nominee_id: i64,
    ) -> Result<(), NomineeError> {
        let mut session = self.nominee_repo.begin().await?;
        let removed = session
            .delete_by_id_and_application_id(nominee_id, application_id)
            .await?;
        session.commit().await?;

        metrics::record_nominee_operation("delete", "ok");
        tracing::info!(application_id, nominee_id, removed, "Nominee delete");
        Ok(())
    }

    async fn delete_by_application_id(&self, application_id: i64) -> Result<(), NomineeError> {
        let mut session = self.nominee_repo.begin().await?;
        let removed = session.delete_by_application_id(application_id).await?;
        session.commit().await?;

        metrics::record_nominee_operation("delete", "ok");
        tracing::info!(application_id, removed, "Application nominees delete");
        Ok(())
    }
}
