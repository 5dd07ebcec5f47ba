//! Nominee Repository Implementation
//!
//! PostgreSQL implementation of nominee storage. Each session owns one
//! database transaction.

use async_trait::async_trait;
use sqlx::PgPool;

use super::StorageProbe;
use crate::domain::{Nominee, NomineeRepository, NomineeSession};
use crate::infrastructure::database::{PgUnitOfWork, TransactionContext};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

const NOMINEE_COLUMNS: &str = "id, application_id, nominee_name, relationship, nominee_dob, \
     nominee_address, nominee_phone, nominee_email, nominee_aadhaar, nominee_pan, \
     created_at, updated_at";

/// PostgreSQL implementation of the NomineeRepository.
#[derive(Clone)]
pub struct PgNomineeRepository {
    uow: PgUnitOfWork,
}

impl PgNomineeRepository {
    /// Creates a new PgNomineeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            uow: PgUnitOfWork::from_pool(pool),
        }
    }
}

#[async_trait]
impl NomineeRepository for PgNomineeRepository {
    type Session = PgNomineeSession;

    async fn begin(&self) -> Result<PgNomineeSession, AppError> {
        Ok(PgNomineeSession {
            tx: self.uow.begin().await?,
        })
    }
}

#[async_trait]
impl StorageProbe for PgNomineeRepository {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.uow.pool()).await?;
        Ok(())
    }
}

/// A nominee session backed by a PostgreSQL transaction.
///
/// The transaction runs at READ COMMITTED, so a row read earlier in the
/// session may be deleted by another transaction before this one writes.
/// [`update`](NomineeSession::update) is a single scoped `UPDATE` and never
/// recreates such a row; [`save`](NomineeSession::save) is an upsert and
/// will.
pub struct PgNomineeSession {
    tx: TransactionContext,
}

#[async_trait]
impl NomineeSession for PgNomineeSession {
    async fn application_exists(&mut self, application_id: i64) -> Result<bool, AppError> {
        let timer = metrics::DbTimer::start("exists", "loan_applications");
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM loan_applications WHERE id = $1)")
                .bind(application_id)
                .fetch_one(self.tx.connection())
                .await?;
        timer.observe();

        Ok(result.0)
    }

    async fn find_by_application_id(
        &mut self,
        application_id: i64,
    ) -> Result<Vec<Nominee>, AppError> {
        let timer = metrics::DbTimer::start("select", "nominee_details");
        let nominees = sqlx::query_as::<_, Nominee>(&format!(
            "SELECT {NOMINEE_COLUMNS} FROM nominee_details WHERE application_id = $1 ORDER BY id"
        ))
        .bind(application_id)
        .fetch_all(self.tx.connection())
        .await?;
        timer.observe();

        Ok(nominees)
    }

    async fn find_by_id_and_application_id(
        &mut self,
        id: i64,
        application_id: i64,
    ) -> Result<Option<Nominee>, AppError> {
        let timer = metrics::DbTimer::start("select", "nominee_details");
        let nominee = sqlx::query_as::<_, Nominee>(&format!(
            "SELECT {NOMINEE_COLUMNS} FROM nominee_details WHERE id = $1 AND application_id = $2"
        ))
        .bind(id)
        .bind(application_id)
        .fetch_optional(self.tx.connection())
        .await?;
        timer.observe();

        Ok(nominee)
    }

    async fn insert(&mut self, nominee: &Nominee) -> Result<Nominee, AppError> {
        let timer = metrics::DbTimer::start("insert", "nominee_details");
        let created = sqlx::query_as::<_, Nominee>(&format!(
            r#"
            INSERT INTO nominee_details (
                id, application_id, nominee_name, relationship, nominee_dob,
                nominee_address, nominee_phone, nominee_email, nominee_aadhaar, nominee_pan
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {NOMINEE_COLUMNS}
            "#
        ))
        .bind(nominee.id)
        .bind(nominee.application_id)
        .bind(&nominee.nominee_name)
        .bind(&nominee.relationship)
        .bind(nominee.nominee_dob)
        .bind(&nominee.nominee_address)
        .bind(&nominee.nominee_phone)
        .bind(&nominee.nominee_email)
        .bind(&nominee.nominee_aadhaar)
        .bind(&nominee.nominee_pan)
        .fetch_one(self.tx.connection())
        .await?;
        timer.observe();

        Ok(created)
    }

    /// Single-statement upsert; concurrent saves are last-write-wins.
    async fn save(&mut self, nominee: &Nominee) -> Result<Nominee, AppError> {
        let timer = metrics::DbTimer::start("upsert", "nominee_details");
        let saved = sqlx::query_as::<_, Nominee>(&format!(
            r#"
            INSERT INTO nominee_details (
                id, application_id, nominee_name, relationship, nominee_dob,
                nominee_address, nominee_phone, nominee_email, nominee_aadhaar, nominee_pan
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                application_id = EXCLUDED.application_id,
                nominee_name = EXCLUDED.nominee_name,
                relationship = EXCLUDED.relationship,
                nominee_dob = EXCLUDED.nominee_dob,
                nominee_address = EXCLUDED.nominee_address,
                nominee_phone = EXCLUDED.nominee_phone,
                nominee_email = EXCLUDED.nominee_email,
                nominee_aadhaar = EXCLUDED.nominee_aadhaar,
                nominee_pan = EXCLUDED.nominee_pan,
                updated_at = NOW()
            RETURNING {NOMINEE_COLUMNS}
            "#
        ))
        .bind(nominee.id)
        .bind(nominee.application_id)
        .bind(&nominee.nominee_name)
        .bind(&nominee.relationship)
        .bind(nominee.nominee_dob)
        .bind(&nominee.nominee_address)
        .bind(&nominee.nominee_phone)
        .bind(&nominee.nominee_email)
        .bind(&nominee.nominee_aadhaar)
        .bind(&nominee.nominee_pan)
        .fetch_one(self.tx.connection())
        .await?;
        timer.observe();

        Ok(saved)
    }

    async fn update(&mut self, nominee: &Nominee) -> Result<Option<Nominee>, AppError> {
        let timer = metrics::DbTimer::start("update", "nominee_details");
        let updated = sqlx::query_as::<_, Nominee>(&format!(
            r#"
            UPDATE nominee_details SET
                nominee_name = $3,
                relationship = $4,
                nominee_dob = $5,
                nominee_address = $6,
                nominee_phone = $7,
                nominee_email = $8,
                nominee_aadhaar = $9,
                nominee_pan = $10,
                updated_at = NOW()
            WHERE id = $1 AND application_id = $2
            RETURNING {NOMINEE_COLUMNS}
            "#
        ))
        .bind(nominee.id)
        .bind(nominee.application_id)
        .bind(&nominee.nominee_name)
        .bind(&nominee.relationship)
        .bind(nominee.nominee_dob)
        .bind(&nominee.nominee_address)
        .bind(&nominee.nominee_phone)
        .bind(&nominee.nominee_email)
        .bind(&nominee.nominee_aadhaar)
        .bind(&nominee.nominee_pan)
        .fetch_optional(self.tx.connection())
        .await?;
        timer.observe();

        Ok(updated)
    }

    async fn delete_by_id_and_application_id(
        &mut self,
        id: i64,
        application_id: i64,
    ) -> Result<u64, AppError> {
        let timer = metrics::DbTimer::start("delete", "nominee_details");
        let result =
            sqlx::query("DELETE FROM nominee_details WHERE id = $1 AND application_id = $2")
                .bind(id)
                .bind(application_id)
                .execute(self.tx.connection())
                .await?;
        timer.observe();

        Ok(result.rows_affected())
    }

    async fn delete_by_application_id(&mut self, application_id: i64) -> Result<u64, AppError> {
        let timer = metrics::DbTimer::start("delete", "nominee_details");
        let result = sqlx::query("DELETE FROM nominee_details WHERE application_id = $1")
            .bind(application_id)
            .execute(self.tx.connection())
            .await?;
        timer.observe();

        Ok(result.rows_affected())
    }

    async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await
    }
}
