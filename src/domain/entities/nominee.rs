//! Nominee entity and repository traits.
//!
//! Maps to the `nominee_details` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::shared::error::AppError;

/// A person designated to receive benefits from a loan application.
///
/// Maps to the `nominee_details` table:
/// - id: BIGINT PRIMARY KEY (always equal to application_id)
/// - application_id: BIGINT NOT NULL UNIQUE REFERENCES loan_applications(id)
/// - nominee_name: VARCHAR(100) NULL
/// - relationship: VARCHAR(50) NULL
/// - nominee_dob: DATE NULL
/// - nominee_address: VARCHAR(500) NULL
/// - nominee_phone: VARCHAR(20) NULL
/// - nominee_email: VARCHAR(255) NULL
/// - nominee_aadhaar: VARCHAR(12) NULL
/// - nominee_pan: VARCHAR(10) NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Nominee {
    /// Nominee identifier; one nominee per application, so it mirrors `application_id`
    pub id: i64,

    /// Owning loan application
    pub application_id: i64,

    pub nominee_name: Option<String>,

    /// Relationship to the applicant (e.g. "Spouse", "Parent")
    pub relationship: Option<String>,

    pub nominee_dob: Option<NaiveDate>,
    pub nominee_address: Option<String>,
    pub nominee_phone: Option<String>,
    pub nominee_email: Option<String>,

    /// National ID number, expected to be 12 digits
    pub nominee_aadhaar: Option<String>,

    /// Tax ID
    pub nominee_pan: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The overwritable fields of a nominee.
///
/// Applying them replaces every stored value, so `None` clears a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NomineeFields {
    pub nominee_name: Option<String>,
    pub relationship: Option<String>,
    pub nominee_dob: Option<NaiveDate>,
    pub nominee_address: Option<String>,
    pub nominee_phone: Option<String>,
    pub nominee_email: Option<String>,
    pub nominee_aadhaar: Option<String>,
    pub nominee_pan: Option<String>,
}

impl Nominee {
    /// Create an empty nominee for an application.
    ///
    /// The identifier defaults to the application identifier.
    pub fn new(application_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: application_id,
            application_id,
            nominee_name: None,
            relationship: None,
            nominee_dob: None,
            nominee_address: None,
            nominee_phone: None,
            nominee_email: None,
            nominee_aadhaar: None,
            nominee_pan: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every nominee field with `fields`.
    pub fn apply(&mut self, fields: NomineeFields) {
        self.nominee_name = fields.nominee_name;
        self.relationship = fields.relationship;
        self.nominee_dob = fields.nominee_dob;
        self.nominee_address = fields.nominee_address;
        self.nominee_phone = fields.nominee_phone;
        self.nominee_email = fields.nominee_email;
        self.nominee_aadhaar = fields.nominee_aadhaar;
        self.nominee_pan = fields.nominee_pan;
    }

    /// Snapshot of the overwritable fields.
    pub fn fields(&self) -> NomineeFields {
        NomineeFields {
            nominee_name: self.nominee_name.clone(),
            relationship: self.relationship.clone(),
            nominee_dob: self.nominee_dob,
            nominee_address: self.nominee_address.clone(),
            nominee_phone: self.nominee_phone.clone(),
            nominee_email: self.nominee_email.clone(),
            nominee_aadhaar: self.nominee_aadhaar.clone(),
            nominee_pan: self.nominee_pan.clone(),
        }
    }
}

/// A unit of work over nominee storage.
///
/// Everything done through a session becomes visible atomically on
/// [`commit`](NomineeSession::commit). Dropping a session without committing
/// rolls it back.
#[async_trait]
pub trait NomineeSession: Send {
    /// Check that a loan application exists without loading it.
    async fn application_exists(&mut self, application_id: i64) -> Result<bool, AppError>;

    /// Find all nominees for an application.
    async fn find_by_application_id(&mut self, application_id: i64)
        -> Result<Vec<Nominee>, AppError>;

    /// Find a nominee by id, scoped to its application.
    async fn find_by_id_and_application_id(
        &mut self,
        id: i64,
        application_id: i64,
    ) -> Result<Option<Nominee>, AppError>;

    /// Insert a new nominee. Fails with `AppError::Conflict` if one exists.
    async fn insert(&mut self, nominee: &Nominee) -> Result<Nominee, AppError>;

    /// Insert or fully overwrite a nominee by id.
    async fn save(&mut self, nominee: &Nominee) -> Result<Nominee, AppError>;

    /// Overwrite an existing nominee, scoped to its application.
    ///
    /// Returns `None` without writing when no such row exists at the time
    /// of the write.
    async fn update(&mut self, nominee: &Nominee) -> Result<Option<Nominee>, AppError>;

    /// Delete a nominee scoped to its application. Returns rows removed.
    async fn delete_by_id_and_application_id(
        &mut self,
        id: i64,
        application_id: i64,
    ) -> Result<u64, AppError>;

    /// Delete every nominee of an application. Returns rows removed.
    async fn delete_by_application_id(&mut self, application_id: i64) -> Result<u64, AppError>;

    /// Make the session's writes durable.
    async fn commit(self) -> Result<(), AppError>;
}

/// Repository trait for nominee storage.
#[async_trait]
pub trait NomineeRepository: Send + Sync {
    type Session: NomineeSession;

    /// Open a new unit of work.
    async fn begin(&self) -> Result<Self::Session, AppError>;
}
