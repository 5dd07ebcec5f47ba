//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::Nominee;

/// Nominee response. Absent values serialize as explicit `null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NomineeResponse {
    pub id: i64,
    pub application_id: i64,
    pub nominee_name: Option<String>,
    pub relationship: Option<String>,
    pub nominee_dob: Option<NaiveDate>,
    pub nominee_address: Option<String>,
    pub nominee_phone: Option<String>,
    pub nominee_email: Option<String>,
    pub nominee_aadhaar: Option<String>,
    pub nominee_pan: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Nominee> for NomineeResponse {
    fn from(nominee: Nominee) -> Self {
        Self {
            id: nominee.id,
            application_id: nominee.application_id,
            nominee_name: nominee.nominee_name,
            relationship: nominee.relationship,
            nominee_dob: nominee.nominee_dob,
            nominee_address: nominee.nominee_address,
            nominee_phone: nominee.nominee_phone,
            nominee_email: nominee.nominee_email,
            nominee_aadhaar: nominee.nominee_aadhaar,
            nominee_pan: nominee.nominee_pan,
            created_at: nominee.created_at.to_rfc3339(),
            updated_at: nominee.updated_at.to_rfc3339(),
        }
    }
}
