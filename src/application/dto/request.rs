//! Request DTOs
//!
//! Data structures for API request bodies.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::NomineeFields;

/// Create, update or upsert nominee request.
///
/// Every field is optional and a missing field is read as `null`. The whole
/// record is replaced on write, so omitted fields clear stored values.
/// Values are stored as sent; only the date must parse.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NomineeRequest {
    pub nominee_name: Option<String>,
    pub relationship: Option<String>,

    /// ISO date, e.g. "1990-01-01"
    pub nominee_dob: Option<NaiveDate>,

    pub nominee_address: Option<String>,
    pub nominee_phone: Option<String>,
    pub nominee_email: Option<String>,
    pub nominee_aadhaar: Option<String>,
    pub nominee_pan: Option<String>,
}

impl From<NomineeRequest> for NomineeFields {
    fn from(request: NomineeRequest) -> Self {
        Self {
            nominee_name: request.nominee_name,
            relationship: request.relationship,
            nominee_dob: request.nominee_dob,
            nominee_address: request.nominee_address,
            nominee_phone: request.nominee_phone,
            nominee_email: request.nominee_email,
            nominee_aadhaar: request.nominee_aadhaar,
            nominee_pan: request.nominee_pan,
        }
    }
}
