//! Data Transfer Objects
//!
//! Request and response bodies for the HTTP API.

pub mod request;
pub mod response;

pub use request::NomineeRequest;
pub use response::NomineeResponse;
