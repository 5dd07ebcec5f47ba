//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **NomineeService**: nominee get/create/update/upsert/delete per loan application

pub mod nominee_service;

pub use nominee_service::{NomineeError, NomineeService, NomineeServiceImpl};

#[cfg(test)]
pub use nominee_service::MockNomineeService;
