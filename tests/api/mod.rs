//! REST API endpoint tests

mod cors_tests;
mod health_tests;
mod nominee_tests;
