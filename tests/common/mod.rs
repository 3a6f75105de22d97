//! Common test utilities and helpers
//!
//! Shared fixtures for the integration tests: git repositories on disk and
//! in-memory stand-ins for the lookups and the process runner.

#![allow(dead_code)]

pub mod mock_services;
pub mod test_helpers;
