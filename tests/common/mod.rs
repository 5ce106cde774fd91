//! Common test utilities for airdash.
//!
//! This module provides shared utilities for testing the airdash server.

// Re-export all common test utilities
pub mod assertions;
pub mod http_client;
pub mod test_data;
