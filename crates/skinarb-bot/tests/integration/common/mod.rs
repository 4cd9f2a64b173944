//! Shared test fixtures.
//!
//! Each test binary uses a different subset of these helpers.

#![allow(dead_code)]

pub mod log_capture;
pub mod mock_http;
