//! Integration tests for skinarb-bot.
//!
//! These tests run the marketplace clients and the application against a
//! local mock HTTP server:
//! - Response decoding and price conversion
//! - Rate-limit retry and backoff
//! - Degradation to empty results on failure

pub mod common;
