//! Integration tests for the round-trip benchmark harness.
//!
//! These tests run the benchmark end-to-end on real threads:
//! - Short smoke runs that execute on every `cargo test`
//! - Retry completeness under injected transport faults
//! - A full-size `#[ignore]`d run for quiet multi-core machines

mod retry_test;
mod roundtrip_test;
