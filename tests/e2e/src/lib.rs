//! End-to-end test support for recite
//!
//! Shared fixtures and session harness used by the journey tests under
//! `tests/`.

pub mod harness;
pub mod mocks;
