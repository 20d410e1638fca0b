//! Test harness utilities

pub mod session;

pub use session::SessionBuilder;
