//! Test data factories

pub mod fixtures;

pub use fixtures::DeckFactory;
