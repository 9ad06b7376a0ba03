//! Questboard Core: shared domain abstractions.
//!
//! This crate defines the error type, clock abstraction and identifier
//! types that every other Questboard crate depends on. It contains no
//! infrastructure code.

pub mod clock;
pub mod error;
pub mod types;
pub mod validation;
