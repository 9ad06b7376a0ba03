//! Questboard: Character Management bounded context.
//!
//! Responsible for character sheets, cumulative experience, and the
//! leveling policy derived from it.

pub mod application;
pub mod domain;
