//! Questboard: Quest Catalog bounded context.
//!
//! Responsible for quest definitions, their workflow status, and the
//! assignment links recording which character took which quest.

pub mod application;
pub mod domain;
