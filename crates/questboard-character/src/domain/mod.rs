//! Domain model for the Character Management context.

pub mod aggregates;
pub mod commands;
pub mod leveling;
pub mod repository;
