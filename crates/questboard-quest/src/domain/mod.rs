//! Domain model for the Quest Catalog context.

pub mod aggregates;
pub mod commands;
pub mod repository;
