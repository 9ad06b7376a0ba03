//! Application layer for the Quest Catalog context.

pub mod command_handlers;
pub mod query_handlers;

#[cfg(test)]
mod stub;
