//! Questboard RPG: HTTP API.
//!
//! Exposes characters, quests and the quest queues over JSON. The binary in
//! `main.rs` wires the PostgreSQL stores into [`state::AppState`]; tests wire
//! the in-memory ones.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
