//! Shared test doubles and utilities for the Questboard RPG quest tracker.

mod clock;
mod repository;

pub use clock::{FixedClock, fixed_now};
pub use repository::{
    FailingCharacterRepository, FailingQuestRepository, InMemoryCharacterRepository,
    InMemoryQuestRepository,
};
