//! Questboard: quest assignment and completion orchestration.
//!
//! Keeps a quest's persisted status and its queue membership consistent:
//! accepting moves a quest from `Pending` to `InProgress` and onto the
//! character's queue, completing pops it, marks it `Completed`, and grants
//! its experience.

mod service;

pub use service::QuestAssignmentService;
