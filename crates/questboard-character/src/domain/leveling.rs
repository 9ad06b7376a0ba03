//! Leveling policy: level is derived from cumulative experience.

/// Experience required to advance one level.
pub const EXPERIENCE_PER_LEVEL: i64 = 100;

/// Returns the level for a cumulative experience total.
///
/// `level = floor(experience / 100) + 1`. Negative totals never occur for a
/// stored character and are treated as zero.
#[must_use]
pub fn level_for_experience(experience: i64) -> i64 {
    experience.max(0) / EXPERIENCE_PER_LEVEL + 1
}
