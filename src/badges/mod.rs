// SPDX-License-Identifier: MIT
//! Badge system — 10 pre-defined badges derived from aggregate skill
//! statistics.
//!
//! Badges are never persisted: every read recomputes the earned set from
//! the current skill collection. Output order always follows the catalog.

use serde::{Deserialize, Serialize};

use crate::skills::Skill;

// ─── Badge ID constants ───────────────────────────────────────────────────────

pub const WELL_ROUNDED: &str = "b1";
pub const MASTERMIND: &str = "b2";
pub const EXPERT_TRIO: &str = "b3";
pub const PERFECTIONIST: &str = "b4";
pub const CLIMBER: &str = "b5";
pub const HIGH_ACHIEVER: &str = "b6";
pub const PERSISTENT: &str = "b7";
pub const GENERALIST: &str = "b8";
pub const MARATHON: &str = "b9";
pub const STEADY_GROWTH: &str = "b10";

// ─── Badge definitions ────────────────────────────────────────────────────────

/// Return all defined badges as `(id, name, description)` tuples.
///
/// This list is the canonical catalog. `compute_badges` emits earned
/// badges in exactly this order.
pub fn all_definitions() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        (
            WELL_ROUNDED,
            "Well-Rounded",
            "Average skill level of 3.5 or higher.",
        ),
        (
            MASTERMIND,
            "Mastermind",
            "Average skill level of 4.5 or higher.",
        ),
        (EXPERT_TRIO, "Expert Trio", "Three skills at level 5."),
        (PERFECTIONIST, "Perfectionist", "Five skills at level 5."),
        (CLIMBER, "Climber", "Five skills at level 4 or higher."),
        (
            HIGH_ACHIEVER,
            "High Achiever",
            "Eight skills at level 4 or higher.",
        ),
        (PERSISTENT, "Persistent", "Eight skills tracked."),
        (GENERALIST, "Generalist", "Ten skills tracked."),
        (MARATHON, "Marathon", "Fifteen skills tracked."),
        (
            STEADY_GROWTH,
            "Steady Growth",
            "Six skills at level 3 or higher.",
        ),
    ]
}

// ─── Badge model ──────────────────────────────────────────────────────────────

/// A derived achievement flag. Membership in the computed set is a pure
/// predicate over aggregate skill statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Catalog id, `"b1"` through `"b10"`. Stable across versions.
    pub id: String,

    /// Human-readable badge name, e.g. `"Well-Rounded"`.
    pub name: String,

    /// Short description shown on the badge card.
    pub description: String,
}

// ─── Aggregate statistics ─────────────────────────────────────────────────────

/// The statistics badge rules are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillStats {
    /// Count of skills.
    pub total: usize,
    /// Mean level, 0.0 for an empty collection.
    pub avg: f64,
    /// Count of skills with level >= 5.
    pub count5: usize,
    /// Count of skills with level >= 4.
    pub count4: usize,
    /// Count of skills with level >= 3.
    pub count3: usize,
}

impl SkillStats {
    pub fn from_skills(skills: &[Skill]) -> Self {
        let total = skills.len();
        let sum: i64 = skills.iter().map(|s| s.level).sum();
        Self {
            total,
            avg: if total == 0 {
                0.0
            } else {
                sum as f64 / total as f64
            },
            count5: skills.iter().filter(|s| s.level >= 5).count(),
            count4: skills.iter().filter(|s| s.level >= 4).count(),
            count3: skills.iter().filter(|s| s.level >= 3).count(),
        }
    }

    /// Whether the badge with the given catalog id is earned. Each rule is
    /// evaluated independently; any subset may fire.
    pub fn earns(&self, id: &str) -> bool {
        match id {
            WELL_ROUNDED => self.avg >= 3.5,
            MASTERMIND => self.avg >= 4.5,
            EXPERT_TRIO => self.count5 >= 3,
            PERFECTIONIST => self.count5 >= 5,
            CLIMBER => self.count4 >= 5,
            HIGH_ACHIEVER => self.count4 >= 8,
            PERSISTENT => self.total >= 8,
            GENERALIST => self.total >= 10,
            MARATHON => self.total >= 15,
            STEADY_GROWTH => self.count3 >= 6,
            _ => false,
        }
    }
}

// ─── Derivation ───────────────────────────────────────────────────────────────

/// Compute the earned badge set for a skill collection.
///
/// Pure and deterministic: repeated calls with unchanged input yield
/// identical output, in catalog order.
pub fn compute_badges(skills: &[Skill]) -> Vec<Badge> {
    let stats = SkillStats::from_skills(skills);
    all_definitions()
        .into_iter()
        .filter(|(id, _, _)| stats.earns(id))
        .map(|(id, name, description)| Badge {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(levels: &[i64]) -> Vec<Skill> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &level)| Skill {
                id: format!("s{i}"),
                name: format!("skill-{i}"),
                level,
            })
            .collect()
    }

    fn earned_ids(levels: &[i64]) -> Vec<String> {
        compute_badges(&skills(levels))
            .into_iter()
            .map(|b| b.id)
            .collect()
    }

    #[test]
    fn catalog_has_ten_unique_ids() {
        let defs = all_definitions();
        assert_eq!(defs.len(), 10);
        let mut ids: Vec<&str> = defs.iter().map(|(id, _, _)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn empty_collection_earns_nothing() {
        assert!(compute_badges(&[]).is_empty());
        let stats = SkillStats::from_skills(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.avg, 0.0);
    }

    #[test]
    fn average_boundary_is_inclusive() {
        // avg exactly 3.5 earns Well-Rounded
        assert!(earned_ids(&[3, 4]).contains(&WELL_ROUNDED.to_string()));
        // just below does not
        assert!(!earned_ids(&[3, 3]).contains(&WELL_ROUNDED.to_string()));
        // avg 4.5 earns Mastermind as well
        let ids = earned_ids(&[4, 5]);
        assert!(ids.contains(&WELL_ROUNDED.to_string()));
        assert!(ids.contains(&MASTERMIND.to_string()));
    }

    #[test]
    fn eight_level_four_skills_earn_exact_set() {
        // total=8, avg=4.0, count5=0, count4=8, count3=8:
        // b1 (avg>=3.5), b5 (count4>=5), b6 (count4>=8), b7 (total>=8),
        // b10 (count3>=6) — and High Achiever implies Climber.
        let ids = earned_ids(&[4, 4, 4, 4, 4, 4, 4, 4]);
        assert_eq!(
            ids,
            vec![WELL_ROUNDED, CLIMBER, HIGH_ACHIEVER, PERSISTENT, STEADY_GROWTH]
        );
    }

    #[test]
    fn count_thresholds() {
        let ids = earned_ids(&[5, 5, 5]);
        assert!(ids.contains(&EXPERT_TRIO.to_string()));
        assert!(!ids.contains(&PERFECTIONIST.to_string()));

        let ids = earned_ids(&[5, 5, 5, 5, 5]);
        assert!(ids.contains(&PERFECTIONIST.to_string()));
        assert!(ids.contains(&CLIMBER.to_string()));
    }

    #[test]
    fn size_thresholds() {
        assert!(!earned_ids(&[0; 7]).contains(&PERSISTENT.to_string()));
        assert!(earned_ids(&[0; 8]).contains(&PERSISTENT.to_string()));
        assert!(earned_ids(&[0; 10]).contains(&GENERALIST.to_string()));
        assert!(earned_ids(&[0; 15]).contains(&MARATHON.to_string()));
    }

    #[test]
    fn fifteen_maxed_skills_earn_everything_in_catalog_order() {
        let all: Vec<String> = all_definitions()
            .into_iter()
            .map(|(id, _, _)| id.to_string())
            .collect();
        assert_eq!(earned_ids(&[5; 15]), all);
    }

    #[test]
    fn adding_a_high_skill_preserves_earned_badges() {
        // count- and total-based badges are monotonic in collection growth;
        // a level-5 addition can only raise the average.
        let base = skills(&[4, 4, 4, 4, 4]);
        let before = compute_badges(&base);
        let mut grown = base.clone();
        grown.push(Skill {
            id: "extra".to_string(),
            name: "extra".to_string(),
            level: 5,
        });
        let after = compute_badges(&grown);
        for badge in &before {
            assert!(
                after.contains(badge),
                "{} lost after adding a level-5 skill",
                badge.id
            );
        }
    }

    #[test]
    fn deterministic_and_order_stable() {
        let collection = skills(&[5, 4, 3, 5, 4, 3, 5, 2]);
        let first = compute_badges(&collection);
        let second = compute_badges(&collection);
        assert_eq!(first, second);

        // earned set is ordered by catalog position
        let positions: Vec<usize> = first
            .iter()
            .map(|b| {
                all_definitions()
                    .iter()
                    .position(|(id, _, _)| *id == b.id)
                    .unwrap()
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn badge_roundtrip_json() {
        let badge = Badge {
            id: WELL_ROUNDED.to_string(),
            name: "Well-Rounded".to_string(),
            description: "Average skill level of 3.5 or higher.".to_string(),
        };
        let json = serde_json::to_string(&badge).unwrap();
        let back: Badge = serde_json::from_str(&json).unwrap();
        assert_eq!(back, badge);
    }
}
