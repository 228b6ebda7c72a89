use std::collections::BTreeSet;

use chrono::Utc;
use serde::Serialize;

use super::catalog::{Achievement, ProgressSnapshot, ACHIEVEMENTS};
use crate::events::Event;

/// Achievements in `catalog` that are not yet in `achieved` and whose
/// predicate holds for `snapshot`, in catalog order.
///
/// Already-achieved entries are skipped before their predicate is called.
pub fn evaluate<'a>(
    catalog: &'a [Achievement],
    snapshot: &ProgressSnapshot,
    achieved: &BTreeSet<String>,
) -> Vec<&'a Achievement> {
    catalog
        .iter()
        .filter(|a| !achieved.contains(a.id))
        .filter(|a| a.is_met(snapshot))
        .collect()
}

/// The set of unlocked badges. Grows only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AchievementBook {
    achieved: BTreeSet<String>,
}

/// One catalog entry together with whether it has been unlocked.
#[derive(Debug, Clone, Serialize)]
pub struct BadgeStatus {
    #[serde(flatten)]
    pub achievement: Achievement,
    pub achieved: bool,
}

impl AchievementBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_achieved(&self, id: &str) -> bool {
        self.achieved.contains(id)
    }

    pub fn achieved(&self) -> &BTreeSet<String> {
        &self.achieved
    }

    /// Check the whole catalog against `snapshot`, record new unlocks, and
    /// return one event per newly unlocked badge.
    pub fn update(&mut self, snapshot: &ProgressSnapshot) -> Vec<Event> {
        let newly = evaluate(&ACHIEVEMENTS, snapshot, &self.achieved);
        newly
            .into_iter()
            .map(|a| {
                self.achieved.insert(a.id.to_string());
                tracing::info!(id = a.id, "achievement unlocked");
                Event::AchievementUnlocked {
                    id: a.id.to_string(),
                    name: a.name.to_string(),
                    description: a.description.to_string(),
                    at: Utc::now(),
                }
            })
            .collect()
    }

    /// Catalog with achieved flags, unlocked first like the badge shelf.
    pub fn statuses(&self) -> Vec<BadgeStatus> {
        let (mut done, todo): (Vec<_>, Vec<_>) = ACHIEVEMENTS
            .iter()
            .map(|a| BadgeStatus {
                achievement: *a,
                achieved: self.is_achieved(a.id),
            })
            .partition(|s| s.achieved);
        done.extend(todo);
        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_words(words: u64) -> ProgressSnapshot {
        let mut s = ProgressSnapshot::default();
        s.stats.word_count = words;
        s
    }

    #[test]
    fn unlocks_once() {
        let mut book = AchievementBook::new();
        let events = book.update(&snapshot_with_words(150));
        assert_eq!(events.len(), 1);
        assert!(book.is_achieved("first_words"));
        assert!(book.update(&snapshot_with_words(150)).is_empty());
    }

    #[test]
    fn never_revoked() {
        let mut book = AchievementBook::new();
        book.update(&snapshot_with_words(1500));
        book.update(&snapshot_with_words(0));
        assert!(book.is_achieved("first_words"));
        assert!(book.is_achieved("novelist_start"));
    }

    #[test]
    fn evaluate_skips_achieved_ids() {
        let mut achieved = BTreeSet::new();
        achieved.insert("first_words".to_string());
        let found = evaluate(&ACHIEVEMENTS, &snapshot_with_words(1200), &achieved);
        let ids: Vec<_> = found.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["novelist_start"]);
    }

    #[test]
    fn statuses_put_unlocked_first() {
        let mut book = AchievementBook::new();
        let mut s = ProgressSnapshot::default();
        s.stats.level = 10;
        book.update(&s);
        let statuses = book.statuses();
        assert_eq!(statuses.len(), ACHIEVEMENTS.len());
        assert!(statuses[0].achieved && statuses[1].achieved);
        assert!(!statuses[2].achieved);
    }
}
