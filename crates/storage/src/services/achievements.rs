use crate::models::{Achievement, AchievementCategory, FundingOpportunity, FundingStage, UserProgress};

use super::classification::mentions_ai;

/// XP granted the first time a user opens an opportunity.
pub const DISCOVERY_XP: i32 = 10;

pub const HIGH_SCORE: f64 = 4.5;

const fn achievement(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    xp_reward: i32,
    category: AchievementCategory,
    threshold: u32,
) -> Achievement {
    Achievement {
        id,
        title,
        description,
        xp_reward,
        category,
        threshold,
    }
}

pub static CATALOG: [Achievement; 13] = [
    achievement(
        "first-pitch",
        "First Pitch",
        "Complete your first pitch stage",
        25,
        AchievementCategory::Pitch,
        1,
    ),
    achievement(
        "validation-champion",
        "Validation Champion",
        "Complete the validation stage",
        100,
        AchievementCategory::Pitch,
        1,
    ),
    achievement(
        "pitch-master",
        "Pitch Master",
        "Complete all five pitch stages",
        100,
        AchievementCategory::Pitch,
        5,
    ),
    achievement(
        "high-scorer",
        "High Scorer",
        "Score 4.5 or higher on any pitch",
        75,
        AchievementCategory::Pitch,
        1,
    ),
    achievement(
        "feedback-collector",
        "Feedback Collector",
        "Receive feedback from three different investors",
        50,
        AchievementCategory::Feedback,
        3,
    ),
    achievement(
        "discover-public",
        "Public Funding Explorer",
        "Discover five public funding opportunities",
        50,
        AchievementCategory::Funding,
        5,
    ),
    achievement(
        "discover-private",
        "Private Capital Scout",
        "Discover five private funding opportunities",
        50,
        AchievementCategory::Funding,
        5,
    ),
    achievement(
        "discover-accelerator",
        "Accelerator Hunter",
        "Discover three accelerator or incubator programs",
        50,
        AchievementCategory::Funding,
        3,
    ),
    achievement(
        "discover-impact",
        "Impact Seeker",
        "Discover three impact funding opportunities",
        50,
        AchievementCategory::Funding,
        3,
    ),
    achievement(
        "ai-specialist",
        "AI Specialist",
        "Discover three AI focused opportunities",
        75,
        AchievementCategory::Funding,
        3,
    ),
    achievement(
        "funding-explorer",
        "Funding Explorer",
        "Discover ten funding opportunities",
        50,
        AchievementCategory::Funding,
        10,
    ),
    achievement(
        "discover-all",
        "Funding Master",
        "Discover public, private, accelerator and impact funding",
        100,
        AchievementCategory::Special,
        4,
    ),
    achievement(
        "discover-2025",
        "2025 Future Visionary",
        "Discover a funding opportunity for 2025",
        25,
        AchievementCategory::Special,
        1,
    ),
];

pub fn find(id: &str) -> Option<&'static Achievement> {
    CATALOG.iter().find(|a| a.id == id)
}

/// Everything the predicates look at for one user.
pub struct ActivitySnapshot<'a> {
    pub progress: &'a UserProgress,
    pub discovered: &'a [FundingOpportunity],
    pub distinct_reviewers: usize,
}

fn sector_mentions(opportunity: &FundingOpportunity, needles: &[&str]) -> bool {
    let sector = opportunity.sector.to_lowercase();
    needles.iter().any(|needle| sector.contains(needle))
}

const PUBLIC: &[&str] = &["public"];
const PRIVATE: &[&str] = &["private"];
const ACCELERATOR: &[&str] = &["accelerator", "incubator"];
const IMPACT: &[&str] = &["impact", "sdg"];

impl ActivitySnapshot<'_> {
    fn discovered_in(&self, needles: &[&str]) -> u32 {
        self.discovered
            .iter()
            .filter(|o| sector_mentions(o, needles))
            .count() as u32
    }

    /// Current count toward `achievement`'s threshold.
    pub fn progress_toward(&self, achievement: &Achievement) -> u32 {
        let completed = self.progress.completed_stages.len() as u32;
        match achievement.id {
            "first-pitch" | "pitch-master" => completed,
            "validation-champion" => self.progress.has_completed(FundingStage::Validation) as u32,
            "high-scorer" => self
                .progress
                .pitch_scores
                .values()
                .any(|score| *score >= HIGH_SCORE) as u32,
            "feedback-collector" => self.distinct_reviewers as u32,
            "discover-public" => self.discovered_in(PUBLIC),
            "discover-private" => self.discovered_in(PRIVATE),
            "discover-accelerator" => self.discovered_in(ACCELERATOR),
            "discover-impact" => self.discovered_in(IMPACT),
            "ai-specialist" => self
                .discovered
                .iter()
                .filter(|o| mentions_ai(&o.title) || mentions_ai(&o.sector))
                .count() as u32,
            "funding-explorer" => self.discovered.len() as u32,
            "discover-all" => [PUBLIC, PRIVATE, ACCELERATOR, IMPACT]
                .iter()
                .filter(|group| self.discovered_in(group) > 0)
                .count() as u32,
            "discover-2025" => self
                .discovered
                .iter()
                .filter(|o| o.title.contains("2025"))
                .count() as u32,
            _ => 0,
        }
    }

    pub fn satisfies(&self, achievement: &Achievement) -> bool {
        self.progress_toward(achievement) >= achievement.threshold
    }

    /// Catalog entries whose predicate currently holds.
    pub fn satisfied(&self) -> impl Iterator<Item = &'static Achievement> + '_ {
        CATALOG.iter().filter(|a| self.satisfies(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::classification::tests::opportunity;

    #[test]
    fn test_catalog_ids_unique() {
        let mut ids: Vec<&str> = CATALOG.iter().map(|a| a.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), CATALOG.len());
        assert!(find("pitch-master").is_some());
        assert!(find("does-not-exist").is_none());
    }

    #[test]
    fn test_pitch_predicates() {
        let mut progress = UserProgress::starting("u");
        progress.completed_stages.insert(FundingStage::Ideation);
        progress.pitch_scores.insert(FundingStage::Ideation, 5.0);

        let snapshot = ActivitySnapshot {
            progress: &progress,
            discovered: &[],
            distinct_reviewers: 0,
        };
        let ids: Vec<&str> = snapshot.satisfied().map(|a| a.id).collect();

        assert_eq!(ids, vec!["first-pitch", "high-scorer"]);
    }

    #[test]
    fn test_discover_all_needs_each_group() {
        let progress = UserProgress::starting("u");
        let discovered = vec![
            opportunity("a", "A", "Public Grants", ""),
            opportunity("b", "B", "Private Equity", ""),
            opportunity("c", "C", "Incubator", ""),
        ];
        let mut snapshot = ActivitySnapshot {
            progress: &progress,
            discovered: &discovered,
            distinct_reviewers: 0,
        };
        let all = find("discover-all").unwrap();
        assert_eq!(snapshot.progress_toward(all), 3);
        assert!(!snapshot.satisfies(all));

        let with_impact = [discovered.clone(), vec![opportunity("d", "D", "Impact / SDG", "")]].concat();
        snapshot.discovered = &with_impact;
        assert!(snapshot.satisfies(all));
    }

    #[test]
    fn test_ai_and_2025_discoveries() {
        let progress = UserProgress::starting("u");
        let discovered = vec![
            opportunity("a", "LUMO Labs AI Fund", "Private", ""),
            opportunity("b", "AiNed Programme", "AI", ""),
            opportunity("c", "Sustainability Grant", "Public", ""),
            opportunity("d", "WBSO 2025", "Public Grants - R&D", ""),
        ];
        let snapshot = ActivitySnapshot {
            progress: &progress,
            discovered: &discovered,
            distinct_reviewers: 0,
        };

        assert_eq!(snapshot.progress_toward(find("ai-specialist").unwrap()), 2);
        assert!(snapshot.satisfies(find("discover-2025").unwrap()));
    }
}
