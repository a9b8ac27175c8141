// File: src/core/query.rs
//! Derived views over the catalog: search filtering and the completion
//! percentage.

use crate::core::progress::ProgressMap;
use crate::core::types::Topic;

/// Returns the topics whose subtree mentions `query`, case-insensitively,
/// in catalog order. Matching looks at the topic title, section titles,
/// questions and answers (not code). A matching topic is returned whole.
///
/// An empty query returns every topic.
pub fn filter_topics<'a>(topics: &'a [Topic], query: &str) -> Vec<&'a Topic> {
    if query.is_empty() {
        return topics.iter().collect();
    }
    let needle = query.to_lowercase();
    topics.iter().filter(|topic| topic_matches(topic, &needle)).collect()
}

fn topic_matches(topic: &Topic, needle: &str) -> bool {
    let hit = |text: &str| text.to_lowercase().contains(needle);

    hit(&topic.title)
        || topic.sections.iter().any(|section| {
            hit(&section.title)
                || section
                    .content
                    .iter()
                    .any(|qa| hit(&qa.question) || hit(&qa.answer))
        })
}

/// Flat count of study items across the whole (unfiltered) catalog.
pub fn total_questions(topics: &[Topic]) -> usize {
    topics
        .iter()
        .flat_map(|topic| topic.sections.iter())
        .map(|section| section.content.len())
        .sum()
}

/// `round(100 * completed / total)`, rounding halves up.
///
/// `completed` counts every `true` entry in the map, including stale keys,
/// so the result is clamped to 100. An empty catalog yields 0.
pub fn calculate_progress(topics: &[Topic], progress: &ProgressMap) -> u8 {
    let total = total_questions(topics);
    if total == 0 {
        return 0;
    }
    let completed = progress.completed_count();
    let percent = (200 * completed + total) / (2 * total);
    percent.min(100) as u8
}

pub fn find_topic<'a>(topics: &'a [Topic], id: &str) -> Option<&'a Topic> {
    topics.iter().find(|topic| topic.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::types::ProgressKey;

    #[test]
    fn rounding_is_half_up() {
        // 1 of 8 = 12.5%
        let topics: Vec<Topic> = Catalog::builtin().topics()[..8].to_vec();
        let mut map = ProgressMap::new();
        map.toggle(&ProgressKey::from("oop-0"));
        assert_eq!(calculate_progress(&topics, &map), 13);
    }

    #[test]
    fn one_of_nine() {
        let catalog = Catalog::builtin();
        let mut map = ProgressMap::new();
        map.toggle(&ProgressKey::from("orm-0"));
        // 11.11..%
        assert_eq!(calculate_progress(catalog.topics(), &map), 11);
    }

    #[test]
    fn stale_keys_cannot_exceed_full() {
        let catalog = Catalog::builtin();
        let map: ProgressMap = (0..20).map(|i| (format!("stale-{}", i), true)).collect();
        assert_eq!(calculate_progress(catalog.topics(), &map), 100);
    }

    #[test]
    fn search_ignores_code_examples() {
        let catalog = Catalog::builtin();
        // Only appears inside the BankAccount code sample.
        assert!(filter_topics(catalog.topics(), "BankAccount").is_empty());
    }

    #[test]
    fn find_topic_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(find_topic(catalog.topics(), "git").unwrap().title, "Git & GitHub");
        assert!(find_topic(catalog.topics(), "cobol").is_none());
    }
}
