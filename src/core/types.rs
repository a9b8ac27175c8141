// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a QuestionAnswer within its section's content.
pub type ItemIndex = usize;

/// Display icon for a topic in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Coffee,
    Server,
    GitBranch,
    Database,
    Settings,
    FileCode,
    Code,
    Brain,
    Book,
    BookOpen,
}

impl Icon {
    /// A single-cell glyph for terminal output.
    pub fn glyph(self) -> char {
        match self {
            Icon::Coffee => '☕',
            Icon::Server => '▣',
            Icon::GitBranch => '⑂',
            Icon::Database => '⛁',
            Icon::Settings => '⚙',
            Icon::FileCode => '⌘',
            Icon::Code => '‹',
            Icon::Brain => '✦',
            Icon::Book | Icon::BookOpen => '▤',
        }
    }
}

/// A top-level subject node of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub icon: Icon,
    pub sections: Vec<Section>,
}

/// A named subdivision of a topic. The id is only unique within its topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub content: Vec<QuestionAnswer>,
}

/// One study item. The answer keeps its embedded line breaks verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_exercise: Option<PracticeExercise>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeExercise {
    /// The exercise prompt.
    pub question: String,
    pub hint: String,
    /// Rendered as code.
    pub solution: String,
}

/// How progress keys are built from a study item's location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyScheme {
    /// `"<sectionId>-<index>"`. Sections sharing an id across topics share
    /// completion state.
    #[default]
    Section,
    /// `"<topicId>/<sectionId>-<index>"`.
    TopicQualified,
}

/// The synthetic key under which an item's completion flag is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgressKey(String);

impl ProgressKey {
    pub fn new(scheme: KeyScheme, topic_id: &str, section_id: &str, index: ItemIndex) -> Self {
        match scheme {
            KeyScheme::Section => Self(format!("{}-{}", section_id, index)),
            KeyScheme::TopicQualified => Self(format!("{}/{}-{}", topic_id, section_id, index)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProgressKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for ProgressKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ProgressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_scheme_ignores_topic() {
        let a = ProgressKey::new(KeyScheme::Section, "spring-boot", "basics", 0);
        let b = ProgressKey::new(KeyScheme::Section, "microservices", "basics", 0);
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "basics-0");
    }

    #[test]
    fn topic_qualified_scheme_separates_topics() {
        let a = ProgressKey::new(KeyScheme::TopicQualified, "spring-boot", "basics", 0);
        let b = ProgressKey::new(KeyScheme::TopicQualified, "microservices", "basics", 0);
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "spring-boot/basics-0");
    }

    #[test]
    fn optional_fields_deserialize_when_absent() {
        let qa: QuestionAnswer =
            serde_json::from_str(r#"{"question":"q","answer":"a"}"#).unwrap();
        assert!(qa.code_example.is_none());
        assert!(qa.practice_exercise.is_none());
    }

    #[test]
    fn icon_uses_kebab_case() {
        let icon: Icon = serde_json::from_str(r#""git-branch""#).unwrap();
        assert_eq!(icon, Icon::GitBranch);
    }
}
