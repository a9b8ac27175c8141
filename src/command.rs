// File: src/command.rs
//! The line commands of the interactive front end.
//!
//! Numbers are 1-based and refer to what is on screen: `t` counts topics in
//! the filtered sidebar, `s` sections of the selected topic, `x`/`h`/`a`
//! items of the open section.

use crate::core::engine::{Action, GuideView};
use crate::core::state::Reveal;
use crate::error::{GuideError, Result};

pub const HELP: &str = "t <n> topic | s <n> section | x <n> toggle done | h <n> hint | a <n> solution | /text search | d theme | q quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectTopic(usize),
    SelectSection(usize),
    Toggle(usize),
    Hint(usize),
    Solution(usize),
    /// `/` alone clears the search.
    Search(String),
    Theme,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(query) = line.strip_prefix('/') {
            return Ok(Command::Search(query.to_string()));
        }
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or("");
        let arg = parts.next();

        let number = || -> Result<usize> {
            arg.and_then(|s| s.parse::<usize>().ok())
                .filter(|&n| n > 0)
                .ok_or_else(|| GuideError::Command(format!("'{}' needs a number from 1", verb)))
        };

        match verb {
            "t" => Ok(Command::SelectTopic(number()?)),
            "s" => Ok(Command::SelectSection(number()?)),
            "x" => Ok(Command::Toggle(number()?)),
            "h" => Ok(Command::Hint(number()?)),
            "a" => Ok(Command::Solution(number()?)),
            "d" => Ok(Command::Theme),
            "q" | "exit" => Ok(Command::Quit),
            "?" | "help" | "" => Ok(Command::Help),
            other => Err(GuideError::Command(format!("Unknown command '{}'. {}", other, HELP))),
        }
    }

    /// Maps on-screen numbers to ids. `Help` and `Quit` have no action.
    pub fn to_action(&self, view: &GuideView<'_>) -> Result<Option<Action>> {
        let action = match self {
            Command::SelectTopic(n) => {
                let topic = view
                    .topics
                    .get(n - 1)
                    .ok_or_else(|| GuideError::Command(format!("No topic {}", n)))?;
                Action::SelectTopic(topic.id.clone())
            }
            Command::SelectSection(n) => {
                let topic = view
                    .selected_topic
                    .ok_or_else(|| GuideError::Command("Select a topic first".to_string()))?;
                let section = topic
                    .sections
                    .get(n - 1)
                    .ok_or_else(|| GuideError::Command(format!("No section {}", n)))?;
                Action::SelectSection(section.id.clone())
            }
            Command::Toggle(n) => {
                let section_id = open_item(view, *n)?;
                Action::ToggleProgress {
                    section_id,
                    index: n - 1,
                }
            }
            Command::Hint(n) => {
                open_item(view, *n)?;
                Action::Reveal {
                    index: n - 1,
                    part: Reveal::Hint,
                }
            }
            Command::Solution(n) => {
                open_item(view, *n)?;
                Action::Reveal {
                    index: n - 1,
                    part: Reveal::Solution,
                }
            }
            Command::Search(query) => Action::SetSearch(query.clone()),
            Command::Theme => Action::ToggleTheme,
            Command::Help | Command::Quit => return Ok(None),
        };
        Ok(Some(action))
    }
}

// Id of the open section, if it has an item `n`.
fn open_item(view: &GuideView<'_>, n: usize) -> Result<String> {
    let section = view
        .selected_section
        .ok_or_else(|| GuideError::Command("Open a section first".to_string()))?;
    if n > section.content.len() {
        return Err(GuideError::Command(format!("No item {}", n)));
    }
    Ok(section.id.clone())
}
