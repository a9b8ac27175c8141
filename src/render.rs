// File: src/render.rs
//! Terminal presentation of a [`GuideView`].

use crate::core::engine::GuideView;
use crate::core::state::{Reveal, Theme};
use crate::core::types::{QuestionAnswer, Section, Topic};
use crate::highlight::{Highlighter, TokenKind};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, Write};

pub const APP_TITLE: &str = "FaizHelp";
const BAR_WIDTH: usize = 30;

/// Foreground colors for one theme. `None` means "leave the terminal default".
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub text: Option<Color>,
    pub muted: Option<Color>,
    pub accent: Option<Color>,
    pub done: Option<Color>,
    pub warn: Option<Color>,
    pub code: CodePalette,
}

#[derive(Debug, Clone, Copy)]
pub struct CodePalette {
    pub keyword: Option<Color>,
    pub annotation: Option<Color>,
    pub string: Option<Color>,
    pub comment: Option<Color>,
    pub number: Option<Color>,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                text: Some(Color::Black),
                muted: Some(Color::DarkGrey),
                accent: Some(Color::DarkBlue),
                done: Some(Color::DarkGreen),
                warn: Some(Color::DarkRed),
                code: CodePalette {
                    keyword: Some(Color::DarkMagenta),
                    annotation: Some(Color::DarkYellow),
                    string: Some(Color::DarkGreen),
                    comment: Some(Color::DarkGrey),
                    number: Some(Color::DarkCyan),
                },
            },
            Theme::Dark => Self {
                text: Some(Color::White),
                muted: Some(Color::Grey),
                accent: Some(Color::Blue),
                done: Some(Color::Green),
                warn: Some(Color::Red),
                code: CodePalette {
                    keyword: Some(Color::Magenta),
                    annotation: Some(Color::Yellow),
                    string: Some(Color::Green),
                    comment: Some(Color::Grey),
                    number: Some(Color::Cyan),
                },
            },
        }
    }

    /// No escape sequences at all, for pipes and tests.
    pub fn monochrome() -> Self {
        let code = CodePalette {
            keyword: None,
            annotation: None,
            string: None,
            comment: None,
            number: None,
        };
        Self {
            text: None,
            muted: None,
            accent: None,
            done: None,
            warn: None,
            code,
        }
    }

    fn token(&self, kind: TokenKind) -> Option<Color> {
        match kind {
            TokenKind::Plain => self.text,
            TokenKind::Keyword => self.code.keyword,
            TokenKind::Annotation => self.code.annotation,
            TokenKind::Str => self.code.string,
            TokenKind::Comment => self.code.comment,
            TokenKind::Number => self.code.number,
        }
    }
}

pub struct Renderer<'h> {
    palette: Palette,
    highlighter: &'h dyn Highlighter,
}

impl<'h> Renderer<'h> {
    pub fn new(palette: Palette, highlighter: &'h dyn Highlighter) -> Self {
        Self { palette, highlighter }
    }

    pub fn render<W: Write>(&self, out: &mut W, view: &GuideView<'_>) -> io::Result<()> {
        self.header(out, view)?;
        self.progress_bar(out, view)?;
        self.sidebar(out, view)?;
        match view.selected_topic {
            Some(topic) => self.detail(out, view, topic)?,
            None => self.welcome(out)?,
        }
        if let Some(warning) = view.warning {
            self.colored(out, self.palette.warn, &format!("\n! {}\n", warning))?;
        }
        out.flush()
    }

    fn header<W: Write>(&self, out: &mut W, view: &GuideView<'_>) -> io::Result<()> {
        self.bold(out, self.palette.accent, APP_TITLE)?;
        let theme = match view.state.theme() {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        self.colored(
            out,
            self.palette.muted,
            &format!("   search: [{}]   theme: {}\n", view.state.search_query, theme),
        )
    }

    fn progress_bar<W: Write>(&self, out: &mut W, view: &GuideView<'_>) -> io::Result<()> {
        let filled = usize::from(view.percent) * BAR_WIDTH / 100;
        self.colored(out, self.palette.text, "\nYour Progress\n")?;
        self.colored(out, self.palette.accent, &"█".repeat(filled))?;
        self.colored(out, self.palette.muted, &"░".repeat(BAR_WIDTH - filled))?;
        self.colored(out, self.palette.muted, &format!("\n{}% Complete\n\n", view.percent))
    }

    fn sidebar<W: Write>(&self, out: &mut W, view: &GuideView<'_>) -> io::Result<()> {
        self.bold(out, self.palette.text, "Topics\n")?;
        if view.topics.is_empty() {
            self.colored(out, self.palette.muted, "  No results\n")?;
        }
        let selected_id = view.selected_topic.map(|t| t.id.as_str());
        for (i, topic) in view.topics.iter().enumerate() {
            let line = format!("  {:>2}. {} {}\n", i + 1, topic.icon.glyph(), topic.title);
            if selected_id == Some(topic.id.as_str()) {
                self.bold(out, self.palette.accent, &line)?;
            } else {
                self.colored(out, self.palette.text, &line)?;
            }
        }
        if view.selection_hidden() {
            if let Some(topic) = view.selected_topic {
                self.colored(
                    out,
                    self.palette.muted,
                    &format!("   *  {} (hidden by search)\n", topic.title),
                )?;
            }
        }
        out.write_all(b"\n")
    }

    fn welcome<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.bold(out, self.palette.text, "Welcome to FaizGuide\n")?;
        self.colored(
            out,
            self.palette.muted,
            "Select a topic from the sidebar to start learning.\n",
        )
    }

    fn detail<W: Write>(&self, out: &mut W, view: &GuideView<'_>, topic: &Topic) -> io::Result<()> {
        self.bold(out, self.palette.text, &format!("{}\n", topic.title))?;
        for (i, section) in topic.sections.iter().enumerate() {
            let open = view.selected_section.map(|s| s.id == section.id).unwrap_or(false);
            let marker = if open { '▾' } else { '▸' };
            self.bold(
                out,
                self.palette.accent,
                &format!("  {} {}. {}\n", marker, i + 1, section.title),
            )?;
            if open {
                for (index, item) in section.content.iter().enumerate() {
                    self.item(out, view, topic, section, index, item)?;
                }
            }
        }
        Ok(())
    }

    fn item<W: Write>(
        &self,
        out: &mut W,
        view: &GuideView<'_>,
        topic: &Topic,
        section: &Section,
        index: usize,
        item: &QuestionAnswer,
    ) -> io::Result<()> {
        out.write_all(b"\n")?;
        self.bold(out, self.palette.text, &format!("    [{}] {}", index + 1, item.question))?;
        if view.is_completed(topic, section, index) {
            self.colored(out, self.palette.done, "  ✔ Completed\n")?;
        } else {
            self.colored(out, self.palette.muted, "  ○ Mark Complete\n")?;
        }
        // Answers keep their own line breaks.
        for line in item.answer.split('\n') {
            self.colored(out, self.palette.text, &format!("      {}\n", line))?;
        }

        if let Some(code) = &item.code_example {
            self.colored(out, self.palette.muted, "\n      Code Example:\n")?;
            self.code(out, code)?;
        }

        if let Some(exercise) = &item.practice_exercise {
            self.colored(out, self.palette.muted, "\n      Practice Exercise:\n")?;
            self.colored(out, self.palette.text, &format!("      {}\n", exercise.question))?;
            if view.state.is_revealed(index, Reveal::Hint) {
                self.colored(out, self.palette.text, &format!("        Hint: {}\n", exercise.hint))?;
            } else {
                self.colored(out, self.palette.accent, "      ▸ Show Hint\n")?;
            }
            if view.state.is_revealed(index, Reveal::Solution) {
                self.colored(out, self.palette.text, "        Solution:\n")?;
                self.code(out, &exercise.solution)?;
            } else {
                self.colored(out, self.palette.accent, "      ▸ Show Solution\n")?;
            }
        }
        Ok(())
    }

    fn code<W: Write>(&self, out: &mut W, code: &str) -> io::Result<()> {
        const INDENT: &str = "        │ ";
        self.colored(out, self.palette.muted, INDENT)?;
        for span in self.highlighter.highlight(code) {
            // Re-indent after every newline inside a span.
            let mut parts = span.text.split('\n').peekable();
            while let Some(part) = parts.next() {
                self.colored(out, self.palette.token(span.kind), part)?;
                if parts.peek().is_some() {
                    out.write_all(b"\n")?;
                    self.colored(out, self.palette.muted, INDENT)?;
                }
            }
        }
        out.write_all(b"\n")
    }

    fn colored<W: Write>(&self, out: &mut W, color: Option<Color>, text: &str) -> io::Result<()> {
        match color {
            Some(color) => queue!(out, SetForegroundColor(color), Print(text), ResetColor),
            None => queue!(out, Print(text)),
        }
    }

    fn bold<W: Write>(&self, out: &mut W, color: Option<Color>, text: &str) -> io::Result<()> {
        if color.is_none() {
            return queue!(out, Print(text));
        }
        queue!(out, SetAttribute(Attribute::Bold))?;
        self.colored(out, color, text)?;
        queue!(out, SetAttribute(Attribute::Reset))
    }
}
