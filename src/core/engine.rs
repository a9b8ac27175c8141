use crate::config::Config;
use crate::core::catalog::Catalog;
use crate::core::progress::{ProgressMap, ProgressStore};
use crate::core::query::{calculate_progress, filter_topics, find_topic};
use crate::core::state::{Reveal, ViewState};
use crate::core::types::{ItemIndex, KeyScheme, ProgressKey, Section, Topic};
use crate::error::{GuideError, Result};
use crate::persistence::{JsonFileStore, ProgressPort};

/// A discrete user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectTopic(String),
    /// Must name a section of the selected topic.
    SelectSection(String),
    SetSearch(String),
    ToggleTheme,
    ToggleProgress { section_id: String, index: ItemIndex },
    Reveal { index: ItemIndex, part: Reveal },
}

/// Everything the presentation layer needs for one frame.
pub struct GuideView<'a> {
    /// Sidebar topics after search filtering, in catalog order.
    pub topics: Vec<&'a Topic>,
    /// Looked up in the full catalog, so it survives being filtered out.
    pub selected_topic: Option<&'a Topic>,
    pub selected_section: Option<&'a Section>,
    pub percent: u8,
    pub state: &'a ViewState,
    pub progress: &'a ProgressMap,
    pub scheme: KeyScheme,
    pub warning: Option<&'a str>,
}

impl GuideView<'_> {
    pub fn key_for(&self, topic: &Topic, section: &Section, index: ItemIndex) -> ProgressKey {
        ProgressKey::new(self.scheme, &topic.id, &section.id, index)
    }

    pub fn is_completed(&self, topic: &Topic, section: &Section, index: ItemIndex) -> bool {
        self.progress.is_completed(&self.key_for(topic, section, index))
    }

    /// The selected topic exists but the current search hides it.
    pub fn selection_hidden(&self) -> bool {
        match self.selected_topic {
            Some(selected) => !self.topics.iter().any(|t| t.id == selected.id),
            None => false,
        }
    }
}

/// Ties the catalog, the progress store and the session state together.
pub struct GuideEngine<P: ProgressPort> {
    catalog: Catalog,
    store: ProgressStore<P>,
    state: ViewState,
    scheme: KeyScheme,
    warning: Option<String>,
}

impl GuideEngine<JsonFileStore> {
    /// Opens the progress file and catalog named by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_file(path)?,
            None => Catalog::builtin(),
        };
        let port = JsonFileStore::new(config.progress_path());
        Ok(Self::new(catalog, port, config.key_scheme))
    }
}

impl<P: ProgressPort> GuideEngine<P> {
    pub fn new(catalog: Catalog, port: P, scheme: KeyScheme) -> Self {
        Self {
            catalog,
            store: ProgressStore::open(port),
            state: ViewState::new(),
            scheme,
            warning: None,
        }
    }

    pub fn with_state(mut self, state: ViewState) -> Self {
        self.state = state;
        self
    }

    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        log::debug!("Dispatching {:?}", action);
        self.warning = None;
        let state = std::mem::take(&mut self.state);
        self.state = match action {
            Action::SelectTopic(id) => {
                if find_topic(self.catalog.topics(), &id).is_none() {
                    self.state = state;
                    return Err(GuideError::UnknownTopic(id));
                }
                state.select_topic(&id)
            }
            Action::SelectSection(id) => {
                if let Err(e) = self.check_section(&state, &id) {
                    self.state = state;
                    return Err(e);
                }
                state.select_section(&id)
            }
            Action::SetSearch(query) => state.set_search(&query),
            Action::ToggleTheme => state.toggle_theme(),
            Action::Reveal { index, part } => state.reveal(index, part),
            Action::ToggleProgress { section_id, index } => {
                self.state = state;
                return self.toggle_progress(&section_id, index).map(|_| ());
            }
        };
        Ok(())
    }

    /// Flips completion for item `index` of `section_id` and returns the new
    /// flag. The section is looked up in the selected topic first, then in
    /// catalog order. A failed write is kept as a warning; the toggle stands.
    pub fn toggle_progress(&mut self, section_id: &str, index: ItemIndex) -> Result<bool> {
        self.warning = None;
        let (topic, section) = self
            .locate_section(section_id)
            .ok_or_else(|| GuideError::UnknownSection {
                topic: self.state.selected_topic_id.clone().unwrap_or_default(),
                section: section_id.to_string(),
            })?;
        if index >= section.content.len() {
            return Err(GuideError::UnknownItem {
                section: section_id.to_string(),
                index,
            });
        }
        let key = ProgressKey::new(self.scheme, &topic.id, &section.id, index);
        match self.store.toggle(&key) {
            Ok(done) => Ok(done),
            Err(e) => {
                log::warn!("Progress not saved: {}", e);
                self.warning = Some(format!("Progress not saved: {}", e));
                Ok(self.store.is_completed(&key))
            }
        }
    }

    pub fn view(&self) -> GuideView<'_> {
        let topics = self.catalog.topics();
        let selected_topic = self
            .state
            .selected_topic_id
            .as_deref()
            .and_then(|id| find_topic(topics, id));
        let selected_section = selected_topic.and_then(|topic| {
            let id = self.state.selected_section_id.as_deref()?;
            topic.sections.iter().find(|s| s.id == id)
        });

        GuideView {
            topics: filter_topics(topics, &self.state.search_query),
            selected_topic,
            selected_section,
            percent: self.percent(),
            state: &self.state,
            progress: self.store.map(),
            scheme: self.scheme,
            warning: self.warning.as_deref(),
        }
    }

    pub fn percent(&self) -> u8 {
        calculate_progress(self.catalog.topics(), self.store.map())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn progress(&self) -> &ProgressMap {
        self.store.map()
    }

    pub fn port(&self) -> &P {
        self.store.port()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    fn check_section(&self, state: &ViewState, section_id: &str) -> Result<()> {
        let topic_id = state.selected_topic_id.clone().unwrap_or_default();
        let found = find_topic(self.catalog.topics(), &topic_id)
            .map(|topic| topic.sections.iter().any(|s| s.id == section_id))
            .unwrap_or(false);
        if found {
            Ok(())
        } else {
            Err(GuideError::UnknownSection {
                topic: topic_id,
                section: section_id.to_string(),
            })
        }
    }

    fn locate_section(&self, section_id: &str) -> Option<(&Topic, &Section)> {
        let topics = self.catalog.topics();
        let in_topic = |topic: &Topic| topic.sections.iter().any(|s| s.id == section_id);

        let selected = self
            .state
            .selected_topic_id
            .as_deref()
            .and_then(|id| find_topic(topics, id))
            .filter(|topic| in_topic(topic));
        let topic = selected.or_else(|| topics.iter().find(|topic| in_topic(topic)))?;
        let section = topic.sections.iter().find(|s| s.id == section_id)?;
        Some((topic, section))
    }
}
