//! View state transitions

use guide_core::core::catalog::Catalog;
use guide_core::core::state::{Theme, ViewState};
use guide_core::core::types::KeyScheme;
use guide_core::persistence::MemoryStore;
use guide_core::{Action, GuideEngine};

#[test]
fn test_selecting_topic_clears_section() {
    let state = ViewState::new()
        .select_topic("java-core")
        .select_section("oop")
        .select_topic("hibernate");
    assert_eq!(state.selected_topic_id.as_deref(), Some("hibernate"));
    assert_eq!(state.selected_section_id, None);
}

#[test]
fn test_reselecting_same_topic_also_clears_section() {
    let state = ViewState::new()
        .select_topic("docker")
        .select_section("containers")
        .select_topic("docker");
    assert_eq!(state.selected_section_id, None);
}

#[test]
fn test_selecting_section_twice_keeps_it_open() {
    let once = ViewState::new().select_topic("git").select_section("version-control");
    let twice = once.clone().select_section("version-control");
    assert_eq!(once, twice);
}

#[test]
fn test_theme_toggle_flips() {
    let state = ViewState::new().toggle_theme();
    assert!(state.dark_mode);
    assert_eq!(state.theme(), Theme::Dark);
    assert_eq!(state.toggle_theme().theme(), Theme::Light);
}

#[test]
fn test_engine_section_reset_on_topic_change() {
    let mut engine = GuideEngine::new(Catalog::builtin(), MemoryStore::new(), KeyScheme::Section);
    engine.dispatch(Action::SelectTopic("java-core".into())).unwrap();
    engine.dispatch(Action::SelectSection("oop".into())).unwrap();
    engine.dispatch(Action::SelectTopic("kafka".into())).unwrap();

    assert_eq!(engine.state().selected_section_id, None);
    assert!(engine.view().selected_section.is_none());
}

#[test]
fn test_search_does_not_touch_selection_or_progress() {
    let mut engine = GuideEngine::new(Catalog::builtin(), MemoryStore::new(), KeyScheme::Section);
    engine.dispatch(Action::SelectTopic("git".into())).unwrap();
    engine.toggle_progress("version-control", 0).unwrap();
    engine.dispatch(Action::SetSearch("zzz-nomatch".into())).unwrap();

    let view = engine.view();
    assert!(view.topics.is_empty());
    assert_eq!(view.selected_topic.map(|t| t.id.as_str()), Some("git"));
    assert_eq!(view.percent, 11);
}
