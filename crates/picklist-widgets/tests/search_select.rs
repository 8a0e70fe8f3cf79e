//! Integration tests for the search select.
//!
//! These drive a mounted [`SearchSelect`] the way a host would: typed UI
//! events in, callbacks and state out.

use picklist_core::Key;
use picklist_widgets::search_select::{Phase, SelectEvent, SelectOutput};
use picklist_widgets::{SearchSelect, SearchSelectProps, SelectError, SelectOption, Selection};
use std::sync::{Arc, Mutex, Once};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn alpha_beta() -> Vec<SelectOption> {
    vec![SelectOption::new("a", "Alpha"), SelectOption::new("b", "Beta")]
}

/// Mount a select whose `on_change` calls are recorded.
fn mount(props: SearchSelectProps) -> (SearchSelect, Arc<Mutex<Vec<Selection>>>) {
    init_tracing();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let select = SearchSelect::new(props)
        .expect("valid props")
        .on_change(move |sel| sink.lock().unwrap().push(sel.clone()));
    (select, seen)
}

// =============================================================================
// Single Mode Scenarios
// =============================================================================

#[test]
fn test_type_then_click_single() {
    let (mut select, seen) = mount(SearchSelectProps::single(alpha_beta()));

    select.type_text("al");
    let labels: Vec<_> = select
        .state()
        .visible_options()
        .iter()
        .filter_map(|o| o.label.clone())
        .collect();
    assert_eq!(labels, vec!["Alpha"]);

    select.click_item("a");
    assert_eq!(select.state().selection(), &Selection::single("a"));
    assert_eq!(select.state().search(), "Alpha");
    assert_eq!(select.state().phase(), Phase::Closed);
    assert_eq!(*seen.lock().unwrap(), vec![Selection::single("a")]);
}

#[test]
fn test_emptying_search_never_commits_empty_without_allow_empty() {
    let (mut select, seen) =
        mount(SearchSelectProps::single(alpha_beta()).value(Selection::single("b")));

    select.type_text("Bet");
    select.type_text("");
    select.set_open(false);

    assert_eq!(select.state().selection(), &Selection::single("b"));
    assert!(seen.lock().unwrap().iter().all(|sel| !sel.is_empty()));
    assert_eq!(select.state().search(), "Beta");
}

#[test]
fn test_allow_empty_commits_empty() {
    let (mut select, seen) = mount(
        SearchSelectProps::single(alpha_beta())
            .allow_empty(true)
            .value(Selection::single("b")),
    );

    select.type_text("");
    assert_eq!(*seen.lock().unwrap(), vec![Selection::Single(None)]);
    assert!(select.state().selection().is_empty());
}

#[test]
fn test_closing_twice_fires_once() {
    let (mut select, seen) = mount(SearchSelectProps::single(alpha_beta()));
    select.set_open(true);
    select.click_item("b");
    let selection = select.state().selection().clone();

    select.set_open(false);
    select.handle(SelectEvent::PopoverBackgroundClicked);
    select.press(Key::Escape);

    assert_eq!(select.state().selection(), &selection);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

// =============================================================================
// Multi Mode Scenarios
// =============================================================================

#[test]
fn test_multi_deferred_emits_once_on_close() {
    let (mut select, seen) = mount(SearchSelectProps::multi(alpha_beta()));

    select.handle(SelectEvent::InputClicked);
    select.handle(SelectEvent::PopoverOpened);
    select.click_item("a");
    select.click_item("b");
    assert!(seen.lock().unwrap().is_empty());

    select.set_open(false);
    select.set_open(false);
    assert_eq!(*seen.lock().unwrap(), vec![Selection::multi(["a", "b"])]);
}

#[test]
fn test_multi_toggle_reflects_clicks_exactly() {
    let (mut select, _) = mount(SearchSelectProps::multi(alpha_beta()));
    select.set_open(true);

    for value in ["a", "b", "a", "a", "b", "b", "a"] {
        select.click_item(value);
        assert!(select.state().selection().is_multi());
    }
    assert_eq!(select.state().selection(), &Selection::multi(["b"]));
    assert_eq!(select.state().selection_length(), 1);
}

#[test]
fn test_multi_one_item_mirrors_label_when_closed() {
    let (mut select, _) = mount(SearchSelectProps::multi(alpha_beta()));
    select.set_open(true);
    select.click_item("b");
    assert_eq!(select.state().search(), "");

    select.set_open(false);
    assert_eq!(select.state().search(), "Beta");
    assert!(!select.state().enable_filter());
}

#[test]
fn test_deselect_all_fires_immediately() {
    let (mut select, seen) =
        mount(SearchSelectProps::multi(alpha_beta()).value(Selection::multi(["a", "b"])));

    let outputs = select.handle(SelectEvent::DeselectClicked);
    assert_eq!(outputs, vec![SelectOutput::Changed(Selection::Multi(Vec::new()))]);
    assert_eq!(*seen.lock().unwrap(), vec![Selection::Multi(Vec::new())]);
    assert_eq!(select.state().selection_length(), 0);
}

#[test]
fn test_deselect_all_drops_pending_change() {
    let (mut select, seen) = mount(SearchSelectProps::multi(alpha_beta()));
    select.set_open(true);
    select.click_item("a");
    select.handle(SelectEvent::DeselectClicked);
    seen.lock().unwrap().clear();

    select.set_open(false);
    assert!(seen.lock().unwrap().is_empty());
}

// =============================================================================
// Props Tests
// =============================================================================

#[test]
fn test_props_from_yaml_mount() {
    let props = SearchSelectProps::from_yaml(
        r"
multi: true
value: [b]
options:
  - { value: a, label: Alpha }
  - { value: b, label: Beta }
  - { label: No value }
",
    )
    .expect("valid yaml");
    let (select, _) = mount(props);
    assert_eq!(select.state().visible_options().len(), 2);
    assert_eq!(select.state().search(), "Beta");
}

#[test]
fn test_set_props_is_authoritative() {
    let (mut select, _) = mount(SearchSelectProps::multi(alpha_beta()));
    select.set_open(true);
    select.click_item("a");

    select
        .set_props(SearchSelectProps::multi(alpha_beta()).value(Selection::multi(["b"])))
        .expect("valid props");
    assert_eq!(select.state().selection(), &Selection::multi(["b"]));
}

#[test]
fn test_set_props_contract_violation() {
    let (mut select, _) = mount(SearchSelectProps::multi(alpha_beta()));
    let err = select
        .set_props(SearchSelectProps::multi(alpha_beta()).value(Selection::single("a")))
        .unwrap_err();
    assert!(matches!(err, SelectError::MultiValueNotArray));
    assert_eq!(err.to_string(), "Multi select value must be an array");
}

// =============================================================================
// Keyboard Tests
// =============================================================================

#[test]
fn test_superseded_clear_keeps_newer_signal() {
    let (mut select, _) = mount(SearchSelectProps::single(alpha_beta()));
    select.set_open(true);

    select.press(Key::ArrowDown);
    select.advance(8);
    select.press(Key::ArrowDown);
    select.advance(2);
    assert_eq!(select.state().key_signal().key(), Some(Key::ArrowDown));
    assert_eq!(select.state().key_signal().generation(), 2);

    select.advance(8);
    assert!(select.state().key_signal().is_none());
}

#[test]
fn test_acknowledged_signal_clears_at_once() {
    let (mut select, _) = mount(SearchSelectProps::single(alpha_beta()));
    select.set_open(true);
    select.press(Key::ArrowUp);
    select.handle(SelectEvent::KeySignalAcknowledged);
    assert!(select.state().key_signal().is_none());

    select.advance(10);
    assert!(select.state().key_signal().is_none());
}

#[test]
fn test_keyboard_pick_in_multi_mode_defers() {
    let (mut select, seen) = mount(SearchSelectProps::multi(alpha_beta()));
    select.set_open(true);
    select.press(Key::ArrowDown);
    select.press(Key::Enter);

    assert_eq!(select.state().selection(), &Selection::multi(["a"]));
    assert!(select.state().is_open());
    assert!(seen.lock().unwrap().is_empty());
}

// =============================================================================
// Tree Tests
// =============================================================================

#[test]
fn test_tree_rows_and_child_selection() {
    let options = vec![
        SelectOption::new("fruit", "Fruit").children([
            SelectOption::new("apple", "Apple"),
            SelectOption::new("pear", "Pear"),
        ]),
        SelectOption::new("veg", "Vegetables"),
    ];
    let (mut select, seen) = mount(SearchSelectProps::single(options).display_as_tree(true));
    select.set_open(true);

    let rows = select.item_list().rows();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2].depth, 1);
    assert_eq!(rows[2].indent_px, 15.0);

    select.click_item("pear");
    assert_eq!(select.state().search(), "Pear");
    assert_eq!(*seen.lock().unwrap(), vec![Selection::single("pear")]);
}

// =============================================================================
// Property Tests
// =============================================================================

mod multi_properties {
    use super::*;
    use picklist_widgets::OptionValue;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Action {
        Click(usize),
        DeselectAll,
    }

    const VALUES: [&str; 4] = ["a", "b", "c", "d"];

    fn arb_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            4 => (0..VALUES.len()).prop_map(Action::Click),
            1 => Just(Action::DeselectAll),
        ]
    }

    fn four_options() -> Vec<SelectOption> {
        VALUES
            .iter()
            .map(|v| SelectOption::new(*v, v.to_uppercase()))
            .collect()
    }

    proptest! {
        #[test]
        fn prop_multi_toggle_matches_model(
            actions in proptest::collection::vec(arb_action(), 0..40),
            immediate in any::<bool>(),
        ) {
            let props = SearchSelectProps::multi(four_options())
                .get_value_on_select_menu_item(immediate);
            let mut select = SearchSelect::new(props).expect("valid props");
            select.set_open(true);

            let mut model: Vec<&str> = Vec::new();
            for action in actions {
                match action {
                    Action::Click(index) => {
                        let value = VALUES[index];
                        if let Some(pos) = model.iter().position(|v| *v == value) {
                            model.remove(pos);
                        } else {
                            model.push(value);
                        }
                        select.click_item(value);
                    }
                    Action::DeselectAll => {
                        model.clear();
                        select.handle(SelectEvent::DeselectClicked);
                    }
                }
                prop_assert!(select.state().selection().is_multi());
                prop_assert!(select.state().is_open());
            }

            let expected: Vec<OptionValue> = model.into_iter().map(OptionValue::from).collect();
            prop_assert_eq!(select.state().selection(), &Selection::Multi(expected));

            select.set_open(false);
            prop_assert!(select.state().selection().is_multi());
        }
    }
}
