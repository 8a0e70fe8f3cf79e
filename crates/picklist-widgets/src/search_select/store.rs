//! Selection store: the state behind one search select.

use super::filter::{compute_visible_options, popover_width_for};
use super::key_signal::KeySignal;
use super::option::{self, OptionValue, SelectOption, Selection};
use super::props::{SearchSelectProps, ValidProps};
use crate::error::SelectError;

/// Where the select is in its interaction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Popover hidden
    Closed,
    /// Popover shown, list narrowed by the typed text
    OpenFiltering,
    /// Popover shown, full list
    OpenBrowsing,
}

/// State of a search select.
///
/// Fields are private; the controller mutates them through the `pub(crate)`
/// setters and recomputes the visible list after every event.
#[derive(Debug, Clone)]
pub struct SelectState {
    props: SearchSelectProps,
    search: String,
    selection: Selection,
    is_open: bool,
    enable_filter: bool,
    visible: Vec<SelectOption>,
    visible_revision: u64,
    popover_width: f32,
    key_signal: KeySignal,
    has_change: bool,
    display_tooltip: bool,
}

impl SelectState {
    /// Build the state for freshly mounted props.
    pub fn from_props(props: SearchSelectProps) -> Result<Self, SelectError> {
        Ok(Self::from_valid(props.validated()?))
    }

    /// Build the state from props already checked against the mode.
    #[must_use]
    pub fn from_valid(props: ValidProps) -> Self {
        let props = props.into_inner();
        let mut state = Self {
            popover_width: props.initial_popover_width(),
            selection: if props.multi {
                Selection::Multi(Vec::new())
            } else {
                Selection::Single(None)
            },
            props,
            search: String::new(),
            is_open: false,
            enable_filter: false,
            visible: Vec::new(),
            visible_revision: 0,
            key_signal: KeySignal::default(),
            has_change: false,
            display_tooltip: false,
        };
        state.sync_value();
        state.refresh_visible();
        state
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Current props.
    #[must_use]
    pub const fn props(&self) -> &SearchSelectProps {
        &self.props
    }

    /// Text in the input.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Check if the popover is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Check if the typed text narrows the list.
    #[must_use]
    pub const fn enable_filter(&self) -> bool {
        self.enable_filter
    }

    /// Options the popover lists.
    #[must_use]
    pub fn visible_options(&self) -> &[SelectOption] {
        &self.visible
    }

    /// Bumped whenever the visible list changes.
    #[must_use]
    pub const fn visible_revision(&self) -> u64 {
        self.visible_revision
    }

    /// Popover width in pixels.
    #[must_use]
    pub const fn popover_width(&self) -> f32 {
        self.popover_width
    }

    /// Pending key signal.
    #[must_use]
    pub const fn key_signal(&self) -> &KeySignal {
        &self.key_signal
    }

    /// Check if a deferred multi change is waiting for the popover to close.
    #[must_use]
    pub const fn has_change(&self) -> bool {
        self.has_change
    }

    /// Check if the value tooltip is shown.
    #[must_use]
    pub const fn display_tooltip(&self) -> bool {
        self.display_tooltip
    }

    /// Check if the selection is in multi mode.
    #[must_use]
    pub const fn is_multi(&self) -> bool {
        self.props.multi
    }

    // =========================================================================
    // Derived queries
    // =========================================================================

    /// Interaction phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match (self.is_open, self.enable_filter) {
            (false, _) => Phase::Closed,
            (true, true) => Phase::OpenFiltering,
            (true, false) => Phase::OpenBrowsing,
        }
    }

    /// Number of selected items for the count badge. Always 0 in single mode.
    #[must_use]
    pub fn selection_length(&self) -> usize {
        if self.props.multi {
            self.selection.len()
        } else {
            0
        }
    }

    /// Labels of the selected values, for the tooltip.
    ///
    /// A value with no matching option shows as its display string.
    #[must_use]
    pub fn array_of_values(&self) -> Vec<String> {
        self.selection
            .values()
            .into_iter()
            .map(|value| {
                self.label_of(value)
                    .map_or_else(|| value.to_string(), str::to_string)
            })
            .collect()
    }

    /// Find an option by value, children included.
    #[must_use]
    pub fn find_option(&self, value: &OptionValue) -> Option<&SelectOption> {
        option::find_option(&self.props.options, value)
    }

    /// Label of the option carrying `value`.
    #[must_use]
    pub fn label_of(&self, value: &OptionValue) -> Option<&str> {
        self.find_option(value).and_then(|o| o.label.as_deref())
    }

    /// Label of the single selected item, if any.
    ///
    /// In multi mode this is the label of the only item when exactly one is
    /// selected.
    #[must_use]
    pub fn selected_label(&self) -> Option<&str> {
        match self.selection.values().as_slice() {
            [value] => self.label_of(value),
            _ => None,
        }
    }

    // =========================================================================
    // Setters (controller only)
    // =========================================================================

    pub(crate) fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub(crate) fn clear_search(&mut self) {
        self.search.clear();
    }

    pub(crate) fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.normalized();
    }

    pub(crate) fn toggle_value(&mut self, value: OptionValue) {
        self.selection.toggle(value);
    }

    pub(crate) fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    pub(crate) fn set_enable_filter(&mut self, enabled: bool) {
        self.enable_filter = enabled;
    }

    pub(crate) fn set_has_change(&mut self, changed: bool) {
        self.has_change = changed;
    }

    pub(crate) fn set_display_tooltip(&mut self, shown: bool) {
        self.display_tooltip = shown;
    }

    pub(crate) fn key_signal_mut(&mut self) -> &mut KeySignal {
        &mut self.key_signal
    }

    /// Copy the label of the selection into the input, or clear it.
    pub(crate) fn resync_search(&mut self) {
        self.search = self.selected_label().unwrap_or_default().to_string();
    }

    /// Show the single selection in the input.
    ///
    /// Falls back to the raw value when no option carries it. Returns
    /// `false`, leaving the input alone, when nothing is selected.
    pub(crate) fn show_selection_text(&mut self) -> bool {
        let Some(value) = self.selection.as_single() else {
            return false;
        };
        self.search = self
            .label_of(value)
            .map_or_else(|| value.to_string(), str::to_string);
        true
    }

    /// Take over new props and re-derive the selection from them.
    pub(crate) fn apply_props(&mut self, props: ValidProps) {
        let props = props.into_inner();
        if let Some(width) = props.popover_width {
            self.popover_width = width;
        }
        if props.multi != self.props.multi {
            self.has_change = false;
        }
        self.props = props;
        self.sync_value();
    }

    /// Derive selection and input text from `props.value`.
    fn sync_value(&mut self) {
        let value = self.props.value.clone().normalized();

        if self.props.multi {
            self.selection = value;
            if self.selection.is_empty() || self.is_open {
                self.search.clear();
            } else if self.selection.len() == 1 {
                self.resync_search();
            }
            return;
        }

        match value.as_single() {
            Some(selected) => {
                if let Some(label) = self.label_of(selected) {
                    self.search = label.to_string();
                }
            }
            None => self.search.clear(),
        }
        self.selection = value;
    }

    /// Recompute the visible options and, unless pinned, the popover width.
    pub(crate) fn refresh_visible(&mut self) {
        let visible = compute_visible_options(
            &self.props.options,
            &self.search,
            self.enable_filter,
            self.props.sort,
            self.props.display_as_tree,
        );

        if self.props.popover_width.is_none() {
            self.popover_width = popover_width_for(&self.props.options, self.props.multi);
        }

        if visible != self.visible {
            self.visible = visible;
            self.visible_revision += 1;
        }
    }
}
