//! Caller-facing configuration of a search select.

use super::option::{SelectOption, Selection, SortDirection};
use crate::error::SelectError;
use serde::{Deserialize, Serialize};

/// Placeholder shown in an empty input.
pub const DEFAULT_PLACEHOLDER: &str = "Search";

/// Popover width used until options have been measured.
pub const DEFAULT_POPOVER_WIDTH: f32 = 150.0;

/// Indent per tree level, in pixels.
pub const DEFAULT_TREE_INDENT: f32 = 15.0;

/// Props of a search select.
///
/// Keys are camelCase so props can be shared with JSON/YAML manifests:
///
/// ```yaml
/// multi: true
/// value: [a]
/// sort: asc
/// options:
///   - { value: a, label: Alpha }
///   - { value: b, label: Beta, additionalSearchText: second }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchSelectProps {
    /// Selected value(s), authoritative over internal state
    pub value: Selection,
    /// Available options
    pub options: Vec<SelectOption>,
    /// Select several values instead of one
    pub multi: bool,
    /// Single mode: allow clearing the selection
    pub allow_empty: bool,
    /// Offer to add the typed text as a new item
    pub allow_new_item: bool,
    /// Sort the flat option list by label
    pub sort: Option<SortDirection>,
    /// Render options with their children as a tree
    pub display_as_tree: bool,
    /// Indent per tree level, in pixels
    pub tree_child_indent_width: Option<f32>,
    /// Multi mode: notify on every item click instead of on close
    pub get_value_on_select_menu_item: bool,
    /// Options are still loading; popover interaction is suspended
    pub is_loading: bool,
    /// Whether the widget is disabled
    pub disabled: bool,
    /// Placeholder for the empty input
    pub placeholder: Option<String>,
    /// Fixed popover width; measured from labels when unset
    pub popover_width: Option<f32>,
    /// Width of the input, used as the initial popover width
    pub fixed_input_width_px: Option<f32>,
    /// Show the selected labels in a tooltip on hover
    pub display_value_tooltip: bool,
    /// Render the popover without arrow and padding
    pub popover_minimal: bool,
}

impl SearchSelectProps {
    /// Props for a single select over `options`.
    #[must_use]
    pub fn single(options: impl IntoIterator<Item = SelectOption>) -> Self {
        Self {
            options: options.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Props for a multi select over `options`, starting with nothing selected.
    #[must_use]
    pub fn multi(options: impl IntoIterator<Item = SelectOption>) -> Self {
        Self {
            options: options.into_iter().collect(),
            multi: true,
            value: Selection::Multi(Vec::new()),
            ..Self::default()
        }
    }

    /// Load props from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, SelectError> {
        let props: Self = serde_yaml_ng::from_str(yaml)?;
        props.validate()?;
        Ok(props)
    }

    /// Load props from JSON.
    pub fn from_json(json: &str) -> Result<Self, SelectError> {
        let props: Self = serde_json::from_str(json)?;
        props.validate()?;
        Ok(props)
    }

    /// Set the selected value(s).
    #[must_use]
    pub fn value(mut self, value: Selection) -> Self {
        self.value = value;
        self
    }

    /// Replace the options.
    #[must_use]
    pub fn options(mut self, options: impl IntoIterator<Item = SelectOption>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    /// Allow an empty single selection.
    #[must_use]
    pub const fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Allow adding new items.
    #[must_use]
    pub const fn allow_new_item(mut self, allow: bool) -> Self {
        self.allow_new_item = allow;
        self
    }

    /// Set sort direction.
    #[must_use]
    pub const fn sort(mut self, direction: Option<SortDirection>) -> Self {
        self.sort = direction;
        self
    }

    /// Render as a tree.
    #[must_use]
    pub const fn display_as_tree(mut self, tree: bool) -> Self {
        self.display_as_tree = tree;
        self
    }

    /// Notify on every item click (multi mode).
    #[must_use]
    pub const fn get_value_on_select_menu_item(mut self, immediate: bool) -> Self {
        self.get_value_on_select_menu_item = immediate;
        self
    }

    /// Set loading state.
    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.is_loading = loading;
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Pin the popover width.
    #[must_use]
    pub const fn popover_width(mut self, width: f32) -> Self {
        self.popover_width = Some(width);
        self
    }

    /// Show selected labels in a tooltip.
    #[must_use]
    pub const fn display_value_tooltip(mut self, show: bool) -> Self {
        self.display_value_tooltip = show;
        self
    }

    /// Check the value shape against the mode.
    pub fn validate(&self) -> Result<(), SelectError> {
        match (&self.value, self.multi) {
            (Selection::Single(_), true) => Err(SelectError::MultiValueNotArray),
            (Selection::Multi(_), false) => Err(SelectError::SingleValueIsArray),
            _ => Ok(()),
        }
    }

    /// Validate and seal the props for the controller.
    pub fn validated(self) -> Result<ValidProps, SelectError> {
        self.validate()?;
        Ok(ValidProps(self))
    }

    /// Placeholder text, falling back to [`DEFAULT_PLACEHOLDER`].
    #[must_use]
    pub fn placeholder_text(&self) -> &str {
        self.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER)
    }

    /// Popover width before any option has been measured.
    #[must_use]
    pub fn initial_popover_width(&self) -> f32 {
        self.popover_width
            .or(self.fixed_input_width_px)
            .unwrap_or(DEFAULT_POPOVER_WIDTH)
    }

    /// Indent per tree level, in pixels.
    #[must_use]
    pub fn tree_indent(&self) -> f32 {
        self.tree_child_indent_width.unwrap_or(DEFAULT_TREE_INDENT)
    }

    /// Multi mode batching changes until the popover closes.
    #[must_use]
    pub const fn is_deferred_emit(&self) -> bool {
        self.multi && !self.get_value_on_select_menu_item
    }
}

/// Props whose value shape has been checked against the mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProps(SearchSelectProps);

impl ValidProps {
    /// Borrow the props.
    #[must_use]
    pub const fn get(&self) -> &SearchSelectProps {
        &self.0
    }

    /// Unwrap the props.
    #[must_use]
    pub fn into_inner(self) -> SearchSelectProps {
        self.0
    }
}
