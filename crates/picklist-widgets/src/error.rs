//! Error types for picklist-widgets.

use thiserror::Error;

/// Errors raised at the widget boundary.
///
/// These signal caller misuse or unreadable configuration and are never
/// swallowed inside a widget.
#[derive(Debug, Error)]
pub enum SelectError {
    /// A multi select was given a scalar value.
    #[error("Multi select value must be an array")]
    MultiValueNotArray,

    /// A single select was given an array value.
    #[error("Single select value must not be an array")]
    SingleValueIsArray,

    /// Props could not be read from YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Props could not be read from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why an option was left out of the visible list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionFault {
    /// The option has no value.
    #[error("option has no value")]
    MissingValue,

    /// The option has no label.
    #[error("option has no label")]
    MissingLabel,

    /// The option's numeric value is NaN or infinite.
    #[error("option value {0} is not a finite number")]
    NonFiniteValue(f64),
}

/// Interaction the controller could not carry out as asked.
///
/// Each variant has a fixed fallback in the controller; anything else is a
/// bug and should surface as one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionFault {
    /// A row was clicked whose value is not among the options.
    #[error("no option with value '{0}'")]
    UnknownOption(String),

    /// A popover-only action arrived while the popover was closed.
    #[error("{0} while the popover is closed")]
    NotOpen(&'static str),

    /// The empty row was clicked on a select that does not allow empty.
    #[error("empty selection is not allowed")]
    EmptyItemNotAllowed,

    /// A new item was requested on a select that does not allow new items.
    #[error("adding new items is not allowed")]
    NewItemNotAllowed,
}
