//! Options, values and selections for the search select.

use crate::error::OptionFault;
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Value carried by an option: text or a number.
///
/// Values compare by their display form, so `1` and `"1"` are the same
/// value. Callers routinely mix the two when ids come from different sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
}

impl OptionValue {
    /// Check if this is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }

    /// Check that a numeric value is usable.
    pub fn check(&self) -> Result<(), OptionFault> {
        match self {
            Self::Number(n) if !n.is_finite() => Err(OptionFault::NonFiniteValue(*n)),
            _ => Ok(()),
        }
    }
}

impl PartialEq for OptionValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

/// A selectable option.
///
/// `value` and `label` are optional so that malformed caller data still
/// loads; the filter leaves such options out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    /// Unique value for this option
    #[serde(default, deserialize_with = "deserialize_value")]
    pub value: Option<OptionValue>,
    /// Display label
    #[serde(default, deserialize_with = "deserialize_label")]
    pub label: Option<String>,
    /// Extra text matched by the search but never displayed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_search_text: Option<String>,
    /// Nested options, shown when the select renders as a tree
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SelectOption>,
}

impl SelectOption {
    /// Create a new option.
    #[must_use]
    pub fn new(value: impl Into<OptionValue>, label: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            label: Some(label.into()),
            additional_search_text: None,
            children: Vec::new(),
        }
    }

    /// Create an option where value equals label.
    #[must_use]
    pub fn simple(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(text.clone(), text)
    }

    /// Set additional search text.
    #[must_use]
    pub fn search_text(mut self, text: impl Into<String>) -> Self {
        self.additional_search_text = Some(text.into());
        self
    }

    /// Add a child option.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple child options.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Value and label of a well-formed option.
    pub fn check(&self) -> Result<(&OptionValue, &str), OptionFault> {
        let value = self.value.as_ref().ok_or(OptionFault::MissingValue)?;
        value.check()?;
        let label = self.label.as_deref().ok_or(OptionFault::MissingLabel)?;
        Ok((value, label))
    }

    /// Check if the option has both a usable value and a label.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.check().is_ok()
    }

    /// Check if this option carries the given value.
    #[must_use]
    pub fn has_value(&self, value: &OptionValue) -> bool {
        self.value.as_ref().is_some_and(|v| v == value)
    }
}

/// Find an option by value, searching children depth-first.
#[must_use]
pub fn find_option<'a>(
    options: &'a [SelectOption],
    value: &OptionValue,
) -> Option<&'a SelectOption> {
    options.iter().find_map(|option| {
        if option.has_value(value) {
            Some(option)
        } else {
            find_option(&option.children, value)
        }
    })
}

/// Values must be text or numbers; anything else counts as missing.
fn deserialize_value<'de, D>(deserializer: D) -> Result<Option<OptionValue>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ValueRepr {
        Value(OptionValue),
        Other(IgnoredAny),
    }

    Ok(match Option::<ValueRepr>::deserialize(deserializer)? {
        Some(ValueRepr::Value(value)) => Some(value),
        Some(ValueRepr::Other(_)) | None => None,
    })
}

/// Labels may arrive as numbers or booleans; anything else counts as missing.
fn deserialize_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LabelRepr {
        Text(String),
        Number(serde_json::Number),
        Bool(bool),
        Other(IgnoredAny),
    }

    Ok(match Option::<LabelRepr>::deserialize(deserializer)? {
        Some(LabelRepr::Text(text)) => Some(text),
        Some(LabelRepr::Number(n)) => Some(n.to_string()),
        Some(LabelRepr::Bool(b)) => Some(b.to_string()),
        Some(LabelRepr::Other(_)) | None => None,
    })
}

/// Sort direction for the option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// A to Z
    Asc,
    /// Z to A
    Desc,
}

/// Current selection: one value, or a list of values in multi mode.
///
/// The empty string is not a value: single selections holding `""` are
/// normalised to `Single(None)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    /// Multi mode: ordered list of selected values
    Multi(Vec<OptionValue>),
    /// Single mode: the selected value, if any
    Single(Option<OptionValue>),
}

impl Default for Selection {
    fn default() -> Self {
        Self::Single(None)
    }
}

impl Selection {
    /// A single selection holding `value`.
    #[must_use]
    pub fn single(value: impl Into<OptionValue>) -> Self {
        Self::Single(Some(value.into())).normalized()
    }

    /// A multi selection holding `values`, in order.
    #[must_use]
    pub fn multi<V: Into<OptionValue>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::Multi(values.into_iter().map(Into::into).collect())
    }

    /// Fold the empty string into "nothing selected".
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Single(Some(value)) if value.is_empty() => Self::Single(None),
            other => other,
        }
    }

    /// Check if this is a multi selection.
    #[must_use]
    pub const fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }

    /// Check if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Multi(values) => values.is_empty(),
            Self::Single(value) => value.as_ref().map_or(true, OptionValue::is_empty),
        }
    }

    /// Number of selected values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Multi(values) => values.len(),
            Self::Single(_) if self.is_empty() => 0,
            Self::Single(_) => 1,
        }
    }

    /// Selected values, in order.
    #[must_use]
    pub fn values(&self) -> Vec<&OptionValue> {
        match self {
            Self::Multi(values) => values.iter().collect(),
            Self::Single(value) => value.iter().filter(|v| !v.is_empty()).collect(),
        }
    }

    /// The single selected value, if any.
    #[must_use]
    pub fn as_single(&self) -> Option<&OptionValue> {
        match self {
            Self::Single(value) => value.as_ref().filter(|v| !v.is_empty()),
            Self::Multi(_) => None,
        }
    }

    /// Check if `value` is selected.
    #[must_use]
    pub fn contains(&self, value: &OptionValue) -> bool {
        self.values().into_iter().any(|v| v == value)
    }

    /// Add `value` if absent, remove every occurrence if present.
    ///
    /// A single selection is turned into a list first.
    pub fn toggle(&mut self, value: OptionValue) {
        let mut values: Vec<OptionValue> = self.values().into_iter().cloned().collect();
        if values.contains(&value) {
            values.retain(|v| v != &value);
        } else {
            values.push(value);
        }
        *self = Self::Multi(values);
    }
}
