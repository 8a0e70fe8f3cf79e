//! Dropdown editor for a table cell.
//!
//! Shows the cell value on a caret button and opens a list of options,
//! optionally filtered by a query. Picking an option reports the edit with
//! the cell's coordinates.

use serde::{Deserialize, Serialize};

/// Caret text when the cell has no value.
pub const NO_SELECTION_TEXT: &str = "(No selection)";

/// An option of a dropdown cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellOption {
    /// Option text, also the cell value
    pub value: String,
    /// Position shown in front of the value when filtering
    pub index: usize,
}

impl CellOption {
    /// Create an option.
    #[must_use]
    pub fn new(value: impl Into<String>, index: usize) -> Self {
        Self {
            value: value.into(),
            index,
        }
    }

    /// Text of the option's row.
    #[must_use]
    pub fn row_text(&self) -> String {
        format!(" {}", self.value)
    }
}

/// Edit notification of a dropdown cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdited {
    /// Row of the edited cell
    pub row: usize,
    /// Column of the edited cell
    pub column: usize,
    /// New value
    pub value: String,
}

/// Dropdown editor bound to one table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownCell {
    options: Vec<CellOption>,
    value_selected: Option<String>,
    #[serde(default)]
    filterable: bool,
    row: usize,
    column: usize,
}

impl DropdownCell {
    /// Create the editor for the cell at `row`/`column`.
    ///
    /// `value_selected` is kept only if one of the options carries it.
    #[must_use]
    pub fn new(
        options: impl IntoIterator<Item = CellOption>,
        value_selected: Option<&str>,
        row: usize,
        column: usize,
    ) -> Self {
        let options: Vec<CellOption> = options.into_iter().collect();
        let value_selected = value_selected.and_then(|wanted| {
            options
                .iter()
                .find(|o| o.value == wanted)
                .map(|o| o.value.clone())
        });
        Self {
            options,
            value_selected,
            filterable: false,
            row,
            column,
        }
    }

    /// Let the user filter the options.
    #[must_use]
    pub const fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Options of the cell.
    #[must_use]
    pub fn options(&self) -> &[CellOption] {
        &self.options
    }

    /// Current value.
    #[must_use]
    pub fn value_selected(&self) -> Option<&str> {
        self.value_selected.as_deref()
    }

    /// Check if the options can be filtered.
    #[must_use]
    pub const fn is_filterable(&self) -> bool {
        self.filterable
    }

    /// The editor is only drawn when the cell holds a known value.
    #[must_use]
    pub const fn is_rendered(&self) -> bool {
        self.value_selected.is_some()
    }

    /// Text on the caret button.
    #[must_use]
    pub fn caret_text(&self) -> &str {
        self.value_selected.as_deref().unwrap_or(NO_SELECTION_TEXT)
    }

    /// Check if `option` matches the filter `query`.
    ///
    /// The query is searched in `"{index}. {value} "`, ignoring case, so
    /// users can jump to an option by its number.
    #[must_use]
    pub fn matches(query: &str, option: &CellOption) -> bool {
        format!("{}. {} ", option.index, option.value.to_lowercase())
            .contains(&query.to_lowercase())
    }

    /// Options listed for `query`. All of them when not filterable.
    #[must_use]
    pub fn visible_options(&self, query: &str) -> Vec<&CellOption> {
        self.options
            .iter()
            .filter(|option| !self.filterable || Self::matches(query, option))
            .collect()
    }

    /// Pick an option, returning the edit to report.
    pub fn select(&mut self, option: &CellOption) -> CellEdited {
        tracing::debug!(row = self.row, column = self.column, value = %option.value, "cell edited");
        self.value_selected = Some(option.value.clone());
        CellEdited {
            row: self.row,
            column: self.column,
            value: option.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<CellOption> {
        vec![
            CellOption::new("Open", 1),
            CellOption::new("In Progress", 2),
            CellOption::new("Closed", 12),
        ]
    }

    #[test]
    fn test_new_resolves_known_value() {
        let cell = DropdownCell::new(options(), Some("Closed"), 3, 4);
        assert_eq!(cell.value_selected(), Some("Closed"));
        assert!(cell.is_rendered());
        assert_eq!(cell.caret_text(), "Closed");
    }

    #[test]
    fn test_new_drops_unknown_value() {
        let cell = DropdownCell::new(options(), Some("Archived"), 0, 0);
        assert_eq!(cell.value_selected(), None);
        assert!(!cell.is_rendered());
        assert_eq!(cell.caret_text(), "(No selection)");
    }

    #[test]
    fn test_matches_by_value_case_insensitive() {
        let option = CellOption::new("In Progress", 2);
        assert!(DropdownCell::matches("PROG", &option));
        assert!(DropdownCell::matches("", &option));
        assert!(!DropdownCell::matches("done", &option));
    }

    #[test]
    fn test_matches_by_index_prefix() {
        let option = CellOption::new("Closed", 12);
        assert!(DropdownCell::matches("12.", &option));
        assert!(DropdownCell::matches("2. clo", &option));
        assert!(DropdownCell::matches("closed ", &option));
        assert!(!DropdownCell::matches("13.", &option));
    }

    #[test]
    fn test_visible_options_unfiltered() {
        let cell = DropdownCell::new(options(), Some("Open"), 0, 0);
        assert_eq!(cell.visible_options("zzz").len(), 3);
    }

    #[test]
    fn test_visible_options_filtered() {
        let cell = DropdownCell::new(options(), Some("Open"), 0, 0).filterable(true);
        let visible = cell.visible_options("o");
        assert_eq!(visible.len(), 3);
        let visible = cell.visible_options("1.");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].value, "Open");
    }

    #[test]
    fn test_select_reports_edit() {
        let mut cell = DropdownCell::new(options(), Some("Open"), 5, 2);
        let option = cell.options()[2].clone();
        let edit = cell.select(&option);
        assert_eq!(
            edit,
            CellEdited {
                row: 5,
                column: 2,
                value: "Closed".to_string(),
            }
        );
        assert_eq!(cell.caret_text(), "Closed");
    }

    #[test]
    fn test_row_text() {
        assert_eq!(CellOption::new("Open", 1).row_text(), " Open");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let cell: DropdownCell = serde_json::from_str(
            r#"{
                "options": [{"value": "A", "index": 1}],
                "valueSelected": "A",
                "filterable": true,
                "row": 1,
                "column": 2
            }"#,
        )
        .unwrap();
        assert!(cell.is_filterable());
        assert_eq!(cell.value_selected(), Some("A"));
    }
}
