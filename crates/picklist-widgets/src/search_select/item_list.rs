//! Keyboard side of the option list.
//!
//! [`ItemList`] flattens the visible options into rows, keeps the active
//! row, and reacts to each key signal generation once.

use super::option::{OptionValue, SelectOption};
use super::store::SelectState;
use picklist_core::Key;

/// One row of the flattened option list.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatOption {
    /// The option shown on this row
    pub option: SelectOption,
    /// Nesting level, 0 for top-level options
    pub depth: usize,
    /// Left indent in pixels
    pub indent_px: f32,
}

impl FlatOption {
    /// Value of the row's option.
    #[must_use]
    pub fn value(&self) -> Option<&OptionValue> {
        self.option.value.as_ref()
    }
}

/// What the host should do after the list consumed a key.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemListAction {
    /// Select the option with this value
    Select(OptionValue),
}

/// Flatten `options` into rows.
///
/// In tree mode children follow their parent depth-first and malformed
/// children are left out. Otherwise children are not shown.
#[must_use]
pub fn flatten_options(
    options: &[SelectOption],
    display_as_tree: bool,
    indent_px: f32,
) -> Vec<FlatOption> {
    let mut rows = Vec::with_capacity(options.len());
    for option in options {
        push_rows(&mut rows, option, 0, display_as_tree, indent_px);
    }
    rows
}

fn push_rows(
    rows: &mut Vec<FlatOption>,
    option: &SelectOption,
    depth: usize,
    display_as_tree: bool,
    indent_px: f32,
) {
    rows.push(FlatOption {
        option: SelectOption {
            children: Vec::new(),
            ..option.clone()
        },
        depth,
        indent_px: depth as f32 * indent_px,
    });

    if !display_as_tree {
        return;
    }
    for child in option.children.iter().filter(|c| c.is_well_formed()) {
        push_rows(rows, child, depth + 1, display_as_tree, indent_px);
    }
}

/// Option list cursor driven by the key signal.
#[derive(Debug, Clone, Default)]
pub struct ItemList {
    rows: Vec<FlatOption>,
    active: Option<usize>,
    revision: Option<u64>,
    seen_generation: u64,
}

impl ItemList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows currently shown.
    #[must_use]
    pub fn rows(&self) -> &[FlatOption] {
        &self.rows
    }

    /// Index of the active row.
    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    /// The active row.
    #[must_use]
    pub fn active_row(&self) -> Option<&FlatOption> {
        self.active.and_then(|index| self.rows.get(index))
    }

    /// Rebuild the rows if the visible options changed.
    ///
    /// The active row is reset when the rows change or the popover is closed.
    pub fn sync(&mut self, state: &SelectState) {
        if self.revision != Some(state.visible_revision()) {
            let props = state.props();
            self.rows = flatten_options(
                state.visible_options(),
                props.display_as_tree,
                props.tree_indent(),
            );
            self.revision = Some(state.visible_revision());
            self.active = None;
        }
        if !state.is_open() {
            self.active = None;
        }
    }

    /// React to the pending key signal, once per generation.
    pub fn consume(&mut self, state: &SelectState) -> Option<ItemListAction> {
        self.sync(state);

        let signal = state.key_signal();
        if signal.generation() == self.seen_generation {
            return None;
        }
        self.seen_generation = signal.generation();

        match signal.key()? {
            Key::ArrowDown => {
                self.move_by(1);
                None
            }
            Key::ArrowUp => {
                self.move_by(-1);
                None
            }
            Key::Enter => self
                .active_row()
                .and_then(FlatOption::value)
                .cloned()
                .map(ItemListAction::Select),
            _ => None,
        }
    }

    fn move_by(&mut self, step: isize) {
        let Some(last) = self.rows.len().checked_sub(1) else {
            self.active = None;
            return;
        };
        self.active = Some(match self.active {
            None if step < 0 => last,
            None => 0,
            Some(index) => index.saturating_add_signed(step).min(last),
        });
    }
}
