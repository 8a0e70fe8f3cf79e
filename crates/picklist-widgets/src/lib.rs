//! Widget implementations for Picklist.
//!
//! - [`search_select`]: searchable single/multi select with a popover list
//! - [`dropdown_cell`]: dropdown editor for table cells

pub mod dropdown_cell;
pub mod error;
pub mod search_select;

pub use dropdown_cell::{CellEdited, CellOption, DropdownCell};
pub use error::{InteractionFault, OptionFault, SelectError};
pub use search_select::{
    OptionValue, Phase, SearchSelect, SearchSelectProps, SelectEvent, SelectOption, SelectOutput,
    SelectState, Selection, SortDirection,
};
