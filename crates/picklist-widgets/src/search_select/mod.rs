//! Searchable single/multi select.
//!
//! The widget is headless: it owns the interaction state and leaves
//! drawing the input, popover, rows and tooltip to the host.
//!
//! - [`option`]: values, options and selections
//! - [`props`]: caller configuration
//! - [`filter`]: visible options and popover width
//! - [`store`]: [`SelectState`]
//! - [`key_signal`]: the one-shot key signal
//! - [`controller`]: events, outputs and the reducer
//! - [`item_list`]: keyboard cursor over the rows
//! - [`component`]: [`SearchSelect`], the mounted instance

pub mod component;
pub mod controller;
pub mod filter;
pub mod item_list;
pub mod key_signal;
pub mod option;
pub mod props;
pub mod store;

pub use component::SearchSelect;
pub use controller::{SelectCommand, SelectEvent, SelectOutput};
pub use filter::{compute_visible_options, popover_width_for};
pub use item_list::{flatten_options, FlatOption, ItemList, ItemListAction};
pub use key_signal::{KeySignal, KEY_SIGNAL_TTL_MS};
pub use option::{find_option, OptionValue, SelectOption, Selection, SortDirection};
pub use props::{SearchSelectProps, ValidProps};
pub use store::{Phase, SelectState};
