//! Interaction controller: the reducer behind a search select.
//!
//! Every UI event arrives as a [`SelectEvent`] tagged with where it came
//! from. The reducer updates [`SelectState`], recomputes the visible
//! options and returns a [`Command`] holding the notifications for the
//! caller and the delayed clear of the key signal.
//!
//! # Examples
//!
//! ```
//! use picklist_core::Store;
//! use picklist_widgets::search_select::{
//!     SearchSelectProps, SelectEvent, SelectOption, SelectOutput, SelectState, Selection,
//! };
//!
//! let props = SearchSelectProps::single(vec![
//!     SelectOption::new("a", "Alpha"),
//!     SelectOption::new("b", "Beta"),
//! ]);
//! let mut store = Store::new(SelectState::from_props(props).unwrap());
//!
//! store.dispatch(SelectEvent::SearchChanged("al".into()));
//! assert_eq!(store.state().visible_options().len(), 1);
//!
//! let outputs = store.dispatch(SelectEvent::ItemClicked("a".into())).into_outputs();
//! assert_eq!(outputs, vec![SelectOutput::Changed(Selection::single("a"))]);
//! assert_eq!(store.state().search(), "Alpha");
//! ```

use super::key_signal::{KeySignal, KEY_SIGNAL_TTL_MS};
use super::option::{OptionValue, Selection};
use super::props::ValidProps;
use super::store::SelectState;
use crate::error::InteractionFault;
use picklist_core::{Command, Key, State};

/// Typed input to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectEvent {
    /// The text input was clicked
    InputClicked,
    /// The caret next to the input was clicked
    CaretClicked,
    /// The "deselect all" control was clicked
    DeselectClicked,
    /// The popover surface outside any row was clicked
    PopoverBackgroundClicked,
    /// Generic popover request: click-away, escape or programmatic
    SetOpen(bool),
    /// The popover finished opening
    PopoverOpened,
    /// The input text changed
    SearchChanged(String),
    /// A row was clicked
    ItemClicked(OptionValue),
    /// The "no selection" row was clicked
    EmptyItemClicked,
    /// A key was pressed in the input
    KeyPressed(Key),
    /// The clear scheduled for a key signal came due
    KeySignalElapsed {
        /// Generation the clear was scheduled for
        generation: u64,
    },
    /// The option list consumed the key signal
    KeySignalAcknowledged,
    /// The "add new item" row was clicked
    AddNewItem,
    /// The pointer entered the input
    PointerEntered,
    /// The pointer left the input
    PointerLeft,
    /// The caller passed new props
    PropsChanged(Box<ValidProps>),
}

impl SelectEvent {
    /// Check if the event comes from the user rather than from the host.
    ///
    /// A disabled select ignores these.
    #[must_use]
    pub const fn is_user_interaction(&self) -> bool {
        !matches!(
            self,
            Self::PropsChanged(_)
                | Self::PopoverOpened
                | Self::KeySignalElapsed { .. }
                | Self::KeySignalAcknowledged
                | Self::PointerEntered
                | Self::PointerLeft
        )
    }

    /// Check if the event opens or closes the popover.
    ///
    /// A loading select ignores these.
    #[must_use]
    pub const fn is_popover_interaction(&self) -> bool {
        matches!(
            self,
            Self::InputClicked
                | Self::CaretClicked
                | Self::PopoverBackgroundClicked
                | Self::SetOpen(_)
        )
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::InputClicked => "input click",
            Self::CaretClicked => "caret click",
            Self::DeselectClicked => "deselect click",
            Self::PopoverBackgroundClicked => "popover background click",
            Self::SetOpen(_) => "set open",
            Self::PopoverOpened => "popover opened",
            Self::SearchChanged(_) => "search change",
            Self::ItemClicked(_) => "item click",
            Self::EmptyItemClicked => "empty item click",
            Self::KeyPressed(_) => "key press",
            Self::KeySignalElapsed { .. } => "key signal elapsed",
            Self::KeySignalAcknowledged => "key signal acknowledged",
            Self::AddNewItem => "add new item",
            Self::PointerEntered => "pointer entered",
            Self::PointerLeft => "pointer left",
            Self::PropsChanged(_) => "props changed",
        }
    }
}

impl From<ValidProps> for SelectEvent {
    fn from(props: ValidProps) -> Self {
        Self::PropsChanged(Box::new(props))
    }
}

/// Notification for the owner of a search select.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutput {
    /// The selection was committed
    Changed(Selection),
    /// The user asked to add the typed text as a new option
    AddNewItem(String),
}

/// Command returned by the controller.
pub type SelectCommand = Command<SelectEvent, SelectOutput>;

impl State for SelectState {
    type Message = SelectEvent;
    type Output = SelectOutput;

    fn update(&mut self, msg: SelectEvent) -> SelectCommand {
        let command = self.reduce(msg);
        self.refresh_visible();
        command
    }
}

impl SelectState {
    fn reduce(&mut self, event: SelectEvent) -> SelectCommand {
        if self.props().disabled && event.is_user_interaction() {
            tracing::trace!(event = event.name(), "ignored while disabled");
            return Command::None;
        }
        if self.props().is_loading && event.is_popover_interaction() {
            tracing::trace!(event = event.name(), "ignored while loading");
            return Command::None;
        }

        match event {
            SelectEvent::InputClicked | SelectEvent::CaretClicked => {
                if self.is_open() {
                    self.close()
                } else {
                    self.open();
                    Command::None
                }
            }
            SelectEvent::SetOpen(true) => {
                self.open();
                Command::None
            }
            SelectEvent::SetOpen(false) => self.close(),
            SelectEvent::PopoverBackgroundClicked => {
                if self.is_multi() {
                    Command::None
                } else {
                    self.close()
                }
            }
            SelectEvent::PopoverOpened => {
                self.set_has_change(false);
                Command::None
            }
            SelectEvent::SearchChanged(text) => self.search_changed(text),
            SelectEvent::ItemClicked(value) => self.item_clicked(value),
            SelectEvent::EmptyItemClicked => self.empty_item_clicked(),
            SelectEvent::DeselectClicked => self.deselect_all(),
            SelectEvent::KeyPressed(key) => self.key_pressed(key),
            SelectEvent::KeySignalElapsed { generation } => {
                self.key_signal_mut().expire(generation);
                Command::None
            }
            SelectEvent::KeySignalAcknowledged => {
                self.key_signal_mut().acknowledge();
                Command::None
            }
            SelectEvent::AddNewItem => self.add_new_item(),
            SelectEvent::PointerEntered => {
                let show = self.props().display_value_tooltip && !self.selection().is_empty();
                self.set_display_tooltip(show);
                Command::None
            }
            SelectEvent::PointerLeft => {
                self.set_display_tooltip(false);
                Command::None
            }
            SelectEvent::PropsChanged(props) => {
                self.apply_props(*props);
                Command::None
            }
        }
    }

    // =========================================================================
    // Open / close
    // =========================================================================

    fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.set_open(true);
        self.set_enable_filter(false);
        if self.is_multi() {
            self.clear_search();
        } else {
            self.show_selection_text();
        }
        tracing::debug!(multi = self.is_multi(), "popover opened");
    }

    /// Close the popover, committing or flushing the selection.
    ///
    /// Closing a closed popover does nothing.
    fn close(&mut self) -> SelectCommand {
        if !self.is_open() {
            return Command::None;
        }
        self.set_open(false);
        self.set_enable_filter(false);
        tracing::debug!(multi = self.is_multi(), "popover closed");

        if !self.is_multi() {
            if !self.show_selection_text() && self.visible_options().is_empty() {
                self.clear_search();
            }
            return Command::emit(SelectOutput::Changed(self.selection().clone()));
        }

        self.resync_search();
        self.flush_deferred_change()
    }

    /// Emit the batched multi selection if it changed while open.
    fn flush_deferred_change(&mut self) -> SelectCommand {
        if self.props().is_deferred_emit() && self.has_change() {
            self.set_has_change(false);
            Command::emit(SelectOutput::Changed(self.selection().clone()))
        } else {
            Command::None
        }
    }

    // =========================================================================
    // Search
    // =========================================================================

    fn search_changed(&mut self, text: String) -> SelectCommand {
        if !self.is_open() {
            self.set_open(true);
        }
        self.set_enable_filter(true);
        let emptied = text.is_empty();
        self.set_search(text);

        if emptied {
            self.deselect_pass()
        } else {
            Command::None
        }
    }

    /// Reconcile the selection after the input was emptied.
    ///
    /// Single mode keeps its value unless empty selections are allowed.
    fn deselect_pass(&mut self) -> SelectCommand {
        let result = if self.is_multi() || !self.props().allow_empty {
            self.selection().clone()
        } else {
            Selection::Single(None)
        };
        self.set_selection(result.clone());
        self.set_has_change(false);

        if self.is_multi() || !result.is_empty() {
            self.set_enable_filter(false);
            self.set_open(true);
        }
        Command::emit(SelectOutput::Changed(result))
    }

    // =========================================================================
    // Selection
    // =========================================================================

    fn item_clicked(&mut self, value: OptionValue) -> SelectCommand {
        if !self.is_open() {
            return self.fault(InteractionFault::NotOpen("item click"));
        }

        let found = self
            .find_option(&value)
            .and_then(|o| Some((o.value.clone()?, o.label.clone()?)));
        let Some((value, label)) = found else {
            let fallback = if self.is_multi() {
                Command::None
            } else {
                self.close()
            };
            return self
                .fault(InteractionFault::UnknownOption(value.to_string()))
                .and(fallback);
        };

        if !self.is_multi() {
            self.set_selection(Selection::Single(Some(value)));
            self.set_enable_filter(false);
            self.set_search(label);
            return self.close();
        }

        self.toggle_value(value);
        self.clear_search();
        self.set_enable_filter(false);
        tracing::debug!(selected = self.selection().len(), "multi selection toggled");

        if self.props().get_value_on_select_menu_item {
            Command::emit(SelectOutput::Changed(self.selection().clone()))
        } else {
            self.set_has_change(true);
            Command::None
        }
    }

    fn empty_item_clicked(&mut self) -> SelectCommand {
        if self.is_multi() || !self.props().allow_empty {
            return self.fault(InteractionFault::EmptyItemNotAllowed);
        }
        if !self.is_open() {
            return self.fault(InteractionFault::NotOpen("empty item click"));
        }
        self.set_selection(Selection::Single(None));
        self.clear_search();
        self.close()
    }

    fn deselect_all(&mut self) -> SelectCommand {
        if self.is_multi() {
            self.set_selection(Selection::Multi(Vec::new()));
        } else {
            self.set_selection(Selection::Single(None));
        }
        self.clear_search();
        self.set_has_change(false);
        Command::emit(SelectOutput::Changed(self.selection().clone()))
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    fn key_pressed(&mut self, key: Key) -> SelectCommand {
        if !self.is_open() {
            return Command::None;
        }
        if key == Key::Escape {
            return self.close();
        }
        if !KeySignal::is_signal_key(key) {
            return Command::None;
        }

        let mut command = Command::None;
        if key == Key::Delete {
            command = self.deselect_pass();
            self.clear_search();
        }

        let generation = self.key_signal_mut().raise(key);
        tracing::trace!(?key, generation, "key signal raised");
        command.and(Command::delay(
            KEY_SIGNAL_TTL_MS,
            SelectEvent::KeySignalElapsed { generation },
        ))
    }

    // =========================================================================
    // New items
    // =========================================================================

    fn add_new_item(&mut self) -> SelectCommand {
        if !self.props().allow_new_item {
            return self.fault(InteractionFault::NewItemNotAllowed);
        }
        if !self.is_open() {
            return self.fault(InteractionFault::NotOpen("add new item"));
        }

        let text = self.search().to_string();
        self.set_open(false);
        let flushed = self.flush_deferred_change();
        self.clear_search();
        self.set_enable_filter(false);

        Command::emit(SelectOutput::AddNewItem(text)).and(flushed)
    }

    fn fault(&self, fault: InteractionFault) -> SelectCommand {
        tracing::warn!(%fault, open = self.is_open(), "interaction fault");
        Command::None
    }
}
