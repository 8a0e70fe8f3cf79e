//! Mounted search select: store, timers and callbacks in one place.

use super::controller::{SelectEvent, SelectOutput};
use super::item_list::{ItemList, ItemListAction};
use super::option::{OptionValue, Selection};
use super::props::SearchSelectProps;
use super::store::SelectState;
use crate::error::SelectError;
use picklist_core::{CommandExecutor, Key, Store};
use std::fmt;

type ChangeCallback = Box<dyn FnMut(&Selection) + Send>;
type AddNewItemCallback = Box<dyn FnMut(&str) + Send>;

/// A search select instance.
///
/// The host feeds typed UI events into [`handle`](Self::handle), advances
/// the clock with [`advance`](Self::advance), and reads the state back for
/// rendering. Committed selections and new-item requests reach the
/// callbacks and are also returned from `handle`.
///
/// # Examples
///
/// ```
/// use picklist_widgets::search_select::{
///     SearchSelect, SearchSelectProps, SelectEvent, SelectOption, Selection,
/// };
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// let props = SearchSelectProps::multi(vec![
///     SelectOption::new("a", "Alpha"),
///     SelectOption::new("b", "Beta"),
/// ]);
/// let mut select = SearchSelect::new(props)
///     .unwrap()
///     .on_change(move |sel| sink.lock().unwrap().push(sel.clone()));
///
/// select.handle(SelectEvent::InputClicked);
/// select.handle(SelectEvent::ItemClicked("a".into()));
/// select.handle(SelectEvent::ItemClicked("b".into()));
/// assert!(seen.lock().unwrap().is_empty());
///
/// select.handle(SelectEvent::SetOpen(false));
/// assert_eq!(*seen.lock().unwrap(), vec![Selection::multi(["a", "b"])]);
/// ```
pub struct SearchSelect {
    store: Store<SelectState>,
    executor: CommandExecutor<SelectEvent>,
    list: ItemList,
    on_change: Option<ChangeCallback>,
    on_add_new_item: Option<AddNewItemCallback>,
}

impl SearchSelect {
    /// Mount a search select.
    pub fn new(props: SearchSelectProps) -> Result<Self, SelectError> {
        let state = SelectState::from_props(props)?;
        let mut list = ItemList::new();
        list.sync(&state);
        Ok(Self {
            store: Store::new(state),
            executor: CommandExecutor::new(),
            list,
            on_change: None,
            on_add_new_item: None,
        })
    }

    /// Set the change callback.
    #[must_use]
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Selection) + Send + 'static,
    {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Set the new-item callback.
    #[must_use]
    pub fn on_add_new_item<F>(mut self, f: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.on_add_new_item = Some(Box::new(f));
        self
    }

    /// Register a re-render subscriber, called after every event.
    pub fn subscribe<F>(&mut self, f: F)
    where
        F: Fn(&SelectState) + Send + Sync + 'static,
    {
        self.store.subscribe(f);
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SelectState {
        self.store.state()
    }

    /// Rows of the option list, with the keyboard cursor.
    #[must_use]
    pub const fn item_list(&self) -> &ItemList {
        &self.list
    }

    /// Number of delayed messages waiting for the clock.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.executor.pending()
    }

    /// Replace the props.
    ///
    /// Props are authoritative: the selection is re-derived from them.
    pub fn set_props(&mut self, props: SearchSelectProps) -> Result<(), SelectError> {
        let props = props.validated()?;
        self.handle(props.into());
        Ok(())
    }

    /// Feed one UI event through the controller.
    ///
    /// Returns every output raised, including those from a selection made
    /// with the keyboard.
    pub fn handle(&mut self, event: SelectEvent) -> Vec<SelectOutput> {
        let mut outputs = self.run(event);

        if let Some(ItemListAction::Select(value)) = self.list.consume(self.store.state()) {
            tracing::debug!(%value, "option chosen with keyboard");
            outputs.extend(self.run(SelectEvent::ItemClicked(value)));
        }
        outputs
    }

    /// Advance the clock by `delta_ms` and run the messages that came due.
    pub fn advance(&mut self, delta_ms: u32) -> Vec<SelectOutput> {
        let mut outputs = Vec::new();
        for message in self.executor.advance(delta_ms) {
            outputs.extend(self.run(message));
        }
        outputs
    }

    // =========================================================================
    // Convenience
    // =========================================================================

    /// Type into the input.
    pub fn type_text(&mut self, text: impl Into<String>) -> Vec<SelectOutput> {
        self.handle(SelectEvent::SearchChanged(text.into()))
    }

    /// Click the row carrying `value`.
    pub fn click_item(&mut self, value: impl Into<OptionValue>) -> Vec<SelectOutput> {
        self.handle(SelectEvent::ItemClicked(value.into()))
    }

    /// Press a key in the input.
    pub fn press(&mut self, key: Key) -> Vec<SelectOutput> {
        self.handle(SelectEvent::KeyPressed(key))
    }

    /// Open or close the popover.
    pub fn set_open(&mut self, open: bool) -> Vec<SelectOutput> {
        self.handle(SelectEvent::SetOpen(open))
    }

    fn run(&mut self, event: SelectEvent) -> Vec<SelectOutput> {
        let command = self.store.dispatch(event);
        let outputs = self.executor.execute(command);
        for output in &outputs {
            self.notify(output);
        }
        self.list.sync(self.store.state());
        outputs
    }

    fn notify(&mut self, output: &SelectOutput) {
        match output {
            SelectOutput::Changed(selection) => {
                if let Some(on_change) = self.on_change.as_mut() {
                    on_change(selection);
                }
            }
            SelectOutput::AddNewItem(text) => {
                if let Some(on_add_new_item) = self.on_add_new_item.as_mut() {
                    on_add_new_item(text);
                }
            }
        }
    }
}

impl fmt::Debug for SearchSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchSelect")
            .field("store", &self.store)
            .field("pending_timers", &self.executor.pending())
            .field("on_change", &self.on_change.is_some())
            .field("on_add_new_item", &self.on_add_new_item.is_some())
            .finish_non_exhaustive()
    }
}
