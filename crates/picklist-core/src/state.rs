//! State management for Picklist widgets.
//!
//! This module implements the Elm Architecture pattern for predictable state
//! management: `State + Message → (State, Command)`.
//!
//! A widget's interaction logic is a pure reduction over its state. Anything
//! that must leave the reducer (a change notification for the caller, a
//! timer) is described by the returned [`Command`] and carried out by the
//! [`CommandExecutor`](crate::CommandExecutor).
//!
//! # Examples
//!
//! ```
//! use picklist_core::{Command, State, Store};
//!
//! #[derive(Default)]
//! struct Toggle {
//!     on: bool,
//! }
//!
//! enum ToggleMessage {
//!     Flip,
//! }
//!
//! impl State for Toggle {
//!     type Message = ToggleMessage;
//!     type Output = bool;
//!
//!     fn update(&mut self, msg: Self::Message) -> Command<Self::Message, Self::Output> {
//!         match msg {
//!             ToggleMessage::Flip => self.on = !self.on,
//!         }
//!         Command::Emit(self.on)
//!     }
//! }
//!
//! let mut store = Store::new(Toggle::default());
//! let cmd = store.dispatch(ToggleMessage::Flip);
//! assert!(store.state().on);
//! assert!(!cmd.is_none());
//! ```

/// Widget state trait.
///
/// Implements the Elm Architecture: State + Message → (State, Command)
pub trait State: Send {
    /// Message type for state updates
    type Message: Send;

    /// Notification type handed back to the widget's owner
    type Output: Send;

    /// Update state in response to a message.
    ///
    /// Returns a command for side effects (outputs, delayed messages).
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message, Self::Output>;
}

/// Commands for side effects.
///
/// Commands represent effects that should happen after a state update:
/// - Notifications for the owner of the widget
/// - Messages to feed back into the state after a delay
#[derive(Debug, Default)]
pub enum Command<M, O> {
    /// No command
    #[default]
    None,
    /// Execute multiple commands, in order
    Batch(Vec<Command<M, O>>),
    /// Hand an output to the owner
    Emit(O),
    /// Dispatch a message once `after_ms` milliseconds have elapsed
    Delay {
        /// Delay in milliseconds
        after_ms: u32,
        /// Message to dispatch when the delay elapses
        message: M,
    },
}

impl<M, O> Command<M, O> {
    /// Create an emit command.
    pub const fn emit(output: O) -> Self {
        Self::Emit(output)
    }

    /// Create a delayed message.
    pub const fn delay(after_ms: u32, message: M) -> Self {
        Self::Delay { after_ms, message }
    }

    /// Create a batch of commands.
    pub fn batch(commands: impl IntoIterator<Item = Self>) -> Self {
        Self::Batch(commands.into_iter().collect())
    }

    /// Check if this is the none command.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Append another command, keeping execution order.
    #[must_use]
    pub fn and(self, next: Self) -> Self {
        match (self, next) {
            (Self::None, other) | (other, Self::None) => other,
            (Self::Batch(mut cmds), other) => {
                cmds.push(other);
                Self::Batch(cmds)
            }
            (first, second) => Self::Batch(vec![first, second]),
        }
    }

    /// Collect the outputs this command would emit, in order.
    ///
    /// Delayed messages are dropped. Mostly useful in tests.
    pub fn into_outputs(self) -> Vec<O> {
        let mut outputs = Vec::new();
        self.collect_outputs(&mut outputs);
        outputs
    }

    fn collect_outputs(self, outputs: &mut Vec<O>) {
        match self {
            Self::None | Self::Delay { .. } => {}
            Self::Emit(output) => outputs.push(output),
            Self::Batch(cmds) => {
                for cmd in cmds {
                    cmd.collect_outputs(outputs);
                }
            }
        }
    }
}

/// Type alias for state change subscribers.
type Subscriber<S> = Box<dyn Fn(&S) + Send + Sync>;

/// Store manages state lifecycle with subscriptions.
///
/// Every dispatch notifies subscribers once the reducer has run, which is the
/// re-render signal for whatever is drawing the widget.
pub struct Store<S: State> {
    state: S,
    subscribers: Vec<Subscriber<S>>,
    dispatch_count: u64,
}

impl<S: State> Store<S> {
    /// Create a new store with initial state.
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            subscribers: Vec::new(),
            dispatch_count: 0,
        }
    }

    /// Get current state.
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Dispatch a message to update state.
    pub fn dispatch(&mut self, msg: S::Message) -> Command<S::Message, S::Output> {
        let cmd = self.state.update(msg);
        self.dispatch_count += 1;
        tracing::trace!(dispatch = self.dispatch_count, "state updated");

        self.notify_subscribers();

        cmd
    }

    /// Subscribe to state changes.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Number of messages dispatched so far.
    pub const fn dispatch_count(&self) -> u64 {
        self.dispatch_count
    }

    /// Consume the store, returning the state.
    pub fn into_state(self) -> S {
        self.state
    }

    fn notify_subscribers(&self) {
        for subscriber in &self.subscribers {
            subscriber(&self.state);
        }
    }
}

impl<S: State + std::fmt::Debug> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .field("dispatch_count", &self.dispatch_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct Counter {
        count: i32,
    }

    #[derive(Debug)]
    enum CounterMessage {
        Increment,
        Set(i32),
        Tick,
    }

    impl State for Counter {
        type Message = CounterMessage;
        type Output = i32;

        fn update(&mut self, msg: Self::Message) -> Command<Self::Message, Self::Output> {
            match msg {
                CounterMessage::Increment => {
                    self.count += 1;
                    Command::Emit(self.count)
                }
                CounterMessage::Set(value) => {
                    self.count = value;
                    Command::None
                }
                CounterMessage::Tick => Command::delay(10, CounterMessage::Increment),
            }
        }
    }

    // =========================================================================
    // Command Tests
    // =========================================================================

    #[test]
    fn test_command_none() {
        let cmd: Command<(), ()> = Command::None;
        assert!(cmd.is_none());
    }

    #[test]
    fn test_command_default() {
        let cmd: Command<(), ()> = Command::default();
        assert!(cmd.is_none());
    }

    #[test]
    fn test_command_batch() {
        let cmd: Command<(), i32> = Command::batch([Command::emit(1), Command::emit(2)]);
        assert!(!cmd.is_none());
        if let Command::Batch(cmds) = cmd {
            assert_eq!(cmds.len(), 2);
        } else {
            panic!("Expected Batch command");
        }
    }

    #[test]
    fn test_command_and_skips_none() {
        let cmd: Command<(), i32> = Command::None.and(Command::emit(1));
        assert!(matches!(cmd, Command::Emit(1)));

        let cmd: Command<(), i32> = Command::emit(1).and(Command::None);
        assert!(matches!(cmd, Command::Emit(1)));
    }

    #[test]
    fn test_command_and_preserves_order() {
        let cmd: Command<(), i32> = Command::emit(1)
            .and(Command::emit(2))
            .and(Command::emit(3));
        assert_eq!(cmd.into_outputs(), vec![1, 2, 3]);
    }

    #[test]
    fn test_command_into_outputs_drops_delays() {
        let cmd: Command<&str, i32> =
            Command::batch([Command::delay(10, "later"), Command::emit(7)]);
        assert_eq!(cmd.into_outputs(), vec![7]);
    }

    // =========================================================================
    // Store Tests
    // =========================================================================

    #[test]
    fn test_store_dispatch() {
        let mut store = Store::new(Counter::default());
        let cmd = store.dispatch(CounterMessage::Increment);
        assert_eq!(store.state().count, 1);
        assert_eq!(cmd.into_outputs(), vec![1]);
        assert_eq!(store.dispatch_count(), 1);
    }

    #[test]
    fn test_store_dispatch_returns_delay() {
        let mut store = Store::new(Counter::default());
        let cmd = store.dispatch(CounterMessage::Tick);
        assert!(matches!(
            cmd,
            Command::Delay {
                after_ms: 10,
                message: CounterMessage::Increment
            }
        ));
        assert_eq!(store.state().count, 0);
    }

    #[test]
    fn test_store_subscribers_notified_per_dispatch() {
        let mut store = Store::new(Counter::default());
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        store.subscribe(move |_state: &Counter| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.dispatch(CounterMessage::Increment);
        store.dispatch(CounterMessage::Set(5));

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn test_store_subscriber_sees_updated_state() {
        let mut store = Store::new(Counter::default());
        let last = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&last);
        store.subscribe(move |state: &Counter| {
            seen.store(state.count as usize, Ordering::SeqCst);
        });

        store.dispatch(CounterMessage::Set(42));
        assert_eq!(last.load(Ordering::SeqCst), 42);
    }

    #[test]
    fn test_store_into_state() {
        let mut store = Store::new(Counter::default());
        store.dispatch(CounterMessage::Set(3));
        assert_eq!(store.into_state().count, 3);
    }

    #[test]
    fn test_store_debug() {
        let store = Store::new(Counter::default());
        let debug = format!("{store:?}");
        assert!(debug.contains("Store"));
        assert!(debug.contains("dispatch_count"));
    }
}
