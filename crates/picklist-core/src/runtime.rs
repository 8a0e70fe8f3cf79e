//! Synchronous command execution and delayed messages.
//!
//! The host owns the clock: it calls [`CommandExecutor::advance`] with the
//! elapsed milliseconds (from a frame timer, an event loop tick, or a test)
//! and gets back the messages whose delay has run out.

use crate::state::Command;

/// A message waiting for its deadline.
#[derive(Debug)]
struct Scheduled<M> {
    deadline_ms: u64,
    seq: u64,
    message: M,
}

/// Queue of messages scheduled with [`Command::Delay`].
#[derive(Debug)]
pub struct DelayQueue<M> {
    now_ms: u64,
    next_seq: u64,
    entries: Vec<Scheduled<M>>,
}

impl<M> Default for DelayQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> DelayQueue<M> {
    /// Create an empty queue at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            entries: Vec::new(),
        }
    }

    /// Current time of the queue's clock in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of messages still waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedule a message `after_ms` from now.
    pub fn schedule(&mut self, after_ms: u32, message: M) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Scheduled {
            deadline_ms: self.now_ms + u64::from(after_ms),
            seq,
            message,
        });
    }

    /// Advance the clock and return every message that became due.
    ///
    /// Messages come out in deadline order; equal deadlines keep the order in
    /// which they were scheduled.
    pub fn advance(&mut self, delta_ms: u32) -> Vec<M> {
        self.now_ms += u64::from(delta_ms);
        let now = self.now_ms;

        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.deadline_ms <= now);
        self.entries = pending;

        due.sort_by_key(|entry| (entry.deadline_ms, entry.seq));
        due.into_iter().map(|entry| entry.message).collect()
    }

    /// Drop every scheduled message.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Command executor for synchronous commands.
///
/// Outputs are handed back in emission order; delayed messages go into the
/// executor's [`DelayQueue`].
#[derive(Debug)]
pub struct CommandExecutor<M> {
    queue: DelayQueue<M>,
}

impl<M> Default for CommandExecutor<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> CommandExecutor<M> {
    /// Create a new command executor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            queue: DelayQueue::new(),
        }
    }

    /// Execute a command, returning the outputs it emits.
    pub fn execute<O>(&mut self, command: Command<M, O>) -> Vec<O> {
        let mut outputs = Vec::new();
        self.execute_into(command, &mut outputs);
        outputs
    }

    fn execute_into<O>(&mut self, command: Command<M, O>, outputs: &mut Vec<O>) {
        match command {
            Command::None => {}
            Command::Batch(commands) => {
                for cmd in commands {
                    self.execute_into(cmd, outputs);
                }
            }
            Command::Emit(output) => outputs.push(output),
            Command::Delay { after_ms, message } => {
                tracing::trace!(after_ms, "message scheduled");
                self.queue.schedule(after_ms, message);
            }
        }
    }

    /// Advance the clock, returning messages that are now due.
    pub fn advance(&mut self, delta_ms: u32) -> Vec<M> {
        self.queue.advance(delta_ms)
    }

    /// Number of delayed messages still pending.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drop every pending delayed message.
    pub fn cancel_all(&mut self) {
        self.queue.clear();
    }
}
