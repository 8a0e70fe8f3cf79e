//! Core types and traits for Picklist widgets.
//!
//! This crate provides the plumbing the widgets are built on:
//! - State management: [`State`], [`Command`], [`Store`]
//! - Command execution and timers: [`CommandExecutor`], [`DelayQueue`]
//! - Keyboard input: [`Key`]

mod event;
mod runtime;
mod state;

pub use event::Key;
pub use runtime::{CommandExecutor, DelayQueue};
pub use state::{Command, State, Store};
