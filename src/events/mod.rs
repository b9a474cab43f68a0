//! Event handling for parlaywatch.
//!
//! Terminal key and mouse events are mapped to [`Action`](crate::state::Action)s
//! through the configured key bindings.

mod handler;
mod input;

pub use handler::{EventHandler, Keymap};
pub use input::KeyBinding;
