//! TUI widgets.

mod entry_list;
mod help;
mod notifications;
mod pane_bar;
mod parlay_list;
mod status_bar;

pub use entry_list::EntryList;
pub use help::{HelpPanel, render_help_bar};
pub use notifications::{render_error, render_notification};
pub use pane_bar::PaneBar;
pub use parlay_list::ParlayList;
pub use status_bar::StatusBar;
