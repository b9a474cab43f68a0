//! # parlaywatch - live parlay tracker
//!
//! A terminal dashboard that tracks point-spread parlays against a live
//! sports score feed. Built with ratatui and tokio.
//!
//! ## Architecture
//!
//! - **App**: Core application state and lifecycle management
//! - **UI**: Layout and rendering logic
//! - **API**: Score feed client and wire format conversion
//! - **Betting**: Bet evaluation rules and per-bet live monitors
//! - **State**: Centralized state management
//! - **Events**: Input handling and key bindings
//! - **Config**: Configuration management

pub mod api;
pub mod app;
pub mod betting;
pub mod config;
pub mod error;
pub mod events;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
