//! # Core Application Logic
//!
//! This module contains Sous's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Catalog + filter     │
//!                    │  • Transcript           │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                         ┌──────┴─────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: `Recipe`, `Catalog` and the title filter
//! - [`transcript`]: `Message`, `Transcript` and the two-phase chat turn
//! - [`notification`]: the toast model
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`config`]: settings resolution (file, env, CLI)

pub mod action;
pub mod catalog;
pub mod config;
pub mod notification;
pub mod state;
pub mod transcript;
