//! Menu documents on disk → the `menu-core` model.
//!
//! This crate owns everything that touches JSON and the filesystem:
//! - the schema parser turning loosely-typed menu documents into
//!   [`menu_core::MenuDefinition`]s,
//! - the root `config.json` decoding,
//! - the config manager that bootstraps the directory layout, seeds
//!   bundled defaults, and (re)populates the menu registry.

pub mod config;
pub mod defaults;
pub mod error;
pub mod manager;
pub mod schema;

pub use config::{FileRef, RootConfig};
pub use error::{ContentError, Result};
pub use manager::ConfigManager;
pub use schema::{SlotConflict, parse_menu, parse_menu_str};
