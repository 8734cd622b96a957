//! monsterdex - sortable, paginated monster stat table
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod components;
pub mod effect;
pub mod loader;
pub mod logging;
pub mod monster;
pub mod reducer;
pub mod state;
pub mod table;
