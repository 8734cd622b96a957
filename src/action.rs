//! Actions - everything that can happen to the table

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::monster::{Column, Dataset};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Dataset category =====
    /// Intent: (re)load the monster list (triggers async task)
    DatasetLoad,

    /// Result: monster list loaded and validated
    DatasetDidLoad(Dataset),

    /// Result: loading or validation failed
    DatasetDidError(String),

    // ===== Sort category =====
    /// Header activated: flip order on the active column, otherwise sort ascending
    SortToggle(Column),

    /// Back to load order
    SortClear,

    // ===== Header category =====
    /// Move the header cursor
    HeaderFocus(Column),

    // ===== Page category =====
    PagePrev,
    PageNext,
    PageFirst,
    PageLast,

    /// Jump to a numbered page (1-based)
    PageGoto(usize),

    // ===== Uncategorized (global) =====
    /// Force a re-render
    Render,

    /// Exit the application
    Quit,
}
