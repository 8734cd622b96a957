//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;
use crate::table::SortSpec;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Dataset actions =====
        Action::DatasetLoad => {
            state.dataset = DataResource::Loading;
            DispatchResult::changed_with(Effect::LoadDataset {
                source: state.source.clone(),
            })
        }

        Action::DatasetDidLoad(dataset) => {
            state.dataset = DataResource::Loaded(dataset);
            state.clamp_page();
            DispatchResult::changed()
        }

        Action::DatasetDidError(msg) => {
            state.dataset = DataResource::Failed(msg);
            DispatchResult::changed()
        }

        // ===== Sort actions =====
        Action::SortToggle(column) => {
            if !column.is_sortable() {
                return DispatchResult::unchanged();
            }
            state.sort = Some(SortSpec::toggle(state.sort, column));
            state.header_focus = column;
            tracing::debug!(sort = ?state.sort, "sort changed");
            DispatchResult::changed()
        }

        Action::SortClear => {
            if state.sort.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Header actions =====
        Action::HeaderFocus(column) => {
            if column.is_sortable() && column != state.header_focus {
                state.header_focus = column;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Page actions =====
        Action::PagePrev => {
            if state.page_nav().has_prev() {
                state.current_page -= 1;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::PageNext => {
            if state.page_nav().has_next() {
                state.current_page += 1;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::PageFirst => goto_page(state, 1),

        Action::PageLast => {
            let last = state.page_count();
            goto_page(state, last)
        }

        Action::PageGoto(page) => goto_page(state, page),

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn goto_page(state: &mut AppState, page: usize) -> DispatchResult<Effect> {
    if state.page_nav().can_goto(page) {
        state.current_page = page;
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}
