//! Render tests using RenderHarness
//!
//! Render the list into a test buffer and look at the plain text.

use tui_dispatch::{DataResource, testing::*};
use monsterdex::{
    components::{Component, MonsterList, MonsterListProps},
    loader,
    monster::Column,
    state::{AppState, TABLE_CAPTION},
    table::{SortOrder, SortSpec},
};

fn render(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut component = MonsterList::new();

    render.render_to_string_plain(|frame| {
        let props = MonsterListProps {
            state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    })
}

fn bundled_state() -> AppState {
    AppState {
        dataset: DataResource::Loaded(loader::bundled().unwrap()),
        ..Default::default()
    }
}

#[test]
fn test_render_loading_state() {
    let state = AppState {
        dataset: DataResource::Loading,
        ..Default::default()
    };

    let output = render(&state, 100, 20);

    assert!(output.contains("Loading monsters"), "Should show loading text");
}

#[test]
fn test_render_error_state() {
    let state = AppState {
        dataset: DataResource::Failed("duplicate monster id 7".into()),
        ..Default::default()
    };

    let output = render(&state, 100, 20);

    assert!(output.contains("Error"), "Should show error label");
    assert!(
        output.contains("duplicate monster id 7"),
        "Should show error message"
    );
    assert!(output.contains("retry"), "Should show retry hint");
}

#[test]
fn test_render_empty_dataset() {
    let state = AppState {
        dataset: DataResource::Loaded(Default::default()),
        ..Default::default()
    };

    let output = render(&state, 100, 20);

    assert!(output.contains("No monsters"));
}

#[test]
fn test_render_caption_and_headers() {
    let output = render(&bundled_state(), 100, 20);

    assert!(output.contains(TABLE_CAPTION), "Should show caption");
    for column in Column::ALL {
        assert!(
            output.contains(column.label()),
            "Missing header {}:\n{}",
            column.label(),
            output
        );
    }
    // No sort yet, no glyphs
    assert!(!output.contains('▲') && !output.contains('▼'));
}

#[test]
fn test_render_descending_glyph() {
    let state = AppState {
        sort: Some(SortSpec {
            column: Column::Wis,
            order: SortOrder::Descending,
        }),
        ..bundled_state()
    };

    let output = render(&state, 100, 20);

    assert!(output.contains("WIS ▼"));
    assert!(!output.contains('▲'));
}

#[test]
fn test_render_pagination_strip() {
    let state = AppState {
        current_page: 2,
        ..bundled_state()
    };

    let output = render(&state, 100, 20);

    assert!(output.contains("Anterior"));
    assert!(output.contains("Siguiente"));
    assert!(output.contains("[2]"), "Active page should be marked");
}

#[test]
fn test_render_help_bar() {
    let output = render(&bundled_state(), 100, 20);

    assert!(output.contains("sort"), "Should show sort hint");
    assert!(output.contains("page"), "Should show page hint");
    assert!(output.contains("quit"), "Should show quit hint");
}

#[test]
fn test_render_initial_state() {
    let output = render(&AppState::default(), 100, 20);

    assert!(
        output.contains("to load monsters"),
        "Should show load prompt"
    );
}
