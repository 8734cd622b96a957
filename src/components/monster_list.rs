use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    prelude::{Frame, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, MonsterTable, MonsterTableProps, Paginator, PaginatorProps};
use crate::action::Action;
use crate::monster::{Column, Dataset};
use crate::state::{AppState, TABLE_CAPTION};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Props for MonsterList - read-only view of state
pub struct MonsterListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main screen: table, pagination strip and key hints
#[derive(Default)]
pub struct MonsterList {
    /// Page number typed so far. Cleared by any non-digit key.
    page_entry: Option<usize>,
}

impl MonsterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Digits extend the typed page number while it stays within
    /// `page_count`, otherwise they start a new one: with 12 pages `1 2`
    /// lands on 12 and `1 3` lands on 3.
    fn enter_digit(&mut self, digit: usize, page_count: usize) -> Option<Action> {
        let extended = self
            .page_entry
            .and_then(|entry| entry.checked_mul(10)?.checked_add(digit))
            .filter(|page| *page <= page_count);
        let page = match extended {
            Some(page) => page,
            None if digit == 0 => {
                self.page_entry = None;
                return None;
            }
            None => digit,
        };
        self.page_entry = Some(page);
        Some(Action::PageGoto(page))
    }
}

/// Column hotkeys, one per sortable header
fn column_hotkey(c: char) -> Option<Column> {
    match c {
        'i' => Some(Column::Id),
        'n' => Some(Column::Name),
        'f' => Some(Column::Family),
        'h' => Some(Column::Hp),
        'm' => Some(Column::Mp),
        'a' => Some(Column::Atk),
        'd' => Some(Column::Def),
        'g' => Some(Column::Agi),
        'w' => Some(Column::Wis),
        _ => None,
    }
}

impl Component<Action> for MonsterList {
    type Props<'a> = MonsterListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let focus = props.state.header_focus;

        if let EventKind::Key(key) = event {
            if let KeyCode::Char(c) = key.code {
                if let Some(digit) = c.to_digit(10) {
                    return self.enter_digit(digit as usize, props.state.page_count());
                }
            }
        }
        self.page_entry = None;

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left => Some(Action::HeaderFocus(focus.prev_sortable())),
                KeyCode::Right => Some(Action::HeaderFocus(focus.next_sortable())),
                KeyCode::Enter | KeyCode::Char(' ') => Some(Action::SortToggle(focus)),
                KeyCode::Char('x') => Some(Action::SortClear),
                KeyCode::PageUp | KeyCode::Char('<') | KeyCode::Char(',') => {
                    Some(Action::PagePrev)
                }
                KeyCode::PageDown | KeyCode::Char('>') | KeyCode::Char('.') => {
                    Some(Action::PageNext)
                }
                KeyCode::Home => Some(Action::PageFirst),
                KeyCode::End => Some(Action::PageLast),
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::DatasetLoad),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                KeyCode::Char(c) => column_hotkey(c).map(Action::SortToggle),
                _ => None,
            },
            EventKind::Scroll { delta, .. } => {
                if *delta > 0 {
                    Some(Action::PageNext)
                } else if *delta < 0 {
                    Some(Action::PagePrev)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: MonsterListProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Min(3),    // Table
            Constraint::Length(1), // Pagination strip
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        match &props.state.dataset {
            DataResource::Loaded(dataset) if !dataset.is_empty() => {
                render_table(frame, chunks[0], chunks[1], props.state, dataset, props.is_focused);
            }
            DataResource::Loaded(_) => render_message(
                frame,
                chunks[0],
                Line::from("No monsters in this dataset.").dark_gray(),
                None,
            ),
            DataResource::Loading => render_message(
                frame,
                chunks[0],
                Line::from("Loading monsters...").dark_gray(),
                None,
            ),
            DataResource::Failed(error) => render_message(
                frame,
                chunks[0],
                Line::from(vec![
                    Span::raw(format!("{ERROR_ICON} ")),
                    Span::styled("Error: ", Style::default().fg(Color::Red).bold()),
                    Span::raw(error.as_str()),
                ]),
                Some("Press r to retry"),
            ),
            DataResource::Empty => render_message(
                frame,
                chunks[0],
                Line::from("No data loaded").dark_gray(),
                Some("Press r to load monsters"),
            ),
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("←→", "column"),
                    StatusBarHint::new("enter", "sort"),
                    StatusBarHint::new("pgup/pgdn", "page"),
                    StatusBarHint::new("0-9", "go to page"),
                    StatusBarHint::new("x", "unsort"),
                    StatusBarHint::new("r", "reload"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_table(
    frame: &mut Frame,
    table_area: Rect,
    pager_area: Rect,
    state: &AppState,
    dataset: &Dataset,
    is_focused: bool,
) {
    let rows = state.visible_rows();
    let mut table = MonsterTable;
    table.render(
        frame,
        table_area,
        MonsterTableProps {
            rows: &rows,
            extremes: dataset.extremes(),
            sort: state.sort,
            header_focus: state.header_focus,
            is_focused,
            caption: TABLE_CAPTION,
        },
    );

    let mut paginator = Paginator;
    paginator.render(
        frame,
        pager_area,
        PaginatorProps {
            nav: state.page_nav(),
        },
    );
}

fn render_message(frame: &mut Frame, area: Rect, message: Line<'_>, hint: Option<&str>) {
    let mut lines = vec![Line::from(""), message];
    if let Some(hint) = hint {
        lines.push(Line::from(""));
        lines.push(Line::from(hint).dark_gray());
    }
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::bordered().title(TABLE_CAPTION));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::{MonsterRecord, Stats};
    use crossterm::event::{KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use tui_dispatch::testing::*;

    fn press(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn actions_for(event: EventKind, state: &AppState, is_focused: bool) -> Vec<Action> {
        let mut component = MonsterList::new();
        component
            .handle_event(&event, MonsterListProps { state, is_focused })
            .into_iter()
            .collect()
    }

    fn typed(component: &mut MonsterList, keys: &str, state: &AppState) -> Vec<Action> {
        keys.split_whitespace()
            .flat_map(|k| {
                component
                    .handle_event(
                        &EventKind::Key(key(k)),
                        MonsterListProps {
                            state,
                            is_focused: true,
                        },
                    )
                    .into_iter()
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn state_with_pages(pages: usize) -> AppState {
        let records = (1..=pages as u32 * 10)
            .map(|id| MonsterRecord {
                id,
                name: format!("Monster {id}"),
                family: "Slime".into(),
                rank: "F".into(),
                level: 1,
                stats: Stats::default(),
            })
            .collect();
        AppState {
            dataset: DataResource::Loaded(Dataset::new(records).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_column_hotkeys_toggle_sort() {
        let state = AppState::default();

        let actions = actions_for(EventKind::Key(key("n")), &state, true);
        actions.assert_count(1);
        actions.assert_first(Action::SortToggle(Column::Name));

        let actions = actions_for(EventKind::Key(key("g")), &state, true);
        actions.assert_first(Action::SortToggle(Column::Agi));
    }

    #[test]
    fn test_enter_sorts_focused_header() {
        let state = AppState {
            header_focus: Column::Def,
            ..Default::default()
        };

        let actions = actions_for(press(KeyCode::Enter), &state, true);
        actions.assert_first(Action::SortToggle(Column::Def));

        let actions = actions_for(press(KeyCode::Right), &state, true);
        actions.assert_first(Action::HeaderFocus(Column::Agi));
    }

    #[test]
    fn test_page_keys() {
        let state = AppState::default();

        actions_for(press(KeyCode::PageDown), &state, true).assert_first(Action::PageNext);
        actions_for(press(KeyCode::PageUp), &state, true).assert_first(Action::PagePrev);
        actions_for(EventKind::Key(key("3")), &state, true).assert_first(Action::PageGoto(3));
        actions_for(press(KeyCode::End), &state, true).assert_first(Action::PageLast);
    }

    #[test]
    fn test_digits_reach_pages_past_nine() {
        let state = state_with_pages(12);
        let mut component = MonsterList::new();

        let actions = typed(&mut component, "1 2", &state);
        assert_eq!(actions, vec![Action::PageGoto(1), Action::PageGoto(12)]);

        // 123 is past the last page, so 3 starts over
        let actions = typed(&mut component, "3", &state);
        assert_eq!(actions, vec![Action::PageGoto(3)]);

        let actions = typed(&mut component, "1 0", &state);
        assert_eq!(actions, vec![Action::PageGoto(1), Action::PageGoto(10)]);
    }

    #[test]
    fn test_other_keys_reset_page_entry() {
        let state = state_with_pages(12);
        let mut component = MonsterList::new();

        let actions = typed(&mut component, "1 n 2", &state);
        assert_eq!(
            actions,
            vec![
                Action::PageGoto(1),
                Action::SortToggle(Column::Name),
                Action::PageGoto(2),
            ]
        );

        // A lone zero is not a page
        typed(&mut component, "h", &state);
        typed(&mut component, "0", &state).assert_empty();
    }

    #[test]
    fn test_unfocused_ignores() {
        let state = AppState::default();
        actions_for(EventKind::Key(key("q")), &state, false).assert_empty();
    }

    #[test]
    fn test_render_empty_state_prompts_load() {
        let mut render = RenderHarness::new(100, 20);
        let mut component = MonsterList::new();
        let state = AppState::default();

        let output = render.render_to_string_plain(|frame| {
            let props = MonsterListProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("to load monsters"));
    }
}
