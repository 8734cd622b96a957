use ratatui::{
    prelude::{Frame, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::{NEXT_LABEL, PREV_LABEL};
use crate::table::PageNav;

const ELLIPSIS: &str = "…";

pub struct PaginatorProps {
    pub nav: PageNav,
}

/// Previous / numbered pages / next strip
pub struct Paginator;

fn button_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// How many page buttons fit beside the prev/next labels in `width` cells
fn buttons_that_fit(nav: PageNav, width: u16) -> usize {
    let labels = PREV_LABEL.chars().count() + NEXT_LABEL.chars().count() + 5;
    let ellipses = 4;
    // " [n]" for the widest page number
    let button = nav.count.to_string().len() + 3;
    (width as usize).saturating_sub(labels + ellipses) / button
}

/// One line, with page numbers windowed around the active page when they
/// would not all fit in `width`.
pub fn paginator_line(nav: PageNav, width: u16) -> Line<'static> {
    let window = nav.window(buttons_that_fit(nav, width));
    let mut spans = Vec::with_capacity(window.clone().count() * 2 + 7);
    spans.push(Span::styled(
        format!("‹ {PREV_LABEL}"),
        button_style(nav.has_prev()),
    ));

    if *window.start() > 1 {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(ELLIPSIS, button_style(false)));
    }
    for page in window.clone() {
        spans.push(Span::raw(" "));
        if nav.is_active(page) {
            spans.push(Span::styled(
                format!("[{page}]"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(format!(" {page} "), button_style(true)));
        }
    }
    if nav.count > 0 && *window.end() < nav.count {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(ELLIPSIS, button_style(false)));
    }

    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        format!("{NEXT_LABEL} ›"),
        button_style(nav.has_next()),
    ));
    Line::from(spans).centered()
}

impl Component<Action> for Paginator {
    type Props<'a> = PaginatorProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let paragraph = Paragraph::new(paginator_line(props.nav, area.width));
        frame.render_widget(paragraph, area);
    }
}
