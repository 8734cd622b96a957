use ratatui::{
    layout::Constraint,
    prelude::{Frame, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Cell, Row, Table},
};

use super::Component;
use crate::action::Action;
use crate::monster::{Column, MonsterRecord, StatExtremes};
use crate::table::{Highlight, SortSpec};

/// Props for MonsterTable - the current page plus what the headers need
pub struct MonsterTableProps<'a> {
    pub rows: &'a [&'a MonsterRecord],
    pub extremes: &'a StatExtremes,
    pub sort: Option<SortSpec>,
    pub header_focus: Column,
    pub is_focused: bool,
    pub caption: &'a str,
}

/// Header row, page rows, min/max cell styling
pub struct MonsterTable;

fn column_width(column: Column) -> Constraint {
    match column {
        Column::Id => Constraint::Length(4),
        Column::Name => Constraint::Min(12),
        Column::Family => Constraint::Length(10),
        Column::Rank => Constraint::Length(4),
        Column::Level => Constraint::Length(10),
        _ => Constraint::Length(5),
    }
}

/// Header text, with the order glyph on the active sort column only
pub fn header_label(column: Column, sort: Option<SortSpec>) -> String {
    match sort {
        Some(spec) if spec.column == column => {
            format!("{} {}", column.label(), spec.order.glyph())
        }
        _ => column.label().to_string(),
    }
}

pub fn highlight_style(highlight: Option<Highlight>) -> Style {
    match highlight {
        Some(Highlight::Highest) => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Some(Highlight::Lowest) => Style::default().fg(Color::Red),
        None => Style::default(),
    }
}

/// Highlight for one cell; only stat columns are ever highlighted.
pub fn cell_highlight(
    record: &MonsterRecord,
    column: Column,
    extremes: &StatExtremes,
) -> Option<Highlight> {
    let stat = column.stat()?;
    extremes.highlight(stat, record.stats.get(stat))
}

fn header_row(props: &MonsterTableProps<'_>) -> Row<'static> {
    let cells = Column::ALL.into_iter().map(|column| {
        let mut style = Style::default().add_modifier(Modifier::BOLD);
        if !column.is_sortable() {
            style = style.fg(Color::DarkGray);
        } else if props.is_focused && column == props.header_focus {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Cell::from(header_label(column, props.sort)).style(style)
    });
    Row::new(cells).height(1)
}

fn body_row(record: &MonsterRecord, extremes: &StatExtremes) -> Row<'static> {
    let cells = Column::ALL.into_iter().map(|column| {
        let text = column.value_of(record).to_string();
        Cell::from(text).style(highlight_style(cell_highlight(record, column, extremes)))
    });
    Row::new(cells)
}

impl Component<Action> for MonsterTable {
    type Props<'a> = MonsterTableProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let rows: Vec<Row> = props
            .rows
            .iter()
            .map(|record| body_row(record, props.extremes))
            .collect();
        let widths = Column::ALL.map(column_width);

        let table = Table::new(rows, widths)
            .header(header_row(&props))
            .column_spacing(1)
            .block(Block::bordered().title(props.caption));
        frame.render_widget(table, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::{Dataset, Stats};
    use crate::table::SortOrder;
    use tui_dispatch::testing::*;

    fn dataset() -> Dataset {
        let hp = [10, 50, 30];
        let records = hp
            .into_iter()
            .enumerate()
            .map(|(i, hp)| MonsterRecord {
                id: i as u32 + 1,
                name: format!("Mon{}", i + 1),
                family: "Dragon".into(),
                rank: "A".into(),
                level: 20,
                stats: Stats {
                    hp,
                    mp: 5,
                    ..Default::default()
                },
            })
            .collect();
        Dataset::new(records).unwrap()
    }

    #[test]
    fn test_header_label_glyph_only_on_active_column() {
        let sort = Some(SortSpec {
            column: Column::Hp,
            order: SortOrder::Descending,
        });
        assert_eq!(header_label(Column::Hp, sort), "HP ▼");
        assert_eq!(header_label(Column::Mp, sort), "MP");
        assert_eq!(header_label(Column::Hp, None), "HP");
        assert_eq!(
            header_label(Column::Name, Some(SortSpec::ascending(Column::Name))),
            "Name ▲"
        );
    }

    #[test]
    fn test_cell_highlight_uses_whole_dataset() {
        let dataset = dataset();
        let records = dataset.records();
        let extremes = dataset.extremes();

        assert_eq!(
            cell_highlight(&records[1], Column::Hp, extremes),
            Some(Highlight::Highest)
        );
        assert_eq!(
            cell_highlight(&records[0], Column::Hp, extremes),
            Some(Highlight::Lowest)
        );
        assert_eq!(cell_highlight(&records[2], Column::Hp, extremes), None);
        // Non-stat columns never highlight
        assert_eq!(cell_highlight(&records[1], Column::Id, extremes), None);
        // Every record ties at the mp extremum
        for record in records {
            assert_eq!(
                cell_highlight(record, Column::Mp, extremes),
                Some(Highlight::Highest)
            );
        }
    }

    #[test]
    fn test_render_headers_and_rows() {
        let dataset = dataset();
        let rows: Vec<&MonsterRecord> = dataset.records().iter().collect();
        let mut render = RenderHarness::new(100, 10);
        let mut component = MonsterTable;

        let output = render.render_to_string_plain(|frame| {
            let props = MonsterTableProps {
                rows: &rows,
                extremes: dataset.extremes(),
                sort: Some(SortSpec::ascending(Column::Hp)),
                header_focus: Column::Hp,
                is_focused: true,
                caption: "Monsters",
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Monsters"));
        assert!(output.contains("Capture Lv"));
        assert!(output.contains("HP ▲"));
        assert!(output.contains("Mon2"));
    }
}
