use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Cell, Row, Table},
    Frame,
};

use crate::ui::app::{App, FilterItem};
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["", "Group", "Value"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .filter_items
        .iter()
        .enumerate()
        .skip(app.filter_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, item)| {
            let (mark, group, value) = match item {
                FilterItem::DateFrom => ("   ", "Date", format!("From {}", app.filter.date_from)),
                FilterItem::DateTo => ("   ", "Date", format!("To   {}", app.filter.date_to)),
                _ => {
                    let mark = if app.is_item_enabled(item) { "[x]" } else { "[ ]" };
                    let group = match item {
                        FilterItem::Property(_) => "Property",
                        FilterItem::Category(_) => "Category",
                        _ => "Type",
                    };
                    (mark, group, truncate(item.label(), 40))
                }
            };

            let style = if i == app.filter_index {
                theme::selected_style()
            } else if app.is_item_enabled(item) {
                theme::normal_style()
            } else {
                theme::dim_style()
            };

            Row::new(vec![
                Cell::from(mark),
                Cell::from(Span::styled(group, theme::section_style())),
                Cell::from(value),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(10),
        Constraint::Min(20),
    ];

    let mut title = format!("Filters: {}", app.filter.describe(app.ledger));
    if app.filter.has_inverted_range() {
        title.push_str(" (start is after end)");
    }
    if app.filter.properties.is_empty() || app.filter.categories.is_empty() {
        title.push_str(" (nothing selected)");
    }
    let block = theme::panel(title).title_bottom(Span::styled(
        " Space toggle | +/- shift date | :from :to :reset ",
        Style::default().fg(theme::TEXT_DIM).add_modifier(Modifier::ITALIC),
    ));

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
