use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::report::{SortColumn, MISSING_LABEL};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let rows = app.table();
    if rows.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No transactions match the current filters",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Adjust them on the Filters tab or with :reset",
                theme::dim_style(),
            )),
        ];
        let block = theme::panel("Transactions (0)");
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let columns = [
        ("Date", Some(SortColumn::Date)),
        ("Property", Some(SortColumn::Property)),
        ("Description", Some(SortColumn::Description)),
        ("Category", Some(SortColumn::Category)),
        ("Type", None),
        ("Amount", Some(SortColumn::Amount)),
    ];
    let header_cells = columns.iter().map(|(name, column)| {
        let label = if *column == Some(app.sort.column) {
            let arrow = if app.sort.descending { "▼" } else { "▲" };
            format!("{name} {arrow}")
        } else {
            name.to_string()
        };
        Cell::from(label).style(theme::header_style())
    });
    let header = Row::new(header_cells).height(1);

    let text = |v: &Option<String>| v.as_deref().unwrap_or(MISSING_LABEL).to_string();

    let visible: Vec<Row> = rows
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let amount_style = if txn.amount.is_sign_negative() {
                theme::expense_style()
            } else {
                theme::income_style()
            };

            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(txn.date.format("%Y-%m-%d").to_string()),
                Cell::from(truncate(&text(&txn.notes), 16)),
                Cell::from(truncate(&text(&txn.description), 40)),
                Cell::from(truncate(&text(&txn.category), 20)),
                Cell::from(txn.category_type.as_str()),
                Cell::from(Span::styled(format_amount(txn.amount), amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Min(20),
        Constraint::Length(20),
        Constraint::Length(8),
        Constraint::Length(14),
    ];

    let title = format!(
        "Transactions [{}/{}] by {}",
        (app.transaction_index + 1).min(rows.len()),
        rows.len(),
        app.sort
    );
    let table = Table::new(visible, widths)
        .header(header)
        .block(theme::panel(title));

    f.render_widget(table, area);
}
