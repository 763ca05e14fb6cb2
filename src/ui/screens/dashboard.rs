use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::CategoryType;
use crate::report::GroupTotal;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{axis_bounds, chart_value, format_amount, format_compact, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),        // Metric cards
            Constraint::Percentage(50),   // Monthly trend + property profit
            Constraint::Min(8),           // Categories + vendors
        ])
        .split(area);

    render_metrics(f, rows[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);
    render_monthly_chart(f, middle[0], app);
    render_property_chart(f, middle[1], app);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);
    render_category_chart(f, bottom[0], app);
    render_vendor_chart(f, bottom[1], app);
}

// ── Metrics ──────────────────────────────────────────────────

fn render_metrics(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let totals = app.report.totals;
    let rows = app.table();
    let income_count = rows.iter().filter(|t| t.is_income()).count();
    let expense_count = rows.len() - income_count;

    render_card(
        f,
        cards[0],
        "Total Income",
        totals.income,
        theme::GREEN,
        format!("{income_count} txns"),
    );
    render_card(
        f,
        cards[1],
        "Total Expenses",
        totals.expense,
        theme::RED,
        format!("{expense_count} txns"),
    );
    render_card(
        f,
        cards[2],
        "Net Profit",
        totals.net,
        theme::signed_color(totals.net >= Decimal::ZERO),
        format!("{} of {} rows", rows.len(), app.ledger.len()),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: String,
) {
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(theme::panel(title));

    f.render_widget(text, area);
}

fn render_empty(f: &mut Frame, area: Rect, title: &str) {
    let msg = Paragraph::new(Line::from(Span::styled(
        "No transactions match the current filters",
        theme::dim_style(),
    )))
    .centered()
    .block(theme::panel(title));
    f.render_widget(msg, area);
}

// ── Charts ───────────────────────────────────────────────────

fn render_monthly_chart(f: &mut Frame, area: Rect, app: &App) {
    const TITLE: &str = "Monthly Income & Expenses";
    let months = app.report.months();
    if months.is_empty() {
        render_empty(f, area, TITLE);
        return;
    }

    let points = |category_type| -> Vec<(f64, f64)> {
        app.report
            .series(category_type)
            .into_iter()
            .map(|(i, total)| (i as f64, chart_value(total)))
            .collect()
    };
    let income = points(CategoryType::Income);
    let expense = points(CategoryType::Expense);

    let datasets = vec![
        Dataset::default()
            .name("Income")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme::income_style())
            .data(&income),
        Dataset::default()
            .name("Expense")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme::expense_style())
            .data(&expense),
    ];

    let last = months.len() - 1;
    let mut x_labels = vec![months[0].to_string()];
    if last > 1 {
        x_labels.push(months[last / 2].to_string());
    }
    if last > 0 {
        x_labels.push(months[last].to_string());
    }

    let [lo, hi] = axis_bounds(income.iter().chain(&expense).map(|(_, y)| *y));
    let y_label = |v: f64| Decimal::from_f64_retain(v).map(format_compact).unwrap_or_default();

    let chart = Chart::new(datasets)
        .block(theme::panel(TITLE))
        .x_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, last.max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([lo, hi])
                .labels([y_label(lo), y_label(0.0), y_label(hi)]),
        )
        .legend_position(Some(LegendPosition::TopRight));

    f.render_widget(chart, area);
}

fn render_property_chart(f: &mut Frame, area: Rect, app: &App) {
    const TITLE: &str = "Net Profit by Property";
    let groups = &app.report.by_property;
    if groups.is_empty() {
        render_empty(f, area, TITLE);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let bar_width = (inner_width / groups.len()).saturating_sub(1).clamp(3, 12) as u16;
    let bars: Vec<Bar> = groups
        .iter()
        .map(|g| group_bar(g, bar_width as usize, theme::signed_color(g.total >= Decimal::ZERO)))
        .collect();

    let chart = BarChart::default()
        .block(theme::panel(TITLE))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    const TITLE: &str = "Expenses by Category";
    let groups = &app.report.by_category;
    if groups.is_empty() {
        render_empty(f, area, TITLE);
        return;
    }

    let bars: Vec<Bar> = groups
        .iter()
        .map(|g| group_bar(g, 16, theme::RED))
        .collect();

    let chart = BarChart::default()
        .block(theme::panel(TITLE))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0);

    f.render_widget(chart, area);
}

fn render_vendor_chart(f: &mut Frame, area: Rect, app: &App) {
    const TITLE: &str = "Top Vendors";
    let vendors = &app.report.vendors;
    if vendors.is_empty() {
        render_empty(f, area, TITLE);
        return;
    }

    let bars: Vec<Bar> = vendors
        .iter()
        .map(|v| {
            Bar::default()
                .value(v.count as u64)
                .label(Line::from(truncate(&v.vendor, 16)))
                .text_value(v.count.to_string())
                .style(Style::default().fg(theme::MAUVE))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(theme::MAUVE))
        })
        .collect();

    let chart = BarChart::default()
        .block(theme::panel(TITLE))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0);

    f.render_widget(chart, area);
}

/// Bar length is the magnitude in whole dollars; the sign lives in the
/// colour and the value text.
fn group_bar(group: &GroupTotal, label_width: usize, color: ratatui::style::Color) -> Bar<'static> {
    Bar::default()
        .value(group.total.abs().round().to_u64().unwrap_or(0))
        .label(Line::from(truncate(group.display_label(), label_width)))
        .text_value(format_compact(group.total))
        .style(Style::default().fg(color))
        .value_style(Style::default().fg(theme::HEADER_BG).bg(color))
}
