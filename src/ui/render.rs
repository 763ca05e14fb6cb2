use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs},
    Frame,
};
use rust_decimal::Decimal;

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;
use super::util::format_amount;

/// Key bindings shown in the help overlay, grouped by where they work.
const KEY_HELP: &[(&str, &[(&str, &str)])] = &[
    (
        "Anywhere",
        &[
            ("1 2 3, Tab", "Dashboard, Transactions, Filters"),
            (":", "Command line"),
            ("?", "This overlay"),
            ("Esc", "Clear the message line"),
            ("Ctrl-q", "Quit"),
        ],
    ),
    (
        "Lists",
        &[
            ("j k, Up Down", "Move the cursor"),
            ("g G", "First or last row"),
            ("Ctrl-d Ctrl-u", "Page down or up"),
        ],
    ),
    (
        "Transactions",
        &[("s", "Sort by the next column"), ("S", "Flip the sort direction")],
    ),
    (
        "Filters",
        &[
            ("Space, Enter", "Show or hide the row's value"),
            ("+ -", "Move the date a day"),
            ("] [", "Move the date 30 days"),
            ("r", "Restore default filters"),
        ],
    ),
];

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [tabs, body, status, command] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(f.area());

    render_tab_bar(f, tabs, app);
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, body, app),
        Screen::Transactions => super::screens::transactions::render(f, body, app),
        Screen::Filters => super::screens::filters::render(f, body, app),
    }
    render_status_bar(f, status, app);
    render_command_bar(f, command, app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

/// Tab label with a live badge: row count on Transactions, `*` on Filters
/// once they differ from the defaults.
fn tab_label(screen: Screen, app: &App) -> String {
    match screen {
        Screen::Transactions => format!("{screen} ({})", app.table().len()),
        Screen::Filters if app.is_filtered() => format!("{screen} *"),
        _ => screen.to_string(),
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let screens = Screen::all();
    let titles: Vec<String> = screens
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}:{}", i + 1, tab_label(*s, app)))
        .collect();
    let selected = screens.iter().position(|s| *s == app.screen).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme::TEXT_DIM).bg(theme::HEADER_BG))
        .highlight_style(Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD))
        .divider(Span::styled("│", Style::default().fg(theme::OVERLAY)));

    f.render_widget(tabs, area);
}

fn screen_hint(app: &App) -> String {
    match app.screen {
        Screen::Transactions => format!(" by {} | s/S sort | ? keys ", app.sort),
        Screen::Dashboard | Screen::Filters => {
            format!(" {} | ? keys ", app.filter.describe(app.ledger))
        }
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command => theme::GREEN,
    };
    let net = app.report.totals.net;

    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.input_mode),
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(mode_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", app.source), theme::status_bar_style()),
        Span::styled(
            format!("net {} ", format_amount(net)),
            theme::status_bar_style().fg(theme::signed_color(net >= Decimal::ZERO)),
        ),
        Span::styled(
            format!("· {}/{} rows", app.table().len(), app.ledger.len()),
            theme::status_bar_style(),
        ),
    ];

    let hint = screen_hint(app);
    let used: usize = spans.iter().map(Span::width).sum::<usize>() + hint.chars().count();
    let pad = (area.width as usize).saturating_sub(used);
    spans.push(Span::styled(" ".repeat(pad), theme::status_bar_style()));
    spans.push(Span::styled(hint, theme::status_bar_style()));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.input_mode {
        InputMode::Command => Line::from(vec![
            Span::styled(":", Style::default().fg(theme::ACCENT)),
            Span::styled(app.command_input.as_str(), theme::command_bar_style()),
        ]),
        InputMode::Normal if app.status_message.is_empty() => Line::from(Span::styled(
            " :sort :from :to :export ... | ? keys | Ctrl-q quit",
            theme::dim_style(),
        )),
        InputMode::Normal => {
            let style = if app.status_message.starts_with("Error") {
                theme::command_bar_style().fg(theme::RED)
            } else {
                theme::command_bar_style()
            };
            Line::from(Span::styled(app.status_message.as_str(), style))
        }
    };

    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::COMMAND_BG)),
        area,
    );

    if app.input_mode == InputMode::Command {
        let offset = 1 + app.command_input.chars().count() as u16;
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let section = |title: &'static str| {
        Row::new(vec![Cell::from(Span::styled(title, theme::section_style()))])
    };

    let mut rows = Vec::new();
    for (title, keys) in KEY_HELP {
        rows.push(section(*title));
        rows.extend(
            keys.iter()
                .map(|(key, what)| Row::new(vec![format!("  {key}"), what.to_string()])),
        );
    }

    // Single-letter aliases repeat a longer command.
    let mut named: Vec<(&str, &str)> = commands::COMMANDS
        .iter()
        .filter(|(name, _)| name.len() > 1)
        .map(|(name, cmd)| (*name, cmd.description))
        .collect();
    named.sort_unstable();
    rows.push(section("Commands"));
    rows.extend(
        named
            .into_iter()
            .map(|(name, what)| Row::new(vec![format!("  :{name}"), what.to_string()])),
    );

    let height = (rows.len() as u16 + 2).min(area.height.saturating_sub(2));
    let width = 78.min(area.width.saturating_sub(4));
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(Span::styled(
            " RentDash keys ",
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Span::styled(" any key closes ", theme::dim_style()))
        .style(Style::default().bg(theme::HEADER_BG));

    let table = Table::new(rows, [Constraint::Length(18), Constraint::Min(20)])
        .style(theme::normal_style())
        .block(block);

    f.render_widget(Clear, popup);
    f.render_widget(table, popup);
}
