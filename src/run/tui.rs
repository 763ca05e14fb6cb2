use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::filter::Filter;
use crate::models::Ledger;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{page_down, page_up, scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(ledger: &Ledger, source: String, filter: Filter) -> Result<()> {
    let mut app = App::new(ledger, source);
    if app.filter != filter {
        app.filter = filter;
        app.refresh();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, then panel borders and table header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app),
                InputMode::Command => handle_command_input(key, app),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            handle_page(app, true);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            handle_page(app, false);
        }
        KeyCode::PageDown => handle_page(app, true),
        KeyCode::PageUp => handle_page(app, false),
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') | KeyCode::Home => handle_goto_top(app),
        KeyCode::Char('G') | KeyCode::End => handle_goto_bottom(app),
        KeyCode::Char('1') => app.screen = Screen::Dashboard,
        KeyCode::Char('2') => app.screen = Screen::Transactions,
        KeyCode::Char('3') => app.screen = Screen::Filters,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            app.screen = screens[(idx + 1) % screens.len()];
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            app.screen = screens[prev];
        }
        KeyCode::Char('s') if app.screen == Screen::Transactions => {
            app.cycle_sort();
            app.set_status(format!("Sorted by {}", app.sort));
        }
        KeyCode::Char('S') if app.screen == Screen::Transactions => {
            app.reverse_sort();
            app.set_status(format!("Sorted by {}", app.sort));
        }
        KeyCode::Char(' ') | KeyCode::Enter if app.screen == Screen::Filters => {
            app.toggle_selected_item();
        }
        KeyCode::Char('+') | KeyCode::Char('=') if app.screen == Screen::Filters => {
            app.adjust_selected_date(1);
        }
        KeyCode::Char('-') if app.screen == Screen::Filters => {
            app.adjust_selected_date(-1);
        }
        KeyCode::Char(']') if app.screen == Screen::Filters => {
            app.adjust_selected_date(30);
        }
        KeyCode::Char('[') if app.screen == Screen::Filters => {
            app.adjust_selected_date(-30);
        }
        KeyCode::Char('r') if app.screen == Screen::Filters => {
            commands::handle_command("reset", app);
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

// ── Cursor movement ──────────────────────────────────────────

fn handle_move_down(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Transactions => {
            let len = app.table().len();
            scroll_down(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        Screen::Filters => {
            let len = app.filter_items.len();
            scroll_down(&mut app.filter_index, &mut app.filter_scroll, len, page);
        }
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Transactions => scroll_up(&mut app.transaction_index, &mut app.transaction_scroll),
        Screen::Filters => scroll_up(&mut app.filter_index, &mut app.filter_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_page(app: &mut App, down: bool) {
    let page = app.visible_rows;
    let (index, scroll, len) = match app.screen {
        Screen::Transactions => (
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.report.table.len(),
        ),
        Screen::Filters => (
            &mut app.filter_index,
            &mut app.filter_scroll,
            app.filter_items.len(),
        ),
        Screen::Dashboard => return,
    };
    if down {
        page_down(index, scroll, len, page);
    } else {
        page_up(index, scroll, page);
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll)
        }
        Screen::Filters => scroll_to_top(&mut app.filter_index, &mut app.filter_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Transactions => {
            let len = app.table().len();
            scroll_to_bottom(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        Screen::Filters => {
            let len = app.filter_items.len();
            scroll_to_bottom(&mut app.filter_index, &mut app.filter_scroll, len, page);
        }
        Screen::Dashboard => {}
    }
}
