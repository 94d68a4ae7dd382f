pub mod footer;
pub mod graph;
pub mod help;
pub mod meter;
pub mod settings_menu;
pub mod stats;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::app::{App, AppMode};

/// Render the complete UI
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    // Compact mode: just the meter line, nothing else
    if app.compact_mode {
        let line = Rect { height: size.height.min(1), ..size };
        meter::draw_compact_meter(f, app, line);
        draw_popup(f, app);
        return;
    }

    let mut constraints = vec![
        Constraint::Length(3), // meter
        Constraint::Length(1), // today / month totals
    ];
    if app.show_graph {
        constraints.push(Constraint::Min(6)); // live graph
    } else {
        constraints.push(Constraint::Min(0));
    }
    constraints.push(Constraint::Length(1)); // footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    meter::draw_meter(f, app, chunks[0]);
    meter::draw_totals_line(f, app, chunks[1]);
    if app.show_graph {
        graph::draw_graph(f, app, chunks[2]);
    }
    footer::draw_footer(f, app, chunks[3]);

    draw_popup(f, app);
}

/// Overlay popups
fn draw_popup(f: &mut Frame, app: &App) {
    match app.mode {
        AppMode::Help => help::draw_help(f, app),
        AppMode::Settings => settings_menu::draw_settings_menu(f, app),
        AppMode::Stats => stats::draw_stats(f, app),
        AppMode::Normal => {}
    }
}

/// Create a centered rectangle with percentage width/height
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
