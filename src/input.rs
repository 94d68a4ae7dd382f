use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, AppMode};
use crate::units::SpeedUnit;

/// Handle a single key input event.
pub fn handle_input(app: &mut App, key: KeyEvent) {
    // Ctrl+C quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.mode {
        AppMode::Normal   => handle_normal_mode(app, key),
        AppMode::Help     => handle_help_mode(app, key),
        AppMode::Settings => handle_settings_mode(app, key),
        AppMode::Stats    => handle_stats_mode(app, key),
    }
}

// ── Normal mode ─────────────────────────────────────────────────────────

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // ── Quit ──
        KeyCode::F(10) | KeyCode::Char('q') => app.should_quit = true,

        // ── Popups ──
        KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('h') => app.mode = AppMode::Help,
        KeyCode::F(2) | KeyCode::Char('s') => app.open_settings(),
        KeyCode::Char('u') => app.mode = AppMode::Stats,

        // ── View toggles ──
        KeyCode::Char('g') => app.toggle_graph(),
        KeyCode::Char('c') => app.toggle_compact(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('p') | KeyCode::Char('z') => app.paused = !app.paused,

        // ── Unit shortcuts ──
        KeyCode::Char('1') => app.set_unit(SpeedUnit::KiloBytes),
        KeyCode::Char('2') => app.set_unit(SpeedUnit::MegaBytes),
        KeyCode::Char('3') => app.set_unit(SpeedUnit::Megabits),

        _ => {}
    }
}

// ── Popups ──────────────────────────────────────────────────────────────

fn handle_help_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Char('?') => {
            app.mode = AppMode::Normal;
        }
        _ => {}
    }
}

fn handle_stats_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('u') | KeyCode::Char('q') | KeyCode::Enter => {
            app.mode = AppMode::Normal;
        }
        _ => {}
    }
}

fn handle_settings_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::F(2) | KeyCode::Char('q') | KeyCode::Char('s') => {
            app.mode = AppMode::Normal;
        }
        KeyCode::Up | KeyCode::Char('k') => app.settings_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.settings_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.settings_apply(),
        _ => {}
    }
}
