use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{App, SettingsItem};

// ── Main draw entry ─────────────────────────────────────────────────────────

pub fn draw_settings_menu(f: &mut Frame, app: &App) {
    let area = super::centered_rect(50, 70, f.area());
    f.render_widget(Clear, area);

    let cs = &app.color_scheme;
    let mut lines = Vec::new();
    let mut last_section = "";

    for (idx, item) in SettingsItem::all().iter().enumerate() {
        let (section, name, detail, active) = match item {
            SettingsItem::Unit(unit) => ("Speed Unit", unit.label(), "", *unit == app.unit),
            SettingsItem::Theme(theme) => (
                "Theme",
                theme.name(),
                theme.description(),
                *theme == app.theme_id,
            ),
        };

        if section != last_section {
            if !last_section.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                format!(" {}", section),
                Style::default().fg(cs.popup_title).add_modifier(Modifier::BOLD),
            )));
            last_section = section;
        }

        let marker = if active { "(*)" } else { "( )" };
        let style = if idx == app.settings_index {
            Style::default().fg(cs.popup_selected_fg).bg(cs.popup_selected_bg)
        } else {
            Style::default().fg(cs.popup_text)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {} {:<8}", marker, name), style),
            Span::styled(format!(" {}", detail), Style::default().fg(Color::DarkGray)),
        ]));
    }

    // Controls hint
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " ↑↓ Navigate  Enter Apply  Esc Close",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Settings ")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(cs.popup_border))
            .style(Style::default().bg(cs.popup_bg)),
    );

    f.render_widget(paragraph, area);
}
