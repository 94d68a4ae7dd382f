use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

/// Key definitions: (key_label, description)
const FKEYS_NORMAL: &[(&str, &str)] = &[
    ("F1", "Help "),
    ("F2", "Setup "),
    ("u", "Usage "),
    ("g", "Graph "),
    ("c", "Compact "),
    ("t", "Theme "),
    ("p", "Pause "),
    ("F10", "Quit "),
];

/// Draw the bottom key bar, with a warning when the last save failed
pub fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let cs = &app.color_scheme;

    // Full-width background first
    f.render_widget(
        Paragraph::new(" ".repeat(area.width as usize))
            .style(Style::default().bg(cs.footer_label_bg)),
        area,
    );

    let mut spans: Vec<Span> = Vec::new();
    for (key, desc) in FKEYS_NORMAL {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(cs.footer_key_fg)
                .bg(cs.footer_key_bg)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            desc.to_string(),
            Style::default().fg(cs.footer_label_fg).bg(cs.footer_label_bg),
        ));
    }

    if app.persist_error.is_some() {
        spans.push(Span::styled(
            " state not saved ",
            Style::default()
                .fg(cs.footer_warning)
                .bg(cs.footer_label_bg)
                .add_modifier(Modifier::BOLD),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
