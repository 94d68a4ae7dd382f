use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::units::format_megabytes;
use crate::usage::{Direction, Period};

/// Usage Statistics popup: every bucket, both directions, in MB
pub fn draw_stats(f: &mut Frame, app: &App) {
    let area = popup_area(f.area());
    f.render_widget(Clear, area);

    let cs = &app.color_scheme;
    let mut lines = Vec::new();

    for direction in Direction::ALL {
        for period in Period::ALL {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} {}: ", direction.label(), period.label()),
                    Style::default().fg(cs.popup_text),
                ),
                Span::styled(
                    format_megabytes(app.usage.bucket(direction, period)),
                    Style::default().fg(cs.popup_title).add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        format!(" Last update: {}", app.usage.last_reset.format("%Y-%m-%d %H:%M:%S")),
        Style::default().fg(cs.popup_text),
    )));
    if let Some(err) = &app.persist_error {
        lines.push(Line::from(Span::styled(
            format!(" Not saved: {}", err),
            Style::default().fg(cs.footer_warning),
        )));
    }
    lines.push(Line::from(Span::styled(
        " Esc/u to close",
        Style::default().fg(cs.popup_text),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Usage Statistics ")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(cs.popup_border))
            .style(Style::default().bg(cs.popup_bg)),
    );

    f.render_widget(paragraph, area);
}

/// 44x16 box centered in `area`, shrunk to fit small terminals
fn popup_area(area: Rect) -> Rect {
    let width = area.width.min(44);
    let height = area.height.min(16);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
