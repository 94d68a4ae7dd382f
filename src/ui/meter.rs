use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::units::format_megabytes;
use crate::usage::{Direction, Period};

/// Labels are padded to this many cells so the numbers don't jitter
const LABEL_CELLS: usize = 14;

/// Right-pad by display width, not byte length (the arrows are multi-byte)
fn pad(label: &str) -> String {
    let width = UnicodeWidthStr::width(label);
    let mut out = label.to_string();
    out.push_str(&" ".repeat(LABEL_CELLS.saturating_sub(width)));
    out
}

fn meter_spans(app: &App) -> Vec<Span<'static>> {
    let cs = &app.color_scheme;
    let mut spans = vec![
        Span::styled(
            pad(&app.down_label),
            Style::default().fg(cs.meter_down).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            pad(&app.up_label),
            Style::default().fg(cs.meter_up).add_modifier(Modifier::BOLD),
        ),
    ];
    if app.paused {
        spans.push(Span::styled("[paused]", Style::default().fg(cs.meter_paused)));
    }
    spans
}

/// Boxed meter line for the full view
pub fn draw_meter(f: &mut Frame, app: &App, area: Rect) {
    let cs = &app.color_scheme;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" netspeed ")
        .border_style(Style::default().fg(cs.meter_down))
        .style(Style::default().bg(cs.meter_bg));

    f.render_widget(
        Paragraph::new(Line::from(meter_spans(app)))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

/// Single unboxed line, the whole UI in compact mode
pub fn draw_compact_meter(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    spans.extend(meter_spans(app));
    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(app.color_scheme.meter_bg)),
        area,
    );
}

/// `Today ↓ 1.00 MB ↑ 0.10 MB │ This Month ↓ … ↑ …`
pub fn draw_totals_line(f: &mut Frame, app: &App, area: Rect) {
    let cs = &app.color_scheme;
    let mut spans = Vec::new();

    for (i, period) in [Period::Day, Period::Month].iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(cs.info_label)));
        }
        spans.push(Span::styled(
            format!("{} ", period.label()),
            Style::default().fg(cs.info_label),
        ));
        spans.push(Span::styled(
            format!(
                "↓ {} ↑ {}",
                format_megabytes(app.usage.bucket(Direction::Download, *period)),
                format_megabytes(app.usage.bucket(Direction::Upload, *period)),
            ),
            Style::default().fg(cs.info_value),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
