use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;

/// Draw the Help popup (F1)
pub fn draw_help(f: &mut Frame, app: &App) {
    let area = super::centered_rect(60, 80, f.area());
    f.render_widget(Clear, area);

    let cs = &app.color_scheme;
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow),
        ))
    };

    let help_text = vec![
        Line::from(Span::styled(
            " netspeed - network speed meter with usage totals ",
            Style::default().fg(cs.popup_title).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading(" Views "),
        Line::from("  u           Usage statistics (day/week/month/year)"),
        Line::from("  g           Toggle live graph"),
        Line::from("  c           Toggle compact one-line meter"),
        Line::from("  p           Pause display (usage is still counted)"),
        Line::from(""),
        heading(" Settings "),
        Line::from("  F2/s        Settings (unit, theme)"),
        Line::from("  1 / 2 / 3   Unit KB/s / MB/s / Mbps"),
        Line::from("  t           Toggle theme"),
        Line::from(""),
        heading(" General "),
        Line::from("  F1/h/?      Show this help"),
        Line::from("  F10/q       Quit"),
        Line::from("  Ctrl+C      Quit"),
        Line::from(""),
        Line::from(Span::styled(
            " Press Esc or F1 to close ",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(cs.popup_border)),
        )
        .style(Style::default().fg(cs.popup_text).bg(cs.popup_bg))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
