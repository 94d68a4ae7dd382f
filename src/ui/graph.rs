use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use ratatui::symbols;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType};
use ratatui::Frame;

use crate::app::App;
use crate::history::HISTORY_LEN;

/// Live download/upload chart over the history window
pub fn draw_graph(f: &mut Frame, app: &App, area: Rect) {
    let cs = &app.color_scheme;
    let unit = app.unit;

    let x_max = (HISTORY_LEN - 1) as f64;
    let down = app.history.points(x_max, |s| unit.convert(s.down));
    let up = app.history.points(x_max, |s| unit.convert(s.up));
    let y_max = (unit.convert(app.history.peak()) * 1.1).max(1.0);

    let datasets = vec![
        Dataset::default()
            .name("Download")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(cs.graph_down))
            .data(&down),
        Dataset::default()
            .name("Upload")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(cs.graph_up))
            .data(&up),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Last {}s ", HISTORY_LEN))
                .border_style(Style::default().fg(cs.graph_axis)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(cs.graph_axis))
                .bounds([0.0, x_max])
                .labels(vec!["-60s".to_string(), "now".to_string()]),
        )
        .y_axis(
            Axis::default()
                .title(unit.label().bold())
                .style(Style::default().fg(cs.graph_axis))
                .bounds([0.0, y_max])
                .labels(vec!["0".to_string(), format!("{:.1}", y_max)]),
        );

    f.render_widget(chart, area);
}
