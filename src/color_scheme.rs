use ratatui::style::Color;

/// Meter themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeId {
    #[default]
    Green = 0,
    Dark = 1,
}

impl ThemeId {
    pub fn all() -> &'static [ThemeId] {
        &[ThemeId::Green, ThemeId::Dark]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeId::Green => "Green",
            ThemeId::Dark => "Dark",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ThemeId::Green => "Lime on dark green",
            ThemeId::Dark => "White on black",
        }
    }

    /// Value written to the rc file
    pub fn key(&self) -> &'static str {
        match self {
            ThemeId::Green => "green",
            ThemeId::Dark => "dark",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "green" => Some(ThemeId::Green),
            "dark" => Some(ThemeId::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeId::Green => ThemeId::Dark,
            ThemeId::Dark => ThemeId::Green,
        }
    }
}

/// All configurable color slots used across the app
#[derive(Debug, Clone)]
pub struct ColorScheme {
    // Meter
    pub meter_bg: Color,
    pub meter_down: Color,
    pub meter_up: Color,
    pub meter_paused: Color,

    // Graph
    pub graph_down: Color,
    pub graph_up: Color,
    pub graph_axis: Color,

    // Totals summary under the meter
    pub info_label: Color,
    pub info_value: Color,

    // Footer
    pub footer_key_fg: Color,
    pub footer_key_bg: Color,
    pub footer_label_fg: Color,
    pub footer_label_bg: Color,
    pub footer_warning: Color,

    // Popups / menus
    pub popup_border: Color,
    pub popup_bg: Color,
    pub popup_title: Color,
    pub popup_selected_bg: Color,
    pub popup_selected_fg: Color,
    pub popup_text: Color,
}

impl ColorScheme {
    pub fn from_id(id: ThemeId) -> Self {
        match id {
            ThemeId::Green => Self::green(),
            ThemeId::Dark => Self::dark(),
        }
    }

    /// Lime text on #003300
    fn green() -> Self {
        let bg = Color::Rgb(0x00, 0x33, 0x00);
        let lime = Color::Rgb(0x00, 0xff, 0x00);
        Self {
            meter_bg: bg,
            meter_down: lime,
            meter_up: lime,
            meter_paused: Color::Yellow,

            graph_down: Color::Green,
            graph_up: Color::Blue,
            graph_axis: Color::Rgb(0x66, 0x99, 0x66),

            info_label: lime,
            info_value: Color::White,

            footer_key_fg: Color::Black,
            footer_key_bg: lime,
            footer_label_fg: lime,
            footer_label_bg: bg,
            footer_warning: Color::Red,

            popup_border: lime,
            popup_bg: bg,
            popup_title: lime,
            popup_selected_bg: lime,
            popup_selected_fg: Color::Black,
            popup_text: Color::White,
        }
    }

    /// White text on black
    fn dark() -> Self {
        Self {
            meter_bg: Color::Black,
            meter_down: Color::White,
            meter_up: Color::White,
            meter_paused: Color::Yellow,

            graph_down: Color::Green,
            graph_up: Color::Blue,
            graph_axis: Color::DarkGray,

            info_label: Color::Gray,
            info_value: Color::White,

            footer_key_fg: Color::Black,
            footer_key_bg: Color::Gray,
            footer_label_fg: Color::White,
            footer_label_bg: Color::Black,
            footer_warning: Color::Red,

            popup_border: Color::White,
            popup_bg: Color::Black,
            popup_title: Color::White,
            popup_selected_bg: Color::White,
            popup_selected_fg: Color::Black,
            popup_text: Color::Gray,
        }
    }
}
