use std::path::PathBuf;

use chrono::NaiveDateTime;
use log::warn;

use crate::color_scheme::{ColorScheme, ThemeId};
use crate::config::NetspeedConfig;
use crate::history::HistoryWindow;
use crate::system::network::NetworkInfo;
use crate::units::SpeedUnit;
use crate::usage::UsageAccumulator;

/// Which view/mode the app is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Help,
    Settings, // s / F2: unit + theme selection
    Stats,    // u: usage totals popup
}

/// Entries of the settings popup, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Unit(SpeedUnit),
    Theme(ThemeId),
}

impl SettingsItem {
    pub fn all() -> Vec<SettingsItem> {
        SpeedUnit::all()
            .iter()
            .map(|u| SettingsItem::Unit(*u))
            .chain(ThemeId::all().iter().map(|t| SettingsItem::Theme(*t)))
            .collect()
    }
}

/// Main application state
pub struct App {
    pub mode: AppMode,
    pub should_quit: bool,
    pub paused: bool, // p: freeze rates/graph, accounting continues

    // Latest tick
    pub network_info: NetworkInfo,
    pub down_label: String,
    pub up_label: String,

    // Live graph samples
    pub history: HistoryWindow,

    // Read-only copy of the accumulator taken after the last tick
    pub usage: UsageAccumulator,
    // Last persistence failure, cleared by the next successful write
    pub persist_error: Option<String>,

    // Display options (persisted)
    pub unit: SpeedUnit,
    pub theme_id: ThemeId,
    pub color_scheme: ColorScheme,
    pub compact_mode: bool,
    pub show_graph: bool,

    pub settings_index: usize,

    // Where settings changes get written; None disables saving
    pub config_path: Option<PathBuf>,
}

impl App {
    pub fn new(config: &NetspeedConfig, usage: UsageAccumulator) -> Self {
        let mut app = Self {
            mode: AppMode::Normal,
            should_quit: false,
            paused: false,

            network_info: NetworkInfo::default(),
            down_label: String::new(),
            up_label: String::new(),

            history: HistoryWindow::default(),

            usage,
            persist_error: None,

            unit: config.unit,
            theme_id: config.theme,
            color_scheme: ColorScheme::from_id(config.theme),
            compact_mode: config.compact,
            show_graph: config.show_graph,

            settings_index: 0,
            config_path: None,
        };
        app.refresh_labels();
        app
    }

    /// Re-render the meter labels for the current unit
    pub fn refresh_labels(&mut self) {
        self.down_label = self.network_info.down_label(self.unit);
        self.up_label = self.network_info.up_label(self.unit);
    }

    /// Publish the results of one tick
    pub fn record_tick(
        &mut self,
        info: NetworkInfo,
        usage: &UsageAccumulator,
        at: NaiveDateTime,
    ) {
        self.usage = usage.clone();
        if self.paused {
            return;
        }
        self.network_info = info;
        self.history.push(crate::history::HistorySample {
            at,
            down: info.down_bytes,
            up: info.up_bytes,
        });
        self.refresh_labels();
    }

    pub fn set_unit(&mut self, unit: SpeedUnit) {
        if self.unit != unit {
            self.unit = unit;
            self.refresh_labels();
            self.save_config();
        }
    }

    pub fn set_theme(&mut self, theme: ThemeId) {
        if self.theme_id != theme {
            self.theme_id = theme;
            self.color_scheme = ColorScheme::from_id(theme);
            self.save_config();
        }
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme_id.toggled());
    }

    pub fn toggle_compact(&mut self) {
        self.compact_mode = !self.compact_mode;
        self.save_config();
    }

    pub fn toggle_graph(&mut self) {
        self.show_graph = !self.show_graph;
        self.save_config();
    }

    pub fn open_settings(&mut self) {
        let items = SettingsItem::all();
        self.settings_index = items
            .iter()
            .position(|i| *i == SettingsItem::Unit(self.unit))
            .unwrap_or(0);
        self.mode = AppMode::Settings;
    }

    pub fn settings_prev(&mut self) {
        if self.settings_index > 0 {
            self.settings_index -= 1;
        }
    }

    pub fn settings_next(&mut self) {
        let len = SettingsItem::all().len();
        if self.settings_index + 1 < len {
            self.settings_index += 1;
        }
    }

    /// Apply the highlighted settings entry
    pub fn settings_apply(&mut self) {
        match SettingsItem::all().get(self.settings_index) {
            Some(SettingsItem::Unit(unit)) => self.set_unit(*unit),
            Some(SettingsItem::Theme(theme)) => self.set_theme(*theme),
            None => {}
        }
    }

    fn save_config(&self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = NetspeedConfig::from_app(self).save(path) {
            warn!("failed to save settings to {}: {}", path.display(), e);
        }
    }
}
