//! netspeed settings persistence (htoprc-style key=value format)
//!
//! Saves/loads settings to `<config dir>/netspeed/netspeedrc`
//! (`%APPDATA%` on Windows, `$XDG_CONFIG_HOME` on Linux).

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::color_scheme::ThemeId;
use crate::units::SpeedUnit;

/// Get the default config file path: <config dir>/netspeed/netspeedrc
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("netspeed").join("netspeedrc"))
}

/// Persistable settings (subset of App state)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetspeedConfig {
    pub unit: SpeedUnit,
    pub theme: ThemeId,
    pub compact: bool,
    pub show_graph: bool,
}

impl Default for NetspeedConfig {
    fn default() -> Self {
        Self {
            unit: SpeedUnit::KiloBytes,
            theme: ThemeId::Green,
            compact: false,
            show_graph: true,
        }
    }
}

impl NetspeedConfig {
    /// Load config from file, returning defaults if the file doesn't exist
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    /// Parse rc content. Unknown keys and malformed values are ignored.
    pub fn parse(content: &str) -> Self {
        let mut cfg = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim();
                match key.trim() {
                    "unit" => cfg.unit = SpeedUnit::from_label(value),
                    "theme" => {
                        if let Some(theme) = ThemeId::from_key(value) {
                            cfg.theme = theme;
                        }
                    }
                    "compact" => cfg.compact = value == "1",
                    "show_graph" => cfg.show_graph = value == "1",
                    _ => {} // Ignore unknown keys
                }
            }
        }

        cfg
    }

    pub fn render(&self) -> String {
        let b = |v: bool| if v { "1" } else { "0" };

        let lines = [
            "# netspeed configuration file".to_string(),
            "# Auto-generated; edits are overwritten when settings change".to_string(),
            String::new(),
            format!("unit={}", self.unit.label()),
            format!("theme={}", self.theme.key()),
            format!("compact={}", b(self.compact)),
            format!("show_graph={}", b(self.show_graph)),
        ];
        lines.join("\n") + "\n"
    }

    /// Save config to file, creating the directory if needed
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let mut file = fs::File::create(path)?;
        file.write_all(self.render().as_bytes())
    }

    /// Build config from current App state
    pub fn from_app(app: &crate::app::App) -> Self {
        Self {
            unit: app.unit,
            theme: app.theme_id,
            compact: app.compact_mode,
            show_graph: app.show_graph,
        }
    }
}
