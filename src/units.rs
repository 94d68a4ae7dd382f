//! Display units for per-second throughput and byte totals

use std::fmt;
use std::str::FromStr;

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Speed unit selectable in settings / `--unit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedUnit {
    #[default]
    KiloBytes,
    MegaBytes,
    Megabits,
}

impl SpeedUnit {
    pub fn all() -> &'static [SpeedUnit] {
        &[SpeedUnit::KiloBytes, SpeedUnit::MegaBytes, SpeedUnit::Megabits]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpeedUnit::KiloBytes => "KB/s",
            SpeedUnit::MegaBytes => "MB/s",
            SpeedUnit::Megabits => "Mbps",
        }
    }

    /// Lenient lookup used for config values: anything unknown is KB/s
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }

    /// Bytes moved during one tick, in this unit
    pub fn convert(&self, bytes: u64) -> f64 {
        let bytes = bytes as f64;
        match self {
            SpeedUnit::KiloBytes => bytes / KIB,
            SpeedUnit::MegaBytes => bytes / MIB,
            SpeedUnit::Megabits => bytes * 8.0 / MIB,
        }
    }

    /// Converted magnitude together with its label
    pub fn convert_labeled(&self, bytes: u64) -> (f64, &'static str) {
        (self.convert(bytes), self.label())
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpeedUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kb/s" | "kb" | "kbs" => Ok(SpeedUnit::KiloBytes),
            "mb/s" | "mb" | "mbs" => Ok(SpeedUnit::MegaBytes),
            "mbps" | "mbit" | "mbit/s" => Ok(SpeedUnit::Megabits),
            other => Err(format!("unknown speed unit '{}' (expected KB/s, MB/s or Mbps)", other)),
        }
    }
}

/// `"↓ 12.3 KB/s"` style label
pub fn format_rate(arrow: &str, bytes: u64, unit: SpeedUnit) -> String {
    let (value, label) = unit.convert_labeled(bytes);
    format!("{} {:.1} {}", arrow, value, label)
}

/// Usage totals are always shown in MB with two decimals
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / MIB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_each_unit() {
        assert_eq!(SpeedUnit::KiloBytes.convert(2048), 2.0);
        assert_eq!(SpeedUnit::MegaBytes.convert(3 * 1024 * 1024), 3.0);
        assert_eq!(SpeedUnit::Megabits.convert(1024 * 1024), 8.0);
        assert_eq!(SpeedUnit::Megabits.convert_labeled(0), (0.0, "Mbps"));
    }

    #[test]
    fn formats_one_decimal() {
        assert_eq!(format_rate("↓", 12_595, SpeedUnit::KiloBytes), "↓ 12.3 KB/s");
        assert_eq!(format_rate("↑", 0, SpeedUnit::MegaBytes), "↑ 0.0 MB/s");
        assert_eq!(format_rate("↓", 131_072, SpeedUnit::Megabits), "↓ 1.0 Mbps");
    }

    #[test]
    fn formats_totals_in_megabytes() {
        assert_eq!(format_megabytes(0), "0.00 MB");
        assert_eq!(format_megabytes(1024 * 1024 + 512 * 1024), "1.50 MB");
    }

    #[test]
    fn parses_labels() {
        assert_eq!("KB/s".parse::<SpeedUnit>(), Ok(SpeedUnit::KiloBytes));
        assert_eq!(" mb/s ".parse::<SpeedUnit>(), Ok(SpeedUnit::MegaBytes));
        assert_eq!("Mbps".parse::<SpeedUnit>(), Ok(SpeedUnit::Megabits));
        assert!("GB/s".parse::<SpeedUnit>().is_err());
        assert_eq!(SpeedUnit::from_label("furlongs"), SpeedUnit::KiloBytes);
    }
}
