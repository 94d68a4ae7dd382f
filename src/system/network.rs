use crate::units::{format_rate, SpeedUnit};

/// Throughput of the most recent tick (all interfaces combined)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkInfo {
    /// Bytes received during the tick
    pub down_bytes: u64,
    /// Bytes sent during the tick
    pub up_bytes: u64,
}

impl NetworkInfo {
    pub fn down_label(&self, unit: SpeedUnit) -> String {
        format_rate("↓", self.down_bytes, unit)
    }

    pub fn up_label(&self, unit: SpeedUnit) -> String {
        format_rate("↑", self.up_bytes, unit)
    }
}
