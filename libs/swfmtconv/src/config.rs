// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Device configuration read once at construction.

use serde::Serialize;

use crate::datatype::DataTypeCode;
use crate::error::{Result, SwConvError};

/// Configuration property names, shared by every topology source.
pub mod property {
    pub const PIXEL_FORMAT: &str = "pixel-format";
    pub const VIDEO_FORMAT_BRIDGE: &str = "video-format-bridge";
    pub const MAX_LANES: &str = "max-lanes";
    pub const VIRTUAL_CHANNEL: &str = "virtual-channel";
    pub const ACTIVE_LANES_CONFIGURABLE: &str = "active-lanes-configurable";
    pub const AXIS_TDATA_WIDTH: &str = "axis-tdata-width";
}

pub const DEFAULT_MAX_LANES: u32 = 4;
pub const DEFAULT_VIRTUAL_CHANNEL: u32 = 0;
pub const DEFAULT_AXIS_TDATA_WIDTH: u32 = 32;

/// Virtual channels addressable with the extended VC field.
pub const VIRTUAL_CHANNEL_COUNT: u32 = 16;

/// Immutable device configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceConfig {
    /// Data type the hardware filter passes through.
    pub pixel_format: DataTypeCode,
    /// Whether the video-format bridge unpacks payload into pixels.
    pub video_format_bridge: bool,
    pub lane_count: u32,
    pub virtual_channel: u32,
    pub active_lanes_configurable: bool,
    /// AXI4-Stream data width in bits.
    pub axis_width: u32,
}

impl DeviceConfig {
    /// Check the numeric bounds the hardware supports.
    pub fn validate(&self) -> Result<()> {
        if !(1..=DEFAULT_MAX_LANES).contains(&self.lane_count) {
            return Err(SwConvError::invalid_config(
                property::MAX_LANES,
                format!("{} lanes, expected 1..={}", self.lane_count, DEFAULT_MAX_LANES),
            ));
        }
        if self.virtual_channel >= VIRTUAL_CHANNEL_COUNT {
            return Err(SwConvError::invalid_config(
                property::VIRTUAL_CHANNEL,
                format!(
                    "virtual channel {} exceeds {}",
                    self.virtual_channel,
                    VIRTUAL_CHANNEL_COUNT - 1
                ),
            ));
        }
        if self.axis_width != 32 && self.axis_width != 64 {
            return Err(SwConvError::invalid_config(
                property::AXIS_TDATA_WIDTH,
                format!("{} bits, expected 32 or 64", self.axis_width),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DeviceConfig {
        DeviceConfig {
            pixel_format: DataTypeCode::RGB888,
            video_format_bridge: false,
            lane_count: DEFAULT_MAX_LANES,
            virtual_channel: DEFAULT_VIRTUAL_CHANNEL,
            active_lanes_configurable: false,
            axis_width: DEFAULT_AXIS_TDATA_WIDTH,
        }
    }

    #[test]
    fn test_defaults_validate() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_lane_bounds() {
        let mut cfg = config();
        cfg.lane_count = 0;
        assert!(cfg.validate().is_err());
        cfg.lane_count = 5;
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("max-lanes"));
    }

    #[test]
    fn test_virtual_channel_bounds() {
        let mut cfg = config();
        cfg.virtual_channel = 15;
        assert!(cfg.validate().is_ok());
        cfg.virtual_channel = 16;
        assert!(matches!(
            cfg.validate(),
            Err(SwConvError::InvalidConfig { ref property, .. }) if property == "virtual-channel"
        ));
    }

    #[test]
    fn test_axis_width() {
        let mut cfg = config();
        cfg.axis_width = 64;
        assert!(cfg.validate().is_ok());
        cfg.axis_width = 48;
        assert!(cfg.validate().is_err());
    }
}
