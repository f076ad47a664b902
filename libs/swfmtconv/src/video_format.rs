// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Port video-format classes and their media-bus codes.
//!
//! A port declares a class, a component width, and for sensor formats a
//! colour filter pattern. The triple selects one row of a static table that
//! supplies the media-bus code used as the pad's default format code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Video-format class of a port, numbered as in the video IP register map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u32)]
pub enum VideoFormatClass {
    Yuv422 = 0,
    Yuv444 = 1,
    Rbg = 2,
    Yuv420 = 3,
    Yuva422 = 4,
    Yuva444 = 5,
    Rgba = 6,
    Yuva420 = 7,
    Yuvd422 = 8,
    Yuvd444 = 9,
    Rgbd = 10,
    Yuvd420 = 11,
    MonoSensor = 12,
    Custom2 = 13,
    Custom3 = 14,
    Custom4 = 15,
    Vuy422 = 16,
    Bgrx = 17,
    Yuvx = 18,
    Xbgr = 19,
    YGrey = 20,
    Xrgb = 21,
}

const ALL_CLASSES: [VideoFormatClass; 22] = [
    VideoFormatClass::Yuv422,
    VideoFormatClass::Yuv444,
    VideoFormatClass::Rbg,
    VideoFormatClass::Yuv420,
    VideoFormatClass::Yuva422,
    VideoFormatClass::Yuva444,
    VideoFormatClass::Rgba,
    VideoFormatClass::Yuva420,
    VideoFormatClass::Yuvd422,
    VideoFormatClass::Yuvd444,
    VideoFormatClass::Rgbd,
    VideoFormatClass::Yuvd420,
    VideoFormatClass::MonoSensor,
    VideoFormatClass::Custom2,
    VideoFormatClass::Custom3,
    VideoFormatClass::Custom4,
    VideoFormatClass::Vuy422,
    VideoFormatClass::Bgrx,
    VideoFormatClass::Yuvx,
    VideoFormatClass::Xbgr,
    VideoFormatClass::YGrey,
    VideoFormatClass::Xrgb,
];

impl VideoFormatClass {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yuv422 => "yuv422",
            Self::Yuv444 => "yuv444",
            Self::Rbg => "rbg",
            Self::Yuv420 => "yuv420",
            Self::Yuva422 => "yuva422",
            Self::Yuva444 => "yuva444",
            Self::Rgba => "rgba",
            Self::Yuva420 => "yuva420",
            Self::Yuvd422 => "yuvd422",
            Self::Yuvd444 => "yuvd444",
            Self::Rgbd => "rgbd",
            Self::Yuvd420 => "yuvd420",
            Self::MonoSensor => "mono-sensor",
            Self::Custom2 => "custom2",
            Self::Custom3 => "custom3",
            Self::Custom4 => "custom4",
            Self::Vuy422 => "vuy422",
            Self::Bgrx => "bgrx",
            Self::Yuvx => "yuvx",
            Self::Xbgr => "xbgr",
            Self::YGrey => "y-grey",
            Self::Xrgb => "xrgb",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ALL_CLASSES.iter().copied().find(|class| class.name() == name)
    }

    pub fn from_code(code: u32) -> Option<Self> {
        ALL_CLASSES.iter().copied().find(|class| *class as u32 == code)
    }

    /// Accepts either a class name or its numeric code.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().parse::<u32>() {
            Ok(code) => Self::from_code(code),
            Err(_) => Self::from_name(value.trim()),
        }
    }

    /// Whether the video-format bridge can unpack this class into pixels.
    pub const fn is_bridge_compatible(self) -> bool {
        matches!(
            self,
            Self::Yuv422 | Self::Yuv420 | Self::Rbg | Self::MonoSensor | Self::YGrey
        )
    }
}

impl fmt::Display for VideoFormatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Colour filter array layout of a sensor port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CfaPattern {
    Mono,
    Rggb,
    Grbg,
    Gbrg,
    Bggr,
}

impl CfaPattern {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mono" => Some(Self::Mono),
            "rggb" => Some(Self::Rggb),
            "grbg" => Some(Self::Grbg),
            "gbrg" => Some(Self::Gbrg),
            "bggr" => Some(Self::Bggr),
            _ => None,
        }
    }
}

/// Media-bus codes referenced by the format table.
pub mod bus {
    pub const RBG888_1X24: u32 = 0x100e;
    pub const Y8_1X8: u32 = 0x2001;
    pub const Y10_1X10: u32 = 0x200a;
    pub const UYVY8_1X16: u32 = 0x200f;
    pub const Y12_1X12: u32 = 0x2013;
    pub const UYVY10_1X20: u32 = 0x201a;
    pub const VUY8_1X24: u32 = 0x2024;
    pub const VYYUYY10_4X20: u32 = 0x2025;
    pub const VYYUYY8_1X24: u32 = 0x202c;
    pub const Y16_1X16: u32 = 0x202d;
    pub const SBGGR8_1X8: u32 = 0x3001;
    pub const SGRBG8_1X8: u32 = 0x3002;
    pub const SBGGR10_1X10: u32 = 0x3007;
    pub const SBGGR12_1X12: u32 = 0x3008;
    pub const SGRBG10_1X10: u32 = 0x300a;
    pub const SGBRG10_1X10: u32 = 0x300e;
    pub const SRGGB10_1X10: u32 = 0x300f;
    pub const SGBRG12_1X12: u32 = 0x3010;
    pub const SGRBG12_1X12: u32 = 0x3011;
    pub const SRGGB12_1X12: u32 = 0x3012;
    pub const SGBRG8_1X8: u32 = 0x3013;
    pub const SRGGB8_1X8: u32 = 0x3014;
    pub const SBGGR16_1X16: u32 = 0x301d;
    pub const SGBRG16_1X16: u32 = 0x301e;
    pub const SGRBG16_1X16: u32 = 0x301f;
    pub const SRGGB16_1X16: u32 = 0x3020;
}

/// A resolved port video format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoFormat {
    pub class: VideoFormatClass,
    /// Bits per component.
    pub width: u32,
    pub pattern: Option<CfaPattern>,
    pub media_code: u32,
}

const fn row(
    class: VideoFormatClass,
    width: u32,
    pattern: Option<CfaPattern>,
    media_code: u32,
) -> VideoFormat {
    VideoFormat {
        class,
        width,
        pattern,
        media_code,
    }
}

use CfaPattern::{Bggr, Gbrg, Grbg, Mono, Rggb};
use VideoFormatClass::{MonoSensor, Rbg, YGrey, Yuv420, Yuv422, Yuv444};

static VIDEO_FORMATS: [VideoFormat; 30] = [
    row(Yuv420, 8, None, bus::VYYUYY8_1X24),
    row(Yuv420, 10, None, bus::VYYUYY10_4X20),
    row(Yuv422, 8, None, bus::UYVY8_1X16),
    row(Yuv422, 10, None, bus::UYVY10_1X20),
    row(Yuv444, 8, None, bus::VUY8_1X24),
    row(Rbg, 8, None, bus::RBG888_1X24),
    row(MonoSensor, 8, Some(Mono), bus::Y8_1X8),
    row(MonoSensor, 8, Some(Rggb), bus::SRGGB8_1X8),
    row(MonoSensor, 8, Some(Grbg), bus::SGRBG8_1X8),
    row(MonoSensor, 8, Some(Gbrg), bus::SGBRG8_1X8),
    row(MonoSensor, 8, Some(Bggr), bus::SBGGR8_1X8),
    row(MonoSensor, 10, Some(Mono), bus::Y10_1X10),
    row(MonoSensor, 10, Some(Rggb), bus::SRGGB10_1X10),
    row(MonoSensor, 10, Some(Grbg), bus::SGRBG10_1X10),
    row(MonoSensor, 10, Some(Gbrg), bus::SGBRG10_1X10),
    row(MonoSensor, 10, Some(Bggr), bus::SBGGR10_1X10),
    row(MonoSensor, 12, Some(Mono), bus::Y12_1X12),
    row(MonoSensor, 12, Some(Rggb), bus::SRGGB12_1X12),
    row(MonoSensor, 12, Some(Grbg), bus::SGRBG12_1X12),
    row(MonoSensor, 12, Some(Gbrg), bus::SGBRG12_1X12),
    row(MonoSensor, 12, Some(Bggr), bus::SBGGR12_1X12),
    row(MonoSensor, 16, Some(Mono), bus::Y16_1X16),
    row(MonoSensor, 16, Some(Rggb), bus::SRGGB16_1X16),
    row(MonoSensor, 16, Some(Grbg), bus::SGRBG16_1X16),
    row(MonoSensor, 16, Some(Gbrg), bus::SGBRG16_1X16),
    row(MonoSensor, 16, Some(Bggr), bus::SBGGR16_1X16),
    row(YGrey, 8, None, bus::Y8_1X8),
    row(YGrey, 10, None, bus::Y10_1X10),
    row(YGrey, 12, None, bus::Y12_1X12),
    row(YGrey, 16, None, bus::Y16_1X16),
];

impl VideoFormat {
    /// Find the table row for a declared class/width/pattern triple.
    ///
    /// The pattern only participates for sensor classes and is ignored
    /// otherwise.
    pub fn lookup(
        class: VideoFormatClass,
        width: u32,
        pattern: Option<CfaPattern>,
    ) -> Option<VideoFormat> {
        let pattern = if class == VideoFormatClass::MonoSensor {
            pattern
        } else {
            None
        };
        VIDEO_FORMATS
            .iter()
            .find(|f| f.class == class && f.width == width && f.pattern == pattern)
            .copied()
    }

    pub fn table() -> &'static [VideoFormat] {
        &VIDEO_FORMATS
    }
}
