// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Pad format values and pad/slot addressing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SwConvError};

/// Number of media pads on the device.
pub const PAD_COUNT: usize = 2;

pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;

/// Field order of a video stream (numbering follows `enum v4l2_field`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum FieldOrder {
    Any = 0,
    /// Whole frames, no fields.
    #[default]
    Progressive = 1,
    Top = 2,
    Bottom = 3,
    Interlaced = 4,
    SeqTopBottom = 5,
    SeqBottomTop = 6,
    Alternate = 7,
    InterlacedTopBottom = 8,
    InterlacedBottomTop = 9,
}

/// Colorspace of a video stream (numbering follows `enum v4l2_colorspace`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum Colorspace {
    Default = 0,
    Smpte170m = 1,
    Smpte240m = 2,
    Rec709 = 3,
    Jpeg = 7,
    #[default]
    Srgb = 8,
    Oprgb = 9,
    Bt2020 = 10,
    Raw = 11,
    DciP3 = 12,
}

/// One pad's negotiated format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatSlot {
    /// Media-bus code identifying the pixel layout on the bus.
    pub media_code: u32,
    pub width: u32,
    pub height: u32,
    pub field: FieldOrder,
    pub colorspace: Colorspace,
}

impl FormatSlot {
    /// Canonical default geometry (1920x1080, progressive, sRGB) for `media_code`.
    pub fn canonical(media_code: u32) -> Self {
        Self {
            media_code,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            field: FieldOrder::Progressive,
            colorspace: Colorspace::Srgb,
        }
    }

    /// A proposal carrying only the negotiable fields; field order and
    /// colorspace take their defaults and are ignored by the store.
    pub fn proposal(media_code: u32, width: u32, height: u32) -> Self {
        Self {
            media_code,
            width,
            height,
            field: FieldOrder::default(),
            colorspace: Colorspace::default(),
        }
    }
}

impl fmt::Display for FormatSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} code=0x{:04x} field={:?} colorspace={:?}",
            self.width, self.height, self.media_code, self.field, self.colorspace
        )
    }
}

/// Role of a pad. Pad 0 is always the source and pad 1 the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadRole {
    Source,
    Sink,
}

impl PadRole {
    pub const ALL: [PadRole; PAD_COUNT] = [PadRole::Source, PadRole::Sink];

    pub const fn index(self) -> u32 {
        match self {
            Self::Source => 0,
            Self::Sink => 1,
        }
    }

    pub fn from_index(pad: u32) -> Result<Self> {
        match pad {
            0 => Ok(Self::Source),
            1 => Ok(Self::Sink),
            _ => Err(SwConvError::InvalidPad { pad }),
        }
    }
}

/// Which of a pad's two format slots an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Ephemeral format scoped to one negotiation session.
    Trial,
    /// Durable device format.
    Active,
}

impl SlotKind {
    /// Decode the framework's `which` selector (0 = trial, 1 = active).
    pub fn from_which(which: u32) -> Result<Self> {
        match which {
            0 => Ok(Self::Trial),
            1 => Ok(Self::Active),
            _ => Err(SwConvError::InvalidSlot { which }),
        }
    }

    pub const fn which(self) -> u32 {
        match self {
            Self::Trial => 0,
            Self::Active => 1,
        }
    }
}
