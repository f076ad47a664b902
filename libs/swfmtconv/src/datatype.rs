// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! CSI-2 packet data type codes.
//!
//! The data type field is six bits wide, so every code lives in 0x00..=0x3F.
//! The space is banded: synchronization short packets, generic short and long
//! packets, pixel payloads (YUV, RGB, RAW), user-defined, and reserved.

use serde::Serialize;
use std::fmt;

/// Band a [`DataTypeCode`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTypeCategory {
    /// Frame/line start and end short packets.
    Sync,
    /// Generic short packets (0x08..=0x0F).
    GenericShort,
    /// Generic long packets (0x10..=0x17).
    GenericLong,
    /// YUV pixel payload.
    Yuv,
    /// RGB pixel payload.
    Rgb,
    /// RAW (sensor) pixel payload.
    Raw,
    /// User-defined byte-based payload (0x30..=0x37).
    User,
    /// Reserved for future use.
    Reserved,
}

impl DataTypeCategory {
    /// Whether codes in this band carry pixels.
    pub const fn is_payload(self) -> bool {
        matches!(self, Self::Yuv | Self::Rgb | Self::Raw)
    }
}

/// A six-bit CSI-2 data type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DataTypeCode(u8);

impl DataTypeCode {
    /// Highest representable code.
    pub const MAX: u8 = 0x3F;

    pub const FRAME_START: Self = Self(0x00);
    pub const FRAME_END: Self = Self(0x01);
    pub const LINE_START: Self = Self(0x02);
    pub const LINE_END: Self = Self(0x03);

    pub const YUV420_8BIT: Self = Self(0x18);
    pub const YUV420_10BIT: Self = Self(0x19);
    pub const LEGACY_YUV420_8BIT: Self = Self(0x1A);
    pub const YUV420_8BIT_CSPS: Self = Self(0x1C);
    pub const YUV420_10BIT_CSPS: Self = Self(0x1D);
    pub const YUV422_8BIT: Self = Self(0x1E);
    pub const YUV422_10BIT: Self = Self(0x1F);

    pub const RGB444: Self = Self(0x20);
    pub const RGB555: Self = Self(0x21);
    pub const RGB565: Self = Self(0x22);
    pub const RGB666: Self = Self(0x23);
    pub const RGB888: Self = Self(0x24);

    pub const RAW6: Self = Self(0x28);
    pub const RAW7: Self = Self(0x29);
    pub const RAW8: Self = Self(0x2A);
    pub const RAW10: Self = Self(0x2B);
    pub const RAW12: Self = Self(0x2C);
    pub const RAW14: Self = Self(0x2D);
    pub const RAW16: Self = Self(0x2E);
    pub const RAW20: Self = Self(0x2F);

    pub const USER_FIRST: Self = Self(0x30);
    pub const USER_LAST: Self = Self(0x37);

    /// Lowest pixel payload code.
    pub const PAYLOAD_FIRST: Self = Self::YUV420_8BIT;
    /// Highest pixel payload code.
    pub const PAYLOAD_LAST: Self = Self::RAW20;

    /// Create a code from its raw value, or `None` if it does not fit in six bits.
    pub const fn new(raw: u8) -> Option<Self> {
        if raw <= Self::MAX {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Raw six-bit value.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn category(self) -> DataTypeCategory {
        match self.0 {
            0x00..=0x07 => DataTypeCategory::Sync,
            0x08..=0x0F => DataTypeCategory::GenericShort,
            0x10..=0x17 => DataTypeCategory::GenericLong,
            0x1B => DataTypeCategory::Reserved,
            0x18..=0x1F => DataTypeCategory::Yuv,
            0x20..=0x24 => DataTypeCategory::Rgb,
            0x25..=0x27 => DataTypeCategory::Reserved,
            0x28..=0x2F => DataTypeCategory::Raw,
            0x30..=0x37 => DataTypeCategory::User,
            _ => DataTypeCategory::Reserved,
        }
    }

    /// Whether this code lies in the closed payload range and carries pixels.
    pub const fn is_payload(self) -> bool {
        self.0 >= Self::PAYLOAD_FIRST.0
            && self.0 <= Self::PAYLOAD_LAST.0
            && self.category().is_payload()
    }
}

impl fmt::Display for DataTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

impl TryFrom<u32> for DataTypeCode {
    type Error = u32;

    fn try_from(raw: u32) -> std::result::Result<Self, Self::Error> {
        u8::try_from(raw)
            .ok()
            .and_then(Self::new)
            .ok_or(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_space_is_six_bits() {
        assert!(DataTypeCode::new(0x3F).is_some());
        assert!(DataTypeCode::new(0x40).is_none());
        assert_eq!(DataTypeCode::try_from(0x100u32), Err(0x100));
        assert_eq!(DataTypeCode::try_from(0x2Au32), Ok(DataTypeCode::RAW8));
    }

    #[test]
    fn test_categories() {
        assert_eq!(DataTypeCode::FRAME_START.category(), DataTypeCategory::Sync);
        assert_eq!(
            DataTypeCode::new(0x0A).unwrap().category(),
            DataTypeCategory::GenericShort
        );
        assert_eq!(
            DataTypeCode::new(0x12).unwrap().category(),
            DataTypeCategory::GenericLong
        );
        assert_eq!(DataTypeCode::YUV422_10BIT.category(), DataTypeCategory::Yuv);
        assert_eq!(DataTypeCode::RGB888.category(), DataTypeCategory::Rgb);
        assert_eq!(DataTypeCode::RAW20.category(), DataTypeCategory::Raw);
        assert_eq!(DataTypeCode::USER_FIRST.category(), DataTypeCategory::User);
        assert_eq!(
            DataTypeCode::new(0x3F).unwrap().category(),
            DataTypeCategory::Reserved
        );
    }

    #[test]
    fn test_reserved_slots_inside_payload_bands() {
        let yuv_reserved = DataTypeCode::new(0x1B).unwrap();
        assert_eq!(yuv_reserved.category(), DataTypeCategory::Reserved);
        assert!(!yuv_reserved.is_payload());

        for raw in 0x25..=0x27 {
            let code = DataTypeCode::new(raw).unwrap();
            assert!(!code.is_payload(), "{} should not be payload", code);
        }
    }

    #[test]
    fn test_payload_range_bounds() {
        assert!(DataTypeCode::PAYLOAD_FIRST.is_payload());
        assert!(DataTypeCode::PAYLOAD_LAST.is_payload());
        assert!(!DataTypeCode::new(0x17).unwrap().is_payload());
        assert!(!DataTypeCode::USER_FIRST.is_payload());
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(DataTypeCode::RGB888.to_string(), "0x24");
    }
}
