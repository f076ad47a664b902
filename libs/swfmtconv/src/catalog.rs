// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Static table between pixel format names and CSI-2 payload data types.
//!
//! Only payload codes are represented. Sync, generic, user, and reserved codes
//! have no name and never resolve.

use crate::datatype::DataTypeCode;
use crate::error::{Result, SwConvError};

/// Longest accepted pixel format name, in bytes.
pub const MAX_FORMAT_NAME_LEN: usize = 64;

/// One named payload data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormatEntry {
    pub code: DataTypeCode,
    pub name: &'static str,
}

const fn entry(code: DataTypeCode, name: &'static str) -> PixelFormatEntry {
    PixelFormatEntry { code, name }
}

static PIXEL_FORMATS: [PixelFormatEntry; 20] = [
    entry(DataTypeCode::YUV420_8BIT, "YUV420_8bit"),
    entry(DataTypeCode::YUV420_10BIT, "YUV420_10bit"),
    entry(DataTypeCode::LEGACY_YUV420_8BIT, "Legacy_YUV420_8bit"),
    entry(DataTypeCode::YUV420_8BIT_CSPS, "YUV420_8bit_CSPS"),
    entry(DataTypeCode::YUV420_10BIT_CSPS, "YUV420_10bit_CSPS"),
    entry(DataTypeCode::YUV422_8BIT, "YUV422_8bit"),
    entry(DataTypeCode::YUV422_10BIT, "YUV422_10bit"),
    entry(DataTypeCode::RGB444, "RGB444"),
    entry(DataTypeCode::RGB555, "RGB555"),
    entry(DataTypeCode::RGB565, "RGB565"),
    entry(DataTypeCode::RGB666, "RGB666"),
    entry(DataTypeCode::RGB888, "RGB888"),
    entry(DataTypeCode::RAW6, "RAW6"),
    entry(DataTypeCode::RAW7, "RAW7"),
    entry(DataTypeCode::RAW8, "RAW8"),
    entry(DataTypeCode::RAW10, "RAW10"),
    entry(DataTypeCode::RAW12, "RAW12"),
    entry(DataTypeCode::RAW14, "RAW14"),
    entry(DataTypeCode::RAW16, "RAW16"),
    entry(DataTypeCode::RAW20, "RAW20"),
];

/// Immutable name/code lookup over the supported payload formats.
pub struct PixelFormatCatalog;

impl PixelFormatCatalog {
    /// All catalog entries, in ascending code order.
    pub fn entries() -> &'static [PixelFormatEntry] {
        &PIXEL_FORMATS
    }

    /// Resolve a pixel format name (exact, case-sensitive) to its data type.
    pub fn lookup_code_by_name(name: &str) -> Result<DataTypeCode> {
        PIXEL_FORMATS
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.code)
            .ok_or_else(|| SwConvError::InvalidFormatString {
                name: name.to_string(),
            })
    }

    /// Reverse lookup. `None` for any code that is not a named payload format.
    pub fn lookup_name_by_code(code: DataTypeCode) -> Option<&'static str> {
        PIXEL_FORMATS
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.name)
    }
}
