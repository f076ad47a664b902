// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Pixel format catalog listing.

use anyhow::Result;
use swfmtconv::PixelFormatCatalog;

pub fn run() -> Result<()> {
    let entries = PixelFormatCatalog::entries();

    println!("Pixel formats ({}):\n", entries.len());
    for entry in entries {
        println!(
            "  {:<20} {}  {:?}",
            entry.name,
            entry.code,
            entry.code.category()
        );
    }

    Ok(())
}
