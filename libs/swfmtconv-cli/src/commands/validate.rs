// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Device description validation.

use anyhow::{Context, Result};
use std::path::Path;
use swfmtconv::{PixelFormatCatalog, Topology, TopologyValidator, YamlTopologySource};

/// Load and validate a device description.
pub fn load_topology(path: &Path) -> Result<(YamlTopologySource, Topology)> {
    let source = YamlTopologySource::from_file(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let topology = TopologyValidator::validate(&source)
        .with_context(|| format!("{} is not a valid device description", path.display()))?;
    Ok((source, topology))
}

pub fn run(path: &Path, json: bool) -> Result<()> {
    let (_, topology) = load_topology(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&topology)?);
    } else {
        print_topology(&topology);
    }

    Ok(())
}

pub fn print_topology(topology: &Topology) {
    let config = &topology.config;
    let datatype = topology.datatype();

    println!(
        "Datatype:       {} ({})",
        PixelFormatCatalog::lookup_name_by_code(datatype).unwrap_or("?"),
        datatype
    );
    println!(
        "Format bridge:  {}",
        if config.video_format_bridge { "enabled" } else { "disabled" }
    );
    println!("Max lanes:      {}", config.lane_count);
    println!("Virtual chan:   {}", config.virtual_channel);
    println!("AXIS width:     {}", config.axis_width);
    println!();

    for (pad, port) in topology.ports.iter().enumerate() {
        let format = &port.video_format;
        let pattern = format
            .pattern
            .map(|p| format!(" {:?}", p).to_lowercase())
            .unwrap_or_default();
        println!(
            "  pad {} ({:?}): {} {}-bit{} -> 0x{:04x}, {} x{}",
            pad,
            port.role,
            format.class,
            format.width,
            pattern,
            format.media_code,
            port.endpoint.bus_type,
            port.endpoint.lane_count
        );
    }
}
