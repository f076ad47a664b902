// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Simulated bring-up and format negotiation.

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use swfmtconv::{FormatSlot, PadRole, SwFormatConverter, Topology, YamlTopologySource};

use crate::simulated::{SimulatedFramework, SimulatedResources};

/// A `set_format` call requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRequest {
    pub pad: u32,
    pub which: u32,
    pub width: u32,
    pub height: u32,
    /// Media-bus code. `None` keeps the slot's current code.
    pub code: Option<u32>,
}

fn parse_number(value: &str) -> Result<u32> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.with_context(|| format!("'{}' is not a number", value))
}

impl FromStr for FormatRequest {
    type Err = anyhow::Error;

    /// `PAD:WHICH:WIDTHxHEIGHT[:CODE]`
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if !(3..=4).contains(&parts.len()) {
            bail!("expected PAD:WHICH:WIDTHxHEIGHT[:CODE], got '{}'", s);
        }

        let (width, height) = parts[2]
            .split_once(['x', 'X'])
            .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got '{}'", parts[2]))?;

        Ok(Self {
            pad: parse_number(parts[0])?,
            which: parse_number(parts[1])?,
            width: parse_number(width)?,
            height: parse_number(height)?,
            code: parts.get(3).map(|code| parse_number(code)).transpose()?,
        })
    }
}

#[derive(Debug, Serialize)]
struct PadReport {
    pad: u32,
    role: PadRole,
    active: FormatSlot,
    trial: FormatSlot,
}

#[derive(Debug, Serialize)]
struct ProbeReport<'a> {
    name: &'a str,
    topology: &'a Topology,
    pads: Vec<PadReport>,
}

fn apply(device: &SwFormatConverter, request: &FormatRequest) -> Result<FormatSlot> {
    let code = match request.code {
        Some(code) => code,
        None => device.get_format(request.pad, request.which)?.media_code,
    };
    let proposed = FormatSlot::proposal(code, request.width, request.height);
    Ok(device.set_format(request.pad, request.which, &proposed)?)
}

pub fn run(path: &Path, name: &str, requests: &[FormatRequest], json: bool) -> Result<()> {
    let source = YamlTopologySource::from_file(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let resources = Arc::new(SimulatedResources::default());
    let framework = Arc::new(SimulatedFramework::default());
    let mut device = SwFormatConverter::probe(name, &source, resources.clone(), framework.clone())
        .with_context(|| format!("Probe of '{}' failed", name))?;

    device.on_session_open()?;
    for request in requests {
        match apply(&device, request) {
            Ok(stored) => tracing::info!("pad {} which {} set to {}", request.pad, request.which, stored),
            Err(err) => tracing::warn!("Rejected {:?}: {:#}", request, err),
        }
    }
    device.log_status();

    let pads = PadRole::ALL
        .into_iter()
        .zip(device.store().snapshot())
        .map(|(role, state)| PadReport {
            pad: role.index(),
            role,
            active: state.active,
            trial: state.trial,
        })
        .collect();
    let report = ProbeReport {
        name: device.name(),
        topology: device.topology(),
        pads,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        super::validate::print_topology(report.topology);
        println!();
        for pad in &report.pads {
            println!("  pad {} ({:?})", pad.pad, pad.role);
            println!("    active: {}", pad.active);
            println!("    trial:  {}", pad.trial);
        }
    }

    device.teardown();
    if resources.outstanding() != 0 || !framework.registered().is_empty() {
        bail!("teardown of '{}' left resources behind", name);
    }

    Ok(())
}
