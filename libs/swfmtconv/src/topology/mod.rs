// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Declared port/endpoint topology.
//!
//! Validation never talks to a configuration backend directly. It reads
//! through [`TopologySource`], which a YAML description, a devicetree walker,
//! or a test fixture can implement.

mod validator;
mod yaml;

pub use validator::TopologyValidator;
pub use yaml::{
    ClassValue, DeviceDescription, EndpointDescription, PortDescription, YamlTopologySource,
};

use serde::Serialize;
use std::fmt;

use crate::config::DeviceConfig;
use crate::datatype::DataTypeCode;
use crate::format::{PAD_COUNT, PadRole};
use crate::video_format::VideoFormat;

/// Raw video-format properties declared on a port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortFormatDeclaration {
    /// Class name or numeric class code.
    pub video_format: Option<String>,
    /// Bits per component.
    pub video_width: Option<u32>,
    pub cfa_pattern: Option<String>,
}

/// Raw bus properties declared on a port's endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointDeclaration {
    pub bus_type: Option<String>,
    pub data_lanes: Vec<u32>,
}

/// Read-only capability interface over a hierarchical device configuration.
pub trait TopologySource {
    /// Handle to one declared port.
    type Port;

    /// Device-level string property.
    fn read_string(&self, property: &str) -> Option<String>;

    /// Device-level integer property.
    fn read_u32(&self, property: &str) -> Option<u32>;

    /// Device-level flag. Absent means `false`.
    fn read_bool(&self, property: &str) -> bool;

    /// Declared ports, in declaration order.
    fn read_child_ports(&self) -> Vec<Self::Port>;

    fn read_port_format(&self, port: &Self::Port) -> PortFormatDeclaration;

    /// First endpoint of `port`, if it declares one.
    fn read_endpoint(&self, port: &Self::Port) -> Option<EndpointDeclaration>;
}

/// Physical bus an endpoint is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusType {
    #[default]
    Csi2Dphy,
    Csi2Cphy,
    Parallel,
    Bt656,
}

impl BusType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "csi2-dphy" => Some(Self::Csi2Dphy),
            "csi2-cphy" => Some(Self::Csi2Cphy),
            "parallel" => Some(Self::Parallel),
            "bt656" => Some(Self::Bt656),
            _ => None,
        }
    }

    pub const fn is_csi2(self) -> bool {
        matches!(self, Self::Csi2Dphy | Self::Csi2Cphy)
    }
}

impl fmt::Display for BusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csi2Dphy => "csi2-dphy",
            Self::Csi2Cphy => "csi2-cphy",
            Self::Parallel => "parallel",
            Self::Bt656 => "bt656",
        };
        f.write_str(name)
    }
}

/// Parsed endpoint bus parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndpointDescriptor {
    pub bus_type: BusType,
    pub lane_count: u32,
}

/// One validated port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortDescriptor {
    pub role: PadRole,
    pub video_format: VideoFormat,
    pub endpoint: EndpointDescriptor,
}

/// Validated device topology: both ports plus the device configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Topology {
    pub ports: [PortDescriptor; PAD_COUNT],
    pub config: DeviceConfig,
}

impl Topology {
    /// Data type passed by the hardware filter.
    pub fn datatype(&self) -> DataTypeCode {
        self.config.pixel_format
    }

    pub fn port(&self, role: PadRole) -> &PortDescriptor {
        &self.ports[role.index() as usize]
    }

    /// Media-bus code seeding the default pad format: the code of the last
    /// declared port.
    pub fn default_media_code(&self) -> u32 {
        self.ports[PAD_COUNT - 1].video_format.media_code
    }
}
