// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! YAML device descriptions.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::property;
use crate::error::{Result, SwConvError};

use super::{EndpointDeclaration, PortFormatDeclaration, TopologySource};

/// A video-format class given either by name or by numeric code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassValue {
    Code(u32),
    Name(String),
}

impl ClassValue {
    fn to_declared(&self) -> String {
        match self {
            Self::Code(code) => code.to_string(),
            Self::Name(name) => name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EndpointDescription {
    #[serde(default)]
    pub bus_type: Option<String>,
    #[serde(default)]
    pub data_lanes: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PortDescription {
    #[serde(default)]
    pub video_format: Option<ClassValue>,
    #[serde(default)]
    pub video_width: Option<u32>,
    #[serde(default)]
    pub cfa_pattern: Option<String>,
    #[serde(default)]
    pub endpoint: Option<EndpointDescription>,
}

/// Top-level device description document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeviceDescription {
    #[serde(default)]
    pub pixel_format: Option<String>,
    #[serde(default)]
    pub video_format_bridge: bool,
    #[serde(default)]
    pub max_lanes: Option<u32>,
    #[serde(default)]
    pub virtual_channel: Option<u32>,
    #[serde(default)]
    pub active_lanes_configurable: bool,
    #[serde(default)]
    pub axis_tdata_width: Option<u32>,
    #[serde(default)]
    pub ports: Vec<PortDescription>,
}

/// [`TopologySource`] backed by a parsed [`DeviceDescription`].
#[derive(Debug, Clone)]
pub struct YamlTopologySource {
    description: DeviceDescription,
}

impl YamlTopologySource {
    pub fn new(description: DeviceDescription) -> Self {
        Self { description }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let description: DeviceDescription = serde_yaml::from_str(yaml)?;
        Ok(Self::new(description))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SwConvError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                SwConvError::Io(e)
            }
        })?;

        Self::from_yaml_str(&yaml)
    }

    pub fn description(&self) -> &DeviceDescription {
        &self.description
    }
}

impl TopologySource for YamlTopologySource {
    type Port = PortDescription;

    fn read_string(&self, name: &str) -> Option<String> {
        match name {
            property::PIXEL_FORMAT => self.description.pixel_format.clone(),
            _ => None,
        }
    }

    fn read_u32(&self, name: &str) -> Option<u32> {
        match name {
            property::MAX_LANES => self.description.max_lanes,
            property::VIRTUAL_CHANNEL => self.description.virtual_channel,
            property::AXIS_TDATA_WIDTH => self.description.axis_tdata_width,
            _ => None,
        }
    }

    fn read_bool(&self, name: &str) -> bool {
        match name {
            property::VIDEO_FORMAT_BRIDGE => self.description.video_format_bridge,
            property::ACTIVE_LANES_CONFIGURABLE => self.description.active_lanes_configurable,
            _ => false,
        }
    }

    fn read_child_ports(&self) -> Vec<PortDescription> {
        self.description.ports.clone()
    }

    fn read_port_format(&self, port: &PortDescription) -> PortFormatDeclaration {
        PortFormatDeclaration {
            video_format: port.video_format.as_ref().map(ClassValue::to_declared),
            video_width: port.video_width,
            cfa_pattern: port.cfa_pattern.clone(),
        }
    }

    fn read_endpoint(&self, port: &PortDescription) -> Option<EndpointDeclaration> {
        port.endpoint.as_ref().map(|endpoint| EndpointDeclaration {
            bus_type: endpoint.bus_type.clone(),
            data_lanes: endpoint.data_lanes.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DESCRIPTION: &str = r#"
pixel-format: RAW10
video-format-bridge: true
max-lanes: 2
virtual-channel: 3
axis-tdata-width: 64
ports:
  - video-format: 12
    video-width: 10
    cfa-pattern: rggb
    endpoint:
      bus-type: csi2-dphy
      data-lanes: [1, 2]
  - video-format: mono-sensor
    video-width: 10
    cfa-pattern: rggb
"#;

    #[test]
    fn test_properties() {
        let source = YamlTopologySource::from_yaml_str(DESCRIPTION).unwrap();
        assert_eq!(source.read_string(property::PIXEL_FORMAT).as_deref(), Some("RAW10"));
        assert!(source.read_bool(property::VIDEO_FORMAT_BRIDGE));
        assert!(!source.read_bool(property::ACTIVE_LANES_CONFIGURABLE));
        assert_eq!(source.read_u32(property::MAX_LANES), Some(2));
        assert_eq!(source.read_u32(property::VIRTUAL_CHANNEL), Some(3));
        assert_eq!(source.read_u32(property::AXIS_TDATA_WIDTH), Some(64));
        assert_eq!(source.read_u32("unknown"), None);
    }

    #[test]
    fn test_ports_and_endpoints() {
        let source = YamlTopologySource::from_yaml_str(DESCRIPTION).unwrap();
        let ports = source.read_child_ports();
        assert_eq!(ports.len(), 2);

        let format = source.read_port_format(&ports[0]);
        assert_eq!(format.video_format.as_deref(), Some("12"));
        assert_eq!(format.cfa_pattern.as_deref(), Some("rggb"));

        let endpoint = source.read_endpoint(&ports[0]).unwrap();
        assert_eq!(endpoint.data_lanes, vec![1, 2]);
        assert!(source.read_endpoint(&ports[1]).is_none());
    }

    #[test]
    fn test_malformed_yaml() {
        let result = YamlTopologySource::from_yaml_str("ports: {not: [a list");
        assert!(matches!(result, Err(SwConvError::Parse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DESCRIPTION.as_bytes()).unwrap();

        let source = YamlTopologySource::from_file(file.path()).unwrap();
        assert_eq!(source.description().ports.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let result = YamlTopologySource::from_file(Path::new("/nonexistent/device.yaml"));
        assert!(matches!(result, Err(SwConvError::FileNotFound { .. })));
    }
}
