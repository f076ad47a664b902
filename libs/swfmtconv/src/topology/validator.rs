// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Construction-time validation of the declared topology and pixel format.

use crate::catalog::PixelFormatCatalog;
use crate::config::{self, DeviceConfig, property};
use crate::datatype::DataTypeCode;
use crate::error::{Result, SwConvError};
use crate::format::{PAD_COUNT, PadRole};
use crate::video_format::{CfaPattern, VideoFormat, VideoFormatClass};

use super::{
    BusType, EndpointDeclaration, EndpointDescriptor, PortDescriptor, PortFormatDeclaration,
    Topology, TopologySource,
};

/// Stateless validator over a [`TopologySource`].
pub struct TopologyValidator;

impl TopologyValidator {
    /// Validate everything the device needs before it can be constructed.
    pub fn validate<S: TopologySource>(source: &S) -> Result<Topology> {
        let config = Self::parse_device_config(source)?;
        let ports = Self::parse_ports(source, &config)?;

        tracing::debug!(
            "Validated topology: datatype={} bridge={} lanes={} vc={}",
            config.pixel_format,
            config.video_format_bridge,
            config.lane_count,
            config.virtual_channel
        );

        Ok(Topology { ports, config })
    }

    /// Resolve the configured pixel format name to a payload data type.
    ///
    /// Unknown names and codes outside the pixel payload range both fail
    /// with `InvalidConfig`.
    pub fn parse_pixel_format_selection(name: &str) -> Result<DataTypeCode> {
        let code = PixelFormatCatalog::lookup_code_by_name(name).map_err(|err| {
            tracing::error!("Invalid {} string: {}", property::PIXEL_FORMAT, err);
            SwConvError::invalid_config(property::PIXEL_FORMAT, err.to_string())
        })?;
        Self::ensure_payload(code)
    }

    /// Reject sync, generic, user, and reserved codes.
    pub fn ensure_payload(code: DataTypeCode) -> Result<DataTypeCode> {
        if code.is_payload() {
            Ok(code)
        } else {
            Err(SwConvError::invalid_config(
                property::PIXEL_FORMAT,
                format!(
                    "data type {} is not a pixel payload ({}..={})",
                    code,
                    DataTypeCode::PAYLOAD_FIRST,
                    DataTypeCode::PAYLOAD_LAST
                ),
            ))
        }
    }

    pub fn parse_device_config<S: TopologySource>(source: &S) -> Result<DeviceConfig> {
        let name = source.read_string(property::PIXEL_FORMAT).ok_or_else(|| {
            tracing::error!("Missing {} property", property::PIXEL_FORMAT);
            SwConvError::MissingProperty {
                property: property::PIXEL_FORMAT.to_string(),
            }
        })?;
        let pixel_format = Self::parse_pixel_format_selection(&name)?;

        let config = DeviceConfig {
            pixel_format,
            video_format_bridge: source.read_bool(property::VIDEO_FORMAT_BRIDGE),
            lane_count: source
                .read_u32(property::MAX_LANES)
                .unwrap_or(config::DEFAULT_MAX_LANES),
            virtual_channel: source
                .read_u32(property::VIRTUAL_CHANNEL)
                .unwrap_or(config::DEFAULT_VIRTUAL_CHANNEL),
            active_lanes_configurable: source.read_bool(property::ACTIVE_LANES_CONFIGURABLE),
            axis_width: source
                .read_u32(property::AXIS_TDATA_WIDTH)
                .unwrap_or(config::DEFAULT_AXIS_TDATA_WIDTH),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse exactly one source and one sink port. Port `n` becomes pad `n`.
    pub fn parse_ports<S: TopologySource>(
        source: &S,
        config: &DeviceConfig,
    ) -> Result<[PortDescriptor; PAD_COUNT]> {
        let ports = source.read_child_ports();
        if ports.len() != PAD_COUNT {
            tracing::error!("Invalid number of ports {}", ports.len());
            return Err(SwConvError::InvalidTopology { count: ports.len() });
        }

        let mut parsed = Vec::with_capacity(PAD_COUNT);
        for (index, port) in ports.iter().enumerate() {
            let video_format = Self::parse_port_format(
                index,
                &source.read_port_format(port),
                config.video_format_bridge,
            )?;
            let endpoint = Self::parse_endpoint(index, source.read_endpoint(port), config)?;

            tracing::debug!(
                "Port {}: format={} width={} code=0x{:04x} bus={} lanes={}",
                index,
                video_format.class,
                video_format.width,
                video_format.media_code,
                endpoint.bus_type,
                endpoint.lane_count
            );

            parsed.push(PortDescriptor {
                role: PadRole::ALL[index],
                video_format,
                endpoint,
            });
        }

        parsed
            .try_into()
            .map_err(|ports: Vec<_>| SwConvError::InvalidTopology { count: ports.len() })
    }

    /// Resolve a port's declared class, width, and pattern.
    ///
    /// With the video-format bridge enabled only bridge-compatible classes
    /// pass. With it disabled the payload is opaque bytes and any known class
    /// is accepted.
    pub fn parse_port_format(
        port: usize,
        declaration: &PortFormatDeclaration,
        bridge_enabled: bool,
    ) -> Result<VideoFormat> {
        let unknown = |reason: String| SwConvError::UnknownVideoFormat { port, reason };

        let raw_class = declaration
            .video_format
            .as_deref()
            .ok_or_else(|| unknown("no video-format declared".to_string()))?;
        let class = VideoFormatClass::parse(raw_class)
            .ok_or_else(|| unknown(format!("unrecognized class '{}'", raw_class)))?;

        if bridge_enabled && !class.is_bridge_compatible() {
            tracing::error!("Port {}: video format class {} not supported by the bridge", port, class);
            return Err(SwConvError::InvalidVideoFormatClass {
                port,
                class: class.to_string(),
            });
        }

        let width = declaration
            .video_width
            .ok_or_else(|| unknown("no video-width declared".to_string()))?;

        let pattern = match declaration.cfa_pattern.as_deref() {
            Some(name) => Some(
                CfaPattern::from_name(name)
                    .ok_or_else(|| unknown(format!("unrecognized cfa-pattern '{}'", name)))?,
            ),
            None => None,
        };

        VideoFormat::lookup(class, width, pattern).ok_or_else(|| {
            unknown(match (class, pattern) {
                (VideoFormatClass::MonoSensor, None) => {
                    format!("{} requires a cfa-pattern", class)
                }
                _ => format!("no {}-bit {} format", width, class),
            })
        })
    }

    /// Parse the bus parameters of a port's endpoint.
    pub fn parse_endpoint(
        port: usize,
        declaration: Option<EndpointDeclaration>,
        config: &DeviceConfig,
    ) -> Result<EndpointDescriptor> {
        let Some(declaration) = declaration else {
            tracing::error!("No endpoint at port {}", port);
            return Err(SwConvError::MissingEndpoint { port });
        };
        let invalid = |reason: String| SwConvError::InvalidEndpoint { port, reason };

        let bus_type = match declaration.bus_type.as_deref() {
            Some(name) => BusType::from_name(name)
                .ok_or_else(|| invalid(format!("unknown bus type '{}'", name)))?,
            None => BusType::default(),
        };

        let lanes = &declaration.data_lanes;
        for (i, lane) in lanes.iter().enumerate() {
            if lanes[..i].contains(lane) {
                return Err(invalid(format!("data lane {} listed twice", lane)));
            }
        }

        let lane_count = lanes.len() as u32;
        if bus_type.is_csi2() {
            if lane_count == 0 {
                return Err(invalid(format!("{} endpoint lists no data lanes", bus_type)));
            }
            if lane_count > config.lane_count {
                return Err(invalid(format!(
                    "{} data lanes exceed max-lanes {}",
                    lane_count, config.lane_count
                )));
            }
        }

        Ok(EndpointDescriptor {
            bus_type,
            lane_count,
        })
    }
}
