// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Error types for format negotiation and device bring-up.

use thiserror::Error;

/// Errors that can occur while validating, constructing, or driving a converter.
#[derive(Debug, Error)]
pub enum SwConvError {
    /// Pixel format name has no entry in the catalog.
    #[error("unknown pixel format '{name}'")]
    InvalidFormatString { name: String },

    /// Configuration value is out of range or unresolvable.
    #[error("invalid configuration '{property}': {reason}")]
    InvalidConfig { property: String, reason: String },

    /// Required configuration property is absent.
    #[error("missing required property '{property}'")]
    MissingProperty { property: String },

    /// Declared topology does not have exactly one sink and one source port.
    #[error("invalid number of ports {count}, expected 2")]
    InvalidTopology { count: usize },

    /// Video-format class cannot be carried through the video-format bridge.
    #[error("port {port}: video format class '{class}' is not supported with the video format bridge enabled")]
    InvalidVideoFormatClass { port: usize, class: String },

    /// Port declares a video format with no media-bus mapping.
    #[error("port {port}: unknown video format: {reason}")]
    UnknownVideoFormat { port: usize, reason: String },

    /// Port declares no endpoint.
    #[error("port {port} has no endpoint")]
    MissingEndpoint { port: usize },

    /// Endpoint bus parameters are malformed.
    #[error("port {port}: invalid endpoint: {reason}")]
    InvalidEndpoint { port: usize, reason: String },

    /// Pad index is not one of the two device pads.
    #[error("invalid pad {pad}")]
    InvalidPad { pad: u32 },

    /// Slot selector is neither trial nor active.
    #[error("invalid format slot selector {which}")]
    InvalidSlot { which: u32 },

    /// External resource (clock, reset line) could not be acquired.
    #[error("failed to acquire {resource}: {reason}")]
    ResourceAcquisitionFailure { resource: String, reason: String },

    /// Surrounding media framework rejected the device.
    #[error("failed to register device '{name}': {reason}")]
    RegistrationFailure { name: String, reason: String },

    /// Failed to parse a YAML device description.
    #[error("failed to parse device description YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Device description file not found.
    #[error("device description not found: {path}")]
    FileNotFound { path: String },

    /// Failed to read a device description file.
    #[error("failed to read device description: {0}")]
    Io(#[from] std::io::Error),
}

impl SwConvError {
    pub(crate) fn invalid_config(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is a recoverable runtime rejection rather than a
    /// bring-up failure.
    pub fn is_runtime(&self) -> bool {
        matches!(self, Self::InvalidPad { .. } | Self::InvalidSlot { .. })
    }
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, SwConvError>;
