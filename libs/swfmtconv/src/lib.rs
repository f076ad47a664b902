// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Pad-format negotiation and topology validation for the Xilinx SW format
//! converter subdevice.
//!
//! This crate provides:
//! - The CSI-2 pixel format catalog and data-type classification
//! - Construction-time validation of the declared ports and endpoints
//! - Per-pad active/trial format storage behind a single lock
//! - Device bring-up and teardown against pluggable resource and framework
//!   collaborators
//!
//! # Example
//!
//! ```
//! use swfmtconv::{TopologyValidator, YamlTopologySource};
//!
//! let yaml = r#"
//! pixel-format: RGB888
//! ports:
//!   - video-format: rbg
//!     video-width: 8
//!     endpoint:
//!       data-lanes: [1, 2]
//!   - video-format: rbg
//!     video-width: 8
//!     endpoint:
//!       data-lanes: [1, 2]
//! "#;
//!
//! let source = YamlTopologySource::from_yaml_str(yaml).unwrap();
//! let topology = TopologyValidator::validate(&source).unwrap();
//! assert_eq!(topology.datatype().raw(), 0x24);
//! ```

pub mod catalog;
pub mod config;
pub mod datatype;
pub mod device;
pub mod error;
pub mod format;
pub mod framework;
pub mod resources;
pub mod store;
pub mod topology;
pub mod video_format;

pub use catalog::{PixelFormatCatalog, PixelFormatEntry};
pub use config::DeviceConfig;
pub use datatype::{DataTypeCategory, DataTypeCode};
pub use device::SwFormatConverter;
pub use error::{Result, SwConvError};
pub use format::{Colorspace, FieldOrder, FormatSlot, PadRole, SlotKind};
pub use framework::{MediaFramework, Registration};
pub use resources::{AcquiredResources, ResourceHandle, ResourceKind, ResourceProvider};
pub use store::{FormatStateStore, PadFormatState};
pub use topology::{Topology, TopologySource, TopologyValidator, YamlTopologySource};
pub use video_format::{CfaPattern, VideoFormat, VideoFormatClass};
