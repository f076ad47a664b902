// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Publication to the surrounding media framework.

use serde::Serialize;

use crate::error::Result;
use crate::format::{PAD_COUNT, PadRole};

/// What the framework learns about a device when it is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    /// Pad roles by pad index.
    pub pads: [PadRole; PAD_COUNT],
}

impl Registration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pads: PadRole::ALL,
        }
    }
}

/// The media framework a converter is published into.
pub trait MediaFramework: Send + Sync {
    /// Failures should be reported as `RegistrationFailure`.
    fn register(&self, registration: &Registration) -> Result<()>;

    fn unregister(&self, name: &str);
}
