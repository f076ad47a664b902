// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! In-process stand-ins for the platform resources and media framework.
//!
//! They accept every request and log it, so a probe can be run anywhere.

use parking_lot::Mutex;
use swfmtconv::{
    MediaFramework, Registration, ResourceHandle, ResourceKind, ResourceProvider, Result,
};

#[derive(Default)]
pub struct SimulatedResources {
    next_id: Mutex<u64>,
    outstanding: Mutex<Vec<ResourceHandle>>,
}

impl SimulatedResources {
    pub fn outstanding(&self) -> usize {
        self.outstanding.lock().len()
    }
}

impl ResourceProvider for SimulatedResources {
    fn acquire(&self, kind: ResourceKind) -> Result<ResourceHandle> {
        let mut next_id = self.next_id.lock();
        *next_id += 1;
        let handle = ResourceHandle { kind, id: *next_id };
        self.outstanding.lock().push(handle);
        tracing::info!("[sim] acquire {} -> #{}", kind, handle.id);
        Ok(handle)
    }

    fn release(&self, handle: ResourceHandle) {
        let mut outstanding = self.outstanding.lock();
        match outstanding.iter().position(|h| *h == handle) {
            Some(index) => {
                outstanding.remove(index);
                tracing::info!("[sim] release {} #{}", handle.kind, handle.id);
            }
            None => tracing::warn!("[sim] release of unknown {} #{}", handle.kind, handle.id),
        }
    }
}

#[derive(Default)]
pub struct SimulatedFramework {
    registered: Mutex<Vec<String>>,
}

impl SimulatedFramework {
    pub fn registered(&self) -> Vec<String> {
        self.registered.lock().clone()
    }
}

impl MediaFramework for SimulatedFramework {
    fn register(&self, registration: &Registration) -> Result<()> {
        tracing::info!(
            "[sim] register '{}' pads={:?}",
            registration.name,
            registration.pads
        );
        self.registered.lock().push(registration.name.clone());
        Ok(())
    }

    fn unregister(&self, name: &str) {
        tracing::info!("[sim] unregister '{}'", name);
        self.registered.lock().retain(|n| n != name);
    }
}
