// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! External resources (clocks, reset line) held for the device's lifetime.
//!
//! The resources themselves are opaque. [`AcquiredResources`] only tracks
//! what was handed out so everything is released exactly once, newest first.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// Kinds of resource a converter holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// AXI4-Lite interface clock.
    AxiLiteClock,
    /// Video stream clock.
    VideoClock,
    /// Active-low video reset line.
    ResetLine,
}

impl ResourceKind {
    /// Acquisition order at construction.
    pub const CONSTRUCTION_ORDER: [ResourceKind; 3] = [
        ResourceKind::AxiLiteClock,
        ResourceKind::VideoClock,
        ResourceKind::ResetLine,
    ];

    /// Name the resource is requested under.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AxiLiteClock => "s_axi_lite_aclk",
            Self::VideoClock => "video_aclk",
            Self::ResetLine => "video_aresetn",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque token for one acquired resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    pub kind: ResourceKind,
    pub id: u64,
}

/// Hands out and takes back external resources.
///
/// Implementations must tolerate being called from whichever thread owns the
/// device.
pub trait ResourceProvider: Send + Sync {
    /// Failures should be reported as `ResourceAcquisitionFailure`.
    fn acquire(&self, kind: ResourceKind) -> Result<ResourceHandle>;

    fn release(&self, handle: ResourceHandle);
}

/// Scoped ownership of acquired resources.
///
/// Dropping the guard releases whatever is still held, in reverse
/// acquisition order.
pub struct AcquiredResources {
    provider: Arc<dyn ResourceProvider>,
    held: Vec<ResourceHandle>,
}

impl AcquiredResources {
    pub fn new(provider: Arc<dyn ResourceProvider>) -> Self {
        Self {
            provider,
            held: Vec::new(),
        }
    }

    /// Acquire `kinds` in order. On the first failure everything acquired so
    /// far is released and the failure is returned.
    pub fn acquire_all(provider: Arc<dyn ResourceProvider>, kinds: &[ResourceKind]) -> Result<Self> {
        let mut resources = Self::new(provider);
        for kind in kinds {
            resources.acquire(*kind)?;
        }
        Ok(resources)
    }

    pub fn acquire(&mut self, kind: ResourceKind) -> Result<ResourceHandle> {
        match self.provider.acquire(kind) {
            Ok(handle) => {
                tracing::debug!("Acquired {} (id={})", kind, handle.id);
                self.held.push(handle);
                Ok(handle)
            }
            Err(err) => {
                tracing::error!("Failed to acquire {}: {}", kind, err);
                Err(err)
            }
        }
    }

    /// Release everything still held, newest first. Calling this again is a
    /// no-op.
    pub fn release_all(&mut self) {
        while let Some(handle) = self.held.pop() {
            tracing::debug!("Releasing {} (id={})", handle.kind, handle.id);
            self.provider.release(handle);
        }
    }

    pub fn held(&self) -> &[ResourceHandle] {
        &self.held
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl Drop for AcquiredResources {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl fmt::Debug for AcquiredResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcquiredResources")
            .field("held", &self.held)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwConvError;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        next_id: Mutex<u64>,
        released: Mutex<Vec<ResourceHandle>>,
        fail_on: Option<ResourceKind>,
    }

    impl ResourceProvider for Recorder {
        fn acquire(&self, kind: ResourceKind) -> Result<ResourceHandle> {
            if self.fail_on == Some(kind) {
                return Err(SwConvError::ResourceAcquisitionFailure {
                    resource: kind.to_string(),
                    reason: "not wired".to_string(),
                });
            }
            let mut next_id = self.next_id.lock();
            *next_id += 1;
            Ok(ResourceHandle { kind, id: *next_id })
        }

        fn release(&self, handle: ResourceHandle) {
            self.released.lock().push(handle);
        }
    }

    #[test]
    fn test_release_in_reverse_order() {
        let recorder = Arc::new(Recorder::default());
        let mut resources =
            AcquiredResources::acquire_all(recorder.clone(), &ResourceKind::CONSTRUCTION_ORDER)
                .unwrap();
        assert_eq!(resources.held().len(), 3);

        resources.release_all();
        let kinds: Vec<_> = recorder.released.lock().iter().map(|h| h.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ResourceKind::ResetLine,
                ResourceKind::VideoClock,
                ResourceKind::AxiLiteClock
            ]
        );
    }

    #[test]
    fn test_release_all_is_idempotent() {
        let recorder = Arc::new(Recorder::default());
        let mut resources =
            AcquiredResources::acquire_all(recorder.clone(), &ResourceKind::CONSTRUCTION_ORDER)
                .unwrap();
        resources.release_all();
        resources.release_all();
        drop(resources);
        assert_eq!(recorder.released.lock().len(), 3);
    }

    #[test]
    fn test_partial_failure_unwinds() {
        let recorder = Arc::new(Recorder {
            fail_on: Some(ResourceKind::ResetLine),
            ..Default::default()
        });
        let result =
            AcquiredResources::acquire_all(recorder.clone(), &ResourceKind::CONSTRUCTION_ORDER);
        assert!(matches!(
            result,
            Err(SwConvError::ResourceAcquisitionFailure { ref resource, .. }) if resource == "video_aresetn"
        ));

        let kinds: Vec<_> = recorder.released.lock().iter().map(|h| h.kind).collect();
        assert_eq!(kinds, vec![ResourceKind::VideoClock, ResourceKind::AxiLiteClock]);
    }
}
