// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Device bring-up, runtime pad-format operations, and teardown.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::format::{FormatSlot, PadRole, SlotKind};
use crate::framework::{MediaFramework, Registration};
use crate::resources::{AcquiredResources, ResourceKind, ResourceProvider};
use crate::store::FormatStateStore;
use crate::topology::{Topology, TopologySource, TopologyValidator};

/// A constructed SW format converter.
///
/// Construction is all-or-nothing: a value of this type only exists once
/// resources are held, the topology is valid, both pads carry defaults, and
/// the framework accepted the device.
pub struct SwFormatConverter {
    name: String,
    topology: Topology,
    store: FormatStateStore,
    resources: AcquiredResources,
    framework: Arc<dyn MediaFramework>,
    published: bool,
}

impl SwFormatConverter {
    /// Bring up a converter described by `source`.
    ///
    /// Resources are acquired first, then the topology is validated, the
    /// pads are seeded with the canonical format, and the device is
    /// registered. If any step fails, everything acquired so far is released
    /// newest-first and the originating error is returned.
    pub fn probe<S: TopologySource>(
        name: impl Into<String>,
        source: &S,
        resources: Arc<dyn ResourceProvider>,
        framework: Arc<dyn MediaFramework>,
    ) -> Result<Self> {
        let name = name.into();
        tracing::debug!("[{}] Probing", name);

        let resources =
            AcquiredResources::acquire_all(resources, &ResourceKind::CONSTRUCTION_ORDER)
                .inspect_err(|err| tracing::error!("[{}] Resource setup failed: {}", name, err))?;

        // `resources` drops on every early return below, which releases them.
        let topology = TopologyValidator::validate(source)
            .inspect_err(|err| tracing::error!("[{}] Invalid topology: {}", name, err))?;

        let template = FormatSlot::canonical(topology.default_media_code());
        let store = FormatStateStore::new(template);
        store.initialize_defaults(template);

        framework
            .register(&Registration::new(name.clone()))
            .inspect_err(|err| tracing::error!("[{}] Registration failed: {}", name, err))?;

        tracing::info!(
            "[{}] Xilinx SW format converter probed: datatype={} default={}",
            name,
            topology.datatype(),
            template
        );

        Ok(Self {
            name,
            topology,
            store,
            resources,
            framework,
            published: true,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn store(&self) -> &FormatStateStore {
        &self.store
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    /// Current format of `pad` in slot `which` (0 = trial, 1 = active).
    pub fn get_format(&self, pad: u32, which: u32) -> Result<FormatSlot> {
        let slot = SlotKind::from_which(which)
            .and_then(|kind| self.store.get(pad, kind))
            .inspect_err(|err| tracing::warn!("[{}] get_format rejected: {}", self.name, err))?;
        tracing::trace!("[{}] pad {} which {} -> {}", self.name, pad, which, slot);
        Ok(slot)
    }

    /// Store `proposed` into slot `which` of `pad` and return what was
    /// stored.
    pub fn set_format(&self, pad: u32, which: u32, proposed: &FormatSlot) -> Result<FormatSlot> {
        let stored = SlotKind::from_which(which)
            .and_then(|kind| self.store.set(pad, kind, proposed))
            .inspect_err(|err| tracing::warn!("[{}] set_format rejected: {}", self.name, err))?;
        tracing::trace!("[{}] pad {} which {} <- {}", self.name, pad, which, stored);
        Ok(stored)
    }

    /// A client opened the device: both trial slots go back to the default.
    pub fn on_session_open(&self) -> Result<()> {
        for role in PadRole::ALL {
            self.store.reset_trial(role.index())?;
        }
        Ok(())
    }

    /// Nothing to commit. Every `set_format` already took effect.
    pub fn on_session_close(&self) {}

    pub fn on_stream_enable(&self, enable: bool) -> Result<()> {
        tracing::debug!("[{}] Stream {}", self.name, if enable { "on" } else { "off" });
        Ok(())
    }

    pub fn log_status(&self) {
        for (role, state) in PadRole::ALL.into_iter().zip(self.store.snapshot()) {
            tracing::info!("[{}] {:?} pad: {}", self.name, role, state.active);
        }
    }

    /// Unregister the device and release its resources. A second call does
    /// nothing.
    pub fn teardown(&mut self) {
        if self.published {
            self.framework.unregister(&self.name);
            self.published = false;
            tracing::debug!("[{}] Unregistered", self.name);
        }
        self.resources.release_all();
    }
}

impl Drop for SwFormatConverter {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for SwFormatConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwFormatConverter")
            .field("name", &self.name)
            .field("topology", &self.topology)
            .field("store", &self.store)
            .field("resources", &self.resources)
            .field("published", &self.published)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwConvError;
    use crate::format::{Colorspace, DEFAULT_HEIGHT, DEFAULT_WIDTH, FieldOrder};
    use crate::resources::ResourceHandle;
    use crate::topology::YamlTopologySource;
    use crate::video_format::bus;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Pool {
        next: Mutex<u64>,
        outstanding: Mutex<Vec<ResourceHandle>>,
    }

    impl ResourceProvider for Pool {
        fn acquire(&self, kind: ResourceKind) -> Result<ResourceHandle> {
            let mut next = self.next.lock();
            *next += 1;
            let handle = ResourceHandle { kind, id: *next };
            self.outstanding.lock().push(handle);
            Ok(handle)
        }

        fn release(&self, handle: ResourceHandle) {
            self.outstanding.lock().retain(|h| *h != handle);
        }
    }

    #[derive(Default)]
    struct Registry {
        names: Mutex<Vec<String>>,
    }

    impl MediaFramework for Registry {
        fn register(&self, registration: &Registration) -> Result<()> {
            self.names.lock().push(registration.name.clone());
            Ok(())
        }

        fn unregister(&self, name: &str) {
            self.names.lock().retain(|n| n != name);
        }
    }

    const RGB888: &str = r#"
pixel-format: RGB888
ports:
  - video-format: rbg
    video-width: 8
    endpoint:
      data-lanes: [1, 2, 3, 4]
  - video-format: rbg
    video-width: 8
    endpoint:
      data-lanes: [1, 2, 3, 4]
"#;

    fn probe_rgb888() -> (SwFormatConverter, Arc<Pool>, Arc<Registry>) {
        let pool = Arc::new(Pool::default());
        let registry = Arc::new(Registry::default());
        let source = YamlTopologySource::from_yaml_str(RGB888).unwrap();
        let device =
            SwFormatConverter::probe("swconv0", &source, pool.clone(), registry.clone()).unwrap();
        (device, pool, registry)
    }

    #[test]
    fn test_probe_seeds_defaults() {
        let (device, pool, registry) = probe_rgb888();
        assert!(device.is_published());
        assert_eq!(pool.outstanding.lock().len(), 3);
        assert_eq!(registry.names.lock().as_slice(), ["swconv0"]);

        for pad in 0..2 {
            for which in 0..2 {
                let slot = device.get_format(pad, which).unwrap();
                assert_eq!(slot.width, DEFAULT_WIDTH);
                assert_eq!(slot.height, DEFAULT_HEIGHT);
                assert_eq!(slot.field, FieldOrder::Progressive);
                assert_eq!(slot.colorspace, Colorspace::Srgb);
                assert_eq!(slot.media_code, bus::RBG888_1X24);
            }
        }
    }

    #[test]
    fn test_set_then_session_open() {
        let (device, _pool, _registry) = probe_rgb888();
        let proposed = FormatSlot::proposal(bus::RBG888_1X24, 1280, 720);

        let stored = device.set_format(0, 0, &proposed).unwrap();
        assert_eq!(stored, proposed);
        device.set_format(1, 1, &proposed).unwrap();

        device.on_session_open().unwrap();
        assert_eq!(device.get_format(0, 0).unwrap().width, DEFAULT_WIDTH);
        // Active slots survive a new session.
        assert_eq!(device.get_format(1, 1).unwrap().width, 1280);
    }

    #[test]
    fn test_bad_selectors_leave_device_usable() {
        let (device, _pool, _registry) = probe_rgb888();
        assert!(matches!(
            device.get_format(2, 1),
            Err(SwConvError::InvalidPad { pad: 2 })
        ));
        assert!(matches!(
            device.set_format(0, 7, &FormatSlot::canonical(0)),
            Err(SwConvError::InvalidSlot { which: 7 })
        ));
        assert!(device.get_format(0, 1).is_ok());
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let (mut device, pool, registry) = probe_rgb888();
        device.teardown();
        device.teardown();
        assert!(!device.is_published());
        assert!(pool.outstanding.lock().is_empty());
        assert!(registry.names.lock().is_empty());
        drop(device);
        assert!(pool.outstanding.lock().is_empty());
    }

    #[test]
    fn test_invalid_topology_releases_resources() {
        let pool = Arc::new(Pool::default());
        let registry = Arc::new(Registry::default());
        let source = YamlTopologySource::from_yaml_str("pixel-format: RGB888\nports: []\n").unwrap();

        let result = SwFormatConverter::probe("swconv0", &source, pool.clone(), registry.clone());
        assert!(matches!(result, Err(SwConvError::InvalidTopology { count: 0 })));
        assert!(pool.outstanding.lock().is_empty());
        assert!(registry.names.lock().is_empty());
    }

    #[test]
    fn test_stream_and_close_are_noops() {
        let (device, _pool, _registry) = probe_rgb888();
        let before = device.store().snapshot();
        device.on_stream_enable(true).unwrap();
        device.on_stream_enable(false).unwrap();
        device.on_session_close();
        device.log_status();
        assert_eq!(device.store().snapshot(), before);
    }
}
