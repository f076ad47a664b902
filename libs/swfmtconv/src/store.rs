// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Per-pad active/trial format storage.
//!
//! A single mutex guards the whole store, so every get or set observes a
//! fully formed slot. The lock is held only for the copy in or out. Pad and
//! slot validation, and logging, happen outside it.

use parking_lot::Mutex;

use crate::error::Result;
use crate::format::{FormatSlot, PAD_COUNT, PadRole, SlotKind};

/// Both format slots of one pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadFormatState {
    pub active: FormatSlot,
    pub trial: FormatSlot,
}

impl PadFormatState {
    fn new(template: FormatSlot) -> Self {
        Self {
            active: template,
            trial: template,
        }
    }

    fn slot_mut(&mut self, kind: SlotKind) -> &mut FormatSlot {
        match kind {
            SlotKind::Active => &mut self.active,
            SlotKind::Trial => &mut self.trial,
        }
    }

    fn slot(&self, kind: SlotKind) -> &FormatSlot {
        match kind {
            SlotKind::Active => &self.active,
            SlotKind::Trial => &self.trial,
        }
    }
}

struct StoreState {
    pads: [PadFormatState; PAD_COUNT],
    template: FormatSlot,
}

/// Format storage for the device's two pads.
pub struct FormatStateStore {
    state: Mutex<StoreState>,
}

fn pad_slot(pad: u32) -> Result<usize> {
    PadRole::from_index(pad).map(|role| role.index() as usize)
}

impl FormatStateStore {
    /// Create a store with every slot set to `template`.
    pub fn new(template: FormatSlot) -> Self {
        Self {
            state: Mutex::new(StoreState {
                pads: [PadFormatState::new(template); PAD_COUNT],
                template,
            }),
        }
    }

    /// Set both slots of both pads to `template`, and remember it as the
    /// default that [`reset_trial`](Self::reset_trial) restores.
    pub fn initialize_defaults(&self, template: FormatSlot) {
        let mut state = self.state.lock();
        state.pads = [PadFormatState::new(template); PAD_COUNT];
        state.template = template;
    }

    /// Copy of the slot `kind` on `pad`.
    pub fn get(&self, pad: u32, kind: SlotKind) -> Result<FormatSlot> {
        let index = pad_slot(pad)?;
        let slot = *self.state.lock().pads[index].slot(kind);
        Ok(slot)
    }

    /// Store `proposed` into the slot and return what was actually stored.
    ///
    /// Only the media code, width, and height are taken from `proposed`. The
    /// field order and colorspace are fixed by the hardware and keep the
    /// slot's current values.
    pub fn set(&self, pad: u32, kind: SlotKind, proposed: &FormatSlot) -> Result<FormatSlot> {
        let index = pad_slot(pad)?;
        let mut state = self.state.lock();
        let slot = state.pads[index].slot_mut(kind);
        slot.media_code = proposed.media_code;
        slot.width = proposed.width;
        slot.height = proposed.height;
        Ok(*slot)
    }

    /// Restore the default template into the trial slot of `pad`.
    pub fn reset_trial(&self, pad: u32) -> Result<()> {
        let index = pad_slot(pad)?;
        let mut state = self.state.lock();
        let template = state.template;
        state.pads[index].trial = template;
        Ok(())
    }

    /// Default template the store was initialized with.
    pub fn template(&self) -> FormatSlot {
        self.state.lock().template
    }

    /// Consistent copy of both pads.
    pub fn snapshot(&self) -> [PadFormatState; PAD_COUNT] {
        self.state.lock().pads
    }
}

impl std::fmt::Debug for FormatStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatStateStore")
            .field("pads", &self.snapshot())
            .finish()
    }
}
