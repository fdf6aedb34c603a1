//! Draw snapshot persistence
//!
//! One durable key holds the serialized `{inputs, teams, remaining, assigned}`
//! record. The store is injected into the engine so tests can mock it; the
//! browser build writes LocalStorage, the native demo keeps the snapshot in
//! memory. Corrupt or mis-shaped payloads load as "no saved state", never as
//! an error.

use std::cell::RefCell;
use std::rc::Rc;

use crate::draw::DrawState;

/// Durable key the snapshot lives under.
pub const STORAGE_KEY: &str = "draw_wheel_state_v1";

/// Durable slot for the draw snapshot. Writes are fire-and-forget observers
/// of state changes: failures are logged and swallowed, never propagated.
pub trait StateStore {
    /// Last saved snapshot, or `None` when absent or malformed.
    fn load(&self) -> Option<DrawState>;
    /// Overwrite the snapshot.
    fn save(&self, state: &DrawState);
    /// Remove the snapshot. No effect on any in-memory state.
    fn clear(&self);
}

/// Parse and validate a stored payload. Anything that fails to deserialize or
/// has the wrong shape is treated as absent.
pub fn decode(raw: &str) -> Option<DrawState> {
    match serde_json::from_str::<DrawState>(raw) {
        Ok(state) if state.is_well_formed() => Some(state),
        Ok(_) => {
            log::warn!("Saved draw state has the wrong shape, starting fresh");
            None
        }
        Err(err) => {
            log::warn!("Saved draw state is corrupt ({err}), starting fresh");
            None
        }
    }
}

/// In-memory store, shared between clones. Used by tests and the native demo;
/// it round-trips through JSON so it exercises the same serialization path as
/// the browser store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl StateStore for MemoryStore {
    fn load(&self) -> Option<DrawState> {
        self.slot.borrow().as_deref().and_then(decode)
    }

    fn save(&self, state: &DrawState) {
        match serde_json::to_string(state) {
            Ok(json) => *self.slot.borrow_mut() = Some(json),
            Err(err) => log::warn!("Failed to serialize draw state: {err}"),
        }
    }

    fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }
}

impl MemoryStore {
    /// Seed the slot with a raw payload (tests use this to simulate
    /// corruption).
    pub fn set_raw(&self, raw: &str) {
        *self.slot.borrow_mut() = Some(raw.to_string());
    }
}

/// LocalStorage-backed store (WASM only).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl StateStore for LocalStorageStore {
    fn load(&self) -> Option<DrawState> {
        let storage = Self::storage()?;
        let json = storage.get_item(STORAGE_KEY).ok()??;
        decode(&json)
    }

    fn save(&self, state: &DrawState) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if let Ok(json) = serde_json::to_string(state) {
            if storage.set_item(STORAGE_KEY, &json).is_err() {
                log::warn!("Failed to write draw state to LocalStorage");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(STORAGE_KEY);
            log::info!("Saved draw state cleared");
        }
    }
}
