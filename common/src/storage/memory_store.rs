use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::StateStore;
use crate::error::StoreError;

/// Clones share the same slots.
#[derive(Clone, Default)]
pub struct MemoryStateStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.slots
            .lock()
            .map_err(|_| StoreError::Serialize("memory store lock poisoned".to_string()))
    }
}

impl StateStore for MemoryStateStore {
    fn read(&self, slot: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(slot).cloned())
    }

    fn write(&self, slot: &str, content: &str) -> Result<(), StoreError> {
        self.lock()?.insert(slot.to_string(), content.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StoreError> {
        self.lock()?.remove(slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slots() {
        let store = MemoryStateStore::new();
        let other = store.clone();
        store.write("a", "1").unwrap();
        assert_eq!(other.read("a").unwrap().as_deref(), Some("1"));
        other.remove("a").unwrap();
        assert!(store.read("a").unwrap().is_none());
    }
}
