mod file_store;
mod memory_store;

pub use file_store::FileStateStore;
pub use memory_store::MemoryStateStore;

use crate::error::StoreError;

pub const GAME_STATE_SLOT: &str = "2048-game-state";
pub const LEADERBOARD_SLOT: &str = "2048-leaderboard";

/// Named slots holding opaque serialized records.
///
/// Every write replaces the whole slot; there are no partial updates.
pub trait StateStore {
    fn read(&self, slot: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, slot: &str, content: &str) -> Result<(), StoreError>;
    fn remove(&self, slot: &str) -> Result<(), StoreError>;
}
