use std::future::Future;

use super::types::{Relocation, ScoreDelta, SpawnedTile};

/// Presentation side of a session. The session awaits every returned future,
/// so a slow renderer slows the game down instead of racing it.
pub trait GameRenderer: Send + Sync {
    /// Resolves once the tile has visually arrived at its destination.
    fn animate_relocation(&self, relocation: Relocation) -> impl Future<Output = ()> + Send;

    fn score_changed(&self, delta: ScoreDelta) -> impl Future<Output = ()> + Send;

    fn tile_spawned(&self, tile: SpawnedTile) -> impl Future<Output = ()> + Send;

    fn game_over(&self, final_score: u32) -> impl Future<Output = ()> + Send;
}

/// Settles everything immediately.
#[derive(Clone, Copy, Default)]
pub struct HeadlessRenderer;

impl GameRenderer for HeadlessRenderer {
    async fn animate_relocation(&self, _relocation: Relocation) {}

    async fn score_changed(&self, _delta: ScoreDelta) {}

    async fn tile_spawned(&self, _tile: SpawnedTile) {}

    async fn game_over(&self, _final_score: u32) {}
}
