use std::time::Duration;

use common::puzzle2048::{GameRenderer, Relocation, ScoreDelta, SpawnedTile};

/// Prints move feedback and paces relocations by the distance travelled.
pub struct TerminalRenderer {
    grid_size: usize,
    step_delay: Duration,
}

impl TerminalRenderer {
    pub fn new(grid_size: usize, step_delay: Duration) -> Self {
        Self {
            grid_size,
            step_delay,
        }
    }

    fn distance(&self, relocation: &Relocation) -> u32 {
        let size = self.grid_size.max(1);
        let (from_row, from_column) = (relocation.from / size, relocation.from % size);
        let (to_row, to_column) = (relocation.to / size, relocation.to % size);
        (from_row.abs_diff(to_row) + from_column.abs_diff(to_column)) as u32
    }
}

impl GameRenderer for TerminalRenderer {
    async fn animate_relocation(&self, relocation: Relocation) {
        tokio::time::sleep(self.step_delay * self.distance(&relocation)).await;
    }

    async fn score_changed(&self, delta: ScoreDelta) {
        println!("+{} (score {})", delta.points, delta.total);
    }

    async fn tile_spawned(&self, _tile: SpawnedTile) {
        tokio::time::sleep(self.step_delay).await;
    }

    async fn game_over(&self, final_score: u32) {
        println!("Game over! Final score: {}", final_score);
    }
}
