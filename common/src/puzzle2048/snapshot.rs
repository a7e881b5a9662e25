use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::grid::Grid;
use super::tile::is_valid_tile_value;
use crate::error::StoreError;

pub const SAVED_GAME_VERSION: u32 = 1;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TileRecord {
    pub index: usize,
    pub value: u32,
}

/// Score plus a sparse tile layout; absent indices are empty cells.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct GameSnapshot {
    pub score: u32,
    pub tiles: Vec<TileRecord>,
}

impl GameSnapshot {
    pub fn capture(grid: &Grid, score: u32) -> Self {
        let tiles = grid
            .cells()
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.value().map(|value| TileRecord { index, value }))
            .collect();
        Self { score, tiles }
    }

    pub fn validate(&self, cell_count: usize) -> Result<(), String> {
        // play never leaves fewer than two tiles on the board
        if self.tiles.is_empty() {
            return Err("Saved game has no tiles".to_string());
        }
        let mut seen = HashSet::with_capacity(self.tiles.len());
        for record in &self.tiles {
            if record.index >= cell_count {
                return Err(format!(
                    "Tile index {} is outside a grid of {} cells",
                    record.index, cell_count
                ));
            }
            if !is_valid_tile_value(record.value) {
                return Err(format!(
                    "Tile value {} at index {} is not a power of two of at least 2",
                    record.value, record.index
                ));
            }
            if !seen.insert(record.index) {
                return Err(format!("Tile index {} appears twice", record.index));
            }
        }
        Ok(())
    }

    /// Replaces the grid content with this layout. Tiles get fresh ids.
    pub(crate) fn restore_into(&self, grid: &mut Grid) {
        grid.clear();
        for record in &self.tiles {
            grid.place_tile(record.index, record.value);
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SavedGame {
    #[serde(default = "legacy_version")]
    version: u32,
    score: u32,
    tiles: Vec<TileRecord>,
}

// the browser build wrote records without a version field
fn legacy_version() -> u32 {
    SAVED_GAME_VERSION
}

pub fn encode_saved_game(snapshot: &GameSnapshot) -> Result<String, StoreError> {
    let saved = SavedGame {
        version: SAVED_GAME_VERSION,
        score: snapshot.score,
        tiles: snapshot.tiles.clone(),
    };
    Ok(serde_json::to_string(&saved)?)
}

/// Parses and validates a saved game for a grid of `cell_count` cells.
pub fn decode_saved_game(content: &str, cell_count: usize) -> Result<GameSnapshot, String> {
    let saved: SavedGame =
        serde_json::from_str(content).map_err(|e| format!("Malformed saved game: {}", e))?;

    if saved.version != SAVED_GAME_VERSION {
        return Err(format!(
            "Unsupported saved game version: found {}, expected {}",
            saved.version, SAVED_GAME_VERSION
        ));
    }

    let snapshot = GameSnapshot {
        score: saved.score,
        tiles: saved.tiles,
    };
    snapshot.validate(cell_count)?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle2048::grid::tests::{grid_from, raw_values};

    #[test]
    fn test_capture_is_sparse_and_row_major() {
        let grid = grid_from(2, &[0, 4, 2, 0]);
        let snapshot = GameSnapshot::capture(&grid, 12);
        assert_eq!(snapshot.score, 12);
        assert_eq!(
            snapshot.tiles,
            vec![TileRecord { index: 1, value: 4 }, TileRecord { index: 2, value: 2 }]
        );
    }

    #[test]
    fn test_save_and_reload_reproduces_layout() {
        let grid = grid_from(4, &[
            2, 0, 0, 4,
            0, 1024, 0, 0,
            0, 0, 8, 0,
            16, 0, 0, 2,
        ]);
        let snapshot = GameSnapshot::capture(&grid, 5120);
        let encoded = encode_saved_game(&snapshot).unwrap();
        let decoded = decode_saved_game(&encoded, 16).unwrap();
        assert_eq!(decoded, snapshot);

        let mut restored = Grid::new(4);
        decoded.restore_into(&mut restored);
        assert_eq!(raw_values(&restored), raw_values(&grid));
    }

    #[test]
    fn test_encoded_record_shape() {
        let snapshot = GameSnapshot {
            score: 8,
            tiles: vec![TileRecord { index: 3, value: 4 }],
        };
        let encoded = encode_saved_game(&snapshot).unwrap();
        assert_eq!(
            encoded,
            r#"{"version":1,"score":8,"tiles":[{"index":3,"value":4}]}"#
        );
    }

    #[test]
    fn test_record_without_version_is_accepted() {
        let decoded =
            decode_saved_game(r#"{"score":4,"tiles":[{"index":0,"value":2}]}"#, 16).unwrap();
        assert_eq!(decoded.score, 4);
        assert_eq!(decoded.tiles.len(), 1);
    }

    #[test]
    fn test_malformed_records_are_rejected() {
        assert!(decode_saved_game("", 16).is_err());
        assert!(decode_saved_game("not json", 16).is_err());
        let tile = r#"{"index":0,"value":2}"#;
        assert!(decode_saved_game(&format!(r#"{{"tiles":[{tile}]}}"#), 16).is_err());
        assert!(decode_saved_game(&format!(r#"{{"score":-4,"tiles":[{tile}]}}"#), 16).is_err());
        let future = format!(r#"{{"version":2,"score":0,"tiles":[{tile}]}}"#);
        assert!(decode_saved_game(&future, 16).is_err());
    }

    #[test]
    fn test_invalid_tiles_are_rejected() {
        let out_of_range = r#"{"score":0,"tiles":[{"index":16,"value":2}]}"#;
        assert!(decode_saved_game(out_of_range, 16).is_err());

        let not_power = r#"{"score":0,"tiles":[{"index":1,"value":6}]}"#;
        assert!(decode_saved_game(not_power, 16).is_err());

        let duplicate = r#"{"score":0,"tiles":[{"index":1,"value":2},{"index":1,"value":4}]}"#;
        assert!(decode_saved_game(duplicate, 16).is_err());

        let empty_board = r#"{"score":500,"tiles":[]}"#;
        assert!(decode_saved_game(empty_board, 16).is_err());
    }
}
