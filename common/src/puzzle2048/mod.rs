mod cell;
mod grid;
mod leaderboard;
pub mod move_engine;
mod renderer;
mod session;
mod snapshot;
mod tile;
mod types;

pub use cell::Cell;
pub use grid::{CellGroup, Grid};
pub use leaderboard::{HighScore, Leaderboard, MAX_LEADERBOARD_ENTRIES};
pub use renderer::{GameRenderer, HeadlessRenderer};
pub use session::{MoveOutcome, MoveReport, Session};
pub use snapshot::{GameSnapshot, SAVED_GAME_VERSION, TileRecord, decode_saved_game, encode_saved_game};
pub use tile::{MAX_TILE_VALUE, Tile, TileId, is_valid_tile_value};
pub use types::{Direction, MergeEvent, Relocation, ScoreDelta, SessionPhase, SpawnedTile};
