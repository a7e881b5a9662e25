use std::time::Duration;

use futures_util::future::join_all;

use super::grid::Grid;
use super::leaderboard::{self, Leaderboard};
use super::move_engine;
use super::renderer::GameRenderer;
use super::snapshot::{self, GameSnapshot};
use super::types::{Direction, MergeEvent, Relocation, ScoreDelta, SessionPhase, SpawnedTile};
use crate::config::GameConfig;
use crate::error::EngineError;
use crate::session_rng::SessionRng;
use crate::storage::{GAME_STATE_SLOT, StateStore};
use crate::{debug_log, log};

const STARTING_TILES: usize = 2;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MoveReport {
    pub direction: Direction,
    pub merges: Vec<MergeEvent>,
    pub spawned: SpawnedTile,
    pub points: u32,
    pub score: u32,
    pub game_over: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// Nothing could move that way; the board is untouched.
    Rejected,
    Settled(MoveReport),
    GameOver(MoveReport),
}

/// One player's game: grid, score, single-level undo and persistence.
///
/// A move runs in two halves. [`Session::begin_move`] snapshots the board and
/// resolves relocations, leaving merges pending; [`Session::settle_move`]
/// folds the merges, spawns a tile, saves and checks for game over. Between
/// the two the session is `MoveInFlight` and refuses undo, restart and new
/// moves. [`Session::play_move`] runs both halves around a renderer.
pub struct Session<S: StateStore> {
    grid: Grid,
    score: u32,
    previous: Option<GameSnapshot>,
    phase: SessionPhase,
    in_flight: Option<Direction>,
    rng: SessionRng,
    store: S,
    four_probability: f64,
    animation_timeout: Duration,
    restored: bool,
    score_recorded: bool,
}

impl<S: StateStore> Session<S> {
    /// Resumes the saved game from `store`, or starts a fresh one if there is
    /// no usable save.
    pub fn new(config: &GameConfig, store: S, rng: SessionRng) -> Result<Self, EngineError> {
        let mut session = Self {
            grid: Grid::new(config.grid_size),
            score: 0,
            previous: None,
            phase: SessionPhase::Idle,
            in_flight: None,
            rng,
            store,
            four_probability: config.four_probability,
            animation_timeout: config.animation_timeout(),
            restored: false,
            score_recorded: false,
        };

        match session.load_saved_game() {
            Some(saved) => {
                saved.restore_into(&mut session.grid);
                session.score = saved.score;
                session.restored = true;
                log!(
                    "Resumed saved game: score {}, {} tiles",
                    saved.score,
                    saved.tiles.len()
                );
                if !move_engine::any_move_available(&session.grid) {
                    session.phase = SessionPhase::GameOver;
                }
            }
            None => session.seed_starting_tiles()?,
        }

        Ok(session)
    }

    fn load_saved_game(&self) -> Option<GameSnapshot> {
        let content = match self.store.read(GAME_STATE_SLOT) {
            Ok(content) => content?,
            Err(e) => {
                log!("Failed to read saved game: {}", e);
                return None;
            }
        };

        match snapshot::decode_saved_game(&content, self.grid.cells().len()) {
            Ok(saved) => Some(saved),
            Err(e) => {
                log!("Ignoring saved game: {}", e);
                None
            }
        }
    }

    fn seed_starting_tiles(&mut self) -> Result<(), EngineError> {
        for _ in 0..STARTING_TILES {
            self.grid
                .spawn_random_tile(&mut self.rng, self.four_probability)?;
        }
        Ok(())
    }

    fn persist(&self) {
        let current = GameSnapshot::capture(&self.grid, self.score);
        let result = snapshot::encode_saved_game(&current)
            .and_then(|content| self.store.write(GAME_STATE_SLOT, &content));
        if let Err(e) = result {
            log!("Failed to save game: {}", e);
        }
    }

    fn clear_saved_game(&self) {
        if let Err(e) = self.store.remove(GAME_STATE_SLOT) {
            log!("Failed to clear saved game: {}", e);
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn score_recorded(&self) -> bool {
        self.score_recorded
    }

    pub fn can_undo(&self) -> bool {
        self.phase != SessionPhase::MoveInFlight && self.previous.is_some()
    }

    /// Whether the game was resumed from a save rather than freshly seeded.
    pub fn was_restored(&self) -> bool {
        self.restored
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn can_move(&self, direction: Direction) -> bool {
        move_engine::can_move_in(&self.grid, direction)
    }

    /// Returns `Ok(None)` when the move is illegal or the game is over.
    pub fn begin_move(&mut self, direction: Direction) -> Result<Option<Vec<Relocation>>, EngineError> {
        match self.phase {
            SessionPhase::MoveInFlight => return Err(EngineError::MoveInFlight),
            SessionPhase::GameOver => return Ok(None),
            SessionPhase::Idle => {}
        }

        if !self.can_move(direction) {
            debug_log!("Ignoring {:?}: nothing can move", direction);
            return Ok(None);
        }

        self.previous = Some(GameSnapshot::capture(&self.grid, self.score));
        self.phase = SessionPhase::MoveInFlight;
        self.in_flight = Some(direction);

        let relocations = move_engine::resolve_move(&mut self.grid, direction);
        debug_log!("{:?}: {} relocations", direction, relocations.len());
        Ok(Some(relocations))
    }

    pub fn settle_move(&mut self) -> Result<MoveReport, EngineError> {
        let Some(direction) = self.in_flight.take() else {
            return Err(EngineError::NoMoveInFlight);
        };
        self.phase = SessionPhase::Idle;
        self.score_recorded = false;

        let merges = move_engine::finalize_merges(&mut self.grid);
        let points: u32 = merges.iter().map(|merge| merge.value).sum();
        self.score = self.score.saturating_add(points);

        let spawned = self
            .grid
            .spawn_random_tile(&mut self.rng, self.four_probability)?;
        self.persist();

        // the fresh tile can close off the last move, so check after spawning
        let game_over = !move_engine::any_move_available(&self.grid);
        if game_over {
            self.phase = SessionPhase::GameOver;
            log!("Game over with score {}", self.score);
        }

        Ok(MoveReport {
            direction,
            merges,
            spawned,
            points,
            score: self.score,
            game_over,
        })
    }

    /// Full move: resolve, wait for every relocation animation, then settle
    /// and report score, spawn and game over to the renderer.
    ///
    /// Animations are bounded by the configured timeout; a renderer that never
    /// finishes only delays the move. If this future is dropped mid-animation
    /// the session stays `MoveInFlight` until [`Session::settle_move`] is called.
    pub async fn play_move<R: GameRenderer>(
        &mut self,
        direction: Direction,
        renderer: &R,
    ) -> Result<MoveOutcome, EngineError> {
        let Some(relocations) = self.begin_move(direction)? else {
            return Ok(MoveOutcome::Rejected);
        };

        let animations = join_all(
            relocations
                .iter()
                .map(|relocation| renderer.animate_relocation(*relocation)),
        );
        if tokio::time::timeout(self.animation_timeout, animations)
            .await
            .is_err()
        {
            log!(
                "Relocation animations did not finish within {:?}, settling anyway",
                self.animation_timeout
            );
        }

        let report = self.settle_move()?;

        let mut total = report.score - report.points;
        for merge in &report.merges {
            total = total.saturating_add(merge.value);
            renderer
                .score_changed(ScoreDelta {
                    cell: merge.cell,
                    points: merge.value,
                    total,
                })
                .await;
        }
        renderer.tile_spawned(report.spawned).await;

        if report.game_over {
            renderer.game_over(report.score).await;
            return Ok(MoveOutcome::GameOver(report));
        }
        Ok(MoveOutcome::Settled(report))
    }

    /// Restores the board from before the last move. Returns `false` when
    /// there is nothing to undo. Undo is single level.
    pub fn undo(&mut self) -> Result<bool, EngineError> {
        if self.phase == SessionPhase::MoveInFlight {
            return Err(EngineError::MoveInFlight);
        }
        let Some(previous) = self.previous.take() else {
            return Ok(false);
        };

        previous.restore_into(&mut self.grid);
        self.score = previous.score;
        self.phase = SessionPhase::Idle;
        self.score_recorded = false;
        self.persist();
        debug_log!("Undo to score {}", self.score);
        Ok(true)
    }

    pub fn restart(&mut self) -> Result<(), EngineError> {
        if self.phase == SessionPhase::MoveInFlight {
            return Err(EngineError::MoveInFlight);
        }

        self.previous = None;
        self.score = 0;
        self.grid.clear();
        self.seed_starting_tiles()?;
        self.clear_saved_game();
        self.phase = SessionPhase::Idle;
        self.score_recorded = false;
        log!("Game restarted");
        Ok(())
    }

    pub fn leaderboard(&self) -> Leaderboard {
        Leaderboard::load(&self.store)
    }

    /// Records the final score under `name` once the game is over. Returns the
    /// rank reached, or `None` if the game is still running, this game was
    /// already recorded, the name is blank, or the score did not make the board.
    pub fn record_high_score(&mut self, name: &str) -> Option<usize> {
        if self.phase != SessionPhase::GameOver || self.score_recorded {
            return None;
        }
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut board = self.leaderboard();
        let rank = board.add(name, self.score, &leaderboard::today());
        self.score_recorded = true;
        if let Err(e) = board.save(&self.store) {
            log!("Failed to save leaderboard: {}", e);
        }
        self.clear_saved_game();
        rank
    }
}
