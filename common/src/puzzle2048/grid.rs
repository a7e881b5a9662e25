use super::cell::Cell;
use super::tile::{Tile, TileId};
use super::types::SpawnedTile;
use crate::error::EngineError;
use crate::session_rng::SessionRng;

/// Linear cell indices along one row or column, leading edge first.
pub type CellGroup = Vec<usize>;

/// Square board of `size * size` cells stored row-major.
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    next_tile_id: u64,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        let cells = (0..size * size)
            .map(|index| Cell::new(index / size, index % size))
            .collect();
        Self {
            size,
            cells,
            next_tile_id: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub(crate) fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    pub fn index_of(&self, row: usize, column: usize) -> usize {
        row * self.size + column
    }

    /// Each row, left to right.
    pub fn cell_groups_by_row(&self) -> Vec<CellGroup> {
        (0..self.size)
            .map(|row| (0..self.size).map(|column| self.index_of(row, column)).collect())
            .collect()
    }

    /// Each column, top to bottom.
    pub fn cell_groups_by_column(&self) -> Vec<CellGroup> {
        (0..self.size)
            .map(|column| (0..self.size).map(|row| self.index_of(row, column)).collect())
            .collect()
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn random_empty_cell(&self, rng: &mut SessionRng) -> Result<usize, EngineError> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return Err(EngineError::NoEmptyCell);
        }
        Ok(empty[rng.random_range(0..empty.len())])
    }

    /// Row-major tile values, `None` for empty cells.
    pub fn values(&self) -> Vec<Option<u32>> {
        self.cells.iter().map(Cell::value).collect()
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().filter_map(Cell::value).max().unwrap_or(0)
    }

    pub fn has_pending_merges(&self) -> bool {
        self.cells.iter().any(|cell| cell.merge_tile().is_some())
    }

    fn create_tile(&mut self, value: u32) -> Tile {
        let id = TileId::new(self.next_tile_id);
        self.next_tile_id += 1;
        Tile::new(id, value)
    }

    /// Puts a fresh tile into `index`, replacing whatever was there.
    pub(crate) fn place_tile(&mut self, index: usize, value: u32) -> TileId {
        let tile = self.create_tile(value);
        let id = tile.id();
        self.cells[index].set_tile(tile);
        id
    }

    pub(crate) fn spawn_random_tile(
        &mut self,
        rng: &mut SessionRng,
        four_probability: f64,
    ) -> Result<SpawnedTile, EngineError> {
        let index = self.random_empty_cell(rng)?;
        let value = if rng.random_bool_with(four_probability) { 4 } else { 2 };
        let tile = self.place_tile(index, value);
        Ok(SpawnedTile { tile, index, value })
    }

    pub(crate) fn clear(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear);
    }
}
