use super::tile::{Tile, TileId};

/// A fixed grid slot.
///
/// `merge_tile` holds a tile that has moved onto this cell during the current
/// move and will be folded into `tile` when merges are finalized. It is only
/// ever set between move resolution and merge finalization.
#[derive(Clone, Debug)]
pub struct Cell {
    row: usize,
    column: usize,
    tile: Option<Tile>,
    merge_tile: Option<Tile>,
}

impl Cell {
    pub(crate) fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            tile: None,
            merge_tile: None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn tile(&self) -> Option<&Tile> {
        self.tile.as_ref()
    }

    pub fn merge_tile(&self) -> Option<&Tile> {
        self.merge_tile.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.tile.is_none()
    }

    pub fn value(&self) -> Option<u32> {
        self.tile.as_ref().map(Tile::value)
    }

    /// Empty, or holding an equal tile that has not already taken a merge this move.
    pub fn can_accept(&self, incoming: &Tile) -> bool {
        match &self.tile {
            None => true,
            Some(tile) => {
                self.merge_tile.is_none() && tile.value() == incoming.value() && tile.can_double()
            }
        }
    }

    pub(crate) fn set_tile(&mut self, tile: Tile) {
        self.tile = Some(tile);
    }

    pub(crate) fn take_tile(&mut self) -> Option<Tile> {
        self.tile.take()
    }

    pub(crate) fn set_merge_tile(&mut self, tile: Tile) {
        self.merge_tile = Some(tile);
    }

    /// Returns `(surviving, consumed, new_value)` when a merge was pending.
    pub(crate) fn merge_tiles(&mut self) -> Option<(TileId, TileId, u32)> {
        let consumed = self.merge_tile.take()?;
        match self.tile.as_mut() {
            Some(tile) => {
                let value = tile.double();
                Some((tile.id(), consumed.id(), value))
            }
            None => {
                self.tile = Some(consumed);
                None
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.tile = None;
        self.merge_tile = None;
    }
}
