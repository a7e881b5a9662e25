#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TileId(u64);

impl TileId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Largest value a tile can reach; two of these never merge.
pub const MAX_TILE_VALUE: u32 = 1 << 31;

pub fn is_valid_tile_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// A game piece. Tiles are only created by the grid so ids stay unique.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tile {
    id: TileId,
    value: u32,
}

impl Tile {
    pub(crate) fn new(id: TileId, value: u32) -> Self {
        debug_assert!(is_valid_tile_value(value), "invalid tile value {}", value);
        Self { id, value }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn can_double(&self) -> bool {
        self.value < MAX_TILE_VALUE
    }

    /// Value is left alone at `MAX_TILE_VALUE`, callers check `can_double` first.
    pub(crate) fn double(&mut self) -> u32 {
        if let Some(doubled) = self.value.checked_mul(2) {
            self.value = doubled;
        }
        self.value
    }
}
