use super::tile::TileId;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionPhase {
    Idle,
    MoveInFlight,
    GameOver,
}

/// One tile travelling from `from` to `to` (linear row-major indices).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Relocation {
    pub tile: TileId,
    pub value: u32,
    pub from: usize,
    pub to: usize,
    pub is_merge: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MergeEvent {
    pub cell: usize,
    pub surviving: TileId,
    pub consumed: TileId,
    /// Value of the surviving tile after doubling; also the points scored.
    pub value: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScoreDelta {
    pub cell: usize,
    pub points: u32,
    pub total: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SpawnedTile {
    pub tile: TileId,
    pub index: usize,
    pub value: u32,
}
