use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialize(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Serialize(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialize(e.to_string())
    }
}

#[derive(Debug)]
pub enum EngineError {
    /// A tile had to be spawned but every cell is occupied.
    NoEmptyCell,
    MoveInFlight,
    NoMoveInFlight,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NoEmptyCell => write!(f, "No empty cell to spawn a tile into"),
            EngineError::MoveInFlight => write!(f, "A move is still being animated"),
            EngineError::NoMoveInFlight => write!(f, "There is no move waiting to be settled"),
        }
    }
}

impl std::error::Error for EngineError {}
