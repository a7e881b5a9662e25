pub mod config;
pub mod error;
pub mod logger;
pub mod puzzle2048;
pub mod session_rng;
pub mod storage;

pub use error::{EngineError, StoreError};
pub use session_rng::SessionRng;
