use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid grid dimensions or mine count")]
    InvalidDimensions,
    #[error("Coordinates are outside the grid")]
    OutOfBounds,
}

pub type Result<T> = core::result::Result<T, GameError>;
