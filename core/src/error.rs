use thiserror::Error;

use crate::{CellCount, Coord};

/// Board or session settings that cannot produce a playable game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board width {width} is below the minimum of {min}")]
    WidthTooSmall { width: Coord, min: Coord },
    #[error("Board width {width} exceeds the maximum of {max}")]
    WidthTooLarge { width: Coord, max: Coord },
    #[error("Board height {height} is below the minimum of {min}")]
    HeightTooSmall { height: Coord, min: Coord },
    #[error("Board height {height} exceeds the maximum of {max}")]
    HeightTooLarge { height: Coord, max: Coord },
    #[error("Too few mines: {mines}, at least {min} required")]
    TooFewMines { mines: CellCount, min: CellCount },
    #[error("Too many mines: {mines} does not leave a safe cell among {cells}")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Too many mines: {mines} exceeds the density limit of {max} for this board")]
    MineDensityExceeded { mines: CellCount, max: CellCount },
    #[error("Cannot place {mines} mines outside the safe zone, only {eligible} cells are eligible")]
    SafeZoneTooLarge {
        mines: CellCount,
        eligible: CellCount,
    },
    #[error("Malformed settings: {0}")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates ({0}, {1})")]
    InvalidCoords(Coord, Coord),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = core::result::Result<T, GameError>;
