use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use rules::*;
pub use session::*;
pub use settings::*;
pub use tile::*;
pub use timer::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod rules;
mod session;
mod settings;
mod tile;
mod timer;
mod types;

/// What a single reveal did to the board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Cells whose visibility changed, in the order they were opened.
    pub changed: Vec<Coord2>,
    pub exploded: bool,
    pub won: bool,
}

impl ActionResult {
    pub const fn unchanged(won: bool) -> Self {
        Self {
            changed: Vec::new(),
            exploded: false,
            won,
        }
    }

    pub fn exploded(coords: Coord2) -> Self {
        Self {
            changed: vec![coords],
            exploded: true,
            won: false,
        }
    }

    pub const fn revealed(changed: Vec<Coord2>, won: bool) -> Self {
        Self {
            changed,
            exploded: false,
            won,
        }
    }
}

/// Change to the number of placed flags caused by one step of the marking cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagDelta {
    /// A flag was placed.
    Increment,
    /// A flag was removed or turned into a question mark.
    Decrement,
    /// No flag was added or removed, the tile may still have changed.
    Neutral,
}

impl FlagDelta {
    pub const fn value(self) -> i8 {
        match self {
            Self::Increment => 1,
            Self::Decrement => -1,
            Self::Neutral => 0,
        }
    }

    pub const fn is_neutral(self) -> bool {
        matches!(self, Self::Neutral)
    }
}
