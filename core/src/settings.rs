use serde::{Deserialize, Serialize};

use crate::*;

pub const MIN_BOARD_WIDTH: Coord = 5;
pub const MIN_BOARD_HEIGHT: Coord = 5;
pub const MAX_BOARD_WIDTH: Coord = 50;
pub const MAX_BOARD_HEIGHT: Coord = 50;

pub const MIN_MINES: CellCount = 1;

/// Upper bound on the share of cells that may hold mines, in percent.
pub const MAX_MINE_DENSITY_PERCENT: u32 = 85;

/// 0 keeps only the clicked cell safe, 1 a 3x3 square, and so on.
pub const DEFAULT_SAFE_ZONE_RADIUS: u8 = 1;
pub const DEFAULT_QUESTION_MARKS: bool = true;

const fn default_safe_zone_radius() -> u8 {
    DEFAULT_SAFE_ZONE_RADIUS
}

const fn default_question_marks() -> bool {
    DEFAULT_QUESTION_MARKS
}

/// Everything needed to build a board for one session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub width: Coord,
    pub height: Coord,
    pub mine_count: CellCount,
    #[serde(default = "default_safe_zone_radius")]
    pub safe_zone_radius: u8,
    #[serde(default = "default_question_marks")]
    pub allow_question_marks: bool,
}

impl SessionSettings {
    /// Settings with the default safe zone and question-mark behavior.
    pub const fn new(width: Coord, height: Coord, mine_count: CellCount) -> Self {
        Self {
            width,
            height,
            mine_count,
            safe_zone_radius: DEFAULT_SAFE_ZONE_RADIUS,
            allow_question_marks: DEFAULT_QUESTION_MARKS,
        }
    }

    pub const fn with_safe_zone_radius(mut self, radius: u8) -> Self {
        self.safe_zone_radius = radius;
        self
    }

    pub const fn with_question_marks(mut self, allow: bool) -> Self {
        self.allow_question_marks = allow;
        self
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Largest mine count the density limit allows, never below [`MIN_MINES`].
    pub fn max_mines(&self) -> CellCount {
        let by_density = u32::from(self.total_cells()) * MAX_MINE_DENSITY_PERCENT / 100;
        CellCount::try_from(by_density)
            .unwrap_or(CellCount::MAX)
            .max(MIN_MINES)
    }

    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.width < MIN_BOARD_WIDTH {
            return Err(ConfigError::WidthTooSmall {
                width: self.width,
                min: MIN_BOARD_WIDTH,
            });
        }
        if self.width > MAX_BOARD_WIDTH {
            return Err(ConfigError::WidthTooLarge {
                width: self.width,
                max: MAX_BOARD_WIDTH,
            });
        }
        if self.height < MIN_BOARD_HEIGHT {
            return Err(ConfigError::HeightTooSmall {
                height: self.height,
                min: MIN_BOARD_HEIGHT,
            });
        }
        if self.height > MAX_BOARD_HEIGHT {
            return Err(ConfigError::HeightTooLarge {
                height: self.height,
                max: MAX_BOARD_HEIGHT,
            });
        }
        if self.mine_count < MIN_MINES {
            return Err(ConfigError::TooFewMines {
                mines: self.mine_count,
                min: MIN_MINES,
            });
        }
        let cells = self.total_cells();
        if self.mine_count >= cells {
            return Err(ConfigError::TooManyMines {
                mines: self.mine_count,
                cells,
            });
        }
        let max = self.max_mines();
        if self.mine_count > max {
            return Err(ConfigError::MineDensityExceeded {
                mines: self.mine_count,
                max,
            });
        }
        Ok(())
    }

    /// Parses and validates a JSON settings document.
    pub fn from_json(json: &str) -> core::result::Result<Self, ConfigError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Malformed(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> core::result::Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|err| ConfigError::Malformed(err.to_string()))
    }
}

/// Classic difficulty levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
    Custom,
}

impl Difficulty {
    pub const PRESETS: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    /// Preset settings, `None` for [`Difficulty::Custom`].
    pub const fn settings(self) -> Option<SessionSettings> {
        use Difficulty::*;
        match self {
            Beginner => Some(SessionSettings::new(9, 9, 10)),
            Intermediate => Some(SessionSettings::new(16, 16, 40)),
            Expert => Some(SessionSettings::new(30, 16, 99)),
            Custom => None,
        }
    }

    /// Classifies settings by board shape and mine count.
    pub fn of(settings: &SessionSettings) -> Self {
        Self::PRESETS
            .into_iter()
            .find(|preset| {
                preset.settings().is_some_and(|p| {
                    (p.width, p.height, p.mine_count)
                        == (settings.width, settings.height, settings.mine_count)
                })
            })
            .unwrap_or(Self::Custom)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for preset in Difficulty::PRESETS {
            let settings = preset.settings().unwrap();
            assert_eq!(settings.validate(), Ok(()), "{preset:?}");
            assert_eq!(Difficulty::of(&settings), preset);
        }
    }

    #[test]
    fn expert_is_wide() {
        let settings = Difficulty::Expert.settings().unwrap();
        assert_eq!(settings.size(), (30, 16));
        assert_eq!(settings.mine_count, 99);
    }

    #[test]
    fn custom_has_no_preset() {
        assert_eq!(Difficulty::Custom.settings(), None);
        assert_eq!(
            Difficulty::of(&SessionSettings::new(9, 9, 11)),
            Difficulty::Custom
        );
    }

    #[test]
    fn validate_reports_failed_bound() {
        assert_eq!(
            SessionSettings::new(4, 9, 10).validate(),
            Err(ConfigError::WidthTooSmall { width: 4, min: 5 })
        );
        assert_eq!(
            SessionSettings::new(9, 51, 10).validate(),
            Err(ConfigError::HeightTooLarge {
                height: 51,
                max: 50
            })
        );
        assert_eq!(
            SessionSettings::new(9, 9, 0).validate(),
            Err(ConfigError::TooFewMines { mines: 0, min: 1 })
        );
        assert_eq!(
            SessionSettings::new(5, 5, 25).validate(),
            Err(ConfigError::TooManyMines {
                mines: 25,
                cells: 25
            })
        );
        assert_eq!(
            SessionSettings::new(5, 5, 22).validate(),
            Err(ConfigError::MineDensityExceeded { mines: 22, max: 21 })
        );
    }

    #[test]
    fn density_limit_is_floored() {
        assert_eq!(SessionSettings::new(9, 9, 1).max_mines(), 68);
        assert_eq!(SessionSettings::new(5, 5, 1).max_mines(), 21);
        assert_eq!(SessionSettings::new(5, 5, 21).validate(), Ok(()));
    }

    #[test]
    fn json_fills_defaults() {
        let settings =
            SessionSettings::from_json(r#"{"width": 16, "height": 16, "mine_count": 40}"#).unwrap();
        assert_eq!(settings, Difficulty::Intermediate.settings().unwrap());
        assert_eq!(settings.safe_zone_radius, DEFAULT_SAFE_ZONE_RADIUS);
        assert!(settings.allow_question_marks);
    }

    #[test]
    fn json_round_trips_explicit_fields() {
        let settings = SessionSettings::new(12, 7, 20)
            .with_safe_zone_radius(0)
            .with_question_marks(false);
        assert_eq!(SessionSettings::from_json(&settings.to_json().unwrap()), Ok(settings));
    }

    #[test]
    fn json_rejects_garbage_and_invalid_boards() {
        assert!(matches!(
            SessionSettings::from_json("{\"width\": 9"),
            Err(ConfigError::Malformed(_))
        ));
        assert_eq!(
            SessionSettings::from_json(r#"{"width": 3, "height": 9, "mine_count": 1}"#),
            Err(ConfigError::WidthTooSmall { width: 3, min: 5 })
        );
    }
}
