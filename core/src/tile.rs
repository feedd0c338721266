use serde::{Deserialize, Serialize};

/// What the player currently sees on a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed,
    Flagged,
    Question,
}

impl Visibility {
    /// Whether the player placed a mark (flag or question) on the tile.
    pub const fn is_marked(self) -> bool {
        matches!(self, Self::Flagged | Self::Question)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What a tile holds underneath.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    /// No adjacent mines.
    Empty,
    /// One to eight adjacent mines.
    Number,
    Mine,
    /// Reserved for rule variants with extra tile kinds; classic placement never produces it.
    Special,
}

impl Default for Content {
    fn default() -> Self {
        Self::Empty
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) is_mine: bool,
    pub(crate) visibility: Visibility,
    pub(crate) adjacent_mines: u8,
    pub(crate) content: Content,
}

impl Tile {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Number of mines among the neighbors, always 0 for a mine tile.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn content(&self) -> Content {
        self.content
    }

    pub(crate) fn place_mine(&mut self) {
        self.is_mine = true;
        self.adjacent_mines = 0;
        self.content = Content::Mine;
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        debug_assert!(!self.is_mine);
        self.adjacent_mines = count;
        self.content = if count == 0 {
            Content::Empty
        } else {
            Content::Number
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tile_is_hidden_and_empty() {
        let tile = Tile::default();
        assert!(!tile.is_mine());
        assert_eq!(tile.visibility(), Visibility::Hidden);
        assert_eq!(tile.adjacent_mines(), 0);
        assert_eq!(tile.content(), Content::Empty);
    }

    #[test]
    fn content_follows_adjacent_count() {
        let mut tile = Tile::default();
        tile.set_adjacent_mines(3);
        assert_eq!(tile.content(), Content::Number);
        tile.set_adjacent_mines(0);
        assert_eq!(tile.content(), Content::Empty);
    }

    #[test]
    fn mine_tile_reports_mine_content() {
        let mut tile = Tile::default();
        tile.place_mine();
        assert!(tile.is_mine());
        assert_eq!(tile.content(), Content::Mine);
    }

    #[test]
    fn only_flag_and_question_count_as_marks() {
        assert!(Visibility::Flagged.is_marked());
        assert!(Visibility::Question.is_marked());
        assert!(!Visibility::Hidden.is_marked());
        assert!(!Visibility::Revealed.is_marked());
    }
}
