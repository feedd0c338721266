use ndarray::Array2;
use rand::prelude::*;

use crate::*;

/// The minefield grid together with the placement, reveal and marking algorithms.
///
/// Mines are placed lazily on the first safe reveal so the clicked cell is known
/// in advance. Tiles are stored row-major and handed out by value, callers never
/// get mutable access to a tile.
#[derive(Clone, Debug)]
pub struct Board {
    settings: SessionSettings,
    tiles: Array2<Tile>,
    mines_placed: bool,
    rng: SmallRng,
}

impl Board {
    /// Validates `settings` and builds an empty board, seeding from the clock when `seed` is `None`.
    pub fn new(settings: SessionSettings, seed: Option<u64>) -> Result<Self> {
        let seed = seed.unwrap_or_else(entropy_seed);
        Self::with_rng(settings, SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(settings: SessionSettings, rng: SmallRng) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            tiles: Self::empty_tiles(&settings),
            mines_placed: false,
            rng,
        })
    }

    /// Builds a board with a fixed mine layout, already counted and ready to play.
    ///
    /// `settings.mine_count` is replaced with the number of distinct cells in `mines`
    /// before validation.
    pub fn from_mine_coords(mut settings: SessionSettings, mines: &[Coord2]) -> Result<Self> {
        let mut tiles = Self::empty_tiles(&settings);
        for &(x, y) in mines {
            if x >= settings.width || y >= settings.height {
                return Err(GameError::InvalidCoords(x, y));
            }
            tiles[(x, y).to_nd_index()].place_mine();
        }
        let mine_count = tiles.iter().filter(|tile| tile.is_mine).count();
        settings.mine_count = CellCount::try_from(mine_count).unwrap_or(CellCount::MAX);
        settings.validate()?;

        let mut board = Self {
            settings,
            tiles,
            mines_placed: true,
            rng: SmallRng::seed_from_u64(0),
        };
        board.recount_adjacent_mines();
        Ok(board)
    }

    fn empty_tiles(settings: &SessionSettings) -> Array2<Tile> {
        Array2::default((usize::from(settings.height), usize::from(settings.width)))
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn width(&self) -> Coord {
        self.settings.width
    }

    pub fn height(&self) -> Coord {
        self.settings.height
    }

    pub fn size(&self) -> Coord2 {
        self.settings.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.settings.mine_count
    }

    pub fn safe_zone_radius(&self) -> u8 {
        self.settings.safe_zone_radius
    }

    pub fn allow_question_marks(&self) -> bool {
        self.settings.allow_question_marks
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn in_bounds(&self, (x, y): Coord2) -> bool {
        x < self.width() && y < self.height()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords(coords.0, coords.1))
        }
    }

    /// Adjacent cells of `coords`, clipped to the board edges.
    pub fn neighbors(&self, coords: Coord2) -> Result<Neighbors> {
        let coords = self.validate_coords(coords)?;
        Ok(self.iter_neighbors(coords).collect())
    }

    fn iter_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        neighbors_of(coords, self.size())
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self.tiles[coords.to_nd_index()])
    }

    pub fn is_mine_at(&self, coords: Coord2) -> Result<bool> {
        self.tile_at(coords).map(|tile| tile.is_mine())
    }

    pub fn adjacent_count_at(&self, coords: Coord2) -> Result<u8> {
        self.tile_at(coords).map(|tile| tile.adjacent_mines())
    }

    pub fn visibility_at(&self, coords: Coord2) -> Result<Visibility> {
        self.tile_at(coords).map(|tile| tile.visibility())
    }

    /// All tiles with their coordinates, row by row.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((y, x), &tile)| ((x as Coord, y as Coord), tile))
    }

    /// Clears every tile back to hidden and empty, and forgets the mine layout.
    pub fn reset(&mut self) {
        self.tiles.fill(Tile::default());
        self.mines_placed = false;
    }

    /// Player marks currently on the board.
    pub fn marks(&self) -> Vec<(Coord2, Visibility)> {
        self.iter_tiles()
            .filter(|(_, tile)| tile.visibility().is_marked())
            .map(|(coords, tile)| (coords, tile.visibility()))
            .collect()
    }

    /// Puts marks back on hidden tiles, anything else in `marks` is ignored.
    pub fn restore_marks(&mut self, marks: &[(Coord2, Visibility)]) {
        for &(coords, visibility) in marks {
            if !self.in_bounds(coords) || !visibility.is_marked() {
                continue;
            }
            let tile = &mut self.tiles[coords.to_nd_index()];
            if tile.visibility == Visibility::Hidden {
                tile.visibility = visibility;
            }
        }
    }

    pub(crate) fn reset_with_rng(&mut self, rng: SmallRng) {
        self.reset();
        self.rng = rng;
    }

    /// Lays out mines keeping the safe zone around `start` clear, then recounts every tile.
    pub fn place_mines(&mut self, start: Coord2) -> Result<()> {
        let start = self.validate_coords(start)?;
        let mines = SafeZoneGenerator::new(start, self.safe_zone_radius())
            .generate(&self.settings, &mut self.rng)?;

        self.reset();
        for coords in mines {
            self.tiles[coords.to_nd_index()].place_mine();
        }
        self.recount_adjacent_mines();
        self.mines_placed = true;
        Ok(())
    }

    fn recount_adjacent_mines(&mut self) {
        let (width, height) = self.size();
        for y in 0..height {
            for x in 0..width {
                let coords = (x, y);
                if self.tiles[coords.to_nd_index()].is_mine {
                    continue;
                }
                let count = self
                    .iter_neighbors(coords)
                    .filter(|&pos| self.tiles[pos.to_nd_index()].is_mine)
                    .count() as u8;
                self.tiles[coords.to_nd_index()].set_adjacent_mines(count);
            }
        }
    }

    /// Reveals a tile, flooding outwards from zero tiles.
    ///
    /// With `safe_first_click` the first reveal on a fresh board places the mines
    /// around it, so it can never explode.
    pub fn reveal(&mut self, coords: Coord2, safe_first_click: bool) -> Result<ActionResult> {
        let coords = self.validate_coords(coords)?;
        if !self.mines_placed && safe_first_click {
            self.place_mines(coords)?;
        }

        let tile = self.tiles[coords.to_nd_index()];
        if tile.visibility.is_revealed() {
            return Ok(ActionResult::unchanged(self.is_win()));
        }

        if tile.is_mine {
            self.tiles[coords.to_nd_index()].visibility = Visibility::Revealed;
            log::debug!("Revealed mine at {:?}", coords);
            return Ok(ActionResult::exploded(coords));
        }

        let mut changed = Vec::new();
        if tile.adjacent_mines == 0 {
            self.flood_reveal(coords, &mut changed);
        } else {
            self.tiles[coords.to_nd_index()].visibility = Visibility::Revealed;
            changed.push(coords);
        }
        log::debug!("Reveal at {:?} opened {} tiles", coords, changed.len());

        Ok(ActionResult::revealed(changed, self.is_win()))
    }

    /// Work-list flood fill over the zero region containing `start` and its numbered border.
    ///
    /// Marked tiles and mines are never opened. A tile is only pushed while hidden
    /// and skipped on pop once revealed, so each tile is opened at most once.
    fn flood_reveal(&mut self, start: Coord2, changed: &mut Vec<Coord2>) {
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            let tile = &mut self.tiles[coords.to_nd_index()];
            match tile.visibility {
                Visibility::Revealed | Visibility::Flagged | Visibility::Question => {
                    log::trace!("Skipping tile at {:?}", coords);
                    continue;
                }
                Visibility::Hidden if tile.is_mine => continue,
                Visibility::Hidden => {}
            }

            tile.visibility = Visibility::Revealed;
            changed.push(coords);
            log::trace!(
                "Flood opened tile at {:?}, mine count: {}",
                coords,
                tile.adjacent_mines
            );

            if tile.adjacent_mines == 0 {
                to_visit.extend(
                    self.iter_neighbors(coords)
                        .filter(|&pos| self.tiles[pos.to_nd_index()].visibility == Visibility::Hidden),
                );
            }
        }
    }

    /// Advances the marking cycle of a tile and reports the flag-count change.
    ///
    /// `Hidden -> Flagged -> Question -> Hidden`, skipping `Question` when question
    /// marks are off. Revealed tiles are left alone.
    pub fn toggle_mark(&mut self, coords: Coord2) -> Result<FlagDelta> {
        use FlagDelta::*;
        use Visibility::*;

        let coords = self.validate_coords(coords)?;
        let allow_question_marks = self.allow_question_marks();
        let tile = &mut self.tiles[coords.to_nd_index()];

        let (next, delta) = match tile.visibility {
            Revealed => (Revealed, Neutral),
            Hidden => (Flagged, Increment),
            Flagged if allow_question_marks => (Question, Decrement),
            Flagged => (Hidden, Decrement),
            Question => (Hidden, Neutral),
        };
        tile.visibility = next;
        Ok(delta)
    }

    /// Every non-mine tile is revealed, mines may be in any state.
    pub fn is_win(&self) -> bool {
        self.tiles
            .iter()
            .all(|tile| tile.is_mine || tile.visibility.is_revealed())
    }
}
