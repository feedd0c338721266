use rand::prelude::*;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::*;

/// Picks the mine positions for a board of the given settings.
pub trait MinefieldGenerator {
    fn generate(self, settings: &SessionSettings, rng: &mut SmallRng) -> Result<Vec<Coord2>>;
}

/// Uniform placement that keeps a square around the first revealed cell free of mines.
///
/// Every cell whose Chebyshev distance to `start` exceeds `radius` is eligible.
/// The eligible list is shuffled as a whole and the first `mine_count` entries
/// become mines, so the count is exact and every eligible cell is equally likely.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SafeZoneGenerator {
    start: Coord2,
    radius: u8,
}

impl SafeZoneGenerator {
    pub fn new(start: Coord2, radius: u8) -> Self {
        Self { start, radius }
    }

    /// Cells outside the safe zone, in row-major order.
    pub fn eligible_cells(&self, (width, height): Coord2) -> Vec<Coord2> {
        (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|&coords| chebyshev(coords, self.start) > self.radius)
            .collect()
    }
}

impl MinefieldGenerator for SafeZoneGenerator {
    fn generate(self, settings: &SessionSettings, rng: &mut SmallRng) -> Result<Vec<Coord2>> {
        let mut cells = self.eligible_cells(settings.size());
        let eligible = CellCount::try_from(cells.len()).unwrap_or(CellCount::MAX);
        if eligible < settings.mine_count {
            log::warn!(
                "Safe zone of radius {} around {:?} leaves {} cells for {} mines",
                self.radius,
                self.start,
                eligible,
                settings.mine_count
            );
            return Err(ConfigError::SafeZoneTooLarge {
                mines: settings.mine_count,
                eligible,
            }
            .into());
        }

        cells.shuffle(rng);
        cells.truncate(settings.mine_count.into());
        log::debug!(
            "Placed {} mines among {} eligible cells, safe zone {} around {:?}",
            cells.len(),
            eligible,
            self.radius,
            self.start
        );
        Ok(cells)
    }
}

/// Seed for sessions that were not given one, derived from the wall clock.
pub fn entropy_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    // fold the high bits in so consecutive calls still differ after truncation
    (nanos as u64) ^ ((nanos >> 64) as u64).rotate_left(17)
}
