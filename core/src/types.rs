use smallvec::SmallVec;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Neighbor list of a single cell, never longer than eight entries.
pub type Neighbors = SmallVec<[Coord2; 8]>;

/// Maps `(x, y)` coordinates onto the row-major `[y, x]` index used by the tile matrix.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Chebyshev distance between two cells.
pub const fn chebyshev(a: Coord2, b: Coord2) -> Coord {
    let dx = a.0.abs_diff(b.0);
    let dy = a.1.abs_diff(b.1);
    if dx > dy { dx } else { dy }
}

/// Cells of the 3x3 window around `center` clipped to `(width, height)`, row by row.
///
/// The center itself is skipped, so corners yield three cells and edges five.
pub fn neighbors_of(center: Coord2, (width, height): Coord2) -> impl Iterator<Item = Coord2> {
    let (cx, cy) = center;
    let xs = cx.saturating_sub(1)..=cx.saturating_add(1).min(width.saturating_sub(1));
    let ys = cy.saturating_sub(1)..=cy.saturating_add(1).min(height.saturating_sub(1));
    ys.flat_map(move |y| xs.clone().map(move |x| (x, y)))
        .filter(move |&coords| coords != center)
}
