use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Grid position as `(row, col)`.
pub type GridPos = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for GridPos {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it stays within `bounds`.
fn step(pos: GridPos, delta: (i8, i8), bounds: GridPos) -> Option<GridPos> {
    let row = pos.0.checked_add_signed(delta.0)?;
    let col = pos.1.checked_add_signed(delta.1)?;

    if row < bounds.0 && col < bounds.1 {
        Some((row, col))
    } else {
        None
    }
}

/// Chebyshev-distance-1 neighborhood of `pos`, clipped at the grid edges.
pub fn neighbors(pos: GridPos, bounds: GridPos) -> impl Iterator<Item = GridPos> {
    OFFSETS
        .into_iter()
        .filter_map(move |delta| step(pos, delta, bounds))
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, pos: GridPos) -> impl Iterator<Item = GridPos>;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, pos: GridPos) -> impl Iterator<Item = GridPos> {
        let dim = self.dim();
        let bounds = (
            dim.0.try_into().unwrap_or(Coord::MAX),
            dim.1.try_into().unwrap_or(Coord::MAX),
        );
        neighbors(pos, bounds)
    }
}
