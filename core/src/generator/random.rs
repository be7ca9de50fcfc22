use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform placement by rejection sampling: positions are drawn from the full
/// grid and duplicates redrawn until exactly `config.mines` distinct cells
/// are mined. The first click gets no safe-zone treatment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: &BoardConfig) -> MineField {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mut placed: CellCount = 0;

        // Terminates because the config guarantees mines < rows * cols.
        while placed < config.mines {
            let pos: GridPos = (
                rng.random_range(0..config.rows),
                rng.random_range(0..config.cols),
            );
            let slot = &mut mask[pos.to_nd_index()];
            if !*slot {
                *slot = true;
                placed += 1;
            }
        }

        log::debug!(
            "placed {} mines on a {}x{} board (seed {})",
            placed,
            config.rows,
            config.cols,
            self.seed
        );
        MineField::from_mask(mask)
    }
}
