use crate::*;
pub use random::*;

mod random;

/// Strategy for laying out mines for a validated configuration.
pub trait MineGenerator {
    fn generate(self, config: &BoardConfig) -> MineField;
}
