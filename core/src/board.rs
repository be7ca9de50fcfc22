use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

/// One game session: mine layout, per-cell visible state, and status.
///
/// Mines are fixed at construction; the board never re-places them and makes
/// no first-click-safe guarantee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mines: MineField,
    cells: Array2<CellState>,
    revealed_safe: CellCount,
    flagged: CellCount,
    status: GameStatus,
    triggered_mine: Option<GridPos>,
}

impl Board {
    pub fn new(mines: MineField) -> Self {
        let size = mines.size();
        Self {
            mines,
            cells: Array2::default(size.to_nd_index()),
            revealed_safe: 0,
            flagged: 0,
            status: GameStatus::default(),
            triggered_mine: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn size(&self) -> GridPos {
        self.mines.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mines.mine_count()
    }

    pub fn mines_left(&self) -> isize {
        self.mines.mine_count() as isize - self.flagged as isize
    }

    pub fn cell_at(&self, pos: GridPos) -> CellState {
        self.cells[pos.to_nd_index()]
    }

    pub fn has_mine_at(&self, pos: GridPos) -> bool {
        self.mines.contains_mine(pos)
    }

    /// Mine that ended the game, set only after a loss.
    pub fn triggered_mine(&self) -> Option<GridPos> {
        self.triggered_mine
    }

    /// Opens a cell. Out-of-bounds positions, non-hidden cells, and finished
    /// games are no-ops rather than errors.
    pub fn reveal(&mut self, pos: GridPos) -> RevealOutcome {
        if self.status.is_terminal() || !self.mines.in_bounds(pos) {
            return RevealOutcome::NoChange;
        }

        if self.cells[pos.to_nd_index()] != CellState::Hidden {
            return RevealOutcome::NoChange;
        }

        if self.mines.contains_mine(pos) {
            self.triggered_mine = Some(pos);
            self.status = GameStatus::Lost;
            log::debug!("mine hit at {:?}", pos);
            return RevealOutcome::HitMine;
        }

        self.flood_fill(pos);

        if self.revealed_safe == self.mines.safe_cell_count() {
            self.status = GameStatus::Won;
            log::debug!("all {} safe cells revealed", self.revealed_safe);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Breadth-first reveal seeded at `start`, which the caller has checked
    /// is a hidden non-mine cell. Zero-count cells expand to their hidden
    /// neighbors; numbered cells form the boundary of the open region.
    fn flood_fill(&mut self, start: GridPos) {
        let bounds = self.mines.size();
        let mut queue = VecDeque::from([start]);

        while let Some(pos) = queue.pop_front() {
            if self.cells[pos.to_nd_index()] != CellState::Hidden {
                continue;
            }

            let count = self.mines.adjacent_mine_count(pos);
            self.cells[pos.to_nd_index()] = CellState::Revealed(count);
            self.revealed_safe += 1;

            // A zero-count cell has no mined neighbors, so expansion can
            // never enqueue a mine. Flagged cells stay closed.
            if count == 0 {
                queue.extend(
                    neighbors(pos, bounds)
                        .filter(|&n| self.cells[n.to_nd_index()] == CellState::Hidden),
                );
            }
        }
    }

    /// Flags or unflags a hidden cell. Revealed cells, out-of-bounds
    /// positions, and finished games are no-ops.
    pub fn toggle_flag(&mut self, pos: GridPos) -> MarkOutcome {
        if self.status.is_terminal() || !self.mines.in_bounds(pos) {
            return MarkOutcome::NoChange;
        }

        match self.cells[pos.to_nd_index()] {
            CellState::Hidden => {
                self.cells[pos.to_nd_index()] = CellState::Flagged;
                self.flagged += 1;
                MarkOutcome::Changed
            }
            CellState::Flagged => {
                self.cells[pos.to_nd_index()] = CellState::Hidden;
                self.flagged -= 1;
                MarkOutcome::Changed
            }
            CellState::Revealed(_) => MarkOutcome::NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: GridPos, mines: &[GridPos]) -> Board {
        Board::new(MineField::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn revealing_a_mine_loses_and_records_the_trigger() {
        let mut board = board((3, 3), &[(1, 1)]);

        assert_eq!(board.reveal((1, 1)), RevealOutcome::HitMine);
        assert_eq!(board.status(), GameStatus::Lost);
        assert_eq!(board.triggered_mine(), Some((1, 1)));
    }

    #[test]
    fn finished_game_ignores_further_input() {
        let mut board = board((3, 3), &[(1, 1)]);
        board.reveal((1, 1));

        let snapshot = board.clone();
        assert_eq!(board.reveal((0, 0)), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag((0, 0)), MarkOutcome::NoChange);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn numbered_cell_reveal_opens_only_itself() {
        // 3x3 with one mine at the center: every safe cell has count 1, so
        // the fill never expands past the clicked cell.
        let mut board = board((3, 3), &[(1, 1)]);

        assert_eq!(board.reveal((0, 0)), RevealOutcome::Revealed);
        assert_eq!(board.cell_at((0, 0)), CellState::Revealed(1));
        assert_eq!(board.cell_at((0, 1)), CellState::Hidden);
    }

    #[test]
    fn center_mine_board_wins_after_each_safe_cell_is_clicked() {
        let mut board = board((3, 3), &[(1, 1)]);

        let safe: [GridPos; 8] = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ];
        let (last, rest) = safe.split_last().unwrap();
        for &pos in rest {
            assert_eq!(board.reveal(pos), RevealOutcome::Revealed);
        }
        assert_eq!(board.reveal(*last), RevealOutcome::Won);
        assert_eq!(board.status(), GameStatus::Won);
    }

    #[test]
    fn flood_fill_opens_zero_region_and_wins() {
        // Single corner mine: (0, 0) has zero adjacency on the far side, the
        // fill sweeps every safe cell and the first click wins.
        let mut board = board((4, 4), &[(0, 0)]);

        assert_eq!(board.reveal((3, 3)), RevealOutcome::Won);
        assert_eq!(board.status(), GameStatus::Won);
        assert_eq!(board.cell_at((0, 0)), CellState::Hidden);
        assert_eq!(board.cell_at((1, 1)), CellState::Revealed(1));
        assert_eq!(board.cell_at((3, 3)), CellState::Revealed(0));
    }

    #[test]
    fn flood_fill_stops_at_numbered_boundary() {
        // Column board: the fill from the top stops at the cell bordering
        // the mine and never crosses it.
        let mut board = board((5, 1), &[(2, 0)]);

        assert_eq!(board.reveal((0, 0)), RevealOutcome::Revealed);
        assert_eq!(board.cell_at((0, 0)), CellState::Revealed(0));
        assert_eq!(board.cell_at((1, 0)), CellState::Revealed(1));
        assert_eq!(board.cell_at((2, 0)), CellState::Hidden);
        assert_eq!(board.cell_at((3, 0)), CellState::Hidden);
        assert_eq!(board.status(), GameStatus::InProgress);
    }

    #[test]
    fn flood_fill_never_reveals_a_mine() {
        let mines = [(0, 3), (2, 3)];
        let mut board = board((4, 4), &mines);

        board.reveal((0, 0));

        for pos in mines {
            assert_eq!(board.cell_at(pos), CellState::Hidden);
        }
    }

    #[test]
    fn flood_fill_does_not_open_flagged_cells() {
        let mut board = board((4, 4), &[(0, 0)]);

        assert_eq!(board.toggle_flag((2, 2)), MarkOutcome::Changed);
        assert_eq!(board.reveal((3, 3)), RevealOutcome::Revealed);

        assert_eq!(board.cell_at((2, 2)), CellState::Flagged);
        assert_eq!(board.status(), GameStatus::InProgress);
    }

    #[test]
    fn revealing_last_safe_cell_wins() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.reveal((0, 1)), RevealOutcome::Revealed);
        assert_eq!(board.reveal((1, 0)), RevealOutcome::Revealed);
        assert_eq!(board.reveal((1, 1)), RevealOutcome::Won);
        assert_eq!(board.status(), GameStatus::Won);
    }

    #[test]
    fn reveal_is_idempotent_on_open_cells() {
        let mut board = board((3, 3), &[(1, 1)]);
        board.reveal((0, 0));

        let snapshot = board.clone();
        assert_eq!(board.reveal((0, 0)), RevealOutcome::NoChange);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn out_of_bounds_positions_are_ignored() {
        let mut board = board((3, 3), &[(1, 1)]);

        assert_eq!(board.reveal((3, 0)), RevealOutcome::NoChange);
        assert_eq!(board.reveal((0, 200)), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag((3, 3)), MarkOutcome::NoChange);
        assert_eq!(board.status(), GameStatus::InProgress);
    }

    #[test]
    fn reveal_skips_flagged_cells() {
        let mut board = board((3, 3), &[(1, 1)]);

        board.toggle_flag((0, 0));
        assert_eq!(board.reveal((0, 0)), RevealOutcome::NoChange);
        assert_eq!(board.cell_at((0, 0)), CellState::Flagged);
    }

    #[test]
    fn flag_toggle_roundtrip_and_counter() {
        let mut board = board((3, 3), &[(1, 1)]);
        assert_eq!(board.mines_left(), 1);

        assert_eq!(board.toggle_flag((0, 0)), MarkOutcome::Changed);
        assert_eq!(board.mines_left(), 0);
        assert_eq!(board.toggle_flag((0, 2)), MarkOutcome::Changed);
        assert_eq!(board.mines_left(), -1);

        assert_eq!(board.toggle_flag((0, 0)), MarkOutcome::Changed);
        assert_eq!(board.cell_at((0, 0)), CellState::Hidden);
        assert_eq!(board.mines_left(), 0);
    }

    #[test]
    fn flagging_a_revealed_cell_is_a_noop() {
        let mut board = board((3, 3), &[(1, 1)]);
        board.reveal((0, 0));

        assert_eq!(board.toggle_flag((0, 0)), MarkOutcome::NoChange);
        assert_eq!(board.cell_at((0, 0)), CellState::Revealed(1));
    }
}
