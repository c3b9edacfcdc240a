//! A single 3x3 tic-tac-toe board

use super::{Player, CELLS};

/// One of the nine small boards. Each cell is empty or owned by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SubBoard {
    cells: [Option<Player>; CELLS],
}

impl SubBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sub-board from raw cells (row-major)
    pub fn from_cells(cells: [Option<Player>; CELLS]) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Option<Player>; CELLS] {
        &self.cells
    }

    /// Get the mark at a cell
    #[inline]
    pub fn get(&self, cell: u8) -> Option<Player> {
        self.cells[cell as usize]
    }

    #[inline]
    pub fn is_empty(&self, cell: u8) -> bool {
        self.cells[cell as usize].is_none()
    }

    /// Place a mark. Cells are written at most once under legal play.
    #[inline]
    pub fn place(&mut self, cell: u8, player: Player) {
        debug_assert!(self.is_empty(cell), "cell {cell} already occupied");
        self.cells[cell as usize] = Some(player);
    }

    /// Remove a mark (undo during search)
    #[inline]
    pub fn clear(&mut self, cell: u8) {
        self.cells[cell as usize] = None;
    }

    /// Number of occupied cells
    #[inline]
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Empty cell indices in ascending order
    pub fn empty_cells(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i as u8)
    }

    /// Same board with the two identities exchanged.
    pub fn with_players_swapped(&self) -> Self {
        Self {
            cells: self.cells.map(|c| c.map(Player::opponent)),
        }
    }
}
