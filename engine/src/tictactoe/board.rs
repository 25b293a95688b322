use crate::error::GameError;
use super::types::{Mark, Position};

/// Square grid stored as one row-major buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Mark>,
    size: usize,
}

impl Board {
    pub fn try_new(size: usize) -> Result<Self, GameError> {
        let cell_count = size
            .checked_mul(size)
            .ok_or(GameError::AllocationFailure { cells: usize::MAX })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(cell_count)
            .map_err(|_| GameError::AllocationFailure { cells: cell_count })?;
        cells.resize(cell_count, Mark::Empty);

        Ok(Self { cells, size })
    }

    /// Bulk copy of the grid; fails instead of aborting when memory runs out.
    pub fn try_clone(&self) -> Result<Self, GameError> {
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(self.cells.len())
            .map_err(|_| GameError::AllocationFailure {
                cells: self.cells.len(),
            })?;
        cells.extend_from_slice(&self.cells);

        Ok(Self {
            cells,
            size: self.size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Mark] {
        &self.cells
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        if !self.contains(row, col) {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    /// Writes a mark. Out-of-bounds coordinates are ignored.
    pub fn set(&mut self, row: usize, col: usize, mark: Mark) {
        if !self.contains(row, col) {
            return;
        }
        let index = row * self.size + col;
        self.cells[index] = mark;
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(Mark::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    /// Empty cells in row-major order.
    pub fn available_moves(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Mark::Empty)
            .map(|(index, _)| Position::from_index(index, self.size))
            .collect()
    }

    /// Builds a board from rows such as `"XO."`; `.` and space are empty cells.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        let mut board = Self::try_new(size).unwrap();
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.chars().count(), size, "row {} has the wrong width", row);
            for (col, ch) in line.chars().enumerate() {
                let mark = match ch {
                    'X' => Mark::X,
                    'O' => Mark::O,
                    '.' | ' ' => Mark::Empty,
                    other => panic!("unexpected cell {:?}", other),
                };
                board.set(row, col, mark);
            }
        }
        board
    }

    /// Same board with X and O swapped.
    #[cfg(test)]
    pub(crate) fn relabeled(&self) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|&cell| cell.opponent().unwrap_or(Mark::Empty))
            .collect();
        Self {
            cells,
            size: self.size,
        }
    }
}
