//! Chunk - fixed-size rectangular block of cells

use crate::simulation::{Cell, ElementId};
use crate::world::WorldRng;

/// A block of cells plus its reusable update-order buffer
#[derive(Clone, Debug)]
pub struct Chunk {
    /// Chunk coordinates (in chunk space, not cell space)
    pub x: usize,
    pub y: usize,

    width: usize,
    height: usize,

    /// Cell data, row-major order
    /// Index = y * width + x
    pub(crate) cells: Vec<Cell>,

    /// Permutation of cell indices, reshuffled every tick
    cell_order: Vec<usize>,
}

impl Chunk {
    /// Create a chunk, asking `seed` for the element of every local position
    pub fn new(
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        mut seed: impl FnMut(usize, usize) -> ElementId,
    ) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for local_y in 0..height {
            for local_x in 0..width {
                cells.push(Cell::new(
                    local_x as u16,
                    local_y as u16,
                    seed(local_x, local_y),
                ));
            }
        }

        Self {
            x,
            y,
            width,
            height,
            cells,
            cell_order: (0..width * height).collect(),
        }
    }

    /// Flat index of a local position
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    /// Get cell at local coordinates, `None` outside the chunk
    pub fn get_cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(self.index_of(x, y))
    }

    /// Get raw cell slice
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reshuffle and hand out the cell order buffer. Give it back with
    /// [`Chunk::restore_cell_order`] so the allocation is reused.
    pub(crate) fn take_shuffled_order<R: WorldRng>(&mut self, rng: &mut R) -> Vec<usize> {
        let mut order = std::mem::take(&mut self.cell_order);
        rng.shuffle(&mut order);
        order
    }

    pub(crate) fn restore_cell_order(&mut self, order: Vec<usize>) {
        debug_assert_eq!(order.len(), self.cells.len());
        self.cell_order = order;
    }
}
