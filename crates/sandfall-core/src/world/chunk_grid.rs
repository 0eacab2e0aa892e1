//! Chunk grid - coordinate translation, cell lookup and the switch primitive

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::Chunk;
use crate::error::GridError;
use crate::simulation::{Cell, ConfigError, ElementId};
use crate::world::WorldRng;

/// Size of the world in chunks, and of each chunk in cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub chunks_x: usize,
    pub chunks_y: usize,
    pub chunk_width: usize,
    pub chunk_height: usize,
}

impl GridDims {
    pub fn new(chunks_x: usize, chunks_y: usize, chunk_width: usize, chunk_height: usize) -> Self {
        Self {
            chunks_x,
            chunks_y,
            chunk_width,
            chunk_height,
        }
    }

    pub fn total_width(&self) -> usize {
        self.chunks_x * self.chunk_width
    }

    pub fn total_height(&self) -> usize {
        self.chunks_y * self.chunk_height
    }

    pub fn chunk_area(&self) -> usize {
        self.chunk_width * self.chunk_height
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks_x * self.chunks_y
    }

    /// Reject sizes the grid cannot represent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunks_x == 0 || self.chunks_y == 0 {
            return Err(ConfigError::InvalidDimensions(format!(
                "chunk grid {}x{} is empty",
                self.chunks_x, self.chunks_y
            )));
        }
        if self.chunk_width == 0 || self.chunk_height == 0 {
            return Err(ConfigError::InvalidDimensions(format!(
                "chunk size {}x{} is empty",
                self.chunk_width, self.chunk_height
            )));
        }
        // Local coordinates are stored as u16
        let max_side = u16::MAX as usize + 1;
        if self.chunk_width > max_side || self.chunk_height > max_side {
            return Err(ConfigError::InvalidDimensions(format!(
                "chunk size {}x{} exceeds {max_side}",
                self.chunk_width, self.chunk_height
            )));
        }
        let too_wide = self
            .chunks_x
            .checked_mul(self.chunk_width)
            .is_none_or(|w| w > i32::MAX as usize);
        let too_tall = self
            .chunks_y
            .checked_mul(self.chunk_height)
            .is_none_or(|h| h > i32::MAX as usize);
        if too_wide || too_tall {
            return Err(ConfigError::InvalidDimensions(
                "world does not fit i32 coordinates".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::new(4, 4, 32, 32)
    }
}

/// Resolved location of a cell: chunk index plus flat index inside the chunk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellAddr {
    pub chunk: usize,
    pub index: usize,
}

/// All chunks of the world in a flat array, plus the global update epoch
#[derive(Clone, Debug)]
pub struct ChunkGrid {
    dims: GridDims,

    /// Chunks, row-major in chunk space
    /// Index = cy * chunks_x + cx
    chunks: Vec<Chunk>,

    /// Permutation of chunk indices, reshuffled every tick
    chunk_order: Vec<usize>,

    /// A cell whose epoch equals this value has advanced this tick
    epoch: bool,
}

impl ChunkGrid {
    /// Build the grid with `wall` on the outer ring and `air` everywhere else.
    ///
    /// Dimensions must have passed [`GridDims::validate`].
    pub fn new(dims: GridDims, air: ElementId, wall: ElementId) -> Self {
        let total_width = dims.total_width();
        let total_height = dims.total_height();

        let mut chunks = Vec::with_capacity(dims.chunk_count());
        for cy in 0..dims.chunks_y {
            for cx in 0..dims.chunks_x {
                chunks.push(Chunk::new(
                    cx,
                    cy,
                    dims.chunk_width,
                    dims.chunk_height,
                    |local_x, local_y| {
                        let world_x = cx * dims.chunk_width + local_x;
                        let world_y = cy * dims.chunk_height + local_y;
                        if world_x == 0
                            || world_y == 0
                            || world_x == total_width - 1
                            || world_y == total_height - 1
                        {
                            wall
                        } else {
                            air
                        }
                    },
                ));
            }
        }

        Self {
            dims,
            chunks,
            chunk_order: (0..dims.chunk_count()).collect(),
            // Fresh cells carry `false`, so they count as not yet advanced
            epoch: true,
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn epoch(&self) -> bool {
        self.epoch
    }

    /// Called once at the end of every tick
    pub fn flip_epoch(&mut self) {
        self.epoch = !self.epoch;
    }

    /// Whether the material in this cell has already advanced this tick
    #[inline]
    pub fn is_advanced(&self, cell: &Cell) -> bool {
        cell.epoch() == self.epoch
    }

    /// Convert world coordinates to chunk index + local cell index
    pub fn world_to_chunk_coords(&self, world_x: i32, world_y: i32) -> Result<CellAddr, GridError> {
        let out_of_bounds = GridError::OutOfBounds {
            x: world_x,
            y: world_y,
        };

        let chunk_x = world_x.div_euclid(self.dims.chunk_width as i32);
        let chunk_y = world_y.div_euclid(self.dims.chunk_height as i32);
        if chunk_x < 0
            || chunk_y < 0
            || chunk_x as usize >= self.dims.chunks_x
            || chunk_y as usize >= self.dims.chunks_y
        {
            return Err(out_of_bounds);
        }

        let local_x = world_x.rem_euclid(self.dims.chunk_width as i32) as usize;
        let local_y = world_y.rem_euclid(self.dims.chunk_height as i32) as usize;
        if local_x >= self.dims.chunk_width || local_y >= self.dims.chunk_height {
            return Err(out_of_bounds);
        }

        Ok(CellAddr {
            chunk: chunk_y as usize * self.dims.chunks_x + chunk_x as usize,
            index: local_y * self.dims.chunk_width + local_x,
        })
    }

    /// World position of a resolved address
    pub fn position_of(&self, addr: CellAddr) -> IVec2 {
        let chunk = &self.chunks[addr.chunk];
        let local_x = addr.index % self.dims.chunk_width;
        let local_y = addr.index / self.dims.chunk_width;
        IVec2::new(
            (chunk.x * self.dims.chunk_width + local_x) as i32,
            (chunk.y * self.dims.chunk_height + local_y) as i32,
        )
    }

    /// Whether the position lies on the outermost ring
    pub fn is_boundary(&self, world_x: i32, world_y: i32) -> bool {
        let max_x = self.dims.total_width() as i32 - 1;
        let max_y = self.dims.total_height() as i32 - 1;
        world_x == 0 || world_y == 0 || world_x == max_x || world_y == max_y
    }

    /// Get cell at world coordinates
    pub fn get_cell(&self, world_x: i32, world_y: i32) -> Result<&Cell, GridError> {
        let addr = self.world_to_chunk_coords(world_x, world_y)?;
        Ok(self.cell_at(addr))
    }

    /// Get mutable cell at world coordinates
    pub fn get_cell_mut(&mut self, world_x: i32, world_y: i32) -> Result<&mut Cell, GridError> {
        let addr = self.world_to_chunk_coords(world_x, world_y)?;
        Ok(&mut self.chunks[addr.chunk].cells[addr.index])
    }

    /// Replace the element at world coordinates, dropping its payload
    pub fn set_element(
        &mut self,
        world_x: i32,
        world_y: i32,
        element: ElementId,
    ) -> Result<(), GridError> {
        self.get_cell_mut(world_x, world_y)?.set_element(element);
        Ok(())
    }

    #[inline]
    pub fn cell_at(&self, addr: CellAddr) -> &Cell {
        &self.chunks[addr.chunk].cells[addr.index]
    }

    /// Exchange the contents of two cells.
    ///
    /// Returns the `from` position when the material that ended up there has
    /// not advanced yet this tick, so the caller can continue with it.
    pub fn switch(&mut self, from: IVec2, to: IVec2) -> Result<Option<IVec2>, GridError> {
        let a = self.world_to_chunk_coords(from.x, from.y)?;
        let b = self.world_to_chunk_coords(to.x, to.y)?;
        if a == b {
            return Err(GridError::SamePosition {
                x: from.x,
                y: from.y,
            });
        }

        let (cell_a, cell_b) = self.cell_pair_mut(a, b);
        Cell::swap_contents(cell_a, cell_b);

        if self.is_advanced(self.cell_at(a)) {
            Ok(None)
        } else {
            Ok(Some(from))
        }
    }

    /// Shuffle and hand out the chunk order buffer
    pub(crate) fn take_shuffled_chunk_order<R: WorldRng>(&mut self, rng: &mut R) -> Vec<usize> {
        let mut order = std::mem::take(&mut self.chunk_order);
        rng.shuffle(&mut order);
        order
    }

    pub(crate) fn restore_chunk_order(&mut self, order: Vec<usize>) {
        debug_assert_eq!(order.len(), self.chunks.len());
        self.chunk_order = order;
    }

    pub(crate) fn chunk_mut(&mut self, index: usize) -> &mut Chunk {
        &mut self.chunks[index]
    }

    fn cell_pair_mut(&mut self, a: CellAddr, b: CellAddr) -> (&mut Cell, &mut Cell) {
        if a.chunk == b.chunk {
            pair_mut(&mut self.chunks[a.chunk].cells, a.index, b.index)
        } else {
            let (chunk_a, chunk_b) = pair_mut(&mut self.chunks, a.chunk, b.chunk);
            (&mut chunk_a.cells[a.index], &mut chunk_b.cells[b.index])
        }
    }
}

/// Two distinct mutable elements of one slice
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
