//! World - owns the grid, the element registry and the random source

use glam::IVec2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use super::ca_update::CellularAutomataUpdater;
use super::{CellAddr, ChunkGrid, GridDims};
use crate::error::GridError;
use crate::simulation::{
    Cell, ConfigError, ElementDefinitions, ElementId, ElementRegistry, Rgba, Role,
};
use crate::world::{NoopStats, SimStats};

/// The simulated world, composed of chunks
pub struct World {
    grid: ChunkGrid,

    /// Element definitions, immutable after construction
    registry: ElementRegistry,

    /// Every random draw of a tick comes from here
    rng: Xoshiro256StarStar,

    /// Element painted by [`World::paint`]
    selected_element: ElementId,

    tick_count: u64,
}

impl World {
    /// Build the registry from definitions and seed a fresh world.
    ///
    /// Any configuration error aborts construction; no partial world exists.
    pub fn new(
        dims: GridDims,
        definitions: &ElementDefinitions,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        dims.validate()?;
        let registry = ElementRegistry::from_definitions(definitions)?;
        Self::from_registry(dims, registry, seed)
    }

    /// Seed a fresh world around an already built registry
    pub fn from_registry(
        dims: GridDims,
        registry: ElementRegistry,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        dims.validate()?;
        let grid = ChunkGrid::new(dims, registry.air(), registry.wall());

        // Prefer a selectable element that is neither background nor boundary
        let selected_element = registry
            .selectable()
            .find(|e| e.role == Role::None)
            .or_else(|| registry.iter().find(|e| e.role == Role::None))
            .map(|e| e.id)
            .unwrap_or_else(|| registry.air());

        log::info!(
            "World created: {}x{} cells in {}x{} chunks of {} cells, {} elements, seed {}",
            dims.total_width(),
            dims.total_height(),
            dims.chunks_x,
            dims.chunks_y,
            dims.chunk_area(),
            registry.len(),
            seed
        );

        Ok(Self {
            grid,
            registry,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            selected_element,
            tick_count: 0,
        })
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) {
        self.tick_with_stats(&mut NoopStats);
    }

    /// Advance by one step, reporting what happened to `stats`
    pub fn tick_with_stats(&mut self, stats: &mut dyn SimStats) {
        // Fresh permutations every tick, chunks first, then cells per chunk
        let chunk_order = self.grid.take_shuffled_chunk_order(&mut self.rng);

        for &chunk_index in &chunk_order {
            let cell_order = self
                .grid
                .chunk_mut(chunk_index)
                .take_shuffled_order(&mut self.rng);

            for &index in &cell_order {
                let pos = self.grid.position_of(CellAddr {
                    chunk: chunk_index,
                    index,
                });
                CellularAutomataUpdater::update_cell(
                    &mut self.grid,
                    &self.registry,
                    pos,
                    stats,
                    &mut self.rng,
                );
            }

            self.grid
                .chunk_mut(chunk_index)
                .restore_cell_order(cell_order);
        }

        self.grid.restore_chunk_order(chunk_order);
        self.grid.flip_epoch();
        self.tick_count += 1;
        log::trace!("tick {} done", self.tick_count);
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Current global epoch
    pub fn epoch(&self) -> bool {
        self.grid.epoch()
    }

    pub fn dims(&self) -> GridDims {
        self.grid.dims()
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Inspect a cell
    pub fn get_cell(&self, world_x: i32, world_y: i32) -> Result<&Cell, GridError> {
        self.grid.get_cell(world_x, world_y)
    }

    /// Paint a single cell. The boundary ring is refused like any other
    /// position outside the writable area.
    pub fn set_cell_type(
        &mut self,
        world_x: i32,
        world_y: i32,
        element: ElementId,
    ) -> Result<(), GridError> {
        if !self.registry.contains(element) {
            return Err(GridError::UnknownElement(element));
        }
        self.grid.world_to_chunk_coords(world_x, world_y)?;
        if self.grid.is_boundary(world_x, world_y) {
            return Err(GridError::OutOfBounds {
                x: world_x,
                y: world_y,
            });
        }
        self.grid.set_element(world_x, world_y, element)
    }

    /// Display color of the element at a position
    pub fn color_at(&self, world_x: i32, world_y: i32) -> Result<Rgba, GridError> {
        let cell = self.grid.get_cell(world_x, world_y)?;
        Ok(self.registry.color(cell.element()))
    }

    pub fn element_color(&self, element: ElementId) -> Rgba {
        self.registry.color(element)
    }

    pub fn selected_element(&self) -> ElementId {
        self.selected_element
    }

    pub fn set_selected_element(&mut self, element: ElementId) -> Result<(), GridError> {
        if !self.registry.contains(element) {
            return Err(GridError::UnknownElement(element));
        }
        self.selected_element = element;
        log::debug!("Selected element: {}", self.registry.get(element).name);
        Ok(())
    }

    /// Paint the selected element with a circular brush.
    ///
    /// Returns how many cells were written; positions outside the writable
    /// area are skipped.
    pub fn paint(&mut self, world_x: i32, world_y: i32, radius: u32) -> usize {
        self.paint_element(world_x, world_y, radius, self.selected_element)
    }

    /// Paint `element` with a circular brush, leaving the selection alone
    pub fn paint_element(
        &mut self,
        world_x: i32,
        world_y: i32,
        radius: u32,
        element: ElementId,
    ) -> usize {
        if !self.registry.contains(element) {
            log::warn!("Cannot paint unknown element {element}");
            return 0;
        }
        let radius = radius as i32;

        let mut painted = 0;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius
                    && self
                        .set_cell_type(world_x + dx, world_y + dy, element)
                        .is_ok()
                {
                    painted += 1;
                }
            }
        }

        log::debug!(
            "Painted {} x{} at ({}, {})",
            self.registry.get(element).name,
            painted,
            world_x,
            world_y
        );
        painted
    }

    /// Number of cells holding each element, indexed by element id
    pub fn census(&self) -> Vec<usize> {
        let mut counts = vec![0; self.registry.len()];
        for (_, cell) in self.cells() {
            if let Some(count) = counts.get_mut(cell.element() as usize) {
                *count += 1;
            }
        }
        counts
    }

    /// Every cell with its world position, chunk by chunk
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, &Cell)> + '_ {
        let dims = self.grid.dims();
        self.grid.chunks().iter().flat_map(move |chunk| {
            let origin_x = chunk.x * dims.chunk_width;
            let origin_y = chunk.y * dims.chunk_height;
            chunk.cells().iter().map(move |cell| {
                let pos = IVec2::new(
                    (origin_x + cell.x as usize) as i32,
                    (origin_y + cell.y as usize) as i32,
                );
                (pos, cell)
            })
        })
    }
}
