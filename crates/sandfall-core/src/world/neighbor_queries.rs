//! Neighbor offset tables and lookups

use glam::IVec2;

use super::ChunkGrid;
use crate::simulation::ElementId;

/// All 8 surrounding offsets
///
/// Order: NW, N, NE, W, E, SW, S, SE (y grows downward)
pub const MOORE_OFFSETS: [IVec2; 8] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

/// The 4 orthogonal offsets
///
/// Order: S, E, N, W
pub const ORTHOGONAL_OFFSETS: [IVec2; 4] = [
    IVec2::new(0, 1),
    IVec2::new(1, 0),
    IVec2::new(0, -1),
    IVec2::new(-1, 0),
];

/// Stateless neighbor lookups over the chunk grid
pub struct NeighborQueries;

impl NeighborQueries {
    /// Element at `pos + offset`, `None` when that lies outside the world
    #[inline]
    fn element_at(grid: &ChunkGrid, pos: IVec2, offset: IVec2) -> Option<ElementId> {
        let target = pos + offset;
        grid.get_cell(target.x, target.y).ok().map(|c| c.element())
    }

    /// Whether any existing neighbor at the given offsets holds `element`
    pub fn any_neighbor_is(
        grid: &ChunkGrid,
        pos: IVec2,
        offsets: &[IVec2],
        element: ElementId,
    ) -> bool {
        offsets
            .iter()
            .filter_map(|&offset| Self::element_at(grid, pos, offset))
            .any(|e| e == element)
    }
}
