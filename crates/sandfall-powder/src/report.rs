//! Text output: ASCII frames and element census

use std::fmt::Write;

use sandfall_core::simulation::{ElementData, Role};
use sandfall_core::world::{TickStats, World};

/// Brightness ramp for ordinary elements, darkest first
const RAMP: &[u8] = b".:-=+*%@";

/// Glyph for an element: blank background, `#` boundary, otherwise a
/// character picked by color brightness
pub fn glyph(element: &ElementData) -> char {
    match element.role {
        Role::Air => ' ',
        Role::Wall => '#',
        Role::None => {
            let [r, g, b, _] = element.color;
            let luma = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
            let index = (luma as usize * RAMP.len() / 256).min(RAMP.len() - 1);
            RAMP[index] as char
        }
    }
}

/// Render the whole grid, one text line per row
pub fn render_ascii(world: &World) -> String {
    let dims = world.dims();
    let registry = world.registry();
    let mut out = String::with_capacity((dims.total_width() + 1) * dims.total_height());

    for y in 0..dims.total_height() as i32 {
        for x in 0..dims.total_width() as i32 {
            let c = world
                .get_cell(x, y)
                .map(|cell| glyph(registry.get(cell.element())))
                .unwrap_or('?');
            out.push(c);
        }
        out.push('\n');
    }
    out
}

/// Element counts, one line per element present
pub fn census_table(world: &World) -> String {
    let registry = world.registry();
    let mut out = String::new();

    for (id, count) in world.census().into_iter().enumerate() {
        if count == 0 {
            continue;
        }
        let element = registry.get(id as u16);
        let _ = writeln!(out, "{:<12} {:>8}", element.key, count);
    }
    out
}

/// One-line summary of accumulated tick statistics
pub fn stats_line(tick: u64, ticks: u64, stats: &TickStats) -> String {
    format!(
        "tick {tick}/{ticks}: {} dispatches, {} moves, {} reactions, {} emissions",
        stats.dispatches, stats.cells_moved, stats.reactions, stats.emissions
    )
}
