//! Glyph rendering for tag grids.
//!
//! Maps the engine's tags onto the fixed glyph alphabet and joins rows into
//! a printable string. Works for the full level map and for the 5x5 player
//! window alike, since both are plain tag grids.

use warren_core::{EntityType, TagGrid};

/// The display glyph for a tag.
pub const fn glyph(tag: EntityType) -> char {
    match tag {
        EntityType::Wall => 'X',
        EntityType::Space => '.',
        EntityType::HallSpace => '*',
        EntityType::Key => '!',
        EntityType::Exit => '@',
        EntityType::Player => 'P',
        EntityType::Ghost => 'G',
        EntityType::Zombie => 'Z',
        EntityType::Empty => ' ',
    }
}

/// Renders a tag grid as newline-joined glyph rows, top row first.
pub fn render(grid: &TagGrid) -> String {
    grid.rows()
        .map(|row| row.iter().copied().map(glyph).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
