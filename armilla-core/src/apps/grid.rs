//! Launcher grid geometry and hit-testing

use super::AppRegistry;

/// Icons per row
pub const GRID_COLUMNS: usize = 3;
/// Icon cell edge, px
pub const GRID_CELL: i32 = 60;
/// Gap between cells, px
pub const GRID_SPACING: i32 = 20;
/// Top edge of the first row, px
pub const GRID_TOP: i32 = 80;
/// Left edge of the first column, px (centers three cells on a 368 px
/// panel)
pub const GRID_LEFT: i32 = 74;
/// The grid shows at most three rows
pub const GRID_MAX_APPS: usize = 9;

/// Top-left corner of a cell by grid position
pub const fn cell_origin(index: usize) -> (i32, i32) {
    let col = (index % GRID_COLUMNS) as i32;
    let row = (index / GRID_COLUMNS) as i32;
    (
        GRID_LEFT + col * (GRID_CELL + GRID_SPACING),
        GRID_TOP + row * (GRID_CELL + GRID_SPACING),
    )
}

/// Map a tap position to a registry index
///
/// Only the cell interiors are live; taps in the spacing gutters or
/// past the populated cells return `None`. At most `GRID_MAX_APPS`
/// cells are considered even if the registry holds more.
pub fn hit_test(registry: &AppRegistry, x: i32, y: i32) -> Option<usize> {
    let visible = registry.len().min(GRID_MAX_APPS);
    for index in 0..visible {
        let (cx, cy) = cell_origin(index);
        if x >= cx && x < cx + GRID_CELL && y >= cy && y < cy + GRID_CELL {
            return Some(index);
        }
    }
    None
}
