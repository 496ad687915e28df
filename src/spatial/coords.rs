//! Conversions between world pixels and grid cells.
//!
//! World space has its origin at the top-left of the map with Y growing down.
//! The exported manifest uses the game's convention instead: origin at the
//! bottom-left and Y growing up.

use macroquad::math::{vec2, Rect, Vec2};

/// Side of a grid cell in pixels.
pub const CELL_SIZE: f32 = 32.0;
/// Object placements snap to this step.
pub const HALF_CELL: f32 = CELL_SIZE / 2.0;

/// A cell position plus the horizontal offset of an object anchor inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPos {
    /// Row of the cell
    pub row: usize,
    /// Column of the cell
    pub col: usize,
    /// Anchor offset from the cell center
    pub offset_x: f32,
}

/// Height of a map with `rows` rows, in pixels.
#[inline]
pub fn map_height_px(rows: usize) -> f32 {
    rows as f32 * CELL_SIZE
}

#[inline]
fn clamp_index(v: f32, len: usize) -> usize {
    if v <= 0.0 {
        0
    } else {
        (v as usize).min(len.saturating_sub(1))
    }
}

/// Cell under a world point, or `None` outside the grid.
#[inline]
pub fn world_to_cell(p: Vec2, rows: usize, cols: usize) -> Option<(usize, usize)> {
    let r = (p.y / CELL_SIZE).floor();
    let c = (p.x / CELL_SIZE).floor();
    if r < 0.0 || c < 0.0 || r >= rows as f32 || c >= cols as f32 {
        return None;
    }
    Some((r as usize, c as usize))
}

/// Row under a world Y, or `None` outside the grid.
#[inline]
pub fn world_to_row(world_y: f32, rows: usize) -> Option<usize> {
    let r = (world_y / CELL_SIZE).floor();
    if r < 0.0 || r >= rows as f32 {
        return None;
    }
    Some(r as usize)
}

/// Snap `world_x` to the half-cell lattice and split it into a column and an
/// offset from that column's center.
///
/// The snapped value is kept inside `[HALF_CELL, cols * CELL_SIZE - HALF_CELL]`,
/// so points beyond either edge land on the nearest edge cell. The returned
/// offset is always `0` or `-HALF_CELL`.
pub fn world_to_col_offset(world_x: f32, cols: usize) -> (usize, f32) {
    let max_x = cols as f32 * CELL_SIZE - HALF_CELL;
    let snapped = ((world_x / HALF_CELL).round_ties_even() * HALF_CELL).clamp(HALF_CELL, max_x);

    let col = clamp_index((snapped / CELL_SIZE).floor(), cols);
    let center = col as f32 * CELL_SIZE + HALF_CELL;
    (col, snapped - center)
}

/// Bottom-center anchor of an object placed in `(row, col)`.
#[inline]
pub fn cell_to_anchor(row: usize, col: usize, offset_x: f32) -> Vec2 {
    vec2(
        col as f32 * CELL_SIZE + HALF_CELL + offset_x,
        row as f32 * CELL_SIZE + CELL_SIZE,
    )
}

/// Screen rectangle of a `w`×`h` sprite pinned by its bottom-center to `anchor`.
#[inline]
pub fn anchor_bounds(anchor: Vec2, w: f32, h: f32) -> Rect {
    Rect::new(anchor.x - w / 2.0, anchor.y - h, w, h)
}

/// Inclusive on every edge, unlike `Rect::contains`.
#[inline]
pub fn bounds_contain(r: &Rect, p: Vec2) -> bool {
    p.x >= r.left() && p.x <= r.right() && p.y >= r.top() && p.y <= r.bottom()
}

/// Y of the sprite center in the exported, up-positive coordinate system.
#[inline]
pub fn to_export_y(anchor_y: f32, height: f32, map_height_px: f32) -> f32 {
    map_height_px - (anchor_y - height / 2.0)
}

/// Inverse of the export transform: recover the cell and offset of an exported point.
pub fn export_to_cell(p: Vec2, map_height_px: f32, rows: usize, cols: usize) -> CellPos {
    let y_top = map_height_px - p.y;
    let row = clamp_index((y_top / CELL_SIZE).floor(), rows);
    let col = clamp_index((p.x / CELL_SIZE).floor(), cols);

    let center = col as f32 * CELL_SIZE + HALF_CELL;
    let offset_x = (p.x - center).clamp(-HALF_CELL, HALF_CELL);
    CellPos { row, col, offset_x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_to_half_cells() {
        assert_eq!(world_to_col_offset(50.0, 34), (1, 0.0));
        assert_eq!(world_to_col_offset(63.0, 34), (2, -16.0));
        // ties go to the even multiple
        assert_eq!(world_to_col_offset(40.0, 34), (1, -16.0));
        assert_eq!(world_to_col_offset(56.0, 34), (2, -16.0));
    }

    #[test]
    fn clamps_beyond_the_grid() {
        assert_eq!(world_to_col_offset(-500.0, 34), (0, 0.0));
        assert_eq!(world_to_col_offset(1e6, 34), (33, 0.0));
        assert_eq!(world_to_col_offset(f32::NEG_INFINITY, 10), (0, 0.0));
    }

    #[test]
    fn offset_is_always_a_half_cell_multiple() {
        let mut x = -100.0f32;
        while x < 34.0 * CELL_SIZE + 100.0 {
            let (col, off) = world_to_col_offset(x, 34);
            assert!(col < 34);
            assert_eq!((off / HALF_CELL).fract(), 0.0, "x={x} off={off}");
            assert!(off == 0.0 || off == -HALF_CELL);
            x += 3.7;
        }
    }

    #[test]
    fn export_y_inverts() {
        let rows = 21;
        let h = map_height_px(rows);
        for row in 0..rows {
            for &icon_h in &[32.0, 48.0, 17.0] {
                let anchor = cell_to_anchor(row, 3, -16.0);
                let y = to_export_y(anchor.y, icon_h, h);
                let pos = export_to_cell(vec2(anchor.x, y), h, rows, 34);
                assert_eq!((pos.row, pos.col, pos.offset_x), (row, 3, -16.0));
            }
        }
    }

    #[test]
    fn finish_example_coordinates() {
        let anchor = cell_to_anchor(2, 3, 0.0);
        assert_eq!(anchor, vec2(112.0, 96.0));
        assert_eq!(to_export_y(anchor.y, 32.0, map_height_px(21)), 592.0);
    }

    #[test]
    fn bounds_are_inclusive() {
        let r = anchor_bounds(vec2(48.0, 64.0), 32.0, 32.0);
        assert!(bounds_contain(&r, vec2(32.0, 32.0)));
        assert!(bounds_contain(&r, vec2(64.0, 64.0)));
        assert!(!bounds_contain(&r, vec2(64.1, 64.0)));
    }

    #[test]
    fn world_to_cell_rejects_outside() {
        assert_eq!(world_to_cell(vec2(33.0, 70.0), 21, 34), Some((2, 1)));
        assert_eq!(world_to_cell(vec2(-0.5, 10.0), 21, 34), None);
        assert_eq!(world_to_cell(vec2(10.0, 21.0 * CELL_SIZE), 21, 34), None);
    }
}
