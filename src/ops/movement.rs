//! Movement operators: east, west, north and south share one translation.

use super::{Operator, Payload};
use crate::glyph::{BANG_GLYPH, DOT_GLYPH};
use crate::grid::Grid;

/// Translate the operator by one cell.
///
/// Exploding to BANG replaces the move when the destination is outside the
/// grid or holds anything but DOT/BANG. A successful move erases the origin,
/// rewrites the glyph at the destination and locks it for the rest of the
/// tick.
pub(super) fn move_by(op: &mut Operator, grid: &mut Grid, offset_x: i32, offset_y: i32) -> Payload {
    let new_x = op.x + offset_x;
    let new_y = op.y + offset_y;

    if !grid.is_inside(new_x, new_y) {
        op.explode(grid);
        return Payload::None;
    }

    match grid.peek(new_x, new_y) {
        Some(DOT_GLYPH) | Some(BANG_GLYPH) => {}
        _ => {
            op.explode(grid);
            return Payload::None;
        }
    }

    op.erase(grid);
    op.x = new_x;
    op.y = new_y;
    grid.poke(op.x, op.y, op.glyph);
    grid.lock(op.x, op.y);
    Payload::None
}
