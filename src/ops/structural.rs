//! Structural glyph operators: bang and comment.

use super::{Operator, Payload};
use crate::grid::Grid;

/// A pulse consumes itself when it runs.
pub(super) fn bang(op: &mut Operator, grid: &mut Grid) -> Payload {
    op.do_draw = false;
    op.erase(grid);
    Payload::None
}

/// Locks the operator's own cell and everything east of it up to and
/// including the closing `#`, or the end of the row.
pub(super) fn comment(op: &Operator, grid: &mut Grid) -> Payload {
    grid.lock(op.x, op.y);
    for x in (op.x + 1)..grid.cols() as i32 {
        grid.lock(x, op.y);
        if grid.peek(x, op.y) == Some(op.glyph) {
            break;
        }
    }
    Payload::None
}
