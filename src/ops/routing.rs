//! Value-routing operators: if, generator, halt, jumper, track.

use super::{Operator, Payload};
use crate::grid::Grid;
use crate::ports::{Clamp, Port, OUTPUT_PORT_NAME};

pub(super) fn if_ports(x: i32, y: i32) -> Vec<Port> {
    vec![
        Port::input("a", x - 1, y),
        Port::input("b", x + 1, y),
        Port::output(x, y + 1).bang(),
    ]
}

/// Fires on glyph equality, not value equality: `1` and `*` both decode to
/// harmless values but only identical glyphs bang.
pub(super) fn if_equal(op: &Operator, grid: &Grid) -> Payload {
    let a = grid.listen(op.port("a"));
    let b = grid.listen(op.port("b"));
    Payload::Fire(a == b)
}

pub(super) fn generator_ports(x: i32, y: i32) -> Vec<Port> {
    vec![
        Port::input("x", x - 3, y),
        Port::input("y", x - 2, y),
        Port::input("len", x - 1, y).with_clamp(Clamp::AtLeast(1)),
    ]
}

/// Copies `len` operands from east of the operator to a target row offset by
/// `(x, y+1)`, locking both the operand and target cells.
pub(super) fn generator(op: &Operator, grid: &mut Grid) -> Payload {
    let length = grid.listen_as_value(op.port("len"));
    let x = grid.listen_as_value(op.port("x"));
    let y = grid.listen_as_value(op.port("y")) + 1;

    for offset in 0..length {
        let input = Port::input("operand", op.x + offset + 1, op.y);
        let target = Port::output(op.x + x + offset, op.y + y);
        grid.lock(input.x, input.y);
        grid.lock(target.x, target.y);
        if let Some(glyph) = grid.listen(&input) {
            op.output_to(grid, &target, glyph);
        }
    }
    Payload::None
}

pub(super) fn halt(op: &Operator, grid: &mut Grid) -> Payload {
    grid.lock(op.x, op.y + 1);
    Payload::None
}

pub(super) fn jumper_ports(x: i32, y: i32) -> Vec<Port> {
    vec![Port::input("val", x, y - 1), Port::output(x, y + 1)]
}

/// Carries the northward glyph across to the southward cell.
pub(super) fn jumper(op: &Operator, grid: &mut Grid) -> Payload {
    let output = op.port(OUTPUT_PORT_NAME);
    grid.lock(output.x, output.y);
    match grid.listen(op.port("val")) {
        Some(glyph) => Payload::Glyph(glyph),
        None => Payload::None,
    }
}

pub(super) fn track_ports(x: i32, y: i32) -> Vec<Port> {
    vec![
        Port::input("key", x - 2, y),
        Port::input("len", x - 1, y).with_clamp(Clamp::AtLeast(1)),
        Port::output(x, y + 1),
    ]
}

/// Locks the `len` cells east of the operator and outputs the one selected
/// by `key mod len`.
pub(super) fn track(op: &Operator, grid: &mut Grid) -> Payload {
    let key = grid.listen_as_value(op.port("key"));
    let length = grid.listen_as_value(op.port("len"));

    for offset in 0..length {
        grid.lock(op.x + offset + 1, op.y);
    }

    let selected = Port::input("selected", op.x + 1 + key.rem_euclid(length), op.y);
    match grid.listen(&selected) {
        Some(glyph) => Payload::Glyph(glyph),
        None => Payload::None,
    }
}
