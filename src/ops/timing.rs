//! Timing operators: clock and delay.

use super::{Operator, Payload};
use crate::glyph;
use crate::grid::Grid;
use crate::ports::{Clamp, Port};

pub(super) fn clock_ports(x: i32, y: i32) -> Vec<Port> {
    vec![
        Port::input("rate", x - 1, y).with_clamp(Clamp::AtLeast(1)),
        Port::input("mod", x + 1, y).with_default('8'),
        Port::output(x, y + 1).sensitive(),
    ]
}

/// `key_of(⌊frame / rate⌋ mod mod)`
///
/// An explicit `0` mod glyph would divide by zero; the operator degrades to
/// no output for that tick.
pub(super) fn clock(op: &Operator, grid: &Grid, frame: usize) -> Payload {
    let rate = grid.listen_as_value(op.port("rate"));
    let modulo = grid.listen_as_value(op.port("mod"));
    if modulo <= 0 {
        return Payload::None;
    }
    let value = (frame / rate as usize) % modulo as usize;
    Payload::Glyph(glyph::key_of(value as i32, false))
}

pub(super) fn delay_ports(x: i32, y: i32) -> Vec<Port> {
    vec![
        Port::input("rate", x - 1, y).with_clamp(Clamp::AtLeast(1)),
        Port::input("mod", x + 1, y).with_default('8'),
        Port::output(x, y + 1).bang(),
    ]
}

/// Fires when `frame mod (mod·rate) == 0`, or every frame when `mod` is 1.
pub(super) fn delay(op: &Operator, grid: &Grid, frame: usize) -> Payload {
    let rate = grid.listen_as_value(op.port("rate"));
    let modulo = grid.listen_as_value(op.port("mod"));
    let span = modulo as i64 * rate as i64;
    if span <= 0 {
        return Payload::Fire(false);
    }
    Payload::Fire(frame as i64 % span == 0 || modulo == 1)
}
