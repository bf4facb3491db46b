//! Arithmetic operators: add, substract, multiply, increment, random.
//!
//! All results are bounded to the 36-glyph alphabet by `key_of`.

use rand::rngs::StdRng;
use rand::Rng;

use super::{Operator, Payload};
use crate::glyph;
use crate::grid::Grid;
use crate::ports::{Port, OUTPUT_PORT_NAME};

pub(super) fn add_ports(x: i32, y: i32) -> Vec<Port> {
    vec![
        Port::input("a", x - 1, y),
        Port::input("b", x + 1, y),
        Port::output(x, y + 1).sensitive(),
    ]
}

/// `key_of(value(a) + value(b))`
pub(super) fn add(op: &Operator, grid: &Grid) -> Payload {
    let index = grid.listen_as_value(op.port("a")) + grid.listen_as_value(op.port("b"));
    Payload::Glyph(glyph::key_of(index, false))
}

pub(super) fn substract_ports(x: i32, y: i32) -> Vec<Port> {
    vec![
        Port::input("a", x - 1, y),
        Port::input("b", x + 1, y),
        Port::output(x, y + 1).sensitive(),
    ]
}

/// `key_of(|value(b) - value(a)|)`
pub(super) fn substract(op: &Operator, grid: &Grid) -> Payload {
    let a = grid.listen_as_value(op.port("a"));
    let b = grid.listen_as_value(op.port("b"));
    Payload::Glyph(glyph::key_of((b - a).abs(), false))
}

pub(super) fn multiply_ports(x: i32, y: i32) -> Vec<Port> {
    vec![
        Port::input("a", x - 1, y),
        Port::input("b", x + 1, y),
        Port::output(x, y + 1).sensitive(),
    ]
}

/// `key_of(value(a) * value(b))`
pub(super) fn multiply(op: &Operator, grid: &Grid) -> Payload {
    let a = grid.listen_as_value(op.port("a"));
    let b = grid.listen_as_value(op.port("b"));
    Payload::Glyph(glyph::key_of(a * b, false))
}

pub(super) fn increment_ports(x: i32, y: i32) -> Vec<Port> {
    vec![
        Port::input("step", x - 1, y).with_default('1'),
        Port::input("mod", x + 1, y),
        Port::output(x, y + 1).sensitive(),
    ]
}

/// Steps the value already sitting on the output cell, modulo `mod` (or the
/// full alphabet when `mod` is unset).
pub(super) fn increment(op: &Operator, grid: &Grid) -> Payload {
    let step = grid.listen_as_value(op.port("step"));
    let modulo = grid.listen_as_value(op.port("mod"));
    let out = grid.listen_as_value(op.port(OUTPUT_PORT_NAME));
    let modulo = if modulo > 0 { modulo } else { 36 };
    Payload::Glyph(glyph::key_of((out + step).rem_euclid(modulo), false))
}

pub(super) fn random_ports(x: i32, y: i32) -> Vec<Port> {
    vec![
        Port::input("min", x - 1, y),
        Port::input("max", x + 1, y),
        Port::output(x, y + 1).sensitive(),
    ]
}

/// Uniform draw in `[min, max]` from the engine's injected generator.
pub(super) fn random(op: &Operator, grid: &Grid, rng: &mut StdRng) -> Payload {
    let low = grid.listen_as_value(op.port("min"));
    let high = grid.listen_as_value(op.port("max"));
    if low > high {
        return Payload::None;
    }
    Payload::Glyph(glyph::key_of(rng.random_range(low..=high), false))
}
