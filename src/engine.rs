//! The per-frame evaluator.
//!
//! One tick: reset the grid's locks and MIDI queue, discover operators in
//! row-major order, then execute each one that is unlocked and either
//! passive or pulsed by a neighboring BANG. Writes and locks made by an
//! earlier operator are visible to every later one in the same tick; the
//! row-major scan plus the lock mask is the only concurrency discipline.

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::glyph::{BANG_GLYPH, DOT_GLYPH};
use crate::grid::Grid;
use crate::ops::Operator;

pub struct Engine {
    grid: Grid,
    frame: usize,
    rng: StdRng,
}

impl Engine {
    /// Evaluator with an OS-seeded generator for the `r` operator.
    pub fn new(grid: Grid) -> Engine {
        Engine {
            grid,
            frame: 0,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Evaluator with a fixed seed, for reproducible runs.
    pub fn with_seed(grid: Grid, seed: u64) -> Engine {
        Engine {
            grid,
            frame: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Run one frame of evaluation.
    pub fn tick(&mut self) {
        self.grid.reset_for_frame();

        let mut operators = discover(&self.grid);
        debug!("frame {}: found {} operators", self.frame, operators.len());

        for op in &mut operators {
            if self.grid.is_locked(op.x, op.y) {
                debug!(
                    "frame {}: skipping locked {} at ({}, {})",
                    self.frame, op.name, op.x, op.y
                );
                continue;
            }
            if op.is_passive || op.has_neighbor(&self.grid, BANG_GLYPH) {
                op.run(&mut self.grid, self.frame, &mut self.rng, false);
                // Movement has already locked the destination; everyone else
                // claims the cell it ran on.
                self.grid.lock(op.x, op.y);
            }
        }

        self.frame += 1;
    }

    /// Run `n` frames back to back.
    pub fn run(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }
}

/// Scan the grid in row-major order and build an operator for every non-DOT
/// cell whose glyph is an opcode.
fn discover(grid: &Grid) -> Vec<Operator> {
    let mut operators = Vec::new();
    for (y, row) in grid.iter_rows().enumerate() {
        for (x, &glyph) in row.iter().enumerate() {
            if glyph == DOT_GLYPH {
                continue;
            }
            match Operator::from_glyph(glyph, x as i32, y as i32) {
                Some(op) => operators.push(op),
                None => debug!("no operator for glyph {:?} at ({}, {})", glyph, x, y),
            }
        }
    }
    operators
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(s: &str) -> Engine {
        Engine::with_seed(Grid::from_string(s).unwrap(), 0)
    }

    #[test]
    fn test_discovery_is_row_major() {
        let grid = Grid::from_string("A.B\n.C.").unwrap();
        let ops: Vec<(i32, i32)> = discover(&grid).iter().map(|op| (op.x, op.y)).collect();
        assert_eq!(ops, vec![(0, 0), (2, 0), (1, 1)]);
    }

    #[test]
    fn test_active_operator_needs_a_pulse() {
        // Lower-case add with no bang stays inert.
        let mut engine = engine("1a2\n...");
        engine.tick();
        assert_eq!(engine.grid().peek(1, 1), Some('.'));
    }

    #[test]
    fn test_operator_locks_its_own_cell() {
        let mut engine = engine("1A2\n...");
        engine.tick();
        assert!(engine.grid().is_locked(1, 0));
    }

    #[test]
    fn test_frame_counter_is_monotonic() {
        let mut engine = engine("...");
        assert_eq!(engine.frame(), 0);
        engine.run(3);
        assert_eq!(engine.frame(), 3);
    }
}
