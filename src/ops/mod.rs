//! The operator set: a closed family of opcodes sharing one dispatcher and
//! one run protocol.
//!
//! Operators are constructed fresh each tick from the glyphs on the grid and
//! do not persist between ticks. `run` performs the shared protocol: compute
//! the payload, lock every declared port except bang outputs, then write the
//! payload through the output port (bang outputs write BANG/DOT, sensitive
//! outputs may upper-case, see [`Operator::should_upper_case`]).

pub mod arith;
pub mod midi;
pub mod movement;
pub mod routing;
pub mod structural;
pub mod timing;

use log::{debug, warn};
use rand::rngs::StdRng;

use crate::glyph::{BANG_GLYPH, COMMENT_GLYPH, DOT_GLYPH, MIDI_GLYPH};
use crate::grid::Grid;
use crate::ports::{Port, OUTPUT_PORT_NAME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Add,
    Substract,
    Clock,
    Delay,
    East,
    If,
    Generator,
    Halt,
    Increment,
    Jumper,
    Multiply,
    North,
    Random,
    South,
    Track,
    West,
    Bang,
    Comment,
    Midi,
}

impl Opcode {
    fn info(self) -> (&'static str, char) {
        match self {
            Opcode::Add => ("add", 'a'),
            Opcode::Substract => ("substract", 'b'),
            Opcode::Clock => ("clock", 'c'),
            Opcode::Delay => ("delay", 'd'),
            Opcode::East => ("east", 'e'),
            Opcode::If => ("if", 'f'),
            Opcode::Generator => ("generator", 'g'),
            Opcode::Halt => ("halt", 'h'),
            Opcode::Increment => ("increment", 'i'),
            Opcode::Jumper => ("jumper", 'j'),
            Opcode::Multiply => ("multiply", 'm'),
            Opcode::North => ("north", 'n'),
            Opcode::Random => ("random", 'r'),
            Opcode::South => ("south", 's'),
            Opcode::Track => ("track", 't'),
            Opcode::West => ("west", 'w'),
            Opcode::Bang => ("bang", BANG_GLYPH),
            Opcode::Comment => ("comment", COMMENT_GLYPH),
            Opcode::Midi => ("midi", MIDI_GLYPH),
        }
    }

    fn ports(self, x: i32, y: i32) -> Vec<Port> {
        match self {
            Opcode::Add => arith::add_ports(x, y),
            Opcode::Substract => arith::substract_ports(x, y),
            Opcode::Clock => timing::clock_ports(x, y),
            Opcode::Delay => timing::delay_ports(x, y),
            Opcode::If => routing::if_ports(x, y),
            Opcode::Generator => routing::generator_ports(x, y),
            Opcode::Increment => arith::increment_ports(x, y),
            Opcode::Jumper => routing::jumper_ports(x, y),
            Opcode::Multiply => arith::multiply_ports(x, y),
            Opcode::Random => arith::random_ports(x, y),
            Opcode::Track => routing::track_ports(x, y),
            Opcode::Midi => midi::midi_ports(x, y),
            Opcode::East
            | Opcode::West
            | Opcode::North
            | Opcode::South
            | Opcode::Halt
            | Opcode::Bang
            | Opcode::Comment => Vec::new(),
        }
    }
}

/// What an `operation` produced, interpreted by the output port kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// A glyph for a normal output port.
    Glyph(char),
    /// A pulse decision for a bang output port.
    Fire(bool),
    /// Nothing to write.
    None,
}

impl Payload {
    fn is_truthy(self) -> bool {
        match self {
            Payload::Glyph(_) => true,
            Payload::Fire(fired) => fired,
            Payload::None => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Operator {
    pub opcode: Opcode,
    pub x: i32,
    pub y: i32,
    pub name: &'static str,
    /// Upper case iff the operator is passive.
    pub glyph: char,
    /// A passive operator ticks every frame; an active one only when pulsed.
    pub is_passive: bool,
    /// Whether the glyph is re-written to the grid after running.
    pub do_draw: bool,
    pub ports: Vec<Port>,
}

impl Operator {
    /// Build the operator for a grid glyph, or `None` if the glyph is not an
    /// opcode. The glyph's case becomes the operator's passivity.
    pub fn from_glyph(glyph: char, x: i32, y: i32) -> Option<Operator> {
        let opcode = match glyph.to_ascii_lowercase() {
            'a' => Opcode::Add,
            'b' => Opcode::Substract,
            'c' => Opcode::Clock,
            'd' => Opcode::Delay,
            'e' => Opcode::East,
            'f' => Opcode::If,
            'g' => Opcode::Generator,
            'h' => Opcode::Halt,
            'i' => Opcode::Increment,
            'j' => Opcode::Jumper,
            'm' => Opcode::Multiply,
            'n' => Opcode::North,
            'r' => Opcode::Random,
            's' => Opcode::South,
            't' => Opcode::Track,
            'w' => Opcode::West,
            BANG_GLYPH => Opcode::Bang,
            COMMENT_GLYPH => Opcode::Comment,
            MIDI_GLYPH => Opcode::Midi,
            _ => return None,
        };
        Some(Operator::new(opcode, x, y, glyph.is_ascii_uppercase()))
    }

    pub fn new(opcode: Opcode, x: i32, y: i32, is_passive: bool) -> Operator {
        // ':' and '#' have no case to carry passivity; they act every frame.
        let is_passive = is_passive || matches!(opcode, Opcode::Midi | Opcode::Comment);
        let (name, glyph) = opcode.info();
        let glyph = if is_passive {
            glyph.to_ascii_uppercase()
        } else {
            glyph
        };
        let do_draw = is_passive
            && !matches!(
                opcode,
                Opcode::East
                    | Opcode::West
                    | Opcode::North
                    | Opcode::South
                    | Opcode::Bang
                    | Opcode::Comment
            );
        Operator {
            opcode,
            x,
            y,
            name,
            glyph,
            is_passive,
            do_draw,
            ports: opcode.ports(x, y),
        }
    }

    /// The shared run protocol.
    pub fn run(&mut self, grid: &mut Grid, frame: usize, rng: &mut StdRng, force: bool) {
        let payload = self.operation(grid, frame, rng, force);

        for port in &self.ports {
            if port.is_bang() {
                continue;
            }
            debug!(
                "op {} ({}, {}): locking port {} at ({}, {})",
                self.name, self.x, self.y, port.name, port.x, port.y
            );
            grid.lock(port.x, port.y);
        }

        match self.output_port() {
            Some(port) if port.is_bang() => {
                let glyph = if payload.is_truthy() {
                    BANG_GLYPH
                } else {
                    DOT_GLYPH
                };
                grid.poke(port.x, port.y, glyph);
            }
            Some(port) => {
                if let Payload::Glyph(glyph) = payload {
                    self.output_to(grid, port, glyph);
                }
            }
            None => {
                if payload != Payload::None {
                    warn!(
                        "No output port for operator {} @ ({}, {})",
                        self.name, self.x, self.y
                    );
                }
            }
        }

        if self.do_draw {
            grid.poke(self.x, self.y, self.glyph);
        }
    }

    fn operation(&mut self, grid: &mut Grid, frame: usize, rng: &mut StdRng, force: bool) -> Payload {
        match self.opcode {
            Opcode::Add => arith::add(self, grid),
            Opcode::Substract => arith::substract(self, grid),
            Opcode::Clock => timing::clock(self, grid, frame),
            Opcode::Delay => timing::delay(self, grid, frame),
            Opcode::East => movement::move_by(self, grid, 1, 0),
            Opcode::West => movement::move_by(self, grid, -1, 0),
            Opcode::North => movement::move_by(self, grid, 0, -1),
            Opcode::South => movement::move_by(self, grid, 0, 1),
            Opcode::If => routing::if_equal(self, grid),
            Opcode::Generator => routing::generator(self, grid),
            Opcode::Halt => routing::halt(self, grid),
            Opcode::Increment => arith::increment(self, grid),
            Opcode::Jumper => routing::jumper(self, grid),
            Opcode::Multiply => arith::multiply(self, grid),
            Opcode::Random => arith::random(self, grid, rng),
            Opcode::Track => routing::track(self, grid),
            Opcode::Bang => structural::bang(self, grid),
            Opcode::Comment => structural::comment(self, grid),
            Opcode::Midi => midi::midi(self, grid, force),
        }
    }

    /// True iff any of the four orthogonal neighbors holds the glyph.
    pub fn has_neighbor(&self, grid: &Grid, glyph: char) -> bool {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .iter()
            .any(|&(dx, dy)| grid.peek(self.x + dx, self.y + dy) == Some(glyph))
    }

    /// Write DOT at the operator's own cell.
    pub fn erase(&self, grid: &mut Grid) {
        grid.poke(self.x, self.y, DOT_GLYPH);
    }

    /// Write BANG at the operator's own cell.
    pub fn explode(&self, grid: &mut Grid) {
        grid.poke(self.x, self.y, BANG_GLYPH);
    }

    pub fn output_port(&self) -> Option<&Port> {
        self.ports
            .iter()
            .find(|p| p.name == OUTPUT_PORT_NAME && p.is_output())
    }

    /// Look up a declared port. Ports are fixed at construction, so a missing
    /// name is a programming error.
    fn port(&self, name: &str) -> &Port {
        self.ports
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("operator {} has no port {:?}", self.name, name))
    }

    /// The sensitivity rule: the written glyph is upper-cased iff the output
    /// port is sensitive and the glyph east of the operator is a cased letter
    /// currently in upper case.
    fn should_upper_case(&self, grid: &Grid) -> bool {
        if !self.output_port().is_some_and(Port::is_sensitive) {
            return false;
        }
        let east = Port::input("east", self.x + 1, self.y);
        match grid.listen(&east) {
            Some(g) => g.is_ascii_alphabetic() && g.is_ascii_uppercase(),
            None => false,
        }
    }

    fn output_to(&self, grid: &mut Grid, port: &Port, glyph: char) {
        let glyph = if self.should_upper_case(grid) {
            glyph.to_ascii_uppercase()
        } else {
            glyph
        };
        grid.poke(port.x, port.y, glyph);
    }
}
