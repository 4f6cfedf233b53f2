//! Cycle-accurate simulation core for a TIS-100 node grid.
//!
//! Everything advances in lockstep: one `Field::step` call is one machine
//! cycle, split into three strictly ordered sub-phases (regular-node step,
//! IO execute, regular-node finalize). A write posted during step is never
//! consumable in the same cycle.

mod field;
mod image;
mod instr;
mod io;
mod node;
mod port;
mod word;

pub use field::{Field, FieldError, Hcf, IoSpec, LayoutSpec, Link, NodeType, SingleTest};
pub use image::{Image, Pixel};
pub use instr::{Instr, Operand, disassemble};
pub use io::{ImageNode, InputNode, OutputNode};
pub use node::{Activity, HcfFault, T21, T30, WriteStage};
pub use port::Port;
pub use word::{WORD_MAX, WORD_MIN, Word, sat_add, sat_add_clamped, sat_sub};

/// Number of spatial dimensions the port enum is prepared for. The 2-D
/// build uses only the first `2 * DIMENSIONS` directions.
pub const DIMENSIONS: usize = 2;

/// Default instruction capacity of a compute node.
pub const DEF_T21_SIZE: usize = 15;
/// Default word capacity of a stack node.
pub const DEF_T30_SIZE: usize = 15;
