/*!
## Rust Machine Module

This Rust module is the TubeCode virtual machine: the instruction set,
argument addressing, the stores instructions operate on, and the
fetch-execute engine.

*/

#[macro_use]
mod error;
mod arg;
mod memory;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;
mod state;
mod val;
mod var;

#[cfg(test)]
mod tests;

pub use arg::Arg;
pub use error::Error;
pub use error::ErrorCode;
pub use memory::Memory;
pub use memory::MEMORY_SIZE;
pub use opcode::Opcode;
pub use operation::Operation;
pub use program::Inst;
pub use program::Program;
pub use runtime::Event;
pub use runtime::Runtime;
pub use stack::Entry;
pub use stack::Stack;
pub use state::RANDOM_SEED;
pub use val::format_float;
pub use val::Val;
pub use var::Var;

use state::State;
