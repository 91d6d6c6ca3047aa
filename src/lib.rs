//! # TubeCode
//!
//! A small register and stack virtual machine for TubeCode, the assembly
//! language of the Tube compiler course projects.
//!
//! Programs are built through the [`mach`] API: create a
//! [`mach::Runtime`], add instructions and labels, then run it. Everything
//! a program prints lands in a diagnostics buffer alongside any runtime
//! errors.
//!
//! ```
//! use tube::mach::{Arg, Inst, Opcode, Runtime};
//!
//! let mut runtime = Runtime::new();
//! let add = vec![Arg::int(2), Arg::float(0.5), Arg::var(0)];
//! runtime.add_inst(Inst::new(Opcode::Add, 1, add).unwrap());
//! runtime.add_inst(Inst::new(Opcode::OutFloat, 2, vec![Arg::var(0)]).unwrap());
//! runtime.run().unwrap();
//! assert_eq!(runtime.messages(), "2.5");
//! ```
//!
//! The `tube` executable is an interactive host for the built-in demo
//! programs. Run it with `--trace`, `--cost` or `--timeout=N` and the name
//! of a demo, then type `help`.

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/instruction_set.rs"]
#[allow(non_snake_case)]
pub mod __Instruction_Set;

pub mod mach;
pub mod term;
