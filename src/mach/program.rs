use super::{Arg, Opcode};
use crate::error;
use crate::mach::Error;
use std::collections::BTreeMap;

type Result<T> = std::result::Result<T, Error>;

/// A single assembled instruction. Never changes once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Inst {
    opcode: Opcode,
    line_number: usize,
    args: Vec<Arg>,
}

impl Inst {
    /// Checks the argument count and that the destination, if any, is writable.
    pub fn new(opcode: Opcode, line_number: usize, args: Vec<Arg>) -> Result<Inst> {
        if args.len() != opcode.arity() {
            return Err(error!(WrongArgumentCount, line_number; &format!(
                "{}: expected {} argument(s), found {}",
                opcode,
                opcode.arity(),
                args.len()
            )));
        }
        if let Some(dest) = opcode.destination() {
            if !args[dest].is_writable() {
                return Err(error!(ReadOnlyArgument, line_number; &format!(
                    "{}: argument {} ('{}') cannot be written",
                    opcode,
                    dest + 1,
                    args[dest]
                )));
            }
        }
        Ok(Inst {
            opcode,
            line_number,
            args,
        })
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn name(&self) -> &'static str {
        self.opcode.name()
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn cost(&self) -> u32 {
        self.opcode.cost()
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Empty string when the argument is absent.
    pub fn arg_string(&self, index: usize) -> String {
        match self.args.get(index) {
            Some(arg) => arg.describe(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for Inst {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.opcode)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// ## Program
///
/// The instruction arena and label table. The assembler appends to it;
/// the runtime only reads it.

#[derive(Debug, Default, Clone)]
pub struct Program {
    insts: Vec<Inst>,
    labels: BTreeMap<String, usize>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    pub fn push(&mut self, inst: Inst) {
        self.insts.push(inst)
    }

    /// Points `name` at the next instruction to be pushed.
    /// Returns true when an existing label was overwritten.
    pub fn label(&mut self, name: &str) -> bool {
        self.labels
            .insert(name.to_string(), self.insts.len())
            .is_some()
    }

    pub fn find_label(&self, name: &str) -> Result<usize> {
        match self.labels.get(name) {
            Some(addr) => Ok(*addr),
            None => Err(error!(UndefinedLabel; &format!("Unknown label '{}'", name))),
        }
    }

    pub fn len(&self) -> usize {
        self.insts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }

    pub fn inst(&self, addr: usize) -> Option<&Inst> {
        self.insts.get(addr)
    }

    pub fn insts(&self) -> &[Inst] {
        &self.insts
    }

    pub fn labels(&self) -> &BTreeMap<String, usize> {
        &self.labels
    }

    /// Labels ordered by position, for listings.
    pub fn labels_by_addr(&self) -> Vec<(usize, &str)> {
        let mut by_addr: Vec<(usize, &str)> = self
            .labels
            .iter()
            .map(|(name, addr)| (*addr, name.as_str()))
            .collect();
        by_addr.sort();
        by_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::ErrorCode;

    #[test]
    fn test_arity_is_checked() {
        let e = Inst::new(Opcode::Add, 3, vec![Arg::int(1)]).unwrap_err();
        assert!(e.is(ErrorCode::WrongArgumentCount));
        assert_eq!(e.line_number(), Some(3));
    }

    #[test]
    fn test_destination_must_be_writable() {
        let e = Inst::new(Opcode::Add, 1, vec![Arg::int(1), Arg::int(2), Arg::int(3)]);
        assert!(e.unwrap_err().is(ErrorCode::ReadOnlyArgument));
        let e = Inst::new(Opcode::Pop, 1, vec![Arg::label("x")]);
        assert!(e.unwrap_err().is(ErrorCode::ReadOnlyArgument));
        assert!(Inst::new(Opcode::Pop, 1, vec![Arg::ip()]).is_ok());
    }

    #[test]
    fn test_display() {
        let inst = Inst::new(Opcode::Add, 1, vec![Arg::var(0), Arg::int(1), Arg::var(0)]).unwrap();
        assert_eq!(inst.to_string(), "add s0 1 s0");
        assert_eq!(inst.arg_string(2), "s0");
        assert_eq!(inst.arg_string(3), "");
    }

    #[test]
    fn test_labels() {
        let mut program = Program::new();
        assert!(!program.label("start"));
        program.push(Inst::new(Opcode::Nop, 1, vec![]).unwrap());
        assert!(!program.label("end"));
        assert!(program.label("start"));
        assert_eq!(program.find_label("start").unwrap(), 1);
        assert!(program.find_label("nowhere").unwrap_err().is(ErrorCode::UndefinedLabel));
        assert_eq!(program.labels_by_addr(), vec![(1, "end"), (1, "start")]);
    }
}
