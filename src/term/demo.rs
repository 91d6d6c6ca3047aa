use crate::mach::{Arg, Error, Inst, Opcode, Program};

/// Names accepted by `load`.
pub const NAMES: [&str; 4] = ["countdown", "subtract", "random", "memcopy"];

enum Line {
    Label(&'static str),
    Op(Opcode, Vec<Arg>),
}

use Line::*;

fn r(id: i32) -> Arg {
    Arg::var(id)
}

fn n(i: i32) -> Arg {
    Arg::int(i)
}

fn assemble(lines: Vec<Line>) -> Result<Program, Error> {
    let mut program = Program::new();
    for (index, line) in lines.into_iter().enumerate() {
        match line {
            Label(name) => {
                program.label(name);
            }
            Op(opcode, args) => program.push(Inst::new(opcode, index + 1, args)?),
        }
    }
    Ok(program)
}

pub fn build(name: &str) -> Option<Result<Program, Error>> {
    let lines = match name {
        "countdown" => countdown(),
        "subtract" => subtract(),
        "random" => random(),
        "memcopy" => memcopy(),
        _ => return None,
    };
    Some(assemble(lines))
}

/// Prints 10 down to 1, one per line.
fn countdown() -> Vec<Line> {
    vec![
        Op(Opcode::ValCopy, vec![n(10), r(0)]),
        Label("loop"),
        Op(Opcode::OutInt, vec![r(0)]),
        Op(Opcode::OutChar, vec![n(10)]),
        Op(Opcode::Sub, vec![r(0), n(1), r(0)]),
        Op(Opcode::JumpIfN0, vec![r(0), Arg::label("loop")]),
    ]
}

fn subtract() -> Vec<Line> {
    vec![
        Op(Opcode::Push, vec![n(3)]),
        Op(Opcode::Push, vec![n(5)]),
        Op(Opcode::Pop, vec![r(0)]),
        Op(Opcode::Pop, vec![r(1)]),
        Op(Opcode::Sub, vec![r(0), r(1), r(2)]),
        Op(Opcode::OutInt, vec![r(2)]),
        Op(Opcode::OutChar, vec![n(10)]),
    ]
}

/// Fills an array with eight random numbers below 100 and prints it.
fn random() -> Vec<Line> {
    vec![
        Op(Opcode::ArSetSiz, vec![Arg::array(0), n(8)]),
        Op(Opcode::ValCopy, vec![n(0), r(0)]),
        Label("fill"),
        Op(Opcode::Random, vec![n(100), r(1)]),
        Op(Opcode::ArSetIdx, vec![Arg::array(0), r(0), r(1)]),
        Op(Opcode::Add, vec![r(0), n(1), r(0)]),
        Op(Opcode::TestLess, vec![r(0), n(8), r(2)]),
        Op(Opcode::JumpIfN0, vec![r(2), Arg::label("fill")]),
        Op(Opcode::ValCopy, vec![n(0), r(0)]),
        Label("show"),
        Op(Opcode::ArGetIdx, vec![Arg::array(0), r(0), r(1)]),
        Op(Opcode::OutInt, vec![r(1)]),
        Op(Opcode::OutChar, vec![n(32)]),
        Op(Opcode::Add, vec![r(0), n(1), r(0)]),
        Op(Opcode::ArGetSiz, vec![Arg::array(0), r(3)]),
        Op(Opcode::TestLess, vec![r(0), r(3), r(2)]),
        Op(Opcode::JumpIfN0, vec![r(2), Arg::label("show")]),
        Op(Opcode::OutChar, vec![n(10)]),
    ]
}

fn memcopy() -> Vec<Line> {
    vec![
        Op(Opcode::Store, vec![n(42), n(100)]),
        Op(Opcode::MemCopy, vec![n(100), n(200)]),
        Op(Opcode::Load, vec![n(200), r(0)]),
        Op(Opcode::OutFloat, vec![r(0)]),
        Op(Opcode::OutChar, vec![n(10)]),
        Op(Opcode::DebugStatus, vec![]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::Runtime;

    fn run(name: &str) -> Runtime {
        let program = build(name).unwrap().unwrap();
        let mut runtime = Runtime::with_program(program);
        runtime.run().unwrap();
        runtime
    }

    #[test]
    fn test_every_demo_assembles() {
        for name in NAMES.iter() {
            assert!(build(name).unwrap().is_ok(), "{}", name);
        }
        assert!(build("nothing").is_none());
    }

    #[test]
    fn test_countdown() {
        let r = run("countdown");
        assert_eq!(r.messages(), "10\n9\n8\n7\n6\n5\n4\n3\n2\n1\n");
        assert_eq!(r.labels()["loop"], 1);
    }

    #[test]
    fn test_subtract() {
        assert_eq!(run("subtract").messages(), "2\n");
    }

    #[test]
    fn test_random() {
        let r = run("random");
        let printed: Vec<i32> = r
            .messages()
            .split_whitespace()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(printed.len(), 8);
        assert!(printed.iter().all(|n| (0..100).contains(n)));
        assert_eq!(run("random").messages(), r.messages());
    }

    #[test]
    fn test_memcopy() {
        let r = run("memcopy");
        assert_eq!(r.messages(), "42\n");
        assert_eq!(r.max_mem_set(), 200);
        assert!(r.trace().is_none());
    }
}
