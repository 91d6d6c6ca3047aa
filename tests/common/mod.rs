#![allow(dead_code)]
use tube::mach::{Arg, Inst, Opcode, Runtime, Val};

pub fn inst(op: Opcode, args: Vec<Arg>) -> Inst {
    Inst::new(op, 0, args).unwrap()
}

pub fn load(insts: Vec<Inst>) -> Runtime {
    let mut r = Runtime::default();
    for i in insts {
        r.add_inst(i);
    }
    r
}

pub fn exec(runtime: &mut Runtime) -> String {
    runtime.run().unwrap();
    runtime.messages().to_string()
}

pub fn var(runtime: &Runtime, id: i32) -> f32 {
    runtime.vars().get(&id).copied().unwrap_or(Val::ZERO).as_float()
}

pub fn v(id: i32) -> Arg {
    Arg::var(id)
}

pub fn n(i: i32) -> Arg {
    Arg::int(i)
}
