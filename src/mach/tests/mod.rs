use crate::mach::{Arg, Inst, Opcode, Runtime};


fn inst(op: Opcode, args: Vec<Arg>) -> Inst {
    Inst::new(op, 0, args).unwrap()
}

fn runtime(insts: Vec<Inst>) -> Runtime {
    let mut r = Runtime::default();
    for i in insts {
        r.add_inst(i);
    }
    r
}
