mod common;
use common::*;
use tube::mach::{Arg, Event, Opcode, Val};

#[test]
fn test_timeout_halts_on_crossing_step() {
    let mut r = load(vec![
        inst(Opcode::Load, vec![n(0), v(0)]),
        inst(Opcode::Add, vec![v(0), n(1), v(0)]),
        inst(Opcode::Load, vec![n(0), v(1)]),
        inst(Opcode::OutInt, vec![n(9)]),
    ]);
    r.set_timeout(201);
    assert_eq!(
        exec(&mut r),
        "Reached execution count limit of 201.  Halting.\n"
    );
    assert_eq!(r.cost(), 201);
    assert!(!r.is_running());
}

#[test]
fn test_timeout_in_endless_loop() {
    let mut r = load(vec![
        inst(Opcode::Add, vec![v(0), n(1), v(0)]),
        inst(Opcode::Jump, vec![n(0)]),
    ]);
    r.set_timeout(10);
    r.count_cost(true);
    assert_eq!(
        exec(&mut r),
        "Reached execution count limit of 10.  Halting.\n[[ Total CPU cycles used: 10 ]]\n"
    );
    assert_eq!(var(&r, 0), 5.0);
}

#[test]
fn test_free_instructions_do_not_reach_timeout() {
    let mut r = load(vec![
        inst(Opcode::Nop, vec![]),
        inst(Opcode::DebugStatus, vec![]),
        inst(Opcode::Nop, vec![]),
    ]);
    r.set_timeout(1);
    assert_eq!(exec(&mut r), "");
    assert_eq!(r.cost(), 0);
}

#[test]
fn test_restart_clears_state() {
    let mut r = load(vec![
        inst(Opcode::ValCopy, vec![n(4), v(3)]),
        inst(Opcode::ArSetSiz, vec![Arg::array(1), n(5)]),
        inst(Opcode::Store, vec![n(7), n(300)]),
        inst(Opcode::Push, vec![n(1)]),
        inst(Opcode::ArPush, vec![Arg::array(1)]),
        inst(Opcode::OutInt, vec![v(3)]),
    ]);
    assert_eq!(exec(&mut r), "4");
    assert_eq!(r.stack().len(), 2);
    r.restart();
    assert_eq!(r.ip(), 0);
    assert_eq!(r.cost(), 0);
    assert_eq!(r.steps(), 0);
    assert!(r.vars().is_empty());
    assert!(r.arrays().is_empty());
    assert!(r.stack().is_empty());
    assert_eq!(r.messages(), "");
    assert_eq!(r.max_mem_set(), 0);
    assert!(r.memory().iter().all(|cell| *cell == Val::ZERO));
    assert!(r.is_running());
    assert_eq!(r.len(), 6);
    assert_eq!(exec(&mut r), "4");
}

#[test]
fn test_restart_after_timeout_runs_again() {
    let mut r = load(vec![
        inst(Opcode::OutInt, vec![n(1)]),
        inst(Opcode::OutInt, vec![n(2)]),
    ]);
    r.set_timeout(1);
    assert_eq!(exec(&mut r), "1Reached execution count limit of 1.  Halting.\n");
    r.restart();
    assert_eq!(r.timeout(), Some(1));
    assert_eq!(exec(&mut r), "1Reached execution count limit of 1.  Halting.\n");
}

#[test]
fn test_introspection() {
    let mut r = load(vec![
        inst(Opcode::Add, vec![v(0), Arg::float(0.5), v(1)]),
        inst(Opcode::JumpIf0, vec![v(1), Arg::label("end")]),
    ]);
    r.add_label("end");
    let i = r.inst(0).unwrap();
    assert_eq!(i.name(), "add");
    assert_eq!(i.arg_string(0), "s0");
    assert_eq!(i.arg_string(1), "0.5");
    assert_eq!(i.arg_string(2), "s1");
    assert_eq!(r.inst(1).unwrap().arg_string(1), "end");
    assert!(r.inst(2).is_none());
    assert_eq!(r.labels()["end"], 2);
    exec(&mut r);
    assert_eq!(r.vars().len(), 2);
    assert_eq!(r.vars()[&1], Val::from(0.5));
}

#[test]
fn test_cost_report_when_driven_in_slices() {
    let mut r = load(vec![
        inst(Opcode::OutInt, vec![n(7)]),
        inst(Opcode::Store, vec![n(1), n(0)]),
    ]);
    r.count_cost(true);
    assert_eq!(r.execute(100), Event::Print("7".to_string()));
    assert_eq!(
        r.execute(100),
        Event::Print("[[ Total CPU cycles used: 101 ]]\n".to_string())
    );
    assert_eq!(r.execute(100), Event::Stopped);
    assert_eq!(r.messages(), "7[[ Total CPU cycles used: 101 ]]\n");
}

#[test]
fn test_fatal_halt_has_no_cost_report() {
    let mut r = load(vec![inst(Opcode::Load, vec![n(-1), v(0)])]);
    r.count_cost(true);
    assert!(r.run().is_err());
    assert_eq!(
        r.messages(),
        "ERROR: Cannot index into a negative memory position\n"
    );
}
