use super::{Arg, Entry, Inst, Opcode, Operation, Program, State, Val};
use crate::error;
use crate::mach::Error;
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

type Result<T> = std::result::Result<T, Error>;

/// ## Runtime
///
/// Owns the program and all machine state. A host either calls `run_step`
/// and `run` directly or drives the machine in slices with `execute`.
/// Recoverable errors go to the diagnostics buffer and execution continues.
/// Fatal errors also halt the machine and come back as `Err`.

pub struct Runtime {
    program: Program,
    state: State,
    cost: u64,
    steps: u64,
    timeout: Option<u64>,
    count_cost: bool,
    printed: usize,
    fatal: Option<Error>,
}

/// What a slice of execution produced.
#[derive(Debug, PartialEq)]
pub enum Event {
    Stopped,
    Running,
    Print(String),
    Fatal(Error),
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime {
            program: Program::new(),
            state: State::default(),
            cost: 0,
            steps: 0,
            timeout: None,
            count_cost: false,
            printed: 0,
            fatal: None,
        }
    }
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime::default()
    }

    pub fn with_program(program: Program) -> Runtime {
        Runtime {
            program,
            ..Runtime::default()
        }
    }

    pub fn add_inst(&mut self, inst: Inst) {
        self.program.push(inst);
    }

    /// Points a label at the next instruction. Redefining a label overwrites
    /// it and leaves a warning in the diagnostics.
    pub fn add_label(&mut self, name: &str) {
        debug!(label = name, addr = self.program.len(), "label registered");
        if self.program.label(name) {
            warn!(label = name, "label reused");
            self.state
                .print(&format!("Warning: label '{}' being reused!\n", name));
        }
    }

    pub fn find_label(&mut self, name: &str) -> Result<usize> {
        self.program.find_label(name).map_err(|error| {
            self.state.print(&format!("{}\n", error));
            error
        })
    }

    pub fn set_timeout(&mut self, budget: u64) {
        self.timeout = Some(budget);
    }

    /// When set, the step that halts the program reports the total cost used.
    /// A fatal error halts without a report.
    pub fn count_cost(&mut self, enable: bool) {
        self.count_cost = enable;
    }

    /// Idempotent. Once enabled the trace stays on for the life of the machine.
    pub fn enable_verbose_trace(&mut self) {
        self.state.enable_trace();
    }

    pub fn is_running(&self) -> bool {
        self.state.ip >= 0 && (self.state.ip as usize) < self.program.len()
    }

    /// Executes one instruction. Returns `Ok(false)` when halted.
    pub fn run_step(&mut self) -> Result<bool> {
        if !self.is_running() {
            return Ok(false);
        }
        let addr = self.state.ip as usize;
        let program = &self.program;
        let state = &mut self.state;
        let inst = match program.inst(addr) {
            Some(inst) => inst,
            None => return Ok(false),
        };
        state.advance = true;
        self.steps += 1;
        self.cost += inst.cost() as u64;
        trace!(ip = addr, op = inst.name(), cost = self.cost, "step");
        state.trace_step(inst, program);

        if let Err(error) = execute(state, program, inst) {
            state.print(&format!("{}\n", error));
            if error.is_fatal() {
                tracing::error!(ip = addr, line = inst.line_number(), %error, "machine halted");
                state.ip = program.len() as i32;
                state.advance = false;
                self.fatal = Some(error.clone());
                return Err(error);
            }
        }

        if let Some(timeout) = self.timeout {
            if self.cost >= timeout {
                debug!(timeout, cost = self.cost, "execution count limit reached");
                state.print(&format!(
                    "Reached execution count limit of {}.  Halting.\n",
                    timeout
                ));
                state.ip = program.len() as i32;
            }
        }

        if state.advance {
            state.ip += 1;
        }
        if self.count_cost && (state.ip < 0 || state.ip as usize >= program.len()) {
            state.print(&format!("[[ Total CPU cycles used: {} ]]\n", self.cost));
        }
        Ok(true)
    }

    /// Runs until halted.
    pub fn run(&mut self) -> Result<()> {
        while self.run_step()? {}
        Ok(())
    }

    /// Runs at most `cycles` steps, stopping early to hand back new output.
    pub fn execute(&mut self, cycles: usize) -> Event {
        if let Some(event) = self.pending_event() {
            return event;
        }
        if !self.is_running() {
            return Event::Stopped;
        }
        for _ in 0..cycles {
            match self.run_step() {
                Ok(true) => {}
                Ok(false) | Err(_) => break,
            }
            if self.state.output.len() > self.printed {
                break;
            }
        }
        if let Some(event) = self.pending_event() {
            return event;
        }
        if self.is_running() {
            Event::Running
        } else {
            Event::Stopped
        }
    }

    fn pending_event(&mut self) -> Option<Event> {
        if self.state.output.len() > self.printed {
            let s = self.state.output[self.printed..].to_string();
            self.printed = self.state.output.len();
            return Some(Event::Print(s));
        }
        self.fatal.take().map(Event::Fatal)
    }

    /// Back to the first instruction with empty stores. The program,
    /// labels, timeout and trace setting are kept.
    pub fn restart(&mut self) {
        debug!(cost = self.cost, "restart");
        self.state.clear();
        self.cost = 0;
        self.steps = 0;
        self.printed = 0;
        self.fatal = None;
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn len(&self) -> usize {
        self.program.len()
    }

    pub fn is_empty(&self) -> bool {
        self.program.is_empty()
    }

    pub fn inst(&self, addr: usize) -> Option<&Inst> {
        self.program.inst(addr)
    }

    pub fn ip(&self) -> i32 {
        self.state.ip
    }

    pub fn labels(&self) -> &BTreeMap<String, usize> {
        self.program.labels()
    }

    pub fn vars(&self) -> &BTreeMap<i32, Val> {
        self.state.var.vars()
    }

    pub fn arrays(&self) -> &BTreeMap<i32, Vec<Val>> {
        self.state.var.arrays()
    }

    pub fn memory(&self) -> &[Val] {
        self.state.memory.cells()
    }

    pub fn max_mem_set(&self) -> usize {
        self.state.memory.max_mem_set()
    }

    pub fn stack(&self) -> &[Entry] {
        self.state.stack.entries()
    }

    pub fn messages(&self) -> &str {
        &self.state.output
    }

    pub fn trace(&self) -> Option<&str> {
        self.state.trace.as_deref()
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Instructions executed since the last restart.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn timeout(&self) -> Option<u64> {
        self.timeout
    }
}

fn binary(state: &mut State, program: &Program, args: &[Arg], op: fn(Val, Val) -> Val) -> Result<()> {
    let lhs = args[0].read(state, program)?;
    let rhs = args[1].read(state, program)?;
    args[2].write(state, op(lhs, rhs))
}

fn checked(
    state: &mut State,
    program: &Program,
    args: &[Arg],
    op: fn(Val, Val) -> Result<Val>,
) -> Result<()> {
    let lhs = args[0].read(state, program)?;
    let rhs = args[1].read(state, program)?;
    args[2].write(state, op(lhs, rhs)?)
}

fn index_error(inst: &Inst, index: i32, size: usize) -> Error {
    error!(SubscriptOutOfRange, inst.line_number(); &format!(
        "{}: Array index out of bounds (idx={} array_size={}).",
        inst.name(),
        index,
        size
    ))
}

fn execute(state: &mut State, program: &Program, inst: &Inst) -> Result<()> {
    use Opcode::*;
    let args = inst.args();
    match inst.opcode() {
        ValCopy => {
            let val = args[0].read(state, program)?;
            args[1].write(state, val)
        }
        Add => binary(state, program, args, Operation::sum),
        Sub => binary(state, program, args, Operation::subtract),
        Mult => binary(state, program, args, Operation::multiply),
        Div => checked(state, program, args, Operation::divide),
        Mod => checked(state, program, args, Operation::remainder),
        TestLess => binary(state, program, args, Operation::less),
        TestGtr => binary(state, program, args, Operation::greater),
        TestEqu => binary(state, program, args, Operation::equal),
        TestNequ => binary(state, program, args, Operation::not_equal),
        TestGte => binary(state, program, args, Operation::greater_equal),
        TestLte => binary(state, program, args, Operation::less_equal),
        Jump => {
            let addr = args[0].read(state, program)?.as_int();
            state.jump(addr);
            Ok(())
        }
        JumpIf0 | JumpIfN0 => {
            let is_zero = args[0].read(state, program)?.as_int() == 0;
            if is_zero == (inst.opcode() == JumpIf0) {
                let addr = args[1].read(state, program)?.as_int();
                state.jump(addr);
            }
            Ok(())
        }
        Nop => Ok(()),
        Random => {
            let max = args[0].read(state, program)?.as_int();
            if max <= 0 {
                return Err(error!(IllegalFunctionCall; "random: must have a positive upper limit"));
            }
            let val = state.random(max);
            args[1].write(state, Val::from(val))
        }
        OutInt => {
            let val = args[0].read(state, program)?.as_int();
            state.print(&val.to_string());
            Ok(())
        }
        OutFloat => {
            let val = args[0].read(state, program)?;
            state.print(&val.to_string());
            Ok(())
        }
        OutChar => {
            // Latin-1; codes above 127 take two bytes in the UTF-8 sink.
            let ch = args[0].read(state, program)?.as_int() as u8 as char;
            state.print(&ch.to_string());
            Ok(())
        }
        Push => {
            let val = args[0].read(state, program)?;
            state.stack.push(val);
            Ok(())
        }
        Pop => {
            let val = state.stack.pop()?;
            args[0].write(state, val)
        }
        ArPush => {
            let id = args[0].array_id(state, program)?;
            state.stack.push_array(state.var.array(id));
            Ok(())
        }
        ArPop => {
            let id = args[0].array_id(state, program)?;
            state.var.array(id);
            let array = state.stack.pop_array()?;
            state.var.store_array(id, array);
            Ok(())
        }
        ArGetIdx => {
            let id = args[0].array_id(state, program)?;
            let index = args[1].read(state, program)?.as_int();
            let array = state.var.array(id);
            if index < 0 || index as usize >= array.len() {
                return Err(index_error(inst, index, array.len()));
            }
            let val = array[index as usize].as_int();
            args[2].write(state, Val::from(val))
        }
        ArSetIdx => {
            let id = args[0].array_id(state, program)?;
            let index = args[1].read(state, program)?.as_int();
            let size = state.var.array(id).len();
            if index < 0 || index as usize >= size {
                return Err(index_error(inst, index, size));
            }
            let val = args[2].read(state, program)?.as_int();
            state.var.array(id)[index as usize] = Val::from(val);
            Ok(())
        }
        ArGetSiz => {
            let id = args[0].array_id(state, program)?;
            let size = state.var.array(id).len() as i32;
            args[1].write(state, Val::from(size))
        }
        ArSetSiz => {
            let id = args[0].array_id(state, program)?;
            let size = args[1].read(state, program)?.as_int();
            if size < 0 {
                return Err(error!(IllegalArraySize;
                    "ar_set_siz: Cannot set array size to a negative value"));
            }
            state.var.resize_array(id, size as usize);
            Ok(())
        }
        ArCopy => {
            let src = args[0].array_id(state, program)?;
            let dst = args[1].array_id(state, program)?;
            let copy = state.var.array(src).clone();
            state.var.store_array(dst, copy);
            Ok(())
        }
        Load => {
            let pos = args[0].read(state, program)?.as_int();
            let val = state.memory.get(pos)?.as_int();
            args[1].write(state, Val::from(val))
        }
        Store => {
            let val = args[0].read(state, program)?.as_int();
            let pos = args[1].read(state, program)?.as_int();
            state.memory.set(pos, Val::from(val))
        }
        MemCopy => {
            let src = args[0].read(state, program)?.as_int();
            let val = state.memory.get(src)?.as_int();
            let dst = args[1].read(state, program)?.as_int();
            state.memory.set(dst, Val::from(val))
        }
        DebugStatus => {
            state.debug_status();
            Ok(())
        }
    }
}
