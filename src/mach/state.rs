use super::{Inst, Memory, Program, Stack, Var};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Runs are reproducible; every machine starts from the same seed.
pub const RANDOM_SEED: u64 = 1;

/// Mutable machine state: the instruction pointer, all three stores,
/// the execution stack and the diagnostics buffers.
pub struct State {
    pub(super) ip: i32,
    pub(super) advance: bool,
    pub(super) var: Var,
    pub(super) memory: Memory,
    pub(super) stack: Stack,
    pub(super) output: String,
    pub(super) trace: Option<String>,
    rng: StdRng,
}

impl Default for State {
    fn default() -> State {
        State {
            ip: 0,
            advance: true,
            var: Var::new(),
            memory: Memory::new(),
            stack: Stack::new(),
            output: String::new(),
            trace: None,
            rng: StdRng::seed_from_u64(RANDOM_SEED),
        }
    }
}

impl State {
    /// Sets the instruction pointer and suppresses the automatic advance.
    pub fn jump(&mut self, addr: i32) {
        self.ip = addr;
        self.advance = false;
    }

    pub fn print(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Uniform in `0..max`. Caller guarantees `max > 0`.
    pub fn random(&mut self, max: i32) -> i32 {
        self.rng.gen_range(0..max)
    }

    /// Resets everything except the random generator and trace setting.
    pub fn clear(&mut self) {
        self.ip = 0;
        self.advance = true;
        self.var.clear();
        self.memory.clear();
        self.stack.clear();
        self.output.clear();
    }

    pub fn enable_trace(&mut self) {
        if self.trace.is_none() {
            self.trace = Some(String::new());
        }
    }

    pub fn trace_step(&mut self, inst: &Inst, program: &Program) {
        if self.trace.is_none() {
            return;
        }
        let mut line = format!(":: {} :: {}", self.ip, inst.name());
        for arg in inst.args() {
            let value = match arg.read(self, program) {
                Ok(val) => val.to_string(),
                Err(_) => "?".to_string(),
            };
            line.push_str(&format!(" {}({})", arg.describe(), value));
        }
        line.push('\n');
        if let Some(trace) = self.trace.as_mut() {
            trace.push_str(&line);
        }
    }

    /// Register and memory dump, only when tracing.
    pub fn debug_status(&mut self) {
        if self.trace.is_none() {
            return;
        }
        let mut dump = String::new();
        for i in 0..8 {
            let reg = (b'A' + i as u8) as char;
            dump.push_str(&format!("reg{}={}  ", reg, self.var.fetch(i)));
        }
        dump.push_str(&format!("IP={}\n", self.ip));
        dump.push_str("Used Mem: ");
        for (i, cell) in self.memory.cells().iter().enumerate() {
            if !cell.is_zero() {
                dump.push_str(&format!("{}:{} ", i, cell));
            }
        }
        dump.push('\n');
        if let Some(trace) = self.trace.as_mut() {
            trace.push_str(&dump);
        }
    }
}
