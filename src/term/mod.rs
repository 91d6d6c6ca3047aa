/*!
## Terminal Host

Interactive driver for the machine. Loads one of the built-in demo
programs and lets the user list, step, run and inspect it.

*/

extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::mach::{Entry, Event, Opcode, Runtime, MEMORY_SIZE};
use ansi_term::Style;
use clap::Parser;
use linefeed::{DefaultTerminal, Interface, ReadResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

mod demo;

const SLICE: u64 = 5000;
const TRACE_FILE: &str = "trace.dat";

/// Command line settings applied to every loaded program.
#[derive(Parser, Debug, Default, PartialEq)]
#[command(name = "tube")]
#[command(about = "Interactive host for the TubeCode machine")]
pub struct Config {
    /// Record every step and write the trace to trace.dat when a program ends
    #[arg(long)]
    pub trace: bool,

    /// Halt a program once its cost reaches this budget
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Report the total cost when a program ends
    #[arg(long)]
    pub cost: bool,

    /// Demo program to load at startup
    pub demo: Option<String>,
}

impl Config {
    fn runtime(&self, name: &str) -> Result<Runtime, String> {
        let program = match demo::build(name) {
            Some(Ok(program)) => program,
            Some(Err(error)) => return Err(error.to_string()),
            None => return Err(format!("No demo named '{}'", name)),
        };
        let mut runtime = Runtime::with_program(program);
        if let Some(timeout) = self.timeout {
            runtime.set_timeout(timeout);
        }
        if self.trace {
            runtime.enable_verbose_trace();
        }
        runtime.count_cost(self.cost);
        Ok(runtime)
    }
}

fn subscriber<W>(filter: EnvFilter, writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer)
        .finish()
}

/// Engine events go to stderr, filtered by `RUST_LOG`.
fn init_logging() {
    let stderr = subscriber(EnvFilter::from_default_env(), std::io::stderr);
    if let Err(error) = tracing::subscriber::set_global_default(stderr) {
        eprintln!("{}", error);
    }
}

pub fn main() {
    init_logging();
    let config = Config::parse();
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    if let Err(error) = main_loop(config, interrupted) {
        eprintln!("{}", error);
    }
}

struct Session {
    interface: Interface<DefaultTerminal>,
    config: Config,
    runtime: Runtime,
    interrupted: Arc<AtomicBool>,
    reported: bool,
}

fn main_loop(config: Config, interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let interface = Interface::new("tube")?;
    interface.set_prompt("tube> ")?;
    let mut session = Session {
        interface,
        config,
        runtime: Runtime::new(),
        interrupted,
        reported: false,
    };
    if let Some(name) = session.config.demo.clone() {
        session.load(&name)?;
    }
    loop {
        let line = match session.interface.read_line()? {
            ReadResult::Input(line) => line,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        let mut words = line.split_whitespace();
        let command = match words.next() {
            Some(command) => command.to_ascii_lowercase(),
            None => continue,
        };
        session.interface.add_history_unique(line.clone());
        let arg = words.next();
        match command.as_str() {
            "list" | "l" => session.write(&listing(&session.runtime, Style::new().reverse()))?,
            "step" | "s" => match arg.map(str::parse::<u64>) {
                None => session.run(Some(1))?,
                Some(Ok(count)) => session.run(Some(count))?,
                Some(Err(_)) => session.error("step: expected a number of steps")?,
            },
            "run" | "r" => session.run(None)?,
            "restart" => {
                session.runtime.restart();
                session.reported = false;
            }
            "vars" => session.write(&vars(&session.runtime))?,
            "arrays" => session.write(&arrays(&session.runtime))?,
            "stack" => session.write(&stack(&session.runtime))?,
            "mem" => session.write(&memory(&session.runtime))?,
            "out" => session.write(session.runtime.messages())?,
            "cost" => session.write(&cost(&session.runtime))?,
            "load" => match arg {
                Some(name) => session.load(name)?,
                None => session.error("load: expected a demo name")?,
            },
            "demos" => session.write(&format!("{}\n", demo::NAMES.join(" ")))?,
            "help" | "?" => session.write(&help())?,
            "quit" | "exit" => break,
            _ => session.error(&format!("Unknown command '{}'", command))?,
        }
    }
    Ok(())
}

impl Session {
    fn write(&self, s: &str) -> std::io::Result<()> {
        self.interface.write_fmt(format_args!("{}", s))
    }

    fn error(&self, s: &str) -> std::io::Result<()> {
        self.interface
            .write_fmt(format_args!("{}\n", Style::new().bold().paint(s)))
    }

    fn load(&mut self, name: &str) -> std::io::Result<()> {
        match self.config.runtime(name) {
            Ok(runtime) => {
                self.runtime = runtime;
                self.reported = false;
                self.write(&format!(
                    "Loaded '{}' ({} instructions)\n",
                    name,
                    self.runtime.len()
                ))
            }
            Err(message) => self.error(&message),
        }
    }

    /// Executes in slices until halted, interrupted or `limit` steps have run.
    fn run(&mut self, limit: Option<u64>) -> std::io::Result<()> {
        self.interrupted.store(false, Ordering::SeqCst);
        let target = limit.map(|count| self.runtime.steps() + count);
        loop {
            if self.interrupted.swap(false, Ordering::SeqCst) {
                self.error(&format!("Interrupted at IP {}", self.runtime.ip()))?;
                break;
            }
            let cycles = match target {
                Some(target) if self.runtime.steps() >= target => break,
                Some(target) => (target - self.runtime.steps()).min(SLICE),
                None => SLICE,
            };
            match self.runtime.execute(cycles as usize) {
                Event::Print(s) => self.write(&s)?,
                Event::Running => {}
                Event::Stopped | Event::Fatal(_) => break,
            }
        }
        loop {
            match self.runtime.execute(0) {
                Event::Print(s) => self.write(&s)?,
                Event::Fatal(_) => self.error("Machine halted on a fatal error.")?,
                Event::Stopped => return self.halted(),
                Event::Running => return Ok(()),
            }
        }
    }

    fn halted(&mut self) -> std::io::Result<()> {
        if self.reported {
            return Ok(());
        }
        self.reported = true;
        if let Some(trace) = self.runtime.trace() {
            if let Err(error) = std::fs::write(TRACE_FILE, trace) {
                return self.error(&format!("{}: {}", TRACE_FILE, error));
            }
            self.write(&format!("Trace written to {}\n", TRACE_FILE))?;
        }
        Ok(())
    }
}

/// Instructions with labels interleaved and the current row styled.
fn listing(runtime: &Runtime, current: Style) -> String {
    let labels = runtime.program().labels_by_addr();
    let mut out = String::new();
    let mut next = labels.iter().peekable();
    for addr in 0..=runtime.len() {
        while let Some((_, name)) = next.next_if(|(at, _)| *at == addr) {
            out.push_str(&format!("{}:\n", name));
        }
        if let Some(inst) = runtime.inst(addr) {
            let row = format!("{:>5}  {}", addr, inst);
            if addr as i32 == runtime.ip() {
                out.push_str(&format!("{}\n", current.paint(row)));
            } else {
                out.push_str(&format!("{}\n", row));
            }
        }
    }
    out
}

fn vars(runtime: &Runtime) -> String {
    let mut out = String::new();
    for (id, val) in runtime.vars() {
        match *id {
            0..=7 => out.push_str(&format!(
                "s{} (reg{}) = {}\n",
                id,
                (b'A' + *id as u8) as char,
                val
            )),
            _ => out.push_str(&format!("s{} = {}\n", id, val)),
        }
    }
    out
}

fn join(vals: &[crate::mach::Val]) -> String {
    vals.iter()
        .map(|v| v.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

fn arrays(runtime: &Runtime) -> String {
    let mut out = String::new();
    for (id, array) in runtime.arrays() {
        out.push_str(&format!("a{}[{}] = {}\n", id, array.len(), join(array)));
    }
    out
}

fn stack(runtime: &Runtime) -> String {
    let mut out = String::new();
    for entry in runtime.stack().iter().rev() {
        match entry {
            Entry::Val(val) => out.push_str(&format!("{}\n", val)),
            Entry::Array(array) => out.push_str(&format!("[{}]\n", join(array))),
        }
    }
    out
}

fn memory(runtime: &Runtime) -> String {
    let mut out = String::new();
    let used = &runtime.memory()[..=runtime.max_mem_set()];
    for (pos, cell) in used.iter().enumerate() {
        if !cell.is_zero() {
            out.push_str(&format!("{}: {}\n", pos, cell));
        }
    }
    out.push_str(&format!(
        "{} of {} positions touched\n",
        runtime.max_mem_set() + 1,
        MEMORY_SIZE
    ));
    out
}

fn cost(runtime: &Runtime) -> String {
    match runtime.timeout() {
        Some(timeout) => format!(
            "cost {} of {} after {} steps\n",
            runtime.cost(),
            timeout,
            runtime.steps()
        ),
        None => format!("cost {} after {} steps\n", runtime.cost(), runtime.steps()),
    }
}

fn help() -> String {
    let mut out = String::from(
        "Commands: list, step [n], run, restart, vars, arrays, stack, mem, out, cost, \
         load <demo>, demos, help, quit\n\n",
    );
    for opcode in Opcode::ALL.iter() {
        out.push_str(&format!(
            "{:<11} {} arg(s), cost {:>3}  {}\n",
            opcode.name(),
            opcode.arity(),
            opcode.cost(),
            opcode.description()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("tube").chain(list.iter().copied()))
    }

    #[test]
    fn test_config_from_args() {
        assert_eq!(args(&[]).unwrap(), Config::default());
        let config = args(&["--trace", "--timeout=500", "countdown", "--cost"]).unwrap();
        assert!(config.trace);
        assert!(config.cost);
        assert_eq!(config.timeout, Some(500));
        assert_eq!(config.demo.as_deref(), Some("countdown"));
        assert!(args(&["--timeout=soon"]).is_err());
        assert!(args(&["--fast"]).is_err());
        assert!(args(&["countdown", "random"]).is_err());
        assert_eq!(args(&["--timeout", "7"]).unwrap().timeout, Some(7));
    }

    #[test]
    fn test_config_applies_to_runtime() {
        let config = args(&["--trace", "--timeout=3"]).unwrap();
        let mut runtime = config.runtime("countdown").unwrap();
        assert_eq!(runtime.timeout(), Some(3));
        runtime.run().unwrap();
        assert!(runtime.trace().unwrap().starts_with(":: 0 :: val_copy"));
        assert!(config.runtime("missing").is_err());
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_engine_events_reach_subscriber() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = subscriber(EnvFilter::new("debug"), move || writer.clone());
        let mut runtime = Config::default().runtime("subtract").unwrap();
        tracing::subscriber::with_default(subscriber, || {
            runtime.add_label("end");
            runtime.add_label("end");
            runtime.restart();
        });
        let log = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(log.contains("label registered"));
        assert!(log.contains("label reused"));
        assert!(log.contains("restart"));
        assert!(!log.contains("step"));
    }

    #[test]
    fn test_cost_flag_reports_once() {
        let config = args(&["--cost"]).unwrap();
        let mut runtime = config.runtime("countdown").unwrap();
        let mut printed = String::new();
        loop {
            match runtime.execute(SLICE as usize) {
                Event::Print(s) => printed.push_str(&s),
                Event::Running => {}
                Event::Stopped | Event::Fatal(_) => break,
            }
        }
        assert!(printed.starts_with("10\n9\n"));
        assert!(printed.ends_with("1\n[[ Total CPU cycles used: 41 ]]\n"));
        assert_eq!(printed.matches("Total CPU").count(), 1);
    }

    #[test]
    fn test_listing() {
        let runtime = Config::default().runtime("countdown").unwrap();
        let text = listing(&runtime, Style::new());
        let expected = [
            "    0  val_copy 10 s0",
            "loop:",
            "    1  out_int s0",
            "    2  out_char 10",
            "    3  sub s0 1 s0",
            "    4  jump_if_n0 s0 loop",
            "",
        ];
        assert_eq!(text, expected.join("\n"));
    }

    #[test]
    fn test_inspection() {
        let mut runtime = Config::default().runtime("memcopy").unwrap();
        runtime.run().unwrap();
        assert_eq!(vars(&runtime), "s0 (regA) = 42\n");
        assert!(memory(&runtime).starts_with("100: 42\n200: 42\n201 of 65536"));
        assert_eq!(cost(&runtime), "cost 302 after 6 steps\n");
        assert_eq!(stack(&runtime), "");
        assert!(help().contains(&format!("{:<11} 3 arg(s), cost   1  Divide", "div")));
    }
}
