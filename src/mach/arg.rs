use super::{format_float, Program, State, Val};
use crate::error;
use crate::mach::Error;
use std::cell::Cell;

type Result<T> = std::result::Result<T, Error>;

/// ## Instruction argument
///
/// An argument is a reference that an instruction reads or writes through.
/// Immediates and labels are read only. Writing the instruction pointer
/// is a jump.

#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Immediate(Val),
    Var(i32),
    Array(i32),
    /// Resolved against the label table on first read, then cached.
    Label(String, Cell<Option<usize>>),
    Ip,
}

impl Arg {
    pub fn int(i: i32) -> Arg {
        Arg::Immediate(Val::from(i))
    }

    pub fn float(f: f32) -> Arg {
        Arg::Immediate(Val::from(f))
    }

    pub fn var(id: i32) -> Arg {
        Arg::Var(id)
    }

    /// Registers `A` through `H` are variables 0 through 7.
    pub fn reg(name: char) -> Option<Arg> {
        match name.to_ascii_uppercase() {
            c @ 'A'..='H' => Some(Arg::Var(c as i32 - 'A' as i32)),
            _ => None,
        }
    }

    pub fn array(id: i32) -> Arg {
        Arg::Array(id)
    }

    pub fn label(name: &str) -> Arg {
        Arg::Label(name.to_string(), Cell::new(None))
    }

    pub fn ip() -> Arg {
        Arg::Ip
    }

    pub fn is_writable(&self) -> bool {
        matches!(self, Arg::Var(_) | Arg::Ip)
    }

    /// Human readable form used by listings and the verbose trace.
    pub fn describe(&self) -> String {
        match self {
            Arg::Immediate(val) => format_float(val.as_float()),
            Arg::Var(id) => format!("s{}", id),
            Arg::Array(id) => format!("a{}", id),
            Arg::Label(name, _) => name.clone(),
            Arg::Ip => "IP".to_string(),
        }
    }

    fn resolve_label(name: &str, cache: &Cell<Option<usize>>, program: &Program) -> Result<usize> {
        if let Some(addr) = cache.get() {
            return Ok(addr);
        }
        let addr = program.find_label(name)?;
        cache.set(Some(addr));
        Ok(addr)
    }

    /// Reads the scalar this argument refers to. An array reads as zero.
    pub(super) fn read(&self, state: &mut State, program: &Program) -> Result<Val> {
        match self {
            Arg::Immediate(val) => Ok(*val),
            Arg::Var(id) => Ok(state.var.fetch(*id)),
            Arg::Array(_) => Ok(Val::ZERO),
            Arg::Label(name, cache) => {
                let addr = Arg::resolve_label(name, cache, program)?;
                Ok(Val::from(addr as i32))
            }
            Arg::Ip => Ok(Val::from(state.ip)),
        }
    }

    /// The id of the array this argument selects. Any other argument
    /// selects the array whose id is its integer value.
    pub(super) fn array_id(&self, state: &mut State, program: &Program) -> Result<i32> {
        match self {
            Arg::Array(id) => Ok(*id),
            _ => Ok(self.read(state, program)?.as_int()),
        }
    }

    pub(super) fn write(&self, state: &mut State, value: Val) -> Result<()> {
        match self {
            Arg::Var(id) => {
                state.var.store(*id, value);
                Ok(())
            }
            Arg::Ip => {
                state.jump(value.as_int());
                Ok(())
            }
            _ => Err(error!(ReadOnlyArgument; &format!(
                "Cannot write to argument '{}'",
                self.describe()
            ))),
        }
    }
}

impl std::fmt::Display for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers() {
        assert_eq!(Arg::reg('A'), Some(Arg::Var(0)));
        assert_eq!(Arg::reg('h'), Some(Arg::Var(7)));
        assert_eq!(Arg::reg('I'), None);
    }

    #[test]
    fn test_describe() {
        assert_eq!(Arg::int(5).describe(), "5");
        assert_eq!(Arg::float(2.5).describe(), "2.5");
        assert_eq!(Arg::var(3).describe(), "s3");
        assert_eq!(Arg::array(2).describe(), "a2");
        assert_eq!(Arg::label("loop").describe(), "loop");
        assert_eq!(Arg::ip().describe(), "IP");
    }

    #[test]
    fn test_writable() {
        assert!(Arg::var(0).is_writable());
        assert!(Arg::ip().is_writable());
        assert!(!Arg::int(0).is_writable());
        assert!(!Arg::label("x").is_writable());
        assert!(!Arg::array(0).is_writable());
    }
}
