use super::Val;
use crate::error;
use crate::mach::Error;

type Result<T> = std::result::Result<T, Error>;

/// Number of cells in linear memory.
pub const MEMORY_SIZE: usize = 1 << 16;

/// ## Linear memory
///
/// A fixed block of cells, zeroed at construction. Any index outside
/// `0..MEMORY_SIZE` is a fatal error.

#[derive(Clone)]
pub struct Memory {
    cells: Vec<Val>,
    max_mem_set: usize,
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Memory {{ used: {:?} }}", &self.cells[..=self.max_mem_set])
    }
}

impl Default for Memory {
    fn default() -> Memory {
        Memory {
            cells: vec![Val::ZERO; MEMORY_SIZE],
            max_mem_set: 0,
        }
    }
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Val::ZERO;
        }
        self.max_mem_set = 0;
    }

    fn index(&self, pos: i32) -> Result<usize> {
        if pos < 0 {
            return Err(error!(MemoryOutOfRange; "Cannot index into a negative memory position"));
        }
        let pos = pos as usize;
        if pos >= self.cells.len() {
            return Err(error!(MemoryOutOfRange; &format!(
                "Limit of {} memory positions available.",
                self.cells.len()
            )));
        }
        Ok(pos)
    }

    pub fn get(&self, pos: i32) -> Result<Val> {
        Ok(self.cells[self.index(pos)?])
    }

    pub fn set(&mut self, pos: i32, value: Val) -> Result<()> {
        let pos = self.index(pos)?;
        self.cells[pos] = value;
        if pos > self.max_mem_set {
            self.max_mem_set = pos;
        }
        Ok(())
    }

    /// Largest index ever written since construction or the last clear.
    pub fn max_mem_set(&self) -> usize {
        self.max_mem_set
    }

    pub fn cells(&self) -> &[Val] {
        &self.cells
    }
}
