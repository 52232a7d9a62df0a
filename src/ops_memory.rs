//! Memory fetch/store primitives.
//!
//! Addresses on the stack are byte offsets into the managed region.
//! Every access is bounds-checked for its full width before touching
//! memory; a failed check is a fault, never a partial access.

use crate::fault::Fault;
use crate::layout::CELL_SIZE;
use crate::runtime::Machine;
use crate::stack::{cell_at, set_cell_at};

impl Machine<'_> {
    /// Validate that `width` bytes starting at `addr` lie inside the
    /// memory region, returning the offset as a usize.
    pub(crate) fn check_range(&self, addr: i64, width: usize) -> Result<usize, Fault> {
        let capacity = self.layout.memory_capacity;
        match usize::try_from(addr) {
            Ok(offset) if width <= capacity && offset <= capacity - width => Ok(offset),
            _ => Err(Fault::OutOfBounds { addr, width }),
        }
    }

    /// fetch ( addr -- value )
    pub fn fetch(&mut self) -> Result<(), Fault> {
        let addr = self.pop()?;
        let offset = self.check_range(addr, CELL_SIZE)?;
        let value = cell_at(self.memory, offset);
        self.push(value)
    }

    /// store ( value addr -- )
    pub fn store(&mut self) -> Result<(), Fault> {
        let addr = self.pop()?;
        let value = self.pop()?;
        let offset = self.check_range(addr, CELL_SIZE)?;
        set_cell_at(self.memory, offset, value);
        Ok(())
    }

    /// byte-fetch ( addr -- byte ), zero-extended.
    pub fn byte_fetch(&mut self) -> Result<(), Fault> {
        let addr = self.pop()?;
        let offset = self.check_range(addr, 1)?;
        let value = self.memory[offset] as i64;
        self.push(value)
    }

    /// byte-store ( byte addr -- ), low 8 bits only.
    pub fn byte_store(&mut self) -> Result<(), Fault> {
        let addr = self.pop()?;
        let value = self.pop()?;
        let offset = self.check_range(addr, 1)?;
        self.memory[offset] = value as u8;
        Ok(())
    }
}
