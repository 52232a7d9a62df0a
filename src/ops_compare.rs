//! Comparison primitives.
//!
//! Flags are all-ones (-1) for true and all-zero (0) for false, so a
//! flag doubles as a bitwise mask in compiled conditionals. That
//! convention is part of the runtime contract and must hold exactly.

use crate::fault::Fault;
use crate::runtime::Machine;

const TRUE: i64 = -1;
const FALSE: i64 = 0;

impl Machine<'_> {
    /// less-than ( a b -- flag )
    pub fn less_than(&mut self) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(if a < b { TRUE } else { FALSE })
    }

    /// greater-than ( a b -- flag )
    pub fn greater_than(&mut self) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(if a > b { TRUE } else { FALSE })
    }

    /// equal ( a b -- flag )
    pub fn equal(&mut self) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(if a == b { TRUE } else { FALSE })
    }
}
