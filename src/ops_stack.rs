//! Stack-shuffling primitives.
//!
//! All of these exercise the data stack through the cell helpers; the
//! three transfer words (`to-r`, `r-from`, `r-fetch`) are the only
//! primitives that touch the return stack, and they use the same
//! helpers with the same underflow and overflow faults.

use crate::fault::{Fault, StackId};
use crate::layout::CELL_SIZE;
use crate::runtime::Machine;

impl Machine<'_> {
    /// dup ( a -- a a )
    pub fn dup(&mut self) -> Result<(), Fault> {
        let value = self.peek(0)?;
        self.push(value)
    }

    /// drop ( a -- )
    pub fn drop_top(&mut self) -> Result<(), Fault> {
        self.pop()?;
        Ok(())
    }

    /// swap ( a b -- b a )
    pub fn swap(&mut self) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(b)?;
        self.push(a)
    }

    /// over ( a b -- a b a )
    pub fn over(&mut self) -> Result<(), Fault> {
        let a = self.peek(1)?;
        self.push(a)
    }

    /// rot ( a b c -- b c a )
    pub fn rot(&mut self) -> Result<(), Fault> {
        let c = self.pop()?;
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(b)?;
        self.push(c)?;
        self.push(a)
    }

    /// pick ( xn .. x0 n -- xn .. x0 xn )
    pub fn pick(&mut self) -> Result<(), Fault> {
        let n = self.pop()?;
        let depth = usize::try_from(n).map_err(|_| Fault::Underflow(StackId::Data))?;
        let value = self.peek(depth)?;
        self.push(value)
    }

    /// depth ( -- n )
    pub fn depth(&mut self) -> Result<(), Fault> {
        let cells = (*self.sp - self.layout.data_stack.base) / CELL_SIZE;
        self.push(cells as i64)
    }

    /// to-r ( x -- ) (R: -- x)
    pub fn to_r(&mut self) -> Result<(), Fault> {
        let value = self.pop()?;
        self.push_return(value)
    }

    /// r-from (R: x -- ) ( -- x )
    pub fn r_from(&mut self) -> Result<(), Fault> {
        let value = self.pop_return()?;
        self.push(value)
    }

    /// r-fetch (R: x -- x) ( -- x )
    pub fn r_fetch(&mut self) -> Result<(), Fault> {
        let value = self.peek_return(0)?;
        self.push(value)
    }

    /// i ( -- n ), the innermost loop index. Compiled counted loops
    /// keep a two-cell (limit, index) frame on the return stack with
    /// the index on top.
    pub fn loop_i(&mut self) -> Result<(), Fault> {
        let value = self.peek_return(0)?;
        self.push(value)
    }

    /// j ( -- n ), the next-outer loop's index, one frame (two cells)
    /// below the innermost one.
    pub fn loop_j(&mut self) -> Result<(), Fault> {
        let value = self.peek_return(2)?;
        self.push(value)
    }
}
