//! Character and number I/O primitives.
//!
//! Output goes straight to stdout and input comes straight from stdin,
//! character-buffered; there is no terminal layer. Decimal prints
//! follow the classic convention of a trailing space instead of a
//! newline.

use crate::fault::Fault;
use crate::runtime::Machine;
use std::io::{self, Read, Write};

impl Machine<'_> {
    /// print-signed ( n -- )
    pub fn print_signed(&mut self) -> Result<(), Fault> {
        let value = self.pop()?;
        print!("{} ", value);
        Ok(())
    }

    /// print-unsigned ( u -- )
    pub fn print_unsigned(&mut self) -> Result<(), Fault> {
        let value = self.pop()?;
        print!("{} ", value as u64);
        Ok(())
    }

    /// print-signed-field ( n width -- ), right-justified in a field
    /// of `width` characters. Numbers wider than the field are printed
    /// in full.
    pub fn print_signed_field(&mut self) -> Result<(), Fault> {
        let width = self.pop()?;
        let value = self.pop()?;
        let width = usize::try_from(width).unwrap_or(0);
        print!("{:>width$} ", value, width = width);
        Ok(())
    }

    /// print-unsigned-field ( u width -- )
    pub fn print_unsigned_field(&mut self) -> Result<(), Fault> {
        let width = self.pop()?;
        let value = self.pop()?;
        let width = usize::try_from(width).unwrap_or(0);
        print!("{:>width$} ", value as u64, width = width);
        Ok(())
    }

    /// emit ( c -- ), low byte written verbatim.
    pub fn emit(&mut self) -> Result<(), Fault> {
        let value = self.pop()?;
        let _ = io::stdout().write_all(&[value as u8]);
        Ok(())
    }

    /// key ( -- c ), one character from stdin or -1 at end of input.
    pub fn key(&mut self) -> Result<(), Fault> {
        let mut buf = [0u8; 1];
        let read = io::stdin().read(&mut buf).unwrap_or(0);
        let value = if read == 0 { -1 } else { buf[0] as i64 };
        self.push(value)
    }

    /// newline ( -- )
    pub fn newline(&mut self) -> Result<(), Fault> {
        println!();
        Ok(())
    }

    /// space ( -- )
    pub fn space(&mut self) -> Result<(), Fault> {
        print!(" ");
        Ok(())
    }

    /// type ( addr len -- ), `len` bytes of memory written verbatim.
    /// The whole range is bounds-checked up front; a negative length
    /// is out of bounds.
    pub fn type_out(&mut self) -> Result<(), Fault> {
        let len = self.pop()?;
        let addr = self.pop()?;
        let count = usize::try_from(len).map_err(|_| Fault::OutOfBounds { addr, width: 0 })?;
        let offset = self.check_range(addr, count)?;
        let _ = io::stdout().write_all(&self.memory[offset..offset + count]);
        Ok(())
    }
}
