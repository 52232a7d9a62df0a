//! Arithmetic primitives.
//!
//! All arithmetic is 64-bit two's complement and wraps silently on
//! overflow; compiled programs rely on that for modular counters. The
//! one checked case is a zero divisor, which is a fault.

use crate::fault::Fault;
use crate::runtime::Machine;

impl Machine<'_> {
    /// add ( a b -- a+b )
    pub fn add(&mut self) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(a.wrapping_add(b))
    }

    /// sub ( a b -- a-b )
    pub fn sub(&mut self) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(a.wrapping_sub(b))
    }

    /// mul ( a b -- a*b )
    pub fn mul(&mut self) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(a.wrapping_mul(b))
    }

    /// div ( a b -- a/b ), truncating toward zero. Faults on b == 0;
    /// i64::MIN / -1 wraps like the rest of the family.
    pub fn div(&mut self) -> Result<(), Fault> {
        let b = self.pop()?;
        let a = self.pop()?;
        if b == 0 {
            return Err(Fault::DivisionByZero);
        }
        self.push(a.wrapping_div(b))
    }

    /// negate ( n -- -n )
    pub fn negate(&mut self) -> Result<(), Fault> {
        let value = self.pop()?;
        self.push(value.wrapping_neg())
    }
}
