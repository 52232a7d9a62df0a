use std::fmt;

/// Identifies which of the two stacks an underflow or overflow hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackId {
    Data,
    Return,
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackId::Data => write!(f, "data stack"),
            StackId::Return => write!(f, "return stack"),
        }
    }
}

/// A runtime fault. None of these are recoverable from the point of
/// view of a compiled program: the embedding caller decides whether to
/// abort, log, or tear the runtime down. The standalone surfaces (the
/// C ABI shims and the `tacit-run` driver) print the fault and exit
/// with status 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// The requested memory layout violates its own invariants.
    InvalidLayout(String),
    /// The memory region could not be allocated.
    Allocation { bytes: usize },
    /// Pop or peek below a stack's base.
    Underflow(StackId),
    /// Push past a stack's reserved capacity.
    Overflow(StackId),
    DivisionByZero,
    /// Memory access outside the managed region for the given width.
    OutOfBounds { addr: i64, width: usize },
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::InvalidLayout(reason) => write!(f, "invalid memory layout: {reason}"),
            Fault::Allocation { bytes } => {
                write!(f, "failed to allocate {bytes} bytes of runtime memory")
            }
            Fault::Underflow(stack) => write!(f, "{stack} underflow"),
            Fault::Overflow(stack) => write!(f, "{stack} overflow"),
            Fault::DivisionByZero => write!(f, "division by zero"),
            Fault::OutOfBounds { addr, width } => {
                write!(f, "memory access out of bounds: address {addr} (width {width})")
            }
        }
    }
}

impl std::error::Error for Fault {}
