//! Runtime support library for compiled Tacit programs.
//!
//! Tacit is a stack-based concatenative language; its compiler emits
//! machine code that calls back into this crate for everything the
//! language cannot inline: character I/O, stack shuffling, arithmetic,
//! comparison, and memory access. The crate owns the flat memory
//! region those calls operate on, the two stacks carved out of it, and
//! the fault policy when a program steps outside the contract.
//!
//! The layers, bottom up:
//! - [`layout`]: the memory layout contract (region size, stack bases
//!   and capacities, cell width) shared with the code generator.
//! - [`stack`]: bounds-checked cell push/pop/peek over either stack.
//! - [`runtime`]: the [`runtime::Runtime`] context owning the region
//!   and both stack pointers, and the [`runtime::Machine`] view the
//!   primitives run through.
//! - `ops_*`: the primitive operation catalog, grouped by family.
//! - [`ffi`]: the `extern "C"` surface compiled objects link against.

pub mod fault;
pub mod ffi;
pub mod layout;
pub mod ops_compare;
pub mod ops_io;
pub mod ops_math;
pub mod ops_memory;
pub mod ops_stack;
pub mod runtime;
pub mod stack;

pub use fault::{Fault, StackId};
pub use layout::{MemoryLayout, StackRegion, CELL_SIZE};
pub use runtime::{Machine, Runtime};

#[cfg(test)]
mod runtime_tests;
#[cfg(test)]
mod stack_tests;
