use crate::fault::{Fault, StackId};
use crate::layout::MemoryLayout;
use crate::stack;
use log::debug;

/// The runtime context for one compiled program: the zero-initialized
/// memory region and the two stack pointers. There is no hidden global
/// state; embedders may hold several independent instances (the C ABI
/// surface in [`crate::ffi`] manages a single process-wide one for
/// standalone executables).
pub struct Runtime {
    memory: Vec<u8>,
    /// Data stack pointer, a byte offset into `memory`.
    sp: usize,
    /// Return stack pointer, a byte offset into `memory`.
    rp: usize,
    layout: MemoryLayout,
}

impl Runtime {
    /// Create a runtime with the reference layout.
    pub fn new() -> Result<Self, Fault> {
        Self::with_layout(MemoryLayout::default())
    }

    /// Create a runtime with a negotiated layout. Validates the layout,
    /// allocates and zero-fills the region, and parks both stack
    /// pointers at their bases.
    pub fn with_layout(layout: MemoryLayout) -> Result<Self, Fault> {
        layout.validate()?;
        let mut memory = Vec::new();
        memory
            .try_reserve_exact(layout.memory_capacity)
            .map_err(|_| Fault::Allocation {
                bytes: layout.memory_capacity,
            })?;
        memory.resize(layout.memory_capacity, 0);
        debug!("runtime initialized: {}", layout);
        Ok(Runtime {
            memory,
            sp: layout.data_stack.base,
            rp: layout.return_stack.base,
            layout,
        })
    }

    pub fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    /// The one-time handoff to generated code: the memory region and
    /// the two stack-pointer cells. After this, all mutation flows
    /// through the primitives.
    pub fn state(&mut self) -> (&mut [u8], &mut usize, &mut usize) {
        (&mut self.memory, &mut self.sp, &mut self.rp)
    }

    /// Borrow a [`Machine`] view to execute primitives through.
    pub fn machine(&mut self) -> Machine<'_> {
        Machine {
            layout: self.layout,
            memory: &mut self.memory,
            sp: &mut self.sp,
            rp: &mut self.rp,
        }
    }

    /// Re-zero memory and return both stacks to empty.
    pub fn reset(&mut self) {
        self.memory.fill(0);
        self.sp = self.layout.data_stack.base;
        self.rp = self.layout.return_stack.base;
        debug!("runtime reset");
    }
}

/// A borrowed view of the runtime state with the layout in hand; every
/// primitive operation is a method on this type (see the `ops_*`
/// modules). The C ABI shims build one directly over the raw handles
/// generated code carries.
pub struct Machine<'a> {
    pub memory: &'a mut [u8],
    pub sp: &'a mut usize,
    pub rp: &'a mut usize,
    pub layout: MemoryLayout,
}

impl Machine<'_> {
    /// Push a literal onto the data stack. Generated code inlines its
    /// literals through this same discipline.
    pub fn push(&mut self, value: i64) -> Result<(), Fault> {
        stack::push_cell(
            self.memory,
            self.sp,
            self.layout.data_stack,
            StackId::Data,
            value,
        )
    }

    pub fn pop(&mut self) -> Result<i64, Fault> {
        stack::pop_cell(self.memory, self.sp, self.layout.data_stack, StackId::Data)
    }

    pub fn peek(&self, depth: usize) -> Result<i64, Fault> {
        stack::peek_cell(
            self.memory,
            *self.sp,
            self.layout.data_stack,
            StackId::Data,
            depth,
        )
    }

    pub fn push_return(&mut self, value: i64) -> Result<(), Fault> {
        stack::push_cell(
            self.memory,
            self.rp,
            self.layout.return_stack,
            StackId::Return,
            value,
        )
    }

    pub fn pop_return(&mut self) -> Result<i64, Fault> {
        stack::pop_cell(
            self.memory,
            self.rp,
            self.layout.return_stack,
            StackId::Return,
        )
    }

    pub fn peek_return(&self, depth: usize) -> Result<i64, Fault> {
        stack::peek_cell(
            self.memory,
            *self.rp,
            self.layout.return_stack,
            StackId::Return,
            depth,
        )
    }
}
