use crate::fault::Fault;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Error, Formatter};

/// Width in bytes of one stack cell (a 64-bit signed integer).
pub const CELL_SIZE: usize = 8;

/// Reference layout: 8 MiB of managed memory with two 64 KiB stacks
/// at the bottom. Code generators that do not negotiate a custom
/// layout assume exactly these values.
pub const DEFAULT_MEMORY_CAPACITY: usize = 8 * 1024 * 1024;
pub const DEFAULT_DATA_STACK_BASE: usize = 0x000000;
pub const DEFAULT_DATA_STACK_CAPACITY: usize = 0x010000;
pub const DEFAULT_RETURN_STACK_BASE: usize = 0x010000;
pub const DEFAULT_RETURN_STACK_CAPACITY: usize = 0x010000;

/// One stack's reserved slice of the memory region. The stack grows
/// upward from `base`; `limit()` is one past its last usable byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackRegion {
    pub base: usize,
    pub capacity: usize,
}

impl StackRegion {
    pub fn limit(&self) -> usize {
        self.base + self.capacity
    }

    fn overlaps(&self, other: &StackRegion) -> bool {
        self.base < other.limit() && other.base < self.limit()
    }
}

/// The memory layout contract shared between the runtime and a code
/// generator. Every address a compiled program uses is an offset into
/// a region of `memory_capacity` bytes, with the two stacks living in
/// disjoint sub-ranges of that region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryLayout {
    pub memory_capacity: usize,
    pub data_stack: StackRegion,
    pub return_stack: StackRegion,
}

impl Default for MemoryLayout {
    fn default() -> Self {
        MemoryLayout {
            memory_capacity: DEFAULT_MEMORY_CAPACITY,
            data_stack: StackRegion {
                base: DEFAULT_DATA_STACK_BASE,
                capacity: DEFAULT_DATA_STACK_CAPACITY,
            },
            return_stack: StackRegion {
                base: DEFAULT_RETURN_STACK_BASE,
                capacity: DEFAULT_RETURN_STACK_CAPACITY,
            },
        }
    }
}

impl MemoryLayout {
    /// Check the layout invariants: cell-aligned, non-empty stack
    /// regions that fit inside the memory region without overlapping.
    pub fn validate(&self) -> Result<(), Fault> {
        self.validate_region("data stack", &self.data_stack)?;
        self.validate_region("return stack", &self.return_stack)?;
        if self.data_stack.overlaps(&self.return_stack) {
            return Err(Fault::InvalidLayout(format!(
                "data stack {:#x}..{:#x} overlaps return stack {:#x}..{:#x}",
                self.data_stack.base,
                self.data_stack.limit(),
                self.return_stack.base,
                self.return_stack.limit(),
            )));
        }
        Ok(())
    }

    fn validate_region(&self, name: &str, region: &StackRegion) -> Result<(), Fault> {
        if region.capacity == 0 {
            return Err(Fault::InvalidLayout(format!("{name} has zero capacity")));
        }
        if region.base % CELL_SIZE != 0 || region.capacity % CELL_SIZE != 0 {
            return Err(Fault::InvalidLayout(format!(
                "{name} base {:#x} and capacity {:#x} must be cell-aligned",
                region.base, region.capacity,
            )));
        }
        match region.base.checked_add(region.capacity) {
            Some(limit) if limit <= self.memory_capacity => Ok(()),
            _ => Err(Fault::InvalidLayout(format!(
                "{name} {:#x}+{:#x} does not fit in {:#x} bytes of memory",
                region.base, region.capacity, self.memory_capacity,
            ))),
        }
    }

    /// Parse a layout from TOML text and validate it. Missing fields
    /// fall back to the reference layout.
    pub fn from_toml_str(text: &str) -> Result<Self, Fault> {
        let layout: MemoryLayout =
            toml::from_str(text).map_err(|e| Fault::InvalidLayout(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }
}

impl Display for MemoryLayout {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "{} bytes total, data stack {:#08x}+{:#x}, return stack {:#08x}+{:#x}",
            self.memory_capacity,
            self.data_stack.base,
            self.data_stack.capacity,
            self.return_stack.base,
            self.return_stack.capacity,
        )
    }
}
