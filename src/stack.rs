//! Cell-level access to the two runtime stacks.
//!
//! Both stacks live inside the shared memory region and grow upward
//! from their base; a stack pointer is a byte offset one past the top
//! occupied cell. The helpers are uniform over either stack: callers
//! pass the region descriptor and a mutable reference to whichever
//! pointer they mean. Cells are stored in native byte order.

use crate::fault::{Fault, StackId};
use crate::layout::{StackRegion, CELL_SIZE};

/// Read the cell at `offset`. Caller has already bounds-checked.
pub(crate) fn cell_at(memory: &[u8], offset: usize) -> i64 {
    let mut buf = [0u8; CELL_SIZE];
    buf.copy_from_slice(&memory[offset..offset + CELL_SIZE]);
    i64::from_ne_bytes(buf)
}

/// Write the cell at `offset`. Caller has already bounds-checked.
pub(crate) fn set_cell_at(memory: &mut [u8], offset: usize, value: i64) {
    memory[offset..offset + CELL_SIZE].copy_from_slice(&value.to_ne_bytes());
}

/// Push `value` and advance the stack pointer by one cell. Pushing
/// past the region's capacity is an overflow fault; the neighboring
/// region is never touched.
pub fn push_cell(
    memory: &mut [u8],
    sp: &mut usize,
    region: StackRegion,
    id: StackId,
    value: i64,
) -> Result<(), Fault> {
    if *sp + CELL_SIZE > region.limit() {
        return Err(Fault::Overflow(id));
    }
    set_cell_at(memory, *sp, value);
    *sp += CELL_SIZE;
    Ok(())
}

/// Retreat the stack pointer by one cell and return the cell it now
/// points at. Popping an empty stack is an underflow fault.
pub fn pop_cell(
    memory: &[u8],
    sp: &mut usize,
    region: StackRegion,
    id: StackId,
) -> Result<i64, Fault> {
    if *sp <= region.base {
        return Err(Fault::Underflow(id));
    }
    *sp -= CELL_SIZE;
    Ok(cell_at(memory, *sp))
}

/// Read the cell `depth` positions below the top without moving the
/// pointer (depth 0 = top). Underflows when fewer than `depth + 1`
/// cells are on the stack. The depth check uses checked arithmetic so
/// an absurd depth is an underflow, not a wraparound that lands on the
/// wrong cell.
pub fn peek_cell(
    memory: &[u8],
    sp: usize,
    region: StackRegion,
    id: StackId,
    depth: usize,
) -> Result<i64, Fault> {
    let bytes = match depth.checked_mul(CELL_SIZE) {
        Some(bytes) => bytes,
        None => return Err(Fault::Underflow(id)),
    };
    match region.base.checked_add(bytes) {
        Some(floor) if sp > floor => Ok(cell_at(memory, sp - CELL_SIZE - bytes)),
        _ => Err(Fault::Underflow(id)),
    }
}
