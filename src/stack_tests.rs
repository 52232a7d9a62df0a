use crate::fault::{Fault, StackId};
use crate::layout::{MemoryLayout, StackRegion, CELL_SIZE};
use crate::stack::{peek_cell, pop_cell, push_cell};

use test_log::test;

fn region() -> StackRegion {
    MemoryLayout::default().data_stack
}

fn memory() -> Vec<u8> {
    vec![0u8; 0x20000]
}

#[test]
fn pointer_tracks_pushes_and_pops() -> Result<(), Fault> {
    let region = region();
    let mut memory = memory();
    let mut sp = region.base;

    for value in 0..10 {
        push_cell(&mut memory, &mut sp, region, StackId::Data, value)?;
    }
    for _ in 0..4 {
        pop_cell(&memory, &mut sp, region, StackId::Data)?;
    }
    push_cell(&mut memory, &mut sp, region, StackId::Data, 99)?;

    // 11 pushes, 4 pops
    assert_eq!(sp, region.base + CELL_SIZE * 7);
    Ok(())
}

#[test]
fn push_pop_round_trip() -> Result<(), Fault> {
    let region = region();
    let mut memory = memory();
    let mut sp = region.base;

    for value in [0, 1, -1, 42, i64::MAX, i64::MIN, 0x0123_4567_89ab_cdef] {
        let before = sp;
        push_cell(&mut memory, &mut sp, region, StackId::Data, value)?;
        assert_eq!(pop_cell(&memory, &mut sp, region, StackId::Data)?, value);
        assert_eq!(sp, before);
    }
    Ok(())
}

#[test]
fn pop_empty_stack_underflows() {
    let region = region();
    let memory = memory();
    let mut sp = region.base;

    assert_eq!(
        pop_cell(&memory, &mut sp, region, StackId::Data),
        Err(Fault::Underflow(StackId::Data))
    );
}

#[test]
fn peek_reads_without_moving_the_pointer() -> Result<(), Fault> {
    let region = region();
    let mut memory = memory();
    let mut sp = region.base;

    push_cell(&mut memory, &mut sp, region, StackId::Data, 10)?;
    push_cell(&mut memory, &mut sp, region, StackId::Data, 20)?;
    push_cell(&mut memory, &mut sp, region, StackId::Data, 30)?;

    assert_eq!(peek_cell(&memory, sp, region, StackId::Data, 0)?, 30);
    assert_eq!(peek_cell(&memory, sp, region, StackId::Data, 1)?, 20);
    assert_eq!(peek_cell(&memory, sp, region, StackId::Data, 2)?, 10);
    assert_eq!(sp, region.base + CELL_SIZE * 3);
    Ok(())
}

#[test]
fn peek_past_depth_underflows() -> Result<(), Fault> {
    let region = region();
    let mut memory = memory();
    let mut sp = region.base;

    push_cell(&mut memory, &mut sp, region, StackId::Data, 1)?;
    push_cell(&mut memory, &mut sp, region, StackId::Data, 2)?;

    assert_eq!(
        peek_cell(&memory, sp, region, StackId::Data, 2),
        Err(Fault::Underflow(StackId::Data))
    );
    Ok(())
}

// A depth large enough that depth * CELL_SIZE wraps usize must still
// report underflow rather than sneaking past the bounds check.
#[test]
fn peek_with_extreme_depth_underflows() -> Result<(), Fault> {
    let region = region();
    let mut memory = memory();
    let mut sp = region.base;

    push_cell(&mut memory, &mut sp, region, StackId::Data, 42)?;

    for depth in [1usize << 61, usize::MAX / CELL_SIZE + 1, usize::MAX] {
        assert_eq!(
            peek_cell(&memory, sp, region, StackId::Data, depth),
            Err(Fault::Underflow(StackId::Data))
        );
    }
    Ok(())
}

// Running a stack past its reserved capacity is a checked fault here,
// symmetric with underflow, where a pure pointer-bump implementation
// would silently spill into the neighboring region.
#[test]
fn push_past_capacity_overflows() -> Result<(), Fault> {
    let region = region();
    let mut memory = memory();
    let mut sp = region.base;

    for value in 0..(region.capacity / CELL_SIZE) as i64 {
        push_cell(&mut memory, &mut sp, region, StackId::Data, value)?;
    }
    assert_eq!(sp, region.limit());
    assert_eq!(
        push_cell(&mut memory, &mut sp, region, StackId::Data, -1),
        Err(Fault::Overflow(StackId::Data))
    );
    // The fault leaves the pointer and the neighboring byte untouched.
    assert_eq!(sp, region.limit());
    assert_eq!(memory[region.limit()], 0);
    Ok(())
}

#[test]
fn return_stack_region_is_independent() -> Result<(), Fault> {
    let layout = MemoryLayout::default();
    let mut memory = memory();
    let mut sp = layout.data_stack.base;
    let mut rp = layout.return_stack.base;

    push_cell(
        &mut memory,
        &mut sp,
        layout.data_stack,
        StackId::Data,
        111,
    )?;
    push_cell(
        &mut memory,
        &mut rp,
        layout.return_stack,
        StackId::Return,
        222,
    )?;

    assert_eq!(
        pop_cell(&memory, &mut rp, layout.return_stack, StackId::Return)?,
        222
    );
    assert_eq!(
        pop_cell(&memory, &mut rp, layout.return_stack, StackId::Return),
        Err(Fault::Underflow(StackId::Return))
    );
    // The data stack is unaffected by return stack traffic.
    assert_eq!(
        pop_cell(&memory, &mut sp, layout.data_stack, StackId::Data)?,
        111
    );
    Ok(())
}
