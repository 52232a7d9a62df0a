use crate::fault::Fault;
use crate::layout::{
    MemoryLayout, StackRegion, CELL_SIZE, DEFAULT_DATA_STACK_BASE, DEFAULT_MEMORY_CAPACITY,
    DEFAULT_RETURN_STACK_BASE,
};
use crate::runtime::Runtime;

use test_log::test;

#[test]
fn reference_layout_constants() {
    let layout = MemoryLayout::default();
    assert_eq!(layout.memory_capacity, 8 * 1024 * 1024);
    assert_eq!(layout.data_stack.base, 0x000000);
    assert_eq!(layout.data_stack.capacity, 0x010000);
    assert_eq!(layout.return_stack.base, 0x010000);
    assert_eq!(layout.return_stack.capacity, 0x010000);
    assert_eq!(CELL_SIZE, 8);
    assert!(layout.validate().is_ok());
}

#[test]
fn new_runtime_is_zeroed_with_pointers_at_base() -> Result<(), Fault> {
    let mut rt = Runtime::new()?;
    let layout = *rt.layout();
    let (memory, sp, rp) = rt.state();
    assert_eq!(memory.len(), DEFAULT_MEMORY_CAPACITY);
    assert!(memory.iter().all(|&b| b == 0));
    assert_eq!(*sp, DEFAULT_DATA_STACK_BASE);
    assert_eq!(*rp, DEFAULT_RETURN_STACK_BASE);
    assert_eq!(layout, MemoryLayout::default());
    Ok(())
}

#[test]
fn rejects_overlapping_stacks() {
    let layout = MemoryLayout {
        memory_capacity: 0x10000,
        data_stack: StackRegion {
            base: 0,
            capacity: 0x1000,
        },
        return_stack: StackRegion {
            base: 0x800,
            capacity: 0x1000,
        },
    };
    assert!(matches!(
        Runtime::with_layout(layout),
        Err(Fault::InvalidLayout(_))
    ));
}

#[test]
fn rejects_region_outside_memory() {
    let layout = MemoryLayout {
        memory_capacity: 0x1000,
        data_stack: StackRegion {
            base: 0,
            capacity: 0x800,
        },
        return_stack: StackRegion {
            base: 0x800,
            capacity: 0x1000,
        },
    };
    assert!(matches!(
        Runtime::with_layout(layout),
        Err(Fault::InvalidLayout(_))
    ));
}

#[test]
fn rejects_unaligned_and_empty_regions() {
    let mut layout = MemoryLayout::default();
    layout.data_stack.base = 3;
    assert!(matches!(
        layout.validate(),
        Err(Fault::InvalidLayout(_))
    ));

    let mut layout = MemoryLayout::default();
    layout.return_stack.capacity = 0;
    assert!(matches!(
        layout.validate(),
        Err(Fault::InvalidLayout(_))
    ));
}

#[test]
fn state_handoff_reflects_primitive_traffic() -> Result<(), Fault> {
    let mut rt = Runtime::new()?;
    {
        let mut m = rt.machine();
        m.push(1)?;
        m.push(2)?;
    }
    let (_, sp, rp) = rt.state();
    assert_eq!(*sp, DEFAULT_DATA_STACK_BASE + 2 * CELL_SIZE);
    assert_eq!(*rp, DEFAULT_RETURN_STACK_BASE);
    Ok(())
}

#[test]
fn reset_restores_initial_state() -> Result<(), Fault> {
    let mut rt = Runtime::new()?;
    {
        let mut m = rt.machine();
        m.push(42)?;
        m.push(0x100000)?;
        m.store()?;
        m.push(7)?;
        m.to_r()?;
    }
    rt.reset();
    let (memory, sp, rp) = rt.state();
    assert!(memory.iter().all(|&b| b == 0));
    assert_eq!(*sp, DEFAULT_DATA_STACK_BASE);
    assert_eq!(*rp, DEFAULT_RETURN_STACK_BASE);
    Ok(())
}

#[test]
fn independent_instances_do_not_share_state() -> Result<(), Fault> {
    let mut a = Runtime::new()?;
    let mut b = Runtime::new()?;
    a.machine().push(1)?;
    let (_, sp_b, _) = b.state();
    assert_eq!(*sp_b, DEFAULT_DATA_STACK_BASE);
    Ok(())
}

#[test]
fn layout_parses_from_toml() -> Result<(), Fault> {
    let layout = MemoryLayout::from_toml_str(
        r#"
            memory_capacity = 65536

            [data_stack]
            base = 0
            capacity = 4096

            [return_stack]
            base = 4096
            capacity = 4096
        "#,
    )?;
    assert_eq!(layout.memory_capacity, 65536);
    assert_eq!(layout.data_stack.capacity, 4096);
    assert_eq!(layout.return_stack.base, 4096);
    Ok(())
}

#[test]
fn toml_defaults_fill_missing_fields() -> Result<(), Fault> {
    let layout = MemoryLayout::from_toml_str("")?;
    assert_eq!(layout, MemoryLayout::default());
    Ok(())
}

#[test]
fn invalid_toml_layout_is_rejected() {
    assert!(matches!(
        MemoryLayout::from_toml_str("memory_capacity = \"lots\""),
        Err(Fault::InvalidLayout(_))
    ));
    // Well-formed TOML, ill-formed layout.
    assert!(matches!(
        MemoryLayout::from_toml_str("memory_capacity = 16"),
        Err(Fault::InvalidLayout(_))
    ));
}
