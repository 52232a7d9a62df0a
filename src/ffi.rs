//! C ABI surface for compiled Tacit object files.
//!
//! Every primitive is exported with the uniform signature
//! `void tacit_<op>(uint8_t *memory, size_t *sp, size_t *rp)`: the base
//! of the shared memory region and the two stack-pointer cells, whether
//! or not the primitive uses the return stack. That triple, together
//! with the reference layout constants in [`crate::layout`], is the
//! binary contract a code generator emits calls against; a generator
//! assuming different constants silently corrupts memory, which is why
//! the exported surface is pinned to the default layout. Embedders who
//! negotiate a custom layout use the Rust API instead.
//!
//! A fault crossing this boundary is fatal: the message goes to stderr
//! and the process exits with status 1. Library callers get the same
//! faults as `Result` values and choose their own policy.

use crate::fault::Fault;
use crate::layout::MemoryLayout;
use crate::runtime::{Machine, Runtime};
use std::io::{self, Write};
use std::process;
use std::slice;
use std::sync::Mutex;

/// The one process-wide instance standalone executables run against.
static RUNTIME: Mutex<Option<Runtime>> = Mutex::new(None);

fn fatal(fault: Fault) -> ! {
    let _ = io::stdout().flush();
    eprintln!("{fault}");
    process::exit(1);
}

/// Allocate the process-wide runtime with the reference layout. Must
/// run before any primitive executes; calling it again replaces the
/// previous instance.
#[no_mangle]
pub extern "C" fn tacit_rt_init() {
    let runtime = match Runtime::new() {
        Ok(runtime) => runtime,
        Err(fault) => fatal(fault),
    };
    *RUNTIME.lock().unwrap() = Some(runtime);
}

/// Release the process-wide runtime. A no-op when already torn down.
#[no_mangle]
pub extern "C" fn tacit_rt_cleanup() {
    RUNTIME.lock().unwrap().take();
}

/// One-time handoff of the live handles to generated code: the memory
/// base and the two stack-pointer cells. The pointers stay valid until
/// `tacit_rt_cleanup`.
///
/// # Safety
/// The three out-parameters must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn tacit_rt_get_state(
    memory_out: *mut *mut u8,
    sp_out: *mut *mut usize,
    rp_out: *mut *mut usize,
) {
    let mut guard = RUNTIME.lock().unwrap();
    let runtime = match guard.as_mut() {
        Some(runtime) => runtime,
        None => {
            eprintln!("runtime not initialized");
            process::exit(1);
        }
    };
    let (memory, sp, rp) = runtime.state();
    *memory_out = memory.as_mut_ptr();
    *sp_out = sp as *mut usize;
    *rp_out = rp as *mut usize;
}

macro_rules! primitives {
    ($($symbol:ident => $method:ident),* $(,)?) => {
        $(
            /// # Safety
            /// `memory` must point at a region of at least the default
            /// capacity and `sp`/`rp` at the stack-pointer cells handed
            /// out by `tacit_rt_get_state`.
            #[no_mangle]
            pub unsafe extern "C" fn $symbol(memory: *mut u8, sp: *mut usize, rp: *mut usize) {
                let layout = MemoryLayout::default();
                let mut machine = Machine {
                    memory: slice::from_raw_parts_mut(memory, layout.memory_capacity),
                    sp: &mut *sp,
                    rp: &mut *rp,
                    layout,
                };
                if let Err(fault) = machine.$method() {
                    fatal(fault);
                }
            }
        )*
    };
}

primitives! {
    tacit_print_signed => print_signed,
    tacit_print_unsigned => print_unsigned,
    tacit_print_signed_field => print_signed_field,
    tacit_print_unsigned_field => print_unsigned_field,
    tacit_emit => emit,
    tacit_key => key,
    tacit_newline => newline,
    tacit_space => space,
    tacit_type => type_out,
    tacit_dup => dup,
    tacit_drop => drop_top,
    tacit_swap => swap,
    tacit_over => over,
    tacit_rot => rot,
    tacit_pick => pick,
    tacit_depth => depth,
    tacit_to_r => to_r,
    tacit_r_from => r_from,
    tacit_r_fetch => r_fetch,
    tacit_i => loop_i,
    tacit_j => loop_j,
    tacit_add => add,
    tacit_sub => sub,
    tacit_mul => mul,
    tacit_div => div,
    tacit_negate => negate,
    tacit_less_than => less_than,
    tacit_greater_than => greater_than,
    tacit_equal => equal,
    tacit_fetch => fetch,
    tacit_store => store,
    tacit_byte_fetch => byte_fetch,
    tacit_byte_store => byte_store,
}
