//! Thread-local errno and last-failing-function storage for the C surface.
//!
//! Both slots are per-thread. When thread-local storage is unreachable (a
//! thread being torn down), each falls back to a single process-wide slot;
//! in that mode concurrent failing calls race and the observed value is the
//! last writer's, so it is only reliable single-threaded. The errfunc
//! fallback is an explicit mutex-guarded global with process lifetime: set
//! by failing calls, never cleared, readable at any time.

use std::cell::{Cell, UnsafeCell};
use std::ffi::{CStr, c_char, c_int};

use parking_lot::Mutex;

/// Process-wide errfunc fallback. Holds `'static` strings only, so handing
/// a pointer out from under the lock is sound.
static FALLBACK_ERRFUNC: Mutex<Option<&'static CStr>> = Mutex::new(None);

thread_local! {
    static ERRFUNC: Cell<Option<&'static CStr>> = const { Cell::new(None) };
}

/// Location of the boundkit errno value for the calling thread.
#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn bk_errno_location() -> *mut c_int {
    static mut FALLBACK_ERRNO: c_int = 0;
    thread_local! {
        static ERRNO: UnsafeCell<c_int> = const { UnsafeCell::new(0) };
    }
    match ERRNO.try_with(|cell| cell.get()) {
        Ok(ptr) => ptr,
        Err(_) => core::ptr::addr_of_mut!(FALLBACK_ERRNO),
    }
}

/// Name of the most recent boundkit call that failed on this thread, or
/// null if none has.
///
/// Failing calls overwrite the slot; successful calls leave it alone, so a
/// stale name can outlive later successes. Check each call's return
/// sentinel first and consult this only after a failure.
#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn bk_errfunc() -> *const c_char {
    let recorded = ERRFUNC
        .try_with(Cell::get)
        .unwrap_or_else(|_| *FALLBACK_ERRFUNC.lock());
    recorded.map_or(core::ptr::null(), CStr::as_ptr)
}

/// Records a failure: sets errno and the errfunc slot for the calling
/// thread (or the process-wide fallbacks when its TLS is gone).
pub(crate) fn record_failure(op: &'static CStr, errno: c_int) {
    unsafe { *bk_errno_location() = errno };
    if ERRFUNC.try_with(|cell| cell.set(Some(op))).is_err() {
        *FALLBACK_ERRFUNC.lock() = Some(op);
    }
}
