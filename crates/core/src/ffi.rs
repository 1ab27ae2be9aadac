//! C FFI bindings for mobile platforms

use core::ffi::{CStr, c_char};

use crate::{Engine, Stamp, STAMP_VERSION};

/// Read a NUL-terminated UTF-8 string, `None` on null or invalid UTF-8
///
/// # Safety
/// `ptr` must be null or point to a valid NUL-terminated string.
unsafe fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Verify a stamp given in wire format
///
/// Returns 1 if valid, 0 if invalid, -1 on null pointer or parse failure.
#[unsafe(no_mangle)]
pub extern "C" fn hashcash_verify(stamp: *const c_char) -> i32 {
    let Some(text) = (unsafe { read_str(stamp) }) else {
        return -1;
    };

    match text.parse::<Stamp>() {
        Ok(stamp) => Engine::new().verify(&stamp) as i32,
        Err(_) => -1,
    }
}

/// Mine a stamp for the given fields
/// - resource, nonce: NUL-terminated UTF-8 strings
/// - max_iterations: inclusive counter cap, `u64::MAX` for unbounded
/// - out_counter: receives the solving counter (or the last one tried)
///
/// Returns 1 if solved, 0 if the budget ran out, -1 on bad input.
#[unsafe(no_mangle)]
pub extern "C" fn hashcash_mine(
    resource: *const c_char,
    nonce: *const c_char,
    timestamp: i64,
    difficulty: u32,
    max_iterations: u64,
    out_counter: *mut u64,
) -> i32 {
    if out_counter.is_null() {
        return -1;
    }
    let (Some(resource), Some(nonce)) = (unsafe { read_str(resource) }, unsafe { read_str(nonce) })
    else {
        return -1;
    };

    let mut stamp = Stamp::from_parts(STAMP_VERSION, difficulty, timestamp, resource, nonce, 0);
    let budget = (max_iterations != u64::MAX).then_some(max_iterations);
    let solved = Engine::new().mine(&mut stamp, budget).is_ok();

    unsafe {
        *out_counter = stamp.counter();
    }

    solved as i32
}
