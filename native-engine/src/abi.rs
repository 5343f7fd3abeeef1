use core::ffi::c_void;

/// Alignment every context block must satisfy.
pub const CONTEXT_ALIGN: usize = 16;

/// Function table for one digest algorithm.
///
/// All pointers passed to the `unsafe` entries must reference a context
/// block of at least `context_size()` bytes aligned to [`CONTEXT_ALIGN`].
/// Absorb entries read exactly `[offset, offset + length)` of `data` and
/// accept `length == 0` as a no-op. After `finalize` the context holds no
/// valid state until `init` is called again.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct DigestEngine {
    /// Size in bytes of the context block for this algorithm.
    pub context_size: extern "C" fn() -> usize,
    /// Initializes (or re-initializes) the state in `ctx`.
    pub init: unsafe extern "C" fn(ctx: *mut c_void),
    /// Absorbs a single byte.
    pub update_byte: unsafe extern "C" fn(ctx: *mut c_void, byte: u8),
    /// Absorbs `length` bytes of an array starting at `offset`.
    pub update_bytes:
        unsafe extern "C" fn(ctx: *mut c_void, data: *const u8, offset: usize, length: usize),
    /// Absorbs `length` bytes of a buffer region starting at `offset`.
    pub update_buffer:
        unsafe extern "C" fn(ctx: *mut c_void, data: *const u8, offset: usize, length: usize),
    /// Writes the digest to `digest`, which must hold the algorithm's output length.
    pub finalize: unsafe extern "C" fn(ctx: *mut c_void, digest: *mut u8),
}
