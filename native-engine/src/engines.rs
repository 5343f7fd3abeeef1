use core::ffi::c_void;
use core::{mem, ptr, slice};

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

use crate::abi::{CONTEXT_ALIGN, DigestEngine};

pub static MD5: DigestEngine = engine::<Md5>();
pub static SHA1: DigestEngine = engine::<Sha1>();
pub static SHA224: DigestEngine = engine::<Sha224>();
pub static SHA256: DigestEngine = engine::<Sha256>();
pub static SHA384: DigestEngine = engine::<Sha384>();
pub static SHA512: DigestEngine = engine::<Sha512>();
pub static SHA512_224: DigestEngine = engine::<Sha512_224>();
pub static SHA512_256: DigestEngine = engine::<Sha512_256>();
pub static SHA3_224: DigestEngine = engine::<Sha3_224>();
pub static SHA3_256: DigestEngine = engine::<Sha3_256>();
pub static SHA3_384: DigestEngine = engine::<Sha3_384>();
pub static SHA3_512: DigestEngine = engine::<Sha3_512>();

const fn engine<H: Digest>() -> DigestEngine {
    DigestEngine {
        context_size: context_size::<H>,
        init: init::<H>,
        update_byte: update_byte::<H>,
        update_bytes: absorb::<H>,
        update_buffer: absorb::<H>,
        finalize: finalize::<H>,
    }
}

extern "C" fn context_size<H>() -> usize {
    const { assert!(mem::align_of::<H>() <= CONTEXT_ALIGN) };
    mem::size_of::<H>()
}

unsafe extern "C" fn init<H: Digest>(ctx: *mut c_void) {
    // The previous state, if any, is plain data and is overwritten without drop.
    unsafe { ptr::write(ctx.cast::<H>(), H::new()) };
}

unsafe extern "C" fn update_byte<H: Digest>(ctx: *mut c_void, byte: u8) {
    let state = unsafe { &mut *ctx.cast::<H>() };
    Digest::update(state, [byte]);
}

unsafe extern "C" fn absorb<H: Digest>(
    ctx: *mut c_void,
    data: *const u8,
    offset: usize,
    length: usize,
) {
    if length == 0 {
        return;
    }
    let state = unsafe { &mut *ctx.cast::<H>() };
    let input = unsafe { slice::from_raw_parts(data.add(offset), length) };
    Digest::update(state, input);
}

unsafe extern "C" fn finalize<H: Digest>(ctx: *mut c_void, digest: *mut u8) {
    let state = unsafe { ptr::read(ctx.cast::<H>()) };
    let output = state.finalize();
    unsafe { ptr::copy_nonoverlapping(output.as_ptr(), digest, output.len()) };
}
