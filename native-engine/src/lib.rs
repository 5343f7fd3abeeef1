//!
//! Native digest engine.
//!
//! Each supported algorithm is published as a [`DigestEngine`] function
//! table with C calling convention. Callers own the context memory: they
//! allocate `context_size()` bytes aligned to [`CONTEXT_ALIGN`], pass the
//! pointer to `init`, absorb input and finally call `finalize`. The engine
//! never allocates, never frees and never keeps pointers between calls.
//!

mod abi;
mod engines;

pub use abi::{CONTEXT_ALIGN, DigestEngine};
pub use engines::{
    MD5, SHA1, SHA224, SHA256, SHA384, SHA512, SHA512_224, SHA512_256, SHA3_224, SHA3_256,
    SHA3_384, SHA3_512,
};
