//!
//! Digest adapter over a native engine context.
//!
//! A [`NativeDigest`] owns exactly one context handle and forwards every
//! update, in call order, to the engine table of its algorithm. Producing a
//! digest re-initializes the context, so the adapter is immediately ready
//! for the next message.
//!
//! Lifecycle of the owned context:
//!
//! - `release()` returns it to the store synchronously. Later calls fail
//!   with [`NativeDigestError::UseAfterClose`]; releasing again is a no-op.
//! - Dropping an adapter that was not released hands the context to the
//!   store's background reclaimer.
//!

use core::ptr;
use std::sync::Arc;

use digest_traits::digest::{DigestCtrlReset, DigestOp, DynamicDigestOp, ErrorType};

use crate::algorithm::{Algorithm, AlgorithmDescriptor};
use crate::error::{check_range, NativeDigestError};
use crate::input::{ByteWindow, Input};
use crate::store::{ContextHandle, ContextStore};

pub struct NativeDigest {
    descriptor: &'static AlgorithmDescriptor,
    store: Arc<ContextStore>,
    handle: Option<ContextHandle>,
}

impl NativeDigest {
    /// Allocates and initializes a context for `algorithm`.
    pub fn new(store: Arc<ContextStore>, algorithm: Algorithm) -> Result<Self, NativeDigestError> {
        let descriptor = algorithm.descriptor();
        let handle = store.allocate(descriptor.context_size())?;
        // SAFETY: freshly allocated block of `context_size()` bytes with the
        // engine's alignment, owned by this handle only.
        unsafe { (descriptor.engine().init)(handle.as_ptr()) };
        Ok(Self {
            descriptor,
            store,
            handle: Some(handle),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.descriptor.algorithm()
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name()
    }

    pub fn digest_length(&self) -> usize {
        self.descriptor.digest_length()
    }

    pub fn is_released(&self) -> bool {
        self.handle.is_none()
    }

    fn context(&self) -> Result<&ContextHandle, NativeDigestError> {
        self.handle.as_ref().ok_or(NativeDigestError::UseAfterClose {
            algorithm: self.descriptor.name(),
        })
    }

    /// Absorbs one input.
    ///
    /// Byte ranges are bounds-checked before they reach the engine. A window
    /// is consumed up to its limit; an exhausted window absorbs nothing.
    pub fn update<'a: 'w, 'w>(&mut self, input: impl Into<Input<'a, 'w>>) -> Result<(), NativeDigestError> {
        let engine = self.descriptor.engine();
        let ctx = self.context()?.as_ptr();
        match input.into() {
            Input::Byte(byte) => unsafe { (engine.update_byte)(ctx, byte) },
            Input::Bytes {
                data,
                offset,
                length,
            } => {
                check_range(data.len(), offset, length)?;
                // SAFETY: `[offset, offset + length)` was checked against `data`.
                unsafe { (engine.update_bytes)(ctx, data.as_ptr(), offset, length) };
            }
            Input::Buffer(window) => {
                let (offset, length) = (window.position(), window.remaining());
                if length > 0 {
                    // SAFETY: `position + remaining == limit <= capacity`.
                    unsafe { (engine.update_buffer)(ctx, window.data().as_ptr(), offset, length) };
                }
                window.consume();
            }
        }
        Ok(())
    }

    pub fn update_byte(&mut self, byte: u8) -> Result<(), NativeDigestError> {
        self.update(Input::Byte(byte))
    }

    pub fn update_bytes(&mut self, data: &[u8]) -> Result<(), NativeDigestError> {
        self.update(Input::bytes(data))
    }

    pub fn update_range(
        &mut self,
        data: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(), NativeDigestError> {
        self.update(Input::range(data, offset, length))
    }

    pub fn update_window(&mut self, window: &mut ByteWindow<'_>) -> Result<(), NativeDigestError> {
        self.update(Input::Buffer(window))
    }

    /// Finalizes into `output` and re-initializes the context.
    pub fn finish_into(&mut self, output: &mut [u8]) -> Result<usize, NativeDigestError> {
        let ctx = self.context()?.as_ptr();
        let length = self.digest_length();
        if output.len() < length {
            return Err(NativeDigestError::OutputTooSmall {
                needed: length,
                available: output.len(),
            });
        }
        let engine = self.descriptor.engine();
        // SAFETY: `output` holds at least the digest length; the context is
        // re-initialized before anything else can observe it.
        unsafe {
            (engine.finalize)(ctx, output.as_mut_ptr());
            (engine.init)(ctx);
        }
        Ok(length)
    }

    /// Returns the digest of everything absorbed since the last digest or reset.
    pub fn digest(&mut self) -> Result<Vec<u8>, NativeDigestError> {
        self.context()?;
        let mut output = vec![0u8; self.digest_length()];
        self.finish_into(&mut output)?;
        Ok(output)
    }

    /// Absorbs `data`, then digests.
    pub fn digest_of(&mut self, data: &[u8]) -> Result<Vec<u8>, NativeDigestError> {
        self.update_bytes(data)?;
        self.digest()
    }

    /// Discards absorbed input, reusing the same context block.
    pub fn reset(&mut self) -> Result<(), NativeDigestError> {
        let ctx = self.context()?.as_ptr();
        unsafe { (self.descriptor.engine().init)(ctx) };
        Ok(())
    }

    /// Copies the accumulated state into a new context.
    pub fn try_clone(&self) -> Result<Self, NativeDigestError> {
        let source = self.context()?;
        let copy = self.store.allocate(source.size())?;
        // SAFETY: distinct blocks of identical size; engine contexts hold no
        // pointers into themselves.
        unsafe {
            ptr::copy_nonoverlapping(
                source.as_ptr().cast::<u8>(),
                copy.as_ptr().cast::<u8>(),
                source.size(),
            )
        };
        Ok(Self {
            descriptor: self.descriptor,
            store: self.store.clone(),
            handle: Some(copy),
        })
    }

    /// Returns the context to the store now.
    pub fn release(&mut self) -> Result<(), NativeDigestError> {
        match self.handle.take() {
            Some(handle) => self.store.release(handle),
            None => Ok(()),
        }
    }
}

impl Drop for NativeDigest {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.store.reclaim(handle);
        }
    }
}

impl core::fmt::Debug for NativeDigest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NativeDigest")
            .field("algorithm", &self.name())
            .field("context", &self.handle.as_ref().map(ContextHandle::id))
            .finish()
    }
}

impl ErrorType for NativeDigest {
    type Error = NativeDigestError;
}

impl DynamicDigestOp for NativeDigest {
    type Error = NativeDigestError;
    type AlgorithmId = Algorithm;

    fn update(&mut self, input: &[u8]) -> Result<(), NativeDigestError> {
        self.update_bytes(input)
    }

    fn digest_into(&mut self, output: &mut [u8]) -> Result<usize, NativeDigestError> {
        self.finish_into(output)
    }

    fn reset(&mut self) -> Result<(), NativeDigestError> {
        NativeDigest::reset(self)
    }

    fn output_size(&self) -> usize {
        self.digest_length()
    }

    fn algorithm_id(&self) -> Self::AlgorithmId {
        self.algorithm()
    }
}

impl DigestCtrlReset for NativeDigest {
    fn reset(&mut self) -> Result<(), NativeDigestError> {
        NativeDigest::reset(self)
    }
}

impl DigestOp for NativeDigest {
    type Output = Vec<u8>;

    fn update(&mut self, input: &[u8]) -> Result<(), NativeDigestError> {
        self.update_bytes(input)
    }

    /// Digests and releases the context in one step.
    fn finalize(mut self) -> Result<Vec<u8>, NativeDigestError> {
        let output = self.digest()?;
        self.release()?;
        Ok(output)
    }
}
